use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Scientific-notation literals, such as `1.5e-3` or `2e10`. These carry
    /// their raw lexeme; the parser rewrites them into `base * 10^exp`.
    #[regex(r"[0-9]+\.[0-9]+[eE][+-]?[0-9]+", lexeme)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", lexeme)]
    Scientific(String),
    /// Floating-point literals, such as `3.14`.
    #[regex(r"[0-9]+\.[0-9]+", lexeme)]
    Float(String),
    /// Exact fraction literals: two integers joined directly by `/`, such as
    /// `3/4`. Whitespace around `/` lexes as division instead.
    #[regex(r"[0-9]+/[0-9]+", lexeme)]
    Fraction(String),
    /// Imaginary literals with a trailing `i`, such as `2i` or `2.5i`.
    #[regex(r"([0-9]+\.[0-9]+|[0-9]+)i", lexeme)]
    Complex(String),
    /// Binary integer literals, such as `0b1011`.
    #[regex(r"0b[01]+", lexeme)]
    Binary(String),
    /// Octal integer literals, such as `0o17`.
    #[regex(r"0o[0-7]+", lexeme)]
    Octal(String),
    /// Hexadecimal integer literals, such as `0xff`.
    #[regex(r"0x[0-9a-fA-F]+", lexeme)]
    Hex(String),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", lexeme)]
    Int(String),
    /// String literals. The lexeme carries the content without the quotes.
    #[regex(r#""[^"\n]*""#, |lex| {
        let slice = lex.slice();
        slice[1..slice.len() - 1].to_string()
    })]
    Chars(String),
    /// Boolean literal tokens: `true` or `false`.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),
    /// `let`
    #[token("let")]
    Let,
    /// `fn` (reserved; declarations use `let name(params) := body`)
    #[token("fn")]
    Fn,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `not`
    #[token("not")]
    Not,
    /// `mod`
    #[token("mod")]
    Mod,
    /// `rem`
    #[token("rem")]
    Rem,
    /// `div`
    #[token("div")]
    Div,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `xor`
    #[token("xor")]
    Xor,
    /// `nand`
    #[token("nand")]
    Nand,
    /// `nor`
    #[token("nor")]
    Nor,
    /// `xnor`
    #[token("xnor")]
    Xnor,
    /// `null`
    #[token("null")]
    Null,
    /// `NaN`
    #[token("NaN")]
    NanLit,
    /// `Inf`
    #[token("Inf")]
    InfLit,
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Symbol(String),
    /// `:=`
    #[token(":=")]
    Define,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `=`
    #[token("=")]
    Assign,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `%`
    #[token("%")]
    Percent,
    /// `~`
    #[token("~")]
    Tilde,
    /// `&` (scanned for completeness; no infix rule consumes it yet)
    #[token("&")]
    Amp,
    /// `<<`
    #[token("<<")]
    Lshift,
    /// `>>`
    #[token(">>")]
    Rshift,
    /// `|`
    #[token("|")]
    Pipe,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip)]
    Comment,
    /// Newlines advance the line counter and are otherwise skipped.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    Newline,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Whitespace,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Copies the current token slice out of the lexer.
fn lexeme(lex: &logos::Lexer<Token>) -> String {
    lex.slice().to_string()
}

impl Token {
    /// Returns `true` when the token can begin a primary expression, which is
    /// what implicit multiplication looks ahead for: a symbol, an opening
    /// parenthesis, or any numeric literal kind.
    #[must_use]
    pub const fn starts_primary(&self) -> bool {
        matches!(self,
                 Self::Symbol(_)
                 | Self::LParen
                 | Self::Int(_)
                 | Self::Float(_)
                 | Self::Fraction(_)
                 | Self::Scientific(_)
                 | Self::Complex(_)
                 | Self::Binary(_)
                 | Self::Octal(_)
                 | Self::Hex(_))
    }
}

/// Tokenizes an entire source string into `(token, line)` pairs.
///
/// Lexical failures never abort the process: an unrecognized character or an
/// unterminated string is reported as a [`ParseError`] carrying the offending
/// slice and its line number.
///
/// # Errors
/// Returns a `ParseError` for the first unrecognized piece of input.
///
/// # Example
/// ```
/// use algom::interpreter::lexer::{tokenize, Token};
///
/// let tokens = tokenize("2x").unwrap();
/// assert_eq!(tokens[0].0, Token::Int("2".to_string()));
/// assert_eq!(tokens[1].0, Token::Symbol("x".to_string()));
///
/// assert!(tokenize("2 ? 3").is_err());
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        match token {
            Ok(tok) => tokens.push((tok, lexer.extras.line)),
            Err(()) => {
                let slice = lexer.slice();
                let line = lexer.extras.line;
                if slice.starts_with('"') {
                    return Err(ParseError::UnterminatedString { line });
                }
                return Err(ParseError::UnrecognizedToken { token: slice.to_string(),
                                                           line });
            },
        }
    }

    Ok(tokens)
}

/// A fully scanned token stream.
///
/// This is a debugging and tooling surface: its `Debug` form prints one
/// `line: token` pair per row, which is what the CLI's token dump shows.
pub struct TokenStream(pub Vec<(Token, usize)>);

impl std::fmt::Debug for TokenStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (token, line) in &self.0 {
            writeln!(f, "{line:>4}  {token:?}")?;
        }
        Ok(())
    }
}

/// Tokenizes a source string into a [`TokenStream`].
///
/// # Errors
/// Returns a `ParseError` for the first unrecognized piece of input.
pub fn token_stream(source: &str) -> Result<TokenStream, ParseError> {
    tokenize(source).map(TokenStream)
}

#[cfg(test)]
mod tests {
    use super::{token_stream, tokenize, Token};

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn numeric_literal_classes() {
        assert_eq!(kinds("42"), vec![Token::Int("42".into())]);
        assert_eq!(kinds("3.14"), vec![Token::Float("3.14".into())]);
        assert_eq!(kinds("3/4"), vec![Token::Fraction("3/4".into())]);
        assert_eq!(kinds("2i"), vec![Token::Complex("2i".into())]);
        assert_eq!(kinds("0xff"), vec![Token::Hex("0xff".into())]);
        assert_eq!(kinds("0o17"), vec![Token::Octal("0o17".into())]);
        assert_eq!(kinds("0b101"), vec![Token::Binary("0b101".into())]);
        assert_eq!(kinds("1.5e-3"), vec![Token::Scientific("1.5e-3".into())]);
    }

    #[test]
    fn fraction_requires_adjacency() {
        assert_eq!(kinds("10 / 2"),
                   vec![Token::Int("10".into()), Token::Slash, Token::Int("2".into())]);
        assert_eq!(kinds("10/2"), vec![Token::Fraction("10/2".into())]);
    }

    #[test]
    fn keywords_and_symbols() {
        assert_eq!(kinds("let x := 1"),
                   vec![Token::Let,
                        Token::Symbol("x".into()),
                        Token::Define,
                        Token::Int("1".into())]);
        assert_eq!(kinds("letx"), vec![Token::Symbol("letx".into())]);
    }

    #[test]
    fn line_tracking() {
        let tokens = tokenize("1;\n2;\n3;").unwrap();
        assert_eq!(tokens[0].1, 1);
        assert_eq!(tokens[2].1, 2);
        assert_eq!(tokens[4].1, 3);
    }

    #[test]
    fn lexical_failures_are_data() {
        assert!(tokenize("2 ? 3").is_err());
        assert!(tokenize("\"abc").is_err());
    }

    #[test]
    fn token_stream_debug_lists_lines() {
        let stream = token_stream("1;\n2;").unwrap();
        let dump = format!("{stream:?}");
        assert_eq!(dump.lines().count(), 4);
        assert!(dump.lines().next().unwrap().trim_start().starts_with('1'));
    }
}
