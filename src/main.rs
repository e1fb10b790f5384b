use std::fs;

use algom::Session;
use clap::Parser;

/// algom is an algebraic expression engine: it evaluates expressions,
/// defines functions, and renders results to LaTeX.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treat the input as a file path instead of an inline script.
    #[arg(short, long)]
    file: bool,

    /// Render the parsed input to LaTeX instead of evaluating it.
    #[arg(short, long)]
    latex: bool,

    /// Print the parsed tree instead of evaluating it.
    #[arg(short, long)]
    tree: bool,

    /// Print the scanned token stream instead of evaluating.
    #[arg(short = 'k', long)]
    tokens: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let mut session = Session::new();

    if args.tokens {
        match algom::interpreter::lexer::token_stream(&script) {
            Ok(stream) => print!("{stream:?}"),
            Err(error) => eprintln!("{error}"),
        }
    } else if args.tree {
        let parsed = session.parse(&script);
        match parsed.error {
            Some(error) => eprintln!("{error}"),
            None => println!("{:#?}", parsed.root),
        }
    } else if args.latex {
        println!("{}", session.latex(&script));
    } else {
        println!("{}", session.evaluate(&script));
    }
}
