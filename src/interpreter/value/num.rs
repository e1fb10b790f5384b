use crate::error::EvalError;

/// Largest integer magnitude exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INT: i64 = 9_007_199_254_740_991;

/// The closed set of numeric subtypes a [`Num`] can carry.
///
/// Hex, octal, binary and scientific source literals are folded into `Int`
/// and `Float` at parse time, so only these four kinds exist at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumKind {
    /// An exact integer, such as `42`.
    Int,
    /// A double-precision floating-point number, such as `3.14`.
    Float,
    /// An exact fraction, such as `3/4`.
    Fraction,
    /// A complex number, such as `1 + 2i`.
    Complex,
}

/// A numeric AST leaf.
///
/// A `Num` carries its textual form plus a kind tag; the numeric payload is
/// decoded on demand through [`Num::numval`]. Every fraction produced by an
/// arithmetic operation is already in lowest terms with a non-negative
/// denominator; this is an invariant of the tower, not an optimization.
#[derive(Debug, Clone, PartialEq)]
pub struct Num {
    /// The textual form of the number, e.g. `"42"`, `"3/4"` or `"1 + 2i"`.
    pub value: String,
    /// The numeric subtype.
    pub kind:  NumKind,
}

/// A decoded numeric payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumVal {
    /// An exact integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A numerator/denominator pair.
    Fraction(i64, i64),
    /// A real/imaginary pair.
    Complex(f64, f64),
}

/// Computes the greatest common divisor of two magnitudes.
fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Reduces `n/d` to lowest terms with the sign carried by the numerator.
///
/// Returns the reduced pair, or `None` when the denominator is zero or the
/// reduced terms overflow `i64` (callers fall back to floating point).
fn reduce(n: i128, d: i128) -> Option<(i64, i64)> {
    if d == 0 {
        return None;
    }
    let sign: i128 = if (n < 0) != (d < 0) { -1 } else { 1 };
    let (n_abs, d_abs) = (n.unsigned_abs(), d.unsigned_abs());
    let g = gcd(n_abs, d_abs).max(1);
    let numer = sign * i128::try_from(n_abs / g).ok()?;
    let denom = i128::try_from(d_abs / g).ok()?;
    Some((i64::try_from(numer).ok()?, i64::try_from(denom).ok()?))
}

/// Produces a reduced fraction `Num`, falling back to a float when the exact
/// form cannot be represented.
fn simplify_wide(n: i128, d: i128) -> Num {
    match reduce(n, d) {
        Some((numer, denom)) => Num { value: format!("{numer}/{denom}"),
                                      kind:  NumKind::Fraction, },
        #[allow(clippy::cast_precision_loss)]
        None => {
            if d == 0 {
                if n == 0 {
                    Num::from_f64(f64::NAN)
                } else if n > 0 {
                    Num::from_f64(f64::INFINITY)
                } else {
                    Num::from_f64(f64::NEG_INFINITY)
                }
            } else {
                Num::from_f64(n as f64 / d as f64)
            }
        },
    }
}

/// Reduces a fraction to lowest terms with a positive denominator.
///
/// # Example
/// ```
/// use algom::interpreter::value::num::simplify;
///
/// assert_eq!(simplify(2, -4).value, "-1/2");
/// assert_eq!(simplify(-3, -9).value, "1/3");
/// assert_eq!(simplify(4, 2).value, "2/1");
/// ```
#[must_use]
pub fn simplify(n: i64, d: i64) -> Num {
    simplify_wide(i128::from(n), i128::from(d))
}

/// Formats an `f64` the way the engine prints floats: `NaN`, `Inf`, `-Inf`,
/// or the shortest round-trip decimal form.
fn float_repr(x: f64) -> String {
    if x.is_nan() {
        "NaN".to_string()
    } else if x == f64::INFINITY {
        "Inf".to_string()
    } else if x == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        format!("{x}")
    }
}

impl Num {
    /// Builds an integer `Num` from an `i64`.
    #[must_use]
    pub fn from_i64(n: i64) -> Self {
        Self { value: n.to_string(),
               kind:  NumKind::Int, }
    }

    /// Builds a float `Num` from an `f64`, using `NaN`/`Inf` spellings for
    /// the non-finite values.
    #[must_use]
    pub fn from_f64(x: f64) -> Self {
        Self { value: float_repr(x),
               kind:  NumKind::Float, }
    }

    /// Builds an integer `Num` by parsing `text` in the given radix.
    /// Unparseable input degrades to a `NaN` float.
    #[must_use]
    pub fn int(text: &str, radix: u32) -> Self {
        match i64::from_str_radix(text, radix) {
            Ok(n) => Self::from_i64(n),
            Err(_) => text.parse::<f64>().map_or_else(|_| Self::from_f64(f64::NAN), Self::classify),
        }
    }

    /// Builds a float `Num` directly from source text.
    #[must_use]
    pub fn float(text: &str) -> Self {
        Self { value: text.to_string(),
               kind:  NumKind::Float, }
    }

    /// Builds a fraction `Num` from raw literal text such as `"3/4"`.
    ///
    /// Literals are kept verbatim; reduction to lowest terms is the job of
    /// every fraction-producing *operation*, not of the reader.
    #[must_use]
    pub fn fraction(text: &str) -> Self {
        Self { value: text.to_string(),
               kind:  NumKind::Fraction, }
    }

    /// Builds a complex `Num` from real and imaginary parts, collapsing to a
    /// real number when the imaginary part vanishes.
    #[must_use]
    pub fn complex(real: f64, imaginary: f64) -> Self {
        if imaginary == 0.0 {
            return Self::classify(real);
        }
        Self { value: format!("{} + {}i", float_repr(real), float_repr(imaginary)),
               kind:  NumKind::Complex, }
    }

    /// Classifies a computed `f64` result: exact safe integers become `Int`,
    /// everything else stays `Float`. This is the bottom edge of the
    /// promotion lattice.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn classify(x: f64) -> Self {
        if x.is_finite() && x.fract() == 0.0 && x.abs() <= MAX_SAFE_INT as f64 {
            Self::from_i64(x as i64)
        } else {
            Self::from_f64(x)
        }
    }

    /// Decodes the textual payload into a [`NumVal`].
    #[must_use]
    pub fn numval(&self) -> NumVal {
        match self.kind {
            NumKind::Int => match self.value.parse::<i64>() {
                Ok(n) => NumVal::Int(n),
                Err(_) => NumVal::Float(self.value.parse::<f64>().unwrap_or(f64::NAN)),
            },
            NumKind::Float => NumVal::Float(match self.value.as_str() {
                                  "NaN" => f64::NAN,
                                  "Inf" => f64::INFINITY,
                                  "-Inf" => f64::NEG_INFINITY,
                                  text => text.parse().unwrap_or(f64::NAN),
                              }),
            NumKind::Fraction => match self.value.split_once('/') {
                Some((n, d)) => match (n.parse::<i64>(), d.parse::<i64>()) {
                    (Ok(n), Ok(d)) => NumVal::Fraction(n, d),
                    _ => NumVal::Float(f64::NAN),
                },
                None => NumVal::Float(f64::NAN),
            },
            NumKind::Complex => {
                let (real, imaginary) = complex_parts(&self.value);
                NumVal::Complex(real, imaginary)
            },
        }
    }

    /// Returns the value as a plain `f64`. Fractions divide through; complex
    /// numbers yield their real part.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn raw(&self) -> f64 {
        match self.numval() {
            NumVal::Int(n) => n as f64,
            NumVal::Float(x) => x,
            NumVal::Fraction(n, d) => n as f64 / d as f64,
            NumVal::Complex(real, _) => real,
        }
    }

    /// Truthiness of a number: strictly positive is true.
    #[must_use]
    pub fn is_true(&self) -> bool {
        self.raw() > 0.0
    }

    /// Returns `true` when the kind tag is `Fraction`.
    #[must_use]
    pub const fn is_fraction(&self) -> bool {
        matches!(self.kind, NumKind::Fraction)
    }

    /// Returns `true` when the kind tag is `Complex`.
    #[must_use]
    pub const fn is_complex(&self) -> bool {
        matches!(self.kind, NumKind::Complex)
    }

    /// Returns `true` when either operand is a fraction.
    #[must_use]
    pub const fn has_fraction(&self, other: &Self) -> bool {
        self.is_fraction() || other.is_fraction()
    }

    /// Returns `true` when either operand is complex.
    #[must_use]
    pub const fn has_complex(&self, other: &Self) -> bool {
        self.is_complex() || other.is_complex()
    }

    /// Views the value as a `(numerator, denominator)` pair when it is
    /// exactly rational (`Int` or `Fraction`).
    #[must_use]
    pub fn rational(&self) -> Option<(i64, i64)> {
        match self.numval() {
            NumVal::Int(n) => Some((n, 1)),
            NumVal::Fraction(n, d) if d != 0 => Some((n, d)),
            _ => None,
        }
    }

    /// Views the value as a `(real, imaginary)` pair.
    #[must_use]
    pub fn as_complex(&self) -> (f64, f64) {
        match self.numval() {
            NumVal::Complex(real, imaginary) => (real, imaginary),
            _ => (self.raw(), 0.0),
        }
    }

    /// Addition. Fractions stay exact; mixed kinds promote through the
    /// lattice; complex numbers add componentwise.
    #[must_use]
    pub fn add(&self, x: &Self) -> Self {
        if self.has_complex(x) {
            let (r1, i1) = self.as_complex();
            let (r2, i2) = x.as_complex();
            return Self::complex(r1 + r2, i1 + i2);
        }
        if self.has_fraction(x) {
            if let (Some((n1, d1)), Some((n2, d2))) = (self.rational(), x.rational()) {
                let (n1, d1, n2, d2) =
                    (i128::from(n1), i128::from(d1), i128::from(n2), i128::from(d2));
                return simplify_wide(n1 * d2 + n2 * d1, d1 * d2);
            }
        }
        Self::classify(self.raw() + x.raw())
    }

    /// Subtraction, under the same promotion rules as [`Num::add`].
    #[must_use]
    pub fn minus(&self, x: &Self) -> Self {
        if self.has_complex(x) {
            let (r1, i1) = self.as_complex();
            let (r2, i2) = x.as_complex();
            return Self::complex(r1 - r2, i1 - i2);
        }
        if self.has_fraction(x) {
            if let (Some((n1, d1)), Some((n2, d2))) = (self.rational(), x.rational()) {
                let (n1, d1, n2, d2) =
                    (i128::from(n1), i128::from(d1), i128::from(n2), i128::from(d2));
                return simplify_wide(n1 * d2 - n2 * d1, d1 * d2);
            }
        }
        Self::classify(self.raw() - x.raw())
    }

    /// Multiplication, under the same promotion rules as [`Num::add`].
    #[must_use]
    pub fn times(&self, x: &Self) -> Self {
        if self.has_complex(x) {
            let (a, b) = self.as_complex();
            let (c, d) = x.as_complex();
            return Self::complex(a * c - b * d, a * d + b * c);
        }
        if self.has_fraction(x) {
            if let (Some((n1, d1)), Some((n2, d2))) = (self.rational(), x.rational()) {
                return simplify_wide(i128::from(n1) * i128::from(n2),
                                     i128::from(d1) * i128::from(d2));
            }
        }
        Self::classify(self.raw() * x.raw())
    }

    /// Division. Fractions invert and multiply exactly; division by zero
    /// follows float semantics (`Inf`/`NaN`), never an error.
    #[must_use]
    pub fn divide(&self, x: &Self) -> Self {
        if self.has_complex(x) {
            let (a, b) = self.as_complex();
            let (c, d) = x.as_complex();
            let denom = c * c + d * d;
            return Self::complex((a * c + b * d) / denom, (b * c - a * d) / denom);
        }
        if self.has_fraction(x) {
            if let (Some((n1, d1)), Some((n2, d2))) = (self.rational(), x.rational()) {
                return simplify_wide(i128::from(n1) * i128::from(d2),
                                     i128::from(d1) * i128::from(n2));
            }
        }
        Self::classify(self.raw() / x.raw())
    }

    /// Exponentiation.
    ///
    /// A fraction base raised to an integer power is computed exactly. Any
    /// other fraction involvement is a deliberate capability gap surfaced as
    /// a typed error rather than a silent approximation.
    ///
    /// # Errors
    /// Returns [`EvalError::FractionalExponent`] when a fraction meets a
    /// non-integer exponent (or appears as the exponent itself).
    pub fn pow(&self, x: &Self) -> Result<Self, EvalError> {
        if self.is_fraction() && x.kind == NumKind::Int {
            if let (Some((n, d)), NumVal::Int(e)) = (self.rational(), x.numval()) {
                return Ok(pow_fraction(n, d, e));
            }
        }
        if self.has_fraction(x) {
            return Err(EvalError::FractionalExponent { base:     self.value.clone(),
                                                       exponent: x.value.clone(), });
        }
        Ok(Self::classify(self.raw().powf(x.raw())))
    }

    /// The nth root of `self`, with `x` as the degree.
    ///
    /// # Errors
    /// Returns [`EvalError::FractionNthRoot`] when both operands are
    /// fractions; there is no exact answer to give.
    pub fn nth_root(&self, x: &Self) -> Result<Self, EvalError> {
        if self.is_fraction() && x.is_fraction() {
            return Err(EvalError::FractionNthRoot { radicand: self.value.clone(),
                                                    degree:   x.value.clone(), });
        }
        Ok(Self::classify(self.raw().powf(x.raw().recip())))
    }

    /// Floor-modulo over the integer parts of the operands.
    #[must_use]
    pub fn modulo(&self, x: &Self) -> Self {
        let (a, b) = (self.int_part(), x.int_part());
        if b == 0 {
            return Self::from_f64(f64::NAN);
        }
        Self::from_i64(((a % b) + b) % b)
    }

    /// Remainder over the integer parts of the operands.
    #[must_use]
    pub fn rem(&self, x: &Self) -> Self {
        let (a, b) = (self.int_part(), x.int_part());
        if b == 0 {
            return Self::from_f64(f64::NAN);
        }
        Self::from_i64(a % b)
    }

    /// Floored integer division over the integer parts of the operands.
    #[must_use]
    pub fn int_div(&self, x: &Self) -> Self {
        let (a, b) = (self.int_part(), x.int_part());
        if b == 0 {
            return Self::from_f64(f64::NAN);
        }
        Self::from_i64(a.div_euclid(b))
    }

    /// The integer part used by `mod`/`rem`/`div`: floats floor first.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    fn int_part(&self) -> i64 {
        match self.numval() {
            NumVal::Int(n) => n,
            _ => {
                let floored = self.raw().floor();
                if floored.is_finite() {
                    floored as i64
                } else {
                    0
                }
            },
        }
    }

    /// Exact comparison where possible, floating-point otherwise.
    fn compare(&self, x: &Self) -> Option<std::cmp::Ordering> {
        if let (Some((n1, d1)), Some((n2, d2))) = (self.rational(), x.rational()) {
            let lhs = i128::from(n1) * i128::from(d2.abs()) * i128::from(d1.signum());
            let rhs = i128::from(n2) * i128::from(d1.abs()) * i128::from(d2.signum());
            return Some(lhs.cmp(&rhs));
        }
        self.raw().partial_cmp(&x.raw())
    }

    /// `self < x`.
    #[must_use]
    pub fn lt(&self, x: &Self) -> bool {
        self.compare(x) == Some(std::cmp::Ordering::Less)
    }

    /// `self <= x`.
    #[must_use]
    pub fn lte(&self, x: &Self) -> bool {
        matches!(self.compare(x),
                 Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal))
    }

    /// `self > x`.
    #[must_use]
    pub fn gt(&self, x: &Self) -> bool {
        self.compare(x) == Some(std::cmp::Ordering::Greater)
    }

    /// `self >= x`.
    #[must_use]
    pub fn gte(&self, x: &Self) -> bool {
        matches!(self.compare(x),
                 Some(std::cmp::Ordering::Greater | std::cmp::Ordering::Equal))
    }

    /// Numeric equality: exact over rationals, componentwise over complex
    /// values, floating-point otherwise.
    #[must_use]
    pub fn equals(&self, x: &Self) -> bool {
        if self.has_complex(x) {
            return self.as_complex() == x.as_complex();
        }
        self.compare(x) == Some(std::cmp::Ordering::Equal)
    }

    /// Absolute value. Fractions stay exact; complex numbers collapse to
    /// their magnitude.
    #[must_use]
    pub fn abs(&self) -> Self {
        match self.numval() {
            NumVal::Int(n) => Self::from_i64(n.abs()),
            NumVal::Float(x) => Self::from_f64(x.abs()),
            NumVal::Fraction(n, d) => simplify(n.abs(), d.abs()),
            NumVal::Complex(real, imaginary) => Self::classify(real.hypot(imaginary)),
        }
    }

    /// Arithmetic negation.
    #[must_use]
    pub fn neg(&self) -> Self {
        match self.numval() {
            NumVal::Int(n) => Self::from_i64(-n),
            NumVal::Float(x) => Self::from_f64(-x),
            NumVal::Fraction(n, d) => simplify(-n, d),
            NumVal::Complex(real, imaginary) => Self::complex(-real, -imaginary),
        }
    }
}

impl std::fmt::Display for Num {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Splits a canonical complex string `"a + bi"` (or a bare `"bi"`) into its
/// real and imaginary parts.
fn complex_parts(text: &str) -> (f64, f64) {
    let parse = |s: &str| s.trim().parse::<f64>().unwrap_or(f64::NAN);
    match text.split_once(" + ") {
        Some((real, imaginary)) => {
            (parse(real), parse(imaginary.trim_end_matches('i')))
        },
        None => (0.0, parse(text.trim_end_matches('i'))),
    }
}

/// Raises the fraction `n/d` to the integer power `e`, exactly.
fn pow_fraction(n: i64, d: i64, e: i64) -> Num {
    let (base_n, base_d, exp) = if e < 0 { (d, n, e.unsigned_abs()) } else { (n, d, e.unsigned_abs()) };
    let exp = u32::try_from(exp).unwrap_or(u32::MAX);
    match (i128::from(base_n).checked_pow(exp), i128::from(base_d).checked_pow(exp)) {
        (Some(numer), Some(denom)) => simplify_wide(numer, denom),
        #[allow(clippy::cast_precision_loss)]
        _ => Num::classify((base_n as f64 / base_d as f64).powi(i32::try_from(e).unwrap_or(i32::MAX))),
    }
}

#[cfg(test)]
mod tests {
    use super::{simplify, Num, NumKind};

    #[test]
    fn simplify_normalizes_sign_and_terms() {
        assert_eq!(simplify(2, 4).value, "1/2");
        assert_eq!(simplify(2, -4).value, "-1/2");
        assert_eq!(simplify(-2, -4).value, "1/2");
        assert_eq!(simplify(0, 5).value, "0/1");
        assert_eq!(simplify(7, 1).value, "7/1");
    }

    #[test]
    fn fraction_arithmetic_is_exact() {
        let half = Num::fraction("1/2");
        let third = Num::fraction("1/3");
        assert_eq!(half.add(&third).value, "5/6");
        assert_eq!(half.minus(&third).value, "1/6");
        assert_eq!(half.times(&third).value, "1/6");
        assert_eq!(half.divide(&third).value, "3/2");
    }

    #[test]
    fn promotion_lattice() {
        // fraction (x) int -> fraction
        let half = Num::fraction("1/2");
        let two = Num::from_i64(2);
        assert_eq!(half.times(&two).kind, NumKind::Fraction);
        assert_eq!(half.times(&two).value, "1/1");
        // fraction (x) float -> float
        let tenth = Num::float("0.1");
        assert_eq!(half.add(&tenth).kind, NumKind::Float);
        // int (x) int staying whole -> int
        let result = two.times(&two);
        assert_eq!(result.kind, NumKind::Int);
        assert_eq!(result.value, "4");
        // int division falling between integers -> float
        assert_eq!(Num::from_i64(1).divide(&two).kind, NumKind::Float);
    }

    #[test]
    fn fractional_exponents_are_a_typed_gap() {
        let half = Num::fraction("1/2");
        let two = Num::from_i64(2);
        assert_eq!(half.pow(&two).unwrap().value, "1/4");
        assert!(two.pow(&half).is_err());
        assert!(half.nth_root(&half).is_err());
        assert!(Num::from_i64(8).nth_root(&Num::from_i64(3)).is_ok());
    }

    #[test]
    fn negative_fraction_exponent_inverts() {
        let half = Num::fraction("1/2");
        assert_eq!(half.pow(&Num::from_i64(-2)).unwrap().value, "4/1");
    }

    #[test]
    fn complex_arithmetic() {
        let a = Num::complex(1.0, 2.0);
        let b = Num::complex(3.0, -2.0);
        assert_eq!(a.add(&b).value, "4");
        assert_eq!(a.times(&b).value, "7 + 4i");
        assert!(a.equals(&Num::complex(1.0, 2.0)));
    }

    #[test]
    fn comparisons_are_exact_over_rationals() {
        assert!(Num::fraction("1/3").lt(&Num::fraction("1/2")));
        assert!(Num::fraction("2/4").equals(&Num::fraction("1/2")));
        assert!(Num::from_i64(2).gte(&Num::fraction("4/2")));
    }

    #[test]
    fn division_by_zero_is_a_value() {
        let one = Num::from_i64(1);
        let zero = Num::from_i64(0);
        assert_eq!(one.divide(&zero).value, "Inf");
        assert_eq!(zero.divide(&zero).value, "NaN");
        assert_eq!(one.modulo(&zero).value, "NaN");
    }

    #[test]
    fn integer_ops() {
        let seven = Num::from_i64(7);
        let three = Num::from_i64(3);
        assert_eq!(seven.modulo(&three).value, "1");
        assert_eq!(Num::from_i64(-7).modulo(&three).value, "2");
        assert_eq!(Num::from_i64(-7).rem(&three).value, "-1");
        assert_eq!(seven.int_div(&three).value, "2");
    }
}
