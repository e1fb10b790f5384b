use std::collections::HashMap;

use once_cell::sync::Lazy;

/// A native math function exposed by the builtin library.
///
/// Natives operate on plain `f64` values; the evaluator only dispatches to
/// them once every argument has reduced to a number, so a partially symbolic
/// call stays symbolic instead.
#[derive(Clone, Copy)]
pub enum NativeFn {
    /// A one-argument function such as `sin`.
    Unary(fn(f64) -> f64),
    /// A two-argument function such as `atan2`.
    Binary(fn(f64, f64) -> f64),
    /// A function folding any number of arguments, such as `max`.
    Fold(fn(&[f64]) -> f64),
}

impl NativeFn {
    /// The exact arity this native requires, or `None` for folds.
    #[must_use]
    pub const fn arity(&self) -> Option<usize> {
        match self {
            Self::Unary(_) => Some(1),
            Self::Binary(_) => Some(2),
            Self::Fold(_) => None,
        }
    }

    /// Applies the native to evaluated arguments. Returns `None` on an arity
    /// mismatch.
    #[must_use]
    pub fn apply(&self, args: &[f64]) -> Option<f64> {
        match self {
            Self::Unary(f) => match args {
                [x] => Some(f(*x)),
                _ => None,
            },
            Self::Binary(f) => match args {
                [x, y] => Some(f(*x, *y)),
                _ => None,
            },
            Self::Fold(f) => Some(f(args)),
        }
    }
}

/// The shared, read-only builtin library: named constants plus native math
/// functions. Every environment references the same instance.
pub struct Library {
    constants: HashMap<&'static str, f64>,
    functions: HashMap<&'static str, NativeFn>,
}

/// Sign function with the mathematical convention `sgn(0) = 0`.
fn sgn(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x.signum()
    }
}

/// Greatest common divisor over floats. Non-integer input has no GCD and
/// yields `Inf`, matching the engine's treat-domain-errors-as-values rule.
fn gcd_f(a: f64, b: f64) -> f64 {
    if a.fract() != 0.0 || b.fract() != 0.0 || !a.is_finite() || !b.is_finite() {
        return f64::INFINITY;
    }
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0.0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

fn sum(args: &[f64]) -> f64 {
    args.iter().sum()
}

fn avg(args: &[f64]) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let len = args.len() as f64;
    sum(args) / len
}

fn max(args: &[f64]) -> f64 {
    args.iter().copied().fold(f64::NAN, f64::max)
}

fn min(args: &[f64]) -> f64 {
    args.iter().copied().fold(f64::NAN, f64::min)
}

static LIBRARY: Lazy<Library> = Lazy::new(|| {
    let mut constants: HashMap<&'static str, f64> = HashMap::new();
    constants.insert("E", std::f64::consts::E);
    constants.insert("PI", std::f64::consts::PI);
    constants.insert("TAU", std::f64::consts::TAU);
    constants.insert("LN2", std::f64::consts::LN_2);
    constants.insert("LN10", std::f64::consts::LN_10);
    constants.insert("SQRT2", std::f64::consts::SQRT_2);

    let mut functions: HashMap<&'static str, NativeFn> = HashMap::new();
    functions.insert("abs", NativeFn::Unary(f64::abs));
    functions.insert("acos", NativeFn::Unary(f64::acos));
    functions.insert("acosh", NativeFn::Unary(f64::acosh));
    functions.insert("asin", NativeFn::Unary(f64::asin));
    functions.insert("asinh", NativeFn::Unary(f64::asinh));
    functions.insert("atan", NativeFn::Unary(f64::atan));
    functions.insert("atanh", NativeFn::Unary(f64::atanh));
    functions.insert("atan2", NativeFn::Binary(f64::atan2));
    functions.insert("cbrt", NativeFn::Unary(f64::cbrt));
    functions.insert("ceil", NativeFn::Unary(f64::ceil));
    functions.insert("cos", NativeFn::Unary(f64::cos));
    functions.insert("cosh", NativeFn::Unary(f64::cosh));
    functions.insert("exp", NativeFn::Unary(f64::exp));
    functions.insert("floor", NativeFn::Unary(f64::floor));
    functions.insert("gcd", NativeFn::Binary(gcd_f));
    functions.insert("hypot", NativeFn::Binary(f64::hypot));
    functions.insert("ln", NativeFn::Unary(f64::ln));
    functions.insert("log", NativeFn::Unary(f64::log10));
    functions.insert("lg", NativeFn::Unary(f64::log2));
    functions.insert("max", NativeFn::Fold(max));
    functions.insert("min", NativeFn::Fold(min));
    functions.insert("round", NativeFn::Unary(f64::round));
    functions.insert("sign", NativeFn::Unary(sgn));
    functions.insert("sin", NativeFn::Unary(f64::sin));
    functions.insert("sinh", NativeFn::Unary(f64::sinh));
    functions.insert("sqrt", NativeFn::Unary(f64::sqrt));
    functions.insert("tan", NativeFn::Unary(f64::tan));
    functions.insert("tanh", NativeFn::Unary(f64::tanh));
    functions.insert("trunc", NativeFn::Unary(f64::trunc));
    functions.insert("even", NativeFn::Unary(|x| if x % 2.0 == 0.0 { 1.0 } else { 0.0 }));
    functions.insert("odd", NativeFn::Unary(|x| if x % 2.0 == 0.0 { 0.0 } else { 1.0 }));
    functions.insert("sum", NativeFn::Fold(sum));
    functions.insert("avg", NativeFn::Fold(avg));
    // Generic float fallback; the evaluator intercepts the exact cases.
    functions.insert("nthroot", NativeFn::Binary(|a, b| a.powf(b.recip())));

    Library { constants, functions }
});

impl Library {
    /// Returns the shared library instance.
    #[must_use]
    pub fn shared() -> &'static Self {
        &LIBRARY
    }

    /// Looks a constant up by name.
    #[must_use]
    pub fn constant(&self, name: &str) -> Option<f64> {
        self.constants.get(name).copied()
    }

    /// Looks a native function up by name.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&NativeFn> {
        self.functions.get(name)
    }

    /// Returns `true` when `name` is a builtin function.
    #[must_use]
    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Returns `true` when `name` is a builtin constant.
    #[must_use]
    pub fn has_constant(&self, name: &str) -> bool {
        self.constants.contains_key(name)
    }

    /// Iterates over the builtin function names.
    pub fn function_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.functions.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{Library, NativeFn};

    #[test]
    fn lookup_and_apply() {
        let lib = Library::shared();
        assert!(lib.has_function("sin"));
        assert!(lib.has_constant("PI"));
        assert!(!lib.has_function("PI"));

        let sqrt = lib.function("sqrt").unwrap();
        assert_eq!(sqrt.apply(&[9.0]), Some(3.0));
        assert_eq!(sqrt.apply(&[9.0, 2.0]), None);
    }

    #[test]
    fn sign_of_zero_is_zero() {
        let sign = Library::shared().function("sign").unwrap();
        assert_eq!(sign.apply(&[0.0]), Some(0.0));
        assert_eq!(sign.apply(&[-3.0]), Some(-1.0));
    }

    #[test]
    fn folds_take_any_arity() {
        if let Some(NativeFn::Fold(_)) = Library::shared().function("max") {
        } else {
            panic!("max should be a fold");
        }
        assert_eq!(Library::shared().function("max").unwrap().apply(&[1.0, 5.0, 3.0]), Some(5.0));
    }

    #[test]
    fn gcd_rejects_non_integers() {
        let gcd = Library::shared().function("gcd").unwrap();
        assert_eq!(gcd.apply(&[12.0, 18.0]), Some(6.0));
        assert_eq!(gcd.apply(&[1.5, 3.0]), Some(f64::INFINITY));
    }
}
