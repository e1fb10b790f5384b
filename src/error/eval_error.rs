#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents the capability gaps of the numeric tower.
///
/// These are the only failures evaluation surfaces as an `Err`: operations
/// the engine deliberately does not implement, where a silent floating-point
/// approximation would be wrong. Ordinary domain errors (division by zero,
/// negative square roots) produce `NaN` values instead, and user-input
/// mistakes evaluate to error nodes carried in the result tree.
pub enum EvalError {
    /// Exponentiation where either side is an exact fraction (other than a
    /// fraction base raised to an integer power, which is exact).
    FractionalExponent {
        /// Textual form of the base.
        base:     String,
        /// Textual form of the exponent.
        exponent: String,
    },
    /// An nth root taken between two exact fractions.
    FractionNthRoot {
        /// Textual form of the radicand.
        radicand: String,
        /// Textual form of the root degree.
        degree:   String,
    },
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FractionalExponent { base, exponent } => {
                write!(f, "Unsupported operation: {base} ^ {exponent} (fractional exponent).")
            },

            Self::FractionNthRoot { radicand, degree } => {
                write!(f,
                       "Unsupported operation: nthroot({radicand}, {degree}) between fractions.")
            },
        }
    }
}

impl std::error::Error for EvalError {}
