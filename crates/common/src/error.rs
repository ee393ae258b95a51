//! Token-level parse errors for IR operands and operators.

use thiserror::Error;

/// Errors that occur while parsing a single operand or operator token.
///
/// These carry no position; the loader attaches the line number and raw
/// source text when it turns them into a load failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperandError {
    /// A variable reference with nothing after its prefix.
    #[error("empty variable name in '{0}'")]
    EmptyName(String),

    /// A bare number used where a variable name is expected.
    #[error("numeric variable name '{0}' (immediates need a '#' prefix)")]
    NumericName(String),

    /// `#` followed by something that is not a 32-bit decimal integer.
    #[error("invalid immediate '{0}'")]
    InvalidImmediate(String),

    /// Assignment destination starting with `&` or `#`.
    #[error("cannot assign to '{0}'")]
    InvalidDestination(String),

    /// Token is not one of the relational or arithmetic operators.
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_numeric_name() {
        assert_eq!(
            OperandError::NumericName("42".to_string()).to_string(),
            "numeric variable name '42' (immediates need a '#' prefix)"
        );
    }

    #[test]
    fn display_invalid_immediate() {
        assert_eq!(
            OperandError::InvalidImmediate("#x".to_string()).to_string(),
            "invalid immediate '#x'"
        );
    }

    #[test]
    fn display_invalid_destination() {
        assert_eq!(
            OperandError::InvalidDestination("&a".to_string()).to_string(),
            "cannot assign to '&a'"
        );
    }
}
