//! Operand and destination addressing modes.
//!
//! ```text
//! #N     immediate signed 32-bit integer
//! &name  address (byte offset) of name
//! *name  word stored at the address held in name
//! name   word stored at name's address
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::OperandError;

/// A source operand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    /// `#N`
    Imm(i32),
    /// `name`
    Var(String),
    /// `&name`
    AddrOf(String),
    /// `*name`
    Deref(String),
}

impl Operand {
    /// The variable this operand refers to, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Operand::Imm(_) => None,
            Operand::Var(name) | Operand::AddrOf(name) | Operand::Deref(name) => Some(name),
        }
    }
}

/// An assignment target. `&name` and `#N` are not assignable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Dest {
    /// `name`: store into name's slot.
    Var(String),
    /// `*name`: store into the address held in name.
    Deref(String),
}

impl Dest {
    /// The variable this destination refers to.
    pub fn name(&self) -> &str {
        match self {
            Dest::Var(name) | Dest::Deref(name) => name,
        }
    }
}

/// Validate a variable name: non-empty and not made only of digits.
pub fn check_name(name: &str, token: &str) -> Result<String, OperandError> {
    if name.is_empty() {
        return Err(OperandError::EmptyName(token.to_string()));
    }
    if name.bytes().all(|b| b.is_ascii_digit()) {
        return Err(OperandError::NumericName(token.to_string()));
    }
    Ok(name.to_string())
}

impl FromStr for Operand {
    type Err = OperandError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if let Some(digits) = token.strip_prefix('#') {
            digits
                .parse::<i32>()
                .map(Operand::Imm)
                .map_err(|_| OperandError::InvalidImmediate(token.to_string()))
        } else if let Some(name) = token.strip_prefix('&') {
            check_name(name, token).map(Operand::AddrOf)
        } else if let Some(name) = token.strip_prefix('*') {
            check_name(name, token).map(Operand::Deref)
        } else {
            check_name(token, token).map(Operand::Var)
        }
    }
}

impl FromStr for Dest {
    type Err = OperandError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if token.starts_with('&') || token.starts_with('#') {
            return Err(OperandError::InvalidDestination(token.to_string()));
        }
        match token.strip_prefix('*') {
            Some(name) => check_name(name, token).map(Dest::Deref),
            None => check_name(token, token).map(Dest::Var),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Imm(n) => write!(f, "#{n}"),
            Operand::Var(name) => f.write_str(name),
            Operand::AddrOf(name) => write!(f, "&{name}"),
            Operand::Deref(name) => write!(f, "*{name}"),
        }
    }
}

impl fmt::Display for Dest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dest::Var(name) => f.write_str(name),
            Dest::Deref(name) => write!(f, "*{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_each_mode() {
        assert_eq!("#-7".parse(), Ok(Operand::Imm(-7)));
        assert_eq!("x".parse(), Ok(Operand::Var("x".to_string())));
        assert_eq!("&arr".parse(), Ok(Operand::AddrOf("arr".to_string())));
        assert_eq!("*p".parse(), Ok(Operand::Deref("p".to_string())));
    }

    #[test]
    fn immediate_must_be_i32() {
        assert_eq!(
            "#abc".parse::<Operand>(),
            Err(OperandError::InvalidImmediate("#abc".to_string()))
        );
        assert_eq!(
            "#4294967296".parse::<Operand>(),
            Err(OperandError::InvalidImmediate("#4294967296".to_string()))
        );
        assert!("#".parse::<Operand>().is_err());
    }

    #[test]
    fn bare_number_is_not_a_name() {
        assert_eq!(
            "12".parse::<Operand>(),
            Err(OperandError::NumericName("12".to_string()))
        );
        assert_eq!(
            "&12".parse::<Operand>(),
            Err(OperandError::NumericName("&12".to_string()))
        );
    }

    #[test]
    fn prefix_without_name() {
        assert_eq!(
            "*".parse::<Operand>(),
            Err(OperandError::EmptyName("*".to_string()))
        );
    }

    #[test]
    fn dest_rejects_address_and_immediate() {
        assert!(matches!(
            "&x".parse::<Dest>(),
            Err(OperandError::InvalidDestination(_))
        ));
        assert!(matches!(
            "#1".parse::<Dest>(),
            Err(OperandError::InvalidDestination(_))
        ));
        assert_eq!("*p".parse(), Ok(Dest::Deref("p".to_string())));
    }

    #[test]
    fn name_accessors() {
        assert_eq!(Operand::Imm(3).name(), None);
        assert_eq!(Operand::Deref("p".to_string()).name(), Some("p"));
        assert_eq!(Dest::Deref("p".to_string()).name(), "p");
    }

    #[test]
    fn display_matches_source_form() {
        assert_eq!(Operand::Imm(-1).to_string(), "#-1");
        assert_eq!(Operand::AddrOf("a".to_string()).to_string(), "&a");
        assert_eq!(Dest::Deref("p".to_string()).to_string(), "*p");
    }
}
