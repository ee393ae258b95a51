//! Post-validation checks that need the complete tables.
//!
//! Forward references make it impossible to check jump targets line by
//! line, so these run once every line has been validated.

use std::collections::HashMap;

use crate::error::LoadError;
use irsim_common::{Statement, ADDRESS_SPACE};

/// Confirm every `GOTO`, `IF … GOTO` and `CALL` target is a declared label.
///
/// Reports the first unresolved target in program order.
pub(crate) fn check_labels(
    statements: &[Statement],
    labels: &HashMap<String, usize>,
) -> Result<(), LoadError> {
    for stmt in statements {
        if let Some(target) = stmt.instruction.jump_target() {
            if !labels.contains_key(target) {
                return Err(LoadError::UndefinedLabel {
                    name: target.to_string(),
                    line: stmt.line,
                    text: stmt.text.trim().to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Confirm `main`'s static layout fits in the address space.
pub(crate) fn check_layout(static_size: i32) -> Result<(), LoadError> {
    if static_size > ADDRESS_SPACE {
        Err(LoadError::OffsetOverflow { size: static_size })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use irsim_common::{Dest, Instruction};

    fn stmt(instruction: Instruction, line: usize) -> Statement {
        let text = instruction.to_string();
        Statement {
            instruction,
            line,
            text,
        }
    }

    fn labels(names: &[&str]) -> HashMap<String, usize> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.to_string(), i))
            .collect()
    }

    #[test]
    fn all_targets_resolved() {
        let statements = vec![
            stmt(
                Instruction::Goto {
                    target: "l1".to_string(),
                },
                1,
            ),
            stmt(
                Instruction::Call {
                    dst: Dest::Var("r".to_string()),
                    function: "f".to_string(),
                },
                2,
            ),
        ];
        assert_eq!(check_labels(&statements, &labels(&["l1", "f"])), Ok(()));
    }

    #[test]
    fn first_unresolved_reported() {
        let statements = vec![
            stmt(
                Instruction::Goto {
                    target: "l1".to_string(),
                },
                3,
            ),
            stmt(
                Instruction::Call {
                    dst: Dest::Var("r".to_string()),
                    function: "missing".to_string(),
                },
                5,
            ),
            stmt(
                Instruction::Goto {
                    target: "also_missing".to_string(),
                },
                6,
            ),
        ];
        assert_eq!(
            check_labels(&statements, &labels(&["l1"])),
            Err(LoadError::UndefinedLabel {
                name: "missing".to_string(),
                line: 5,
                text: "r := CALL missing".to_string(),
            })
        );
    }

    #[test]
    fn layout_limit_is_inclusive() {
        assert_eq!(check_layout(ADDRESS_SPACE), Ok(()));
        assert_eq!(
            check_layout(ADDRESS_SPACE + 4),
            Err(LoadError::OffsetOverflow {
                size: ADDRESS_SPACE + 4
            })
        );
    }
}
