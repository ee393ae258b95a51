//! Storage descriptors for IR variables.

use crate::WORD_SIZE;

/// Where a variable lives and how large it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol {
    /// Byte offset into memory, or [`Symbol::UNASSIGNED`].
    pub offset: i32,
    /// Size in bytes. Always a positive multiple of [`WORD_SIZE`].
    pub size: i32,
    /// Declared with `DEC`.
    pub is_array: bool,
}

impl Symbol {
    /// Offset of a variable whose function has not been called yet.
    pub const UNASSIGNED: i32 = -1;

    /// A one-word scalar at `offset`.
    pub fn scalar(offset: i32) -> Self {
        Self {
            offset,
            size: WORD_SIZE,
            is_array: false,
        }
    }

    /// A `DEC`-declared block of `size` bytes at `offset`.
    pub fn array(offset: i32, size: i32) -> Self {
        Self {
            offset,
            size,
            is_array: true,
        }
    }

    /// Same size and kind, placed at `offset`.
    pub fn placed_at(self, offset: i32) -> Self {
        Self { offset, ..self }
    }

    /// Whether a frame address has been assigned.
    pub fn is_assigned(&self) -> bool {
        self.offset != Self::UNASSIGNED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_is_one_word() {
        let s = Symbol::scalar(8);
        assert_eq!(s.size, 4);
        assert!(!s.is_array);
        assert!(s.is_assigned());
    }

    #[test]
    fn placed_at_keeps_shape() {
        let s = Symbol::array(Symbol::UNASSIGNED, 40);
        assert!(!s.is_assigned());
        let placed = s.placed_at(12);
        assert_eq!(placed, Symbol::array(12, 40));
    }
}
