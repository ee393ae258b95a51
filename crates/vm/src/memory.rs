//! Flat word-addressed memory.

use irsim_common::{MEMORY_WORDS, WORD_SIZE};
use thiserror::Error;

/// Access outside physical memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("illegal memory access at offset {offset}")]
pub struct MemoryFault {
    pub offset: i32,
}

/// 262144 signed words. Byte offset `o` names word `floor(o / 4)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    words: Vec<i32>,
}

impl Memory {
    pub fn new() -> Self {
        Self {
            words: vec![0; MEMORY_WORDS],
        }
    }

    /// Zero every word.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    fn index(offset: i32) -> Result<usize, MemoryFault> {
        usize::try_from(offset.div_euclid(WORD_SIZE))
            .ok()
            .filter(|&w| w < MEMORY_WORDS)
            .ok_or(MemoryFault { offset })
    }

    /// Read the word containing byte `offset`.
    pub fn load(&self, offset: i32) -> Result<i32, MemoryFault> {
        Ok(self.words[Self::index(offset)?])
    }

    /// Write the word containing byte `offset`.
    pub fn store(&mut self, offset: i32, value: i32) -> Result<(), MemoryFault> {
        let idx = Self::index(offset)?;
        self.words[idx] = value;
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
