//! Program container for MASML.

use crate::instruction::Instruction;

/// An ordered sequence of instructions, addressable by zero-based index.
///
/// A `Program` is immutable once built by the parser; jump targets refer to
/// indices into this sequence, not source line numbers.
#[derive(Debug, Clone, Default)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instruction at `index`, or `None` past the end of the sequence.
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}
