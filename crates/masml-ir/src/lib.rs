//! Instruction model for MASML programs.
//!
//! This crate defines the register-based instruction set, the operand
//! representation, and the program container shared by the MASML parser
//! and VM.

pub mod instruction;
pub mod program;

pub use instruction::{Instruction, Opcode, Operand, Register};
pub use program::Program;

/// Number of `f64` cells in the VM's addressable memory.
///
/// Variable addresses are assigned by the parser and always fall in
/// `0..MEMORY_SIZE`.
pub const MEMORY_SIZE: usize = 1000;
