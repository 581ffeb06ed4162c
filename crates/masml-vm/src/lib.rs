//! MASML VM: executes parsed MASML programs.

pub mod vm;

pub use vm::Vm;
