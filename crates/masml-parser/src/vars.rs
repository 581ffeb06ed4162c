//! Variable table: maps variable names to memory addresses.

use masml_ir::MEMORY_SIZE;

/// Assigns each distinct variable name the next unused memory address, in
/// order of first textual occurrence. Addresses are stable for the lifetime
/// of one parse; a fresh table is built for every parse.
#[derive(Debug, Default)]
pub struct VarTable {
    // Index in this vec is the variable's memory address. Linear scan is
    // plenty for toy programs and keeps first-seen ordering for free.
    names: Vec<String>,
}

impl VarTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Address already assigned to `name`, if any.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Resolves `name` to its address, allocating the next free cell on
    /// first use. Returns `None` once every memory cell has a variable.
    pub fn resolve(&mut self, name: &str) -> Option<usize> {
        if let Some(addr) = self.get(name) {
            return Some(addr);
        }
        if self.names.len() >= MEMORY_SIZE {
            return None;
        }
        self.names.push(name.to_string());
        Some(self.names.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
