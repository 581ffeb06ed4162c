//! Instruction set for MASML.

use std::fmt;

/// Operation performed by an instruction.
///
/// The set is closed; the parser rejects anything outside it. Each opcode
/// has a fixed grammar (register required/forbidden/optional, operand kind)
/// that the parser enforces, so the VM never re-validates shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    // Memory transfer
    Load,
    Store,

    // Register manipulation
    SetRegister,
    Swap,

    // Arithmetic (operand absent means "operate on A and B")
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Logic
    Equal,
    Not,

    // Control flow (absolute instruction index targets)
    Goto,
    GotoIf,
    GotoIfNot,
    Exit,

    // Diagnostics
    Print,
}

impl Opcode {
    /// Looks up an opcode by its source spelling.
    ///
    /// The canonical spellings are the hyphenated display forms
    /// (`SET-REGISTER`, `SUBTRACT`, `GOTO-IF-NOT`, ...); the short
    /// underscore forms (`SUB`, `GOTO_IF_NOT`, ...) are accepted as
    /// aliases. Matching is case-sensitive.
    pub fn from_mnemonic(name: &str) -> Option<Opcode> {
        Some(match name {
            "LOAD" => Opcode::Load,
            "STORE" => Opcode::Store,
            "SET-REGISTER" | "SET_REGISTER" => Opcode::SetRegister,
            "SWAP" => Opcode::Swap,
            "ADD" => Opcode::Add,
            "SUBTRACT" | "SUB" => Opcode::Sub,
            "MULTIPLY" | "MUL" => Opcode::Mul,
            "DIVIDE" | "DIV" => Opcode::Div,
            "MODULO" | "MOD" => Opcode::Mod,
            "EQUAL" => Opcode::Equal,
            "NOT" => Opcode::Not,
            "GOTO" => Opcode::Goto,
            "GOTO-IF" | "GOTO_IF" => Opcode::GotoIf,
            "GOTO-IF-NOT" | "GOTO_IF_NOT" => Opcode::GotoIfNot,
            "EXIT" => Opcode::Exit,
            "PRINT" => Opcode::Print,
            _ => return None,
        })
    }

    /// Canonical display spelling of the opcode.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Load => "LOAD",
            Opcode::Store => "STORE",
            Opcode::SetRegister => "SET-REGISTER",
            Opcode::Swap => "SWAP",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUBTRACT",
            Opcode::Mul => "MULTIPLY",
            Opcode::Div => "DIVIDE",
            Opcode::Mod => "MODULO",
            Opcode::Equal => "EQUAL",
            Opcode::Not => "NOT",
            Opcode::Goto => "GOTO",
            Opcode::GotoIf => "GOTO-IF",
            Opcode::GotoIfNot => "GOTO-IF-NOT",
            Opcode::Exit => "EXIT",
            Opcode::Print => "PRINT",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Which scalar register an instruction acts on.
///
/// `None` is only valid for opcodes whose grammar makes the register
/// optional or forbidden (SWAP, GOTO, EXIT, PRINT).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    None,
    A,
    B,
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Register::None => f.write_str("none"),
            Register::A => f.write_str("$1"),
            Register::B => f.write_str("$2"),
        }
    }
}

/// Optional third component of an instruction.
///
/// The kind is fixed by the opcode's grammar: LOAD/STORE/PRINT carry an
/// `Address` (resolved from a `&variable` reference), everything else a
/// `Constant`. Keeping the two as separate variants means the VM's dispatch
/// can never misread an address as a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    None,
    /// Memory cell index, always below [`crate::MEMORY_SIZE`].
    Address(usize),
    /// Numeric constant; doubles as the jump target for the GOTO family.
    Constant(f64),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::None => f.write_str("none"),
            Operand::Address(a) => write!(f, "ram[{}]", a),
            Operand::Constant(c) => write!(f, "{:.6}", c),
        }
    }
}

/// One fully validated instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub register: Register,
    pub operand: Operand,
}

impl Instruction {
    pub fn new(opcode: Opcode, register: Register, operand: Operand) -> Self {
        Self {
            opcode,
            register,
            operand,
        }
    }
}
