//! MASML VM core.

use masml_ir::{Instruction, Opcode, Operand, Program, Register, MEMORY_SIZE};
use masml_syntax::error::{error, Result};

/// Execution engine for MASML programs.
///
/// Holds two scalar registers and a fixed-size memory, both reset to zero
/// at the start of every run. One `Vm` owns its state exclusively; nothing
/// survives across runs.
pub struct Vm {
    reg_a: f64,
    reg_b: f64,
    memory: Vec<f64>,
    trace: bool,
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}

impl Vm {
    pub fn new() -> Self {
        Self::with_trace(false)
    }

    /// Enables a per-instruction stdout trace during execution.
    pub fn with_trace(trace: bool) -> Self {
        Self {
            reg_a: 0.0,
            reg_b: 0.0,
            memory: vec![0.0; MEMORY_SIZE],
            trace,
        }
    }

    /// Current register values, `(A, B)`.
    pub fn registers(&self) -> (f64, f64) {
        (self.reg_a, self.reg_b)
    }

    pub fn memory(&self) -> &[f64] {
        &self.memory
    }

    /// Runs `program` to termination and returns register A's final value.
    ///
    /// The program counter starts at instruction 0 and advances by one
    /// unless a taken jump reassigns it. Termination happens at EXIT or by
    /// running off the end of the sequence; both return register A.
    pub fn run(&mut self, program: &Program) -> Result<f64> {
        self.reg_a = 0.0;
        self.reg_b = 0.0;
        self.memory.fill(0.0);

        let mut pc = 0usize;
        while let Some(instr) = program.get(pc) {
            if self.trace {
                println!(
                    "[DEBUG] executing {} (index {}) using register {} with argument {}",
                    instr.opcode, pc, instr.register, instr.operand
                );
                println!(
                    "[DEBUG]   registerA: {:.6}, registerB: {:.6}",
                    self.reg_a, self.reg_b
                );
            }
            // default pc increment; taken jumps override
            let mut next = pc + 1;
            match instr.opcode {
                Opcode::Load => {
                    let addr = address_of(instr)?;
                    self.set_reg(instr.register, self.memory[addr])?;
                }
                Opcode::Store => {
                    let addr = address_of(instr)?;
                    self.memory[addr] = self.reg(instr.register)?;
                }
                Opcode::SetRegister => {
                    let c = constant_of(instr)?;
                    self.set_reg(instr.register, c)?;
                }
                Opcode::Swap => std::mem::swap(&mut self.reg_a, &mut self.reg_b),
                Opcode::Add => self.arith(instr, |a, b| a + b)?,
                Opcode::Sub => self.arith(instr, |a, b| a - b)?,
                Opcode::Mul => self.arith(instr, |a, b| a * b)?,
                // Division and modulo by zero propagate IEEE inf/NaN.
                Opcode::Div => self.arith(instr, |a, b| a / b)?,
                Opcode::Mod => self.arith(instr, |a, b| a % b)?,
                Opcode::Equal => self.arith(instr, |a, b| if a == b { 1.0 } else { 0.0 })?,
                Opcode::Not => {
                    let v = self.reg(instr.register)?;
                    self.set_reg(instr.register, if v == 0.0 { 1.0 } else { 0.0 })?;
                }
                Opcode::Goto => next = jump_target(instr, program)?,
                Opcode::GotoIf => {
                    if self.reg(instr.register)? != 0.0 {
                        next = jump_target(instr, program)?;
                    }
                }
                Opcode::GotoIfNot => {
                    if self.reg(instr.register)? == 0.0 {
                        next = jump_target(instr, program)?;
                    }
                }
                Opcode::Exit => return Ok(self.reg_a),
                Opcode::Print => {
                    let value = match instr.operand {
                        Operand::Address(addr) => self.memory[addr],
                        _ => self.reg(instr.register)?,
                    };
                    println!("[OUTPUT] {:.6}", value);
                }
            }
            pc = next;
        }
        // Sequence exhausted without EXIT: fallthrough termination.
        Ok(self.reg_a)
    }

    fn reg(&self, r: Register) -> Result<f64> {
        match r {
            Register::A => Ok(self.reg_a),
            Register::B => Ok(self.reg_b),
            Register::None => error("instruction is missing its register"),
        }
    }

    fn set_reg(&mut self, r: Register, value: f64) -> Result<()> {
        match r {
            Register::A => self.reg_a = value,
            Register::B => self.reg_b = value,
            Register::None => return error("instruction is missing its register"),
        }
        Ok(())
    }

    // Operand present: r <- r OP c. Absent: r <- A OP B. Both forms write
    // the declared target register.
    fn arith(&mut self, instr: &Instruction, op: impl Fn(f64, f64) -> f64) -> Result<()> {
        let (lhs, rhs) = match instr.operand {
            Operand::Constant(c) => (self.reg(instr.register)?, c),
            Operand::None => (self.reg_a, self.reg_b),
            Operand::Address(_) => {
                return error(format!("{} can't take an address operand", instr.opcode))
            }
        };
        self.set_reg(instr.register, op(lhs, rhs))
    }
}

fn address_of(instr: &Instruction) -> Result<usize> {
    match instr.operand {
        Operand::Address(addr) if addr < MEMORY_SIZE => Ok(addr),
        _ => error(format!("{} is missing its address operand", instr.opcode)),
    }
}

fn constant_of(instr: &Instruction) -> Result<f64> {
    match instr.operand {
        Operand::Constant(c) => Ok(c),
        _ => error(format!("{} is missing its constant operand", instr.opcode)),
    }
}

/// Converts a GOTO-family constant into an instruction index.
///
/// An out-of-range target is an internal-consistency fault: the parser
/// never emits one from a well-formed program. It surfaces as a fatal
/// error and is never clamped or wrapped.
fn jump_target(instr: &Instruction, program: &Program) -> Result<usize> {
    let c = constant_of(instr)?;
    let target = c as usize;
    if c < 0.0 || !c.is_finite() || c.fract() != 0.0 || target >= program.len() {
        return error(format!(
            "jump target {} is out of range (program has {} instructions)",
            c,
            program.len()
        ));
    }
    Ok(target)
}
