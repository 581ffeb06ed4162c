//! MASML parser: converts source lines into a validated program.

use masml_ir::{Instruction, Opcode, Operand, Program, Register};
use masml_syntax::error::{error_at, Result};

use crate::vars::VarTable;

/// Whether an opcode needs, refuses, or tolerates a register token.
#[derive(Clone, Copy, PartialEq, Eq)]
enum RegisterRule {
    Required,
    Forbidden,
    Optional,
}

/// Shape of an opcode's operand slot.
#[derive(Clone, Copy, PartialEq, Eq)]
enum OperandRule {
    /// `&variable` reference, required.
    Address,
    /// `&variable` reference, may be omitted.
    AddressOptional,
    /// Numeric constant, required.
    Constant,
    /// Numeric constant, may be omitted (absent means "operate on A and B").
    ConstantOptional,
    Forbidden,
}

fn register_rule(opcode: Opcode) -> RegisterRule {
    match opcode {
        Opcode::Swap | Opcode::Goto | Opcode::Exit => RegisterRule::Forbidden,
        Opcode::Print => RegisterRule::Optional,
        _ => RegisterRule::Required,
    }
}

fn operand_rule(opcode: Opcode) -> OperandRule {
    match opcode {
        Opcode::Load | Opcode::Store => OperandRule::Address,
        Opcode::Print => OperandRule::AddressOptional,
        Opcode::SetRegister | Opcode::Goto | Opcode::GotoIf | Opcode::GotoIfNot => {
            OperandRule::Constant
        }
        Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div | Opcode::Mod | Opcode::Equal => {
            OperandRule::ConstantOptional
        }
        Opcode::Swap | Opcode::Not | Opcode::Exit => OperandRule::Forbidden,
    }
}

/// Line-oriented tokenizer and grammar validator.
///
/// Produces a [`Program`] whose every instruction matches its opcode's
/// register/operand grammar, so the VM never re-checks shape. The first
/// invalid line aborts the whole parse; no partial program is returned.
pub struct Parser {
    trace: bool,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self { trace: false }
    }

    /// Enables a one-line stdout trace per successfully parsed instruction.
    pub fn with_trace(trace: bool) -> Self {
        Self { trace }
    }

    /// Parses the whole source, building the variable table as it goes.
    ///
    /// Lines that are empty, whitespace only, or start with `#` are skipped
    /// and do not count as instructions. Errors carry the 1-based source
    /// line number.
    pub fn parse(&self, source: &str) -> Result<Program> {
        let mut vars = VarTable::new();
        let mut instructions = Vec::new();

        for (i, raw) in source.lines().enumerate() {
            let lineno = i + 1;
            if raw.starts_with('#') {
                continue;
            }
            let mut tokens = raw.split_whitespace();
            let Some(mnemonic) = tokens.next() else {
                // Whitespace-only line.
                continue;
            };
            let mut reg_tok = tokens.next();
            let mut arg_tok = tokens.next();
            if tokens.next().is_some() {
                return error_at(lineno, "too many tokens");
            }

            // A middle token without a leading dollarsign is really the
            // operand, so no register was given.
            if let Some(tok) = reg_tok {
                if !tok.starts_with('$') {
                    if arg_tok.is_some() {
                        return error_at(lineno, "too many tokens");
                    }
                    arg_tok = reg_tok.take();
                }
            }

            let Some(opcode) = Opcode::from_mnemonic(mnemonic) else {
                return error_at(lineno, format!("unknown instruction: {}", mnemonic));
            };

            let register = match reg_tok {
                None => Register::None,
                Some("$1") => Register::A,
                Some("$2") => Register::B,
                Some(other) => {
                    return error_at(lineno, format!("unknown register: {}", other));
                }
            };
            match register_rule(opcode) {
                RegisterRule::Required if register == Register::None => {
                    return error_at(lineno, format!("{} requires a register", mnemonic));
                }
                RegisterRule::Forbidden if register != Register::None => {
                    return error_at(lineno, format!("{} doesn't need a register", mnemonic));
                }
                _ => {}
            }

            let operand = parse_operand(opcode, mnemonic, arg_tok, &mut vars, lineno)?;
            if opcode == Opcode::Print
                && register == Register::None
                && operand == Operand::None
            {
                return error_at(lineno, "PRINT requires a register or an argument");
            }

            if self.trace {
                let reg_text = reg_tok.unwrap_or("-");
                let arg_text = arg_tok.unwrap_or("-");
                if let Operand::Address(addr) = operand {
                    println!(
                        "[LINE {:<3}] {:<13} {:<7} {} -> ram[{}]",
                        lineno, mnemonic, reg_text, arg_text, addr
                    );
                } else {
                    println!(
                        "[LINE {:<3}] {:<13} {:<7} {}",
                        lineno, mnemonic, reg_text, arg_text
                    );
                }
            }

            instructions.push(Instruction::new(opcode, register, operand));
        }

        Ok(Program::new(instructions))
    }
}

fn parse_operand(
    opcode: Opcode,
    mnemonic: &str,
    arg_tok: Option<&str>,
    vars: &mut VarTable,
    lineno: usize,
) -> Result<Operand> {
    let rule = operand_rule(opcode);
    let Some(tok) = arg_tok else {
        return match rule {
            OperandRule::Address | OperandRule::Constant => {
                error_at(lineno, format!("{} requires an argument", mnemonic))
            }
            _ => Ok(Operand::None),
        };
    };

    match rule {
        OperandRule::Forbidden => error_at(lineno, format!("{} doesn't need an argument", mnemonic)),
        OperandRule::Address | OperandRule::AddressOptional => {
            if let Some(name) = tok.strip_prefix('&') {
                match vars.resolve(name) {
                    Some(addr) => Ok(Operand::Address(addr)),
                    None => error_at(lineno, "too many variables"),
                }
            } else {
                error_at(
                    lineno,
                    format!("a constant is an unsupported argument for {}", mnemonic),
                )
            }
        }
        OperandRule::Constant | OperandRule::ConstantOptional => {
            if tok.starts_with('&') {
                error_at(
                    lineno,
                    format!("a variable is an unsupported argument for {}", mnemonic),
                )
            } else {
                Ok(Operand::Constant(parse_constant(tok, lineno)?))
            }
        }
    }
}

/// Parses a numeric literal.
///
/// Zero is only spelled `0` or `0.0`. Any other token that parses to 0.0
/// (`00`, `0e0`, `-0`) is rejected, as are non-finite values; this keeps
/// the accepted set identical to the original implementation, where a
/// zero parse was also the failure sentinel of the numeric parser.
fn parse_constant(tok: &str, lineno: usize) -> Result<f64> {
    if tok == "0" || tok == "0.0" {
        return Ok(0.0);
    }
    match tok.parse::<f64>() {
        Ok(v) if v.is_finite() && v != 0.0 => Ok(v),
        _ => error_at(lineno, "invalid numerical constant"),
    }
}
