pub mod parser;
pub mod vars;

pub use parser::Parser;
pub use vars::VarTable;

#[cfg(test)]
mod tests {
    use super::*;
    use masml_ir::{Opcode, Operand, Program, Register};
    use masml_syntax::error::Error;

    fn parse_str(input: &str) -> Program {
        Parser::new().parse(input).expect("Parsing should succeed")
    }

    fn parse_err(input: &str) -> Error {
        Parser::new()
            .parse(input)
            .expect_err("Parsing should fail")
    }

    #[test]
    fn test_basic_instructions() {
        let prog = parse_str("SET-REGISTER $1 5\nPRINT $1\nEXIT\n");
        assert_eq!(prog.len(), 3);
        let set = prog.get(0).unwrap();
        assert_eq!(set.opcode, Opcode::SetRegister);
        assert_eq!(set.register, Register::A);
        assert_eq!(set.operand, Operand::Constant(5.0));
        let print = prog.get(1).unwrap();
        assert_eq!(print.opcode, Opcode::Print);
        assert_eq!(print.register, Register::A);
        assert_eq!(print.operand, Operand::None);
        let exit = prog.get(2).unwrap();
        assert_eq!(exit.opcode, Opcode::Exit);
        assert_eq!(exit.register, Register::None);
        assert_eq!(exit.operand, Operand::None);
    }

    #[test]
    fn test_register_selection() {
        let prog = parse_str("SET-REGISTER $2 1.5\n");
        assert_eq!(prog.get(0).unwrap().register, Register::B);
        assert_eq!(prog.get(0).unwrap().operand, Operand::Constant(1.5));
    }

    #[test]
    fn test_short_aliases_map_to_same_opcodes() {
        let long = parse_str("SUBTRACT $1 1\nMULTIPLY $1 2\nDIVIDE $1 2\nMODULO $1 2\n");
        let short = parse_str("SUB $1 1\nMUL $1 2\nDIV $1 2\nMOD $1 2\n");
        assert_eq!(long.instructions(), short.instructions());
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let prog = parse_str("# a comment\n\n   \nEXIT\n# trailing comment\n");
        assert_eq!(prog.len(), 1);
        assert_eq!(prog.get(0).unwrap().opcode, Opcode::Exit);
    }

    #[test]
    fn test_middle_token_without_dollarsign_is_the_operand() {
        let prog = parse_str("GOTO 3\nADD $1 2\nADD $1\n");
        assert_eq!(prog.get(0).unwrap().register, Register::None);
        assert_eq!(prog.get(0).unwrap().operand, Operand::Constant(3.0));
        assert_eq!(prog.get(1).unwrap().operand, Operand::Constant(2.0));
        // Operand-absent arithmetic operates on both registers.
        assert_eq!(prog.get(2).unwrap().operand, Operand::None);
    }

    #[test]
    fn test_variables_get_addresses_in_first_seen_order() {
        let prog = parse_str(
            "SET-REGISTER $1 3\nSTORE $1 &x\nSTORE $1 &y\nLOAD $2 &x\nPRINT &y\n",
        );
        assert_eq!(prog.get(1).unwrap().operand, Operand::Address(0));
        assert_eq!(prog.get(2).unwrap().operand, Operand::Address(1));
        assert_eq!(prog.get(3).unwrap().operand, Operand::Address(0));
        assert_eq!(prog.get(4).unwrap().operand, Operand::Address(1));
    }

    #[test]
    fn test_parsing_is_deterministic() {
        let src = "SET-REGISTER $1 3\nSTORE $1 &a\nSTORE $1 &b\nLOAD $2 &a\nEXIT\n";
        let first = parse_str(src);
        let second = parse_str(src);
        assert_eq!(first.instructions(), second.instructions());
    }

    #[test]
    fn test_unknown_instruction_cites_the_line() {
        let err = parse_err("FOO $1 5\n");
        assert_eq!(err.msg, "unknown instruction: FOO");
        assert_eq!(err.line, Some(1));
    }

    #[test]
    fn test_error_line_numbers_skip_comments() {
        let err = parse_err("# header\nEXIT\nBAR\n");
        assert_eq!(err.msg, "unknown instruction: BAR");
        assert_eq!(err.line, Some(3));
    }

    #[test]
    fn test_unknown_register() {
        let err = parse_err("SET-REGISTER $3 5\n");
        assert_eq!(err.msg, "unknown register: $3");
    }

    #[test]
    fn test_register_requirements() {
        assert_eq!(parse_err("ADD 1\n").msg, "ADD requires a register");
        assert_eq!(parse_err("NOT\n").msg, "NOT requires a register");
        assert_eq!(parse_err("SWAP $1\n").msg, "SWAP doesn't need a register");
        assert_eq!(parse_err("GOTO $1 2\n").msg, "GOTO doesn't need a register");
        assert_eq!(parse_err("EXIT $2\n").msg, "EXIT doesn't need a register");
        // PRINT takes either form.
        parse_str("PRINT $1\nPRINT &x\nSET-REGISTER $1 1\nSTORE $1 &x\n");
    }

    #[test]
    fn test_operand_kind_mismatches() {
        assert_eq!(
            parse_err("LOAD $1 5\n").msg,
            "a constant is an unsupported argument for LOAD"
        );
        assert_eq!(
            parse_err("SET-REGISTER $1 &x\n").msg,
            "a variable is an unsupported argument for SET-REGISTER"
        );
        assert_eq!(
            parse_err("PRINT 5\n").msg,
            "a constant is an unsupported argument for PRINT"
        );
    }

    #[test]
    fn test_operand_presence() {
        assert_eq!(parse_err("LOAD $1\n").msg, "LOAD requires an argument");
        assert_eq!(parse_err("LOAD $1 &x\nLOAD $2\n").line, Some(2));
    }

    #[test]
    fn test_stray_operands_are_rejected() {
        assert_eq!(parse_err("SWAP 5\n").msg, "SWAP doesn't need an argument");
        assert_eq!(parse_err("NOT $1 5\n").msg, "NOT doesn't need an argument");
        assert_eq!(parse_err("EXIT 1\n").msg, "EXIT doesn't need an argument");
    }

    #[test]
    fn test_missing_operands_are_rejected() {
        assert_eq!(parse_err("SET-REGISTER $1\n").msg, "SET-REGISTER requires an argument");
        assert_eq!(parse_err("GOTO\n").msg, "GOTO requires an argument");
        assert_eq!(parse_err("STORE $1\n").msg, "STORE requires an argument");
        assert_eq!(parse_err("PRINT\n").msg, "PRINT requires a register or an argument");
    }

    #[test]
    fn test_too_many_tokens() {
        assert_eq!(parse_err("ADD $1 2 3\n").msg, "too many tokens");
        assert_eq!(parse_err("GOTO 1 2\n").msg, "too many tokens");
    }

    #[test]
    fn test_zero_literal_quirk() {
        // Only the spellings "0" and "0.0" denote zero.
        parse_str("SET-REGISTER $1 0\nSET-REGISTER $2 0.0\nGOTO 0\n");
        for bad in ["00", "0e0", "-0", "0x0", ".0", "0.00"] {
            let err = parse_err(&format!("SET-REGISTER $1 {}\n", bad));
            assert_eq!(err.msg, "invalid numerical constant", "literal {:?}", bad);
        }
    }

    #[test]
    fn test_malformed_and_nonfinite_literals() {
        for bad in ["abc", "1.2.3", "inf", "NaN"] {
            let err = parse_err(&format!("SET-REGISTER $1 {}\n", bad));
            assert_eq!(err.msg, "invalid numerical constant", "literal {:?}", bad);
        }
        // Negative and fractional constants are fine.
        let prog = parse_str("SET-REGISTER $1 -3.5\n");
        assert_eq!(prog.get(0).unwrap().operand, Operand::Constant(-3.5));
    }

    #[test]
    fn test_too_many_variables_is_a_parse_error() {
        use masml_ir::MEMORY_SIZE;
        let mut src = String::from("SET-REGISTER $1 1\n");
        for i in 0..=MEMORY_SIZE {
            src.push_str(&format!("STORE $1 &v{}\n", i));
        }
        let err = parse_err(&src);
        assert_eq!(err.msg, "too many variables");
        // The allocation that would spill past the last memory cell fails.
        assert_eq!(err.line, Some(MEMORY_SIZE + 2));
    }

    #[test]
    fn test_indented_comment_is_not_a_comment() {
        // Only lines *starting* with '#' are skipped; an indented '#'
        // tokenizes as a mnemonic.
        let err = parse_err("  # oops\n");
        assert_eq!(err.msg, "unknown instruction: #");
        // With more trailing tokens the count check fires first.
        let err = parse_err("  # not a comment\n");
        assert_eq!(err.msg, "too many tokens");
    }
}
