use std::fs;
use std::process;

use owo_colors::OwoColorize;

use masml_parser::Parser;
use masml_syntax::error::Error;
use masml_vm::Vm;

const USAGE: &str = "\
Usage: masml [OPTIONS] <program>

An interpreter for MASML, a tiny register-based ASM-like toy language.

Arguments:
  <program>       path to the .masml source file

Options:
  --show-result   print register A's final value after execution
  --debug-parser  emit a per-line parse trace
  --debug-vm      emit a per-instruction execution trace
  --help          show this message and exit";

struct Options {
    program: String,
    show_result: bool,
    debug_parser: bool,
    debug_vm: bool,
}

fn parse_args(args: Vec<String>) -> Options {
    let mut program = None;
    let mut show_result = false;
    let mut debug_parser = false;
    let mut debug_vm = false;
    let mut positional_only = false;

    for arg in args {
        if !positional_only && arg == "--" {
            // Everything after a standalone double dash is positional.
            positional_only = true;
        } else if !positional_only && arg.starts_with("--") {
            match arg.as_str() {
                "--help" => {
                    println!("{}", USAGE);
                    process::exit(0);
                }
                "--show-result" => show_result = true,
                "--debug-parser" => debug_parser = true,
                "--debug-vm" => debug_vm = true,
                other => {
                    println!("{} unknown option: {}", "[FATAL]".red().bold(), other);
                    process::exit(2);
                }
            }
        } else if program.is_none() {
            program = Some(arg);
        } else {
            println!("{} unused argument: {}", "[WARNING]".yellow(), arg);
        }
    }

    let Some(program) = program else {
        println!(
            "{} please pass a .masml program file",
            "[FATAL]".red().bold()
        );
        println!("{}", USAGE);
        process::exit(2);
    };
    Options {
        program,
        show_result,
        debug_parser,
        debug_vm,
    }
}

fn render_fatal(source: &str, err: &Error) {
    match err.line {
        Some(line) => {
            println!("{} {} at line {}", "[FATAL]".red().bold(), err.msg, line);
            if let Some(raw) = source.lines().nth(line - 1) {
                println!("[LINE {}] {}", line, raw);
            }
        }
        None => println!("{} {}", "[FATAL]".red().bold(), err.msg),
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = parse_args(args);

    let source = match fs::read_to_string(&opts.program) {
        Ok(s) => s,
        Err(_) => {
            println!(
                "{} can't open file: {}",
                "[FATAL]".red().bold(),
                opts.program
            );
            process::exit(1);
        }
    };

    let parser = Parser::with_trace(opts.debug_parser);
    let program = match parser.parse(&source) {
        Ok(p) => p,
        Err(e) => {
            render_fatal(&source, &e);
            process::exit(1);
        }
    };

    let mut vm = Vm::with_trace(opts.debug_vm);
    let result = match vm.run(&program) {
        Ok(r) => r,
        Err(e) => {
            render_fatal(&source, &e);
            process::exit(1);
        }
    };

    if opts.show_result {
        println!("[RESULT] {:.6}", result);
    }
}
