pub mod ast;
pub mod interpreter;
pub mod lexer;
pub mod loader;
pub mod parser;

use std::error::Error;
use std::io::Write;

use interpreter::Interpreter;
use lexer::Lexer;
use parser::Parser;

/// Run a whole program against a fresh interpreter, writing `Print` output
/// to `output`. Shared by the CLI binary (stdout) and the test suite
/// (an in-memory buffer) so both exercise the exact same pipeline.
pub fn run_source(
    source: &str,
    filename: &str,
    output: &mut dyn Write,
) -> Result<(), Box<dyn Error>> {
    let tokens = Lexer::new(source, filename).tokenize()?;
    let program = Parser::new(tokens).parse_program()?;
    let mut interpreter = Interpreter::new(output);
    interpreter.interpret(&program)?;
    Ok(())
}
