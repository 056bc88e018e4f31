//! The interactive shell and the shared evaluate pipeline.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::colour::{paint, Colour};
use crate::interp::Interp;
use crate::lexer::scan;
use crate::parser::parse;

/// Lexes, parses and executes one chunk of input, printing everything to
/// stdout. Lexer and parser errors abort the chunk before anything runs;
/// execution errors are already rendered into the interpreter's buffer by
/// `walk_single`, statement by statement, so one bad statement does not
/// stop the ones after it.
pub fn evaluate(input: &str, interp: &mut Interp) {
    let tokens = match scan(input) {
        Ok(tokens) => tokens,
        Err(err) => {
            println!("{}", paint(Colour::Red, &err.to_string()));
            return;
        }
    };

    let stmts = match parse(&tokens) {
        Ok(stmts) => stmts,
        Err(errors) => {
            for err in errors {
                println!("{}", paint(Colour::Red, &err.to_string()));
            }
            return;
        }
    };

    for stmt in &stmts {
        interp.walk_single(stmt);
    }
    print!("{}", interp.take_output());
}

/// Runs the interactive loop until end of input. Statements may span
/// lines; input accumulates until a line ends with `;`.
pub fn repl(interp: &mut Interp) -> rustyline::Result<()> {
    println!("Binary Decision Diagram Engine");

    let mut editor = DefaultEditor::new()?;
    let mut input = String::new();
    loop {
        let prompt = if input.is_empty() {
            paint(Colour::Purple, ">> ")
        } else {
            String::new()
        };
        match editor.readline(&prompt) {
            Ok(line) => {
                if !input.is_empty() {
                    input.push(' ');
                }
                input.push_str(line.trim());
                if input.trim_end().ends_with(';') {
                    let _ = editor.add_history_entry(&input);
                    evaluate(&input, interp);
                    input.clear();
                }
            }
            Err(ReadlineError::Interrupted) => {
                input.clear();
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err),
        }
    }
    Ok(())
}
