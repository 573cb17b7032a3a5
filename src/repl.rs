use std::io::{BufRead, Write};

use log::{debug, warn};

use crate::error::{LispError, LispResult};
use crate::eval::Machine;
use crate::printer;
use crate::reader::{Reader, Token};

/// How the loop talks to its user.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplOptions {
    /// Print `>>> ` before each read and `--> ` before each result.
    pub interactive: bool,
}

/// Read-eval-print over `input` until it is exhausted or the next token is
/// the symbol `quit`.
///
/// Evaluation and read errors are printed and the loop continues; after a
/// read error inside an expression the rest of the line is dropped. Only
/// I/O failures end the loop with an error.
pub fn run<R: BufRead, W: Write>(
    machine: &mut Machine,
    input: R,
    output: &mut W,
    options: ReplOptions,
) -> LispResult<()> {
    let mut reader = Reader::new(input);

    loop {
        if options.interactive {
            write!(output, ">>> ")?;
            output.flush()?;
        }

        let peeked = reader.peek_token().map(|tok| match tok {
            None => true,
            Some(Token::Symbol(name)) => name == "quit",
            Some(_) => false,
        });
        let stop = match peeked {
            Ok(stop) => stop,
            Err(LispError::Io(msg)) => return Err(LispError::Io(msg)),
            Err(e) => {
                report(&mut reader, output, &e)?;
                continue;
            }
        };
        if stop {
            debug!("repl done at line {}", reader.line_no());
            break;
        }

        let result = reader
            .read(&mut machine.heap, &mut machine.symbols)
            .and_then(|expr| match expr {
                Some(expr) => machine.evaluate(expr),
                None => Err(LispError::UnexpectedEndOfInput),
            });

        match result {
            Ok(val) => {
                if options.interactive {
                    write!(output, "--> ")?;
                }
                printer::write_val(val, &machine.heap, &machine.symbols, &machine.builtins, output)?;
                writeln!(output)?;
            }
            Err(LispError::Io(msg)) => return Err(LispError::Io(msg)),
            Err(e) => report(&mut reader, output, &e)?,
        }
    }

    if options.interactive {
        writeln!(output)?;
    }
    output.flush()?;
    Ok(())
}

fn report<R: BufRead, W: Write>(reader: &mut Reader<R>, output: &mut W, e: &LispError) -> LispResult<()> {
    warn!("line {}: {}", reader.line_no(), e);
    writeln!(output, "error: {}", e)?;
    // A stray token has already been consumed and the reader stands at the
    // next token. Other read errors leave it mid-expression.
    if e.is_read_error() && !matches!(e, LispError::UnexpectedToken(_)) {
        reader.discard_line();
    }
    Ok(())
}
