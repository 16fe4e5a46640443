//! Line-protocol driver for a bookshelf cache.
//!
//! Reads a header line (`<capacity> <op-count>`) followed by commands from
//! stdin and writes ACCESS results to stdout:
//!
//! ```text
//! $ cargo run --bin shelf_repl <<'EOF'
//! 2 5
//! ADD 1 10
//! ADD 2 20
//! ACCESS 1
//! ADD 3 30
//! ACCESS 2
//! EOF
//! 10
//! -1
//! ```

use std::error::Error;
use std::io::{self, BufRead, Write};

use shelfkit::builder::ShelfBuilder;
use shelfkit::protocol::{apply, Command, Header};

fn main() -> Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    let mut lines = stdin.lock().lines();

    let header: Header = match next_payload_line(&mut lines)? {
        Some(line) => line.parse()?,
        None => return Ok(()), // empty input, nothing to do
    };

    let mut shelf = ShelfBuilder::new(header.capacity).try_build()?;

    let mut executed = 0;
    while executed < header.op_count {
        let line = match next_payload_line(&mut lines)? {
            Some(line) => line,
            None => break, // input ended before op_count commands
        };
        let command: Command = line.parse()?;
        if let Some(reply) = apply(&mut shelf, command) {
            writeln!(output, "{}", reply)?;
        }
        executed += 1;
    }

    Ok(())
}

/// Returns the next non-blank input line, or `None` at end of input.
fn next_payload_line(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> io::Result<Option<String>> {
    for line in lines {
        let line = line?;
        if !line.trim().is_empty() {
            return Ok(Some(line));
        }
    }
    Ok(None)
}
