use std::io::{self, IsTerminal, Stdin};

/// Returns true if stdin is redirected from a file or pipe.
#[allow(clippy::unnecessary_wraps)]
pub fn stdin_ready(stdin: &Stdin) -> io::Result<bool> {
    Ok(!stdin.is_terminal())
}
