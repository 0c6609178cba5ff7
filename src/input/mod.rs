//! Resolves the message argument into the text to publish.
//!
//! The literal `-` means standard input. Standard input is probed once
//! without waiting: if nothing is readable right away the message is empty,
//! so the tool never blocks on an interactive terminal.

mod platform;

use std::io::{self, Read};

use crate::config::defaults::STDIN_SENTINEL;

/// Returns the message for `arg`, reading standard input for `-`.
///
/// # Errors
///
/// Returns an I/O error if standard input cannot be probed or read.
pub fn read_message(arg: &str) -> io::Result<String> {
    if arg != STDIN_SENTINEL {
        return Ok(arg.to_string());
    }

    let stdin = io::stdin();
    let ready = platform::stdin_ready(&stdin)?;
    message_from(arg, ready, stdin.lock())
}

/// Resolves `arg` against an already-probed reader.
///
/// `ready` tells whether the reader had data waiting; a reader that was
/// not ready is never touched. Invalid UTF-8 is replaced rather than
/// rejected.
///
/// # Errors
///
/// Returns an I/O error if reading fails.
pub fn message_from<R: Read>(arg: &str, ready: bool, mut reader: R) -> io::Result<String> {
    if arg != STDIN_SENTINEL {
        return Ok(arg.to_string());
    }
    if !ready {
        tracing::debug!("Nothing waiting on standard input, sending an empty message");
        return Ok(String::new());
    }

    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
