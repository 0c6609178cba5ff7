use std::io::{self, Stdin};
use std::os::fd::AsFd;

use nix::poll::{PollFd, PollFlags, PollTimeout, poll};

/// Returns true if reading stdin would not block.
///
/// End of input also counts as ready; reading then yields nothing.
pub fn stdin_ready(stdin: &Stdin) -> io::Result<bool> {
    let mut fds = [PollFd::new(stdin.as_fd(), PollFlags::POLLIN)];
    let ready = poll(&mut fds, PollTimeout::ZERO).map_err(io::Error::from)?;
    Ok(ready > 0)
}
