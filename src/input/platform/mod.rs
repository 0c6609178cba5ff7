//! Platform-specific standard input probes.
//!
//! # Platform Support
//!
//! - **Unix**: `poll(2)` with a zero timeout via the `nix` crate.
//! - **Other**: no readiness probe; stdin counts as ready when it is not a
//!   terminal.

#[cfg(unix)]
mod unix;

#[cfg(not(unix))]
mod other;

#[cfg(unix)]
pub use unix::stdin_ready;

#[cfg(not(unix))]
pub use other::stdin_ready;
