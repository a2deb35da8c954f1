//! Integration tests for the sn-release CLI
//!
//! These drive the compiled binary over tempdir fixtures; nothing here
//! touches a real toolchain or network destination.

mod helpers;
mod test_package;
mod test_publish;
mod test_tags;
