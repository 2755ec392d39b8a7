//! CLI command implementations.

pub mod chips;
pub mod generate;
pub mod init;
