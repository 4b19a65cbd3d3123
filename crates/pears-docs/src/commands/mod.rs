//! CLI subcommands.

pub mod check;
pub mod deploy;
pub mod export;
pub mod init;
pub mod serve;
