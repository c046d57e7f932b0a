//! Command implementations

pub mod document;
pub mod init;
pub mod remote;
