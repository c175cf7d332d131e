//! Text with a rounded, highlighter-style background that follows line wrapping.

pub mod components;

pub mod config;

mod init;
pub use init::*;
