//! Foundation types for UniConsole.
//!
//! This crate holds the types shared by the command core and its hosts:
//! the error enum, the console configuration, theme colors and the
//! severity tag attached to every line of output.

pub mod color;
pub mod config;
pub mod error;
pub mod severity;
