//! Handles Command Line Interface (CLI) related functionalities.
//!
//! Includes defining commands, parsing arguments, handling user interaction
//! (prompts, menus), and holding the application state the commands run against.

mod commands;

pub use commands::*;
