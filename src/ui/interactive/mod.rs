//! Interactive terminal front-end
//!
//! - `terminal_manager`: raw mode and alternate screen handling
//! - `input_handler`: key events to screen actions
//! - `core`: main loop tying cache state, view state and rendering together

mod core;
mod input_handler;
mod terminal_manager;

pub use core::run_interactive_ui;
