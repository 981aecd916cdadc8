//! Hangman terminal front end
pub mod game;
pub mod renderer;

pub use game::{AppCommand, HangmanApp, Status};
pub use renderer::AsciiCanvas;
