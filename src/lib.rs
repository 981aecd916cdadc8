pub mod cli;
pub mod core;
pub mod games;

// Re-export for convenience
pub use crate::core::error::{GuessError, StartError, WordError};
pub use crate::core::game::{GameSession, GuessOutcome, RoundTicket, StartOutcome, MAX_WRONG_GUESSES};
pub use crate::core::renderer::{FigurePart, RenderSurface, FIGURE_PARTS};
pub use crate::core::words::{Difficulty, HttpWordProvider, WordList, WordProvider};
