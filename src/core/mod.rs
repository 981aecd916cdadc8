pub mod engine;
pub mod error;
pub mod game;
pub mod renderer;
pub mod words;
