use thiserror::Error;

use crate::core::words::Difficulty;

/// Rejections for a single guess. None of them touch session state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("Please guess a letter.")]
    EmptyInput,
    #[error("Please guess only a letter.")]
    InvalidCharacters,
    #[error("Please guess 1 letter at a time.")]
    MultiCharacterInput,
    #[error("That letter has already been guessed. Try Again.")]
    DuplicateGuess(char),
    #[error("The round is not ready yet.")]
    RoundNotReady,
    #[error("The round is over. Start a new one.")]
    GameOver,
}

/// Why a provider could not hand out a word.
#[derive(Debug, Error)]
pub enum WordError {
    #[error("word service request failed")]
    Request(#[from] reqwest::Error),
    #[error("word service sent an unreadable body")]
    Decode(#[from] serde_json::Error),
    #[error("word service response had no word")]
    MissingWord,
    #[error("unusable word {0:?}")]
    InvalidWord(String),
    #[error("no words available for {0}")]
    EmptyWordList(Difficulty),
}

#[derive(Debug, Error)]
pub enum StartError {
    #[error("could not fetch a word")]
    WordFetchFailed(#[source] WordError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty {0:?} (expected easy, medium or hard)")]
pub struct ParseDifficultyError(pub String);
