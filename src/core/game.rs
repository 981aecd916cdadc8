/// Core hangman round: guess validation, win/loss and figure progression
use tracing::{debug, info, warn};

use crate::core::error::{GuessError, StartError, WordError};
use crate::core::renderer::{FigurePart, RenderSurface, FIGURE_PARTS};
use crate::core::words::{Difficulty, WordProvider};

/// Wrong guesses that end the round
pub const MAX_WRONG_GUESSES: usize = 6;

/// Identifies one `begin_start` call; only the newest one may commit a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Ready,
    /// A newer start was issued before this one resolved
    Stale,
}

/// Result of an accepted guess, carrying the normalized letter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Hit(char),
    Miss { letter: char, part: FigurePart },
    Won(char),
    Lost(char),
}

impl GuessOutcome {
    pub fn letter(&self) -> char {
        match *self {
            GuessOutcome::Hit(c) | GuessOutcome::Won(c) | GuessOutcome::Lost(c) => c,
            GuessOutcome::Miss { letter, .. } => letter,
        }
    }
}

/// Check the shape of raw input and return the lowercase letter
pub fn validate_letter(input: &str) -> Result<char, GuessError> {
    if input.is_empty() {
        return Err(GuessError::EmptyInput);
    }
    if !input.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(GuessError::InvalidCharacters);
    }
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c.to_ascii_lowercase()),
        _ => Err(GuessError::MultiCharacterInput),
    }
}

/// Trim and lowercase a provider word, refusing anything letter guesses can't complete
pub fn normalize_word(raw: &str) -> Result<String, WordError> {
    let word = raw.trim().to_ascii_lowercase();
    if word.is_empty() || !word.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(WordError::InvalidWord(raw.to_string()));
    }
    Ok(word)
}

pub struct GameSession<S: RenderSurface> {
    surface: S,
    word: String,
    guesses: Vec<char>,
    wrong_guess_count: usize,
    is_over: bool,
    did_win: bool,
    ready: bool,
    round: u64,
}

impl<S: RenderSurface> GameSession<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            word: String::new(),
            guesses: Vec::new(),
            wrong_guess_count: 0,
            is_over: false,
            did_win: false,
            ready: false,
            round: 0,
        }
    }

    /// Fetch a word and reset the round. `on_ready` runs once the scaffold is drawn.
    pub async fn start<P, F>(
        &mut self,
        provider: &P,
        difficulty: Difficulty,
        on_ready: F,
    ) -> Result<StartOutcome, StartError>
    where
        P: WordProvider + ?Sized,
        F: FnOnce(),
    {
        let ticket = self.begin_start();
        let fetched = provider.fetch_word(difficulty).await;
        self.finish_start(ticket, fetched, on_ready)
    }

    /// Mark the session as waiting for a word. Guesses are refused until the
    /// returned ticket is committed with [`GameSession::finish_start`].
    pub fn begin_start(&mut self) -> RoundTicket {
        self.round += 1;
        self.ready = false;
        debug!(round = self.round, "round requested");
        RoundTicket(self.round)
    }

    pub fn finish_start<F: FnOnce()>(
        &mut self,
        ticket: RoundTicket,
        fetched: Result<String, WordError>,
        on_ready: F,
    ) -> Result<StartOutcome, StartError> {
        if ticket.0 != self.round {
            debug!(stale = ticket.0, current = self.round, "ignoring superseded word fetch");
            return Ok(StartOutcome::Stale);
        }

        let word = match fetched.and_then(|raw| normalize_word(&raw)) {
            Ok(word) => word,
            Err(e) => {
                warn!(error = %e, round = self.round, "word fetch failed");
                return Err(StartError::WordFetchFailed(e));
            }
        };

        self.word = word;
        self.surface.clear();
        self.surface.draw_scaffold();
        self.guesses.clear();
        self.wrong_guess_count = 0;
        self.is_over = false;
        self.did_win = false;
        self.ready = true;
        info!(round = self.round, letters = self.word.len(), "round ready");

        on_ready();
        Ok(StartOutcome::Ready)
    }

    pub fn guess(&mut self, input: &str) -> Result<GuessOutcome, GuessError> {
        let letter = validate_letter(input)?;
        if !self.ready {
            return Err(GuessError::RoundNotReady);
        }
        if self.is_over {
            return Err(GuessError::GameOver);
        }
        if self.guesses.contains(&letter) {
            return Err(GuessError::DuplicateGuess(letter));
        }

        self.guesses.push(letter);
        debug!(%letter, "guess accepted");

        if self.word.contains(letter) {
            Ok(self.check_win(letter))
        } else {
            Ok(self.on_wrong_guess(letter))
        }
    }

    fn check_win(&mut self, letter: char) -> GuessOutcome {
        let unknowns = self
            .word
            .chars()
            .filter(|c| !self.guesses.contains(c))
            .count();
        if unknowns == 0 {
            self.is_over = true;
            self.did_win = true;
            info!(word = %self.word, "round won");
            GuessOutcome::Won(letter)
        } else {
            GuessOutcome::Hit(letter)
        }
    }

    fn on_wrong_guess(&mut self, letter: char) -> GuessOutcome {
        // `guess` refuses input once the round is over, so the table always has a part left.
        debug_assert!(self.wrong_guess_count < MAX_WRONG_GUESSES);
        let part = FIGURE_PARTS[self.wrong_guess_count];
        self.surface.draw_part(part);
        self.wrong_guess_count += 1;

        if self.wrong_guess_count >= MAX_WRONG_GUESSES {
            self.is_over = true;
            info!(word = %self.word, "round lost");
            GuessOutcome::Lost(letter)
        } else {
            GuessOutcome::Miss { letter, part }
        }
    }

    /// "Word: " followed by the revealed letters, `_` for the hidden ones
    pub fn word_holder_text(&self) -> String {
        let slots: Vec<String> = self
            .word
            .chars()
            .map(|c| if self.guesses.contains(&c) { c.to_string() } else { "_".to_string() })
            .collect();
        format!("Word: {}", slots.join(" "))
    }

    pub fn guesses_text(&self) -> String {
        let guesses: Vec<String> = self.guesses.iter().map(char::to_string).collect();
        format!("Guesses: {}", guesses.join(", "))
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn guesses(&self) -> &[char] {
        &self.guesses
    }

    pub fn wrong_guess_count(&self) -> usize {
        self.wrong_guess_count
    }

    pub fn remaining_tries(&self) -> usize {
        MAX_WRONG_GUESSES.saturating_sub(self.wrong_guess_count)
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn did_win(&self) -> bool {
        self.did_win
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
