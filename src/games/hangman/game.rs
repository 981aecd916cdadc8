use crossterm::event::{KeyCode, KeyEvent};

use crate::core::error::{StartError, WordError};
use crate::core::game::{GameSession, GuessOutcome, RoundTicket, StartOutcome};
use crate::core::words::Difficulty;
use crate::games::hangman::renderer::AsciiCanvas;

const MAX_INPUT: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Loading,
    Playing,
    Won,
    Lost,
    Failed,
}

/// What the engine has to do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    None,
    NewRound,
    Quit,
}

/// Hangman front end: owns the session, the input line and the status line
pub struct HangmanApp {
    session: GameSession<AsciiCanvas>,
    difficulty: Difficulty,
    status: Status,
    input: String,
    message: String,
}

impl HangmanApp {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            session: GameSession::new(AsciiCanvas::new()),
            difficulty,
            status: Status::Loading,
            input: String::new(),
            message: "Welcome to Hangman!".to_string(),
        }
    }

    pub fn session(&self) -> &GameSession<AsciiCanvas> {
        &self.session
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn begin_round(&mut self) -> RoundTicket {
        self.status = Status::Loading;
        self.input.clear();
        self.message = format!("Fetching a {} word...", self.difficulty);
        self.session.begin_start()
    }

    pub fn finish_round(&mut self, ticket: RoundTicket, fetched: Result<String, WordError>) {
        let mut ready = false;
        match self.session.finish_start(ticket, fetched, || ready = true) {
            Ok(StartOutcome::Ready) if ready => {
                self.status = Status::Playing;
                self.message = "New round! Guess a letter.".to_string();
            }
            Ok(_) => {}
            Err(StartError::WordFetchFailed(source)) => {
                self.status = Status::Failed;
                self.message = format!("Could not fetch a word ({source}). Press Enter to retry.");
            }
        }
    }

    /// Submit one guess and update the status line
    pub fn submit(&mut self, input: &str) {
        match self.session.guess(input) {
            Ok(GuessOutcome::Hit(letter)) => {
                self.message = format!("Good guess! '{letter}' is in the word.");
            }
            Ok(GuessOutcome::Miss { letter, .. }) => {
                self.message = format!("Sorry, '{letter}' is not in the word.");
            }
            Ok(GuessOutcome::Won(_)) => {
                self.status = Status::Won;
                self.message = format!("You won! The word was '{}'.", self.session.word());
            }
            Ok(GuessOutcome::Lost(_)) => {
                self.status = Status::Lost;
                self.message = format!("Game over! The word was '{}'.", self.session.word());
            }
            Err(e) => self.message = e.to_string(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Esc => AppCommand::Quit,
            KeyCode::Tab => {
                self.difficulty = self.difficulty.next();
                AppCommand::NewRound
            }
            KeyCode::Enter => match self.status {
                Status::Won | Status::Lost | Status::Failed => AppCommand::NewRound,
                Status::Playing => {
                    let input = std::mem::take(&mut self.input);
                    self.submit(&input);
                    AppCommand::None
                }
                Status::Loading => AppCommand::None,
            },
            KeyCode::Backspace => {
                self.input.pop();
                AppCommand::None
            }
            KeyCode::Char(c) if self.status == Status::Playing => {
                if self.input.chars().count() < MAX_INPUT {
                    self.input.push(c);
                }
                AppCommand::None
            }
            _ => AppCommand::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing(word: &str) -> HangmanApp {
        let mut app = HangmanApp::new(Difficulty::Medium);
        let ticket = app.begin_round();
        app.finish_round(ticket, Ok(word.to_string()));
        assert_eq!(app.status(), Status::Playing);
        app
    }

    fn type_line(app: &mut HangmanApp, line: &str) -> AppCommand {
        for c in line.chars() {
            app.handle_key(KeyEvent::from(KeyCode::Char(c)));
        }
        app.handle_key(KeyEvent::from(KeyCode::Enter))
    }

    #[test]
    fn enter_submits_the_input_line() {
        let mut app = playing("book");
        assert_eq!(type_line(&mut app, "K"), AppCommand::None);
        assert_eq!(app.input(), "");
        assert_eq!(app.session().guesses(), &['k']);
        assert_eq!(app.message(), "Good guess! 'k' is in the word.");
    }

    #[test]
    fn validation_errors_become_messages() {
        let mut app = playing("book");
        type_line(&mut app, "ab");
        assert_eq!(app.message(), "Please guess 1 letter at a time.");
        type_line(&mut app, "7");
        assert_eq!(app.message(), "Please guess only a letter.");
        type_line(&mut app, "");
        assert_eq!(app.message(), "Please guess a letter.");
        type_line(&mut app, "b");
        type_line(&mut app, "B");
        assert_eq!(app.message(), "That letter has already been guessed. Try Again.");
        assert_eq!(app.session().guesses(), &['b']);
    }

    #[test]
    fn finished_round_asks_for_a_new_one() {
        let mut app = playing("ok");
        type_line(&mut app, "o");
        assert_eq!(type_line(&mut app, "k"), AppCommand::None);
        assert_eq!(app.status(), Status::Won);
        assert_eq!(app.message(), "You won! The word was 'ok'.");

        // typing is ignored once the round is over
        app.handle_key(KeyEvent::from(KeyCode::Char('z')));
        assert_eq!(app.input(), "");
        assert_eq!(app.handle_key(KeyEvent::from(KeyCode::Enter)), AppCommand::NewRound);
    }

    #[test]
    fn losing_reports_the_word() {
        let mut app = playing("ok");
        for c in ["a", "b", "c", "d", "e", "f"] {
            type_line(&mut app, c);
        }
        assert_eq!(app.status(), Status::Lost);
        assert_eq!(app.message(), "Game over! The word was 'ok'.");
    }

    #[test]
    fn failed_fetch_can_be_retried() {
        let mut app = HangmanApp::new(Difficulty::Hard);
        let ticket = app.begin_round();
        app.finish_round(ticket, Err(WordError::MissingWord));
        assert_eq!(app.status(), Status::Failed);
        assert!(app.message().starts_with("Could not fetch a word"));
        assert_eq!(app.handle_key(KeyEvent::from(KeyCode::Enter)), AppCommand::NewRound);
    }

    #[test]
    fn stale_round_does_not_change_status() {
        let mut app = HangmanApp::new(Difficulty::Easy);
        let old = app.begin_round();
        let _new = app.begin_round();
        app.finish_round(old, Ok("book".to_string()));
        assert_eq!(app.status(), Status::Loading);
        assert!(!app.session().is_ready());
    }

    #[test]
    fn tab_cycles_difficulty_and_restarts() {
        let mut app = playing("book");
        assert_eq!(app.handle_key(KeyEvent::from(KeyCode::Tab)), AppCommand::NewRound);
        assert_eq!(app.difficulty(), Difficulty::Hard);
        assert_eq!(app.handle_key(KeyEvent::from(KeyCode::Esc)), AppCommand::Quit);
    }
}
