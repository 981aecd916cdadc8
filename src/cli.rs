use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::core::engine::Engine;
use crate::core::game::normalize_word;
use crate::core::words::{Difficulty, HttpWordProvider, WordList, WordProvider, DEFAULT_WORD_SERVICE};
use crate::games::hangman::HangmanApp;

#[derive(Parser)]
#[command(name = "hangterm")]
#[command(about = "Hangman in the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Parse the command line. No subcommand means `play`, parsed through clap so
/// its defaults and env vars apply.
pub fn parse_command<I, T>(args: I) -> Result<Commands, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args)?.command {
        Some(command) => Ok(command),
        None => Cli::try_parse_from(["hangterm", "play"])?
            .command
            .ok_or_else(|| clap::Error::new(ErrorKind::MissingSubcommand)),
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play a game (the default)
    Play(PlayArgs),
    /// Fetch a single word and print it the way a round would use it
    Word {
        #[arg(short, long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,

        #[command(flatten)]
        source: WordSource,
    },
}

#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Difficulty of the first round: easy, medium or hard
    #[arg(short, long, default_value_t = Difficulty::Medium)]
    pub difficulty: Difficulty,

    #[command(flatten)]
    pub source: WordSource,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Where words come from
#[derive(Args, Debug)]
pub struct WordSource {
    /// Word service base URL, queried as `<url>?difficulty=<level>`
    #[arg(long, env = "HANGTERM_WORD_SERVICE")]
    pub word_service: Option<String>,

    /// Use the public word service instead of the built-in word lists
    #[arg(long)]
    pub online: bool,
}

impl WordSource {
    pub fn provider(&self) -> Arc<dyn WordProvider> {
        match (&self.word_service, self.online) {
            (Some(url), _) => Arc::new(HttpWordProvider::new(url.clone())),
            (None, true) => Arc::new(HttpWordProvider::new(DEFAULT_WORD_SERVICE)),
            (None, false) => Arc::new(WordList::default()),
        }
    }
}

/// Install a file-backed tracing subscriber
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}

pub async fn run_cli() -> Result<()> {
    let command = parse_command(std::env::args_os()).unwrap_or_else(|e| e.exit());
    match command {
        Commands::Play(args) => play(args).await,
        Commands::Word { difficulty, source } => {
            let raw = source.provider().fetch_word(difficulty).await?;
            println!("{}", normalize_word(&raw)?);
            Ok(())
        }
    }
}

async fn play(args: PlayArgs) -> Result<()> {
    let PlayArgs { difficulty, source, log_file } = args;
    if let Some(path) = log_file.as_deref() {
        init_logging(path)?;
    }
    info!(%difficulty, service = ?source.word_service, online = source.online, "starting hangterm");

    let engine = Engine::new(HangmanApp::new(difficulty), source.provider());
    let terminal = ratatui::init();
    let result = engine.run(terminal).await;
    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_play_options() {
        let command = parse_command([
            "hangterm",
            "play",
            "--difficulty",
            "hard",
            "--word-service",
            "http://localhost:3000/",
        ])
        .unwrap();
        match command {
            Commands::Play(args) => {
                assert_eq!(args.difficulty, Difficulty::Hard);
                assert_eq!(args.source.word_service.as_deref(), Some("http://localhost:3000/"));
                assert!(args.log_file.is_none());
            }
            _ => panic!("expected play"),
        }
    }

    #[test]
    fn rejects_unknown_difficulty() {
        assert!(Cli::try_parse_from(["hangterm", "word", "-d", "extreme"]).is_err());
    }

    #[test]
    fn no_subcommand_plays_with_clap_defaults() {
        std::env::set_var("HANGTERM_WORD_SERVICE", "http://words.test/");
        let bare = Cli::try_parse_from(["hangterm"]).map(|cli| cli.command.is_none());
        let command = parse_command(["hangterm"]);
        std::env::remove_var("HANGTERM_WORD_SERVICE");

        assert!(bare.unwrap());
        match command.unwrap() {
            Commands::Play(args) => {
                assert_eq!(args.difficulty, Difficulty::Medium);
                assert_eq!(args.source.word_service.as_deref(), Some("http://words.test/"));
                assert!(!args.source.online);
            }
            _ => panic!("expected play"),
        }
    }
}
