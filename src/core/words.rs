use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use serde::Deserialize;
use tracing::debug;

use crate::core::error::{ParseDifficultyError, WordError};

/// Word service the original game talked to.
pub const DEFAULT_WORD_SERVICE: &str = "https://hangman-micro-service.herokuapp.com/";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Next difficulty, wrapping from hard back to easy
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}

/// Supplies the secret word for a round
#[async_trait]
pub trait WordProvider: Send + Sync {
    async fn fetch_word(&self, difficulty: Difficulty) -> Result<String, WordError>;
}

#[derive(Debug, Deserialize)]
struct WordResponse {
    word: Option<String>,
}

/// Pull the word out of a `{ "word": "..." }` body.
pub fn parse_word_response(body: &str) -> Result<String, WordError> {
    let response: WordResponse = serde_json::from_str(body)?;
    response.word.ok_or(WordError::MissingWord)
}

/// Fetches words from the hangman word service over HTTP
#[derive(Debug, Clone)]
pub struct HttpWordProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpWordProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Use a preconfigured client (proxy, timeouts, ...)
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self { client, base_url: base_url.into() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for HttpWordProvider {
    fn default() -> Self {
        Self::new(DEFAULT_WORD_SERVICE)
    }
}

#[async_trait]
impl WordProvider for HttpWordProvider {
    async fn fetch_word(&self, difficulty: Difficulty) -> Result<String, WordError> {
        debug!(url = %self.base_url, %difficulty, "requesting word");
        let body = self
            .client
            .get(&self.base_url)
            .query(&[("difficulty", difficulty.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_word_response(&body)
    }
}

const EASY_WORDS: &[&str] = &[
    "book", "rust", "tree", "fish", "cake", "moon", "rain", "frog", "lamp", "desk",
];
const MEDIUM_WORDS: &[&str] = &[
    "example", "hangman", "socket", "network", "terminal", "garden", "pickle", "rocket",
];
const HARD_WORDS: &[&str] = &[
    "asynchronous", "quixotic", "rhythm", "zephyr", "jukebox", "syzygy", "kilobyte",
];

/// Offline provider picking from fixed word lists
#[derive(Debug, Clone)]
pub struct WordList {
    easy: Vec<String>,
    medium: Vec<String>,
    hard: Vec<String>,
}

impl WordList {
    pub fn new(easy: Vec<String>, medium: Vec<String>, hard: Vec<String>) -> Self {
        Self { easy, medium, hard }
    }

    pub fn words(&self, difficulty: Difficulty) -> &[String] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }
}

impl Default for WordList {
    fn default() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self::new(owned(EASY_WORDS), owned(MEDIUM_WORDS), owned(HARD_WORDS))
    }
}

#[async_trait]
impl WordProvider for WordList {
    async fn fetch_word(&self, difficulty: Difficulty) -> Result<String, WordError> {
        self.words(difficulty)
            .choose(&mut rand::rng())
            .cloned()
            .ok_or(WordError::EmptyWordList(difficulty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("Medium".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!(" HARD ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("nightmare".parse::<Difficulty>().is_err());
    }

    #[test]
    fn difficulty_cycles() {
        assert_eq!(Difficulty::Easy.next(), Difficulty::Medium);
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
    }

    #[test]
    fn parses_service_body() {
        assert_eq!(parse_word_response(r#"{"word":"book"}"#).unwrap(), "book");
        assert!(matches!(
            parse_word_response(r#"{"word":null}"#),
            Err(WordError::MissingWord)
        ));
        assert!(matches!(parse_word_response("{}"), Err(WordError::MissingWord)));
        assert!(matches!(parse_word_response("nope"), Err(WordError::Decode(_))));
    }

    /// Serve one canned HTTP response; the task yields the request line it saw
    async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/", listener.local_addr().unwrap());

        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request: Vec<u8> = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;

            let request = String::from_utf8_lossy(&request).into_owned();
            request.lines().next().unwrap_or_default().to_string()
        });

        (base_url, server)
    }

    fn local_provider(base_url: String) -> HttpWordProvider {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        HttpWordProvider::with_client(base_url, client)
    }

    #[tokio::test]
    async fn http_provider_sends_difficulty_and_reads_word() {
        let (base_url, server) = serve_once("200 OK", r#"{"word":"Book"}"#).await;
        let provider = local_provider(base_url);

        let word = provider.fetch_word(Difficulty::Hard).await.unwrap();
        assert_eq!(word, "Book");

        let request_line = server.await.unwrap();
        assert!(
            request_line.starts_with("GET /?difficulty=hard "),
            "unexpected request line {request_line:?}"
        );
    }

    #[tokio::test]
    async fn http_provider_maps_server_errors() {
        let (base_url, server) = serve_once("500 Internal Server Error", r#"{"word":"book"}"#).await;
        let provider = local_provider(base_url);

        let result = provider.fetch_word(Difficulty::Easy).await;
        assert!(matches!(result, Err(WordError::Request(_))), "got {result:?}");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn http_provider_reports_missing_word() {
        let (base_url, server) = serve_once("200 OK", r#"{"error":"no words"}"#).await;
        let provider = local_provider(base_url);

        let result = provider.fetch_word(Difficulty::Medium).await;
        assert!(matches!(result, Err(WordError::MissingWord)), "got {result:?}");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn word_list_picks_from_the_right_list() {
        let list = WordList::default();
        for difficulty in Difficulty::ALL {
            let word = list.fetch_word(difficulty).await.unwrap();
            assert!(list.words(difficulty).contains(&word));
        }
    }

    #[tokio::test]
    async fn empty_word_list_is_an_error() {
        let list = WordList::new(Vec::new(), vec!["book".into()], Vec::new());
        assert!(matches!(
            list.fetch_word(Difficulty::Easy).await,
            Err(WordError::EmptyWordList(Difficulty::Easy))
        ));
    }
}
