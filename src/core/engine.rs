use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::info;

use crate::core::error::WordError;
use crate::core::game::RoundTicket;
use crate::core::words::WordProvider;
use crate::games::hangman::game::{AppCommand, HangmanApp};
use crate::games::hangman::renderer;

/// Events delivered back to the UI loop from background tasks
enum EngineEvent {
    WordFetched {
        ticket: RoundTicket,
        result: Result<String, WordError>,
    },
}

pub struct Engine {
    app: HangmanApp,
    provider: Arc<dyn WordProvider>,
}

impl Engine {
    pub fn new(app: HangmanApp, provider: Arc<dyn WordProvider>) -> Self {
        Self { app, provider }
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<EngineEvent>();
        self.request_round(&event_tx);

        loop {
            terminal.draw(|f| renderer::render(f, &self.app))?;

            // INPUT (Non-blocking)
            if event::poll(Duration::from_millis(0))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        match self.app.handle_key(key) {
                            AppCommand::Quit => break,
                            AppCommand::NewRound => self.request_round(&event_tx),
                            AppCommand::None => {}
                        }
                    }
                }
            }

            // Wake up periodically so input keeps getting polled while a fetch is in flight
            let frame = tokio::time::sleep(Duration::from_millis(16));

            tokio::select! {
                Some(event) = event_rx.recv() => match event {
                    EngineEvent::WordFetched { ticket, result } => {
                        self.app.finish_round(ticket, result);
                    }
                },
                _ = frame => {}
            }
        }

        info!("quitting");
        Ok(())
    }

    /// Start a round and fetch its word in the background
    fn request_round(&mut self, event_tx: &mpsc::UnboundedSender<EngineEvent>) {
        let ticket = self.app.begin_round();
        let difficulty = self.app.difficulty();
        let provider = Arc::clone(&self.provider);
        let event_tx = event_tx.clone();
        info!(%difficulty, "starting round");

        tokio::spawn(async move {
            let result = provider.fetch_word(difficulty).await;
            let _ = event_tx.send(EngineEvent::WordFetched { ticket, result });
        });
    }
}
