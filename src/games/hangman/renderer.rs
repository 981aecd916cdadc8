/// Hangman terminal drawing: the gallows canvas and the full game screen
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::core::game::MAX_WRONG_GUESSES;
use crate::core::renderer::{FigurePart, RenderSurface};
use crate::games::hangman::game::{HangmanApp, Status};

const CANVAS_WIDTH: usize = 12;
const CANVAS_HEIGHT: usize = 9;

/// (row, col, glyph)
type Stroke = (usize, usize, char);

const SCAFFOLD: &[Stroke] = &[
    // top
    (0, 2, '+'), (0, 3, '-'), (0, 4, '-'), (0, 5, '-'), (0, 6, '-'), (0, 7, '-'), (0, 8, '+'),
    // noose
    (1, 8, '|'),
    // main beam
    (1, 2, '|'), (2, 2, '|'), (3, 2, '|'), (4, 2, '|'), (5, 2, '|'), (6, 2, '|'), (7, 2, '|'),
    // base
    (8, 0, '='), (8, 1, '='), (8, 2, '='), (8, 3, '='), (8, 4, '='), (8, 5, '='), (8, 6, '='),
];

fn strokes(part: FigurePart) -> &'static [Stroke] {
    match part {
        FigurePart::Head => &[(2, 8, 'O')],
        FigurePart::Torso => &[(3, 8, '|'), (4, 8, '|')],
        FigurePart::LeftArm => &[(3, 7, '/')],
        FigurePart::RightArm => &[(3, 9, '\\')],
        FigurePart::LeftLeg => &[(5, 7, '/')],
        FigurePart::RightLeg => &[(5, 9, '\\')],
    }
}

/// Character grid the session draws the gallows and figure onto
#[derive(Debug, Clone)]
pub struct AsciiCanvas {
    cells: [[char; CANVAS_WIDTH]; CANVAS_HEIGHT],
}

impl AsciiCanvas {
    pub fn new() -> Self {
        Self { cells: [[' '; CANVAS_WIDTH]; CANVAS_HEIGHT] }
    }

    fn plot(&mut self, strokes: &[Stroke]) {
        for &(row, col, glyph) in strokes {
            self.cells[row][col] = glyph;
        }
    }

    /// Rows with trailing blanks trimmed
    pub fn lines(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect()
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().flatten().all(|c| *c == ' ')
    }
}

impl Default for AsciiCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for AsciiCanvas {
    fn clear(&mut self) {
        self.cells = [[' '; CANVAS_WIDTH]; CANVAS_HEIGHT];
    }

    fn draw_scaffold(&mut self) {
        self.plot(SCAFFOLD);
    }

    fn draw_part(&mut self, part: FigurePart) {
        self.plot(strokes(part));
    }
}

/// Pure rendering function - no game logic
pub fn render(frame: &mut Frame, app: &HangmanApp) {
    let session = app.session();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(CANVAS_HEIGHT as u16 + 2),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    frame.render_widget(
        Paragraph::new(format!(" HANGMAN - difficulty: {} ", app.difficulty()))
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center),
        chunks[0],
    );

    let canvas: Vec<Line> = session.surface().lines().into_iter().map(Line::from).collect();
    frame.render_widget(
        Paragraph::new(canvas).block(Block::default().title(" GALLOWS ").borders(Borders::ALL)),
        chunks[1],
    );

    let status_style = match app.status() {
        Status::Won => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Status::Lost | Status::Failed => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Status::Loading => Style::default().fg(Color::Yellow),
        Status::Playing => Style::default().fg(Color::Cyan),
    };

    let mut board = Vec::new();
    if session.is_ready() {
        board.push(Line::from(session.word_holder_text()));
        board.push(Line::from(session.guesses_text()));
        board.push(Line::from(format!(
            "Tries left: {} {}",
            session.remaining_tries(),
            "\u{2764}".repeat(session.remaining_tries())
        )));
        board.push(Line::from(format!(
            "Wrong guesses: {}/{}",
            session.wrong_guess_count(),
            MAX_WRONG_GUESSES
        )));
    }
    board.push(Line::from(""));
    board.push(Line::styled(app.message().to_string(), status_style));
    frame.render_widget(
        Paragraph::new(board).block(Block::default().title(" ROUND ").borders(Borders::ALL)),
        chunks[2],
    );

    frame.render_widget(
        Paragraph::new(format!("> {}", app.input()))
            .block(Block::default().title(" GUESS ").borders(Borders::ALL)),
        chunks[3],
    );

    let help = if session.is_over() {
        "[Enter] New round  [Tab] Change difficulty  [Esc] Quit"
    } else {
        "[a-z] Type  [Enter] Guess  [Tab] Change difficulty  [Esc] Quit"
    };
    frame.render_widget(Paragraph::new(help).alignment(Alignment::Center), chunks[4]);
}
