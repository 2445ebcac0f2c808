//! Line-oriented terminal presentation.

use std::fmt::Write as _;
use std::io::Write;
use strictly_pairs::{Card, LevelSpec, Phase, SessionEvent, SessionObserver, SessionSnapshot, Theme};
use strictly_pairs_content::glyph;
use strum::IntoEnumIterator;
use tracing::warn;

/// Width of one rendered cell, brackets excluded.
const CELL_WIDTH: usize = 12;

/// Board columns for a level: 4 up to 12 pairs, 5 up to 16, then 6.
pub fn columns_for(pairs_needed: u32) -> usize {
    match pairs_needed {
        0..=12 => 4,
        13..=16 => 5,
        _ => 6,
    }
}

fn face(card: &Card) -> String {
    let face = glyph(&card.image_ref)
        .map(|g| format!("{} {}", g, card.display_name))
        .unwrap_or_else(|| card.display_name.clone());
    face.chars().take(CELL_WIDTH).collect()
}

fn cell(index: usize, card: &Card) -> String {
    if card.is_matched {
        format!("[*{:<width$}]", face(card), width = CELL_WIDTH - 1)
    } else if card.is_flipped {
        format!("[ {:<width$}]", face(card), width = CELL_WIDTH - 1)
    } else {
        format!("[ {:>2}{:<width$}]", index + 1, "", width = CELL_WIDTH - 3)
    }
}

/// Renders a snapshot as a status line, the card grid and a prompt.
pub fn render(snapshot: &SessionSnapshot) -> String {
    let state = &snapshot.state;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Level {} | {} | Matches {}/{} | Moves {}/{} ({} left)",
        state.level(),
        snapshot.theme.display_name(),
        state.matches(),
        state.pairs_needed(),
        state.moves(),
        state.max_moves(),
        state.moves_remaining()
    );

    let columns = columns_for(state.pairs_needed());
    for (row_index, row) in state.cards().chunks(columns).enumerate() {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(col, card)| cell(row_index * columns + col, card))
            .collect();
        let _ = writeln!(out, "{}", line.join(" "));
    }

    let prompt = match snapshot.phase {
        Phase::Won => "You win! [n] next level  [r] restart  [q] quit",
        Phase::Lost => "Out of moves. [t] try again  [r] restart  [q] quit",
        Phase::Resolving => "...",
        Phase::Idle | Phase::OneSelected => "Pick a card number  [r] restart  [theme <name>]  [q] quit",
    };
    let _ = writeln!(out, "{}", prompt);
    out
}

/// Difficulty table for levels `1..=max`.
pub fn levels_table(max: u32) -> String {
    let mut out = String::from("level  pairs  cards  max moves\n");
    for level in 1..=max.max(1) {
        let spec = LevelSpec::for_level(level);
        let _ = writeln!(
            out,
            "{:>5}  {:>5}  {:>5}  {:>9}",
            spec.level,
            spec.pairs_needed,
            spec.card_count(),
            spec.max_moves
        );
    }
    out
}

/// One line per theme: parse name and display name.
pub fn themes_list() -> String {
    Theme::iter()
        .map(|theme| format!("{:<10} {}\n", theme.to_string(), theme.display_name()))
        .collect()
}

/// Observer that redraws the board on every state change.
#[derive(Debug)]
pub struct TerminalView<W> {
    out: W,
}

impl TerminalView<std::io::Stdout> {
    /// View writing to standard output.
    pub fn stdout() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl<W: Write> TerminalView<W> {
    /// View writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> SessionObserver for TerminalView<W> {
    fn on_event(&mut self, event: &SessionEvent) {
        let SessionEvent::StateChanged(snapshot) = event else {
            return;
        };
        let frame = render(snapshot);
        if let Err(e) = writeln!(self.out).and_then(|_| self.out.write_all(frame.as_bytes())) {
            warn!(error = %e, "Failed to draw board");
        }
        let _ = self.out.flush();
    }
}
