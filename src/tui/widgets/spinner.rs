//! Busy indicator widget shown while a request is on the wire.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

static FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Animation state for the busy indicator. Advanced once per event-loop tick
/// while a request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spinner {
    frame: usize,
}

impl Spinner {
    /// Advances to the next animation frame, wrapping around.
    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len();
    }

    /// Resets to the first frame.
    pub fn reset(&mut self) {
        self.frame = 0;
    }

    /// Returns the glyph for the current frame.
    pub fn glyph(&self) -> &'static str {
        FRAMES[self.frame]
    }
}

/// Renders the busy indicator followed by a message.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_spinner(spinner: &Spinner, message: &str, frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(spinner.glyph(), Style::default().fg(Color::Yellow)),
        Span::raw(" "),
        Span::raw(message.to_string()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
