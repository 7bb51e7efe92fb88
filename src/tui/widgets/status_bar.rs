//! Status bar widget — persistent one-line session context display.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Data passed to the status bar widget; decoupled from the screen states so
/// the bar never reaches into them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// The generation service endpoint.
    pub endpoint: String,
    /// Question count of the latest completed result set, if any.
    pub question_count: Option<usize>,
    /// Whether a request is currently on the wire.
    pub in_flight: bool,
    /// Whether the source changed since the last submission.
    pub source_changed: bool,
}

/// Renders a one-line status bar showing the session context.
///
/// Display format (left-aligned, Cyan):
/// - In flight:              `http://localhost:8000  GENERATING`  (GENERATING in Green)
/// - With a result set:      `http://localhost:8000  5 questions`
/// - Unsubmitted edits add a trailing `pending changes` (Yellow)
///
/// Renders nothing if `ctx.endpoint` is empty.
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    if ctx.endpoint.is_empty() {
        return;
    }

    let cyan = Style::default().fg(Color::Cyan);
    let green = Style::default().fg(Color::Green);
    let yellow = Style::default().fg(Color::Yellow);

    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(ctx.endpoint.clone(), cyan));

    if ctx.in_flight {
        spans.push(Span::styled("  ", cyan));
        spans.push(Span::styled("GENERATING", green));
    } else if let Some(count) = ctx.question_count {
        spans.push(Span::styled("  ", cyan));
        spans.push(Span::styled(format!("{count} questions"), cyan));
    }

    if ctx.source_changed {
        spans.push(Span::styled("  ", cyan));
        spans.push(Span::styled("pending changes", yellow));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
