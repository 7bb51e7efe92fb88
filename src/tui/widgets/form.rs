//! Reusable form widget for text input screens.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// A single field within a [`Form`].
#[derive(Debug, Clone)]
pub struct FormField {
    /// Display label shown to the left of the input.
    pub label: String,
    /// Current text value.
    pub value: String,
    /// Validation error message, if any.
    pub error: Option<String>,
    /// Whether the field must be non-empty on submit.
    pub required: bool,
}

impl FormField {
    /// Creates a new form field.
    pub fn new(label: impl Into<String>, required: bool) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            error: None,
            required,
        }
    }
}

/// A multi-field text form with focus management.
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<FormField>,
    focus: usize,
}

impl Form {
    /// Creates a new form with the given fields. Focus starts on the first field.
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields, focus: 0 }
    }

    /// Returns the index of the currently focused field.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Moves focus to the next field, wrapping around.
    pub fn focus_next(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + 1) % self.fields.len();
    }

    /// Moves focus to the previous field, wrapping around.
    pub fn focus_prev(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// Moves focus directly to the field at `index`, if it exists.
    pub fn set_focus(&mut self, index: usize) {
        if index < self.fields.len() {
            self.focus = index;
        }
    }

    /// Inserts a character at the end of the focused field.
    pub fn insert_char(&mut self, ch: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(ch);
        }
    }

    /// Deletes the last character from the focused field.
    pub fn delete_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    /// Replaces the value of the field at `index`.
    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.into();
        }
    }

    /// Sets an error message on a field by index.
    pub fn set_error(&mut self, index: usize, error: String) {
        if let Some(field) = self.fields.get_mut(index) {
            field.error = Some(error);
        }
    }

    /// Clears all field errors.
    pub fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.error = None;
        }
    }

    /// Returns `true` if any field has an error set.
    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|f| f.error.is_some())
    }

    /// Returns the value of the field at `index`, or an empty string if out of bounds.
    pub fn value(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    /// Returns a reference to the fields.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }
}

/// Renders a form within the given area.
///
/// `active` marks whether the form currently holds the screen's input focus;
/// the focused-field highlight and cursor are suppressed when it does not.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(form: &Form, active: bool, frame: &mut Frame, area: Rect) {
    let row_height = 3_u16;
    let constraints: Vec<Constraint> = form
        .fields
        .iter()
        .map(|_| Constraint::Length(row_height))
        .collect();

    let rows = Layout::vertical(constraints).split(area);

    for (i, field) in form.fields.iter().enumerate() {
        let is_focused = active && i == form.focus;

        let border_color = if field.error.is_some() {
            Color::Red
        } else if is_focused {
            Color::Yellow
        } else {
            Color::DarkGray
        };

        let label = if field.required {
            format!("{} *", field.label)
        } else {
            field.label.clone()
        };

        let block = Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let mut spans = vec![Span::raw(&field.value)];
        if is_focused {
            spans.push(Span::styled(
                "\u{2588}",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(block);
        frame.render_widget(paragraph, rows[i]);

        // Draw error below the field if there's space
        if let Some(ref err) = field.error {
            let error_line = Paragraph::new(Span::styled(err, Style::default().fg(Color::Red)));
            // Render error overlapping the bottom of the row area
            let err_area = Rect {
                x: rows[i].x + 2,
                y: rows[i].y + row_height.saturating_sub(1),
                width: rows[i].width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(error_line, err_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_form() -> Form {
        Form::new(vec![
            FormField::new("Topic", false),
            FormField::new("Quantity", true),
        ])
    }

    // --- Focus management ---

    #[test]
    fn focus_starts_at_zero() {
        let form = make_form();
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn focus_next_advances() {
        let mut form = make_form();
        form.focus_next();
        assert_eq!(form.focus(), 1);
    }

    #[test]
    fn focus_next_wraps() {
        let mut form = make_form();
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn focus_prev_wraps() {
        let mut form = make_form();
        form.focus_prev();
        assert_eq!(form.focus(), 1);
    }

    #[test]
    fn focus_next_empty_form_is_noop() {
        let mut form = Form::new(vec![]);
        form.focus_next();
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn focus_prev_empty_form_is_noop() {
        let mut form = Form::new(vec![]);
        form.focus_prev();
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn set_focus_moves_directly() {
        let mut form = make_form();
        form.set_focus(1);
        assert_eq!(form.focus(), 1);
    }

    #[test]
    fn set_focus_out_of_bounds_is_noop() {
        let mut form = make_form();
        form.set_focus(99);
        assert_eq!(form.focus(), 0);
    }

    // --- Character insert/delete ---

    #[test]
    fn insert_char_appends_to_focused() {
        let mut form = make_form();
        form.insert_char('b');
        form.insert_char('i');
        assert_eq!(form.value(0), "bi");
        assert_eq!(form.value(1), "");
    }

    #[test]
    fn insert_char_on_different_focus() {
        let mut form = make_form();
        form.focus_next();
        form.insert_char('3');
        assert_eq!(form.value(0), "");
        assert_eq!(form.value(1), "3");
    }

    #[test]
    fn delete_char_removes_last() {
        let mut form = make_form();
        form.insert_char('a');
        form.insert_char('b');
        form.delete_char();
        assert_eq!(form.value(0), "a");
    }

    #[test]
    fn delete_char_on_empty_is_noop() {
        let mut form = make_form();
        form.delete_char();
        assert_eq!(form.value(0), "");
    }

    // --- Values ---

    #[test]
    fn set_value_replaces_content() {
        let mut form = make_form();
        form.insert_char('x');
        form.set_value(0, "biology");
        assert_eq!(form.value(0), "biology");
    }

    #[test]
    fn set_value_out_of_bounds_is_noop() {
        let mut form = make_form();
        form.set_value(99, "nope");
        assert_eq!(form.value(0), "");
        assert_eq!(form.value(1), "");
    }

    #[test]
    fn value_out_of_bounds_returns_empty() {
        let form = make_form();
        assert_eq!(form.value(99), "");
    }

    // --- Error management ---

    #[test]
    fn set_error_on_field() {
        let mut form = make_form();
        form.set_error(0, "topic is required".into());
        assert!(form.has_errors());
        assert_eq!(form.fields()[0].error, Some("topic is required".into()));
    }

    #[test]
    fn clear_errors_removes_all() {
        let mut form = make_form();
        form.set_error(0, "err1".into());
        form.set_error(1, "err2".into());
        assert!(form.has_errors());
        form.clear_errors();
        assert!(!form.has_errors());
    }

    #[test]
    fn has_errors_false_when_clean() {
        let form = make_form();
        assert!(!form.has_errors());
    }

    #[test]
    fn set_error_out_of_bounds_is_noop() {
        let mut form = make_form();
        form.set_error(99, "nope".into());
        assert!(!form.has_errors());
    }

    // --- Fields accessor ---

    #[test]
    fn fields_returns_correct_labels() {
        let form = make_form();
        let labels: Vec<&str> = form.fields().iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["Topic", "Quantity"]);
    }

    #[test]
    fn field_required_flags() {
        let form = make_form();
        assert!(!form.fields()[0].required);
        assert!(form.fields()[1].required);
    }
}
