//! Generation screen — the core form for requesting multiple choice questions.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tui_textarea::TextArea;

use crate::client::{ClientError, GenerationRequest, SourcePayload};
use crate::model::{Difficulty, InputMode, Mcq};
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;
use crate::tui::widgets::form::{Form, FormField, draw_form};
use crate::tui::widgets::spinner::{Spinner, draw_spinner};

/// Field index for the topic.
const TOPIC: usize = 0;
/// Field index for the question quantity.
const QUANTITY: usize = 1;

/// Display name shown while no source file is chosen.
const NO_FILE_CHOSEN: &str = "No file chosen";

/// Lifecycle slot for the current generation round trip.
///
/// One slot carries both the in-flight flag and the latest outcome, so a
/// question list and an error record can never coexist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Submission {
    #[default]
    Idle,
    InFlight,
    Complete(Vec<Mcq>),
    Failed(String),
}

/// Which input area has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Source,
    Params,
}

/// State for the generation screen.
#[derive(Debug, Clone)]
pub struct GenerateState {
    form: Form,
    input_mode: InputMode,
    difficulty: Difficulty,
    textarea: TextArea<'static>,
    previous_text: String,
    selected_file: Option<PathBuf>,
    selected_file_name: String,
    pending_change: bool,
    submission: Submission,
    last_request_id: u64,
    focus: Focus,
    spinner: Spinner,
    results_scroll: u16,
    error: Option<String>,
}

impl Default for GenerateState {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerateState {
    /// Creates a new generation state: file input mode, auto difficulty,
    /// quantity 1, no file chosen.
    pub fn new() -> Self {
        let mut form = Form::new(vec![
            FormField::new("Topic", false),
            FormField::new("Quantity", true),
        ]);
        form.set_value(QUANTITY, "1");

        let mut textarea = TextArea::default();
        textarea.set_cursor_line_style(Style::default());

        Self {
            form,
            input_mode: InputMode::default(),
            difficulty: Difficulty::default(),
            textarea,
            previous_text: String::new(),
            selected_file: None,
            selected_file_name: NO_FILE_CHOSEN.to_string(),
            pending_change: false,
            submission: Submission::default(),
            last_request_id: 0,
            focus: Focus::default(),
            spinner: Spinner::default(),
            results_scroll: 0,
            error: None,
        }
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    ///
    /// Focus movement, scrolling, submission, and quitting stay available
    /// while a request is in flight; everything that edits the inputs is
    /// locked until the reply lands.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        // Alt+M toggles the input mode; Alt+D cycles difficulty forward,
        // Shift+Alt+D backward.
        if key.modifiers == KeyModifiers::ALT {
            match key.code {
                KeyCode::Char('m') => {
                    if !self.is_locked() {
                        self.input_mode = self.input_mode.toggled();
                    }
                    return Action::None;
                }
                KeyCode::Char('d') => {
                    if !self.is_locked() {
                        self.cycle_difficulty(true);
                    }
                    return Action::None;
                }
                _ => {}
            }
        }
        const ALT_SHIFT: KeyModifiers = KeyModifiers::ALT.union(KeyModifiers::SHIFT);
        if key.modifiers == ALT_SHIFT && key.code == KeyCode::Char('D') {
            if !self.is_locked() {
                self.cycle_difficulty(false);
            }
            return Action::None;
        }
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('g') {
            return self.submit();
        }

        match key.code {
            KeyCode::Tab => {
                self.focus_next();
                return Action::None;
            }
            KeyCode::BackTab => {
                self.focus_prev();
                return Action::None;
            }
            KeyCode::PageUp => {
                self.results_scroll = self.results_scroll.saturating_sub(5);
                return Action::None;
            }
            KeyCode::PageDown => {
                self.results_scroll = self.results_scroll.saturating_add(5);
                return Action::None;
            }
            KeyCode::Esc => return Action::Quit,
            _ => {}
        }

        if self.is_locked() {
            return Action::None;
        }

        match self.focus {
            Focus::Source => self.handle_source_key(key),
            Focus::Params => self.handle_params_key(key),
        }
    }

    /// Returns a reference to the parameter form for rendering.
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Returns the active input mode.
    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    /// Returns the selected difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Returns the text capture buffer.
    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    /// Returns the display name of the chosen file.
    pub fn selected_file_name(&self) -> &str {
        &self.selected_file_name
    }

    /// Returns whether captured input changed since the last submission.
    pub fn pending_change(&self) -> bool {
        self.pending_change
    }

    /// Returns the submission lifecycle slot.
    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    /// Returns the focused input area.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Returns the busy indicator state.
    pub fn spinner(&self) -> &Spinner {
        &self.spinner
    }

    /// Returns the current submit error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns `true` while a request is on the wire and inputs are locked.
    pub fn is_locked(&self) -> bool {
        self.submission == Submission::InFlight
    }

    /// Uses `path` as the upload source and flags the change for the backend.
    pub fn set_selected_file(&mut self, path: PathBuf) {
        self.selected_file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.selected_file = Some(path);
        self.pending_change = true;
    }

    /// Drops the chosen file and restores the placeholder name.
    pub fn clear_selected_file(&mut self) {
        self.selected_file = None;
        self.selected_file_name = NO_FILE_CHOSEN.to_string();
        self.pending_change = false;
    }

    /// Marks the form in flight for the request with the given id.
    ///
    /// Issuing a new id while already in flight supersedes the outstanding
    /// request; its reply will no longer match and gets dropped.
    pub fn begin_submission(&mut self, request_id: u64) {
        self.last_request_id = request_id;
        self.submission = Submission::InFlight;
        self.spinner.reset();
    }

    /// Applies the outcome of a finished request.
    ///
    /// Replies for superseded ids are dropped whole: the newest request is
    /// still outstanding, so the form stays in flight until its own reply.
    pub fn complete_submission(&mut self, request_id: u64, outcome: Result<Vec<Mcq>, ClientError>) {
        if request_id != self.last_request_id {
            log::debug!("dropping stale reply for request {request_id}");
            return;
        }
        self.results_scroll = 0;
        match outcome {
            Ok(mcqs) => {
                log::info!("request {request_id} returned {} questions", mcqs.len());
                self.pending_change = false;
                self.submission = Submission::Complete(mcqs);
            }
            Err(err) => {
                self.submission = Submission::Failed(err.to_string());
            }
        }
    }

    /// Advances the busy indicator; called by the event loop between polls.
    pub fn tick(&mut self) {
        if self.is_locked() {
            self.spinner.tick();
        }
    }

    fn focus_next(&mut self) {
        match self.focus {
            Focus::Source => {
                self.focus = Focus::Params;
                self.form.set_focus(TOPIC);
            }
            Focus::Params => {
                if self.form.focus() == QUANTITY {
                    self.focus = Focus::Source;
                } else {
                    self.form.focus_next();
                }
            }
        }
    }

    fn focus_prev(&mut self) {
        match self.focus {
            Focus::Source => {
                self.focus = Focus::Params;
                self.form.set_focus(QUANTITY);
            }
            Focus::Params => {
                if self.form.focus() == TOPIC {
                    self.focus = Focus::Source;
                } else {
                    self.form.focus_prev();
                }
            }
        }
    }

    /// Keys routed to the source area: the file row or the text buffer.
    fn handle_source_key(&mut self, key: KeyEvent) -> Action {
        match self.input_mode {
            InputMode::File => match key.code {
                KeyCode::Enter => Action::Navigate(Screen::FilePicker),
                KeyCode::Delete => {
                    self.clear_selected_file();
                    Action::None
                }
                _ => Action::None,
            },
            InputMode::Text => {
                // The modified flag mirrors a change event: movement keys and
                // no-op deletes leave the pending flag untouched.
                if self.textarea.input(key) {
                    let new_text = self.textarea.lines().join("\n");
                    self.pending_change = new_text != self.previous_text;
                    self.previous_text = new_text;
                }
                Action::None
            }
        }
    }

    /// Keys routed to the parameter form.
    fn handle_params_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Backspace => {
                self.form.delete_char();
                Action::None
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Char(ch) => self.handle_char(ch),
            _ => Action::None,
        }
    }

    /// Handles a printable character: inserts into the focused field.
    ///
    /// The quantity field accepts digits only.
    fn handle_char(&mut self, ch: char) -> Action {
        if self.form.focus() == QUANTITY && !ch.is_ascii_digit() {
            return Action::None;
        }
        self.form.insert_char(ch);
        Action::None
    }

    /// Cycles the difficulty forward or backward, wrapping around.
    fn cycle_difficulty(&mut self, forward: bool) {
        self.difficulty = cycle(Difficulty::all(), self.difficulty, forward);
    }

    /// Checks the input constraints and snapshots a request.
    fn submit(&mut self) -> Action {
        self.form.clear_errors();
        self.error = None;

        let quantity = match self.form.value(QUANTITY).parse::<u32>() {
            Ok(quantity) if quantity >= 1 => quantity,
            _ => {
                self.form
                    .set_error(QUANTITY, "quantity must be a number of at least 1".into());
                return Action::None;
            }
        };

        let source = match self.input_mode {
            InputMode::File => match &self.selected_file {
                Some(path) => SourcePayload::File(path.clone()),
                None => {
                    self.error = Some(NO_FILE_CHOSEN.to_string());
                    return Action::None;
                }
            },
            InputMode::Text => SourcePayload::Text(self.textarea.lines().join("\n")),
        };

        Action::Submit(GenerationRequest {
            source,
            topic: self.form.value(TOPIC).to_string(),
            quantity,
            difficulty: self.difficulty,
            source_changed: self.pending_change,
        })
    }
}

impl ScreenState for GenerateState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        GenerateState::handle_key(self, key)
    }
}

/// Cycles through a slice to find the next or previous element.
fn cycle<T: PartialEq + Copy>(items: &[T], current: T, forward: bool) -> T {
    let pos = items.iter().position(|&x| x == current).unwrap_or(0);
    let next = if forward {
        (pos + 1) % items.len()
    } else {
        (pos + items.len() - 1) % items.len()
    };
    items[next]
}

/// Renders the generation screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_generate(state: &GenerateState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Generate MCQs ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [header_area, source_area, form_area, error_area, results_area, footer_area] =
        Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(inner);

    let active = !state.is_locked();

    // Header: purpose line plus the two cycled selectors
    let header_line1 = Line::from(Span::styled(
        "Upload File or Enter Text to Generate MCQs",
        Style::default().fg(Color::White),
    ));
    let header_line2 = Line::from(vec![
        Span::styled(
            format!("Input: {}", state.input_mode()),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Difficulty: {}", state.difficulty()),
            Style::default().fg(Color::Yellow),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(vec![header_line1, header_line2]),
        header_area,
    );

    // Source capture: file row or text buffer
    let source_focused = active && state.focus() == Focus::Source;
    let source_border = if source_focused {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    match state.input_mode() {
        InputMode::File => {
            let source_block = Block::default()
                .title(" Choose File ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(source_border));
            let name_style = if state.selected_file_name() == NO_FILE_CHOSEN {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            let name =
                Paragraph::new(Span::styled(state.selected_file_name(), name_style))
                    .block(source_block);
            frame.render_widget(name, source_area);
        }
        InputMode::Text => {
            let source_block = Block::default()
                .title(" Enter Text ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(source_border));
            let text_inner = source_block.inner(source_area);
            frame.render_widget(source_block, source_area);
            frame.render_widget(state.textarea(), text_inner);
        }
    }

    // Parameter fields
    draw_form(
        state.form(),
        active && state.focus() == Focus::Params,
        frame,
        form_area,
    );

    // Submit error
    if let Some(err) = state.error() {
        let err_paragraph = Paragraph::new(Span::styled(err, Style::default().fg(Color::Red)));
        frame.render_widget(err_paragraph, error_area);
    }

    // Results panel
    let results_block = Block::default()
        .title(" Results ")
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));
    let results_inner = results_block.inner(results_area);
    frame.render_widget(results_block, results_area);

    match state.submission() {
        Submission::InFlight => {
            let spin_area = Rect {
                height: results_inner.height.min(1),
                ..results_inner
            };
            draw_spinner(state.spinner(), "Generating...", frame, spin_area);
        }
        Submission::Complete(mcqs) if !mcqs.is_empty() => {
            let paragraph = Paragraph::new(results_lines(mcqs))
                .wrap(Wrap { trim: false })
                .scroll((state.results_scroll, 0));
            frame.render_widget(paragraph, results_inner);
        }
        Submission::Failed(message) => {
            let paragraph = Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(Color::Red),
            ))
            .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, results_inner);
        }
        Submission::Idle | Submission::Complete(_) => {
            frame.render_widget(Paragraph::new("No results available"), results_inner);
        }
    }

    // Footer
    let footer = Paragraph::new(Line::from(
        "Tab: focus  Alt+m: input  Alt+d: difficulty  Ctrl+g: generate  F1: help",
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}

/// Builds the numbered question lines: `1. question`, indented choices, then
/// the correct answer in muted text.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn results_lines(mcqs: &[Mcq]) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    for (i, mcq) in mcqs.iter().enumerate() {
        lines.push(Line::from(Span::styled(
            format!("{}. {}", i + 1, mcq.question),
            Style::default().fg(Color::White),
        )));
        for choice in &mcq.choices {
            lines.push(Line::from(format!("    {choice}")));
        }
        lines.push(Line::from(Span::styled(
            mcq.correct_answer.clone(),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }
    lines
}
