//! File picker screen — directory browser for choosing a source document.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::client::is_document;
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;

/// What a listed entry is, which decides both styling and what Enter does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// The `..` row that ascends to the parent directory.
    Parent,
    Directory,
    /// A file with a recognized document extension; choosable.
    Document,
    /// Any other file; listed dimmed, not choosable.
    Other,
}

/// A single row in the directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// State for the file picker screen.
///
/// The directory persists across openings; the listing is re-read each time
/// the screen is shown.
#[derive(Debug, Clone)]
pub struct FilePickerState {
    current_dir: PathBuf,
    entries: Vec<PickerEntry>,
    selected: usize,
    error: Option<String>,
}

impl Default for FilePickerState {
    fn default() -> Self {
        Self::new()
    }
}

impl FilePickerState {
    /// Creates a state rooted at the working directory, falling back to the
    /// home directory. Call [`refresh`](Self::refresh) to read the listing.
    pub fn new() -> Self {
        let current_dir = std::env::current_dir()
            .ok()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            current_dir,
            entries: Vec::new(),
            selected: 0,
            error: None,
        }
    }

    /// Re-reads the current directory into the entry list.
    ///
    /// Directories sort before files, both case-insensitively; hidden names
    /// are skipped. A `..` row leads when a parent exists. Failure keeps the
    /// old listing and surfaces the error inline.
    pub fn refresh(&mut self) {
        let read = match std::fs::read_dir(&self.current_dir) {
            Ok(read) => read,
            Err(err) => {
                self.error = Some(format!(
                    "could not read {}: {err}",
                    self.current_dir.display()
                ));
                return;
            }
        };

        let mut dirs: Vec<PickerEntry> = Vec::new();
        let mut files: Vec<PickerEntry> = Vec::new();
        for entry in read.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            let path = entry.path();
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if is_dir {
                dirs.push(PickerEntry {
                    name,
                    path,
                    kind: EntryKind::Directory,
                });
            } else {
                let kind = if is_document(&path) {
                    EntryKind::Document
                } else {
                    EntryKind::Other
                };
                files.push(PickerEntry { name, path, kind });
            }
        }
        dirs.sort_by_key(|e| e.name.to_lowercase());
        files.sort_by_key(|e| e.name.to_lowercase());

        let mut entries = Vec::with_capacity(dirs.len() + files.len() + 1);
        if let Some(parent) = self.current_dir.parent() {
            entries.push(PickerEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                kind: EntryKind::Parent,
            });
        }
        entries.extend(dirs);
        entries.extend(files);

        self.entries = entries;
        self.selected = 0;
        self.error = None;
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                if !self.entries.is_empty() {
                    self.selected = (self.selected + 1).min(self.entries.len() - 1);
                }
                Action::None
            }
            KeyCode::Home => {
                self.selected = 0;
                Action::None
            }
            KeyCode::End => {
                self.selected = self.entries.len().saturating_sub(1);
                Action::None
            }
            KeyCode::Enter => self.open_selected(),
            KeyCode::Esc | KeyCode::Char('q') => Action::Navigate(Screen::Generate),
            _ => Action::None,
        }
    }

    /// Returns the directory whose listing is shown.
    pub fn current_dir(&self) -> &std::path::Path {
        &self.current_dir
    }

    /// Returns the cached directory listing.
    pub fn entries(&self) -> &[PickerEntry] {
        &self.entries
    }

    /// Returns the highlighted row index.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Returns the current error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Descends into directories, chooses documents, ignores the rest.
    fn open_selected(&mut self) -> Action {
        let Some(entry) = self.entries.get(self.selected) else {
            return Action::None;
        };
        match entry.kind {
            EntryKind::Parent | EntryKind::Directory => {
                self.current_dir = entry.path.clone();
                self.refresh();
                Action::None
            }
            EntryKind::Document => Action::ChooseFile(entry.path.clone()),
            EntryKind::Other => Action::None,
        }
    }
}

impl ScreenState for FilePickerState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        FilePickerState::handle_key(self, key)
    }
}

/// Renders the file picker screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_file_picker(state: &FilePickerState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Choose File ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [path_area, list_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    let path = Paragraph::new(Span::styled(
        state.current_dir().display().to_string(),
        Style::default().fg(Color::Yellow),
    ));
    frame.render_widget(path, path_area);

    // Window the listing so the highlighted row stays visible.
    let height = list_area.height as usize;
    let offset = (state.selected() + 1).saturating_sub(height);
    let lines: Vec<Line> = state
        .entries()
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, entry)| {
            let (text, style) = match entry.kind {
                EntryKind::Parent => ("../".to_string(), Style::default().fg(Color::Cyan)),
                EntryKind::Directory => (
                    format!("{}/", entry.name),
                    Style::default().fg(Color::Cyan),
                ),
                EntryKind::Document => (entry.name.clone(), Style::default().fg(Color::White)),
                EntryKind::Other => (entry.name.clone(), Style::default().fg(Color::DarkGray)),
            };
            let style = if i == state.selected() {
                style.fg(Color::Black).bg(Color::Yellow)
            } else {
                style
            };
            Line::from(Span::styled(text, style))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), list_area);

    let footer = Paragraph::new("↑↓: navigate  Enter: open/choose  q: back")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);

    if let Some(err) = state.error() {
        let err_line = Paragraph::new(err).style(Style::default().fg(Color::Red));
        frame.render_widget(err_line, footer_area);
    }
}
