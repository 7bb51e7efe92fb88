use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};
use tokio::runtime::Handle;

use crate::client::{GenerationRequest, GeneratorClient};
use crate::config::Config;

use super::action::{Action, ScreenState};
use super::error::AppError;
use super::screens::{
    FilePickerState, GenerateState, HelpState, Submission, draw_file_picker, draw_generate,
    draw_help,
};
use super::widgets::{StatusBarContext, draw_status_bar};
use super::worker;

/// How long to wait for a key before the loop ticks on its own.
///
/// The timeout keeps the busy indicator animating and lets finished requests
/// apply without requiring input.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Capture a source, set parameters, and view generated questions.
    Generate,
    /// Browse the filesystem for a source document.
    FilePicker,
    /// Show keybinding help.
    Help,
}

/// Top-level application state.
pub struct App {
    screen: Screen,
    generate: GenerateState,
    file_picker: FilePickerState,
    help: HelpState,
    client: GeneratorClient,
    endpoint: String,
    runtime: Handle,
    reply_tx: Sender<worker::GenerationReply>,
    reply_rx: Receiver<worker::GenerationReply>,
    request_seq: u64,
    should_quit: bool,
}

impl App {
    /// Creates a new `App` starting on the [`Screen::Generate`] screen.
    ///
    /// `runtime` is the handle generation requests are spawned onto.
    pub fn new(config: &Config, runtime: Handle) -> Self {
        let (reply_tx, reply_rx) = channel();
        Self {
            screen: Screen::Generate,
            generate: GenerateState::new(),
            file_picker: FilePickerState::new(),
            help: HelpState::new(),
            client: GeneratorClient::new(config),
            endpoint: config.base_url().to_string(),
            runtime,
            reply_tx,
            reply_rx,
            request_seq: 0,
            should_quit: false,
        }
    }

    /// Main event loop: draw → poll for a key → dispatch → apply replies → tick.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
            self.drain_replies();
            self.generate.tick();
        }
        Ok(())
    }

    /// Renders the status bar and the active screen.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [status_area, screen_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(frame.area());

        draw_status_bar(&self.status_context(), frame, status_area);

        match self.screen {
            Screen::Generate => draw_generate(&self.generate, frame, screen_area),
            Screen::FilePicker => draw_file_picker(&self.file_picker, frame, screen_area),
            Screen::Help => draw_help(&self.help, frame, screen_area),
        }
    }

    /// Handles a key event: global keys first, then the active screen.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if key.code == KeyCode::F(1) {
            if self.screen != Screen::Help {
                self.help.set_origin(self.screen);
                self.help.reset();
                self.screen = Screen::Help;
            }
            return;
        }

        let action = self.active_screen_state().handle_key(key);
        self.apply(action);
    }

    /// Applies any replies that arrived since the last poll.
    pub fn drain_replies(&mut self) {
        while let Ok(reply) = self.reply_rx.try_recv() {
            self.generate
                .complete_submission(reply.request_id, reply.outcome);
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn active_screen_state(&mut self) -> &mut dyn ScreenState {
        match self.screen {
            Screen::Generate => &mut self.generate,
            Screen::FilePicker => &mut self.file_picker,
            Screen::Help => &mut self.help,
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => self.navigate(screen),
            Action::ChooseFile(path) => {
                self.generate.set_selected_file(path);
                self.screen = Screen::Generate;
            }
            Action::Submit(request) => self.submit(request),
            Action::Quit => self.should_quit = true,
        }
    }

    fn navigate(&mut self, screen: Screen) {
        if screen == Screen::FilePicker {
            self.file_picker.refresh();
        }
        self.screen = screen;
    }

    /// Issues the next request id and hands the request to the runtime.
    fn submit(&mut self, request: GenerationRequest) {
        self.request_seq += 1;
        let request_id = self.request_seq;
        self.generate.begin_submission(request_id);
        worker::spawn_generation(
            &self.runtime,
            self.client.clone(),
            request_id,
            request,
            self.reply_tx.clone(),
        );
    }

    fn status_context(&self) -> StatusBarContext {
        StatusBarContext {
            endpoint: self.endpoint.clone(),
            question_count: match self.generate.submission() {
                Submission::Complete(mcqs) => Some(mcqs.len()),
                _ => None,
            },
            in_flight: self.generate.is_locked(),
            source_changed: self.generate.pending_change(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Instant;

    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use super::*;
    use crate::client::SourcePayload;
    use crate::model::Difficulty;

    fn make_app() -> (tokio::runtime::Runtime, App) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let config = Config::new("http://localhost:9000").unwrap();
        let app = App::new(&config, runtime.handle().clone());
        (runtime, app)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl_press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        }
    }

    /// A request whose source file cannot exist, so the round trip fails
    /// before any network traffic.
    fn unreadable_request() -> GenerationRequest {
        GenerationRequest {
            source: SourcePayload::File(PathBuf::from("/nonexistent/lecture-notes.txt")),
            topic: "biology".to_string(),
            quantity: 3,
            difficulty: Difficulty::Auto,
            source_changed: true,
        }
    }

    /// Drains replies until the form unlocks or the deadline passes.
    fn drain_until_unlocked(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.generate.is_locked() && Instant::now() < deadline {
            app.drain_replies();
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn new_starts_on_generate() {
        let (_rt, app) = make_app();
        assert_eq!(app.screen(), Screen::Generate);
        assert!(!app.should_quit());
    }

    #[test]
    fn ctrl_c_quits_from_any_screen() {
        for screen in [Screen::Generate, Screen::FilePicker, Screen::Help] {
            let (_rt, mut app) = make_app();
            app.screen = screen;
            app.handle_key(ctrl_press(KeyCode::Char('c')));
            assert!(app.should_quit(), "Ctrl+c on {screen:?} should quit");
        }
    }

    #[test]
    fn esc_on_generate_quits() {
        let (_rt, mut app) = make_app();
        app.handle_key(press(KeyCode::Esc));
        assert!(app.should_quit());
    }

    #[test]
    fn f1_opens_help_with_origin() {
        let (_rt, mut app) = make_app();
        app.handle_key(press(KeyCode::F(1)));
        assert_eq!(app.screen(), Screen::Help);
        assert_eq!(app.help.origin(), Screen::Generate);
    }

    #[test]
    fn help_returns_to_its_origin() {
        let (_rt, mut app) = make_app();
        app.screen = Screen::FilePicker;
        app.handle_key(press(KeyCode::F(1)));
        assert_eq!(app.screen(), Screen::Help);

        app.handle_key(press(KeyCode::Char('q')));
        assert_eq!(app.screen(), Screen::FilePicker);
        assert!(!app.should_quit());
    }

    #[test]
    fn f1_on_help_stays_on_help() {
        let (_rt, mut app) = make_app();
        app.handle_key(press(KeyCode::F(1)));
        app.handle_key(press(KeyCode::F(1)));
        assert_eq!(app.screen(), Screen::Help);
        assert_eq!(app.help.origin(), Screen::Generate);
    }

    #[test]
    fn release_events_are_ignored() {
        let (_rt, mut app) = make_app();
        app.handle_key(release(KeyCode::Esc));
        assert!(!app.should_quit());
        assert_eq!(app.screen(), Screen::Generate);
    }

    #[test]
    fn enter_on_the_file_row_opens_the_picker() {
        let (_rt, mut app) = make_app();
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.screen(), Screen::FilePicker);
        assert_eq!(app.file_picker.error(), None);
    }

    #[test]
    fn esc_on_the_picker_returns_to_generate() {
        let (_rt, mut app) = make_app();
        app.handle_key(press(KeyCode::Enter));
        app.handle_key(press(KeyCode::Esc));
        assert_eq!(app.screen(), Screen::Generate);
        assert!(!app.should_quit());
    }

    #[test]
    fn choosing_a_file_lands_back_on_the_form() {
        let (_rt, mut app) = make_app();
        app.screen = Screen::FilePicker;
        app.apply(Action::ChooseFile(PathBuf::from("/tmp/chapter-1.pdf")));
        assert_eq!(app.screen(), Screen::Generate);
        assert_eq!(app.generate.selected_file_name(), "chapter-1.pdf");
        assert!(app.generate.pending_change());
    }

    #[test]
    fn submit_locks_the_form_and_assigns_an_id() {
        let (_rt, mut app) = make_app();
        app.apply(Action::Submit(unreadable_request()));
        assert!(app.generate.is_locked());
        assert_eq!(app.request_seq, 1);
    }

    #[test]
    fn failed_requests_unlock_with_an_error_record() {
        let (_rt, mut app) = make_app();
        app.apply(Action::Submit(unreadable_request()));
        drain_until_unlocked(&mut app);
        match app.generate.submission() {
            Submission::Failed(message) => {
                assert!(
                    message.contains("lecture-notes.txt"),
                    "message was {message:?}"
                );
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn request_ids_increase_per_submission() {
        let (_rt, mut app) = make_app();
        app.apply(Action::Submit(unreadable_request()));
        app.apply(Action::Submit(unreadable_request()));
        assert_eq!(app.request_seq, 2);
        drain_until_unlocked(&mut app);
        assert!(!app.generate.is_locked());
    }

    #[test]
    fn status_reflects_the_endpoint_and_results() {
        let (_rt, mut app) = make_app();
        let ctx = app.status_context();
        assert_eq!(ctx.endpoint, "http://localhost:9000");
        assert_eq!(ctx.question_count, None);
        assert!(!ctx.in_flight);
        assert!(!ctx.source_changed);

        app.generate.begin_submission(1);
        assert!(app.status_context().in_flight);

        app.generate.complete_submission(1, Ok(vec![]));
        assert_eq!(app.status_context().question_count, Some(0));
        assert!(!app.status_context().in_flight);
    }

    #[test]
    fn status_tracks_the_pending_marker() {
        let (_rt, mut app) = make_app();
        app.generate.set_selected_file(PathBuf::from("/tmp/a.pdf"));
        assert!(app.status_context().source_changed);
    }

    #[test]
    fn unhandled_key_is_ignored() {
        let (_rt, mut app) = make_app();
        app.handle_key(press(KeyCode::F(5)));
        assert_eq!(app.screen(), Screen::Generate);
        assert!(!app.should_quit());
    }
}
