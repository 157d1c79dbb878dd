//! Application state and main loop

use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use futures::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;

use super::sections::{visible_sections, Section};
use super::terminal::{self, Tui};
use super::view;
use crate::chat::{ChatController, UNAVAILABLE_MESSAGE};
use crate::effects::{CursorTrail, ParticleField, WireframeRoom};
use crate::gemini::{GeminiClient, StreamEvent};
use crate::pdf;
use crate::profile::{build_system_instruction, ProfileStore, SectionsConfig};
use crate::render::Point;

/// Rows reserved above the scrolled body
pub const HEADER_HEIGHT: u16 = 1;
/// Rows reserved below it
pub const FOOTER_HEIGHT: u16 = 1;

/// Input focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Scrolling the page
    #[default]
    Browse,
    /// Typing into the chat input
    ChatInput,
}

/// Events from the streaming task
#[derive(Debug)]
pub enum AsyncEvent {
    StreamChunk(String),
    StreamDone,
    StreamError(String),
}

/// Main TUI application state
pub struct App {
    pub should_quit: bool,
    pub mode: AppMode,

    /// Loaded profile, or `None` with the load error kept for display
    pub profile: Option<ProfileStore>,
    pub profile_error: Option<String>,

    pub chat: ChatController,
    pub example_questions: Vec<String>,

    /// Project filter tags and the selected index
    pub filter_tags: Vec<String>,
    pub filter_index: usize,

    /// Scroll offset into the section column, in lines
    pub scroll: usize,

    pub particles: ParticleField,
    pub trail: CursorTrail,
    pub room: WireframeRoom,

    /// Chat input buffer and the cursor as a byte offset, always kept on
    /// a char boundary
    pub input: String,
    pub cursor: usize,

    /// Transient status line (export results, errors)
    pub status: Option<String>,

    /// Section heights from the last rendered frame, for the scroll
    /// tracker and section jumps
    pub section_heights: Vec<(Section, usize)>,
    /// Body area of the last rendered frame (cols, rows)
    pub body_size: (u16, u16),

    client: Option<Arc<GeminiClient>>,
    system_instruction: String,
    async_rx: Option<mpsc::UnboundedReceiver<AsyncEvent>>,
    last_tick: Instant,
}

impl App {
    /// Tick rate for animations (16ms = ~60fps)
    const TICK_RATE: Duration = Duration::from_millis(16);

    /// Create the app from its loaded dependencies
    pub fn new(
        profile: std::result::Result<ProfileStore, crate::errors::FolioError>,
        client: Option<GeminiClient>,
        mut chat: ChatController,
    ) -> Self {
        let (profile, profile_error) = match profile {
            Ok(store) => (Some(store), None),
            Err(e) => (None, Some(e.to_string())),
        };

        chat.init_greeting(profile.as_ref().map(ProfileStore::data));

        let system_instruction = profile
            .as_ref()
            .map(|store| build_system_instruction(store.data()))
            .unwrap_or_else(|| {
                "You are a helpful AI assistant for a portfolio page.".to_string()
            });
        let example_questions = profile
            .as_ref()
            .map(ProfileStore::example_questions)
            .unwrap_or_default();
        let filter_tags = profile
            .as_ref()
            .map(ProfileStore::project_filter_tags)
            .unwrap_or_default();

        Self {
            should_quit: false,
            mode: AppMode::Browse,
            profile,
            profile_error,
            chat,
            example_questions,
            filter_tags,
            filter_index: 0,
            scroll: 0,
            particles: ParticleField::new(80.0, 48.0),
            trail: CursorTrail::new(),
            room: WireframeRoom::new(),
            input: String::new(),
            cursor: 0,
            status: None,
            section_heights: Vec::new(),
            body_size: (0, 0),
            client: client.map(Arc::new),
            system_instruction,
            async_rx: None,
            last_tick: Instant::now(),
        }
    }

    /// Resolved section toggles, everything visible without a profile
    pub fn sections_config(&self) -> SectionsConfig {
        self.profile
            .as_ref()
            .map(|store| store.data().sections_config())
            .unwrap_or_default()
    }

    /// Currently selected project filter tag
    pub fn current_filter(&self) -> &str {
        self.filter_tags
            .get(self.filter_index)
            .map_or("all", String::as_str)
    }

    /// Run the main event loop
    pub fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        terminal::set_title("folio");

        while !self.should_quit {
            self.process_async_events();

            terminal.draw(|frame| self.draw(frame))?;

            let timeout = Self::TICK_RATE.saturating_sub(self.last_tick.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(_, _) => {
                        // The body area is re-measured on the next draw
                    }
                    Event::FocusLost => self.particles.set_paused(true),
                    Event::FocusGained => self.particles.set_paused(false),
                    _ => {}
                }
            }

            if self.last_tick.elapsed() >= Self::TICK_RATE {
                self.on_tick();
                self.last_tick = Instant::now();
            }
        }

        Ok(())
    }

    /// Drain events from the streaming task
    fn process_async_events(&mut self) {
        let mut done = false;

        if let Some(ref mut rx) = self.async_rx {
            while let Ok(event) = rx.try_recv() {
                match event {
                    AsyncEvent::StreamChunk(chunk) => self.chat.apply_fragment(&chunk),
                    AsyncEvent::StreamDone => {
                        self.chat.finish_stream();
                        done = true;
                    }
                    AsyncEvent::StreamError(err) => {
                        self.chat.fail_stream(err);
                        done = true;
                    }
                }
            }
        }

        if done {
            self.async_rx = None;
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        view::render(frame, self);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.mode {
            AppMode::Browse => self.handle_browse_key(key),
            AppMode::ChatInput => self.handle_input_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::PageDown => {
                self.scroll = self.scroll.saturating_add(self.body_size.1 as usize)
            }
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(self.body_size.1 as usize),
            KeyCode::Char('g') => self.scroll = 0,
            KeyCode::Char('G') => self.scroll = self.column_height().saturating_sub(1),
            KeyCode::Tab => self.jump_section(1),
            KeyCode::BackTab => self.jump_section(-1),
            KeyCode::Char('f') => self.cycle_filter(),
            KeyCode::Char('e') => self.export_pdf(),
            KeyCode::Char('i') => {
                if self.sections_config().show_ai_chat {
                    self.mode = AppMode::ChatInput;
                }
            }
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = AppMode::Browse,
            KeyCode::Enter => self.send_message(),
            KeyCode::Backspace => {
                if let Some(c) = self.input[..self.cursor].chars().next_back() {
                    self.cursor -= c.len_utf8();
                    self.input.remove(self.cursor);
                }
            }
            KeyCode::Left => {
                if let Some(c) = self.input[..self.cursor].chars().next_back() {
                    self.cursor -= c.len_utf8();
                }
            }
            KeyCode::Right => {
                if let Some(c) = self.input[self.cursor..].chars().next() {
                    self.cursor += c.len_utf8();
                }
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.input.len(),
            KeyCode::Char(c) => {
                // A digit on an empty input submits an example question
                // through the same quota gate as a typed message
                if self.input.is_empty() && c.is_ascii_digit() {
                    let idx = (c as usize).wrapping_sub('1' as usize);
                    if let Some(question) = self.example_questions.get(idx) {
                        self.input = question.clone();
                        self.cursor = self.input.len();
                        self.send_message();
                        return;
                    }
                }
                self.input.insert(self.cursor, c);
                self.cursor += c.len_utf8();
            }
            _ => {}
        }
    }

    /// Feed the pointer into the effects.
    ///
    /// Mouse coordinates are terminal cells; the canvas uses 2 vertical
    /// pixels per cell. Only positions over the landing region drive the
    /// particle attraction and the trail.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(
            mouse.kind,
            MouseEventKind::Moved | MouseEventKind::Drag(_)
        ) {
            return;
        }

        let body_row = match mouse.row.checked_sub(HEADER_HEIGHT) {
            Some(row) if row < self.body_size.1 => row,
            _ => {
                self.particles.set_pointer(None);
                return;
            }
        };

        let column_row = body_row as usize + self.scroll;
        let home_height = self
            .section_heights
            .first()
            .map_or(0, |(_, height)| *height);

        if column_row < home_height {
            let point = Point::new(f64::from(mouse.column), column_row as f64 * 2.0);
            self.particles.set_pointer(Some(point));
            self.trail.spawn(point, Instant::now());
        } else {
            self.particles.set_pointer(None);
        }
    }

    /// Scroll to the start of the adjacent section
    fn jump_section(&mut self, direction: i32) {
        let mut starts = Vec::with_capacity(self.section_heights.len());
        let mut cursor = 0;
        for (_, height) in &self.section_heights {
            starts.push(cursor);
            cursor += height;
        }

        if direction > 0 {
            if let Some(next) = starts.iter().find(|&&s| s > self.scroll) {
                self.scroll = *next;
            }
        } else if let Some(prev) = starts.iter().rev().find(|&&s| s < self.scroll) {
            self.scroll = *prev;
        } else {
            self.scroll = 0;
        }
    }

    fn cycle_filter(&mut self) {
        if !self.filter_tags.is_empty() {
            self.filter_index = (self.filter_index + 1) % self.filter_tags.len();
        }
    }

    fn column_height(&self) -> usize {
        self.section_heights.iter().map(|(_, h)| h).sum()
    }

    /// Export the resume PDF next to the working directory
    fn export_pdf(&mut self) {
        let Some(ref store) = self.profile else {
            self.status = Some("No profile loaded, nothing to export".to_string());
            return;
        };

        let path = pdf::default_output_path(store.data());
        self.status = Some(match pdf::export_resume(store.data(), &path) {
            Ok(()) => format!("Resume exported to {}", path.display()),
            Err(e) => format!("Export failed: {e}"),
        });
    }

    /// Submit the chat input as a new turn
    fn send_message(&mut self) {
        let text = std::mem::take(&mut self.input);
        self.cursor = 0;

        if !self.chat.begin_send(&text) {
            return;
        }

        let Some(ref client) = self.client else {
            self.chat.fail_stream(UNAVAILABLE_MESSAGE);
            return;
        };

        let client = Arc::clone(client);
        let contents = self.chat.conversation_contents();
        let system = self.system_instruction.clone();

        let (tx, rx) = mpsc::unbounded_channel();
        self.async_rx = Some(rx);

        tokio::spawn(async move {
            match client.stream_conversation(contents, &system).await {
                Ok(mut stream) => {
                    while let Some(event) = stream.next().await {
                        match event {
                            StreamEvent::Text(chunk) => {
                                let _ = tx.send(AsyncEvent::StreamChunk(chunk));
                            }
                            StreamEvent::Done => {
                                let _ = tx.send(AsyncEvent::StreamDone);
                                break;
                            }
                            StreamEvent::Error(err) => {
                                let _ = tx.send(AsyncEvent::StreamError(err));
                                break;
                            }
                        }
                    }
                }
                Err(e) => {
                    let _ = tx.send(AsyncEvent::StreamError(e.to_string()));
                }
            }
        });
    }

    /// Record the measured body area, resizing the particle surface on
    /// change
    pub fn set_body_size(&mut self, cols: u16, rows: u16) {
        if self.body_size != (cols, rows) {
            self.body_size = (cols, rows);
            self.particles
                .resize(f64::from(cols), f64::from(rows) * 2.0);
        }
    }

    /// Visible sections for the current profile
    pub fn sections(&self) -> Vec<Section> {
        visible_sections(&self.sections_config())
    }

    fn on_tick(&mut self) {
        self.particles.step();
        self.room.step();
        self.trail.prune(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::QuotaStore;
    use crate::errors::FolioError;

    fn test_app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let chat = ChatController::new(QuotaStore::at(dir.path().join("q.json")), "fp");
        let app = App::new(
            Err(FolioError::ProfileLoadError {
                path: "missing.json".into(),
                message: "not found".to_string(),
            }),
            None,
            chat,
        );
        (dir, app)
    }

    #[test]
    fn test_new_app_without_profile() {
        let (_dir, app) = test_app();
        assert!(!app.should_quit);
        assert!(app.profile_error.is_some());
        // Generic greeting was seeded
        assert_eq!(app.chat.messages().len(), 1);
    }

    #[test]
    fn test_send_without_client_fails_turn() {
        let (_dir, mut app) = test_app();
        app.input = "hello".to_string();

        app.send_message();
        assert_eq!(app.chat.error(), Some(UNAVAILABLE_MESSAGE));
        // Quota was still consumed
        assert_eq!(app.chat.remaining_messages(), 4);
    }

    #[test]
    fn test_body_resize_regenerates_particles() {
        let (_dir, mut app) = test_app();
        app.set_body_size(100, 30);
        let count = app.particles.particles().len();

        app.set_body_size(900, 30);
        assert_ne!(app.particles.particles().len(), count);
    }

    #[test]
    fn test_filter_cycling_wraps() {
        let (_dir, mut app) = test_app();
        app.filter_tags = vec!["all".to_string(), "rust".to_string()];

        app.cycle_filter();
        assert_eq!(app.current_filter(), "rust");
        app.cycle_filter();
        assert_eq!(app.current_filter(), "all");
    }

    #[test]
    fn test_input_editing_handles_multibyte_characters() {
        let (_dir, mut app) = test_app();
        app.mode = AppMode::ChatInput;

        app.handle_input_key(KeyEvent::from(KeyCode::Char('é')));
        app.handle_input_key(KeyEvent::from(KeyCode::Char('x')));
        assert_eq!(app.input, "éx");
        assert_eq!(app.cursor, 3);

        app.handle_input_key(KeyEvent::from(KeyCode::Left));
        app.handle_input_key(KeyEvent::from(KeyCode::Backspace));
        assert_eq!(app.input, "x");
        assert_eq!(app.cursor, 0);

        app.handle_input_key(KeyEvent::from(KeyCode::Right));
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn test_section_jump_forward_and_back() {
        let (_dir, mut app) = test_app();
        app.section_heights = vec![
            (Section::Home, 20),
            (Section::About, 10),
            (Section::Contact, 5),
        ];

        app.jump_section(1);
        assert_eq!(app.scroll, 20);
        app.jump_section(1);
        assert_eq!(app.scroll, 30);
        app.jump_section(-1);
        assert_eq!(app.scroll, 20);
        app.jump_section(-1);
        assert_eq!(app.scroll, 0);
    }
}
