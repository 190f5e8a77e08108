//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, resize)
//! - ConductorClient for orchestration
//! - GalleryDisplay for rendering
//!
//! The App:
//! 1. Converts key presses to SurfaceEvents
//! 2. Sends events to the embedded Conductor via ConductorClient
//! 3. Receives GalleryMessages and updates GalleryDisplay
//! 4. Renders based on GalleryDisplay

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::{Frame, Terminal};

use whiskers_core::{FlowState, SurfaceConfig, SurfaceEvent};

use crate::conductor_client::ConductorClient;
use crate::display::GalleryDisplay;
use crate::theme;
use crate::widgets::{fit_width, TextBlock};

/// Frame tick for message draining and carousel playback
const FRAME: Duration = Duration::from_millis(100);

/// Width of the breed selector pane
const SELECTOR_WIDTH: u16 = 28;

/// Height of the info panel
const INFO_HEIGHT: u16 = 8;

const HELP: &str = "↑/↓ breed  ←/→ image  f favourite  v favourites  q quit";

/// Main application state
pub struct App {
    /// Is the app still running?
    running: bool,
    /// Client for communicating with the embedded Conductor
    conductor: ConductorClient,
    /// Display state derived from GalleryMessages
    display: GalleryDisplay,
    /// Carousel auto-advance interval
    carousel_interval: Duration,
}

impl App {
    /// Create a new App instance
    pub fn new(conductor: ConductorClient, surface: &SurfaceConfig) -> Self {
        Self {
            running: true,
            conductor,
            display: GalleryDisplay::new(),
            carousel_interval: surface.carousel_interval,
        }
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();

        self.conductor.start();
        terminal.draw(|frame| self.draw(frame))?;

        while self.running {
            tokio::select! {
                biased;

                maybe_event = event_stream.next() => {
                    match maybe_event {
                        // Only handle Press events (not Release or Repeat)
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key);
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            tracing::warn!("Terminal event error: {}", e);
                        }
                        None => self.running = false,
                    }
                }

                () = tokio::time::sleep(FRAME) => {}
            }

            self.update();
            terminal.draw(|frame| self.draw(frame))?;
        }

        Ok(())
    }

    /// Drain Conductor messages and advance playback
    fn update(&mut self) {
        let now = Instant::now();
        for msg in self.conductor.recv_all() {
            self.display.apply_message(msg, now);
        }
        self.display.carousel.tick(now, self.carousel_interval);
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(breed_id) = self.display.select_previous_breed() {
                    self.conductor
                        .send_event(SurfaceEvent::BreedSelected { breed_id });
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(breed_id) = self.display.select_next_breed() {
                    self.conductor
                        .send_event(SurfaceEvent::BreedSelected { breed_id });
                }
            }
            KeyCode::Left => {
                self.display.carousel.previous();
                self.display.carousel.touch(Instant::now());
            }
            KeyCode::Right => {
                self.display.carousel.next();
                self.display.carousel.touch(Instant::now());
            }
            KeyCode::Char('f') => {
                if let Some(item) = self.display.carousel.current() {
                    self.conductor.send_event(SurfaceEvent::FavoriteToggled {
                        image_id: item.id.clone(),
                    });
                }
            }
            KeyCode::Char('v') => {
                self.conductor.send_event(SurfaceEvent::FavouritesRequested);
            }
            _ => {}
        }
    }

    fn quit(&mut self) {
        self.conductor.send_event(SurfaceEvent::QuitRequested);
        self.running = false;
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    fn draw(&self, frame: &mut Frame) {
        let [main, status] =
            Layout::vertical([Constraint::Min(5), Constraint::Length(1)]).areas(frame.area());
        let [selector, right] =
            Layout::horizontal([Constraint::Length(SELECTOR_WIDTH), Constraint::Min(20)])
                .areas(main);
        let [carousel, info] =
            Layout::vertical([Constraint::Min(6), Constraint::Length(INFO_HEIGHT)]).areas(right);

        self.render_selector(frame, selector);
        self.render_carousel(frame, carousel);
        self.render_info(frame, info);
        self.render_status(frame, status);
    }

    fn render_selector(&self, frame: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .display
            .breeds
            .iter()
            .map(|b| ListItem::new(fit_width(&b.label, width)))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" Breeds ", theme::title())),
            )
            .highlight_style(theme::highlight())
            .highlight_symbol("› ");

        let mut state = ListState::default();
        if !self.display.breeds.is_empty() {
            state.select(Some(self.display.cursor));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_carousel(&self, frame: &mut Frame, area: Rect) {
        let title = match self.display.state {
            FlowState::FavoritesLoaded => " Favourites ",
            _ => " Carousel ",
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(title, theme::title()));
        let position = self.display.position_label();
        if !position.is_empty() {
            block = block.title_bottom(Line::from(format!(" {position} ")).right_aligned());
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(item) = self.display.carousel.current() else {
            let placeholder = if self.display.state.breeds_loaded() {
                "Nothing to show."
            } else {
                "Loading breeds…"
            };
            frame.render_widget(Paragraph::new(placeholder).style(theme::dim()), inner);
            return;
        };

        let marker = if self.display.current_is_favorite() {
            "♥ favourite"
        } else {
            "♡ press f to favourite"
        };
        let marker_style = Style::default().fg(theme::FAVORITE_RED);
        let id_line = format!("id: {}", item.id);

        let text = TextBlock::new()
            .line(marker, marker_style)
            .line("", Style::default())
            .line(&item.url, Style::default().fg(theme::LINK_BLUE))
            .line(&id_line, theme::dim())
            .line("", Style::default())
            .line(&item.description, Style::default().fg(theme::CREAM));
        frame.render_widget(text, inner);
    }

    fn render_info(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(" Info ", theme::title()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = self
            .display
            .info
            .as_ref()
            .map(whiskers_core::InfoPanel::lines)
            .unwrap_or_default();
        let text = lines
            .iter()
            .fold(TextBlock::new(), |text, line| text.line(line, Style::default()));
        frame.render_widget(text, inner);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let status = Line::from(vec![
            Span::styled(format!(" {} ", self.display.state), theme::title()),
            Span::styled(HELP, theme::dim()),
        ]);
        frame.render_widget(Paragraph::new(status), area);
    }
}
