use std::time::Instant;

use anyhow::Result;
use arboard::Clipboard;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::{Terminal, backend::Backend, prelude::Frame};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::config::Settings;
use crate::content;
use crate::cursor::CursorBlink;
use crate::input::{Action, HitMap, action_for_key};
use crate::models::Topic;
use crate::session::{ScrollTiming, SessionView};
use crate::shell::TerminalGuard;
use crate::theme::Theme;
use crate::transcript::Transcript;
use crate::ui::{self, Areas, BarState};
use crate::utils::max_scroll;

pub struct App {
    session: SessionView,
    blink: CursorBlink,
    theme: Theme,
    max_width: u16,
    hits: HitMap,
    view_rows: usize,
    content_rows: usize,
    flash: Option<String>,
    should_quit: bool,
}

impl App {
    /// Must be called inside a tokio runtime; the caret timer starts here.
    pub fn new(settings: &Settings) -> Self {
        Self::with_session(settings, SessionView::new(ScrollTiming::from_settings(settings)))
    }

    pub fn with_session(settings: &Settings, session: SessionView) -> Self {
        Self {
            session,
            blink: CursorBlink::start(settings.timing.cursor_blink()),
            theme: Theme::default(),
            max_width: settings.layout.max_width,
            hits: HitMap::default(),
            view_rows: 0,
            content_rows: 0,
            flash: None,
            should_quit: false,
        }
    }

    pub fn session(&self) -> &SessionView {
        &self.session
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Frames are only needed while a scroll is pending or easing.
    pub fn needs_frames(&self) -> bool {
        self.session.has_pending_scroll() || self.session.viewport().is_animating()
    }

    pub fn handle_event(&mut self, event: Event, now: Instant) {
        let action = match event {
            Event::Key(key) => action_for_key(key),
            Event::Mouse(mouse) => self.hits.action_for_mouse(mouse),
            _ => None,
        };
        if let Some(action) = action {
            self.apply(action, now);
        }
    }

    pub fn apply(&mut self, action: Action, now: Instant) {
        self.flash = None;
        let page = self.view_rows.saturating_sub(1).max(1) as isize;
        match action {
            Action::Select(topic) => {
                let interaction = self.session.select_topic(topic, now);
                info!(topic = %topic, id = %interaction.id(), "topic selected");
            }
            Action::Clear => {
                info!(cleared = self.session.history().len(), "back to main page");
                self.session.clear(now);
            }
            Action::ScrollBy(rows) => self.session.viewport_mut().scroll_by(rows),
            Action::PageUp => self.session.viewport_mut().scroll_by(-page),
            Action::PageDown => self.session.viewport_mut().scroll_by(page),
            Action::Top => self.session.viewport_mut().jump_to(0),
            Action::Bottom => {
                let bottom = max_scroll(self.content_rows, self.view_rows);
                self.session.viewport_mut().jump_to(bottom);
            }
            Action::CopyLinks => self.copy_links(),
            Action::Quit => self.should_quit = true,
        }
    }

    fn copy_links(&mut self) {
        let Some(topic) = self.session.current_topic() else {
            self.flash = Some("pick a topic first".to_string());
            return;
        };
        let links: Vec<&str> = content::block(topic).links().iter().map(|link| link.href).collect();
        let text = links.join("\n");
        match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(()) => {
                info!(topic = %topic, count = links.len(), "links copied");
                self.flash = Some(format!("copied {} link{}", links.len(), if links.len() == 1 { "" } else { "s" }));
            }
            Err(err) => {
                warn!(error = %err, "clipboard unavailable");
                self.flash = Some("clipboard unavailable".to_string());
            }
        }
    }

    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>, now: Instant) -> Result<()> {
        terminal.draw(|f| self.render(f, now))?;
        Ok(())
    }

    fn render(&mut self, f: &mut Frame, now: Instant) {
        let areas = Areas::new(f.area(), self.max_width);
        let transcript = Transcript::build(self.session.history(), areas.transcript.width, &self.theme);
        let rows = usize::from(areas.transcript.height);

        self.session.attach_anchors(transcript.anchors());
        self.session.settle(now, transcript.bottom(), transcript.len(), rows);
        let viewport = self.session.viewport_mut();
        viewport.clamp(max_scroll(transcript.len(), rows));
        viewport.step();
        let offset = viewport.offset();

        let status = self.session.status_line();
        let bar = BarState {
            status: &status,
            cursor_on: self.blink.is_visible(),
            flash: self.flash.as_deref(),
        };
        ui::render(f, &areas, &transcript, offset, &bar, &self.theme);

        self.view_rows = rows;
        self.content_rows = transcript.len();
        self.hits = HitMap {
            transcript: areas.transcript,
            home_button: areas.home_button(),
            scroll_offset: offset,
            menu_rows: transcript.menu_rows().clone(),
        };
    }

    pub fn shutdown(&mut self) {
        self.blink.stop();
    }
}

/// Runs the interactive view until the user quits.
pub async fn run(settings: &Settings, open: &[Topic]) -> Result<()> {
    let mut guard = TerminalGuard::enter()?;
    let mut app = App::new(settings);
    let started = Instant::now();
    for &topic in open {
        app.apply(Action::Select(topic), started);
    }

    let mut events = EventStream::new();
    let mut frames = tokio::time::interval(settings.timing.frame());
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut caret = app.blink.subscribe();
    let mut caret_alive = true;

    app.draw(guard.terminal_mut(), Instant::now())?;
    while !app.should_quit() {
        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(event)) => app.handle_event(event, Instant::now()),
                Some(Err(err)) => return Err(err.into()),
                None => break,
            },
            _ = frames.tick(), if app.needs_frames() => {}
            changed = caret.changed(), if caret_alive => caret_alive = changed.is_ok(),
        }
        app.draw(guard.terminal_mut(), Instant::now())?;
    }

    app.shutdown();
    Ok(())
}
