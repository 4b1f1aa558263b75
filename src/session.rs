use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::Settings;
use crate::models::{IdGenerator, Interaction, InteractionId, TimestampIds, Topic};
use crate::utils::max_scroll;

/// Delays and offset for the deferred scroll that follows a menu pick.
#[derive(Debug, Clone, Copy)]
pub struct ScrollTiming {
    pub select_delay: Duration,
    pub clear_delay: Duration,
    /// Rows left visible above a freshly selected block.
    pub offset_rows: usize,
}

impl ScrollTiming {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            select_delay: settings.timing.select_scroll_delay(),
            clear_delay: settings.timing.clear_scroll_delay(),
            offset_rows: settings.layout.scroll_offset_rows,
        }
    }
}

impl Default for ScrollTiming {
    fn default() -> Self {
        Self {
            select_delay: Duration::from_millis(150),
            clear_delay: Duration::from_millis(100),
            offset_rows: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScrollTarget {
    Interaction(InteractionId),
    Top,
}

#[derive(Debug, Clone)]
struct PendingScroll {
    due: Instant,
    target: ScrollTarget,
}

/// Scroll position of the transcript, with an optional smooth-scroll target.
#[derive(Debug, Default, Clone)]
pub struct Viewport {
    offset: usize,
    target: Option<usize>,
}

impl Viewport {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn target(&self) -> Option<usize> {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    /// Starts a smooth scroll towards `row`.
    pub fn scroll_to(&mut self, row: usize) {
        self.target = Some(row);
    }

    pub fn jump_to(&mut self, row: usize) {
        self.offset = row;
        self.target = None;
    }

    /// Manual scrolling cancels any animation in flight.
    pub fn scroll_by(&mut self, delta: isize) {
        self.target = None;
        self.offset = self.offset.saturating_add_signed(delta);
    }

    /// Advances a smooth scroll by a quarter of the remaining distance (at least one row).
    /// Returns true while still moving.
    pub fn step(&mut self) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        let distance = self.offset.abs_diff(target);
        let stride = distance.div_ceil(4).max(1).min(distance);
        if target > self.offset {
            self.offset += stride;
        } else {
            self.offset -= stride;
        }
        if self.offset == target {
            self.target = None;
        }
        self.target.is_some()
    }

    pub fn clamp(&mut self, max_offset: usize) {
        self.offset = self.offset.min(max_offset);
        if let Some(target) = self.target.as_mut() {
            *target = (*target).min(max_offset);
        }
    }
}

/// The stateful transcript: history, current topic, row anchors from the last
/// layout and the scroll they drive.
pub struct SessionView {
    history: Vec<Interaction>,
    current_topic: Option<Topic>,
    anchors: HashMap<InteractionId, usize>,
    pending: Option<PendingScroll>,
    viewport: Viewport,
    timing: ScrollTiming,
    ids: Box<dyn IdGenerator>,
}

impl SessionView {
    pub fn new(timing: ScrollTiming) -> Self {
        Self::with_ids(timing, Box::new(TimestampIds::default()))
    }

    pub fn with_ids(timing: ScrollTiming, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            history: Vec::new(),
            current_topic: None,
            anchors: HashMap::new(),
            pending: None,
            viewport: Viewport::default(),
            timing,
            ids,
        }
    }

    pub fn history(&self) -> &[Interaction] {
        &self.history
    }

    pub fn current_topic(&self) -> Option<Topic> {
        self.current_topic
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn has_pending_scroll(&self) -> bool {
        self.pending.is_some()
    }

    /// Text of the bottom bar prompt, e.g. `main page/femtech >`.
    pub fn status_line(&self) -> String {
        match self.current_topic {
            Some(topic) => format!("main page/{} >", topic.label()),
            None => "main page >".to_string(),
        }
    }

    /// Appends a new interaction and schedules a scroll to it.
    pub fn select_topic(&mut self, topic: Topic, now: Instant) -> &Interaction {
        let id = self.ids.next_id(topic);
        self.pending = Some(PendingScroll {
            due: now + self.timing.select_delay,
            target: ScrollTarget::Interaction(id.clone()),
        });
        self.current_topic = Some(topic);
        self.history.push(Interaction::new(id, topic));
        &self.history[self.history.len() - 1]
    }

    /// Drops the whole transcript and schedules a scroll back to the top.
    pub fn clear(&mut self, now: Instant) {
        self.history.clear();
        self.current_topic = None;
        self.anchors.clear();
        self.pending = Some(PendingScroll {
            due: now + self.timing.clear_delay,
            target: ScrollTarget::Top,
        });
    }

    /// Records where each interaction landed in the latest layout.
    pub fn attach_anchors(&mut self, anchors: &HashMap<InteractionId, usize>) {
        self.anchors.clone_from(anchors);
    }

    /// Resolves a due scroll request into a viewport target. `bottom` is the row
    /// used when the requested interaction has no anchor. Returns the chosen row.
    pub fn settle(&mut self, now: Instant, bottom: usize, total_rows: usize, view_rows: usize) -> Option<usize> {
        let due = self.pending.as_ref().is_some_and(|p| p.due <= now);
        if !due {
            return None;
        }
        let pending = self.pending.take()?;
        let row = match &pending.target {
            ScrollTarget::Top => 0,
            ScrollTarget::Interaction(id) => {
                let anchor = match self.anchors.get(id) {
                    Some(&row) => row,
                    None => {
                        debug!(%id, "no anchor for interaction, scrolling to bottom");
                        bottom
                    }
                };
                anchor.saturating_sub(self.timing.offset_rows)
            }
        };
        let row = row.min(max_scroll(total_rows, view_rows));
        debug!(row, "scroll resolved");
        self.viewport.scroll_to(row);
        Some(row)
    }
}
