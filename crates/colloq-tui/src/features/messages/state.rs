//! Transcript state: the message list and the scroll physics around it.

use colloq_core::message::Message;

use crate::mutations::MessagesMutation;

/// Where the transcript window sits relative to the content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollMode {
    /// The window stays pinned to the newest line as content grows.
    #[default]
    Follow,
    /// The user scrolled away; the window starts at this line from the top.
    Anchored { line: usize },
}

/// Scroll position over wrapped transcript lines.
///
/// `total_lines` is whatever the last layout pass measured; every offset the
/// state hands out is clamped against it, so a stale anchor after a resize
/// still lands inside the content.
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    pub mode: ScrollMode,
    pub total_lines: usize,
}

impl ScrollState {
    pub fn is_following(&self) -> bool {
        self.mode == ScrollMode::Follow
    }

    /// First visible line for a viewport of the given height.
    pub fn offset(&self, viewport: usize) -> usize {
        let limit = self.total_lines.saturating_sub(viewport);
        match self.mode {
            ScrollMode::Follow => limit,
            ScrollMode::Anchored { line } => line.min(limit),
        }
    }

    /// Moves the window up, leaving follow mode if it was active.
    pub fn scroll_up(&mut self, lines: usize, viewport: usize) {
        let line = self.offset(viewport).saturating_sub(lines);
        self.mode = ScrollMode::Anchored { line };
    }

    /// Moves the window down, reattaching to the bottom when it gets there.
    pub fn scroll_down(&mut self, lines: usize, viewport: usize) {
        let ScrollMode::Anchored { line } = self.mode else {
            return;
        };

        let limit = self.total_lines.saturating_sub(viewport);
        let target = line.min(limit).saturating_add(lines);
        self.mode = if target >= limit {
            ScrollMode::Follow
        } else {
            ScrollMode::Anchored { line: target }
        };
    }

    pub fn scroll_to_top(&mut self) {
        self.mode = ScrollMode::Anchored { line: 0 };
    }

    pub fn scroll_to_bottom(&mut self) {
        self.mode = ScrollMode::Follow;
    }

    pub fn page_up(&mut self, viewport: usize) {
        let page = viewport.max(1);
        self.scroll_up(page, viewport);
    }

    pub fn page_down(&mut self, viewport: usize) {
        let page = viewport.max(1);
        self.scroll_down(page, viewport);
    }

    /// Records the wrapped line total from the latest layout pass.
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
    }
}

/// Coalesces mouse wheel deltas into one scroll step per frame.
///
/// Trackpads fire wheel events in bursts; summing them per frame keeps the
/// transcript from jumping. The step starts at a single line and widens as a
/// same-direction streak gets longer. Positive deltas mean down.
#[derive(Debug, Clone, Default)]
pub struct WheelAccumulator {
    /// Sum of deltas seen since the last `take`.
    pending: i32,
    /// Consecutive frames scrolled in the same direction.
    streak: u8,
    /// Sign of the previous frame's scroll, zero when idle.
    direction: i8,
}

impl WheelAccumulator {
    /// Adds one wheel event's delta to the current frame.
    pub fn add(&mut self, delta: i32) {
        self.pending += delta;
    }

    /// Takes this frame's delta and turns it into a line count to scroll.
    ///
    /// An idle frame or a direction change resets the streak, dropping the
    /// step back to one line.
    pub fn take(&mut self) -> i32 {
        let delta = std::mem::take(&mut self.pending);
        if delta == 0 {
            self.streak = 0;
            self.direction = 0;
            return 0;
        }

        let direction = delta.signum() as i8;
        if direction == self.direction {
            self.streak = self.streak.saturating_add(1);
        } else {
            self.streak = 1;
            self.direction = direction;
        }

        // The first two frames of a streak scroll one line; after that the
        // step grows with the streak's bit length.
        let streak = u32::from(self.streak.saturating_sub(1).max(1));
        let step = (1 + streak.ilog2()).min(delta.unsigned_abs());

        step as i32 * i32::from(direction)
    }
}

/// State behind the transcript pane.
#[derive(Debug)]
pub struct MessagesState {
    /// Conversation so far; private so every append goes through [`push`].
    ///
    /// [`push`]: MessagesState::push
    messages: Vec<Message>,

    pub scroll: ScrollState,

    pub wheel: WheelAccumulator,

    /// Transcript viewport measured by the last frame, in columns and rows.
    pub viewport_width: usize,
    pub viewport_height: usize,

    /// Set when the wrapped line count no longer matches the messages.
    line_count_stale: bool,
}

impl Default for MessagesState {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            scroll: ScrollState::default(),
            wheel: WheelAccumulator::default(),
            viewport_width: 80,
            viewport_height: 20,
            line_count_stale: true,
        }
    }
}

impl MessagesState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Appends a message and schedules a line recount.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.line_count_stale = true;
    }

    /// Applies a cross-slice messages mutation.
    pub fn apply(&mut self, mutation: MessagesMutation) {
        match mutation {
            MessagesMutation::Append(message) => self.push(message),
            MessagesMutation::ScrollToTop => self.scroll_to_top(),
            MessagesMutation::ScrollToBottom => self.scroll_to_bottom(),
            MessagesMutation::PageUp => self.page_up(),
            MessagesMutation::PageDown => self.page_down(),
        }
    }

    /// Updates viewport dimensions; a width change invalidates the wrap.
    pub fn update_layout(&mut self, width: usize, height: usize) {
        if width != self.viewport_width {
            self.line_count_stale = true;
        }
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Returns true if the cached line count needs recomputing.
    pub fn needs_line_count(&self) -> bool {
        self.line_count_stale
    }

    /// Stores a freshly computed total line count.
    pub fn set_line_count(&mut self, total: usize) {
        self.scroll.set_total_lines(total);
        self.line_count_stale = false;
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll.scroll_up(lines, self.viewport_height);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll.scroll_down(lines, self.viewport_height);
    }

    pub fn page_up(&mut self) {
        self.scroll.page_up(self.viewport_height);
    }

    pub fn page_down(&mut self) {
        self.scroll.page_down(self.viewport_height);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll.scroll_to_top();
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll.scroll_to_bottom();
    }
}
