#![forbid(unsafe_code)]

//! Step-based session runner for the wordslide browser.
//!
//! [`WebSession`] owns the word list lifecycle and drives a
//! [`Browser`] without threads or blocking. The host (JavaScript) controls
//! the loop:
//!
//! 1. Feed measurements via [`WebSession::measurer_mut`] once fonts are
//!    ready.
//! 2. Hand over the word-list response via [`WebSession::load_response`]
//!    (or report [`WebSession::load_failure`]).
//! 3. Push events via [`WebSession::push_event`] and advance time via
//!    [`WebSession::advance_time`].
//! 4. Call [`WebSession::step`] to process the batch and fire due timers.
//! 5. Replay [`WebSession::take_outputs`] onto the DOM.
//!
//! # Example
//!
//! ```ignore
//! use core::time::Duration;
//! use wordslide_core::event::Event;
//! use wordslide_web::WebSession;
//!
//! let mut session = WebSession::new(BrowserConfig::default(), geometry);
//! session.measurer_mut().set_item_height(24.0);
//! session.load_response(200, &body)?;
//!
//! // Host-driven frame loop
//! session.push_event(Event::AnimationFrame);
//! session.advance_time(Duration::from_millis(16));
//! let result = session.step();
//! let outputs = session.take_outputs();
//! ```

use core::time::Duration;

use wordslide_core::event::{Event, ResizeEvent};
use wordslide_widgets::{Browser, BrowserConfig};

use crate::word_source::{LoadError, decode_word_list};
use crate::{
    DeterministicClock, EventQueue, HostMeasurer, TARGET_SESSION, WebError, WebOutputs,
    WebSurface,
};

/// Result of a single [`WebSession::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether a word list is loaded and the browser is live.
    pub loaded: bool,
    /// Number of events drained during this step.
    pub events_processed: u32,
    /// Number of timer deadlines that fired during this step.
    pub timers_fired: u32,
    /// Step index (monotonically increasing).
    pub step_idx: u64,
}

/// Where the word list stands.
#[derive(Debug)]
enum LoadState {
    /// Waiting for the host to deliver the response.
    Pending { measurer: HostMeasurer },
    /// The browser is live.
    Loaded(Box<Browser<HostMeasurer>>),
    /// The one load attempt failed; the session stays inert.
    Failed { measurer: HostMeasurer },
}

/// Host-driven, non-blocking browser session.
///
/// Before a word list is loaded the session is inert: queued events are
/// drained and dropped, except that resize geometry is remembered so the
/// browser starts at the right size. A session loads at most once; a failed
/// load is not retried.
#[derive(Debug)]
pub struct WebSession {
    config: BrowserConfig,
    geometry: ResizeEvent,
    state: LoadState,
    clock: DeterministicClock,
    events: EventQueue,
    surface: WebSurface,
    step_idx: u64,
}

impl WebSession {
    /// Create a session for the given configuration and initial geometry.
    #[must_use]
    pub fn new(config: BrowserConfig, geometry: ResizeEvent) -> Self {
        Self {
            config,
            geometry,
            state: LoadState::Pending {
                measurer: HostMeasurer::new(),
            },
            clock: DeterministicClock::new(),
            events: EventQueue::new(),
            surface: WebSurface::new(),
            step_idx: 0,
        }
    }

    /// Create a session from a JSON configuration blob.
    ///
    /// Missing keys take their defaults.
    pub fn from_json_config(json: &str, geometry: ResizeEvent) -> Result<Self, WebError> {
        let config: BrowserConfig = serde_json::from_str(json).map_err(WebError::Config)?;
        Ok(Self::new(config, geometry))
    }

    /// Deliver the word-list response.
    ///
    /// Returns `Ok(true)` when the browser was built, `Ok(false)` when the
    /// session already loaded (or failed) and the response was ignored.
    pub fn load_response(&mut self, status: u16, body: &str) -> Result<bool, LoadError> {
        if !self.is_pending() {
            tracing::warn!(target: TARGET_SESSION, status, "word list already settled; ignoring response");
            return Ok(false);
        }
        match decode_word_list(status, body) {
            Ok(words) => {
                self.install(words);
                Ok(true)
            }
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    /// Report that the request never produced a response.
    pub fn load_failure(&mut self, reason: &str) {
        if !self.is_pending() {
            tracing::warn!(target: TARGET_SESSION, reason, "word list already settled; ignoring failure");
            return;
        }
        self.fail(&LoadError::Transport(reason.to_owned()));
    }

    /// Push a canonical event into the queue.
    ///
    /// Events are processed on the next [`step`](Self::step) call.
    pub fn push_event(&mut self, event: Event) {
        // Track geometry immediately so a load between steps uses it.
        if let Event::Resize(geometry) = &event {
            self.geometry = *geometry;
        }
        self.events.push_event(event);
    }

    /// Advance the deterministic clock by `dt`.
    pub fn advance_time(&mut self, dt: Duration) {
        self.clock.advance(dt);
    }

    /// Set the deterministic clock to an absolute time.
    pub fn set_time(&mut self, now: Duration) {
        self.clock.set(now);
    }

    /// Process all pending events, then fire the timer if it is due.
    pub fn step(&mut self) -> StepResult {
        let now = self.clock.now();
        let mut events_processed: u32 = 0;
        let mut timers_fired: u32 = 0;

        match &mut self.state {
            LoadState::Loaded(browser) => {
                for event in self.events.drain_events() {
                    events_processed += 1;
                    browser.handle_event(event, now, &mut self.surface);
                }
                if browser.next_deadline().is_some_and(|deadline| deadline <= now) {
                    timers_fired += 1;
                    browser.handle_event(Event::Tick, now, &mut self.surface);
                }
            }
            LoadState::Pending { .. } | LoadState::Failed { .. } => {
                events_processed = self.events.drain_events().count() as u32;
            }
        }

        self.step_idx += 1;
        StepResult {
            loaded: self.is_loaded(),
            events_processed,
            timers_fired,
            step_idx: self.step_idx,
        }
    }

    /// Move `delta` pages forward or back. No-op before load.
    pub fn step_pages(&mut self, delta: isize) {
        if let LoadState::Loaded(browser) = &mut self.state {
            browser.step_pages(delta, &mut self.surface);
        }
    }

    /// Jump to the first page holding `letter`.
    ///
    /// Returns `false` before load or when no word starts with `letter`.
    pub fn jump_to_letter(&mut self, letter: char) -> bool {
        match &mut self.state {
            LoadState::Loaded(browser) => browser.jump_to_letter(letter, &mut self.surface),
            _ => false,
        }
    }

    /// Re-read measurements after the host fed new ones (webfont swap).
    pub fn remeasure(&mut self) {
        if let LoadState::Loaded(browser) = &mut self.state {
            browser.remeasure(&mut self.surface);
        }
    }

    /// Take the captured outputs (surface ops, logs), leaving empty defaults.
    pub fn take_outputs(&mut self) -> WebOutputs {
        self.surface.take_outputs()
    }

    /// Read the captured outputs without consuming them.
    pub fn outputs(&self) -> &WebOutputs {
        self.surface.outputs()
    }

    /// The live browser, once loaded.
    pub fn browser(&self) -> Option<&Browser<HostMeasurer>> {
        match &self.state {
            LoadState::Loaded(browser) => Some(&**browser),
            _ => None,
        }
    }

    /// The measurer the host feeds, before and after load.
    pub fn measurer_mut(&mut self) -> &mut HostMeasurer {
        match &mut self.state {
            LoadState::Pending { measurer } | LoadState::Failed { measurer } => measurer,
            LoadState::Loaded(browser) => browser.measurer_mut(),
        }
    }

    /// Whether the browser is live.
    pub fn is_loaded(&self) -> bool {
        matches!(self.state, LoadState::Loaded(_))
    }

    /// Whether the load attempt failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.state, LoadState::Failed { .. })
    }

    /// Latest geometry reported by the host.
    pub fn geometry(&self) -> ResizeEvent {
        self.geometry
    }

    /// Current step index.
    pub fn step_idx(&self) -> u64 {
        self.step_idx
    }

    /// Current deterministic time.
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    // --- Private helpers ---

    fn is_pending(&self) -> bool {
        matches!(self.state, LoadState::Pending { .. })
    }

    fn take_measurer(&mut self) -> HostMeasurer {
        match &mut self.state {
            LoadState::Pending { measurer } | LoadState::Failed { measurer } => {
                std::mem::take(measurer)
            }
            LoadState::Loaded(_) => HostMeasurer::new(),
        }
    }

    fn install(&mut self, words: Vec<String>) {
        let count = words.len();
        let measurer = self.take_measurer();
        let browser = Browser::new(
            words,
            self.config.clone(),
            measurer,
            self.geometry,
            &mut self.surface,
        );
        tracing::info!(
            target: TARGET_SESSION,
            words = count,
            total_pages = browser.total_pages(),
            "word list loaded"
        );
        self.surface.write_log(&format!("loaded {count} words"));
        self.state = LoadState::Loaded(Box::new(browser));
    }

    fn fail(&mut self, err: &LoadError) {
        tracing::error!(target: TARGET_SESSION, error = %err, "word list load failed");
        self.surface.write_log(&format!("error: {err}"));
        let measurer = self.take_measurer();
        self.state = LoadState::Failed { measurer };
    }
}
