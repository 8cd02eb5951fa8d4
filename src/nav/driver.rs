//! Event loop that applies navigation events to a shared document.
//!
//! Clicks are applied as they arrive. Scroll events are coalesced: only the
//! latest offset is kept, and the scroll spy runs at most once per frame.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::{Layout, Navigation};
use crate::dom::Document;

/// Default frame interval (about 60 frames per second).
pub const DEFAULT_FRAME: Duration = Duration::from_millis(16);

/// Shortest accepted frame; a zero interval is not a valid tick period.
pub const MIN_FRAME: Duration = Duration::from_millis(1);

/// Input events for the navigation driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavEvent {
    ToggleClicked,
    Scrolled(f64),
}

/// Counters reported when the driver stops.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavStats {
    pub toggles: u64,
    pub scroll_events: u64,
    /// Scroll spy evaluations actually performed.
    pub recomputes: u64,
    /// Section matched by the most recent evaluation that found one.
    pub last_active: Option<String>,
}

/// Sending side of a running driver. The driver stops once every handle is
/// dropped.
#[derive(Debug, Clone)]
pub struct NavHandle {
    tx: mpsc::UnboundedSender<NavEvent>,
}

impl NavHandle {
    /// Returns false if the driver has already stopped.
    pub fn send(&self, event: NavEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn click_toggle(&self) -> bool {
        self.send(NavEvent::ToggleClicked)
    }

    pub fn scroll(&self, scroll_y: f64) -> bool {
        self.send(NavEvent::Scrolled(scroll_y))
    }
}

/// Spawn the driver on the current tokio runtime. Frames shorter than
/// [`MIN_FRAME`] are raised to it.
pub fn spawn(
    navigation: Navigation,
    document: Arc<Mutex<Document>>,
    layout: Layout,
    frame: Duration,
) -> (NavHandle, JoinHandle<NavStats>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let frame = frame.max(MIN_FRAME);
    let task = tokio::spawn(run(navigation, document, layout, frame, rx));
    (NavHandle { tx }, task)
}

async fn run(
    navigation: Navigation,
    document: Arc<Mutex<Document>>,
    layout: Layout,
    frame: Duration,
    mut rx: mpsc::UnboundedReceiver<NavEvent>,
) -> NavStats {
    let mut ticker = tokio::time::interval(frame);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut stats = NavStats::default();
    let mut pending: Option<f64> = None;

    loop {
        tokio::select! {
            biased;

            event = rx.recv() => match event {
                Some(NavEvent::ToggleClicked) => {
                    let mut doc = document.lock().await;
                    navigation.toggle_menu(&mut doc);
                    stats.toggles += 1;
                }
                Some(NavEvent::Scrolled(scroll_y)) => {
                    stats.scroll_events += 1;
                    pending = Some(scroll_y);
                }
                None => break,
            },

            _ = ticker.tick(), if pending.is_some() => {
                if let Some(scroll_y) = pending.take() {
                    apply_scroll(&navigation, &document, &layout, scroll_y, &mut stats).await;
                }
            }
        }
    }

    if let Some(scroll_y) = pending.take() {
        apply_scroll(&navigation, &document, &layout, scroll_y, &mut stats).await;
    }

    debug!(
        toggles = stats.toggles,
        scroll_events = stats.scroll_events,
        recomputes = stats.recomputes,
        "Navigation driver stopped"
    );
    stats
}

async fn apply_scroll(
    navigation: &Navigation,
    document: &Mutex<Document>,
    layout: &Layout,
    scroll_y: f64,
    stats: &mut NavStats,
) {
    let mut doc = document.lock().await;
    stats.recomputes += 1;
    if let Some(id) = navigation.on_scroll(&mut doc, layout, scroll_y) {
        stats.last_active = Some(id);
    }
}
