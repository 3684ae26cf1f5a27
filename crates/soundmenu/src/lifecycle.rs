use crate::grab::GrabController;
use gtk4::glib;
use gtk4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info};

/// Delay between the map signal and the grab attempt: the surface must be
/// visible to the compositor before input can be routed to it.
const GRAB_DELAY_MS: u64 = 50;
/// Focus-loss debounce, filtering the transient focus-out the grab
/// acquisition itself can fire.
const FOCUS_DEBOUNCE_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Opening,
    Interactive,
    Closing,
    Closed,
}

/// Phase transitions, separated out so the exactly-once Closing entry is a
/// plain state rule rather than a property of the widget tree.
pub struct PhaseTracker {
    phase: Cell<Phase>,
}

impl PhaseTracker {
    pub fn new() -> Self {
        Self {
            phase: Cell::new(Phase::Opening),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub fn mark_interactive(&self) -> bool {
        if self.phase.get() == Phase::Opening {
            self.phase.set(Phase::Interactive);
            true
        } else {
            false
        }
    }

    /// First dismissal trigger wins; everything later is a no-op.
    pub fn begin_close(&self) -> bool {
        match self.phase.get() {
            Phase::Opening | Phase::Interactive => {
                self.phase.set(Phase::Closing);
                true
            }
            Phase::Closing | Phase::Closed => false,
        }
    }

    pub fn mark_closed(&self) {
        self.phase.set(Phase::Closed);
    }
}

/// Orchestrates show → grab → interact → dispatch → release → close. Owns
/// the grab controller so release can only happen through the close path,
/// and tracks pending one-shot timers so closing cancels them.
pub struct Lifecycle {
    window: gtk4::Window,
    grab: GrabController,
    tracker: PhaseTracker,
    timers: RefCell<Vec<Rc<Cell<Option<glib::SourceId>>>>>,
}

impl Lifecycle {
    pub fn new(window: gtk4::Window, grab: GrabController) -> Rc<Self> {
        Rc::new(Self {
            window,
            grab,
            tracker: PhaseTracker::new(),
            timers: RefCell::new(Vec::new()),
        })
    }

    /// Schedule the deferred grab acquisition. Call after the map signal.
    pub fn schedule_grab(self: &Rc<Self>) {
        self.schedule(Duration::from_millis(GRAB_DELAY_MS), |lc| {
            if lc.tracker.phase() != Phase::Opening {
                return;
            }
            lc.grab.acquire();
            lc.tracker.mark_interactive();
            debug!(exclusive = lc.grab.is_held(), "menu interactive");
        });
    }

    /// Debounced focus-loss dismissal. Only armed while interactive, so the
    /// focus shuffle during grab acquisition cannot tear the menu down.
    pub fn schedule_focus_close(self: &Rc<Self>) {
        if self.tracker.phase() != Phase::Interactive {
            return;
        }
        self.schedule(Duration::from_millis(FOCUS_DEBOUNCE_MS), |lc| {
            lc.close("focus lost");
        });
    }

    /// Enter Closing exactly once: cancel pending timers, release the grab,
    /// tear the surface down. Every dismissal path funnels through here.
    pub fn close(&self, reason: &str) {
        if !self.tracker.begin_close() {
            debug!(reason, "close requested while already closing");
            return;
        }
        info!(reason, "closing menu");

        for slot in self.timers.borrow_mut().drain(..) {
            if let Some(id) = slot.take() {
                id.remove();
            }
        }

        self.grab.release();
        self.window.close();
        self.tracker.mark_closed();
    }

    /// One-shot timer whose handle is cleared when it fires, so a later
    /// cancellation pass never removes a dead source.
    fn schedule(self: &Rc<Self>, delay: Duration, callback: impl FnOnce(Rc<Self>) + 'static) {
        let slot: Rc<Cell<Option<glib::SourceId>>> = Rc::new(Cell::new(None));
        let lifecycle = Rc::clone(self);
        let fired = Rc::clone(&slot);
        let id = glib::timeout_add_local_once(delay, move || {
            fired.set(None);
            callback(lifecycle);
        });
        slot.set(Some(id));
        self.timers.borrow_mut().push(slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_in_opening_phase() {
        let tracker = PhaseTracker::new();
        assert_eq!(tracker.phase(), Phase::Opening);
    }

    #[test]
    fn interactive_is_only_entered_from_opening() {
        let tracker = PhaseTracker::new();
        assert!(tracker.mark_interactive());
        assert!(!tracker.mark_interactive());
        assert_eq!(tracker.phase(), Phase::Interactive);
    }

    #[test]
    fn first_close_trigger_wins() {
        let tracker = PhaseTracker::new();
        tracker.mark_interactive();
        assert!(tracker.begin_close());
        // A racing second trigger (e.g. Escape plus the focus timer) no-ops.
        assert!(!tracker.begin_close());
        assert_eq!(tracker.phase(), Phase::Closing);
    }

    #[test]
    fn close_can_start_before_interactive() {
        let tracker = PhaseTracker::new();
        assert!(tracker.begin_close());
        assert!(!tracker.mark_interactive());
    }

    #[test]
    fn closed_is_terminal() {
        let tracker = PhaseTracker::new();
        tracker.begin_close();
        tracker.mark_closed();
        assert!(!tracker.begin_close());
        assert!(!tracker.mark_interactive());
        assert_eq!(tracker.phase(), Phase::Closed);
    }
}
