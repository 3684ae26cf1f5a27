use gtk4::prelude::*;
use gtk4_layer_shell::{KeyboardMode, LayerShell};
use std::cell::Cell;
use tracing::{debug, info};

/// Ownership token for exclusive input routing. The transitions are kept in
/// a plain state enum so the pairing rules hold independent of the toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GrabState {
    Idle,
    Held,
    Released,
}

impl GrabState {
    fn after_acquire(self) -> Self {
        match self {
            GrabState::Idle => GrabState::Held,
            other => other,
        }
    }

    /// Returns the next state and whether a grab was actually held.
    fn after_release(self) -> (Self, bool) {
        (GrabState::Released, self == GrabState::Held)
    }
}

pub struct GrabController {
    window: gtk4::Window,
    /// Whether the surface is a layer-shell overlay; only then can the
    /// keyboard be routed exclusively to us.
    exclusive_capable: bool,
    state: Cell<GrabState>,
}

impl GrabController {
    pub fn new(window: gtk4::Window, exclusive_capable: bool) -> Self {
        Self {
            window,
            exclusive_capable,
            state: Cell::new(GrabState::Idle),
        }
    }

    /// Best-effort exclusive input acquisition. Re-asserts foreground
    /// presentation and focus immediately before grabbing. Never called
    /// synchronously at construction: the surface must be mapped first.
    pub fn acquire(&self) {
        if self.state.get() != GrabState::Idle {
            return;
        }
        self.window.present();
        self.window.grab_focus();

        if self.exclusive_capable {
            self.window.set_keyboard_mode(KeyboardMode::Exclusive);
            info!("exclusive keyboard mode asserted");
        } else {
            // Grab denied by the platform: outside-click and focus-loss
            // dismissal still apply as the softer path.
            debug!("no layer-shell, running without exclusive grab");
        }
        self.state.set(self.state.get().after_acquire());
    }

    /// Relinquish the grab. Idempotent: safe before any acquire and safe to
    /// call repeatedly from racing dismissal triggers.
    pub fn release(&self) {
        let (next, was_held) = self.state.get().after_release();
        self.state.set(next);
        if !was_held {
            return;
        }
        if self.exclusive_capable {
            self.window.set_keyboard_mode(KeyboardMode::None);
        }
        debug!("input grab released");
    }

    pub fn is_held(&self) -> bool {
        self.state.get() == GrabState::Held
    }
}

#[cfg(test)]
mod tests {
    use super::GrabState;

    #[test]
    fn release_before_acquire_reports_not_held() {
        let (state, was_held) = GrabState::Idle.after_release();
        assert_eq!(state, GrabState::Released);
        assert!(!was_held);
    }

    #[test]
    fn release_twice_only_reports_held_once() {
        let state = GrabState::Idle.after_acquire();
        let (state, first) = state.after_release();
        let (state, second) = state.after_release();
        assert!(first);
        assert!(!second);
        assert_eq!(state, GrabState::Released);
    }

    #[test]
    fn acquire_after_release_does_not_rearm() {
        let (state, _) = GrabState::Idle.after_acquire().after_release();
        assert_eq!(state.after_acquire(), GrabState::Released);
    }
}
