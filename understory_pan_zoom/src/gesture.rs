// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single- vs multi-touch classification with a short commit delay.
//!
//! The first finger of a pinch looks exactly like a pan until the second
//! finger lands. A lone touch therefore starts in
//! [`GestureState::PendingSingle`] and is only committed to
//! [`GestureState::Single`] once it has been held alone for the detection
//! delay. A second touch at any point switches to [`GestureState::Multi`].
//!
//! ```
//! use understory_pan_zoom::gesture::{GestureClassifier, GestureState};
//!
//! let mut g = GestureClassifier::new(0.05);
//! g.touch_began(1, 0.0);
//! assert_eq!(g.state(), GestureState::PendingSingle);
//!
//! // Not yet: 30 ms in.
//! assert!(!g.poll(0.03, 1));
//! // Committed after the delay.
//! assert!(g.poll(0.06, 1));
//! assert_eq!(g.state(), GestureState::Single);
//!
//! g.touch_began(2, 0.07);
//! assert_eq!(g.state(), GestureState::Multi);
//! ```

/// Interaction phase of the touches currently held.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GestureState {
    /// No touches.
    #[default]
    Idle,
    /// One touch, still waiting to see whether a second finger joins.
    PendingSingle,
    /// One touch, committed: its moves are applied.
    Single,
    /// Two touches: pinch and two-finger pan.
    Multi,
}

/// Owns the [`GestureState`] and the pending-single deadline.
#[derive(Clone, Debug)]
pub struct GestureClassifier {
    state: GestureState,
    delay: f64,
    /// Clock value at which a pending single touch commits.
    commit_at: f64,
    /// Whether the current interaction ever reached [`GestureState::Multi`].
    saw_multi: bool,
}

impl GestureClassifier {
    /// Creates an idle classifier with the given commit delay in seconds.
    #[must_use]
    pub fn new(delay: f64) -> Self {
        Self {
            state: GestureState::Idle,
            delay,
            commit_at: 0.0,
            saw_multi: false,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Returns `true` if two touches were held at any point since the last idle.
    #[must_use]
    pub fn saw_multi(&self) -> bool {
        self.saw_multi
    }

    /// Changes the commit delay. An already pending touch keeps its deadline.
    pub fn set_delay(&mut self, delay: f64) {
        self.delay = delay;
    }

    /// Accounts for a tracked touch-down; `count` includes the new touch.
    pub fn touch_began(&mut self, count: usize, now: f64) -> GestureState {
        let next = match count {
            0 => GestureState::Idle,
            1 => {
                self.saw_multi = false;
                self.commit_at = now + self.delay;
                GestureState::PendingSingle
            }
            _ => {
                self.saw_multi = true;
                GestureState::Multi
            }
        };
        self.transition(next)
    }

    /// Accounts for a tracked touch-up; `count` is what remains.
    ///
    /// Leaving two touches for one goes straight to [`GestureState::Single`]:
    /// the remaining finger is already known not to be the start of a pinch.
    pub fn touch_ended(&mut self, count: usize) -> GestureState {
        let next = match (self.state, count) {
            (_, 0) => GestureState::Idle,
            (GestureState::Multi, 1) => GestureState::Single,
            (state, _) => state,
        };
        self.transition(next)
    }

    /// Commits a pending single touch whose deadline has passed.
    ///
    /// Returns `true` on the call that performs the commit. Once a second
    /// touch has arrived the state is no longer pending and this does nothing.
    pub fn poll(&mut self, now: f64, count: usize) -> bool {
        if self.state == GestureState::PendingSingle && count == 1 && now >= self.commit_at {
            self.transition(GestureState::Single);
            true
        } else {
            false
        }
    }

    fn transition(&mut self, next: GestureState) -> GestureState {
        if next != self.state {
            log::debug!("gesture {:?} -> {:?}", self.state, next);
            self.state = next;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::{GestureClassifier, GestureState};

    #[test]
    fn lone_touch_waits_for_the_delay() {
        let mut g = GestureClassifier::new(0.05);
        assert_eq!(g.touch_began(1, 1.0), GestureState::PendingSingle);
        assert!(!g.poll(1.049, 1));
        assert_eq!(g.state(), GestureState::PendingSingle);
        assert!(g.poll(1.051, 1));
        assert_eq!(g.state(), GestureState::Single);
        // Only the committing call reports it.
        assert!(!g.poll(2.0, 1));
    }

    #[test]
    fn second_touch_cancels_pending_commit() {
        let mut g = GestureClassifier::new(0.05);
        g.touch_began(1, 0.0);
        assert_eq!(g.touch_began(2, 0.01), GestureState::Multi);
        assert!(!g.poll(1.0, 2));
        assert_eq!(g.state(), GestureState::Multi);
        assert!(g.saw_multi());
    }

    #[test]
    fn committed_single_still_upgrades_to_multi() {
        let mut g = GestureClassifier::new(0.0);
        g.touch_began(1, 0.0);
        assert!(g.poll(0.0, 1));
        assert_eq!(g.touch_began(2, 0.5), GestureState::Multi);
    }

    #[test]
    fn multi_to_one_goes_single_then_idle() {
        let mut g = GestureClassifier::new(0.05);
        g.touch_began(1, 0.0);
        g.touch_began(2, 0.0);
        assert_eq!(g.touch_ended(1), GestureState::Single);
        assert!(g.saw_multi());
        assert_eq!(g.touch_ended(0), GestureState::Idle);
    }

    #[test]
    fn release_while_pending_goes_idle() {
        let mut g = GestureClassifier::new(0.05);
        g.touch_began(1, 0.0);
        assert_eq!(g.touch_ended(0), GestureState::Idle);
        assert!(!g.poll(1.0, 0));
    }

    #[test]
    fn fresh_interaction_clears_multi_flag() {
        let mut g = GestureClassifier::new(0.05);
        g.touch_began(1, 0.0);
        g.touch_began(2, 0.0);
        g.touch_ended(1);
        g.touch_ended(0);
        g.touch_began(1, 1.0);
        assert!(!g.saw_multi());
    }
}
