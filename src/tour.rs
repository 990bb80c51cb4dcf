//! Automatic phase tour.
//!
//! The tour is not part of the phase state machine; it is a small scheduler
//! that calls [`PhaseController::advance`] once a phase has run for its
//! nominal duration. A manual phase selection should [`stop`](Tour::stop) it.

use crate::controller::PhaseController;
use crate::phase::PhaseId;
use log::info;

/// Looping cinematic tour over all phases.
#[derive(Debug, Clone, Default)]
pub struct Tour {
    active: bool,
}

impl Tour {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the tour is currently driving transitions.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Engage the tour. It restarts on the phase right after the first one,
    /// since the first phase is what the viewer sees before any tour begins.
    pub fn start(&mut self, controller: &mut PhaseController, now: f64) {
        self.active = true;
        let opening = PhaseId::order()[0].next();
        info!("tour started at {}", opening);
        controller.transition_to(opening, now);
    }

    /// Disengage the tour, leaving the controller parked where it is.
    pub fn stop(&mut self) {
        if self.active {
            info!("tour stopped");
        }
        self.active = false;
    }

    /// Toggle between [`start`](Self::start) and [`stop`](Self::stop).
    pub fn toggle(&mut self, controller: &mut PhaseController, now: f64) {
        if self.active {
            self.stop();
        } else {
            self.start(controller, now);
        }
    }

    /// Advance the controller if the active phase has outstayed its nominal
    /// duration. Returns the phase switched to, if any.
    pub fn poll(&mut self, controller: &mut PhaseController, now: f64) -> Option<PhaseId> {
        if !self.active {
            return None;
        }
        let duration = controller.phase().nominal_duration.as_secs_f64();
        if controller.elapsed(now) >= duration {
            controller.advance(now);
            Some(controller.current())
        } else {
            None
        }
    }
}
