//! Phase controller.
//!
//! Holds the active phase and the moment it began. Phases form a cycle in
//! registry order, and any phase can also be selected directly. There is no
//! terminal state.
//!
//! Listeners registered with [`PhaseController::add_listener`] are notified
//! synchronously on every transition; the audio engine is the usual one.

use crate::phase::{Phase, PhaseId};
use log::{info, warn};

/// Something that reacts to phase transitions.
pub trait PhaseListener: Send {
    /// Called after the controller has switched to `phase`.
    fn on_phase_change(&mut self, phase: PhaseId);
}

/// The phase state machine.
pub struct PhaseController {
    current: PhaseId,
    started_at: f64,
    transitions: u64,
    listeners: Vec<Box<dyn PhaseListener>>,
}

impl PhaseController {
    /// Start in `initial` at time `now` (seconds).
    ///
    /// Listeners added later are not told about the initial phase; use
    /// [`add_listener`](Self::add_listener), which does.
    pub fn new(initial: PhaseId, now: f64) -> Self {
        Self {
            current: initial,
            started_at: now,
            transitions: 0,
            listeners: Vec::new(),
        }
    }

    /// Register a listener and bring it up to date with the current phase.
    pub fn add_listener<L: PhaseListener + 'static>(&mut self, mut listener: L) {
        listener.on_phase_change(self.current);
        self.listeners.push(Box::new(listener));
    }

    /// The active phase.
    #[inline]
    pub fn current(&self) -> PhaseId {
        self.current
    }

    /// Registry entry for the active phase.
    #[inline]
    pub fn phase(&self) -> &'static Phase {
        Phase::by_id(self.current)
    }

    /// When the active phase began.
    #[inline]
    pub fn started_at(&self) -> f64 {
        self.started_at
    }

    /// Number of transitions since construction.
    #[inline]
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Seconds spent in the active phase. Never negative.
    #[inline]
    pub fn elapsed(&self, now: f64) -> f64 {
        (now - self.started_at).max(0.0)
    }

    /// Switch to `phase`, restarting its clock, and notify listeners.
    ///
    /// Selecting the phase that is already active restarts it too.
    /// Returns the phase that was active before.
    pub fn transition_to(&mut self, phase: PhaseId, now: f64) -> PhaseId {
        let previous = self.current;
        self.current = phase;
        self.started_at = now;
        self.transitions += 1;
        info!("phase {} -> {} at {:.3}s", previous, phase, now);

        for listener in &mut self.listeners {
            listener.on_phase_change(phase);
        }
        previous
    }

    /// Switch to the phase named by `id`. Unknown ids are ignored.
    pub fn transition_to_raw(&mut self, id: &str, now: f64) -> Option<PhaseId> {
        match id.parse::<PhaseId>() {
            Ok(phase) => Some(self.transition_to(phase, now)),
            Err(e) => {
                warn!("{}; staying in {}", e, self.current);
                None
            }
        }
    }

    /// Follow the cyclic edge to the next phase.
    pub fn advance(&mut self, now: f64) -> PhaseId {
        self.transition_to(self.current.next(), now)
    }
}

impl std::fmt::Debug for PhaseController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseController")
            .field("current", &self.current)
            .field("started_at", &self.started_at)
            .field("transitions", &self.transitions)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<PhaseId>>>);

    impl PhaseListener for Recorder {
        fn on_phase_change(&mut self, phase: PhaseId) {
            self.0.lock().unwrap().push(phase);
        }
    }

    #[test]
    fn test_elapsed_resets_on_transition() {
        let mut controller = PhaseController::new(PhaseId::Singularity, 0.0);
        assert!((controller.elapsed(9.5) - 9.5).abs() < 1e-9);

        controller.transition_to(PhaseId::Inflation, 10.0);
        assert!((controller.elapsed(10.001) - 0.001).abs() < 1e-9);
        assert_eq!(controller.started_at(), 10.0);
    }

    #[test]
    fn test_elapsed_never_negative() {
        let controller = PhaseController::new(PhaseId::Singularity, 5.0);
        assert_eq!(controller.elapsed(4.0), 0.0);
    }

    #[test]
    fn test_elapsed_monotonic_within_phase() {
        let controller = PhaseController::new(PhaseId::GalaxyFormation, 1.0);
        let mut last = 0.0;
        for i in 0..100 {
            let e = controller.elapsed(1.0 + i as f64 * 0.016);
            assert!(e >= last);
            last = e;
        }
    }

    #[test]
    fn test_advance_cycles() {
        let mut controller = PhaseController::new(PhaseId::SolarSystem, 0.0);
        let previous = controller.advance(1.0);
        assert_eq!(previous, PhaseId::SolarSystem);
        assert_eq!(controller.current(), PhaseId::Singularity);
        assert_eq!(controller.transitions(), 1);
    }

    #[test]
    fn test_listeners_notified_synchronously() {
        let recorder = Recorder::default();
        let mut controller = PhaseController::new(PhaseId::Singularity, 0.0);
        controller.add_listener(recorder.clone());
        controller.transition_to(PhaseId::GalaxyFormation, 2.0);
        controller.advance(3.0);

        let seen = recorder.0.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![PhaseId::Singularity, PhaseId::GalaxyFormation, PhaseId::SolarSystem]
        );
    }

    #[test]
    fn test_unknown_raw_id_is_noop() {
        let recorder = Recorder::default();
        let mut controller = PhaseController::new(PhaseId::Inflation, 0.0);
        controller.add_listener(recorder.clone());

        assert_eq!(controller.transition_to_raw("HEAT_DEATH", 4.0), None);
        assert_eq!(controller.current(), PhaseId::Inflation);
        assert_eq!(controller.started_at(), 0.0);
        assert_eq!(recorder.0.lock().unwrap().len(), 1);

        assert_eq!(controller.transition_to_raw("QGP", 5.0), Some(PhaseId::Inflation));
        assert_eq!(controller.current(), PhaseId::QuarkGluonPlasma);
    }
}
