//! Phase registry.
//!
//! The five cosmological epochs the simulation can show, in tour order.
//! Each phase carries display metadata for the UI and a nominal duration
//! used by the [`Tour`](crate::tour::Tour) scheduler.
//!
//! ```ignore
//! let phase = Phase::by_id(PhaseId::Inflation);
//! println!("{}: {}", phase.label, phase.description);
//! assert_eq!(PhaseId::SolarSystem.next(), PhaseId::Singularity);
//! ```

use crate::error::UnknownPhase;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Identifier of a cosmological phase.
///
/// Serialized with the short upper-case ids used by UI collaborators
/// (`"BIG_BANG"`, `"QGP"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PhaseId {
    /// T=0, a pulsing point of infinite density.
    #[default]
    #[serde(rename = "BIG_BANG", alias = "singularity")]
    Singularity,
    /// The hot primordial soup.
    #[serde(rename = "QGP", alias = "quark_gluon_plasma")]
    QuarkGluonPlasma,
    /// Space expanding into a shell.
    #[serde(rename = "INFLATION", alias = "inflation")]
    Inflation,
    /// Matter pulled into spiral arms.
    #[serde(rename = "GALAXY", alias = "galaxy_formation")]
    GalaxyFormation,
    /// A star with an orbiting disk.
    #[serde(rename = "SOLAR_SYSTEM", alias = "solar_system")]
    SolarSystem,
}

const ORDER: [PhaseId; 5] = [
    PhaseId::Singularity,
    PhaseId::QuarkGluonPlasma,
    PhaseId::Inflation,
    PhaseId::GalaxyFormation,
    PhaseId::SolarSystem,
];

impl PhaseId {
    /// Number of registered phases.
    pub const COUNT: usize = ORDER.len();

    /// All phases in tour order. The order is cyclic: the first phase follows the last.
    #[inline]
    pub fn order() -> &'static [PhaseId] {
        &ORDER
    }

    /// Position of this phase in tour order.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Phase at `index` in tour order, or `None` for an out-of-range index.
    pub fn from_index(index: usize) -> Option<PhaseId> {
        ORDER.get(index).copied()
    }

    /// The phase that follows this one, wrapping after the last.
    pub fn next(self) -> PhaseId {
        ORDER[(self.index() + 1) % Self::COUNT]
    }

    /// The phase that precedes this one, wrapping before the first.
    pub fn previous(self) -> PhaseId {
        ORDER[(self.index() + Self::COUNT - 1) % Self::COUNT]
    }

    /// The short id used on the wire (`"BIG_BANG"`, `"QGP"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            PhaseId::Singularity => "BIG_BANG",
            PhaseId::QuarkGluonPlasma => "QGP",
            PhaseId::Inflation => "INFLATION",
            PhaseId::GalaxyFormation => "GALAXY",
            PhaseId::SolarSystem => "SOLAR_SYSTEM",
        }
    }

    /// Registry entry for this phase.
    #[inline]
    pub fn phase(self) -> &'static Phase {
        Phase::by_id(self)
    }
}

impl fmt::Display for PhaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhaseId {
    type Err = UnknownPhase;

    /// Accepts the wire ids and snake_case names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = match s.trim().to_ascii_uppercase().as_str() {
            "BIG_BANG" | "SINGULARITY" => PhaseId::Singularity,
            "QGP" | "QUARK_GLUON_PLASMA" => PhaseId::QuarkGluonPlasma,
            "INFLATION" => PhaseId::Inflation,
            "GALAXY" | "GALAXY_FORMATION" => PhaseId::GalaxyFormation,
            "SOLAR_SYSTEM" => PhaseId::SolarSystem,
            _ => return Err(UnknownPhase(s.to_string())),
        };
        Ok(id)
    }
}

/// Static description of one phase.
#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    pub id: PhaseId,
    /// Title shown by the UI.
    pub label: &'static str,
    /// One-line caption shown under the title.
    pub description: &'static str,
    /// Accent color for the title (RGB, 0.0-1.0).
    pub accent_color: Vec3,
    /// How long the tour lingers on this phase.
    pub nominal_duration: Duration,
}

static PHASES: [Phase; PhaseId::COUNT] = [
    Phase {
        id: PhaseId::Singularity,
        label: "The Singularity",
        description: "T=0: Infinite density. A point of pure potential energy waiting to erupt.",
        accent_color: Vec3::new(1.0, 1.0, 1.0),
        nominal_duration: Duration::from_millis(5000),
    },
    Phase {
        id: PhaseId::QuarkGluonPlasma,
        label: "Quark-Gluon Plasma",
        description: "T+0s: The primordial soup. Hot, dense, and chaotic.",
        accent_color: Vec3::new(0.94, 0.27, 0.27),
        nominal_duration: Duration::from_millis(8000),
    },
    Phase {
        id: PhaseId::Inflation,
        label: "Cosmic Inflation",
        description: "T+10\u{207b}\u{00b3}\u{00b2}s: Space expands faster than light, \
                      cooling the universe.",
        accent_color: Vec3::new(0.13, 0.83, 0.93),
        nominal_duration: Duration::from_millis(6000),
    },
    Phase {
        id: PhaseId::GalaxyFormation,
        label: "Galaxy Formation",
        description: "T+1 Billion Years: Gravity pulls matter into spiral structures.",
        accent_color: Vec3::new(0.75, 0.52, 0.99),
        nominal_duration: Duration::from_millis(10000),
    },
    Phase {
        id: PhaseId::SolarSystem,
        label: "Solar System",
        description: "T+9 Billion Years: A star is born from collapsing dust clouds.",
        accent_color: Vec3::new(0.98, 0.8, 0.08),
        nominal_duration: Duration::from_millis(10000),
    },
];

impl Phase {
    /// Look up a phase by id.
    #[inline]
    pub fn by_id(id: PhaseId) -> &'static Phase {
        &PHASES[id.index()]
    }

    /// Every phase, in tour order.
    pub fn all() -> &'static [Phase] {
        &PHASES
    }
}
