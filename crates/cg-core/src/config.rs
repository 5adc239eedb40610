//! Simulation configuration accepted by the controller's `Start` command.

use std::time::Duration;

use crate::{CgError, CgResult, SpatialGrid};

/// Everything needed to build one simulation run.
///
/// The defaults reproduce the classic setup: a 400×400 board cut into 5×5
/// buckets, ten managers of fifty agents, a turn every 100 ms, and one agent
/// in five starting out infected.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Side length of the square board agents are seeded on.  Must be `> 0`.
    pub board_size: i32,

    /// Side length of one bucket.  Must be `> 0`; ideally divides
    /// `board_size` evenly so edge buckets are full size.
    pub bucket_size: i32,

    /// Number of agent managers.  `0` is valid (an empty simulation).
    pub number_of_managers: i32,

    /// Agents owned by each manager.  `0` is valid.
    pub agents_per_manager: i32,

    /// Pause between turns of the repeating task.  Zero runs turns as fast
    /// as the controller can process them.
    #[cfg_attr(feature = "serde", serde(with = "duration_ms", rename = "step_delay_ms"))]
    pub step_delay: Duration,

    /// Probability that each agent starts out infected.
    pub infection_seed_probability: f64,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            board_size:                 400,
            bucket_size:                5,
            number_of_managers:         10,
            agents_per_manager:         50,
            step_delay:                 Duration::from_millis(100),
            infection_seed_probability: 0.2,
            seed:                       42,
        }
    }
}

impl SimulationConfig {
    /// Check every field, returning the first violation.
    pub fn validate(&self) -> CgResult<()> {
        if self.board_size <= 0 {
            return Err(CgError::invalid("board_size", format!("must be > 0, got {}", self.board_size)));
        }
        if self.bucket_size <= 0 {
            return Err(CgError::invalid("bucket_size", format!("must be > 0, got {}", self.bucket_size)));
        }
        if self.number_of_managers < 0 {
            return Err(CgError::invalid(
                "number_of_managers",
                format!("must be >= 0, got {}", self.number_of_managers),
            ));
        }
        if self.agents_per_manager < 0 {
            return Err(CgError::invalid(
                "agents_per_manager",
                format!("must be >= 0, got {}", self.agents_per_manager),
            ));
        }
        let p = self.infection_seed_probability;
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(CgError::invalid(
                "infection_seed_probability",
                format!("must lie in [0, 1], got {p}"),
            ));
        }
        Ok(())
    }

    /// The bucket mapping for this run.
    pub fn grid(&self) -> CgResult<SpatialGrid> {
        SpatialGrid::new(self.bucket_size).ok_or_else(|| {
            CgError::invalid("bucket_size", format!("must be > 0, got {}", self.bucket_size))
        })
    }

    /// Total population (`0` for negative, i.e. not yet validated, counts).
    pub fn total_agents(&self) -> usize {
        let managers = usize::try_from(self.number_of_managers).unwrap_or(0);
        let per = usize::try_from(self.agents_per_manager).unwrap_or(0);
        managers * per
    }
}

/// Serialise `Duration` as whole milliseconds.
#[cfg(feature = "serde")]
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
