//! Fluent builder for constructing a [`SimulationEngine`].

use cg_agent::AgentManager;
use cg_core::{SimRng, SimulationConfig};
use tracing::debug;

use crate::{SimResult, SimulationEngine};

/// Fluent builder for [`SimulationEngine`].
///
/// # Required inputs
///
/// - [`SimulationConfig`] — board, bucket, population, seed, …
///
/// # Optional inputs
///
/// | Method             | Default                                              |
/// |--------------------|------------------------------------------------------|
/// | `.managers(v)`     | `number_of_managers` managers seeded from the config |
///
/// # Example
///
/// ```rust,ignore
/// let engine = EngineBuilder::new(config).build()?;
///
/// // Hand-placed population for a scenario test.
/// let placed = AgentManager::from_agents(vec![Agent::new(0, 0, true)], SimRng::new(1));
/// let engine = EngineBuilder::new(config).managers(vec![placed]).build()?;
/// ```
pub struct EngineBuilder {
    config:   SimulationConfig,
    managers: Option<Vec<AgentManager>>,
}

impl EngineBuilder {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config, managers: None }
    }

    /// Use explicit managers instead of seeding random ones.
    ///
    /// The population counts in the config are ignored; board and bucket size
    /// still apply.
    pub fn managers(mut self, managers: Vec<AgentManager>) -> Self {
        self.managers = Some(managers);
        self
    }

    /// Validate the config, seed the population, and return a ready engine.
    pub fn build(self) -> SimResult<SimulationEngine> {
        self.config.validate()?;
        let grid = self.config.grid()?;

        let managers = match self.managers {
            Some(m) => m,
            None => seed_managers(&self.config)?,
        };

        let engine = SimulationEngine::new(grid, managers);
        debug!(
            managers = engine.managers().len(),
            agents   = engine.total_agents(),
            infected = engine.infected_agents(),
            bucket   = grid.bucket_size(),
            "engine built"
        );
        Ok(engine)
    }
}

/// One manager per configured slot, each with its own child RNG stream.
fn seed_managers(config: &SimulationConfig) -> SimResult<Vec<AgentManager>> {
    let per_manager = usize::try_from(config.agents_per_manager).unwrap_or(0);
    let mut root = SimRng::new(config.seed);

    let managers = (0..config.number_of_managers.max(0))
        .map(|i| {
            AgentManager::new(
                per_manager,
                config.board_size,
                config.infection_seed_probability,
                root.child(i as u64),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(managers)
}
