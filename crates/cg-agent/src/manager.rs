//! `AgentManager` — owns a fixed-size group of agents and walks them randomly.

use cg_core::{AgentId, BucketId, CgError, CgResult, SimRng, SpatialGrid};

use crate::Agent;

/// A fixed-size, ordered group of agents with its own RNG stream.
///
/// The population never changes size after construction.  Agents are
/// addressed by [`AgentId`] (their slot in the group).
pub struct AgentManager {
    agents: Vec<Agent>,
    rng:    SimRng,
}

impl AgentManager {
    /// Seed `count` agents uniformly in `[0, board_size)²`, each infected
    /// independently with probability `infection_seed_probability`.
    ///
    /// `count == 0` yields a valid empty manager.  `board_size` must be
    /// positive whenever `count > 0`.
    pub fn new(
        count:                      usize,
        board_size:                 i32,
        infection_seed_probability: f64,
        mut rng:                    SimRng,
    ) -> CgResult<Self> {
        if count > 0 && board_size <= 0 {
            return Err(CgError::invalid("board_size", format!("must be > 0, got {board_size}")));
        }
        let agents = (0..count)
            .map(|_| {
                let x = rng.gen_range(0..board_size);
                let y = rng.gen_range(0..board_size);
                let infected = rng.gen_bool(infection_seed_probability);
                Agent::new(x, y, infected)
            })
            .collect();
        Ok(Self { agents, rng })
    }

    /// Wrap an explicit population, e.g. agents placed at known positions.
    pub fn from_agents(agents: Vec<Agent>, rng: SimRng) -> Self {
        Self { agents, rng }
    }

    /// Move every agent one random step per axis.
    ///
    /// Each axis independently draws `+1` or `-1`; an agent that is infected
    /// at the time of the move steps `±2` instead.
    pub fn move_all(&mut self) {
        for agent in &mut self.agents {
            let magnitude = agent.step_magnitude();
            agent.x += self.rng.unit_step() * magnitude;
            agent.y += self.rng.unit_step() * magnitude;
        }
    }

    /// One `(bucket, agent)` pairing per owned agent, from current positions.
    pub fn bucket_pairings(&self, grid: SpatialGrid) -> impl Iterator<Item = (BucketId, AgentId)> + '_ {
        self.agents
            .iter()
            .enumerate()
            .map(move |(i, agent)| (grid.bucket_of(agent.position()), AgentId(i as u32)))
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn infected_count(&self) -> usize {
        self.agents.iter().filter(|a| a.infected).count()
    }

    #[inline]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    #[inline]
    pub fn agent(&self, id: AgentId) -> &Agent {
        &self.agents[id.index()]
    }

    #[inline]
    pub fn agent_mut(&mut self, id: AgentId) -> &mut Agent {
        &mut self.agents[id.index()]
    }
}
