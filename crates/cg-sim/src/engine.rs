//! The `SimulationEngine` struct and its turn algorithm.

use std::collections::{BTreeMap, BTreeSet};

use cg_agent::{Agent, AgentManager};
use cg_core::{AgentId, BucketId, ManagerId, SpatialGrid, Turn};
use tracing::trace;

use crate::{Mark, RenderReport, ReportSink};

#[cfg(feature = "fx-hash")]
type OccupancyMap = rustc_hash::FxHashMap<BucketId, Vec<AgentRef>>;
#[cfg(not(feature = "fx-hash"))]
type OccupancyMap = std::collections::HashMap<BucketId, Vec<AgentRef>>;

/// Address of one agent: its manager and its slot in that manager.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct AgentRef {
    pub manager: ManagerId,
    pub agent:   AgentId,
}

// ── SimulationEngine ──────────────────────────────────────────────────────────

/// Owns the managers of one run plus the previous turn's bucket occupancy.
///
/// The previous occupancy is used only to tell views which buckets to blank.
/// Agents are always found through a fresh bucketing pass, never read back
/// out of it.
///
/// Create via [`EngineBuilder`][crate::EngineBuilder].
pub struct SimulationEngine {
    grid:     SpatialGrid,
    managers: Vec<AgentManager>,
    /// Exactly the occupancy produced by the most recent `turn()`, or empty
    /// before the first turn.
    previous: OccupancyMap,
    turn:     Turn,
}

impl SimulationEngine {
    pub(crate) fn new(grid: SpatialGrid, managers: Vec<AgentManager>) -> Self {
        Self {
            grid,
            managers,
            previous: OccupancyMap::default(),
            turn:     Turn::ZERO,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Advance the simulation by one turn and report the result.
    ///
    /// Total over every engine state, including zero managers or agents.
    pub fn turn(&mut self) -> RenderReport {
        self.move_managers();
        self.settle()
    }

    /// A turn with the move phase skipped: bucket the current positions,
    /// spread infection, and report.
    ///
    /// Counts as a completed turn.  Useful for an initial frame before
    /// anything has moved, or for checking spread at hand-placed positions.
    pub fn settle(&mut self) -> RenderReport {
        let current = self.build_occupancy();

        // ── Buckets that emptied since last turn ──────────────────────────
        let cleared: BTreeSet<BucketId> = self
            .previous
            .keys()
            .filter(|bucket| !current.contains_key(*bucket))
            .copied()
            .collect();

        // ── Bucket-local spread, then marks ───────────────────────────────
        //
        // Infection never leaves a bucket during the pass, so a bucket's
        // marks are final as soon as its own pass is done.
        let mut occupied = BTreeMap::new();
        for (&bucket, members) in &current {
            spread_infection(&mut self.managers, members);
            let marks = members
                .iter()
                .map(|&r| {
                    let agent = self.agent(r);
                    Mark { point: agent.position(), status: agent.status() }
                })
                .collect();
            occupied.insert(bucket, marks);
        }

        // ── Remember and report ───────────────────────────────────────────
        self.previous = current;
        self.turn = self.turn.next();

        let report = RenderReport {
            turn:            self.turn,
            cleared,
            occupied,
            total_agents:    self.total_agents(),
            infected_agents: self.infected_agents(),
        };
        trace!(
            turn     = report.turn.0,
            infected = report.infected_agents,
            healthy  = report.healthy_agents(),
            buckets  = report.occupied.len(),
            cleared  = report.cleared.len(),
            "turn complete"
        );
        report
    }

    /// Run exactly `n` turns, handing each report to `sink`.
    pub fn run_turns<S: ReportSink + ?Sized>(&mut self, n: u64, sink: &mut S) {
        for _ in 0..n {
            let report = self.turn();
            sink.on_report(&report);
        }
    }

    /// A report that blanks every bucket of the last turn and draws nothing.
    ///
    /// Sent when this engine is discarded so a stateful view is not left with
    /// stale marks.  Does not modify the engine.
    pub fn clear_report(&self) -> RenderReport {
        RenderReport {
            turn:            self.turn,
            cleared:         self.previous.keys().copied().collect(),
            occupied:        BTreeMap::new(),
            total_agents:    self.total_agents(),
            infected_agents: self.infected_agents(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn grid(&self) -> SpatialGrid {
        self.grid
    }

    /// Number of completed turns.
    #[inline]
    pub fn turns_completed(&self) -> Turn {
        self.turn
    }

    #[inline]
    pub fn managers(&self) -> &[AgentManager] {
        &self.managers
    }

    #[inline]
    pub fn agent(&self, r: AgentRef) -> &Agent {
        self.managers[r.manager.index()].agent(r.agent)
    }

    /// Buckets occupied after the most recent turn.
    pub fn occupied_buckets(&self) -> BTreeSet<BucketId> {
        self.previous.keys().copied().collect()
    }

    pub fn total_agents(&self) -> usize {
        self.managers.iter().map(AgentManager::size).sum()
    }

    pub fn infected_agents(&self) -> usize {
        self.managers.iter().map(AgentManager::infected_count).sum()
    }

    // ── Turn phases ───────────────────────────────────────────────────────

    fn move_managers(&mut self) {
        #[cfg(not(feature = "parallel"))]
        {
            self.managers.iter_mut().for_each(AgentManager::move_all);
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            // Each manager owns its RNG, so the order managers run in does
            // not affect the outcome.
            self.managers.par_iter_mut().for_each(AgentManager::move_all);
        }
    }

    /// O(agent_count) scan of all positions → `BucketId → Vec<AgentRef>`.
    fn build_occupancy(&self) -> OccupancyMap {
        let mut index = OccupancyMap::default();
        for (m, manager) in self.managers.iter().enumerate() {
            let manager_id = ManagerId(m as u32);
            for (bucket, agent) in manager.bucket_pairings(self.grid) {
                index
                    .entry(bucket)
                    .or_default()
                    .push(AgentRef { manager: manager_id, agent });
            }
        }
        index
    }
}

// ── Infection helpers ─────────────────────────────────────────────────────────

/// Pairwise spread among the agents of one bucket.
///
/// Visits every ordered pair of distinct members and re-reads both flags at
/// each step, so an agent infected earlier in the pass can infect a later
/// one.  O(n²) in the bucket population, which is usually two or three.
fn spread_infection(managers: &mut [AgentManager], members: &[AgentRef]) {
    if members.len() < 2 {
        return;
    }
    for &a in members {
        for &b in members {
            if a == b {
                continue;
            }
            let first = *managers[a.manager.index()].agent(a.agent);
            let second = *managers[b.manager.index()].agent(b.agent);
            if first.infected == second.infected || !first.is_near(&second) {
                continue;
            }
            managers[a.manager.index()].agent_mut(a.agent).infected = true;
            managers[b.manager.index()].agent_mut(b.agent).infected = true;
        }
    }
}
