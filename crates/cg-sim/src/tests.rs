//! Integration tests for cg-sim.

use std::collections::{BTreeSet, HashMap};

use cg_agent::{Agent, AgentManager};
use cg_core::{BucketId, Point, SimRng, SimulationConfig, Status, Turn};

use crate::{EngineBuilder, NullSink, RenderReport, SimulationEngine};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(managers: i32, agents: i32, p: f64) -> SimulationConfig {
    SimulationConfig {
        board_size:                 40,
        bucket_size:                5,
        number_of_managers:         managers,
        agents_per_manager:         agents,
        infection_seed_probability: p,
        seed:                       42,
        ..Default::default()
    }
}

/// Engine over one hand-placed manager.
fn placed(bucket_size: i32, agents: Vec<Agent>) -> SimulationEngine {
    let cfg = SimulationConfig { bucket_size, ..config(0, 0, 0.0) };
    EngineBuilder::new(cfg)
        .managers(vec![AgentManager::from_agents(agents, SimRng::new(7))])
        .build()
        .unwrap()
}

fn all_agents(engine: &SimulationEngine) -> Vec<Agent> {
    engine.managers().iter().flat_map(|m| m.agents().iter().copied()).collect()
}

// ── EngineBuilder ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_configured_population() {
        let engine = EngineBuilder::new(config(3, 7, 0.2)).build().unwrap();
        assert_eq!(engine.managers().len(), 3);
        assert!(engine.managers().iter().all(|m| m.size() == 7));
        assert_eq!(engine.total_agents(), 21);
        assert_eq!(engine.turns_completed(), Turn::ZERO);
        assert!(engine.occupied_buckets().is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(EngineBuilder::new(SimulationConfig { bucket_size: 0, ..config(1, 1, 0.0) }).build().is_err());
        assert!(EngineBuilder::new(config(-1, 1, 0.0)).build().is_err());
        assert!(EngineBuilder::new(config(1, -1, 0.0)).build().is_err());
    }

    #[test]
    fn managers_get_independent_streams() {
        let engine = EngineBuilder::new(config(2, 20, 0.0)).build().unwrap();
        let m = engine.managers();
        assert_ne!(m[0].agents(), m[1].agents());
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = EngineBuilder::new(config(4, 25, 0.2)).build().unwrap();
        let mut b = EngineBuilder::new(config(4, 25, 0.2)).build().unwrap();
        for _ in 0..20 {
            assert_eq!(a.turn(), b.turn());
        }
    }
}

// ── Turn algorithm ────────────────────────────────────────────────────────────

#[cfg(test)]
mod turn_tests {
    use super::*;

    #[test]
    fn empty_engine_turns_cleanly() {
        let mut engine = EngineBuilder::new(config(0, 0, 0.5)).build().unwrap();
        let report = engine.turn();
        assert_eq!(report.turn, Turn(1));
        assert_eq!(report.total_agents, 0);
        assert_eq!(report.infected_agents, 0);
        assert_eq!(report.healthy_agents(), 0);
        assert!(report.occupied.is_empty());
        assert!(report.cleared.is_empty());
    }

    #[test]
    fn managers_without_agents_turn_cleanly() {
        let mut engine = EngineBuilder::new(config(3, 0, 0.5)).build().unwrap();
        engine.run_turns(5, &mut NullSink);
        assert_eq!(engine.turns_completed(), Turn(5));
        assert_eq!(engine.total_agents(), 0);
    }

    #[test]
    fn lone_healthy_agent_never_infected() {
        let mut engine = EngineBuilder::new(config(1, 1, 0.0)).build().unwrap();
        for _ in 0..200 {
            let report = engine.turn();
            assert_eq!(report.infected_agents, 0);
            assert_eq!(report.total_agents, 1);
        }
    }

    #[test]
    fn near_pair_in_one_bucket_both_infected() {
        let mut engine = placed(5, vec![Agent::new(0, 0, false), Agent::new(1, 1, true)]);
        let report = engine.settle();
        assert_eq!(report.infected_agents, 2);
        assert_eq!(report.healthy_agents(), 0);
        let marks = &report.occupied[&BucketId::new(0, 0)];
        assert_eq!(marks.len(), 2);
        assert!(marks.iter().all(|m| m.status == Status::Infected));
    }

    #[test]
    fn distant_pair_in_one_bucket_not_infected() {
        let mut engine = placed(10, vec![Agent::new(0, 0, false), Agent::new(3, 0, true)]);
        let report = engine.settle();
        assert_eq!(report.infected_agents, 1);
    }

    #[test]
    fn two_healthy_neighbours_stay_healthy() {
        let mut engine = placed(5, vec![Agent::new(1, 1, false), Agent::new(2, 2, false)]);
        assert_eq!(engine.settle().infected_agents, 0);
    }

    #[test]
    fn spread_does_not_cross_bucket_boundary() {
        // Distance 1, but x = 4 and x = 5 land in different 5-wide buckets.
        let mut engine = placed(5, vec![Agent::new(4, 0, true), Agent::new(5, 0, false)]);
        let report = engine.settle();
        assert_eq!(report.infected_agents, 1);
        assert_eq!(report.occupied.len(), 2);
        assert_eq!(report.occupied[&BucketId::new(5, 0)][0].status, Status::Healthy);
    }

    #[test]
    fn spread_cascades_within_one_bucket() {
        // A–B near, B–C near, A–C not near.  B is infected by A and then
        // infects C during the same pass.
        let mut engine = placed(
            10,
            vec![Agent::new(0, 0, true), Agent::new(2, 0, false), Agent::new(4, 0, false)],
        );
        assert_eq!(engine.settle().infected_agents, 3);
    }

    #[test]
    fn marks_match_agent_positions() {
        let mut engine = placed(5, vec![Agent::new(7, 3, false), Agent::new(-2, 11, true)]);
        let report = engine.settle();
        assert_eq!(report.mark_count(), 2);
        let marks: Vec<_> = report.marks().map(|(b, m)| (b, m.point, m.status)).collect();
        assert!(marks.contains(&(BucketId::new(5, 0), Point::new(7, 3), Status::Healthy)));
        assert!(marks.contains(&(BucketId::new(-5, 10), Point::new(-2, 11), Status::Infected)));
    }

    #[test]
    fn counts_always_add_up() {
        let mut engine = EngineBuilder::new(config(5, 40, 0.1)).build().unwrap();
        for _ in 0..50 {
            let r = engine.turn();
            assert_eq!(r.infected_agents + r.healthy_agents(), r.total_agents);
            assert_eq!(r.total_agents, 200);
            assert_eq!(r.mark_count(), 200);
        }
    }

    #[test]
    fn infection_is_monotonic() {
        let mut engine = EngineBuilder::new(config(4, 60, 0.1)).build().unwrap();
        let mut before = all_agents(&engine);
        for _ in 0..100 {
            engine.turn();
            let after = all_agents(&engine);
            for (old, new) in before.iter().zip(&after) {
                assert!(!old.infected || new.infected, "an agent recovered");
            }
            before = after;
        }
    }

    #[test]
    fn near_pairs_sharing_a_bucket_leave_the_turn_infected() {
        // Small board so agents crowd together.
        let cfg = SimulationConfig { board_size: 12, bucket_size: 4, ..config(3, 30, 0.15) };
        let mut engine = EngineBuilder::new(cfg).build().unwrap();
        let grid = engine.grid();

        for _ in 0..40 {
            let entering: Vec<bool> = all_agents(&engine).iter().map(|a| a.infected).collect();
            engine.turn();
            let after = all_agents(&engine);

            let mut by_bucket: HashMap<BucketId, Vec<usize>> = HashMap::new();
            for (i, a) in after.iter().enumerate() {
                by_bucket.entry(grid.bucket_of(a.position())).or_default().push(i);
            }
            for members in by_bucket.values() {
                for &i in members {
                    for &j in members {
                        if i != j && (entering[i] || entering[j]) && after[i].is_near(&after[j]) {
                            assert!(after[i].infected && after[j].infected);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn turn_counter_advances() {
        let mut engine = EngineBuilder::new(config(1, 3, 0.0)).build().unwrap();
        assert_eq!(engine.turn().turn, Turn(1));
        assert_eq!(engine.turn().turn, Turn(2));
        assert_eq!(engine.turns_completed(), Turn(2));
    }
}

// ── Occupancy diff and discard report ─────────────────────────────────────────

#[cfg(test)]
mod report_tests {
    use super::*;

    fn keys(r: &RenderReport) -> BTreeSet<BucketId> {
        r.occupied.keys().copied().collect()
    }

    #[test]
    fn first_turn_clears_nothing() {
        let mut engine = EngineBuilder::new(config(2, 10, 0.0)).build().unwrap();
        assert!(engine.turn().cleared.is_empty());
    }

    #[test]
    fn cleared_is_previous_minus_current() {
        let mut engine = EngineBuilder::new(config(2, 25, 0.3)).build().unwrap();
        let mut previous = keys(&engine.turn());
        for _ in 0..60 {
            let report = engine.turn();
            let current = keys(&report);
            let expected: BTreeSet<_> = previous.difference(&current).copied().collect();
            assert_eq!(report.cleared, expected);
            assert!(report.cleared.is_disjoint(&current));
            assert_eq!(engine.occupied_buckets(), current);
            previous = current;
        }
    }

    #[test]
    fn vacated_bucket_is_cleared() {
        let mut engine = placed(5, vec![Agent::new(0, 0, false)]);
        engine.settle();
        // Any single-step move from (0, 0) leaves bucket (0, 0) unless it
        // lands on (1, 1); walk until it does leave.
        let mut left = false;
        for _ in 0..50 {
            let report = engine.turn();
            if !report.occupied.contains_key(&BucketId::new(0, 0)) {
                assert!(report.cleared.contains(&BucketId::new(0, 0)));
                left = true;
                break;
            }
        }
        assert!(left, "agent never left its starting bucket");
    }

    #[test]
    fn clear_report_blanks_last_occupancy() {
        let mut engine = EngineBuilder::new(config(2, 10, 0.2)).build().unwrap();
        assert!(engine.clear_report().cleared.is_empty());

        let last = engine.turn();
        let discard = engine.clear_report();
        assert_eq!(discard.cleared, keys(&last));
        assert!(discard.occupied.is_empty());
        assert_eq!(discard.turn, last.turn);
        assert_eq!(discard.total_agents, last.total_agents);
        // Building the discard report leaves the engine untouched.
        assert_eq!(engine.occupied_buckets(), keys(&last));
    }

    #[test]
    fn run_turns_feeds_closure_sink() {
        let mut engine = EngineBuilder::new(config(1, 5, 0.0)).build().unwrap();
        let mut seen = Vec::new();
        let mut sink = |r: &RenderReport| seen.push(r.turn);
        engine.run_turns(3, &mut sink);
        assert_eq!(seen, vec![Turn(1), Turn(2), Turn(3)]);
    }
}
