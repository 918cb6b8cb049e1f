//! Batch deletion simulation with event recording.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use dash_heal::{Deletion, SelfHealingGraph};
use dash_topology::{erdos_renyi, NodeId, Topology};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::events::{DashEvent, RoundStats, Summary};

/// One completed deletion.
#[derive(Debug, Clone)]
pub struct Round {
    /// What the graph did: removal, selection and repair.
    pub deletion: Deletion,
    /// Measurements taken after the repair.
    pub stats: RoundStats,
}

/// Generates a random graph, deletes nodes from it one at a time and records
/// what each repair did.
pub struct Simulation {
    config: SimulationConfig,
    graph: SelfHealingGraph,
    rng: StdRng,
    events: Vec<DashEvent>,
    rounds: Vec<RoundStats>,
    current_frame: u64,
}

impl Simulation {
    /// Create a simulation over a fresh G(n, p) graph.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let topology = erdos_renyi(config.nodes, config.edge_probability, &mut rng)?;

        info!(
            nodes = topology.node_count(),
            edges = topology.edge_count(),
            components = topology.component_count(),
            seed = config.seed,
            "generated graph"
        );

        Ok(Self::with_topology(config, topology, rng))
    }

    /// Create a simulation over an existing topology.
    pub fn with_topology(config: SimulationConfig, topology: Topology, rng: StdRng) -> Self {
        Self {
            config,
            graph: SelfHealingGraph::new(topology),
            rng,
            events: Vec::new(),
            rounds: Vec::new(),
            current_frame: 0,
        }
    }

    /// Delete one uniformly chosen node and heal.
    ///
    /// Returns `Ok(None)` once the graph is empty.
    pub fn step(&mut self) -> Result<Option<Round>> {
        let victim = self.graph.topology().node_ids().choose(&mut self.rng);
        match victim {
            Some(node) => self.delete(node).map(Some),
            None => Ok(None),
        }
    }

    /// Delete a specific node and heal.
    pub fn delete(&mut self, node: NodeId) -> Result<Round> {
        let deletion = self.graph.delete_node(node)?;
        let frame = self.current_frame;

        self.events.push(DashEvent::NodeDeleted {
            node,
            neighbours: deletion.neighbours.clone(),
            representatives: deletion.representatives.clone(),
            frame,
        });
        for &edge in &deletion.report.edges {
            self.events.push(DashEvent::EdgeHealed { edge, frame });
        }
        if let Some(dash_id) = deletion.report.dash_id {
            self.events.push(DashEvent::DashIdPropagated {
                dash_id,
                nodes: deletion.report.altered.clone(),
                frame,
            });
        }

        let stats = self.measure(deletion.report.edges.len());
        debug!(
            frame,
            node = %node,
            nodes = stats.node_count,
            components = stats.components,
            max_delta = stats.max_delta,
            "round complete"
        );

        self.rounds.push(stats.clone());
        self.current_frame += 1;
        Ok(Round { deletion, stats })
    }

    /// Run up to `count` deletions, stopping early if the graph empties.
    pub fn run(&mut self, count: usize) -> Result<Summary> {
        for _ in 0..count {
            if self.step()?.is_none() {
                break;
            }
        }
        Ok(self.summary())
    }

    /// Run the configured number of deletions.
    pub fn run_configured(&mut self) -> Result<Summary> {
        self.run(self.config.deletions)
    }

    fn measure(&self, new_edges: usize) -> RoundStats {
        let topology = self.graph.topology();
        RoundStats {
            frame: self.current_frame,
            node_count: topology.node_count(),
            edge_count: topology.edge_count(),
            healing_edge_count: self.graph.healing_edges().len(),
            new_edges,
            max_delta: topology.max_delta().unwrap_or(0),
            delta_bound: self.graph.delta_bound(),
            components: topology.component_count(),
        }
    }

    /// Aggregate of all rounds so far.
    pub fn summary(&self) -> Summary {
        Summary::from_rounds(&self.rounds)
    }

    /// Get all recorded events.
    pub fn events(&self) -> &[DashEvent] {
        &self.events
    }

    /// Per-round statistics, oldest first.
    pub fn rounds(&self) -> &[RoundStats] {
        &self.rounds
    }

    /// The graph being simulated.
    pub fn graph(&self) -> &SelfHealingGraph {
        &self.graph
    }

    /// The configuration this run was created with.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Write config, events, rounds and summary as one JSON document.
    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        #[derive(Serialize)]
        struct Timeline<'a> {
            config: &'a SimulationConfig,
            summary: Summary,
            rounds: &'a [RoundStats],
            events: &'a [DashEvent],
        }

        let writer = BufWriter::new(File::create(path.as_ref())?);
        serde_json::to_writer_pretty(
            writer,
            &Timeline {
                config: &self.config,
                summary: self.summary(),
                rounds: &self.rounds,
                events: &self.events,
            },
        )?;
        info!(path = %path.as_ref().display(), events = self.events.len(), "timeline written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_topology::from_edges;

    fn small_config() -> SimulationConfig {
        SimulationConfig {
            seed: 3,
            nodes: 40,
            edge_probability: 0.2,
            deletions: 10,
            events_out: None,
        }
    }

    #[test]
    fn simulation_starts_with_generated_graph() {
        let sim = Simulation::new(small_config()).unwrap();
        assert_eq!(sim.graph().topology().node_count(), 40);
        assert!(sim.events().is_empty());
        assert!(sim.rounds().is_empty());
    }

    #[test]
    fn each_step_removes_one_node() {
        let mut sim = Simulation::new(small_config()).unwrap();
        for i in 1..=5 {
            let round = sim.step().unwrap().unwrap();
            assert_eq!(round.stats.frame, i - 1);
            assert_eq!(round.stats.node_count, 40 - i as usize);
        }

        let deletions = sim
            .events()
            .iter()
            .filter(|e| matches!(e, DashEvent::NodeDeleted { .. }))
            .count();
        assert_eq!(deletions, 5);
    }

    #[test]
    fn run_stops_when_graph_is_empty() {
        let mut config = small_config();
        config.nodes = 6;
        let mut sim = Simulation::new(config).unwrap();

        let summary = sim.run(100).unwrap();
        assert_eq!(summary.rounds, 6);
        assert!(sim.graph().topology().is_empty());
        assert!(sim.step().unwrap().is_none());
    }

    #[test]
    fn same_seed_same_timeline() {
        let mut a = Simulation::new(small_config()).unwrap();
        let mut b = Simulation::new(small_config()).unwrap();
        a.run_configured().unwrap();
        b.run_configured().unwrap();

        assert_eq!(a.events(), b.events());
        assert_eq!(a.rounds(), b.rounds());
    }

    #[test]
    fn healed_edges_are_recorded() {
        // Star: deleting the hub must heal
        let topology = from_edges(&[0.9, 0.1, 0.2, 0.3], &[(0, 1), (0, 2), (0, 3)]).unwrap();
        let mut sim = Simulation::with_topology(small_config(), topology, StdRng::seed_from_u64(0));

        let round = sim.delete(NodeId(0)).unwrap();
        assert_eq!(round.stats.new_edges, 2);
        assert_eq!(round.stats.components, 1);
        assert_eq!(round.stats.healing_edge_count, 2);

        let healed: Vec<_> = sim
            .events()
            .iter()
            .filter_map(|e| match e {
                DashEvent::EdgeHealed { edge, .. } => Some(*edge),
                _ => None,
            })
            .collect();
        assert_eq!(healed, round.deletion.report.edges);
        assert!(sim
            .events()
            .iter()
            .any(|e| matches!(e, DashEvent::DashIdPropagated { .. })));
    }

    #[test]
    fn export_writes_timeline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timeline.json");

        let mut sim = Simulation::new(small_config()).unwrap();
        sim.run(3).unwrap();
        sim.export(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["summary"]["rounds"], 3);
        assert_eq!(json["rounds"].as_array().unwrap().len(), 3);
        assert_eq!(json["config"]["seed"], 3);
    }
}
