//! DASH Deletion Simulator
//!
//! Drives repeated node failures against a random overlay and records how the
//! self-healing repairs hold the graph together.
//!
//! # Architecture
//!
//! - **Config**: seed, graph size, edge probability, deletion count (env + args)
//! - **Simulation**: deletes one random node per round through [`SelfHealingGraph`]
//! - **Events**: timeline of deletions, healed edges and identifier propagation
//! - **Stats**: per-round node/edge counts, components, `max delta` vs `2 ln n`
//!
//! # Usage
//!
//! ```
//! use dash_sim::{Simulation, SimulationConfig};
//!
//! let mut sim = Simulation::new(SimulationConfig {
//!     nodes: 30,
//!     deletions: 10,
//!     ..SimulationConfig::default()
//! })
//! .unwrap();
//!
//! let summary = sim.run_configured().unwrap();
//! assert_eq!(summary.rounds, 10);
//! ```
//!
//! [`SelfHealingGraph`]: dash_heal::SelfHealingGraph

mod config;
mod error;
mod events;
mod simulation;

pub use config::SimulationConfig;
pub use error::{Error, Result};
pub use events::{DashEvent, RoundStats, Summary};
pub use simulation::{Round, Simulation};
