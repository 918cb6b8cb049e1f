//! DASH Deletion Simulator
//!
//! Generate a random overlay, delete nodes one by one and report how well the
//! repairs kept it connected.
//!
//! Usage: `dash-sim [nodes] [deletions]`. Seed, edge probability and timeline
//! output come from `DASH_*` environment variables.

use dash_sim::{Simulation, SimulationConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dash_sim=info,dash_heal=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SimulationConfig::from_env()?.with_args(std::env::args().skip(1))?;

    println!("DASH Deletion Simulator");
    println!("=======================");
    println!();
    println!(
        "Graph: {} nodes, p = {}, seed = {}",
        config.nodes, config.edge_probability, config.seed
    );
    println!("Deleting {} nodes...", config.deletions.min(config.nodes));

    let mut sim = Simulation::new(config.clone())?;
    let summary = sim.run_configured()?;

    println!();
    println!("Run complete:");
    println!("  Rounds:                 {}", summary.rounds);
    println!("  Healing edges created:  {}", summary.healing_edges_created);
    println!("  Rounds still connected: {}/{}", summary.connected_rounds, summary.rounds);
    println!("  Peak delta:             {}", summary.peak_delta);
    println!("  Rounds over 2 ln n:     {}", summary.bound_violations);

    if let Some(last) = sim.rounds().last() {
        println!();
        println!("Final state:");
        println!("  Nodes:      {}", last.node_count);
        println!("  Edges:      {} ({} healing)", last.edge_count, last.healing_edge_count);
        println!("  Components: {}", last.components);
        println!("  Max delta:  {} (bound {:.2})", last.max_delta, last.delta_bound);
    }

    if let Some(path) = &config.events_out {
        sim.export(path)?;
        println!();
        println!("Timeline written to {}", path.display());
    }

    Ok(())
}
