//! Simulation configuration.

use std::path::PathBuf;
use std::str::FromStr;

use dash_topology::DEFAULT_EDGE_PROBABILITY;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for a deletion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seed for graph generation, identifiers and victim choice
    pub seed: u64,
    /// Nodes in the generated graph
    pub nodes: usize,
    /// G(n, p) edge probability
    pub edge_probability: f64,
    /// Deletions to perform (clamped to the node count)
    pub deletions: usize,
    /// Where to write the JSON timeline, if anywhere
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_out: Option<PathBuf>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            nodes: 100,
            edge_probability: DEFAULT_EDGE_PROBABILITY,
            deletions: 50,
            events_out: None,
        }
    }
}

impl SimulationConfig {
    /// Create config from environment variables with defaults for anything unset.
    ///
    /// Reads `DASH_SEED`, `DASH_NODES`, `DASH_EDGE_PROBABILITY`,
    /// `DASH_DELETIONS` and `DASH_EVENTS_OUT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            seed: parse_or(&lookup, "DASH_SEED", defaults.seed)?,
            nodes: parse_or(&lookup, "DASH_NODES", defaults.nodes)?,
            edge_probability: parse_or(&lookup, "DASH_EDGE_PROBABILITY", defaults.edge_probability)?,
            deletions: parse_or(&lookup, "DASH_DELETIONS", defaults.deletions)?,
            events_out: lookup("DASH_EVENTS_OUT")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        };

        config.validate()?;
        Ok(config)
    }

    /// Apply positional arguments: `[nodes] [deletions]`.
    pub fn with_args<I, S>(mut self, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();
        if let Some(nodes) = args.next() {
            self.nodes = parse_value("nodes", nodes.as_ref())?;
        }
        if let Some(deletions) = args.next() {
            self.deletions = parse_value("deletions", deletions.as_ref())?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.edge_probability) {
            return Err(Error::Config {
                key: "DASH_EDGE_PROBABILITY",
                reason: format!("{} is outside [0, 1]", self.edge_probability),
            });
        }
        Ok(())
    }
}

fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| Error::Config {
        key,
        reason: format!("{:?}: {}", raw, e),
    })
}
