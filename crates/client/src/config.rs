//! Simulation settings read from the environment.
use std::env;
use std::path::PathBuf;

/// Settings for one headless run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub seed: u64,
    pub ticks: u32,
    /// Integration step for kinematic actors.
    pub dt: f32,
    /// Monsters spawned on random free tiles in addition to map markers.
    pub monsters: usize,
    pub flow_steps: u32,
    /// ASCII map to load instead of the built-in one.
    pub map_path: Option<PathBuf>,
    /// Mirror logs into `dungeon-ai.log` under this directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 7,
            ticks: 40,
            dt: 0.1,
            monsters: 6,
            flow_steps: game_core::AiConfig::DEFAULT_FLOW_STEP_COUNT,
            map_path: None,
            log_dir: None,
        }
    }
}

impl SimConfig {
    /// Construct the configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SIM_SEED` - RNG seed (default: 7)
    /// - `SIM_TICKS` - Number of ticks to run (default: 40)
    /// - `SIM_DT` - Integration step, must be positive (default: 0.1)
    /// - `SIM_MONSTERS` - Extra monsters to spawn (default: 6)
    /// - `SIM_FLOW_STEPS` - Greedy descent steps per flow vector (default: 2)
    /// - `SIM_MAP_PATH` - ASCII map file
    /// - `SIM_LOG_DIR` - Directory for a log file
    ///
    /// Missing or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env("SIM_SEED") {
            config.seed = seed;
        }
        if let Some(ticks) = read_env("SIM_TICKS") {
            config.ticks = ticks;
        }
        if let Some(dt) = read_env::<f32>("SIM_DT")
            && dt.is_finite()
            && dt > 0.0
        {
            config.dt = dt;
        }
        if let Some(monsters) = read_env("SIM_MONSTERS") {
            config.monsters = monsters;
        }
        if let Some(steps) = read_env("SIM_FLOW_STEPS") {
            config.flow_steps = steps;
        }
        config.map_path = read_env("SIM_MAP_PATH");
        config.log_dir = read_env("SIM_LOG_DIR");

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
