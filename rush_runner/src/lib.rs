use std::{fs, path::Path};

use anyhow::Context;
use rush_schema::{Replay, RulesetConfig, RushChart};
use serde::de::DeserializeOwned;

fn load_json_from_path<T: DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read {what}: {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse {what} json: {}", path.display()))
}

pub fn load_chart_json_from_path(path: impl AsRef<Path>) -> anyhow::Result<RushChart> {
    load_json_from_path(path.as_ref(), "chart")
}

pub fn load_chart_json_from_str(json: &str) -> anyhow::Result<RushChart> {
    let chart: RushChart = serde_json::from_str(json).context("failed to parse chart json")?;
    Ok(chart)
}

pub fn load_replay_json_from_path(path: impl AsRef<Path>) -> anyhow::Result<Replay> {
    let mut replay: Replay = load_json_from_path(path.as_ref(), "replay")?;
    sort_frames(&mut replay);
    Ok(replay)
}

pub fn load_replay_json_from_str(json: &str) -> anyhow::Result<Replay> {
    let mut replay: Replay = serde_json::from_str(json).context("failed to parse replay json")?;
    sort_frames(&mut replay);
    Ok(replay)
}

/// A missing path means the built-in ruleset.
pub fn load_config_json_from_path(path: Option<&Path>) -> anyhow::Result<RulesetConfig> {
    match path {
        Some(path) => load_json_from_path(path, "config"),
        None => Ok(RulesetConfig::default()),
    }
}

pub fn load_config_json_from_str(json: &str) -> anyhow::Result<RulesetConfig> {
    let config: RulesetConfig = serde_json::from_str(json).context("failed to parse config json")?;
    Ok(config)
}

// Frames are fed in time order; equal times keep file order.
fn sort_frames(replay: &mut Replay) {
    replay.frames.sort_by(|a, b| a.time_ms.total_cmp(&b.time_ms));
}
