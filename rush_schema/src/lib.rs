use serde::{Deserialize, Serialize};

pub type Milliseconds = f64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RushChart {
    pub meta: Metadata,
    pub objects: Vec<HitObjectDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    pub title: String,
    pub artist: String,
    pub version: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LaneDecl {
    Air,
    Ground,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HitObjectDecl {
    pub time_ms: Milliseconds,
    #[serde(flatten)]
    pub kind: ObjectKindDecl,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ObjectKindDecl {
    #[serde(rename = "minion")]
    Minion {
        lane: LaneDecl,
        /// Bonus minions are spawned during fever and never feed the meter.
        #[serde(default)]
        bonus: bool,
    },

    #[serde(rename = "sawblade")]
    Sawblade { lane: LaneDecl },

    #[serde(rename = "miniboss")]
    MiniBoss {
        end_time_ms: Milliseconds,
        required_hits: u32,
    },

    #[serde(rename = "dual")]
    DualHit,

    #[serde(rename = "star_sheet")]
    StarSheet {
        lane: LaneDecl,
        end_time_ms: Milliseconds,
    },
}

impl ObjectKindDecl {
    pub fn end_time_ms(&self) -> Option<Milliseconds> {
        match self {
            ObjectKindDecl::Minion { .. } | ObjectKindDecl::Sawblade { .. } | ObjectKindDecl::DualHit => {
                None
            }
            ObjectKindDecl::MiniBoss { end_time_ms, .. } | ObjectKindDecl::StarSheet { end_time_ms, .. } => {
                Some(*end_time_ms)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ActionDecl {
    Air,
    Ground,
    Fever,
}

/// A recorded input stream, played back against a chart.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Replay {
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReplayFrame {
    pub time_ms: Milliseconds,
    pub action: ActionDecl,
    #[serde(default = "default_pressed")]
    pub pressed: bool,
}

fn default_pressed() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TierDecl {
    Great,
    Good,
    Ok,
    Meh,
    Miss,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WindowDecl {
    pub tier: TierDecl,
    pub early_ms: Milliseconds,
    pub late_ms: Milliseconds,
}

impl WindowDecl {
    pub const fn symmetric(tier: TierDecl, half_width_ms: Milliseconds) -> Self {
        Self {
            tier,
            early_ms: half_width_ms,
            late_ms: half_width_ms,
        }
    }
}

/// What a star sheet tail resolves to when it expires without a release.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TailTimeout {
    /// Holding through the tail counts as a perfect release.
    #[default]
    AutoGreat,
    Miss,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeverConfig {
    pub duration_ms: Milliseconds,
    /// Number of max-tier judgements needed to fill the meter from empty.
    pub perfect_hits_to_fill: u32,
}

impl Default for FeverConfig {
    fn default() -> Self {
        Self {
            duration_ms: 5000.0,
            perfect_hits_to_fill: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowsConfig {
    pub minion: Vec<WindowDecl>,
    pub sawblade: Vec<WindowDecl>,
}

impl Default for WindowsConfig {
    fn default() -> Self {
        Self {
            minion: vec![
                WindowDecl::symmetric(TierDecl::Great, 40.0),
                WindowDecl::symmetric(TierDecl::Good, 80.0),
                WindowDecl::symmetric(TierDecl::Meh, 120.0),
                WindowDecl::symmetric(TierDecl::Miss, 160.0),
            ],
            sawblade: vec![WindowDecl::symmetric(TierDecl::Miss, 80.0)],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RulesetConfig {
    pub fever: FeverConfig,
    pub windows: WindowsConfig,
    /// Scale applied to the minion windows when judging star sheet releases.
    pub release_window_lenience: f64,
    pub tail_timeout: TailTimeout,
}

impl Default for RulesetConfig {
    fn default() -> Self {
        Self {
            fever: FeverConfig::default(),
            windows: WindowsConfig::default(),
            release_window_lenience: 3.0,
            tail_timeout: TailTimeout::default(),
        }
    }
}
