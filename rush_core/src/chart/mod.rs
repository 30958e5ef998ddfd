use rush_schema::{LaneDecl, Milliseconds, ObjectKindDecl, RulesetConfig, RushChart};

use crate::error::ChartError;
use crate::gameplay::hit_window::HitWindows;

pub type ObjectId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lane {
    Air,
    Ground,
}

impl Lane {
    pub const ALL: [Lane; 2] = [Lane::Air, Lane::Ground];
}

impl From<LaneDecl> for Lane {
    fn from(lane: LaneDecl) -> Self {
        match lane {
            LaneDecl::Air => Lane::Air,
            LaneDecl::Ground => Lane::Ground,
        }
    }
}

/// The closed set of object archetypes. Each one brings its own aggregation rule.
#[derive(Debug, Clone, PartialEq)]
pub enum HitObjectKind {
    /// A plain laned hit.
    Minion { lane: Lane, bonus: bool },
    /// Must be dodged; never takes input.
    Sawblade { lane: Lane },
    /// Hammered with any attack until `end_time`; scored from how many ticks landed.
    MiniBoss {
        end_time: Milliseconds,
        required_hits: u32,
    },
    /// Needs both lanes at once.
    DualHit,
    /// Held from `start_time` to `end_time`.
    StarSheet {
        lane: Lane,
        end_time: Milliseconds,
        tail_windows: HitWindows,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HitObject {
    pub id: ObjectId,
    pub start_time: Milliseconds,
    pub kind: HitObjectKind,
    pub windows: HitWindows,
}

impl HitObject {
    pub fn end_time(&self) -> Milliseconds {
        match &self.kind {
            HitObjectKind::MiniBoss { end_time, .. } | HitObjectKind::StarSheet { end_time, .. } => {
                *end_time
            }
            HitObjectKind::Minion { .. } | HitObjectKind::Sawblade { .. } | HitObjectKind::DualHit => {
                self.start_time
            }
        }
    }

    pub fn lane(&self) -> Option<Lane> {
        match &self.kind {
            HitObjectKind::Minion { lane, .. }
            | HitObjectKind::Sawblade { lane }
            | HitObjectKind::StarSheet { lane, .. } => Some(*lane),
            HitObjectKind::MiniBoss { .. } | HitObjectKind::DualHit => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Chart {
    /// Sorted by start time; `objects[i].id == i`.
    pub objects: Vec<HitObject>,
}

impl Chart {
    pub fn from_schema(chart: &RushChart, config: &RulesetConfig) -> Result<Self, ChartError> {
        let minion_windows = HitWindows::from_decls(&config.windows.minion)?;
        let sawblade_windows = HitWindows::from_decls(&config.windows.sawblade)?;

        let lenience = config.release_window_lenience;
        if !lenience.is_finite() || lenience <= 0.0 {
            return Err(ChartError::new(
                "E2004",
                format!("release window lenience must be positive (got {lenience})"),
            ));
        }
        let tail_windows = minion_windows.scaled(lenience);

        let mut objects = Vec::with_capacity(chart.objects.len());
        for (index, decl) in chart.objects.iter().enumerate() {
            let start_time = decl.time_ms;
            if !start_time.is_finite() {
                return Err(ChartError::new("E1001", "object time must be finite")
                    .with_object_index(index)
                    .with_time_ms(start_time));
            }

            if let Some(end) = decl.kind.end_time_ms() {
                if !end.is_finite() || end <= start_time {
                    return Err(ChartError::new(
                        "E1002",
                        format!("end time {end} must come after start time {start_time}"),
                    )
                    .with_object_index(index)
                    .with_time_ms(start_time));
                }
            }

            let (kind, windows) = match &decl.kind {
                ObjectKindDecl::Minion { lane, bonus } => (
                    HitObjectKind::Minion {
                        lane: (*lane).into(),
                        bonus: *bonus,
                    },
                    minion_windows.clone(),
                ),
                ObjectKindDecl::Sawblade { lane } => (
                    HitObjectKind::Sawblade { lane: (*lane).into() },
                    sawblade_windows.clone(),
                ),
                ObjectKindDecl::MiniBoss {
                    end_time_ms,
                    required_hits,
                } => {
                    if *required_hits == 0 {
                        return Err(ChartError::new("E3001", "miniboss needs at least one hit")
                            .with_object_index(index)
                            .with_time_ms(start_time));
                    }
                    (
                        HitObjectKind::MiniBoss {
                            end_time: *end_time_ms,
                            required_hits: *required_hits,
                        },
                        HitWindows::empty(),
                    )
                }
                ObjectKindDecl::DualHit => (HitObjectKind::DualHit, minion_windows.clone()),
                ObjectKindDecl::StarSheet { lane, end_time_ms } => (
                    HitObjectKind::StarSheet {
                        lane: (*lane).into(),
                        end_time: *end_time_ms,
                        tail_windows: tail_windows.clone(),
                    },
                    minion_windows.clone(),
                ),
            };

            objects.push(HitObject {
                id: 0,
                start_time,
                kind,
                windows,
            });
        }

        Ok(Self::from_objects(objects))
    }

    /// Sorts by start time (stable) and renumbers ids to match positions.
    pub fn from_objects(mut objects: Vec<HitObject>) -> Self {
        objects.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        for (id, object) in objects.iter_mut().enumerate() {
            object.id = id;
        }
        Self { objects }
    }
}
