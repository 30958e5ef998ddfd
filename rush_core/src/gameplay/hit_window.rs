//! Timing windows and the tiers they resolve to.

use rush_schema::{Milliseconds, TierDecl, WindowDecl};

use crate::error::ChartError;

/// Judgement tiers, ordered from worst to best.
///
/// `None` is not a judgement: it is what [`HitWindows::classify`] returns when an
/// offset falls outside every window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HitResult {
    None,
    Miss,
    Meh,
    Ok,
    Good,
    Great,
}

impl HitResult {
    pub const MIN: HitResult = HitResult::Miss;
    pub const MAX: HitResult = HitResult::Great;

    pub fn is_hit(self) -> bool {
        self > HitResult::Miss
    }

    pub fn numeric_value(self) -> u32 {
        match self {
            HitResult::None | HitResult::Miss => 0,
            HitResult::Meh => 50,
            HitResult::Ok => 100,
            HitResult::Good => 200,
            HitResult::Great => 300,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl From<TierDecl> for HitResult {
    fn from(tier: TierDecl) -> Self {
        match tier {
            TierDecl::Great => HitResult::Great,
            TierDecl::Good => HitResult::Good,
            TierDecl::Ok => HitResult::Ok,
            TierDecl::Meh => HitResult::Meh,
            TierDecl::Miss => HitResult::Miss,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitWindow {
    pub result: HitResult,
    pub early: Milliseconds,
    pub late: Milliseconds,
}

impl HitWindow {
    pub fn symmetric(result: HitResult, half_width: Milliseconds) -> Self {
        Self {
            result,
            early: half_width,
            late: half_width,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.early > 0.0 || self.late > 0.0
    }

    /// Boundaries are inclusive. A side with a non-positive width matches nothing.
    pub fn contains(&self, offset: Milliseconds) -> bool {
        let early_side = offset <= 0.0 && self.early > 0.0 && -offset <= self.early;
        let late_side = offset >= 0.0 && self.late > 0.0 && offset <= self.late;
        early_side || late_side
    }
}

/// An ordered set of windows, tightest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitWindows {
    windows: Vec<HitWindow>,
}

impl HitWindows {
    pub fn new(windows: Vec<HitWindow>) -> Result<Self, ChartError> {
        for pair in windows.windows(2) {
            let (tight, wide) = (pair[0], pair[1]);
            if tight.result <= wide.result {
                return Err(ChartError::new(
                    "E2001",
                    format!(
                        "window tiers must be listed best first ({:?} before {:?})",
                        tight.result, wide.result
                    ),
                ));
            }
        }

        if let Some(w) = windows.iter().find(|w| w.result == HitResult::None) {
            return Err(ChartError::new(
                "E2002",
                format!("window with tier {:?} cannot be declared", w.result),
            ));
        }

        let enabled: Vec<&HitWindow> = windows.iter().filter(|w| w.is_enabled()).collect();
        for pair in enabled.windows(2) {
            let (tight, wide) = (pair[0], pair[1]);
            let early_nested = tight.early <= 0.0 || tight.early <= wide.early;
            let late_nested = tight.late <= 0.0 || tight.late <= wide.late;
            if !early_nested || !late_nested {
                return Err(ChartError::new(
                    "E2003",
                    format!(
                        "window {:?} ({}/{}) is wider than {:?} ({}/{})",
                        tight.result, tight.early, tight.late, wide.result, wide.early, wide.late
                    ),
                ));
            }
        }

        Ok(Self { windows })
    }

    pub fn from_decls(decls: &[WindowDecl]) -> Result<Self, ChartError> {
        Self::new(
            decls
                .iter()
                .map(|d| HitWindow {
                    result: d.tier.into(),
                    early: d.early_ms,
                    late: d.late_ms,
                })
                .collect(),
        )
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Tightest containing window wins; anything outside every window is `None`.
    pub fn classify(&self, offset: Milliseconds) -> HitResult {
        self.windows
            .iter()
            .find(|w| w.contains(offset))
            .map_or(HitResult::None, |w| w.result)
    }

    pub fn is_allowed(&self, result: HitResult) -> bool {
        self.windows.iter().any(|w| w.result == result && w.is_enabled())
    }

    pub fn widest_early(&self) -> Milliseconds {
        self.windows
            .iter()
            .map(|w| w.early)
            .fold(0.0, f64::max)
    }

    pub fn widest_late(&self) -> Milliseconds {
        self.windows
            .iter()
            .map(|w| w.late)
            .fold(0.0, f64::max)
    }

    /// Whether an input at `offset` could still land inside some window.
    pub fn can_be_hit(&self, offset: Milliseconds) -> bool {
        offset <= self.widest_late()
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            windows: self
                .windows
                .iter()
                .map(|w| HitWindow {
                    result: w.result,
                    early: w.early * factor,
                    late: w.late * factor,
                })
                .collect(),
        }
    }
}
