use rush_core::chart::{HitObject, Lane};
use rush_core::gameplay::session::CollisionCheck;
use rush_core::input::events::RushAction;
use rush_schema::{Milliseconds, Replay};

/// Where the runner stands, reconstructed from a replay.
///
/// The runner starts on the ground and moves to the lane of each attack as it
/// is pressed. A sawblade hits whenever it shares the runner's lane. Being a
/// pure function of time, this stays correct when the clock runs backwards.
#[derive(Debug, Clone)]
pub struct ReplayPositions {
    moves: Vec<(Milliseconds, Lane)>,
}

impl ReplayPositions {
    pub fn from_replay(replay: &Replay) -> Self {
        let moves = replay
            .frames
            .iter()
            .filter(|f| f.pressed)
            .filter_map(|f| RushAction::from(f.action).lane().map(|lane| (f.time_ms, lane)))
            .collect();
        Self { moves }
    }

    pub fn lane_at(&self, now: Milliseconds) -> Lane {
        let idx = self.moves.partition_point(|&(t, _)| t <= now);
        match idx {
            0 => Lane::Ground,
            i => self.moves[i - 1].1,
        }
    }
}

impl CollisionCheck for ReplayPositions {
    fn collides_with(&self, object: &HitObject, now: Milliseconds) -> bool {
        object.lane() == Some(self.lane_at(now))
    }
}
