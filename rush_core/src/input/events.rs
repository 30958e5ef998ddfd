use rush_schema::{ActionDecl, Milliseconds};

use crate::chart::Lane;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RushAction {
    AirAttack,
    GroundAttack,
    Fever,
}

impl RushAction {
    pub fn lane(self) -> Option<Lane> {
        match self {
            RushAction::AirAttack => Some(Lane::Air),
            RushAction::GroundAttack => Some(Lane::Ground),
            RushAction::Fever => None,
        }
    }
}

impl From<ActionDecl> for RushAction {
    fn from(action: ActionDecl) -> Self {
        match action {
            ActionDecl::Air => RushAction::AirAttack,
            ActionDecl::Ground => RushAction::GroundAttack,
            ActionDecl::Fever => RushAction::Fever,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    /// Clock time when the event occurred
    pub timestamp: Milliseconds,
    pub action: RushAction,
    pub pressed: bool,
}
