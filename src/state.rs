use bevy::prelude::*;

use crate::session::Phase;

/// App-level state. `Drawing` and `Playing` mirror the session's [`Phase`].
#[derive(States, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    #[default]
    Load,
    Drawing,
    Playing,
}

impl From<Phase> for GameState {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Drawing => GameState::Drawing,
            Phase::Playing => GameState::Playing,
        }
    }
}
