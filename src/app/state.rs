use bevy::prelude::*;

/// Scene flow: Title -> Rules -> Playing -> GameOver -> Playing ...
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// Game name and start prompt.
    #[default]
    Title,
    /// How to play.
    Rules,
    /// A run is in progress.
    Playing,
    /// The flower died; shows the final score until the player restarts.
    GameOver,
}

impl AppState {
    /// Scene reached by the `Advance` action, if any.
    pub fn advance(self) -> Option<AppState> {
        match self {
            AppState::Title => Some(AppState::Rules),
            AppState::Rules => Some(AppState::Playing),
            AppState::GameOver => Some(AppState::Playing),
            AppState::Playing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_walks_the_scene_flow() {
        assert_eq!(AppState::Title.advance(), Some(AppState::Rules));
        assert_eq!(AppState::Rules.advance(), Some(AppState::Playing));
        assert_eq!(AppState::Playing.advance(), None);
        assert_eq!(AppState::GameOver.advance(), Some(AppState::Playing));
    }
}
