use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Waiting for the tour data.
    #[default]
    Loading,
    Running,
    /// Tour data could not be loaded; nothing else will happen.
    Failed,
}

/// What the status banner shows.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub enum ViewerStatus {
    #[default]
    LoadingTour,
    LoadingScene(String),
    Failed(String),
    Idle,
}

impl ViewerStatus {
    pub fn message(&self) -> Option<String> {
        match self {
            Self::LoadingTour => Some("Loading tour...".to_string()),
            Self::LoadingScene(name) => Some(format!("Loading {name}...")),
            Self::Failed(reason) => Some(reason.clone()),
            Self::Idle => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}
