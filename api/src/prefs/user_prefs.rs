use super::theme::Theme;
use serde::Deserialize;
use serde::Serialize;

/// Everything the user can choose about how the dashboard looks.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct UserPrefs {
    theme: Theme,
}

impl UserPrefs {
    pub fn from_env() -> Self {
        Self {
            theme: Theme::from_env(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }
}

impl Default for UserPrefs {
    fn default() -> Self {
        Self::from_env()
    }
}
