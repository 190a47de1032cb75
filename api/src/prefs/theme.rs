use serde::Deserialize;
use serde::Serialize;
use std::env;
use std::str::FromStr;

/// Light or dark page theme, mapped onto Pico's `data-theme` attribute.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Debug,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIs,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Reads `STAKING_THEME` ("light" or "dark"). Anything else means light.
    pub fn from_env() -> Self {
        env::var("STAKING_THEME")
            .ok()
            .and_then(|s| Self::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Value for the `data-theme` attribute.
    pub fn as_attr(&self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_and_parses() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
        assert_eq!(Theme::from_str("DARK").unwrap(), Theme::Dark);
        assert_eq!(Theme::Dark.as_attr(), "dark");
    }
}
