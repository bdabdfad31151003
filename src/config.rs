//! Layered settings for all three games.
//!
//! Built-in defaults are overridden by an optional TOML file, which is in turn
//! overridden by `MINIGAMES_`-prefixed environment variables. Nested keys are
//! separated with `__`, e.g. `MINIGAMES_WASTE__SEED=7`.

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GameResult;
use crate::games::dots::DotsConfig;
use crate::games::maze::MazeConfig;
use crate::games::waste::WasteConfig;

pub const ENV_PREFIX: &str = "MINIGAMES_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub maze: MazeConfig,
    pub dots: DotsConfig,
    pub waste: WasteConfig,
}

impl Settings {
    /// The provider stack [`Settings::load`] extracts from.
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads settings from the defaults, the optional TOML file at `path` and
    /// `MINIGAMES_*` environment variables, later layers winning.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Settings`](crate::error::GameError::Settings) if the
    /// file is unreadable TOML or any layer holds a value of the wrong type.
    pub fn load(path: Option<&Path>) -> GameResult<Self> {
        let settings = Self::from_figment(Self::figment(path))?;
        debug!(?path, seed = ?settings.waste.seed, "Settings loaded");
        Ok(settings)
    }

    pub fn from_figment(figment: Figment) -> GameResult<Self> {
        figment.extract().map_err(|e| Box::new(e).into())
    }
}
