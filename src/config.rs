//! Per-scope roll settings.
//!
//! The library only ever reads a [`RollConfig`]. Where the values come from
//! is up to the caller; [`RollConfig::load`] layers defaults, an optional
//! TOML file and `ROLLCALL_` environment variables.

use std::path::Path;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};


/// Most dice a single roll may ask for unless configured otherwise.
pub const DEFAULT_MAX_DICE: u32 = 100;

/// Largest roll whose dice are listed one by one unless configured otherwise.
pub const DEFAULT_SHOW_INDIVIDUAL: usize = 10;


/// Settings consumed by evaluation and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollConfig {
    /// Most dice a single roll may ask for.
    pub max_dice: u32,
    /// Rolls with more dice than this are summarised instead of listed.
    pub show_individual: usize
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            max_dice: DEFAULT_MAX_DICE,
            show_individual: DEFAULT_SHOW_INDIVIDUAL
        }
    }
}

impl RollConfig {
    /// Loads settings from defaults, then `path` if given, then environment
    /// variables such as `ROLLCALL_MAX_DICE`.
    ///
    /// # Errors
    /// Returns a [`figment::Error`] if the file can't be parsed or a value has
    /// the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Env::prefixed("ROLLCALL_"))
            .extract()
    }
}
