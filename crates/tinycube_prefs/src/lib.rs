//! User preferences.
//!
//! Built-in defaults are embedded in the binary. A user preferences file only
//! needs to contain the values that differ from the defaults.

#[macro_use]
extern crate lazy_static;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tinycube_core::ColorScheme;

mod animation;
mod view;

pub use animation::*;
pub use view::*;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

lazy_static! {
    /// Built-in default preferences.
    pub static ref DEFAULT_PREFS: Preferences =
        serde_norway::from_str(DEFAULT_PREFS_STR).expect("error loading default preferences");
}

/// All preferences.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Preferences {
    /// Twist animation preferences.
    pub animation: AnimationPreferences,
    /// Orbit camera preferences.
    pub view: ViewPreferences,
    /// Sticker colors.
    pub colors: ColorScheme,
}
impl Default for Preferences {
    fn default() -> Self {
        DEFAULT_PREFS.clone()
    }
}
impl Preferences {
    /// Loads preferences, layering the file at `user_path` (if any) on top of
    /// the defaults. If loading fails, logs a warning and returns the
    /// defaults.
    pub fn load(user_path: Option<&Path>) -> Self {
        Self::try_load(user_path).unwrap_or_else(|e| {
            log::warn!("Error loading preferences: {e}");
            Self::default()
        })
    }

    /// Loads preferences, layering the file at `user_path` (if any) on top of
    /// the defaults.
    pub fn try_load(user_path: Option<&Path>) -> eyre::Result<Self> {
        lazy_static::initialize(&DEFAULT_PREFS);

        // Load default preferences.
        let mut config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));

        // Load user preferences.
        if let Some(path) = user_path {
            log::debug!("Loading preferences from {}", path.display());
            config = config.add_source(config::File::from(path).format(PREFS_FILE_FORMAT));
        }

        let prefs: Self = config.build()?.try_deserialize()?;
        prefs.validate()?;
        Ok(prefs)
    }

    /// Saves preferences to a YAML file.
    pub fn save(&self, path: &Path) -> eyre::Result<()> {
        if let Some(p) = path.parent() {
            std::fs::create_dir_all(p)?;
        }
        serde_norway::to_writer(std::fs::File::create(path)?, self)?;
        Ok(())
    }

    fn validate(&self) -> eyre::Result<()> {
        let anim = &self.animation;
        eyre::ensure!(
            anim.twist_duration.is_finite() && anim.twist_duration >= 0.0,
            "twist duration must be a non-negative number; got {}",
            anim.twist_duration,
        );
        let view = &self.view;
        eyre::ensure!(
            0.0 < view.min_radius && view.min_radius <= view.max_radius,
            "invalid camera radius range {}..={}",
            view.min_radius,
            view.max_radius,
        );
        eyre::ensure!(
            (0.0..std::f32::consts::FRAC_PI_2).contains(&view.polar_margin),
            "polar margin must be between 0 and pi/2; got {}",
            view.polar_margin,
        );
        Ok(())
    }
}
