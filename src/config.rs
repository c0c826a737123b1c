use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};

use crate::menu::DEFAULT_HOME_LABEL;
use crate::settings::{DisplayMode, DisplaySettings, Language};

pub const DEFAULT_NARROW_BELOW_PX: u32 = 1200;
pub const DEFAULT_DRAWER_WIDTH_PX: u32 = 230;
pub const COLLAPSED_DRAWER_WIDTH_PX: u32 = 65;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellSettings {
    pub menu_config: Option<PathBuf>,
    pub narrow_below_px: u32,
    pub drawer_width_px: u32,
    pub home_label: String,
    pub display: DisplaySettings,
}

impl ShellSettings {
    pub fn from_env() -> Result<Self> {
        // Load .env if present, but do not fail if file does not exist.
        let _ = dotenvy::dotenv();

        let menu_config = read_optional_env("NAVSHELL_MENU_CONFIG").map(PathBuf::from);

        let narrow_below_px = parse_u32_env("NAVSHELL_NARROW_BELOW_PX", DEFAULT_NARROW_BELOW_PX)?;
        ensure!(
            narrow_below_px > 0,
            "NAVSHELL_NARROW_BELOW_PX must be greater than 0"
        );

        let drawer_width_px = parse_u32_env("NAVSHELL_DRAWER_WIDTH", DEFAULT_DRAWER_WIDTH_PX)?;
        ensure!(
            drawer_width_px > COLLAPSED_DRAWER_WIDTH_PX,
            "NAVSHELL_DRAWER_WIDTH must be greater than the collapsed width ({COLLAPSED_DRAWER_WIDTH_PX}px)"
        );

        let home_label = read_optional_env("NAVSHELL_HOME_LABEL")
            .unwrap_or_else(|| DEFAULT_HOME_LABEL.to_owned());

        let language = read_optional_env("NAVSHELL_LANGUAGE")
            .unwrap_or_else(|| Language::En.as_str().to_owned())
            .parse::<Language>()
            .context("failed to parse NAVSHELL_LANGUAGE")?;
        let mode = read_optional_env("NAVSHELL_DISPLAY_MODE")
            .unwrap_or_else(|| DisplayMode::Light.as_str().to_owned())
            .parse::<DisplayMode>()
            .context("failed to parse NAVSHELL_DISPLAY_MODE")?;

        Ok(Self {
            menu_config,
            narrow_below_px,
            drawer_width_px,
            home_label,
            display: DisplaySettings { language, mode },
        })
    }

    pub fn is_narrow(&self, viewport_width_px: f32) -> bool {
        viewport_width_px < self.narrow_below_px as f32
    }
}

fn read_optional_env(name: &str) -> Option<String> {
    env::var(name).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        }
    })
}

fn parse_u32_env(name: &str, default: u32) -> Result<u32> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .with_context(|| format!("failed to parse {name} as u32")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use crate::settings::{DisplayMode, DisplaySettings, Language};

    use super::{DEFAULT_DRAWER_WIDTH_PX, DEFAULT_NARROW_BELOW_PX, ShellSettings};

    #[test]
    fn narrow_threshold_is_exclusive() {
        let settings = ShellSettings {
            menu_config: None,
            narrow_below_px: DEFAULT_NARROW_BELOW_PX,
            drawer_width_px: DEFAULT_DRAWER_WIDTH_PX,
            home_label: "Home".to_owned(),
            display: DisplaySettings {
                language: Language::En,
                mode: DisplayMode::Light,
            },
        };

        assert!(settings.is_narrow(1199.5));
        assert!(!settings.is_narrow(1200.0));
    }
}
