use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::Deserialize;

const CONFIG_FILE: &str = "config.json";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compositor { Hyprland, Sway, Niri }

impl Compositor {
    pub fn detect() -> Self {
        Self::from_env(|key| std::env::var_os(key).is_some())
    }

    fn from_env(has: impl Fn(&str) -> bool) -> Self {
        if has("HYPRLAND_INSTANCE_SIGNATURE") {
            Compositor::Hyprland
        } else if has("SWAYSOCK") {
            Compositor::Sway
        } else if has("NIRI_SOCKET") {
            Compositor::Niri
        } else {
            Compositor::Hyprland
        }
    }

    fn config_subdir(self) -> &'static str {
        match self {
            Compositor::Hyprland => "hypr",
            Compositor::Sway     => "sway",
            Compositor::Niri     => "niri",
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SplashConfig {
    #[serde(skip)]
    pub dir:                   PathBuf,
    /// Highest priority first.
    pub background_candidates: Vec<PathBuf>,
    pub character_candidates:  Vec<PathBuf>,
}

impl Default for SplashConfig {
    fn default() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::rooted(&base, Compositor::detect())
    }
}

impl SplashConfig {
    /// Default layout under `base` (normally `~/.config`).
    pub fn rooted(base: &Path, compositor: Compositor) -> Self {
        let dir = base.join("splash");
        Self {
            background_candidates: vec![
                dir.join("background.png"),
                dir.join("wallpaper.png"),
                base.join(compositor.config_subdir()).join("wallpaper.png"),
            ],
            character_candidates: vec![dir.join("niko.png")],
            dir,
        }
    }

    pub fn load() -> Self {
        let defaults = Self::default();
        let path = defaults.dir.join(CONFIG_FILE);
        match Self::read_overrides(&path, defaults.clone()) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("ignoring {}: {e:#}", path.display());
                defaults
            }
        }
    }

    fn read_overrides(path: &Path, defaults: Self) -> Result<Self> {
        if !path.exists() {
            return Ok(defaults);
        }
        let data = std::fs::read_to_string(path).context("reading config")?;
        Self::parse(&data, defaults)
    }

    fn parse(data: &str, defaults: Self) -> Result<Self> {
        let mut c: Self = serde_json::from_str(data).context("parsing config")?;
        c.dir = defaults.dir;
        Ok(c)
    }

    pub fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir).with_context(|| format!("creating {}", self.dir.display()))
    }

    /// Hints for images the user could add. Purely informational.
    pub fn startup_tips(&self) -> Vec<String> {
        let mut tips = Vec::new();
        if let Some(first) = self.character_candidates.first() {
            if !self.character_candidates.iter().any(|p| p.exists()) {
                tips.push(format!("Tip: add a character image at {} for better visuals!", first.display()));
            }
        }
        // the compositor wallpaper is a last resort, not something to point users at
        let user_backgrounds = &self.background_candidates[..self.background_candidates.len().min(2)];
        if let Some(first) = user_backgrounds.first() {
            if !user_backgrounds.iter().any(|p| p.exists()) {
                tips.push(format!("Tip: add a background image at {}", first.display()));
            }
        }
        tips
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_candidates_follow_priority_order() {
        let c = SplashConfig::rooted(Path::new("/home/u/.config"), Compositor::Sway);
        assert_eq!(c.dir, PathBuf::from("/home/u/.config/splash"));
        assert_eq!(c.background_candidates, [
            PathBuf::from("/home/u/.config/splash/background.png"),
            PathBuf::from("/home/u/.config/splash/wallpaper.png"),
            PathBuf::from("/home/u/.config/sway/wallpaper.png"),
        ]);
        assert_eq!(c.character_candidates, [PathBuf::from("/home/u/.config/splash/niko.png")]);
    }

    #[test]
    fn compositor_detection_prefers_hyprland() {
        assert_eq!(Compositor::from_env(|k| k == "NIRI_SOCKET"), Compositor::Niri);
        assert_eq!(Compositor::from_env(|k| k == "SWAYSOCK" || k == "HYPRLAND_INSTANCE_SIGNATURE"), Compositor::Hyprland);
        assert_eq!(Compositor::from_env(|_| false), Compositor::Hyprland);
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let defaults = SplashConfig::rooted(Path::new("/cfg"), Compositor::Hyprland);
        let c = SplashConfig::parse(r#"{ "character_candidates": ["/art/niko.webp"] }"#, defaults.clone()).unwrap();
        assert_eq!(c.character_candidates, [PathBuf::from("/art/niko.webp")]);
        assert_eq!(c.dir, defaults.dir);
        assert_eq!(c.background_candidates.len(), 3);
        assert!(SplashConfig::parse("{ nope", defaults).is_err());
    }

    #[test]
    fn tips_name_missing_images() {
        let dir = std::env::temp_dir().join(format!("oneshot-splash-{}-tips", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let c = SplashConfig::rooted(&dir, Compositor::Hyprland);
        c.ensure_dir().unwrap();
        assert!(c.dir.is_dir());

        let tips = c.startup_tips();
        assert_eq!(tips.len(), 2);
        assert!(tips[0].contains("niko.png"));
        assert!(tips[1].contains("background.png"));

        std::fs::write(c.dir.join("wallpaper.png"), b"x").unwrap();
        std::fs::write(c.dir.join("niko.png"), b"x").unwrap();
        assert!(c.startup_tips().is_empty());
    }
}
