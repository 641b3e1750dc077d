use anyhow::{Result, anyhow};
use directories::UserDirs;
use log::{debug, info};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplaySection {
    #[serde(default = "default_true")]
    pub dedup_source_frames: bool,
    #[serde(default)]
    pub changes_only: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    #[serde(default)]
    pub pretty: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub replay: ReplaySection,
    #[serde(default)]
    pub output: OutputSection,
}

fn default_true() -> bool {
    true
}

impl Default for ReplaySection {
    fn default() -> Self {
        Self {
            dedup_source_frames: true,
            changes_only: false,
        }
    }
}

pub fn default_config_text() -> &'static str {
    include_str!("../config/default.toml")
}

pub fn config_dir() -> Result<PathBuf> {
    let home = UserDirs::new()
        .ok_or_else(|| anyhow!("could not locate home directory"))?
        .home_dir()
        .to_path_buf();
    Ok(home.join(".config").join("gesturectl"))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

impl Config {
    pub fn parse(txt: &str, origin: &str) -> Result<Self> {
        let cfg: Config =
            toml::from_str(txt).map_err(|e| anyhow!("failed to parse {origin}: {e}"))?;
        Ok(cfg)
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let txt = fs::read_to_string(path)
            .map_err(|e| anyhow!("failed to read {}: {e}", path.display()))?;
        Self::parse(&txt, &path.display().to_string())
    }

    /// Explicit path, else the installed file, else the built-in default.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(p) = explicit {
            return Self::load_file(p);
        }
        match config_path() {
            Ok(p) if p.exists() => Self::load_file(&p),
            Ok(p) => {
                debug!("no config at {}; using built-in default", p.display());
                Self::parse(default_config_text(), "built-in default")
            }
            Err(e) => {
                debug!("{e}; using built-in default");
                Self::parse(default_config_text(), "built-in default")
            }
        }
    }

    /// Writes the default file unless one already exists. Returns its path.
    pub fn install_default() -> Result<PathBuf> {
        let dir = config_dir()?;
        fs::create_dir_all(&dir)?;
        let path = dir.join("config.toml");
        if path.exists() {
            info!("config already present at {}", path.display());
        } else {
            fs::write(&path, default_config_text())?;
            info!("installed default config at {}", path.display());
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_default_parses_to_default() {
        let cfg = Config::parse(default_config_text(), "test").unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn missing_sections_fall_back() {
        let cfg = Config::parse("[output]\npretty = true\n", "test").unwrap();
        assert!(cfg.output.pretty);
        assert!(cfg.replay.dedup_source_frames);
        assert!(!cfg.replay.changes_only);
    }

    #[test]
    fn thresholds_are_not_configurable() {
        let err = Config::parse("[replay]\ndebounce_ms = 80\n", "test").unwrap_err();
        assert!(err.to_string().contains("failed to parse test"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/gesturectl.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
