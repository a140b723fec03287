use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    foundation::error::{SheetError, SheetResult},
    text::fonts::FontRole,
};

/// Font file (relative to the resource root) and point size bound to one role.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontSpec {
    pub path: PathBuf,
    pub size: f32,
}

impl FontSpec {
    fn new(path: &str, size: f32) -> Self {
        Self {
            path: PathBuf::from(path),
            size,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FontsConfig {
    pub name: FontSpec,
    pub title: FontSpec,
    pub score: FontSpec,
    pub label: FontSpec,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            name: FontSpec::new("font/NotoSansSC-Regular.otf", 36.0),
            title: FontSpec::new("font/NotoSansSC-Bold.otf", 20.0),
            score: FontSpec::new("font/Montserrat-Bold.ttf", 32.0),
            label: FontSpec::new("font/Montserrat-Bold.ttf", 24.0),
        }
    }
}

impl FontsConfig {
    pub fn get(&self, role: FontRole) -> &FontSpec {
        match role {
            FontRole::Name => &self.name,
            FontRole::Title => &self.title,
            FontRole::Score => &self.score,
            FontRole::Label => &self.label,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ThreadingConfig {
    /// Render cards and fetch covers on the worker pool; `false` runs everything inline.
    pub parallel: bool,
    /// Worker count; `None` uses rayon's default.
    pub threads: Option<usize>,
}

impl Default for ThreadingConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

/// Process-wide render settings, loaded once at startup.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub resource_root: PathBuf,
    pub fonts: FontsConfig,
    /// Base URL covers (and session avatars under `avatar/`) are fetched from on a local miss;
    /// `None` disables fetching.
    pub cover_base_url: Option<String>,
    pub fetch_timeout_secs: u64,
    pub threading: ThreadingConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            resource_root: PathBuf::from("resources/maimai"),
            fonts: FontsConfig::default(),
            cover_base_url: Some("https://www.diving-fish.com/covers/".to_string()),
            fetch_timeout_secs: 10,
            threading: ThreadingConfig::default(),
        }
    }
}

impl RenderConfig {
    pub fn from_json_file(path: &Path) -> SheetResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read render config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_slice(&bytes)
            .map_err(|e| SheetError::config(format!("parse '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> SheetResult<()> {
        for role in FontRole::ALL {
            let spec = self.fonts.get(role);
            if !spec.size.is_finite() || spec.size <= 0.0 {
                return Err(SheetError::config(format!(
                    "font size for {role:?} must be finite and > 0"
                )));
            }
        }
        if self.threading.threads == Some(0) {
            return Err(SheetError::config(
                "threading.threads must be >= 1 when set",
            ));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(SheetError::config("fetch_timeout_secs must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
