use anyhow::Context;
use serde::{Deserialize, Deserializer};

use crate::layout::grid::SheetSection;

/// Number of difficulty levels, and so the exclusive bound of [`ScoreEntry::difficulty_index`].
pub const DIFFICULTY_LEVELS: usize = 5;

/// Chart family a score was set on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ChartType {
    #[serde(rename = "SD")]
    Standard,
    #[serde(rename = "DX")]
    Deluxe,
}

/// One best-score record as delivered by the ranking service.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScoreEntry {
    pub title: String,
    pub song_id: u32,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    /// Difficulty name (`Basic`, `Advanced`, `Expert`, `Master`, `Re:MASTER`).
    #[serde(rename = "level_label")]
    pub difficulty_label: String,
    /// Index into the five-color difficulty palette; always below [`DIFFICULTY_LEVELS`].
    #[serde(rename = "level_index")]
    pub difficulty_index: usize,
    #[serde(rename = "achievements")]
    pub achievement_pct: f64,
    #[serde(rename = "ds")]
    pub internal_difficulty: f64,
    #[serde(rename = "ra")]
    pub rating_contribution: i32,
    #[serde(rename = "rate")]
    pub rate_tier: String,
    #[serde(rename = "fc", default, deserialize_with = "empty_as_none")]
    pub full_combo_tier: Option<String>,
    #[serde(rename = "fs", default, deserialize_with = "empty_as_none")]
    pub full_sync_tier: Option<String>,
}

/// Standard and Deluxe best-score groups, in caller order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScoreCharts {
    #[serde(rename = "sd", default)]
    pub standard: Vec<ScoreEntry>,
    #[serde(rename = "dx", default)]
    pub deluxe: Vec<ScoreEntry>,
}

/// Immutable snapshot of a player record, consumed by the sheet composer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlayerProfile {
    pub nickname: String,
    pub rating: i32,
    #[serde(rename = "additional_rating")]
    pub additional_rating_tier: u32,
    #[serde(rename = "plate", default, deserialize_with = "null_as_empty")]
    pub plate_text: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub custom_plate_id: Option<String>,
    #[serde(default)]
    pub charts: ScoreCharts,
}

impl PlayerProfile {
    pub fn entries(&self, section: SheetSection) -> &[ScoreEntry] {
        match section {
            SheetSection::Standard => &self.charts.standard,
            SheetSection::Deluxe => &self.charts.deluxe,
        }
    }

    /// Parse a ranking-service record and reject entries the card renderer cannot draw.
    pub fn from_json_slice(bytes: &[u8]) -> crate::SheetResult<Self> {
        let profile: Self = serde_json::from_slice(bytes)
            .context("parse player profile JSON")
            .map_err(crate::SheetError::from)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> crate::SheetResult<()> {
        for section in SheetSection::ALL {
            for (i, entry) in self.entries(section).iter().enumerate() {
                if entry.difficulty_index >= DIFFICULTY_LEVELS {
                    return Err(crate::SheetError::profile(format!(
                        "{section:?} entry {i} ('{}') has level_index {}, expected 0..={}",
                        entry.title,
                        entry.difficulty_index,
                        DIFFICULTY_LEVELS - 1
                    )));
                }
            }
        }
        Ok(())
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "../../tests/unit/model/profile.rs"]
mod tests;
