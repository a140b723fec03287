use crate::model::{
    profile::ChartType,
    tiers::{RATING_BADGE_NAMES, rank_badge_stem},
};

/// Logical asset identity. Every variant maps onto exactly one file in the resource tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AssetKey {
    /// Song jacket, keyed by the lookup id from [`cover_lookup_id`].
    Cover(String),
    /// Jacket substituted when a cover cannot be resolved.
    DefaultCover,
    /// Class-rank plate, keyed by the raw tier id.
    RankBadge(u32),
    /// Rating frame, keyed by the ladder index from
    /// [`rating_badge_index`](crate::model::tiers::rating_badge_index).
    RatingBadge(usize),
    RateBadge(String),
    ComboBadge(String),
    SyncBadge(String),
    /// Per-difficulty card template, keyed by the difficulty label.
    DifficultyFrame(String),
    ChartTypeIcon(ChartType),
    CustomPlate(String),
    UserBackground(String),
    /// Player avatar keyed by session; fetched on a local miss.
    UserAvatar(String),
    SheetBackground { custom: bool },
}

impl AssetKey {
    /// Path relative to the resource root, using `/` separators.
    pub fn rel_path(&self) -> String {
        match self {
            AssetKey::Cover(id) => format!("cover/{id}.png"),
            AssetKey::DefaultCover => "default_cover.png".to_string(),
            AssetKey::RankBadge(id) => {
                format!("rank/UI_CMN_DaniPlate_{}.png", rank_badge_stem(*id))
            }
            AssetKey::RatingBadge(idx) => {
                let name = RATING_BADGE_NAMES
                    .get(*idx)
                    .copied()
                    .unwrap_or(RATING_BADGE_NAMES[RATING_BADGE_NAMES.len() - 1]);
                format!("pic/{name}.png")
            }
            AssetKey::RateBadge(tier) => format!("pic/rate_{tier}.png"),
            AssetKey::ComboBadge(tier) => format!("pic/combo_{tier}.png"),
            AssetKey::SyncBadge(tier) => format!("pic/sync_{tier}.png"),
            AssetKey::DifficultyFrame(label) => {
                format!("pic/chart_{}.png", difficulty_frame_stem(label))
            }
            AssetKey::ChartTypeIcon(ChartType::Standard) => "pic/chart_type_sd.png".to_string(),
            AssetKey::ChartTypeIcon(ChartType::Deluxe) => "pic/chart_type_dx.png".to_string(),
            AssetKey::CustomPlate(id) => format!("plate/plate_{id}.png"),
            AssetKey::UserBackground(session) => format!("user/{session}.png"),
            AssetKey::UserAvatar(session) => format!("avatar/{session}.png"),
            AssetKey::SheetBackground { custom: false } => "pic/b50_bg.png".to_string(),
            AssetKey::SheetBackground { custom: true } => "pic/b50_bg_custom.png".to_string(),
        }
    }

    /// File name on the remote source, for keys that can be fetched on a local miss.
    pub fn remote_name(&self) -> Option<String> {
        match self {
            AssetKey::Cover(id) => Some(format!("{id}.png")),
            AssetKey::UserAvatar(session) => Some(format!("avatar/{session}.png")),
            _ => None,
        }
    }

    /// Asset substituted when this key cannot be resolved; `None` means a transparent image.
    pub fn placeholder(&self) -> Option<AssetKey> {
        match self {
            AssetKey::Cover(_) => Some(AssetKey::DefaultCover),
            _ => None,
        }
    }

    /// Reject keys whose variable part could escape its directory.
    pub fn validate(&self) -> crate::SheetResult<()> {
        let part = match self {
            AssetKey::Cover(s)
            | AssetKey::RateBadge(s)
            | AssetKey::ComboBadge(s)
            | AssetKey::SyncBadge(s)
            | AssetKey::DifficultyFrame(s)
            | AssetKey::CustomPlate(s)
            | AssetKey::UserBackground(s)
            | AssetKey::UserAvatar(s) => s.as_str(),
            _ => return Ok(()),
        };
        if part.is_empty() {
            return Err(crate::SheetError::asset("asset key must be non-empty"));
        }
        if part.contains(['/', '\\']) || part.contains("..") {
            return Err(crate::SheetError::asset(format!(
                "asset key '{part}' must not contain path separators or '..'"
            )));
        }
        Ok(())
    }
}

/// Cover lookup id for a song id.
///
/// Ids below 1000 are zero-padded to five digits, ids below 10000 get a literal `1` prefix,
/// anything larger is used as is.
pub fn cover_lookup_id(song_id: u32) -> String {
    match song_id {
        0..1000 => format!("{song_id:05}"),
        1000..10000 => format!("1{song_id}"),
        _ => song_id.to_string(),
    }
}

/// `Re:MASTER` -> `remaster`.
pub fn difficulty_frame_stem(label: &str) -> String {
    label.to_lowercase().replace(':', "")
}

#[cfg(test)]
#[path = "../../tests/unit/assets/key.rs"]
mod tests;
