use image::RgbaImage;

use crate::{
    assets::key::{AssetKey, cover_lookup_id},
    foundation::core::{Rgba8, Size},
    layout::grid::{CARD_SIZE, GridSlot},
    model::profile::{DIFFICULTY_LEVELS, ScoreEntry},
    render::{composite::place, context::RenderContext},
    text::{
        draw::{TextSpec, draw_text_or_skip},
        fonts::FontRole,
        width::truncate_title,
    },
};

pub const COVER_SIZE: Size = Size::new(90, 90);
pub const RATE_BADGE_SIZE: Size = Size::new(80, 40);
pub const STATUS_BADGE_SIZE: Size = Size::new(60, 40);

/// Accent per difficulty index (Basic, Advanced, Expert, Master, Re:MASTER).
pub const DIFFICULTY_COLORS: [Rgba8; DIFFICULTY_LEVELS] = [
    Rgba8::opaque(69, 193, 36),
    Rgba8::opaque(255, 186, 1),
    Rgba8::opaque(255, 90, 102),
    Rgba8::opaque(134, 49, 200),
    Rgba8::opaque(207, 144, 240),
];

const COVER_AT: (i64, i64) = (25, 25);
const RATE_BADGE_AT: (i64, i64) = (305, 45);
const COMBO_BADGE_AT: (i64, i64) = (290, 84);
const SYNC_BADGE_AT: (i64, i64) = (325, 84);
const CHART_TYPE_AT: (i64, i64) = (68, 88);
const STATS_BASELINE: f64 = 111.0;
const INTERNAL_DIFFICULTY_SIZE: f32 = 20.0;

/// One finished card and the slot it belongs in.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedCard {
    pub slot: GridSlot,
    pub image: RgbaImage,
}

/// Compose the card for `entry` into a fresh [`CARD_SIZE`] image.
///
/// Cover resolution runs alongside title truncation and frame loading; drawing starts once both
/// are in. Unresolvable assets are replaced by placeholders, so this never fails. `compact`
/// omits the `#rank` marker.
///
/// # Panics
///
/// If `entry.difficulty_index` is not below [`DIFFICULTY_LEVELS`]. Profiles built with
/// [`PlayerProfile::from_json_slice`](crate::PlayerProfile::from_json_slice) are already checked.
#[tracing::instrument(skip_all, fields(song_id = entry.song_id, slot = ?slot))]
pub fn render_card(
    ctx: &RenderContext,
    entry: &ScoreEntry,
    slot: GridSlot,
    compact: bool,
) -> RenderedCard {
    let accent = DIFFICULTY_COLORS[entry.difficulty_index];
    let assets = ctx.assets();
    let cover_key = AssetKey::Cover(cover_lookup_id(entry.song_id));

    let (cover, (title, frame)) = ctx.join(
        || assets.image_or_placeholder(&cover_key, COVER_SIZE),
        || {
            let frame = assets.image_or_placeholder(
                &AssetKey::DifficultyFrame(entry.difficulty_label.clone()),
                CARD_SIZE,
            );
            (truncate_title(&entry.title), frame)
        },
    );

    let fonts = ctx.fonts();
    let mut card = frame.image;
    place(&mut card, &cover.image, COVER_AT.0, COVER_AT.1);

    draw_text_or_skip(
        &mut card,
        fonts,
        &TextSpec::new(&title, FontRole::Title, 130.0, 32.5)
            .color(Rgba8::WHITE)
            .anchor(0.0, 0.5),
    );
    let achievement = format!("{:.4}%", entry.achievement_pct);
    draw_text_or_skip(
        &mut card,
        fonts,
        &TextSpec::new(&achievement, FontRole::Score, 129.0, 62.5)
            .color(Rgba8::WHITE)
            .anchor(0.0, 0.5),
    );

    let rate = assets.image_or_placeholder(
        &AssetKey::RateBadge(entry.rate_tier.clone()),
        RATE_BADGE_SIZE,
    );
    place(&mut card, &rate.image, RATE_BADGE_AT.0, RATE_BADGE_AT.1);

    if !compact {
        let rank = format!("#{}", slot.display_rank());
        draw_text_or_skip(
            &mut card,
            fonts,
            &TextSpec::new(&rank, FontRole::Label, 130.0, STATS_BASELINE).color(accent),
        );
    }
    let internal = format!("{:.1}", entry.internal_difficulty);
    draw_text_or_skip(
        &mut card,
        fonts,
        &TextSpec::new(&internal, FontRole::Label, 195.0, STATS_BASELINE)
            .size(INTERNAL_DIFFICULTY_SIZE)
            .color(accent),
    );
    draw_text_or_skip(
        &mut card,
        fonts,
        &TextSpec::new("▶", FontRole::Label, 235.0, STATS_BASELINE).color(accent),
    );
    let contribution = entry.rating_contribution.to_string();
    draw_text_or_skip(
        &mut card,
        fonts,
        &TextSpec::new(&contribution, FontRole::Label, 250.0, STATS_BASELINE).color(accent),
    );

    if let Some(tier) = &entry.full_combo_tier {
        let badge =
            assets.image_or_placeholder(&AssetKey::ComboBadge(tier.clone()), STATUS_BADGE_SIZE);
        place(&mut card, &badge.image, COMBO_BADGE_AT.0, COMBO_BADGE_AT.1);
    }
    if let Some(tier) = &entry.full_sync_tier {
        let badge =
            assets.image_or_placeholder(&AssetKey::SyncBadge(tier.clone()), STATUS_BADGE_SIZE);
        place(&mut card, &badge.image, SYNC_BADGE_AT.0, SYNC_BADGE_AT.1);
    }
    if let Some(icon) = assets.try_image(&AssetKey::ChartTypeIcon(entry.chart_type)) {
        place(&mut card, &icon, CHART_TYPE_AT.0, CHART_TYPE_AT.1);
    }

    RenderedCard { slot, image: card }
}

#[cfg(test)]
#[path = "../../tests/unit/render/card.rs"]
mod tests;
