use image::RgbaImage;
use rayon::prelude::*;

use crate::{
    assets::{
        decode::{decode_image, fit_exact},
        key::AssetKey,
        resolver::AssetResolver,
    },
    foundation::{
        core::{Rgba8, RoundedRect, Size},
        error::SheetResult,
    },
    layout::grid::{GRID_COLUMNS, GridSlot, SheetSection, section_slots},
    model::{
        profile::{PlayerProfile, ScoreEntry},
        tiers::rating_badge_index,
    },
    render::{
        card::{RenderedCard, render_card},
        composite::{clip_to, place},
        context::RenderContext,
    },
    text::{
        draw::{TextSpec, draw_text_or_skip},
        fonts::FontRole,
        width::{spaced, widen},
    },
};

pub const SHEET_SIZE: Size = Size::new(2090, 1660);
pub const AVATAR_SIZE: Size = Size::new(180, 180);

const PLATE_AT: (i64, i64) = (595, 30);
const AVATAR_AT: (i64, i64) = (610, 50);
const RATING_BADGE_AT: (i64, i64) = (800, 40);
const RANK_BADGE_AT: (i64, i64) = (1080, 50);
const RATING_COLOR: Rgba8 = Rgba8::opaque(236, 219, 113);

/// Per-call inputs that do not come from the player record.
#[derive(Clone, Debug, Default)]
pub struct SheetInputs {
    /// Identity used to look up a stored background under `user/` and, when `avatar` is unset,
    /// the player's avatar.
    pub session_key: Option<String>,
    /// Encoded avatar image; the header is drawn without one when absent or undecodable.
    /// Takes precedence over the session's avatar.
    pub avatar: Option<Vec<u8>>,
    /// Encoded plate image taking precedence over every stored background.
    pub background_override: Option<Vec<u8>>,
    /// Replaces `PlayerProfile::plate_text` when set.
    pub plate_text_override: Option<String>,
}

/// Header images that must be in place before drawing starts.
struct Header {
    plate: Option<RgbaImage>,
    background: RgbaImage,
    rating_badge: RgbaImage,
    rank_badge: RgbaImage,
}

/// Compose the full best-scores sheet for `profile`.
///
/// The avatar is resolved (fetching it for the session when no bytes are supplied) and prepared
/// alongside header loading and card rendering; the canvas itself is
/// only written by this function after every worker result is in. Card slots follow input
/// order within each group regardless of which card finishes first.
///
/// Missing covers and badges degrade to placeholders. The call fails only when the sheet
/// background, rating badge or rank badge cannot be loaded.
#[tracing::instrument(skip_all, fields(nickname = %profile.nickname))]
pub fn compose_sheet(
    ctx: &RenderContext,
    profile: &PlayerProfile,
    inputs: &SheetInputs,
) -> SheetResult<RgbaImage> {
    ctx.install(|| {
        let (avatar, prepared) = ctx.join(
            || load_avatar(ctx.assets(), inputs),
            || -> SheetResult<(Header, Vec<RenderedCard>)> {
                let header = load_header(ctx.assets(), profile, inputs)?;
                Ok((header, render_cards(ctx, profile)))
            },
        );
        let (header, cards) = prepared?;

        let mut canvas = RgbaImage::new(SHEET_SIZE.width, SHEET_SIZE.height);
        draw_header(ctx, &mut canvas, &header, avatar.as_ref(), profile, inputs);
        for card in &cards {
            let (x, y) = card.slot.position();
            place(&mut canvas, &card.image, i64::from(x), i64::from(y));
        }
        tracing::debug!(cards = cards.len(), "sheet composed");
        Ok(canvas)
    })
}

/// Render every card of both groups, Standard first, each tagged with its slot.
pub fn render_cards(ctx: &RenderContext, profile: &PlayerProfile) -> Vec<RenderedCard> {
    let mut jobs: Vec<(GridSlot, &ScoreEntry)> = Vec::new();
    for section in SheetSection::ALL {
        let entries = profile.entries(section);
        let capacity = section.design_rows() as usize * GRID_COLUMNS as usize;
        if entries.len() > capacity {
            tracing::warn!(
                ?section,
                entries = entries.len(),
                capacity,
                "group exceeds sheet capacity; extra cards fall below the grid"
            );
        }
        jobs.extend(section_slots(section, entries.len()).zip(entries));
    }

    if ctx.is_parallel() {
        jobs.par_iter()
            .map(|(slot, entry)| render_card(ctx, entry, *slot, false))
            .collect()
    } else {
        jobs.iter()
            .map(|(slot, entry)| render_card(ctx, entry, *slot, false))
            .collect()
    }
}

/// Caller-supplied bytes, else the session's avatar through the resolver. Any failure leaves
/// the header without an avatar.
fn load_avatar(assets: &AssetResolver, inputs: &SheetInputs) -> Option<RgbaImage> {
    if let Some(bytes) = &inputs.avatar {
        return prepare_avatar(bytes);
    }
    let session = inputs.session_key.as_ref()?;
    assets
        .try_image(&AssetKey::UserAvatar(session.clone()))
        .map(round_avatar)
}

fn prepare_avatar(bytes: &[u8]) -> Option<RgbaImage> {
    match decode_image(bytes) {
        Ok(img) => Some(round_avatar(img)),
        Err(err) => {
            tracing::warn!(error = %err, "avatar undecodable; header drawn without it");
            None
        }
    }
}

fn round_avatar(img: RgbaImage) -> RgbaImage {
    let img = fit_exact(img, AVATAR_SIZE);
    clip_to(&img, RoundedRect::new(0.0, 0.0, 178.0, 178.0, 20.0))
}

fn load_header(
    assets: &AssetResolver,
    profile: &PlayerProfile,
    inputs: &SheetInputs,
) -> SheetResult<Header> {
    let plate = resolve_plate(assets, profile, inputs);
    let background = assets.image(&AssetKey::SheetBackground {
        custom: plate.is_some(),
    })?;
    let rating_badge = assets.image(&AssetKey::RatingBadge(rating_badge_index(profile.rating)))?;
    let rank_badge = assets.image(&AssetKey::RankBadge(profile.additional_rating_tier))?;
    Ok(Header {
        plate,
        background,
        rating_badge,
        rank_badge,
    })
}

/// Override bytes, then the session's stored background, then the profile's custom plate.
fn resolve_plate(
    assets: &AssetResolver,
    profile: &PlayerProfile,
    inputs: &SheetInputs,
) -> Option<RgbaImage> {
    if let Some(bytes) = &inputs.background_override {
        match decode_image(bytes) {
            Ok(img) => return Some(img),
            Err(err) => tracing::warn!(error = %err, "background override undecodable; ignoring"),
        }
    }
    if let Some(session) = &inputs.session_key {
        match assets.image(&AssetKey::UserBackground(session.clone())) {
            Ok(img) => return Some(img),
            Err(err) => tracing::debug!(error = %err, "no stored background for session"),
        }
    }
    profile
        .custom_plate_id
        .as_ref()
        .and_then(|id| assets.try_image(&AssetKey::CustomPlate(id.clone())))
}

fn draw_header(
    ctx: &RenderContext,
    canvas: &mut RgbaImage,
    header: &Header,
    avatar: Option<&RgbaImage>,
    profile: &PlayerProfile,
    inputs: &SheetInputs,
) {
    if let Some(plate) = &header.plate {
        place(canvas, plate, PLATE_AT.0, PLATE_AT.1);
    }
    place(canvas, &header.background, 0, 0);
    if let Some(avatar) = avatar {
        place(canvas, avatar, AVATAR_AT.0, AVATAR_AT.1);
    }

    let fonts = ctx.fonts();
    let name = widen(&profile.nickname);
    draw_text_or_skip(
        canvas,
        fonts,
        &TextSpec::new(&name, FontRole::Name, 825.0, 160.0),
    );
    let plate_text = spaced(
        inputs
            .plate_text_override
            .as_deref()
            .unwrap_or(&profile.plate_text),
    );
    draw_text_or_skip(
        canvas,
        fonts,
        &TextSpec::new(&plate_text, FontRole::Title, 1050.0, 207.0).anchor(0.5, 0.5),
    );

    place(
        canvas,
        &header.rating_badge,
        RATING_BADGE_AT.0,
        RATING_BADGE_AT.1,
    );
    place(canvas, &header.rank_badge, RANK_BADGE_AT.0, RANK_BADGE_AT.1);
    let rating = profile.rating.to_string();
    draw_text_or_skip(
        canvas,
        fonts,
        &TextSpec::new(&rating, FontRole::Score, 1056.0, 60.0)
            .color(RATING_COLOR)
            .anchor(1.0, 1.0),
    );
}

#[cfg(test)]
#[path = "../../tests/unit/render/sheet.rs"]
mod tests;
