//! maisheet renders "best 50" score sheets for maimai player records.
//!
//! A sheet is a fixed 2090x1660 canvas: a header with plate, avatar, name and rating badges,
//! followed by two grids of score cards (Standard and Deluxe charts).
//!
//! # Pipeline overview
//!
//! 1. **Load**: [`RenderConfig`] is read once and turned into a [`RenderContext`] (fonts,
//!    asset resolver, worker pool).
//! 2. **Resolve**: [`AssetResolver`] maps typed [`AssetKey`]s onto the resource tree, fetching
//!    missing covers and session avatars remotely and caching them on disk.
//! 3. **Render**: [`render_card`] composes each score card on its own surface; cover lookup
//!    runs alongside title truncation.
//! 4. **Compose**: [`compose_sheet`] draws the header and blits every card at its grid slot.
//!
//! Missing card assets degrade to placeholders. Only the header skeleton (background, rating
//! badge, rank badge) is required.
#![forbid(unsafe_code)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod layout;
pub mod model;
pub mod render;
pub mod text;

pub use assets::key::{AssetKey, cover_lookup_id};
pub use assets::resolver::{AssetResolver, FetchAsset, HttpFetcher, NoFetch, ResolvedImage};
pub use config::{FontSpec, FontsConfig, RenderConfig, ThreadingConfig};
pub use foundation::core::{Point, Rect, Rgba8, RoundedRect, Size};
pub use foundation::error::{SheetError, SheetResult};
pub use layout::grid::{CARD_SIZE, GridSlot, SheetSection, section_slots};
pub use model::profile::{ChartType, DIFFICULTY_LEVELS, PlayerProfile, ScoreCharts, ScoreEntry};
pub use model::tiers::{rank_badge_stem, rating_badge_index};
pub use render::card::{RenderedCard, render_card};
pub use render::context::RenderContext;
pub use render::sheet::{SHEET_SIZE, SheetInputs, compose_sheet, render_cards};
pub use text::draw::{TextSpec, draw_text};
pub use text::fonts::{FontBook, FontRole};
pub use text::width::{TITLE_BUDGET, spaced, truncate, truncate_title, widen};
