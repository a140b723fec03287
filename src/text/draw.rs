use image::RgbaImage;

use crate::{
    foundation::{
        core::{Point, Rgba8, Size},
        error::{SheetError, SheetResult},
    },
    render::composite::blend_premul_at,
    text::fonts::{FontBook, FontRole},
};

/// Font height as a fraction of point size, used for vertical anchoring.
const FONT_HEIGHT_RATIO: f64 = 0.75;

/// One line of text to rasterize.
///
/// `anchor` is `(ax, ay)`: the origin sits at `ax` of the text's width (0 start, 0.5 middle,
/// 1 end) and the baseline is pushed down by `ay` font heights.
#[derive(Clone, Debug, PartialEq)]
pub struct TextSpec<'a> {
    pub text: &'a str,
    pub role: FontRole,
    pub size: Option<f32>,
    pub color: Rgba8,
    pub origin: Point,
    pub anchor: (f64, f64),
}

impl<'a> TextSpec<'a> {
    pub fn new(text: &'a str, role: FontRole, x: f64, y: f64) -> Self {
        Self {
            text,
            role,
            size: None,
            color: Rgba8::BLACK,
            origin: Point::new(x, y),
            anchor: (0.0, 0.0),
        }
    }

    pub fn color(mut self, color: Rgba8) -> Self {
        self.color = color;
        self
    }

    pub fn anchor(mut self, ax: f64, ay: f64) -> Self {
        self.anchor = (ax, ay);
        self
    }

    /// Override the role's bound point size.
    pub fn size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    fn text_anchor(&self) -> &'static str {
        match self.anchor.0 {
            ax if ax < 0.25 => "start",
            ax if ax < 0.75 => "middle",
            _ => "end",
        }
    }
}

/// Rasterize `spec` and blend it onto `canvas`.
///
/// Only a horizontal band around the baseline is rasterized, so drawing on a large sheet costs
/// roughly the same as drawing on a card.
pub fn draw_text(canvas: &mut RgbaImage, fonts: &FontBook, spec: &TextSpec<'_>) -> SheetResult<()> {
    if spec.text.is_empty() {
        return Ok(());
    }

    let face = fonts.face(spec.role);
    let size = f64::from(spec.size.unwrap_or(face.size));
    let baseline = spec.origin.y + spec.anchor.1 * size * FONT_HEIGHT_RATIO;

    let (width, height) = canvas.dimensions();
    let band_top = (baseline - 1.5 * size).floor().clamp(0.0, f64::from(height)) as u32;
    let band_bottom = (baseline + 0.75 * size).ceil().clamp(0.0, f64::from(height)) as u32;
    if band_bottom <= band_top || width == 0 {
        return Ok(());
    }
    let band = Size::new(width, band_bottom - band_top);

    let svg = format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" "#,
            r#"viewBox="0 0 {w} {h}"><text x="{x}" y="{y}" font-family="'{family}'" "#,
            r#"font-size="{size}" fill="{fill}" fill-opacity="{opacity}" "#,
            r#"text-anchor="{anchor}" xml:space="preserve">{text}</text></svg>"#
        ),
        w = width,
        h = height,
        x = spec.origin.x,
        y = baseline,
        family = escape_xml(&face.family),
        size = size,
        fill = spec.color.hex_rgb(),
        opacity = spec.color.opacity(),
        anchor = spec.text_anchor(),
        text = escape_xml(spec.text),
    );

    let opts = usvg::Options {
        fontdb: fonts.database().clone(),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(&svg, &opts)
        .map_err(|e| SheetError::render(format!("build text tree for {:?}: {e}", spec.text)))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(band.width, band.height)
        .ok_or_else(|| SheetError::render("failed to allocate text pixmap"))?;
    let shift = resvg::tiny_skia::Transform::from_translate(0.0, -(band_top as f32));
    resvg::render(&tree, shift, &mut pixmap.as_mut());

    blend_premul_at(canvas, pixmap.data(), band, 0, i64::from(band_top))
}

/// [`draw_text`] for decorative text: a failure is logged and the canvas left as it was.
pub fn draw_text_or_skip(canvas: &mut RgbaImage, fonts: &FontBook, spec: &TextSpec<'_>) {
    if let Err(err) = draw_text(canvas, fonts, spec) {
        tracing::warn!(text = spec.text, error = %err, "text skipped");
    }
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/text/draw.rs"]
mod tests;
