use image::RgbaImage;
use kurbo::Shape;

use crate::foundation::{
    core::{Point, RoundedRect, Size},
    error::{SheetError, SheetResult},
};

pub type PremulRgba8 = [u8; 4];

/// Premultiplied source-over.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

pub fn premultiply(px: [u8; 4]) -> PremulRgba8 {
    let a = u16::from(px[3]);
    [
        mul_div255(u16::from(px[0]), a),
        mul_div255(u16::from(px[1]), a),
        mul_div255(u16::from(px[2]), a),
        px[3],
    ]
}

pub fn unpremultiply(px: PremulRgba8) -> [u8; 4] {
    let a = u32::from(px[3]);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let un = |c: u8| ((u32::from(c) * 255 + a / 2) / a).min(255) as u8;
    [un(px[0]), un(px[1]), un(px[2]), px[3]]
}

/// Blend a premultiplied RGBA8 buffer of `src_size` onto `canvas` with its top-left at `(x, y)`.
///
/// Pixels falling outside the canvas are dropped.
pub fn blend_premul_at(
    canvas: &mut RgbaImage,
    src: &[u8],
    src_size: Size,
    x: i64,
    y: i64,
) -> SheetResult<()> {
    let expected_len = (src_size.width as usize)
        .checked_mul(src_size.height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| SheetError::render("blend buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(SheetError::render(
            "blend_premul_at expects a buffer matching width*height*4",
        ));
    }
    if expected_len == 0 {
        return Ok(());
    }

    let (cw, ch) = canvas.dimensions();
    for (row, line) in src.chunks_exact(src_size.width as usize * 4).enumerate() {
        let dy = y + row as i64;
        if dy < 0 || dy >= i64::from(ch) {
            continue;
        }
        for (col, s) in line.chunks_exact(4).enumerate() {
            if s[3] == 0 {
                continue;
            }
            let dx = x + col as i64;
            if dx < 0 || dx >= i64::from(cw) {
                continue;
            }
            let d = canvas.get_pixel_mut(dx as u32, dy as u32);
            let out = over(premultiply(d.0), [s[0], s[1], s[2], s[3]], 1.0);
            d.0 = unpremultiply(out);
        }
    }
    Ok(())
}

/// Alpha-composite `img` onto `canvas` with its top-left at `(x, y)`.
pub fn place(canvas: &mut RgbaImage, img: &RgbaImage, x: i64, y: i64) {
    let (cw, ch) = canvas.dimensions();
    for (sx, sy, s) in img.enumerate_pixels() {
        let (dx, dy) = (x + i64::from(sx), y + i64::from(sy));
        if s.0[3] == 0 || dx < 0 || dy < 0 || dx >= i64::from(cw) || dy >= i64::from(ch) {
            continue;
        }
        let d = canvas.get_pixel_mut(dx as u32, dy as u32);
        if s.0[3] == 255 {
            d.0 = s.0;
            continue;
        }
        let out = over(premultiply(d.0), premultiply(s.0), 1.0);
        d.0 = unpremultiply(out);
    }
}

/// Copy of `img` with every pixel whose center lies outside `clip` made transparent.
pub fn clip_to(img: &RgbaImage, clip: RoundedRect) -> RgbaImage {
    let mut out = RgbaImage::new(img.width(), img.height());
    for (x, y, px) in img.enumerate_pixels() {
        let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
        if clip.contains(center) {
            out.put_pixel(x, y, *px);
        }
    }
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
