use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn premultiply_roundtrip_for_opaque_and_clear() {
    assert_eq!(unpremultiply(premultiply([12, 34, 56, 255])), [12, 34, 56, 255]);
    assert_eq!(unpremultiply(premultiply([12, 34, 56, 0])), [0, 0, 0, 0]);
}

#[test]
fn blend_premul_at_clips_to_canvas() {
    let mut canvas = RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 255]));
    let src = [255u8, 255, 255, 255].repeat(4);
    blend_premul_at(&mut canvas, &src, Size::new(2, 2), 1, 1).unwrap();
    assert_eq!(canvas.get_pixel(0, 0).0, [0, 0, 0, 255]);
    assert_eq!(canvas.get_pixel(1, 1).0, [255, 255, 255, 255]);
}

#[test]
fn blend_premul_at_rejects_bad_length() {
    let mut canvas = RgbaImage::new(2, 2);
    assert!(blend_premul_at(&mut canvas, &[0u8; 7], Size::new(2, 1), 0, 0).is_err());
}

#[test]
fn clip_to_rounded_rect_clears_corners() {
    let img = RgbaImage::from_pixel(180, 180, image::Rgba([9, 9, 9, 255]));
    let clipped = clip_to(&img, RoundedRect::new(0.0, 0.0, 178.0, 178.0, 20.0));
    assert_eq!(clipped.get_pixel(0, 0).0[3], 0);
    assert_eq!(clipped.get_pixel(179, 90).0[3], 0);
    assert_eq!(clipped.get_pixel(90, 90).0, [9, 9, 9, 255]);
    assert_eq!(clipped.get_pixel(20, 1).0[3], 255);
}

#[test]
fn place_copies_opaque_and_blends_translucent() {
    let mut canvas = RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 0, 255]));
    let mut img = RgbaImage::from_pixel(2, 2, image::Rgba([200, 10, 10, 255]));
    img.put_pixel(1, 1, image::Rgba([255, 255, 255, 0]));
    img.put_pixel(0, 1, image::Rgba([255, 255, 255, 128]));
    place(&mut canvas, &img, 3, 2);
    place(&mut canvas, &img, -1, -1);

    assert_eq!(canvas.get_pixel(3, 2).0, [200, 10, 10, 255]);
    assert_eq!(canvas.get_pixel(3, 3).0, [128, 128, 128, 255]);
    assert_eq!(canvas.get_pixel(0, 0).0, [0, 0, 0, 255]);
    assert_eq!(canvas.get_pixel(1, 1).0, [0, 0, 0, 255]);
}

#[test]
fn blend_premul_at_accepts_empty_bands() {
    let mut canvas = RgbaImage::from_pixel(2, 2, image::Rgba([9, 9, 9, 255]));
    blend_premul_at(&mut canvas, &[], Size::new(0, 5), 0, 0).unwrap();
    blend_premul_at(&mut canvas, &[], Size::new(5, 0), 0, 0).unwrap();
    assert!(canvas.pixels().all(|p| p.0 == [9, 9, 9, 255]));
    assert!(blend_premul_at(&mut canvas, &[1, 2, 3, 4], Size::new(0, 1), 0, 0).is_err());
}
