use super::*;

fn png_bytes(pixel: [u8; 4], width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(pixel));
    let mut bytes = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )
    .unwrap();
    bytes
}

#[test]
fn decode_reports_dimensions() {
    let img = decode_image(&png_bytes([10, 20, 30, 255], 5, 7)).unwrap();
    assert_eq!((img.width, img.height), (5, 7));
    assert_eq!(img.rgba8_premul.len(), 5 * 7 * 4);
}

#[test]
fn decode_premultiplies_alpha() {
    let img = decode_image(&png_bytes([255, 0, 0, 128], 1, 1)).unwrap();
    let px = &img.rgba8_premul[..4];
    assert_eq!(px[3], 128);
    assert_eq!(px[0], 128); // (255 * 128 + 127) / 255
    assert_eq!(px[1], 0);
    assert_eq!(px[2], 0);
}

#[test]
fn opaque_pixels_pass_through() {
    let img = decode_image(&png_bytes([9, 8, 7, 255], 2, 2)).unwrap();
    assert_eq!(&img.rgba8_premul[..4], &[9, 8, 7, 255]);
}

#[test]
fn garbage_bytes_are_rejected() {
    assert!(decode_image(b"not an image").is_err());
}

#[test]
fn load_image_reports_missing_files() {
    let err = load_image(std::path::Path::new("/nonexistent/missing.png")).unwrap_err();
    assert!(err.to_string().contains("missing.png"));
}
