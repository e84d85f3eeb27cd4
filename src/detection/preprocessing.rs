use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, Luma};
use imageproc::filter::gaussian_blur_f32;

/// Scale both dimensions by `factor` using cubic interpolation
pub fn upscale(img: &DynamicImage, factor: u32) -> DynamicImage {
    if factor <= 1 {
        return img.clone();
    }
    img.resize_exact(
        img.width() * factor,
        img.height() * factor,
        FilterType::CatmullRom,
    )
}

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Gaussian sigma matching a square neighborhood of `block_size` pixels
fn sigma_for_block(block_size: u32) -> f32 {
    0.3 * ((block_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Binarize with a per-pixel threshold: the Gaussian-weighted mean of the
/// `block_size` neighborhood minus `offset`. Pixels above their threshold
/// become white (255), the rest black (0).
pub fn adaptive_threshold(img: &GrayImage, block_size: u32, offset: i32) -> GrayImage {
    let local_mean = gaussian_blur_f32(img, sigma_for_block(block_size));
    let mut binary = GrayImage::new(img.width(), img.height());

    for (x, y, pixel) in img.enumerate_pixels() {
        let threshold = local_mean.get_pixel(x, y)[0] as i32 - offset;
        let value = if pixel[0] as i32 > threshold { 255u8 } else { 0u8 };
        binary.put_pixel(x, y, Luma([value]));
    }

    binary
}
