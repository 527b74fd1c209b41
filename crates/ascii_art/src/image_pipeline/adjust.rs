use image::RgbaImage;
use log::debug;

/// Average of the per-pixel RGB average across the whole grid.
pub fn mean_luminance(image: &RgbaImage) -> f64 {
    let count = u64::from(image.width()) * u64::from(image.height());
    if count == 0 {
        return 0.0;
    }

    let sum: f64 = image
        .pixels()
        .map(|pixel| {
            let [r, g, b, _] = pixel.0;
            (f64::from(r) + f64::from(g) + f64::from(b)) / 3.0
        })
        .sum();
    sum / count as f64
}

/// Contrast around the global mean, then brightness, on every RGB channel.
///
/// Both passes store into 8-bit channels, so each one rounds and clamps. The
/// mean is taken once, before any channel is touched. Alpha is kept.
pub fn apply_contrast_and_brightness(
    image: &RgbaImage,
    contrast: f32,
    brightness: f32,
) -> RgbaImage {
    let mean = mean_luminance(image);
    let contrast = f64::from(contrast);
    let brightness = f64::from(brightness);
    debug!("tone adjust: mean {mean:.2}, contrast {contrast:.2}, brightness {brightness:.2}");

    let mut adjusted = image.clone();
    for pixel in adjusted.pixels_mut() {
        for channel in &mut pixel.0[..3] {
            *channel = to_channel((f64::from(*channel) - mean) * contrast + mean);
        }
        for channel in &mut pixel.0[..3] {
            *channel = to_channel(f64::from(*channel) * brightness);
        }
    }
    adjusted
}

/// Sets R, G and B to their rounded average. Alpha is kept.
pub fn to_grayscale(image: &RgbaImage) -> RgbaImage {
    let mut gray = image.clone();
    for pixel in gray.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        let sum = u16::from(r) + u16::from(g) + u16::from(b);
        let avg = ((sum + 1) / 3) as u8;
        pixel.0[..3].fill(avg);
    }
    gray
}

/// Halves round to even, like clamped byte storage.
fn to_channel(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use image::Rgba;
    use proptest::prelude::*;

    use super::*;

    fn gradient_image() -> RgbaImage {
        RgbaImage::from_fn(16, 8, |x, y| Rgba([(x * 16) as u8, (y * 32) as u8, 200, (x + y) as u8]))
    }

    #[test]
    fn neutral_settings_are_identity() {
        let image = gradient_image();
        let once = apply_contrast_and_brightness(&image, 1.0, 1.0);
        let twice = apply_contrast_and_brightness(&once, 1.0, 1.0);
        assert_eq!(once, image);
        assert_eq!(twice, image);
    }

    #[test]
    fn uniform_image_is_unchanged_by_contrast() {
        let image = RgbaImage::from_pixel(10, 10, Rgba([128, 128, 128, 255]));
        assert_eq!(apply_contrast_and_brightness(&image, 2.5, 1.0), image);
    }

    #[test]
    fn contrast_spreads_around_mean() {
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([100, 100, 100, 255]));
        image.put_pixel(1, 0, Rgba([200, 200, 200, 255]));

        let adjusted = apply_contrast_and_brightness(&image, 2.0, 1.0);

        // mean 150: 100 -> 50, 200 -> 250
        assert_eq!(adjusted.get_pixel(0, 0), &Rgba([50, 50, 50, 255]));
        assert_eq!(adjusted.get_pixel(1, 0), &Rgba([250, 250, 250, 255]));
    }

    #[test]
    fn brightness_clamps_after_contrast() {
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([100, 100, 100, 7]));
        image.put_pixel(1, 0, Rgba([200, 200, 200, 9]));

        let adjusted = apply_contrast_and_brightness(&image, 2.0, 1.5);

        // 50 * 1.5 = 75, 250 * 1.5 saturates.
        assert_eq!(adjusted.get_pixel(0, 0), &Rgba([75, 75, 75, 7]));
        assert_eq!(adjusted.get_pixel(1, 0), &Rgba([255, 255, 255, 9]));
    }

    #[test]
    fn halves_round_to_even() {
        let image = RgbaImage::from_pixel(2, 2, Rgba([75, 77, 76, 255]));

        let adjusted = apply_contrast_and_brightness(&image, 1.0, 1.5);

        // 112.5 -> 112, 115.5 -> 116, 114 stays.
        assert_eq!(adjusted.get_pixel(1, 1), &Rgba([112, 116, 114, 255]));
    }

    #[test]
    fn zero_contrast_flattens_to_mean() {
        let adjusted = apply_contrast_and_brightness(&gradient_image(), 0.0, 1.0);
        let first = *adjusted.get_pixel(0, 0);
        assert!(adjusted.pixels().all(|pixel| pixel.0[..3] == first.0[..3]));
    }

    #[test]
    fn grayscale_rounds_average() {
        let image = RgbaImage::from_pixel(1, 1, Rgba([1, 1, 0, 42]));
        assert_eq!(to_grayscale(&image).get_pixel(0, 0), &Rgba([1, 1, 1, 42]));
    }

    proptest! {
        #[test]
        fn grayscale_is_achromatic_and_keeps_alpha(
            pixels in proptest::collection::vec(any::<[u8; 4]>(), 1..64),
        ) {
            let width = pixels.len() as u32;
            let image = RgbaImage::from_fn(width, 1, |x, _| Rgba(pixels[x as usize]));
            let gray = to_grayscale(&image);

            for (before, after) in image.pixels().zip(gray.pixels()) {
                let [r, g, b, a] = after.0;
                prop_assert_eq!(r, g);
                prop_assert_eq!(g, b);
                prop_assert_eq!(a, before.0[3]);
            }
        }
    }
}
