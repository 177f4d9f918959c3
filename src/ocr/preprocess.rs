use image::GrayImage;

use crate::capture::Frame;

/// Converts a BGRA frame to grayscale with integer BT.601 luma weights.
pub fn to_grayscale(frame: &Frame) -> GrayImage {
    let mut gray = Vec::with_capacity(frame.pixel_count());
    for px in frame.data.chunks_exact(4) {
        let luma = (u32::from(px[2]) * 299 + u32::from(px[1]) * 587 + u32::from(px[0]) * 114) / 1000;
        gray.push(luma as u8);
    }
    GrayImage::from_raw(frame.width, frame.height, gray)
        .expect("frame data length matches dimensions")
}

/// Local-adaptive binarization: a pixel turns white when it exceeds the mean
/// of its `block_size` neighborhood minus `constant`. Handles the uneven
/// lighting typical of screen captures. `block_size` is forced odd and at
/// least 3.
pub fn adaptive_threshold(gray: &GrayImage, block_size: u32, constant: i32) -> GrayImage {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return gray.clone();
    }
    let radius = i64::from((block_size.max(3) | 1) / 2);
    let w = width as usize;
    let h = height as usize;
    let src = gray.as_raw();

    // Summed-area table, one extra row and column of zeros.
    let mut integral = vec![0u64; (w + 1) * (h + 1)];
    for y in 0..h {
        let mut row_sum = 0u64;
        for x in 0..w {
            row_sum += u64::from(src[y * w + x]);
            integral[(y + 1) * (w + 1) + (x + 1)] = integral[y * (w + 1) + (x + 1)] + row_sum;
        }
    }

    let mut out = vec![0u8; w * h];
    for y in 0..h {
        for x in 0..w {
            let x0 = (x as i64 - radius).max(0) as usize;
            let y0 = (y as i64 - radius).max(0) as usize;
            let x1 = (x as i64 + radius + 1).min(w as i64) as usize;
            let y1 = (y as i64 + radius + 1).min(h as i64) as usize;
            let count = ((x1 - x0) * (y1 - y0)) as i64;
            let sum = integral[y1 * (w + 1) + x1] + integral[y0 * (w + 1) + x0]
                - integral[y0 * (w + 1) + x1]
                - integral[y1 * (w + 1) + x0];
            let mean = sum as i64 / count;
            let value = i64::from(src[y * w + x]);
            out[y * w + x] = if value > mean - i64::from(constant) {
                255
            } else {
                0
            };
        }
    }
    GrayImage::from_raw(width, height, out).expect("output buffer matches dimensions")
}

/// Median filter against salt-and-pepper noise. `kernel_size` is forced odd;
/// 1 is a no-op. Borders clamp to the edge pixel.
pub fn reduce_noise(image: &GrayImage, kernel_size: u32) -> GrayImage {
    let k = kernel_size.max(1) | 1;
    if k == 1 {
        return image.clone();
    }
    let radius = i64::from(k / 2);
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }
    let w = i64::from(width);
    let h = i64::from(height);
    let src = image.as_raw();

    let mut out = vec![0u8; (width as usize) * (height as usize)];
    let mut window = Vec::with_capacity((k * k) as usize);
    for y in 0..h {
        for x in 0..w {
            window.clear();
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    let sy = (y + dy).clamp(0, h - 1);
                    let sx = (x + dx).clamp(0, w - 1);
                    window.push(src[(sy * w + sx) as usize]);
                }
            }
            window.sort_unstable();
            out[(y * w + x) as usize] = window[window.len() / 2];
        }
    }
    GrayImage::from_raw(width, height, out).expect("output buffer matches dimensions")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grayscale_uses_luma_weights() {
        // One pure-red pixel in BGRA: B=0 G=0 R=255 A=255.
        let frame = Frame::new(1, 1, vec![0, 0, 255, 255]);
        let gray = to_grayscale(&frame);
        assert_eq!(gray.get_pixel(0, 0).0[0], (255 * 299 / 1000) as u8);
    }

    #[test]
    fn grayscale_maps_white_to_white() {
        let frame = Frame::new(2, 1, vec![255; 8]);
        let gray = to_grayscale(&frame);
        assert_eq!(gray.as_raw(), &vec![255u8, 255]);
    }

    #[test]
    fn threshold_keeps_bright_text_and_darkens_its_surroundings() {
        let mut raw = vec![10u8; 25];
        raw[12] = 200;
        let gray = GrayImage::from_raw(5, 5, raw).unwrap();
        let binary = adaptive_threshold(&gray, 3, 2);
        assert_eq!(binary.get_pixel(2, 2).0[0], 255);
        // Neighbors see their local mean pulled up by the bright spike.
        assert_eq!(binary.get_pixel(1, 2).0[0], 0);
        // Flat regions sit above (mean - constant) and come out white.
        assert_eq!(binary.get_pixel(0, 0).0[0], 255);
    }

    #[test]
    fn threshold_output_is_binary() {
        let gray = GrayImage::from_raw(4, 4, (0u8..16).map(|v| v * 16).collect()).unwrap();
        let binary = adaptive_threshold(&gray, 11, 2);
        assert!(binary.as_raw().iter().all(|&v| v == 0 || v == 255));
    }

    #[test]
    fn median_removes_isolated_speck() {
        let mut raw = vec![0u8; 25];
        raw[12] = 255;
        let gray = GrayImage::from_raw(5, 5, raw).unwrap();
        let clean = reduce_noise(&gray, 3);
        assert_eq!(clean.get_pixel(2, 2).0[0], 0);
    }

    #[test]
    fn median_with_kernel_one_is_identity() {
        let gray = GrayImage::from_raw(3, 3, (1u8..=9).collect()).unwrap();
        let clean = reduce_noise(&gray, 1);
        assert_eq!(clean.as_raw(), gray.as_raw());
    }
}
