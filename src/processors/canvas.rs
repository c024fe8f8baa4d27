//! Canvas-to-tensor normalization.
//!
//! Turns an arbitrary, off-center, variably-sized ink trace into the fixed
//! square single-channel tensor the classifier was trained on: bounding-box
//! extraction, padded square cropping, bilinear resampling, and the fixed
//! orientation transform of the training data.

use crate::core::config::RecognizerConfig;
use crate::core::Tensor4D;
use image::{imageops, GrayImage, Luma, Pixel, RgbImage};
use ndarray::Array4;
use tracing::debug;

/// Edge length of the canonical tensor the default classifier expects.
pub const CANONICAL_SIZE: u32 = 28;

/// Normalizes raw drawing surfaces into classifier input tensors.
///
/// The surface convention is ink (bright) on background (dark); a pixel
/// counts as ink when its red channel exceeds `ink_threshold`. The surface is
/// only read, never modified.
#[derive(Debug, Clone)]
pub struct CanvasNormalizer {
    canonical_size: u32,
    ink_threshold: u8,
    padding_ratio: f32,
}

impl Default for CanvasNormalizer {
    fn default() -> Self {
        Self {
            canonical_size: CANONICAL_SIZE,
            ink_threshold: 128,
            padding_ratio: 0.2,
        }
    }
}

impl CanvasNormalizer {
    /// Creates a normalizer with explicit settings.
    pub fn new(canonical_size: u32, ink_threshold: u8, padding_ratio: f32) -> Self {
        Self {
            canonical_size,
            ink_threshold,
            padding_ratio,
        }
    }

    /// Creates a normalizer from a recognizer configuration.
    pub fn from_config(config: &RecognizerConfig) -> Self {
        Self::new(config.canonical_size, config.ink_threshold, config.padding_ratio)
    }

    /// Edge length of the tensors this normalizer produces.
    pub fn canonical_size(&self) -> u32 {
        self.canonical_size
    }

    /// Normalizes a drawing surface into a `(1, 1, S, S)` tensor in `[0, 1]`.
    ///
    /// A surface with no ink pixels produces an all-zero tensor; this is a
    /// valid empty-drawing result, not an error.
    pub fn normalize(&self, surface: &RgbImage) -> Tensor4D {
        let size = self.canonical_size;
        let Some(bbox) = self.ink_bounding_box(surface) else {
            debug!("no ink pixels on surface, emitting zero tensor");
            return Array4::zeros((1, 1, size as usize, size as usize));
        };

        let square = self.crop_padded_square(surface, bbox);
        let resized = imageops::resize(&square, size, size, imageops::FilterType::Triangle);
        let oriented = to_training_orientation(&resized);

        let mut tensor = Array4::zeros((1, 1, size as usize, size as usize));
        for (x, y, Luma([v])) in oriented.enumerate_pixels() {
            tensor[[0, 0, y as usize, x as usize]] = *v as f32 / 255.0;
        }
        tensor
    }

    /// Whether the surface contains any ink at all.
    pub fn has_ink(&self, surface: &RgbImage) -> bool {
        surface.pixels().any(|p| p.0[0] > self.ink_threshold)
    }

    /// Single pass over the surface locating the inclusive bounding box of
    /// all ink pixels, as `(min_x, min_y, max_x, max_y)`.
    fn ink_bounding_box(&self, surface: &RgbImage) -> Option<(u32, u32, u32, u32)> {
        let mut bbox: Option<(u32, u32, u32, u32)> = None;
        for (x, y, pixel) in surface.enumerate_pixels() {
            if pixel.0[0] > self.ink_threshold {
                bbox = Some(match bbox {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
        bbox
    }

    /// Extracts the padded square source region centered on the bounding
    /// box's centroid, as a background-filled grayscale image.
    ///
    /// The square may extend past the surface bounds; out-of-range source
    /// coordinates stay background, so strokes flush to the surface edge
    /// still produce a valid square.
    fn crop_padded_square(&self, surface: &RgbImage, bbox: (u32, u32, u32, u32)) -> GrayImage {
        let (min_x, min_y, max_x, max_y) = bbox;
        let bbox_w = (max_x - min_x + 1) as f32;
        let bbox_h = (max_y - min_y + 1) as f32;

        // A hairline stroke still yields a positive side before padding.
        let side = bbox_w.max(bbox_h).max(1.0);
        let padded = (side + 2.0 * self.padding_ratio * side).round().max(1.0) as u32;

        let center_x = (min_x + max_x + 1) as f32 / 2.0;
        let center_y = (min_y + max_y + 1) as f32 / 2.0;
        let left = (center_x - padded as f32 / 2.0).round() as i64;
        let top = (center_y - padded as f32 / 2.0).round() as i64;

        let mut square = GrayImage::new(padded, padded);
        for dy in 0..padded {
            for dx in 0..padded {
                let sx = left + dx as i64;
                let sy = top + dy as i64;
                if sx >= 0 && sy >= 0 && (sx as u32) < surface.width() && (sy as u32) < surface.height()
                {
                    let luma = surface.get_pixel(sx as u32, sy as u32).to_luma();
                    square.put_pixel(dx, dy, luma);
                }
            }
        }
        square
    }
}

/// The fixed geometric transform into the classifier's training orientation.
///
/// The training data stores glyphs with the axes transposed relative to a
/// screen capture surface, so every normalized drawing is rotated 90°
/// clockwise and then mirrored horizontally. This is a contract with the
/// paired model artifact, not a tunable.
pub fn to_training_orientation(img: &GrayImage) -> GrayImage {
    imageops::flip_horizontal(&imageops::rotate90(img))
}

/// Inverse of [`to_training_orientation`], recovering the capture-surface
/// orientation. Exists for round-trip verification.
pub fn from_training_orientation(img: &GrayImage) -> GrayImage {
    imageops::rotate270(&imageops::flip_horizontal(img))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn blank_surface(w: u32, h: u32) -> RgbImage {
        RgbImage::new(w, h)
    }

    fn draw_dot(surface: &mut RgbImage, x: u32, y: u32) {
        surface.put_pixel(x, y, Rgb([255, 255, 255]));
    }

    #[test]
    fn empty_surface_yields_zero_tensor() {
        let normalizer = CanvasNormalizer::default();
        let tensor = normalizer.normalize(&blank_surface(100, 100));
        assert_eq!(tensor.shape(), &[1, 1, 28, 28]);
        assert!(tensor.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn single_pixel_does_not_panic_and_produces_ink() {
        let normalizer = CanvasNormalizer::default();
        let mut surface = blank_surface(100, 100);
        draw_dot(&mut surface, 50, 50);
        let tensor = normalizer.normalize(&surface);
        assert!(tensor.iter().any(|&v| v > 0.0));
    }

    #[test]
    fn stroke_flush_to_the_edge_still_produces_a_valid_square() {
        let normalizer = CanvasNormalizer::default();
        let mut surface = blank_surface(60, 60);
        for y in 0..40 {
            draw_dot(&mut surface, 0, y);
        }
        let tensor = normalizer.normalize(&surface);
        assert_eq!(tensor.shape(), &[1, 1, 28, 28]);
        assert!(tensor.iter().any(|&v| v > 0.0));
        assert!(tensor.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn thin_horizontal_stroke_does_not_divide_by_zero() {
        let normalizer = CanvasNormalizer::default();
        let mut surface = blank_surface(200, 200);
        for x in 20..180 {
            draw_dot(&mut surface, x, 100);
        }
        let tensor = normalizer.normalize(&surface);
        assert!(tensor.iter().any(|&v| v > 0.0));
    }

    #[test]
    fn off_center_drawings_normalize_to_the_same_tensor() {
        let normalizer = CanvasNormalizer::default();
        let mut top_left = blank_surface(300, 300);
        let mut bottom_right = blank_surface(300, 300);
        for d in 0..20 {
            draw_dot(&mut top_left, 10 + d, 10 + d);
            draw_dot(&mut bottom_right, 250 + d, 250 + d);
        }
        assert_eq!(
            normalizer.normalize(&top_left),
            normalizer.normalize(&bottom_right)
        );
    }

    #[test]
    fn orientation_transform_round_trips() {
        let mut img = GrayImage::new(28, 28);
        img.put_pixel(3, 7, Luma([200]));
        img.put_pixel(20, 5, Luma([90]));
        img.put_pixel(14, 27, Luma([255]));
        let recovered = from_training_orientation(&to_training_orientation(&img));
        assert_eq!(recovered, img);
    }

    #[test]
    fn orientation_transform_moves_pixels() {
        // The transform is a transpose: (x, y) lands at (y, x).
        let mut img = GrayImage::new(28, 28);
        img.put_pixel(5, 2, Luma([255]));
        let oriented = to_training_orientation(&img);
        assert_eq!(oriented.get_pixel(2, 5), &Luma([255]));
    }

    #[test]
    fn has_ink_respects_threshold() {
        let normalizer = CanvasNormalizer::default();
        let mut surface = blank_surface(10, 10);
        surface.put_pixel(5, 5, Rgb([100, 100, 100]));
        assert!(!normalizer.has_ink(&surface));
        surface.put_pixel(5, 5, Rgb([200, 200, 200]));
        assert!(normalizer.has_ink(&surface));
    }
}
