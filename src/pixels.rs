use egui::{Color32, ColorImage, Pos2};
use image::{Rgba, RgbaImage};

/// Fully transparent pixel, what the eraser leaves behind
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
/// Background of freshly loaded line art
pub const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);
/// Line-art ink
pub const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Below this radius a segment could slip between pixel centers.
/// At 1/√2 every pixel the segment passes through has its center covered.
const MIN_RADIUS: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Force full opacity, drawing never introduces partial alpha
pub fn opaque(color: Rgba<u8>) -> Rgba<u8> {
    Rgba([color[0], color[1], color[2], 255])
}

pub fn from_color32(color: Color32) -> Rgba<u8> {
    Rgba(color.to_srgba_unmultiplied())
}

pub fn to_color32(color: Rgba<u8>) -> Color32 {
    Color32::from_rgba_unmultiplied(color[0], color[1], color[2], color[3])
}

/// Distance from a point to the segment `a`-`b`
pub(crate) fn distance_to_segment(point: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return (point - a).length();
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (point - (a + ab * t)).length()
}

/// Inclusive pixel range covering `[lo, hi]`, clipped to `0..limit`
fn pixel_span(lo: f32, hi: f32, limit: u32) -> Option<(u32, u32)> {
    let first = (lo.floor() as i64).max(0);
    let last = (hi.ceil() as i64).min(limit as i64 - 1);
    if first > last {
        return None;
    }
    Some((first as u32, last as u32))
}

/// A fixed-size RGBA raster.
///
/// Pixel `(x, y)` covers the square `[x, x+1) × [y, y+1)`; geometry is
/// tested against pixel centers at `(x + 0.5, y + 0.5)`.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, background),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> [u32; 2] {
        [self.image.width(), self.image.height()]
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.image.get_pixel_checked(x, y).copied()
    }

    /// Pixel under a continuous buffer position
    pub fn pixel_at(&self, pos: Pos2) -> Option<Rgba<u8>> {
        let (x, y) = pixel_coords(pos)?;
        self.pixel(x, y)
    }

    /// Write a pixel, returning whether its value changed
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba<u8>) -> bool {
        match self.image.get_pixel_mut_checked(x, y) {
            Some(pixel) if *pixel != color => {
                *pixel = color;
                true
            }
            _ => false,
        }
    }

    /// Paint a round-capped segment: every pixel whose center lies within
    /// `radius` of the segment takes `color`. Returns the pixels changed.
    pub fn paint_segment(&mut self, from: Pos2, to: Pos2, radius: f32, color: Rgba<u8>) -> u64 {
        let radius = radius.max(MIN_RADIUS);
        let Some((x0, x1)) = pixel_span(from.x.min(to.x) - radius, from.x.max(to.x) + radius, self.width()) else {
            return 0;
        };
        let Some((y0, y1)) = pixel_span(from.y.min(to.y) - radius, from.y.max(to.y) + radius, self.height()) else {
            return 0;
        };

        let mut changed = 0;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                if distance_to_segment(center, from, to) <= radius && self.set_pixel(x, y, color) {
                    changed += 1;
                }
            }
        }
        changed
    }

    /// Stamp a filled disc
    pub fn paint_disc(&mut self, center: Pos2, radius: f32, color: Rgba<u8>) -> u64 {
        self.paint_segment(center, center, radius, color)
    }

    /// Number of pixels exactly equal to `color`
    pub fn count(&self, color: Rgba<u8>) -> usize {
        self.image.pixels().filter(|p| **p == color).count()
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Copy into an egui image for texture upload
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(
            [self.width() as usize, self.height() as usize],
            self.image.as_raw(),
        )
    }
}

/// Integer pixel containing a continuous position, `None` when negative
pub(crate) fn pixel_coords(pos: Pos2) -> Option<(u32, u32)> {
    if !(pos.x >= 0.0 && pos.y >= 0.0) {
        return None;
    }
    Some((pos.x.floor() as u32, pos.y.floor() as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_segment() {
        let a = Pos2::new(0.0, 0.0);
        let b = Pos2::new(10.0, 0.0);
        assert_eq!(distance_to_segment(Pos2::new(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_segment(Pos2::new(13.0, 4.0), a, b), 5.0);
        assert_eq!(distance_to_segment(Pos2::new(0.0, 2.0), a, a), 2.0);
    }

    #[test]
    fn test_disc_is_clipped_to_buffer() {
        let mut buffer = PixelBuffer::new(10, 10, PAPER);
        let changed = buffer.paint_disc(Pos2::new(0.0, 0.0), 3.0, INK);
        assert!(changed > 0);
        assert_eq!(buffer.count(INK) as u64, changed);

        let outside = buffer.paint_disc(Pos2::new(-50.0, -50.0), 3.0, INK);
        assert_eq!(outside, 0);
    }

    #[test]
    fn test_repainting_same_color_changes_nothing() {
        let mut buffer = PixelBuffer::new(20, 20, PAPER);
        let first = buffer.paint_segment(Pos2::new(2.0, 2.0), Pos2::new(15.0, 9.0), 2.0, INK);
        let second = buffer.paint_segment(Pos2::new(2.0, 2.0), Pos2::new(15.0, 9.0), 2.0, INK);
        assert!(first > 0);
        assert_eq!(second, 0);
    }

    #[test]
    fn test_pixel_at_rejects_negative_positions() {
        let buffer = PixelBuffer::new(4, 4, PAPER);
        assert_eq!(buffer.pixel_at(Pos2::new(-0.5, 1.0)), None);
        assert_eq!(buffer.pixel_at(Pos2::new(3.9, 3.9)), Some(PAPER));
        assert_eq!(buffer.pixel_at(Pos2::new(4.0, 0.0)), None);
    }
}
