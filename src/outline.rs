use egui::{Color32, ColorImage, Pos2};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::pixels::{PixelBuffer, PAPER};

/// Whether a mask color counts as drawn line art
pub fn is_boundary_color(color: Rgba<u8>, darkness_threshold: u8) -> bool {
    color[0] < darkness_threshold && color[1] < darkness_threshold && color[2] < darkness_threshold
}

/// Read-only snapshot of a template's line art.
///
/// Built once per template load and consulted by the brush and the flood
/// fill. There is intentionally no `&mut self` API.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineMask {
    pixels: PixelBuffer,
    darkness_threshold: u8,
}

impl OutlineMask {
    /// Flatten `art` onto white paper and scale it to the canvas size.
    ///
    /// Transparent backgrounds therefore read as paper rather than as
    /// (black, zero-alpha) boundary pixels.
    pub fn from_art(art: &RgbaImage, width: u32, height: u32, darkness_threshold: u8) -> Self {
        let scaled = if art.dimensions() == (width, height) {
            art.clone()
        } else {
            imageops::resize(art, width, height, FilterType::Nearest)
        };

        let mut flat = RgbaImage::from_pixel(width, height, PAPER);
        for (dst, src) in flat.pixels_mut().zip(scaled.pixels()) {
            *dst = composite_over_paper(*src);
        }

        Self {
            pixels: PixelBuffer::from_image(flat),
            darkness_threshold,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn darkness_threshold(&self) -> u8 {
        self.darkness_threshold
    }

    /// Out-of-bounds coordinates are never boundaries
    pub fn is_boundary(&self, x: u32, y: u32) -> bool {
        self.pixels
            .pixel(x, y)
            .is_some_and(|color| is_boundary_color(color, self.darkness_threshold))
    }

    pub fn is_boundary_at(&self, pos: Pos2) -> bool {
        self.pixels
            .pixel_at(pos)
            .is_some_and(|color| is_boundary_color(color, self.darkness_threshold))
    }

    /// Sample the segment `from`-`to` and report whether any sample lands on
    /// line art. Sample count grows with length, never below `min_samples`.
    ///
    /// Only the part of the segment inside the mask is sampled, so the work is
    /// bounded by the mask size however far the segment reaches.
    pub fn segment_crosses_boundary(&self, from: Pos2, to: Pos2, min_samples: usize, spacing: f32) -> bool {
        let (width, height) = (self.width() as f32, self.height() as f32);
        let Some((from, to)) = clip_to_bounds(from, to, width, height) else {
            return false;
        };

        let length = (to - from).length();
        let by_length = if spacing > 0.0 {
            let most = (width.hypot(height) / spacing).ceil() as usize + 1;
            ((length / spacing).ceil() as usize).min(most)
        } else {
            0
        };
        let samples = by_length.max(min_samples).max(2);

        (0..samples).any(|i| {
            let t = i as f32 / (samples - 1) as f32;
            self.is_boundary_at(from + (to - from) * t)
        })
    }

    /// The pristine line art, used to (re)initialise the visible canvas
    pub fn to_buffer(&self) -> PixelBuffer {
        self.pixels.clone()
    }

    /// Overlay with boundary pixels in `glow` and everything else clear
    pub fn glow_image(&self, glow: Color32) -> ColorImage {
        let size = [self.width() as usize, self.height() as usize];
        let pixels = self
            .pixels
            .as_image()
            .pixels()
            .map(|p| {
                if is_boundary_color(*p, self.darkness_threshold) {
                    glow
                } else {
                    Color32::TRANSPARENT
                }
            })
            .collect();
        ColorImage { size, pixels }
    }
}

/// Part of `from`-`to` inside `[0, width] × [0, height]` (Liang-Barsky).
/// `None` when the segment misses the rect or has a non-finite end.
fn clip_to_bounds(from: Pos2, to: Pos2, width: f32, height: f32) -> Option<(Pos2, Pos2)> {
    if ![from.x, from.y, to.x, to.y].iter().all(|v| v.is_finite()) {
        return None;
    }
    let d = to - from;
    let (mut t0, mut t1) = (0.0_f32, 1.0_f32);
    for (p, q) in [(-d.x, from.x), (d.x, width - from.x), (-d.y, from.y), (d.y, height - from.y)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((from + d * t0, from + d * t1))
}

fn composite_over_paper(src: Rgba<u8>) -> Rgba<u8> {
    let alpha = src[3] as u32;
    let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
    Rgba([blend(src[0]), blend(src[1]), blend(src[2]), 255])
}
