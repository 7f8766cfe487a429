use std::collections::VecDeque;

use image::Rgba;

use crate::outline::OutlineMask;
use crate::pixels::{self, PixelBuffer};

/// Why a fill was refused without touching the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillRejection {
    /// Seed lies outside the buffer
    OutOfBounds,
    /// Seed is on line art
    OnBoundary,
    /// Region already has the fill color
    SameColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// `truncated` is set when the pixel cap stopped the fill early
    Filled { changed: u64, truncated: bool },
    Rejected(FillRejection),
}

impl FillOutcome {
    pub fn changed(&self) -> u64 {
        match self {
            Self::Filled { changed, .. } => *changed,
            Self::Rejected(_) => 0,
        }
    }
}

/// Phase of the fill state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillPhase {
    #[default]
    Idle,
    SeedValidated { seed: (u32, u32), target: Rgba<u8> },
    Filling { queued: usize, changed: u64 },
}

impl FillPhase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::SeedValidated { .. } => "SeedValidated",
            Self::Filling { .. } => "Filling",
        }
    }
}

/// 4-connected flood fill over the visible canvas, gated by the outline mask
#[derive(Debug, Clone)]
pub struct FloodFill {
    cap: usize,
    phase: FillPhase,
}

impl FloodFill {
    /// `cap` bounds how many pixels one fill may change, the seed included
    pub fn new(cap: usize) -> Self {
        Self {
            cap: cap.max(1),
            phase: FillPhase::Idle,
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn phase(&self) -> FillPhase {
        self.phase
    }

    /// Validate the seed and fill. Always leaves the engine `Idle`.
    pub fn run(
        &mut self,
        buffer: &mut PixelBuffer,
        mask: &OutlineMask,
        seed: (u32, u32),
        color: Rgba<u8>,
    ) -> FillOutcome {
        let color = pixels::opaque(color);
        let outcome = match self.validate_seed(buffer, mask, seed, color) {
            Ok(target) => self.fill(buffer, seed, target, color),
            Err(rejection) => {
                log::debug!("Fill at {:?} rejected: {:?}", seed, rejection);
                FillOutcome::Rejected(rejection)
            }
        };
        self.phase = FillPhase::Idle;
        outcome
    }

    /// Idle -> SeedValidated, returning the target color
    fn validate_seed(
        &mut self,
        buffer: &PixelBuffer,
        mask: &OutlineMask,
        seed: (u32, u32),
        color: Rgba<u8>,
    ) -> Result<Rgba<u8>, FillRejection> {
        let target = Self::check_seed(buffer, mask, seed, color)?;
        self.phase = FillPhase::SeedValidated { seed, target };
        Ok(target)
    }

    /// Whether a fill from `seed` would run, without touching any state.
    /// Returns the target color, or why the fill would be rejected.
    pub fn check_seed(
        buffer: &PixelBuffer,
        mask: &OutlineMask,
        seed: (u32, u32),
        color: Rgba<u8>,
    ) -> Result<Rgba<u8>, FillRejection> {
        let (x, y) = seed;
        let target = buffer.pixel(x, y).ok_or(FillRejection::OutOfBounds)?;
        if mask.is_boundary(x, y) {
            return Err(FillRejection::OnBoundary);
        }
        if target == pixels::opaque(color) {
            return Err(FillRejection::SameColor);
        }
        Ok(target)
    }

    /// SeedValidated -> Filling. Pixels are recolored as they are queued, so
    /// a recolored pixel never matches `target` again and is never requeued.
    fn fill(&mut self, buffer: &mut PixelBuffer, seed: (u32, u32), target: Rgba<u8>, color: Rgba<u8>) -> FillOutcome {
        let (width, height) = (buffer.width(), buffer.height());
        let mut queue = VecDeque::new();
        let mut changed: u64 = 0;
        let mut truncated = false;

        buffer.set_pixel(seed.0, seed.1, color);
        changed += 1;
        queue.push_back(seed);

        'fill: while let Some((x, y)) = queue.pop_front() {
            self.phase = FillPhase::Filling {
                queued: queue.len(),
                changed,
            };

            let neighbors = [
                (x.checked_sub(1), Some(y)),
                (x.checked_add(1).filter(|nx| *nx < width), Some(y)),
                (Some(x), y.checked_sub(1)),
                (Some(x), y.checked_add(1).filter(|ny| *ny < height)),
            ];
            for (nx, ny) in neighbors {
                let (Some(nx), Some(ny)) = (nx, ny) else {
                    continue;
                };
                if buffer.pixel(nx, ny) != Some(target) {
                    continue;
                }
                if changed as usize >= self.cap {
                    truncated = true;
                    break 'fill;
                }
                buffer.set_pixel(nx, ny, color);
                changed += 1;
                queue.push_back((nx, ny));
            }
        }

        if truncated {
            log::debug!("Fill at {:?} stopped at the {} pixel cap", seed, self.cap);
        }
        FillOutcome::Filled { changed, truncated }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixels::{INK, PAPER};
    use image::RgbaImage;

    fn blank_mask(width: u32, height: u32) -> OutlineMask {
        OutlineMask::from_art(&RgbaImage::from_pixel(width, height, PAPER), width, height, 50)
    }

    #[test]
    fn test_phase_returns_to_idle() {
        let mask = blank_mask(8, 8);
        let mut buffer = mask.to_buffer();
        let mut engine = FloodFill::new(1_000);

        let outcome = engine.run(&mut buffer, &mask, (3, 3), INK);
        assert_eq!(outcome, FillOutcome::Filled { changed: 64, truncated: false });
        assert_eq!(engine.phase(), FillPhase::Idle);

        let outcome = engine.run(&mut buffer, &mask, (3, 3), INK);
        assert_eq!(outcome, FillOutcome::Rejected(FillRejection::SameColor));
        assert_eq!(engine.phase(), FillPhase::Idle);
    }

    #[test]
    fn test_out_of_bounds_seed() {
        let mask = blank_mask(4, 4);
        let mut buffer = mask.to_buffer();
        let mut engine = FloodFill::new(100);

        let outcome = engine.run(&mut buffer, &mask, (4, 0), INK);
        assert_eq!(outcome, FillOutcome::Rejected(FillRejection::OutOfBounds));
        assert_eq!(buffer.count(PAPER), 16);
    }

    #[test]
    fn test_fill_color_is_forced_opaque() {
        let mask = blank_mask(3, 3);
        let mut buffer = mask.to_buffer();
        let mut engine = FloodFill::new(100);

        engine.run(&mut buffer, &mask, (0, 0), Rgba([10, 20, 30, 40]));
        assert_eq!(buffer.count(Rgba([10, 20, 30, 255])), 9);
    }

    #[test]
    fn test_check_seed_leaves_buffer_alone() {
        let mut art = RgbaImage::from_pixel(4, 4, PAPER);
        art.put_pixel(0, 0, INK);
        let mask = OutlineMask::from_art(&art, 4, 4, 50);
        let buffer = mask.to_buffer();

        assert_eq!(FloodFill::check_seed(&buffer, &mask, (0, 0), INK), Err(FillRejection::OnBoundary));
        assert_eq!(FloodFill::check_seed(&buffer, &mask, (2, 2), PAPER), Err(FillRejection::SameColor));
        assert_eq!(FloodFill::check_seed(&buffer, &mask, (9, 2), INK), Err(FillRejection::OutOfBounds));
        assert_eq!(FloodFill::check_seed(&buffer, &mask, (2, 2), INK), Ok(PAPER));
        assert_eq!(buffer, mask.to_buffer());
    }
}
