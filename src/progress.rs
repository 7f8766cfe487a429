use std::collections::HashMap;

use image::Rgba;

/// Heuristic "how much has been colored" counter.
///
/// `total_pixels` is the canvas area divided by a tunable divisor. It does
/// not try to measure the area enclosed by the line art; it only drives a
/// motivational progress bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEstimator {
    colored_pixels: u64,
    total_pixels: u64,
    usage: HashMap<Rgba<u8>, u64>,
}

impl ProgressEstimator {
    pub fn new(width: u32, height: u32, divisor: u64) -> Self {
        let area = width as u64 * height as u64;
        Self {
            colored_pixels: 0,
            total_pixels: (area / divisor.max(1)).max(1),
            usage: HashMap::new(),
        }
    }

    /// Count pixels changed with `color`. Counts only ever grow.
    pub fn record(&mut self, color: Rgba<u8>, changed: u64) {
        if changed == 0 {
            return;
        }
        self.colored_pixels = self.colored_pixels.saturating_add(changed);
        *self.usage.entry(color).or_default() += changed;
    }

    pub fn colored_pixels(&self) -> u64 {
        self.colored_pixels
    }

    pub fn total_pixels(&self) -> u64 {
        self.total_pixels
    }

    /// `min(colored / total, 1) * 100`
    pub fn percent(&self) -> f32 {
        if self.is_complete() {
            return 100.0;
        }
        let ratio = self.colored_pixels as f64 / self.total_pixels as f64;
        // Never round a partial session up to exactly 100
        ((ratio * 100.0) as f32).min(99.99)
    }

    pub fn is_complete(&self) -> bool {
        self.colored_pixels >= self.total_pixels
    }

    pub fn usage(&self, color: Rgba<u8>) -> u64 {
        self.usage.get(&color).copied().unwrap_or(0)
    }

    /// Most used color so far, ties broken toward the lower channel values
    pub fn favorite_color(&self) -> Option<(Rgba<u8>, u64)> {
        self.usage
            .iter()
            .max_by(|(ca, a), (cb, b)| a.cmp(b).then_with(|| cb.0.cmp(&ca.0)))
            .map(|(color, count)| (*color, *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    #[test]
    fn test_total_uses_divisor() {
        let progress = ProgressEstimator::new(500, 500, 3);
        assert_eq!(progress.total_pixels(), 83_333);
        assert_eq!(progress.percent(), 0.0);
    }

    #[test]
    fn test_tiny_canvas_never_divides_by_zero() {
        let progress = ProgressEstimator::new(1, 1, 3);
        assert_eq!(progress.total_pixels(), 1);
    }

    #[test]
    fn test_favorite_color() {
        let mut progress = ProgressEstimator::new(100, 100, 3);
        assert_eq!(progress.favorite_color(), None);

        progress.record(RED, 10);
        progress.record(BLUE, 25);
        progress.record(RED, 5);
        progress.record(BLUE, 0);

        assert_eq!(progress.usage(RED), 15);
        assert_eq!(progress.favorite_color(), Some((BLUE, 25)));
    }

    #[test]
    fn test_percent_reaches_100_only_when_complete() {
        let mut progress = ProgressEstimator::new(500, 500, 3);

        progress.record(RED, 83_332);
        assert!(!progress.is_complete());
        assert!(progress.percent() < 100.0);
        assert_eq!(progress.percent(), 99.99);

        progress.record(RED, 1);
        assert!(progress.is_complete());
        assert_eq!(progress.percent(), 100.0);

        progress.record(BLUE, 50_000);
        assert_eq!(progress.percent(), 100.0);
    }

    #[test]
    fn test_percent_never_decreases() {
        let mut progress = ProgressEstimator::new(300, 200, 3);
        let mut last = progress.percent();

        for changed in [0, 1, 7, 0, 250, 3_000, 1, 0, 9_999, 10_000, 20_000] {
            progress.record(RED, changed);
            let percent = progress.percent();
            assert!(percent >= last, "{} dropped below {}", percent, last);
            assert!(percent <= 100.0);
            last = percent;
        }
        assert_eq!(last, 100.0);
    }
}
