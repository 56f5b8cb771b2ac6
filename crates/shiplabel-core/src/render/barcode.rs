//! Decorative barcode pattern.
//!
//! This is not a symbology. Bars are random widths with random gaps and
//! encode nothing; the pattern only makes the label look like a label.

use serde::Serialize;

use crate::rng::SplitMix64;

/// Width of a wide bar, in bar units.
pub const WIDE: u8 = 4;

/// Width of a narrow bar, in bar units.
pub const NARROW: u8 = 1;

const WIDE_ODDS: f64 = 0.5;
const HIDDEN_ODDS: f64 = 0.1;

/// One bar of the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bar {
    /// Width in bar units.
    pub width: u8,
    /// Hidden bars still take up space, leaving a gap.
    pub visible: bool,
}

/// A pattern of bars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Barcode {
    pub bars: Vec<Bar>,
}

impl Barcode {
    /// Generate `count` bars from a seed.
    pub fn generate(seed: u64, count: usize) -> Self {
        let mut rng = SplitMix64::new(seed);
        let bars = (0..count)
            .map(|_| {
                let width = if rng.next_f64() > WIDE_ODDS { WIDE } else { NARROW };
                let visible = rng.next_f64() > HIDDEN_ODDS;
                Bar { width, visible }
            })
            .collect();

        Self { bars }
    }

    /// Total width in bar units, with a one-unit gap between bars.
    pub fn total_width(&self) -> u32 {
        let bars: u32 = self.bars.iter().map(|b| b.width as u32).sum();
        bars + self.bars.len().saturating_sub(1) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_pattern() {
        assert_eq!(Barcode::generate(3, 60), Barcode::generate(3, 60));
        assert_ne!(Barcode::generate(3, 60), Barcode::generate(4, 60));
    }

    #[test]
    fn test_bar_widths() {
        let code = Barcode::generate(11, 500);
        assert!(code.bars.iter().all(|b| b.width == WIDE || b.width == NARROW));
        assert!(code.bars.iter().any(|b| b.width == WIDE));
        assert!(code.bars.iter().any(|b| b.width == NARROW));
        assert!(code.bars.iter().any(|b| !b.visible));
        assert!(code.bars.iter().filter(|b| b.visible).count() > 400);
    }

    #[test]
    fn test_total_width() {
        let code = Barcode {
            bars: vec![
                Bar { width: WIDE, visible: true },
                Bar { width: NARROW, visible: false },
                Bar { width: NARROW, visible: true },
            ],
        };
        assert_eq!(code.total_width(), 8);
        assert_eq!(Barcode { bars: vec![] }.total_width(), 0);
    }
}
