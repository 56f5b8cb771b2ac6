//! Tracking number generation.
//!
//! Tracking numbers are opaque session identifiers in the familiar
//! `1Z...` shape. They carry no checksum and no carrier meaning.

use crate::patterns::TRACKING_NUMBER;
use crate::rng::{random_seed, SplitMix64};

const PREFIX: &str = "1Z";
const BODY_LEN: usize = 8;
const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generate a fresh tracking number from the entropy source.
pub fn generate_tracking_number() -> String {
    tracking_number_from_seed(random_seed())
}

/// Build a tracking number deterministically from a seed.
pub fn tracking_number_from_seed(seed: u64) -> String {
    let mut rng = SplitMix64::new(seed);
    let mut out = String::with_capacity(PREFIX.len() + BODY_LEN + 2);
    out.push_str(PREFIX);

    for _ in 0..BODY_LEN {
        out.push(BASE36[rng.below(36) as usize] as char);
    }
    out.push_str(&format!("{:02}", rng.below(100)));

    out
}

/// Check that a string has the tracking number shape.
pub fn is_tracking_number(s: &str) -> bool {
    TRACKING_NUMBER.is_match(s)
}
