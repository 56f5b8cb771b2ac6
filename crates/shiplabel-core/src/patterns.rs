//! Common regex patterns for form input and identifiers.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Tracking number: "1Z" + 8 base-36 characters + 2 digits
    pub static ref TRACKING_NUMBER: Regex = Regex::new(
        r"^1Z[A-Z0-9]{8}\d{2}$"
    ).unwrap();

    // Leading decimal number, the way a browser number input parses it
    pub static ref LEADING_NUMBER: Regex = Regex::new(
        r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?"
    ).unwrap();

    // Dimensions such as "12x8x4" or "12 x 8.5 x 4"
    pub static ref DIMENSIONS: Regex = Regex::new(
        r"(?i)^\s*(\d+(?:\.\d+)?)\s*x\s*(\d+(?:\.\d+)?)\s*x\s*(\d+(?:\.\d+)?)\s*$"
    ).unwrap();
}
