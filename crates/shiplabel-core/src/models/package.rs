//! Package metadata printed on the label.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::patterns::{DIMENSIONS, LEADING_NUMBER};

/// Package details for one shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDetails {
    /// Package weight in `weight_unit`.
    pub weight: f64,

    /// Unit the weight is expressed in.
    pub weight_unit: WeightUnit,

    /// Free-text dimensions, conventionally "LxWxH".
    pub dimensions: String,

    /// Service level.
    pub service_type: ServiceType,

    /// Opaque tracking identifier, assigned per session and on reset.
    pub tracking_number: String,

    /// Ship date (ISO `YYYY-MM-DD` in JSON).
    pub ship_date: NaiveDate,
}

impl PackageDetails {
    /// Set the weight from raw form input, coercing junk to zero.
    pub fn set_weight_input(&mut self, input: &str) {
        self.weight = parse_weight(input);
    }

    /// Dimensions as numbers, if they follow the "LxWxH" convention.
    pub fn parsed_dimensions(&self) -> Option<(f64, f64, f64)> {
        let caps = DIMENSIONS.captures(&self.dimensions)?;
        Some((
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        ))
    }
}

/// Parse a weight the way a browser number field does.
///
/// The longest leading decimal number wins; anything that does not start
/// with a number, or is not finite, becomes zero.
pub fn parse_weight(input: &str) -> f64 {
    LEADING_NUMBER
        .find(input.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|w| w.is_finite())
        .unwrap_or(0.0)
}

/// Unit of package weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightUnit {
    /// Pounds.
    #[default]
    #[serde(rename = "lbs")]
    Pounds,
    /// Kilograms.
    #[serde(rename = "kg")]
    Kilograms,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Pounds => "lbs",
            WeightUnit::Kilograms => "kg",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lbs" | "lb" | "pounds" | "pound" => Ok(WeightUnit::Pounds),
            "kg" | "kgs" | "kilograms" | "kilogram" => Ok(WeightUnit::Kilograms),
            _ => Err(format!("unknown weight unit: {}", s)),
        }
    }
}

/// Service level of the shipment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceType {
    /// Ground service.
    #[default]
    Standard,
    /// Priority service.
    Priority,
    /// Express service.
    Express,
}

impl ServiceType {
    /// All service levels in menu order.
    pub const ALL: [ServiceType; 3] = [
        ServiceType::Standard,
        ServiceType::Priority,
        ServiceType::Express,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Standard => "STANDARD",
            ServiceType::Priority => "PRIORITY",
            ServiceType::Express => "EXPRESS",
        }
    }

    /// Single-letter service indicator printed on the label.
    pub fn letter(&self) -> char {
        service_letter(self.as_str())
    }
}

/// Map a service name to its label letter.
///
/// Total over all strings: `PRIORITY` is `P`, `EXPRESS` is `E`, and
/// everything else (`STANDARD` included) is ground, `G`.
pub fn service_letter(service: &str) -> char {
    match service {
        "PRIORITY" => 'P',
        "EXPRESS" => 'E',
        _ => 'G',
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "STANDARD" | "GROUND" => Ok(ServiceType::Standard),
            "PRIORITY" => Ok(ServiceType::Priority),
            "EXPRESS" => Ok(ServiceType::Express),
            _ => {
                let known: Vec<&str> = ServiceType::ALL.iter().map(|t| t.as_str()).collect();
                Err(format!(
                    "unknown service type: {} (expected one of {})",
                    s,
                    known.join(", ")
                ))
            }
        }
    }
}
