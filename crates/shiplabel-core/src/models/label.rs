//! The composite view the renderer draws from.

use serde::{Deserialize, Serialize};

use super::address::Address;
use super::package::PackageDetails;

/// Everything printed on one label.
///
/// Built fresh from the current form state on every render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelData {
    /// Ship-from address.
    pub sender: Address,

    /// Ship-to address.
    pub receiver: Address,

    /// Package metadata.
    pub package: PackageDetails,
}

impl LabelData {
    /// Collect human-readable gaps before printing.
    ///
    /// Nothing here blocks rendering; the form accepts any text.
    pub fn missing_fields(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for (role, addr) in [("sender", &self.sender), ("receiver", &self.receiver)] {
            if addr.full_name.is_empty() {
                issues.push(format!("Missing {} name", role));
            }
            if addr.street.is_empty() {
                issues.push(format!("Missing {} street", role));
            }
            if addr.city.is_empty() {
                issues.push(format!("Missing {} city", role));
            }
        }

        if self.package.weight <= 0.0 {
            issues.push("Package weight is zero".to_string());
        }
        if self.package.parsed_dimensions().is_none() {
            issues.push(format!(
                "Dimensions \"{}\" are not in LxWxH form",
                self.package.dimensions
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::package::{ServiceType, WeightUnit};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn label(dimensions: &str, weight: f64) -> LabelData {
        let address = Address {
            full_name: "John Doe".to_string(),
            street: "123 Main St".to_string(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            country: "USA".to_string(),
            phone_number: String::new(),
        };
        LabelData {
            sender: address.clone(),
            receiver: address,
            package: PackageDetails {
                weight,
                weight_unit: WeightUnit::Pounds,
                dimensions: dimensions.to_string(),
                service_type: ServiceType::Standard,
                tracking_number: "1ZAB12CD3401".to_string(),
                ship_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            },
        }
    }

    #[test]
    fn test_complete_label_has_no_issues() {
        assert!(label("12 x 8.5 x 4", 1.5).missing_fields().is_empty());
    }

    #[test]
    fn test_issues_listed() {
        let mut data = label("shoebox", 0.0);
        data.receiver.city.clear();

        assert_eq!(
            data.missing_fields(),
            vec![
                "Missing receiver city".to_string(),
                "Package weight is zero".to_string(),
                "Dimensions \"shoebox\" are not in LxWxH form".to_string(),
            ]
        );
    }
}
