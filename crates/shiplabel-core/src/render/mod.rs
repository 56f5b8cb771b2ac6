//! Label rendering.
//!
//! Rendering is a pure function of the label data and a seed. The seed
//! only drives the decorative barcode; every text block follows fixed
//! formatting rules. [`RenderedLabel`] is the laid-out label, which can be
//! written as printable HTML or as a plain-text preview.

mod barcode;
mod html;
mod text;

pub use barcode::{Bar, Barcode};
pub use html::escape_html;

use serde::Serialize;
use tracing::debug;

use crate::models::address::Address;
use crate::models::config::RenderConfig;
use crate::models::label::LabelData;
use crate::models::package::service_letter;
use crate::rng::random_seed;

/// Fixed billing line in the footer.
pub const BILLING_LINE: &str = "BILL SENDER";

/// A fully laid-out shipping label.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedLabel {
    /// Ship-from lines, upper-cased, phone line only if present.
    pub ship_from: Vec<String>,

    /// Weight badge, e.g. `1.5 LBS`.
    pub weight_badge: String,

    /// Ship-to block.
    pub ship_to: ShipToBlock,

    /// Large service indicator letter.
    pub service_letter: char,

    /// Service name shown beside the letter.
    pub service_name: String,

    /// Tracking badge, e.g. `Tracking #: 1Z...`.
    pub tracking_badge: String,

    /// Decorative barcode.
    pub barcode: Barcode,

    /// Caption under the barcode (the tracking number).
    pub barcode_caption: String,

    /// Footer strip.
    pub footer: Footer,
}

/// The receiver block.
///
/// Name, street and country are shown as entered; only the city/state line
/// is upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipToBlock {
    pub full_name: String,
    pub street: String,
    pub city_state: String,
    pub country: String,
    pub phone: Option<String>,
}

impl ShipToBlock {
    /// Block lines in print order.
    pub fn lines(&self) -> Vec<&str> {
        let mut lines = vec![
            self.full_name.as_str(),
            self.street.as_str(),
            self.city_state.as_str(),
            self.country.as_str(),
        ];
        if let Some(phone) = &self.phone {
            lines.push(phone.as_str());
        }
        lines
    }
}

/// The footer strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    pub billing: String,
    pub reference: String,
    pub dimensions: String,
}

/// Lays out labels.
#[derive(Debug, Clone)]
pub struct LabelRenderer {
    barcode_bars: usize,
}

impl LabelRenderer {
    /// Create a renderer with default settings.
    pub fn new() -> Self {
        Self::from_config(&RenderConfig::default())
    }

    /// Create a renderer from configuration.
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            barcode_bars: config.barcode_bars,
        }
    }

    /// Set the number of barcode bars.
    pub fn with_barcode_bars(mut self, bars: usize) -> Self {
        self.barcode_bars = bars;
        self
    }

    /// Lay out a label. Output depends only on `label` and `seed`.
    pub fn render(&self, label: &LabelData, seed: u64) -> RenderedLabel {
        let pkg = &label.package;

        let rendered = RenderedLabel {
            ship_from: ship_from_lines(&label.sender),
            weight_badge: format!("{} {}", pkg.weight, pkg.weight_unit.as_str().to_uppercase()),
            ship_to: ship_to_block(&label.receiver),
            service_letter: service_letter(pkg.service_type.as_str()),
            service_name: pkg.service_type.as_str().to_uppercase(),
            tracking_badge: format!("Tracking #: {}", pkg.tracking_number),
            barcode: Barcode::generate(seed, self.barcode_bars),
            barcode_caption: pkg.tracking_number.clone(),
            footer: Footer {
                billing: BILLING_LINE.to_string(),
                reference: format!("REF: {}", pkg.ship_date),
                dimensions: pkg.dimensions.clone(),
            },
        };

        debug!("Rendered label {} with seed {:#x}", pkg.tracking_number, seed);

        rendered
    }

    /// Lay out a label with a freshly drawn barcode seed.
    pub fn render_fresh(&self, label: &LabelData) -> RenderedLabel {
        self.render(label, random_seed())
    }
}

impl Default for LabelRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Lay out a label with default settings.
pub fn render(label: &LabelData, seed: u64) -> RenderedLabel {
    LabelRenderer::new().render(label, seed)
}

/// Lay out a label with default settings and a fresh seed.
pub fn render_label(label: &LabelData) -> RenderedLabel {
    LabelRenderer::new().render_fresh(label)
}

fn ship_from_lines(sender: &Address) -> Vec<String> {
    let mut lines = vec![
        sender.full_name.to_uppercase(),
        sender.street.to_uppercase(),
        format!("{}, {}", sender.city.to_uppercase(), sender.state.to_uppercase()),
        sender.country.to_uppercase(),
    ];
    if !sender.phone_number.is_empty() {
        lines.push(format!("TEL: {}", sender.phone_number.to_uppercase()));
    }
    lines
}

fn ship_to_block(receiver: &Address) -> ShipToBlock {
    ShipToBlock {
        full_name: receiver.full_name.clone(),
        street: receiver.street.clone(),
        city_state: format!(
            "{}, {}",
            receiver.city.to_uppercase(),
            receiver.state.to_uppercase()
        ),
        country: receiver.country.clone(),
        phone: (!receiver.phone_number.is_empty())
            .then(|| format!("TEL: {}", receiver.phone_number)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::package::{PackageDetails, ServiceType, WeightUnit};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    pub(super) fn sample_label() -> LabelData {
        LabelData {
            sender: Address {
                full_name: "Acme Corp".to_string(),
                street: "1 Warehouse Rd".to_string(),
                city: "Reno".to_string(),
                state: "nv".to_string(),
                country: "usa".to_string(),
                phone_number: "775-555-0100 ext".to_string(),
            },
            receiver: Address {
                full_name: "John Doe".to_string(),
                street: "123 Main St".to_string(),
                city: "Austin".to_string(),
                state: "tx".to_string(),
                country: "Usa".to_string(),
                phone_number: String::new(),
            },
            package: PackageDetails {
                weight: 2.0,
                weight_unit: WeightUnit::Kilograms,
                dimensions: "12x8x4 in".to_string(),
                service_type: ServiceType::Priority,
                tracking_number: "1ZAB12CD3401".to_string(),
                ship_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            },
        }
    }

    #[test]
    fn test_sender_block_upper_cased() {
        let label = render(&sample_label(), 1);
        assert_eq!(
            label.ship_from,
            vec![
                "ACME CORP",
                "1 WAREHOUSE RD",
                "RENO, NV",
                "USA",
                "TEL: 775-555-0100 EXT",
            ]
        );
    }

    #[test]
    fn test_receiver_block_mostly_as_entered() {
        let label = render(&sample_label(), 1);
        assert_eq!(
            label.ship_to,
            ShipToBlock {
                full_name: "John Doe".to_string(),
                street: "123 Main St".to_string(),
                city_state: "AUSTIN, TX".to_string(),
                country: "Usa".to_string(),
                phone: None,
            }
        );
    }

    #[test]
    fn test_phone_lines_omitted_when_empty() {
        let mut data = sample_label();
        data.sender.phone_number = String::new();
        data.receiver.phone_number = "555-0123".to_string();

        let label = render(&data, 1);
        assert_eq!(label.ship_from.len(), 4);
        assert_eq!(label.ship_to.phone.as_deref(), Some("TEL: 555-0123"));
    }

    #[test]
    fn test_package_lines() {
        let label = render(&sample_label(), 1);
        assert_eq!(label.weight_badge, "2 KG");
        assert_eq!(label.service_letter, 'P');
        assert_eq!(label.service_name, "PRIORITY");
        assert_eq!(label.tracking_badge, "Tracking #: 1ZAB12CD3401");
        assert_eq!(label.barcode_caption, "1ZAB12CD3401");
        assert_eq!(
            label.footer,
            Footer {
                billing: "BILL SENDER".to_string(),
                reference: "REF: 2024-03-15".to_string(),
                dimensions: "12x8x4 in".to_string(),
            }
        );
    }

    #[test]
    fn test_service_letters() {
        let mut data = sample_label();
        for (service, letter) in [
            (ServiceType::Standard, 'G'),
            (ServiceType::Priority, 'P'),
            (ServiceType::Express, 'E'),
        ] {
            data.package.service_type = service;
            assert_eq!(render(&data, 0).service_letter, letter);
        }
    }

    #[test]
    fn test_fractional_weight_badge() {
        let mut data = sample_label();
        data.package.weight = 1.5;
        data.package.weight_unit = WeightUnit::Pounds;
        assert_eq!(render(&data, 0).weight_badge, "1.5 LBS");
    }

    #[test]
    fn test_render_is_pure_for_a_seed() {
        let data = sample_label();
        assert_eq!(render(&data, 42), render(&data, 42));

        let a = render(&data, 42);
        let b = render(&data, 43);
        assert_eq!(a.ship_from, b.ship_from);
        assert_eq!(a.ship_to, b.ship_to);
        assert_eq!(a.footer, b.footer);
    }

    #[test]
    fn test_barcode_bar_count_follows_config() {
        let renderer = LabelRenderer::from_config(&RenderConfig { barcode_bars: 12 });
        assert_eq!(renderer.render(&sample_label(), 5).barcode.bars.len(), 12);
        assert_eq!(render_label(&sample_label()).barcode.bars.len(), 60);
    }
}
