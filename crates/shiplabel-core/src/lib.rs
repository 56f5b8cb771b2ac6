//! Core library for shipping label generation.
//!
//! This crate provides:
//! - Address, package and label data models
//! - A form state holder with per-address AI autofill
//! - Address extraction from free-form text (Gemini provider)
//! - Label rendering to printable HTML and plain text

pub mod error;
pub mod extract;
pub mod form;
pub mod models;
pub mod patterns;
pub mod render;
pub mod rng;

pub use error::{ExtractionError, Result, ShiplabelError, AUTOFILL_FAILED_MESSAGE};
pub use extract::AddressExtractor;
#[cfg(feature = "gemini")]
pub use extract::GeminiExtractor;
pub use form::{AutofillSlot, AutofillTicket, FormState};
pub use models::address::{Address, AddressField, AddressTarget};
pub use models::config::{ExtractionConfig, PackageDefaults, RenderConfig, ShiplabelConfig};
pub use models::label::LabelData;
pub use models::package::{parse_weight, service_letter, PackageDetails, ServiceType, WeightUnit};
pub use models::tracking::{generate_tracking_number, is_tracking_number};
pub use render::{render, render_label, LabelRenderer, RenderedLabel};
