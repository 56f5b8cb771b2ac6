//! Address extraction from unstructured text.
//!
//! The extraction service is a capability: raw text in, a complete
//! [`Address`] or an [`ExtractionError`] out. Providers implement
//! [`AddressExtractor`]; the form logic only ever sees the trait.

pub mod prompt;
pub mod response;

#[cfg(feature = "gemini")]
pub mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::GeminiExtractor;
pub use prompt::{build_prompt, response_schema, REQUIRED_FIELDS};
pub use response::parse_address_response;

use crate::error::ExtractionError;
use crate::models::address::Address;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for address extraction providers.
///
/// Implementations make a single attempt per call: no retries and no
/// caching, so identical text is always sent again. They must not touch
/// form state; applying the result is the caller's job.
#[allow(async_fn_in_trait)]
pub trait AddressExtractor {
    /// Turn free-form text into a fully populated address.
    async fn extract_address(&self, raw_text: &str) -> Result<Address>;
}
