//! Validation of the structured address returned by the service.

use serde_json::{Map, Value};
use tracing::debug;

use super::Result;
use crate::error::ExtractionError;
use crate::models::address::Address;

/// Turn the service's JSON text into an [`Address`].
///
/// `fullName`, `street`, `city` and `state` must be present as strings
/// (empty is fine). A missing or blank `country` falls back to
/// `default_country`; a missing `phoneNumber` becomes empty. Anything else
/// fails the whole extraction, so no partial address ever escapes.
pub fn parse_address_response(text: &str, default_country: &str) -> Result<Address> {
    let value: Value = serde_json::from_str(text.trim())
        .map_err(|e| ExtractionError::Malformed(e.to_string()))?;

    let obj = value
        .as_object()
        .ok_or_else(|| ExtractionError::Malformed("expected a JSON object".to_string()))?;

    let country = optional(obj, "country")?
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| default_country.to_string());

    let address = Address {
        full_name: required(obj, "fullName")?,
        street: required(obj, "street")?,
        city: required(obj, "city")?,
        state: required(obj, "state")?,
        country,
        phone_number: optional(obj, "phoneNumber")?.unwrap_or_default(),
    };

    debug!("Parsed address response into {} fields", obj.len());

    Ok(address)
}

fn required(obj: &Map<String, Value>, key: &'static str) -> Result<String> {
    optional(obj, key)?.ok_or(ExtractionError::MissingField(key))
}

fn optional(obj: &Map<String, Value>, key: &'static str) -> Result<Option<String>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ExtractionError::InvalidField(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_response() {
        let text = r#"{"fullName":"John Doe","street":"123 Main St","city":"Austin",
            "state":"TX","country":"USA","phoneNumber":"555-0123"}"#;

        let addr = parse_address_response(text, "USA").unwrap();
        assert_eq!(
            addr,
            Address {
                full_name: "John Doe".to_string(),
                street: "123 Main St".to_string(),
                city: "Austin".to_string(),
                state: "TX".to_string(),
                country: "USA".to_string(),
                phone_number: "555-0123".to_string(),
            }
        );
    }

    #[test]
    fn test_optional_fields_default() {
        let text = r#"{"fullName":"Jane Roe","street":"","city":"Toronto","state":"ON"}"#;

        let addr = parse_address_response(text, "USA").unwrap();
        assert_eq!(addr.street, "");
        assert_eq!(addr.country, "USA");
        assert_eq!(addr.phone_number, "");

        let text = r#"{"fullName":"","street":"","city":"","state":"","country":"  ","phoneNumber":null}"#;
        let addr = parse_address_response(text, "Canada").unwrap();
        assert_eq!(addr.country, "Canada");
        assert_eq!(addr.phone_number, "");
    }

    #[test]
    fn test_missing_required_field() {
        let text = r#"{"fullName":"John Doe","street":"123 Main St","state":"TX"}"#;
        assert_eq!(
            parse_address_response(text, "USA"),
            Err(ExtractionError::MissingField("city"))
        );
    }

    #[test]
    fn test_malformed_responses() {
        assert!(matches!(
            parse_address_response("not json at all", "USA"),
            Err(ExtractionError::Malformed(_))
        ));
        assert!(matches!(
            parse_address_response(r#"["John Doe"]"#, "USA"),
            Err(ExtractionError::Malformed(_))
        ));
        assert_eq!(
            parse_address_response(
                r#"{"fullName":"A","street":"B","city":"C","state":42}"#,
                "USA"
            ),
            Err(ExtractionError::InvalidField("state"))
        );
    }
}
