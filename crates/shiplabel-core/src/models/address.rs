//! Postal address records for the sender and receiver.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A sender or receiver address.
///
/// Every field is plain text and may be empty. Records are replaced
/// wholesale by an extraction result, never merged field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Person or company name.
    pub full_name: String,

    /// Street line, including apartment or suite.
    pub street: String,

    /// City name.
    pub city: String,

    /// State, province or region.
    pub state: String,

    /// Country name or code.
    pub country: String,

    /// Contact phone number.
    pub phone_number: String,
}

impl Address {
    /// An address with every field empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if every field is empty.
    pub fn is_empty(&self) -> bool {
        AddressField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Read a single field.
    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::FullName => &self.full_name,
            AddressField::Street => &self.street,
            AddressField::City => &self.city,
            AddressField::State => &self.state,
            AddressField::Country => &self.country,
            AddressField::PhoneNumber => &self.phone_number,
        }
    }

    /// Return a copy with one field replaced.
    pub fn with_field(mut self, field: AddressField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            AddressField::FullName => self.full_name = value,
            AddressField::Street => self.street = value,
            AddressField::City => self.city = value,
            AddressField::State => self.state = value,
            AddressField::Country => self.country = value,
            AddressField::PhoneNumber => self.phone_number = value,
        }
        self
    }

    /// Format as a single line, skipping empty parts.
    pub fn format(&self) -> String {
        let locality = match (self.city.is_empty(), self.state.is_empty()) {
            (false, false) => format!("{}, {}", self.city, self.state),
            (false, true) => self.city.clone(),
            (true, false) => self.state.clone(),
            (true, true) => String::new(),
        };

        [
            self.full_name.as_str(),
            self.street.as_str(),
            locality.as_str(),
            self.country.as_str(),
        ]
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// One of the six address fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AddressField {
    FullName,
    Street,
    City,
    State,
    Country,
    PhoneNumber,
}

impl AddressField {
    /// All fields in label order.
    pub const ALL: [AddressField; 6] = [
        AddressField::FullName,
        AddressField::Street,
        AddressField::City,
        AddressField::State,
        AddressField::Country,
        AddressField::PhoneNumber,
    ];

    /// JSON key for this field.
    pub fn key(&self) -> &'static str {
        match self {
            AddressField::FullName => "fullName",
            AddressField::Street => "street",
            AddressField::City => "city",
            AddressField::State => "state",
            AddressField::Country => "country",
            AddressField::PhoneNumber => "phoneNumber",
        }
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AddressField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "fullname" | "name" => Ok(AddressField::FullName),
            "street" => Ok(AddressField::Street),
            "city" => Ok(AddressField::City),
            "state" => Ok(AddressField::State),
            "country" => Ok(AddressField::Country),
            "phonenumber" | "phone" => Ok(AddressField::PhoneNumber),
            _ => Err(format!("unknown address field: {}", s)),
        }
    }
}

/// Which address on the label a form edit or autofill applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressTarget {
    Sender,
    Receiver,
}

impl fmt::Display for AddressTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressTarget::Sender => write!(f, "sender"),
            AddressTarget::Receiver => write!(f, "receiver"),
        }
    }
}

impl FromStr for AddressTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sender" | "from" => Ok(AddressTarget::Sender),
            "receiver" | "to" => Ok(AddressTarget::Receiver),
            _ => Err(format!("unknown address target: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_serializes_camel_case() {
        let addr = Address::empty()
            .with_field(AddressField::FullName, "John Doe")
            .with_field(AddressField::PhoneNumber, "555-0123");

        let json = serde_json::to_value(&addr).unwrap();
        assert_eq!(json["fullName"], "John Doe");
        assert_eq!(json["phoneNumber"], "555-0123");
        assert_eq!(json["country"], "");
    }

    #[test]
    fn test_empty_address() {
        assert!(Address::empty().is_empty());
        assert!(!Address::empty().with_field(AddressField::City, "Austin").is_empty());
    }

    #[test]
    fn test_field_parsing() {
        assert_eq!("fullName".parse::<AddressField>(), Ok(AddressField::FullName));
        assert_eq!("full_name".parse::<AddressField>(), Ok(AddressField::FullName));
        assert_eq!("phone".parse::<AddressField>(), Ok(AddressField::PhoneNumber));
        assert!("zip".parse::<AddressField>().is_err());
    }

    #[test]
    fn test_address_format() {
        let addr = Address {
            full_name: "John Doe".to_string(),
            street: "123 Main St".to_string(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            country: "USA".to_string(),
            phone_number: "555-0123".to_string(),
        };
        assert_eq!(addr.format(), "John Doe, 123 Main St, Austin, TX, USA");
        assert_eq!(
            Address::empty().with_field(AddressField::State, "TX").format(),
            "TX"
        );
    }
}
