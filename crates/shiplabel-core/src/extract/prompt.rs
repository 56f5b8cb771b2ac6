//! Prompt and output schema sent to the text-understanding service.

use serde_json::{json, Value};

/// Fields the service must always return, even as empty strings.
pub const REQUIRED_FIELDS: [&str; 4] = ["fullName", "street", "city", "state"];

/// Fields the service may leave out.
pub const OPTIONAL_FIELDS: [&str; 2] = ["country", "phoneNumber"];

/// Build the instruction prompt for one piece of raw address text.
pub fn build_prompt(raw_text: &str, default_country: &str) -> String {
    format!(
        "Parse the following unstructured address text into a structured JSON object.\n\
         Do NOT include zip codes or postal codes anywhere, not in the city and not in the state.\n\
         Any field that cannot be found must be an empty string, never omitted.\n\
         If the country is not stated, infer it from the city or state; if it cannot be inferred, use \"{}\".\n\
         Extract the phone number if one is present.\n\
         Text: \"{}\"",
        default_country,
        raw_text.trim()
    )
}

/// JSON output schema for the structured address.
pub fn response_schema() -> Value {
    let properties: serde_json::Map<String, Value> = REQUIRED_FIELDS
        .iter()
        .chain(OPTIONAL_FIELDS.iter())
        .map(|name| (name.to_string(), json!({ "type": "STRING" })))
        .collect();

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": REQUIRED_FIELDS,
    })
}
