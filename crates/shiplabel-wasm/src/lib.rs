//! WASM bindings for the shipping label generator.
//!
//! The browser page owns a [`LabelForm`], feeds it field edits, and runs
//! AI autofill in three steps: `beginAutofill` hands back the pasted text,
//! the page awaits `extractAddress`, then settles the parse with
//! `finishAutofill` or `failAutofill`.

use chrono::NaiveDate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use shiplabel_core::{
    Address, AddressExtractor, AddressField, AddressTarget, AutofillTicket, ExtractionError,
    FormState, GeminiExtractor, LabelRenderer, PackageDefaults, PackageDetails, RenderedLabel,
    ServiceType, WeightUnit,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_target(target: &str) -> Result<AddressTarget, JsValue> {
    target.parse().map_err(js_error)
}

/// Warn on the console when no API key was provided. Returns whether one was.
#[wasm_bindgen(js_name = checkApiKey)]
pub fn check_api_key(api_key: Option<String>) -> bool {
    let present = api_key.is_some_and(|k| !k.trim().is_empty());
    if !present {
        web_sys::console::warn_1(&JsValue::from_str(
            "No API key configured. AI autofill is unavailable.",
        ));
    }
    present
}

/// Extract a structured address from unstructured text.
///
/// Resolves to `{ fullName, street, city, state, country, phoneNumber }`.
/// Rejects with the generic failure message; details go to the console.
#[wasm_bindgen(js_name = extractAddress)]
pub async fn extract_address(api_key: String, text: String) -> Result<JsValue, JsValue> {
    if api_key.trim().is_empty() {
        let e = ExtractionError::Unavailable("apiKey".to_string());
        return Err(JsValue::from_str(&e.user_message()));
    }

    let extractor = GeminiExtractor::new(api_key);
    let address = extractor.extract_address(&text).await.map_err(|e| {
        web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
        JsValue::from_str(&e.user_message())
    })?;

    serde_wasm_bindgen::to_value(&address).map_err(js_error)
}

/// Single-letter code for a service level: P, E, or G for anything else.
#[wasm_bindgen(js_name = serviceLetter)]
pub fn service_letter(service: &str) -> String {
    shiplabel_core::service_letter(service).to_string()
}

/// Generate a fresh tracking number.
#[wasm_bindgen(js_name = generateTrackingNumber)]
pub fn generate_tracking_number() -> String {
    shiplabel_core::generate_tracking_number()
}

/// Whether a string has the shape of a generated tracking number.
#[wasm_bindgen(js_name = isTrackingNumber)]
pub fn is_tracking_number(s: &str) -> bool {
    shiplabel_core::is_tracking_number(s)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AutofillStatus<'a> {
    input: &'a str,
    open: bool,
    parsing: bool,
    can_submit: bool,
}

/// Label form state for browser use.
#[wasm_bindgen]
pub struct LabelForm {
    state: FormState,
    renderer: LabelRenderer,
    sender_ticket: Option<AutofillTicket>,
    receiver_ticket: Option<AutofillTicket>,
}

#[wasm_bindgen]
impl LabelForm {
    /// Start a new session with default package details.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::from_state(FormState::start(PackageDefaults::default()))
    }

    /// Start a new session with custom package defaults.
    #[wasm_bindgen(js_name = withDefaults)]
    pub fn with_defaults(defaults: JsValue) -> Result<LabelForm, JsValue> {
        let defaults: PackageDefaults =
            serde_wasm_bindgen::from_value(defaults).map_err(js_error)?;
        Ok(Self::from_state(FormState::start(defaults)))
    }

    /// Restore a session saved with `toJson`.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<LabelForm, JsValue> {
        let state: FormState = serde_json::from_str(json).map_err(js_error)?;
        Ok(Self::from_state(state))
    }

    /// Serialize the session (addresses, package, session date).
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state).map_err(js_error)
    }

    #[wasm_bindgen(js_name = getSender)]
    pub fn sender(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.state.sender()).map_err(js_error)
    }

    #[wasm_bindgen(js_name = setSender)]
    pub fn set_sender(&mut self, address: JsValue) -> Result<(), JsValue> {
        let address: Address = serde_wasm_bindgen::from_value(address).map_err(js_error)?;
        self.state.set_sender(address);
        Ok(())
    }

    #[wasm_bindgen(js_name = getReceiver)]
    pub fn receiver(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.state.receiver()).map_err(js_error)
    }

    #[wasm_bindgen(js_name = setReceiver)]
    pub fn set_receiver(&mut self, address: JsValue) -> Result<(), JsValue> {
        let address: Address = serde_wasm_bindgen::from_value(address).map_err(js_error)?;
        self.state.set_receiver(address);
        Ok(())
    }

    #[wasm_bindgen(js_name = getPackage)]
    pub fn package(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.state.package()).map_err(js_error)
    }

    /// Replace the package details. A blank tracking number keeps the current one.
    #[wasm_bindgen(js_name = setPackage)]
    pub fn set_package(&mut self, package: JsValue) -> Result<(), JsValue> {
        let package: PackageDetails = serde_wasm_bindgen::from_value(package).map_err(js_error)?;
        self.state.set_package(package);
        Ok(())
    }

    /// Edit one address field, e.g. `setAddressField("receiver", "city", "Austin")`.
    #[wasm_bindgen(js_name = setAddressField)]
    pub fn set_address_field(&mut self, target: &str, field: &str, value: &str) -> Result<(), JsValue> {
        let target = parse_target(target)?;
        let field: AddressField = field.parse().map_err(js_error)?;
        self.state.set_address_field(target, field, value);
        Ok(())
    }

    /// Set the weight from raw input; text that is not a number becomes 0.
    #[wasm_bindgen(js_name = setWeightInput)]
    pub fn set_weight_input(&mut self, input: &str) {
        self.state.set_weight_input(input);
    }

    #[wasm_bindgen(js_name = setWeightUnit)]
    pub fn set_weight_unit(&mut self, unit: &str) -> Result<(), JsValue> {
        let unit: WeightUnit = unit.parse().map_err(js_error)?;
        self.state.set_weight_unit(unit);
        Ok(())
    }

    #[wasm_bindgen(js_name = setDimensions)]
    pub fn set_dimensions(&mut self, dimensions: &str) {
        self.state.set_dimensions(dimensions);
    }

    #[wasm_bindgen(js_name = setServiceType)]
    pub fn set_service_type(&mut self, service: &str) -> Result<(), JsValue> {
        let service: ServiceType = service.parse().map_err(js_error)?;
        self.state.set_service_type(service);
        Ok(())
    }

    /// Set the ship date (`YYYY-MM-DD`).
    #[wasm_bindgen(js_name = setShipDate)]
    pub fn set_ship_date(&mut self, date: &str) -> Result<(), JsValue> {
        let date: NaiveDate = date.parse().map_err(js_error)?;
        self.state.set_ship_date(date);
        Ok(())
    }

    #[wasm_bindgen(getter, js_name = trackingNumber)]
    pub fn tracking_number(&self) -> String {
        self.state.package().tracking_number.clone()
    }

    /// Clear both addresses, restore package defaults and assign a new
    /// tracking number.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Warnings for fields a printed label would be missing.
    #[wasm_bindgen(js_name = missingFields)]
    pub fn missing_fields(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.state.label_data().missing_fields()).map_err(js_error)
    }

    #[wasm_bindgen(js_name = setAutofillInput)]
    pub fn set_autofill_input(&mut self, target: &str, text: &str) -> Result<(), JsValue> {
        self.state.set_autofill_input(parse_target(target)?, text);
        Ok(())
    }

    #[wasm_bindgen(js_name = toggleAutofill)]
    pub fn toggle_autofill(&mut self, target: &str) -> Result<(), JsValue> {
        self.state.toggle_autofill(parse_target(target)?);
        Ok(())
    }

    /// `{ input, open, parsing, canSubmit }` for one address panel.
    #[wasm_bindgen(js_name = autofillStatus)]
    pub fn autofill_status(&self, target: &str) -> Result<JsValue, JsValue> {
        let slot = self.state.autofill_slot(parse_target(target)?);
        let status = AutofillStatus {
            input: &slot.input,
            open: slot.open,
            parsing: slot.parsing,
            can_submit: slot.can_submit(),
        };
        serde_wasm_bindgen::to_value(&status).map_err(js_error)
    }

    /// Mark a parse as pending and return the text to extract from.
    ///
    /// Rejected while a parse for the same address is pending or when
    /// nothing has been pasted.
    #[wasm_bindgen(js_name = beginAutofill)]
    pub fn begin_autofill(&mut self, target: &str) -> Result<String, JsValue> {
        let target = parse_target(target)?;
        let ticket = self
            .state
            .begin_autofill(target)
            .map_err(|e| JsValue::from_str(&e.user_message()))?;
        let text = ticket.text().to_string();
        *self.ticket_mut(target) = Some(ticket);
        Ok(text)
    }

    /// Apply an extracted address, replacing the target address wholesale.
    #[wasm_bindgen(js_name = finishAutofill)]
    pub fn finish_autofill(&mut self, target: &str, address: JsValue) -> Result<(), JsValue> {
        let target = parse_target(target)?;
        let ticket = self.take_ticket(target)?;
        let result = serde_wasm_bindgen::from_value::<Address>(address)
            .map_err(|e| ExtractionError::Malformed(e.to_string()));
        self.state
            .finish_autofill(ticket, result)
            .map_err(|e| JsValue::from_str(&e.user_message()))
    }

    /// Settle a failed parse. The form is left unchanged; returns the
    /// message to show the user.
    #[wasm_bindgen(js_name = failAutofill)]
    pub fn fail_autofill(&mut self, target: &str, reason: &str) -> Result<String, JsValue> {
        let target = parse_target(target)?;
        let ticket = self.take_ticket(target)?;
        let error = ExtractionError::Request(reason.to_string());
        let message = self
            .state
            .finish_autofill(ticket, Err(error))
            .err()
            .map(|e| e.user_message())
            .unwrap_or_default();
        Ok(message)
    }

    /// Printable 4x6 HTML document. Omit `seed` for a fresh barcode.
    #[wasm_bindgen(js_name = renderHtml)]
    pub fn render_html(&self, seed: Option<u32>) -> String {
        self.rendered(seed).to_html()
    }

    /// Label markup without the document wrapper, for embedding in a page.
    #[wasm_bindgen(js_name = renderHtmlFragment)]
    pub fn render_html_fragment(&self, seed: Option<u32>) -> String {
        self.rendered(seed).to_html_fragment()
    }

    #[wasm_bindgen(js_name = renderText)]
    pub fn render_text(&self, seed: Option<u32>) -> String {
        self.rendered(seed).to_text()
    }

    /// The laid-out label as a JSON string.
    #[wasm_bindgen(js_name = renderJson)]
    pub fn render_json(&self, seed: Option<u32>) -> Result<String, JsValue> {
        serde_json::to_string(&self.rendered(seed)).map_err(js_error)
    }
}

impl LabelForm {
    fn from_state(state: FormState) -> Self {
        Self {
            state,
            renderer: LabelRenderer::new(),
            sender_ticket: None,
            receiver_ticket: None,
        }
    }

    fn ticket_mut(&mut self, target: AddressTarget) -> &mut Option<AutofillTicket> {
        match target {
            AddressTarget::Sender => &mut self.sender_ticket,
            AddressTarget::Receiver => &mut self.receiver_ticket,
        }
    }

    fn take_ticket(&mut self, target: AddressTarget) -> Result<AutofillTicket, JsValue> {
        self.ticket_mut(target)
            .take()
            .ok_or_else(|| JsValue::from_str(&format!("no {} autofill in progress", target)))
    }

    fn rendered(&self, seed: Option<u32>) -> RenderedLabel {
        let label = self.state.label_data();
        match seed {
            Some(seed) => self.renderer.render(&label, u64::from(seed)),
            None => self.renderer.render_fresh(&label),
        }
    }
}

impl Default for LabelForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn john_doe() -> Address {
        Address {
            full_name: "John Doe".to_string(),
            street: "123 Main St".to_string(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            country: "USA".to_string(),
            phone_number: "555-0123".to_string(),
        }
    }

    #[wasm_bindgen_test]
    fn test_service_letter() {
        assert_eq!(service_letter("PRIORITY"), "P");
        assert_eq!(service_letter("EXPRESS"), "E");
        assert_eq!(service_letter("STANDARD"), "G");
        assert_eq!(service_letter("OVERNIGHT"), "G");
    }

    #[wasm_bindgen_test]
    fn test_generated_tracking_numbers() {
        let tracking = generate_tracking_number();
        assert!(is_tracking_number(&tracking));
        assert!(!is_tracking_number("2Z1234567890"));
    }

    #[wasm_bindgen_test]
    fn test_new_form_has_tracking_number() {
        let form = LabelForm::new();
        assert!(is_tracking_number(&form.tracking_number()));
    }

    #[wasm_bindgen_test]
    fn test_autofill_round_trip() {
        let mut form = LabelForm::new();
        form.set_autofill_input("receiver", "John Doe, 123 Main St, Austin, TX, 555-0123")
            .unwrap();

        let text = form.begin_autofill("receiver").unwrap();
        assert!(text.starts_with("John Doe"));
        assert!(form.begin_autofill("receiver").is_err());

        let value = serde_wasm_bindgen::to_value(&john_doe()).unwrap();
        form.finish_autofill("receiver", value).unwrap();

        let receiver: Address = serde_wasm_bindgen::from_value(form.receiver().unwrap()).unwrap();
        assert_eq!(receiver, john_doe());
    }

    #[wasm_bindgen_test]
    fn test_failed_autofill_leaves_form_unchanged() {
        let mut form = LabelForm::new();
        form.set_address_field("sender", "fullName", "Acme Corp").unwrap();
        form.set_autofill_input("sender", "garbage").unwrap();
        let before = form.to_json().unwrap();

        form.begin_autofill("sender").unwrap();
        let message = form.fail_autofill("sender", "network error").unwrap();

        assert_eq!(message, shiplabel_core::AUTOFILL_FAILED_MESSAGE);
        assert_eq!(form.to_json().unwrap(), before);
        assert!(form.fail_autofill("sender", "network error").is_err());
        assert!(form.begin_autofill("sender").is_ok());
    }

    #[wasm_bindgen_test]
    fn test_render_text_with_seed() {
        let mut form = LabelForm::new();
        form.set_address_field("receiver", "city", "austin").unwrap();
        form.set_address_field("receiver", "state", "tx").unwrap();
        form.set_weight_input("abc");

        let text = form.render_text(Some(7));
        assert!(text.contains("AUSTIN, TX"));
        assert!(text.contains("0 LBS"));
        assert_eq!(text, form.render_text(Some(7)));
    }

    #[wasm_bindgen_test]
    fn test_from_json_assigns_missing_tracking_number() {
        let form = LabelForm::new();
        let mut json: serde_json::Value = serde_json::from_str(&form.to_json().unwrap()).unwrap();
        json["package"]["trackingNumber"] = serde_json::Value::from("");

        let restored = LabelForm::from_json(&json.to_string()).unwrap();
        assert!(is_tracking_number(&restored.tracking_number()));
    }

    #[wasm_bindgen_test]
    fn test_reset_changes_tracking_number() {
        let mut form = LabelForm::new();
        let before = form.tracking_number();
        form.reset();
        assert_ne!(form.tracking_number(), before);
    }
}
