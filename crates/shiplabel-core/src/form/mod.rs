//! Form state holder.
//!
//! [`FormState`] owns the sender, receiver and package records for one
//! label session. It performs no validation: every text field takes any
//! input, and the weight coerces junk to zero. Extraction results replace
//! an address wholesale through the autofill slots.

mod autofill;

pub use autofill::{AutofillSlot, AutofillTicket};

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ExtractionError;
use crate::extract::AddressExtractor;
use crate::models::address::{Address, AddressField, AddressTarget};
use crate::models::config::PackageDefaults;
use crate::models::label::LabelData;
use crate::models::package::{PackageDetails, ServiceType, WeightUnit};
use crate::models::tracking::generate_tracking_number;

/// Owned state of one label form.
///
/// Deserializing never yields a blank tracking number: a saved session
/// without one is assigned a fresh number.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SavedForm")]
pub struct FormState {
    sender: Address,
    receiver: Address,
    package: PackageDetails,
    session_date: NaiveDate,

    #[serde(skip)]
    defaults: PackageDefaults,
    #[serde(skip)]
    sender_autofill: AutofillSlot,
    #[serde(skip)]
    receiver_autofill: AutofillSlot,
}

impl FormState {
    /// Start a session dated `today`.
    pub fn new(defaults: PackageDefaults, today: NaiveDate) -> Self {
        let package = default_package(&defaults, today);
        info!("Started label session {}", package.tracking_number);

        Self {
            sender: Address::empty(),
            receiver: Address::empty(),
            package,
            session_date: today,
            defaults,
            sender_autofill: AutofillSlot::default(),
            receiver_autofill: AutofillSlot::default(),
        }
    }

    /// Start a session dated with the local calendar date.
    pub fn start(defaults: PackageDefaults) -> Self {
        Self::new(defaults, chrono::Local::now().date_naive())
    }

    /// Load a saved session from a JSON label file.
    pub fn load(path: &Path, defaults: PackageDefaults) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let state: FormState = serde_json::from_str(&content)?;
        debug!("Loaded label session {} from {}", state.package.tracking_number, path.display());
        Ok(state.with_defaults(defaults))
    }

    /// Write the session to a JSON label file.
    ///
    /// Only the label data and session date are stored; autofill state is
    /// transient.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Replace the package defaults used by [`FormState::reset`].
    pub fn with_defaults(mut self, defaults: PackageDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn sender(&self) -> &Address {
        &self.sender
    }

    pub fn set_sender(&mut self, address: Address) {
        self.sender = address;
    }

    pub fn receiver(&self) -> &Address {
        &self.receiver
    }

    pub fn set_receiver(&mut self, address: Address) {
        self.receiver = address;
    }

    /// Read either address.
    pub fn address(&self, target: AddressTarget) -> &Address {
        match target {
            AddressTarget::Sender => &self.sender,
            AddressTarget::Receiver => &self.receiver,
        }
    }

    /// Replace either address wholesale.
    pub fn set_address(&mut self, target: AddressTarget, address: Address) {
        match target {
            AddressTarget::Sender => self.sender = address,
            AddressTarget::Receiver => self.receiver = address,
        }
    }

    /// Manual edit of a single address field.
    pub fn set_address_field(
        &mut self,
        target: AddressTarget,
        field: AddressField,
        value: impl Into<String>,
    ) {
        let updated = self.address(target).clone().with_field(field, value);
        self.set_address(target, updated);
    }

    pub fn package(&self) -> &PackageDetails {
        &self.package
    }

    /// Replace the package record.
    ///
    /// The tracking number is kept if the new record leaves it blank.
    pub fn set_package(&mut self, package: PackageDetails) {
        let keep_tracking = package.tracking_number.trim().is_empty();
        let tracking = std::mem::take(&mut self.package.tracking_number);

        self.package = package;
        if keep_tracking {
            self.package.tracking_number = tracking;
        }
    }

    /// Set the weight from raw form input.
    pub fn set_weight_input(&mut self, input: &str) {
        self.package.set_weight_input(input);
        debug!("Weight input {:?} stored as {}", input, self.package.weight);
    }

    pub fn set_weight_unit(&mut self, unit: WeightUnit) {
        self.package.weight_unit = unit;
    }

    pub fn set_dimensions(&mut self, dimensions: impl Into<String>) {
        self.package.dimensions = dimensions.into();
    }

    pub fn set_service_type(&mut self, service: ServiceType) {
        self.package.service_type = service;
    }

    pub fn set_ship_date(&mut self, date: NaiveDate) {
        self.package.ship_date = date;
    }

    /// Date the session started.
    pub fn session_date(&self) -> NaiveDate {
        self.session_date
    }

    /// Clear both addresses, restore package defaults and assign a new
    /// tracking number.
    pub fn reset(&mut self) {
        self.sender = Address::empty();
        self.receiver = Address::empty();
        self.package = default_package(&self.defaults, self.session_date);

        info!("Form reset, new tracking number {}", self.package.tracking_number);
    }

    /// Snapshot of the current state for rendering.
    pub fn label_data(&self) -> LabelData {
        LabelData {
            sender: self.sender.clone(),
            receiver: self.receiver.clone(),
            package: self.package.clone(),
        }
    }

    /// Autofill state for one address.
    pub fn autofill_slot(&self, target: AddressTarget) -> &AutofillSlot {
        match target {
            AddressTarget::Sender => &self.sender_autofill,
            AddressTarget::Receiver => &self.receiver_autofill,
        }
    }

    fn autofill_slot_mut(&mut self, target: AddressTarget) -> &mut AutofillSlot {
        match target {
            AddressTarget::Sender => &mut self.sender_autofill,
            AddressTarget::Receiver => &mut self.receiver_autofill,
        }
    }

    /// Store the raw text pasted for one address.
    pub fn set_autofill_input(&mut self, target: AddressTarget, text: impl Into<String>) {
        self.autofill_slot_mut(target).input = text.into();
    }

    /// Switch one address between manual entry and the paste panel.
    pub fn toggle_autofill(&mut self, target: AddressTarget) {
        let slot = self.autofill_slot_mut(target);
        slot.open = !slot.open;
    }

    /// Start a parse of the pasted text for one address.
    ///
    /// Refused while a parse for the same address is pending, or when
    /// nothing has been pasted.
    pub fn begin_autofill(
        &mut self,
        target: AddressTarget,
    ) -> Result<AutofillTicket, ExtractionError> {
        let ticket = self.autofill_slot_mut(target).begin(target)?;
        debug!("Autofill started for {}", target);
        Ok(ticket)
    }

    /// Settle a parse started by [`FormState::begin_autofill`].
    ///
    /// On success the target address is replaced wholesale. On failure the
    /// form is left exactly as it was and the error is handed back.
    pub fn finish_autofill(
        &mut self,
        ticket: AutofillTicket,
        result: Result<Address, ExtractionError>,
    ) -> Result<(), ExtractionError> {
        let target = ticket.target();

        match result {
            Ok(address) => {
                self.autofill_slot_mut(target).finish(true);
                self.set_address(target, address);
                info!("Autofilled {} address", target);
                Ok(())
            }
            Err(e) => {
                self.autofill_slot_mut(target).finish(false);
                warn!("Autofill for {} failed: {}", target, e);
                Err(e)
            }
        }
    }

    /// Parse the pasted text for one address and apply the result.
    pub async fn autofill<E: AddressExtractor>(
        &mut self,
        target: AddressTarget,
        extractor: &E,
    ) -> Result<(), ExtractionError> {
        let ticket = self.begin_autofill(target)?;
        let result = extractor.extract_address(ticket.text()).await;
        self.finish_autofill(ticket, result)
    }
}

/// Persisted part of a [`FormState`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedForm {
    sender: Address,
    receiver: Address,
    package: PackageDetails,
    session_date: NaiveDate,
}

impl From<SavedForm> for FormState {
    fn from(saved: SavedForm) -> Self {
        let mut package = saved.package;
        if package.tracking_number.trim().is_empty() {
            package.tracking_number = generate_tracking_number();
            warn!("Saved session had no tracking number, assigned {}", package.tracking_number);
        }

        Self {
            sender: saved.sender,
            receiver: saved.receiver,
            package,
            session_date: saved.session_date,
            defaults: PackageDefaults::default(),
            sender_autofill: AutofillSlot::default(),
            receiver_autofill: AutofillSlot::default(),
        }
    }
}

impl PartialEq for FormState {
    fn eq(&self, other: &Self) -> bool {
        self.sender == other.sender
            && self.receiver == other.receiver
            && self.package == other.package
            && self.session_date == other.session_date
    }
}

fn default_package(defaults: &PackageDefaults, ship_date: NaiveDate) -> PackageDetails {
    PackageDetails {
        weight: defaults.weight,
        weight_unit: defaults.weight_unit,
        dimensions: defaults.dimensions.clone(),
        service_type: defaults.service_type,
        tracking_number: generate_tracking_number(),
        ship_date,
    }
}
