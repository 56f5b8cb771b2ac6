//! Per-address "magic paste" state.

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;
use crate::models::address::AddressTarget;

/// Paste box and in-flight flag for one address form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutofillSlot {
    /// Raw text pasted by the user.
    pub input: String,

    /// Whether the paste panel is shown instead of the manual fields.
    pub open: bool,

    /// Whether a parse is pending for this address.
    pub parsing: bool,
}

impl AutofillSlot {
    /// Whether the submit action should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.parsing && !self.input.trim().is_empty()
    }

    /// Mark the slot as parsing and hand out a ticket for the request.
    pub(crate) fn begin(&mut self, target: AddressTarget) -> Result<AutofillTicket, ExtractionError> {
        if self.parsing {
            return Err(ExtractionError::InFlight);
        }
        if self.input.trim().is_empty() {
            return Err(ExtractionError::EmptyInput);
        }

        self.parsing = true;
        Ok(AutofillTicket {
            target,
            text: self.input.clone(),
        })
    }

    /// Settle a finished parse. The panel closes and the input clears only
    /// when the parse succeeded.
    pub(crate) fn finish(&mut self, succeeded: bool) {
        self.parsing = false;
        if succeeded {
            self.input.clear();
            self.open = false;
        }
    }
}

/// Proof that a parse was started for one address.
///
/// Consumed by `FormState::finish_autofill`, so each started parse settles
/// exactly once.
#[derive(Debug)]
#[must_use = "an autofill ticket must be passed back to finish_autofill"]
pub struct AutofillTicket {
    target: AddressTarget,
    text: String,
}

impl AutofillTicket {
    /// Address the parse will replace.
    pub fn target(&self) -> AddressTarget {
        self.target
    }

    /// Text captured when the parse started.
    pub fn text(&self) -> &str {
        &self.text
    }
}
