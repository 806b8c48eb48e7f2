//! Form lifecycle: validation, freezing into the signed view, and the
//! summary send state.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};

use crate::app::domain::form::{FieldId, FormField, Requirement};
use crate::app::domain::stroke::Snapshot;
use crate::app::infrastructure::error::{AppError, Result, TransportError, ValidationError};
use crate::app::services::date_format::{format_signing_date, parse_field_date};
use crate::app::services::summary::{SubmissionPayload, build_payload};

pub const SEND_LABEL: &str = "Send Contract";
pub const SENDING_LABEL: &str = "Sending...";
pub const SENT_LABEL: &str = "Sent \u{2713}";

const SIGNATURE_LABEL: &str = "Client Signature";

/// A field as it appears once the form is frozen.
#[derive(Debug, Clone, PartialEq)]
pub struct FrozenField {
    pub id: FieldId,
    pub text: String,
    pub multiline: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignatureBlock {
    pub name: String,
    pub position: String,
    pub signature: Snapshot,
    pub date_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignedDocument {
    pub fields: Vec<FrozenField>,
    pub signature: SignatureBlock,
}

impl SignedDocument {
    pub fn field(&self, id: FieldId) -> Option<&FrozenField> {
        self.fields.iter().find(|f| f.id == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormPhase {
    Editing,
    Signed(SignedDocument),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendState {
    Ready,
    InFlight,
    /// Delivered; sending stays disabled for the rest of the session.
    Sent,
}

pub struct FormController {
    fields: Vec<FormField>,
    phase: FormPhase,
    send_state: SendState,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    pub fn new() -> Self {
        Self {
            fields: FieldId::ALL.iter().map(|&id| FormField::new(id)).collect(),
            phase: FormPhase::Editing,
            send_state: SendState::Ready,
        }
    }

    /// A fresh form with the client date prefilled.
    pub fn with_date(today: NaiveDate) -> Self {
        let mut form = Self::new();
        form.set_value(FieldId::ClientDate, &today.format("%Y-%m-%d").to_string());
        form
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, id: FieldId) -> &FormField {
        // Every FieldId is inserted in new()
        &self.fields[Self::index_of(id)]
    }

    fn field_mut(&mut self, id: FieldId) -> &mut FormField {
        &mut self.fields[Self::index_of(id)]
    }

    /// `fields` is built from `FieldId::ALL`, whose order matches the
    /// enum discriminants.
    fn index_of(id: FieldId) -> usize {
        id as usize
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn is_signed(&self) -> bool {
        matches!(self.phase, FormPhase::Signed(_))
    }

    pub fn signed_document(&self) -> Option<&SignedDocument> {
        match &self.phase {
            FormPhase::Signed(doc) => Some(doc),
            FormPhase::Editing => None,
        }
    }

    /// Update a field from its input control. Returns `false` when the field
    /// is locked (confirmed, or the form is signed) and nothing changed.
    pub fn set_value(&mut self, id: FieldId, value: &str) -> bool {
        if self.is_signed() {
            return false;
        }
        let field = self.field_mut(id);
        if field.is_read_only() {
            return false;
        }
        field.value = value.to_string();
        true
    }

    /// Tick or untick a signer confirmation box. Returns the resulting
    /// read-only state of the field, which is also whether the tick took:
    /// a blank field refuses it and the adapter should clear the box.
    pub fn set_confirmation(&mut self, id: FieldId, checked: bool) -> bool {
        if id.confirmation_label().is_none() || self.is_signed() {
            return self.field(id).is_read_only();
        }
        let field = self.field_mut(id);
        field.set_confirmed(checked);
        field.is_read_only()
    }

    /// Collect every missing label in reporting order.
    pub fn validate(&self, signature: Option<&Snapshot>) -> std::result::Result<(), ValidationError> {
        self.check(signature).map(|_| ())
    }

    /// Validation proper. Hands back the signature once nothing is missing.
    fn check<'a>(&self, signature: Option<&'a Snapshot>) -> std::result::Result<&'a Snapshot, ValidationError> {
        let mut missing: Vec<String> = self
            .fields
            .iter()
            .filter(|f| f.id.requirement() == Requirement::Required && f.is_blank())
            .map(|f| f.id.label().to_string())
            .collect();

        let signers = [FieldId::ClientName, FieldId::ClientPosition];
        for id in signers {
            if self.field(id).is_blank() {
                missing.push(id.label().to_string());
            }
        }
        if signature.is_none() {
            missing.push(SIGNATURE_LABEL.to_string());
        }
        for id in signers {
            let field = self.field(id);
            if let Some(label) = id.confirmation_label() {
                if !field.is_blank() && !field.is_confirmed() {
                    missing.push(label.to_string());
                }
            }
        }

        match signature {
            Some(snapshot) if missing.is_empty() => Ok(snapshot),
            _ => Err(ValidationError { missing }),
        }
    }

    /// Validate and, on success, freeze the form into its signed view.
    /// The date printed under the signature comes from the client date
    /// field, falling back to `today` when it is empty or unreadable.
    pub fn submit(&mut self, signature: Option<&Snapshot>, today: NaiveDate) -> Result<SignedDocument> {
        if self.is_signed() {
            return Err(AppError::AlreadySigned);
        }
        let signature = self.check(signature).inspect_err(|e| {
            info!(missing = e.missing.len(), "submission blocked by validation");
        })?;

        let fields = self
            .fields
            .iter()
            .map(|f| FrozenField {
                id: f.id,
                text: f.display_value().to_string(),
                multiline: f.id.is_multiline(),
            })
            .collect();

        let date = parse_field_date(&self.field(FieldId::ClientDate).value).unwrap_or(today);
        let block = SignatureBlock {
            name: self.field(FieldId::ClientName).trimmed().to_string(),
            position: self.field(FieldId::ClientPosition).trimmed().to_string(),
            signature: signature.clone(),
            date_text: format_signing_date(date),
        };

        info!(date = %block.date_text, "contract signed");
        let doc = SignedDocument { fields, signature: block };
        self.phase = FormPhase::Signed(doc.clone());
        Ok(doc)
    }

    pub fn send_state(&self) -> SendState {
        self.send_state
    }

    pub fn can_send(&self) -> bool {
        self.send_state == SendState::Ready
    }

    pub fn send_label(&self) -> &'static str {
        match self.send_state {
            SendState::Ready => SEND_LABEL,
            SendState::InFlight => SENDING_LABEL,
            SendState::Sent => SENT_LABEL,
        }
    }

    /// Start a send. Marks the request in flight and returns the payload
    /// built from the current values, or `None` while a send is in flight
    /// or after one succeeded.
    pub fn begin_send(&mut self, now: DateTime<Utc>) -> Option<SubmissionPayload> {
        if self.send_state != SendState::Ready {
            return None;
        }
        self.send_state = SendState::InFlight;
        info!("sending contract summary");
        Some(build_payload(&self.fields, now))
    }

    pub fn finish_send(&mut self, result: &std::result::Result<(), TransportError>) -> SendState {
        if self.send_state != SendState::InFlight {
            return self.send_state;
        }
        self.send_state = match result {
            Ok(()) => SendState::Sent,
            Err(e) => {
                warn!(error = %e, "sending contract summary failed");
                SendState::Ready
            }
        };
        self.send_state
    }
}
