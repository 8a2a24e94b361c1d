//! SinkSync beta invite flow
//!
//! The lead-capture form as a state machine: typed field values, per-step
//! validation, and a submission record handed to a host-provided sink.
//! Rendering, the completion cookie, and the hosted datastore all stay on
//! the host side - the host passes the already-applied flag in and
//! receives the [`InviteRequest`] record out.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum name length
pub const MIN_NAME_LEN: usize = 2;
/// Minimum beta-reason length
pub const MIN_REASON_LEN: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

/// Monthly spending bracket, serialized with the datastore's labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpendingWillingness {
    #[serde(rename = "0")]
    Nothing,
    #[serde(rename = "20-50")]
    UpToFifty,
    #[serde(rename = "60-100")]
    UpToHundred,
    #[serde(rename = "100-200")]
    UpToTwoHundred,
    #[serde(rename = "unlimited")]
    Unlimited,
}

/// Raw field values as the player fills them in
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InviteFields {
    pub name: String,
    pub email: String,
    pub experience: Option<ExperienceLevel>,
    pub spending: Option<SpendingWillingness>,
    pub beta_reason: String,
}

/// Where the player is in the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InviteStage {
    Contact,
    Profile,
    Motivation,
    Submitted,
    /// One application per visitor; the host detected a prior one
    AlreadyApplied,
}

/// A single field rule violation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    NameTooShort,
    EmailInvalid,
    ExperienceMissing,
    SpendingMissing,
    ReasonTooShort,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            FieldError::NameTooShort => "Name must be at least 2 characters",
            FieldError::EmailInvalid => "Please enter a valid email address",
            FieldError::ExperienceMissing => "Please select your experience level",
            FieldError::SpendingMissing => "Please select your spending willingness",
            FieldError::ReasonTooShort => {
                "Please provide at least 50 characters explaining why you should be a beta tester"
            }
        };
        f.write_str(message)
    }
}

/// Why a submission did not go through
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Not on the final step (or already submitted)
    NotReady,
    Invalid(Vec<FieldError>),
    /// The sink rejected the record; the form stays re-submittable
    Sink(String),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::NotReady => write!(f, "form is not ready to submit"),
            SubmitError::Invalid(errors) => {
                write!(f, "{} field(s) failed validation", errors.len())
            }
            SubmitError::Sink(message) => {
                write!(f, "An error occurred while submitting your request: {message}")
            }
        }
    }
}

impl std::error::Error for SubmitError {}

/// The record the host persists on success
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteRequest {
    pub name: String,
    pub email: String,
    pub techdom_experience: ExperienceLevel,
    pub spending_willingness: SpendingWillingness,
    pub beta_reason: String,
}

/// Host-side persistence seam
pub trait SubmitSink {
    fn submit(&mut self, request: &InviteRequest) -> Result<(), String>;
}

/// The multi-step form
#[derive(Debug, Clone)]
pub struct InviteForm {
    stage: InviteStage,
    pub fields: InviteFields,
}

impl InviteForm {
    pub fn new(already_applied: bool) -> Self {
        Self {
            stage: if already_applied {
                InviteStage::AlreadyApplied
            } else {
                InviteStage::Contact
            },
            fields: InviteFields::default(),
        }
    }

    pub fn stage(&self) -> InviteStage {
        self.stage
    }

    /// Validate the current step and move forward. On failure the form
    /// stays put and the violations come back. Terminal stages and the
    /// final step are no-ops.
    pub fn advance(&mut self) -> Result<(), Vec<FieldError>> {
        let next = match self.stage {
            InviteStage::Contact => InviteStage::Profile,
            InviteStage::Profile => InviteStage::Motivation,
            _ => return Ok(()),
        };
        let errors = self.step_errors(self.stage);
        if errors.is_empty() {
            self.stage = next;
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Move back one step; never validates
    pub fn back(&mut self) {
        self.stage = match self.stage {
            InviteStage::Profile => InviteStage::Contact,
            InviteStage::Motivation => InviteStage::Profile,
            other => other,
        };
    }

    /// Violations for one step's fields
    fn step_errors(&self, stage: InviteStage) -> Vec<FieldError> {
        let mut errors = Vec::new();
        match stage {
            InviteStage::Contact => {
                if self.fields.name.chars().count() < MIN_NAME_LEN {
                    errors.push(FieldError::NameTooShort);
                }
                if !is_valid_email(&self.fields.email) {
                    errors.push(FieldError::EmailInvalid);
                }
            }
            InviteStage::Profile => {
                if self.fields.experience.is_none() {
                    errors.push(FieldError::ExperienceMissing);
                }
                if self.fields.spending.is_none() {
                    errors.push(FieldError::SpendingMissing);
                }
            }
            InviteStage::Motivation => {
                if self.fields.beta_reason.chars().count() < MIN_REASON_LEN {
                    errors.push(FieldError::ReasonTooShort);
                }
            }
            InviteStage::Submitted | InviteStage::AlreadyApplied => {}
        }
        errors
    }

    /// All violations across every step
    pub fn validate_all(&self) -> Vec<FieldError> {
        [InviteStage::Contact, InviteStage::Profile, InviteStage::Motivation]
            .into_iter()
            .flat_map(|stage| self.step_errors(stage))
            .collect()
    }

    /// Submit from the final step. Success flips the form to `Submitted`;
    /// a sink failure leaves it on `Motivation` so the player can retry.
    pub fn submit(&mut self, sink: &mut dyn SubmitSink) -> Result<(), SubmitError> {
        if self.stage != InviteStage::Motivation {
            return Err(SubmitError::NotReady);
        }
        let errors = self.validate_all();
        if !errors.is_empty() {
            return Err(SubmitError::Invalid(errors));
        }
        // validate_all guarantees both selects are present
        let request = InviteRequest {
            name: self.fields.name.clone(),
            email: self.fields.email.clone(),
            techdom_experience: self.fields.experience.ok_or(SubmitError::NotReady)?,
            spending_willingness: self.fields.spending.ok_or(SubmitError::NotReady)?,
            beta_reason: self.fields.beta_reason.clone(),
        };
        sink.submit(&request).map_err(SubmitError::Sink)?;
        log::info!("invite request submitted for {}", request.email);
        self.stage = InviteStage::Submitted;
        Ok(())
    }
}

/// `local@domain` with a dotted domain, no whitespace
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
