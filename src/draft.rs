use crate::models::{ClaimDetails, ClaimRecord, PersonalDetails};
use crate::rules::{validate_claim, validate_claim_details, validate_personal, FieldError};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Personal,
    Details,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Personal => f.write_str("personal details"),
            Step::Details => f.write_str("claim details"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    MissingStep(Step),
    Invalid(Vec<FieldError>),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::MissingStep(step) => write!(f, "{step} step has not been filled in"),
            SubmitError::Invalid(errors) => {
                let messages: Vec<String> = errors.iter().map(|err| err.to_string()).collect();
                write!(f, "claim is invalid: {}", messages.join("; "))
            }
        }
    }
}

impl std::error::Error for SubmitError {}

#[derive(Debug, Clone, Default)]
pub struct ClaimDraft {
    personal: Option<PersonalDetails>,
    details: Option<ClaimDetails>,
}

impl ClaimDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn personal(&self) -> Option<&PersonalDetails> {
        self.personal.as_ref()
    }

    pub fn details(&self) -> Option<&ClaimDetails> {
        self.details.as_ref()
    }

    pub fn save_personal(&mut self, personal: PersonalDetails) {
        self.personal = Some(personal);
    }

    pub fn save_details(&mut self, details: ClaimDetails) {
        self.details = Some(details);
    }

    pub fn submit_personal(&mut self, personal: PersonalDetails) -> Result<(), SubmitError> {
        let errors = validate_personal(&personal);
        if !errors.is_empty() {
            return Err(SubmitError::Invalid(errors));
        }
        self.personal = Some(personal);
        Ok(())
    }

    pub fn submit_details(&mut self, details: ClaimDetails) -> Result<(), SubmitError> {
        let errors = validate_claim_details(&details);
        if !errors.is_empty() {
            return Err(SubmitError::Invalid(errors));
        }
        self.details = Some(details);
        Ok(())
    }

    pub fn finalize(&mut self, claim_id: String) -> Result<ClaimRecord, SubmitError> {
        let personal = self
            .personal
            .as_ref()
            .ok_or(SubmitError::MissingStep(Step::Personal))?;
        let details = self
            .details
            .as_ref()
            .ok_or(SubmitError::MissingStep(Step::Details))?;

        let record = ClaimRecord::assemble(claim_id, personal, details);
        let errors = validate_claim(&record);
        if !errors.is_empty() {
            return Err(SubmitError::Invalid(errors));
        }

        self.reset();
        Ok(record)
    }

    pub fn reset(&mut self) {
        self.personal = None;
        self.details = None;
    }
}
