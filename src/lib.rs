pub mod corrupt;
pub mod draft;
pub mod generator;
pub mod iban;
pub mod imei;
pub mod logging;
pub mod models;
pub mod preflight;
pub mod reference;
pub mod rules;
pub mod util;

pub use draft::{ClaimDraft, Step, SubmitError};
pub use iban::{validate_iban, IbanError, IbanValidation};
pub use imei::validate_imei;
pub use models::{ClaimDetails, ClaimRecord, PersonalDetails};
pub use rules::{Field, FieldError, RuleViolation};
