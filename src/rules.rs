use crate::iban::{validate_iban, IbanError, IbanValidation};
use crate::imei::validate_imei;
use crate::models::{ClaimDetails, ClaimRecord, PersonalDetails};
use crate::reference::is_damage_type;
use chrono::NaiveDate;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 50;
pub const CITY_MIN: usize = 2;
pub const CITY_MAX: usize = 50;
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Phone,
    DeviceNumber,
    InsuranceNumber,
    City,
    BirthDate,
    DamageType,
    Iban,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::DeviceNumber => "device_number",
            Field::InsuranceNumber => "insurance_number",
            Field::City => "city",
            Field::BirthDate => "birth_date",
            Field::DamageType => "damage_type",
            Field::Iban => "iban",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleViolation {
    Required,
    TooShort { min: usize },
    TooLong { max: usize },
    InvalidFormat,
    ChecksumFailed,
    InvalidDate,
    UnknownCode,
    Iban(IbanError),
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleViolation::Required => write!(f, "is required"),
            RuleViolation::TooShort { min } => write!(f, "must be at least {min} characters"),
            RuleViolation::TooLong { max } => write!(f, "must be at most {max} characters"),
            RuleViolation::InvalidFormat => write!(f, "has an invalid format"),
            RuleViolation::ChecksumFailed => write!(f, "fails the check digit"),
            RuleViolation::InvalidDate => write!(f, "is not a valid calendar date"),
            RuleViolation::UnknownCode => write!(f, "is not a known code"),
            RuleViolation::Iban(err) => write!(f, "{err}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub violation: RuleViolation,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.violation)
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i-u)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$")
            .expect("email pattern compiles")
    })
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\+?[0-9]{10,15}$").expect("phone pattern compiles"))
}

fn insurance_number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]{8,12}$").expect("insurance number pattern compiles")
    })
}

fn device_number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{15}$").expect("device number pattern compiles"))
}

fn check_char_length(value: &str, min: usize, max: usize) -> Result<(), RuleViolation> {
    let len = value.chars().count();
    if len < min {
        return Err(RuleViolation::TooShort { min });
    }
    if len > max {
        return Err(RuleViolation::TooLong { max });
    }
    Ok(())
}

pub fn check_name(value: &str) -> Result<(), RuleViolation> {
    check_char_length(value, NAME_MIN, NAME_MAX)
}

pub fn check_email(value: &str) -> Result<(), RuleViolation> {
    if value.is_empty() {
        return Err(RuleViolation::Required);
    }
    // The regex crate has no lookahead, so the leading-dot and double-dot
    // exclusions are checked separately.
    if value.starts_with('.') || value.contains("..") || !email_pattern().is_match(value) {
        return Err(RuleViolation::InvalidFormat);
    }
    Ok(())
}

pub fn check_phone(value: &str) -> Result<(), RuleViolation> {
    if value.is_empty() {
        return Err(RuleViolation::Required);
    }
    if !phone_pattern().is_match(value) {
        return Err(RuleViolation::InvalidFormat);
    }
    Ok(())
}

pub fn check_insurance_number(value: &str) -> Result<(), RuleViolation> {
    if value.is_empty() {
        return Err(RuleViolation::Required);
    }
    if !insurance_number_pattern().is_match(value) {
        return Err(RuleViolation::InvalidFormat);
    }
    Ok(())
}

pub fn check_device_number(value: &str) -> Result<(), RuleViolation> {
    if value.is_empty() {
        return Err(RuleViolation::Required);
    }
    if !device_number_pattern().is_match(value) {
        return Err(RuleViolation::InvalidFormat);
    }
    if !validate_imei(value) {
        return Err(RuleViolation::ChecksumFailed);
    }
    Ok(())
}

pub fn check_city(value: &str) -> Result<(), RuleViolation> {
    check_char_length(value, CITY_MIN, CITY_MAX)
}

pub fn check_birth_date(value: &str) -> Result<NaiveDate, RuleViolation> {
    if value.is_empty() {
        return Err(RuleViolation::Required);
    }
    NaiveDate::parse_from_str(value, BIRTH_DATE_FORMAT).map_err(|_| RuleViolation::InvalidDate)
}

pub fn check_damage_type(value: &str) -> Result<(), RuleViolation> {
    if value.is_empty() {
        return Err(RuleViolation::Required);
    }
    if !is_damage_type(value) {
        return Err(RuleViolation::UnknownCode);
    }
    Ok(())
}

pub fn check_iban(value: &str) -> Result<(), RuleViolation> {
    if value.is_empty() {
        return Err(RuleViolation::Required);
    }
    match validate_iban(value) {
        IbanValidation::Valid => Ok(()),
        IbanValidation::Invalid(err) => Err(RuleViolation::Iban(err)),
    }
}

fn collect<T>(errors: &mut Vec<FieldError>, field: Field, result: Result<T, RuleViolation>) {
    if let Err(violation) = result {
        errors.push(FieldError { field, violation });
    }
}

pub fn validate_personal(personal: &PersonalDetails) -> Vec<FieldError> {
    let mut errors = Vec::new();
    collect(&mut errors, Field::Name, check_name(&personal.name));
    collect(&mut errors, Field::Email, check_email(&personal.email));
    collect(&mut errors, Field::Phone, check_phone(&personal.phone));
    errors
}

pub fn validate_claim_details(details: &ClaimDetails) -> Vec<FieldError> {
    let mut errors = Vec::new();
    collect(
        &mut errors,
        Field::DeviceNumber,
        check_device_number(&details.device_number),
    );
    collect(
        &mut errors,
        Field::InsuranceNumber,
        check_insurance_number(&details.insurance_number),
    );
    collect(&mut errors, Field::City, check_city(&details.city));
    collect(
        &mut errors,
        Field::BirthDate,
        check_birth_date(&details.birth_date),
    );
    collect(
        &mut errors,
        Field::DamageType,
        check_damage_type(&details.damage_type),
    );
    collect(&mut errors, Field::Iban, check_iban(&details.iban));
    errors
}

pub fn validate_claim(record: &ClaimRecord) -> Vec<FieldError> {
    let mut errors = validate_personal(&record.personal());
    errors.extend(validate_claim_details(&record.details()));
    errors
}
