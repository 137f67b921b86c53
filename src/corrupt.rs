use crate::models::{read_claims_csv, write_claims_csv, ClaimRecord};
use crate::util::random_digits;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorruptSummary {
    pub records_targeted: usize,
    pub iban_checksum: usize,
    pub iban_country: usize,
    pub imei_check_digit: usize,
    pub email_malformed: usize,
    pub phone_short: usize,
    pub birth_date_impossible: usize,
    pub damage_type_unknown: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corruption {
    IbanChecksum,
    IbanCountry,
    ImeiCheckDigit,
    EmailMalformed,
    PhoneShort,
    BirthDateImpossible,
    DamageTypeUnknown,
}

const CORRUPTIONS: &[Corruption] = &[
    Corruption::IbanChecksum,
    Corruption::IbanCountry,
    Corruption::ImeiCheckDigit,
    Corruption::EmailMalformed,
    Corruption::PhoneShort,
    Corruption::BirthDateImpossible,
    Corruption::DamageTypeUnknown,
];

pub fn corrupt_csv(
    input: &Path,
    output: &Path,
    error_rate: f64,
    seed: u64,
) -> Result<CorruptSummary, String> {
    let mut records = read_claims_csv(input)?;
    let summary = corrupt_records(&mut records, error_rate, seed)?;
    write_claims_csv(output, &records)?;
    Ok(summary)
}

pub fn corrupt_records(
    records: &mut [ClaimRecord],
    error_rate: f64,
    seed: u64,
) -> Result<CorruptSummary, String> {
    if !(0.0..=1.0).contains(&error_rate) {
        return Err("error_rate must be 0..1".to_string());
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut summary = CorruptSummary::default();

    for record in records.iter_mut() {
        if !rng.gen_bool(error_rate) {
            continue;
        }
        summary.records_targeted += 1;
        let corruption = *CORRUPTIONS
            .choose(&mut rng)
            .unwrap_or(&Corruption::IbanChecksum);
        apply_corruption(record, corruption, &mut summary, &mut rng);
    }

    Ok(summary)
}

pub fn apply_corruption<R: Rng + ?Sized>(
    record: &mut ClaimRecord,
    corruption: Corruption,
    summary: &mut CorruptSummary,
    rng: &mut R,
) {
    match corruption {
        Corruption::IbanChecksum => {
            let flipped = flip_digit(&record.iban, 2);
            if flipped != record.iban {
                record.iban = flipped;
                summary.iban_checksum += 1;
            }
        }
        Corruption::IbanCountry => {
            record.iban = format!("ZZ00{}", random_digits(rng, 14));
            summary.iban_country += 1;
        }
        Corruption::ImeiCheckDigit => {
            let last = record.device_number.chars().count().saturating_sub(1);
            let flipped = flip_digit(&record.device_number, last);
            if flipped != record.device_number {
                record.device_number = flipped;
                summary.imei_check_digit += 1;
            }
        }
        Corruption::EmailMalformed => {
            if record.email.contains('@') {
                record.email = record.email.replacen('@', "..", 1);
                summary.email_malformed += 1;
            }
        }
        Corruption::PhoneShort => {
            record.phone = random_digits(rng, 6);
            summary.phone_short += 1;
        }
        Corruption::BirthDateImpossible => {
            let year = record.birth_date.get(0..4).unwrap_or("1990").to_string();
            record.birth_date = format!("{year}-02-30");
            summary.birth_date_impossible += 1;
        }
        Corruption::DamageTypeUnknown => {
            record.damage_type = "FIRE".to_string();
            summary.damage_type_unknown += 1;
        }
    }
}

// Replaces the digit at char position `pos` with a different digit. Any
// single digit substitution is caught by both MOD-97 and Luhn.
fn flip_digit(value: &str, pos: usize) -> String {
    value
        .chars()
        .enumerate()
        .map(|(idx, ch)| match ch.to_digit(10) {
            Some(digit) if idx == pos => char::from(b'0' + ((digit + 5) % 10) as u8),
            _ => ch,
        })
        .collect()
}
