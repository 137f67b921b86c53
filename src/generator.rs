use crate::iban::iban_check_digits;
use crate::imei::imei_check_digit;
use crate::models::ClaimRecord;
use crate::reference::{DAMAGE_TYPES, IBAN_LENGTHS};
use crate::util::{random_digits, random_upper_letters, slugify};

use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct GeneratorConfig {
    pub records: usize,
    pub oldest_birth_year: i32,
    pub youngest_birth_year: i32,
}

const FIRST_NAMES: &[&str] = &[
    "Anna", "Péter", "Éva", "László", "Katalin", "Gábor", "Zsófia", "Tamás", "Eszter", "Bence",
    "Lukas", "Sophie", "Maria", "Jan", "Elena", "Andrei", "Marek", "Lea",
];

const LAST_NAMES: &[&str] = &[
    "Kovács", "Nagy", "Tóth", "Szabó", "Horváth", "Varga", "Kiss", "Molnár", "Németh", "Farkas",
    "Müller", "Schmidt", "Novak", "Popescu", "Peeters", "Gruber", "Horvat",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.hu", "mail.example.org", "post.example.de"];

const CITIES: &[&str] = &[
    "Budapest", "Debrecen", "Szeged", "Győr", "Pécs", "Miskolc", "Wien", "Bratislava",
    "Bucuresti", "Skopje", "Bruxelles", "Berlin",
];

const PHONE_PREFIXES: &[&str] = &["+3620", "+3630", "+3670", "0630", "0620"];

pub fn generate_records(config: &GeneratorConfig, seed: u64) -> Result<Vec<ClaimRecord>, String> {
    validate_config(config)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let birth_start = NaiveDate::from_ymd_opt(config.oldest_birth_year, 1, 1)
        .ok_or_else(|| "oldest_birth_year is out of range".to_string())?;
    let birth_end = NaiveDate::from_ymd_opt(config.youngest_birth_year, 12, 31)
        .ok_or_else(|| "youngest_birth_year is out of range".to_string())?;
    let birth_span = (birth_end - birth_start).num_days();

    let mut records = Vec::with_capacity(config.records);
    for _ in 0..config.records {
        let claim_id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid().to_string();
        let first = FIRST_NAMES.choose(&mut rng).unwrap_or(&"Anna");
        let last = LAST_NAMES.choose(&mut rng).unwrap_or(&"Kovács");
        let name = format!("{} {}", last, first);
        let domain = EMAIL_DOMAINS.choose(&mut rng).unwrap_or(&"example.com");
        let email = format!(
            "{}{}@{}",
            slugify(&format!("{first} {last}")),
            rng.gen_range(1..100),
            domain
        );

        let prefix = PHONE_PREFIXES.choose(&mut rng).unwrap_or(&"+3630");
        let phone = format!("{}{}", prefix, random_digits(&mut rng, 7));

        let birth_date = birth_start + Duration::days(rng.gen_range(0..=birth_span));
        let damage_type = DAMAGE_TYPES.choose(&mut rng).unwrap_or(&"OTHER");

        let insurance_len = rng.gen_range(8..=12);
        records.push(ClaimRecord {
            claim_id,
            name,
            email,
            phone,
            device_number: random_imei(&mut rng)?,
            insurance_number: random_digits(&mut rng, insurance_len),
            city: CITIES.choose(&mut rng).unwrap_or(&"Budapest").to_string(),
            birth_date: birth_date.format("%Y-%m-%d").to_string(),
            damage_type: damage_type.to_string(),
            iban: random_iban(&mut rng)?,
        });
    }

    log::debug!("generated {} claim records (seed {})", records.len(), seed);
    Ok(records)
}

fn validate_config(config: &GeneratorConfig) -> Result<(), String> {
    if config.records == 0 {
        return Err("records must be greater than 0".to_string());
    }
    if config.oldest_birth_year > config.youngest_birth_year {
        return Err("oldest_birth_year cannot be after youngest_birth_year".to_string());
    }
    Ok(())
}

pub fn random_imei<R: Rng + ?Sized>(rng: &mut R) -> Result<String, String> {
    let body = random_digits(rng, 14);
    let check = imei_check_digit(&body).ok_or_else(|| "invalid IMEI body".to_string())?;
    Ok(format!("{}{}", body, check))
}

pub fn random_iban<R: Rng + ?Sized>(rng: &mut R) -> Result<String, String> {
    let (country, length) = IBAN_LENGTHS
        .choose(rng)
        .copied()
        .ok_or_else(|| "no IBAN countries configured".to_string())?;
    let bban_len = length - 4;
    // Romanian BBANs start with a four letter bank code.
    let bban = if country == "RO" {
        format!("{}{}", random_upper_letters(rng, 4), random_digits(rng, bban_len - 4))
    } else {
        random_digits(rng, bban_len)
    };
    let check = iban_check_digits(country, &bban)?;
    Ok(format!("{}{}{}", country, check, bban))
}
