use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDetails {
    pub device_number: String,
    pub insurance_number: String,
    pub city: String,
    // YYYY-MM-DD
    pub birth_date: String,
    pub damage_type: String,
    pub iban: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    #[serde(default)]
    pub claim_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub device_number: String,
    pub insurance_number: String,
    pub city: String,
    pub birth_date: String,
    pub damage_type: String,
    pub iban: String,
}

impl ClaimRecord {
    pub fn assemble(claim_id: String, personal: &PersonalDetails, details: &ClaimDetails) -> Self {
        Self {
            claim_id,
            name: personal.name.clone(),
            email: personal.email.clone(),
            phone: personal.phone.clone(),
            device_number: details.device_number.clone(),
            insurance_number: details.insurance_number.clone(),
            city: details.city.clone(),
            birth_date: details.birth_date.clone(),
            damage_type: details.damage_type.clone(),
            iban: details.iban.clone(),
        }
    }

    pub fn personal(&self) -> PersonalDetails {
        PersonalDetails {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }

    pub fn details(&self) -> ClaimDetails {
        ClaimDetails {
            device_number: self.device_number.clone(),
            insurance_number: self.insurance_number.clone(),
            city: self.city.clone(),
            birth_date: self.birth_date.clone(),
            damage_type: self.damage_type.clone(),
            iban: self.iban.clone(),
        }
    }
}

pub fn read_claims_csv(path: &Path) -> Result<Vec<ClaimRecord>, String> {
    let mut reader = csv::Reader::from_path(path).map_err(|err| err.to_string())?;
    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: ClaimRecord = result.map_err(|err| err.to_string())?;
        records.push(record);
    }
    Ok(records)
}

pub fn write_claims_csv(path: &Path, records: &[ClaimRecord]) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|err| err.to_string())?;
        }
    }
    let mut writer = csv::Writer::from_path(path).map_err(|err| err.to_string())?;
    for record in records {
        writer.serialize(record).map_err(|err| err.to_string())?;
    }
    writer.flush().map_err(|err| err.to_string())
}
