use crate::reference::iban_length;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IbanError {
    Empty,
    InvalidCharacters,
    InvalidLength,
    BadChecksum,
}

impl IbanError {
    pub fn code(&self) -> &'static str {
        match self {
            IbanError::Empty => "EMPTY",
            IbanError::InvalidCharacters => "INVALID_CHARACTERS",
            IbanError::InvalidLength => "INVALID_LENGTH",
            IbanError::BadChecksum => "BAD_CHECKSUM",
        }
    }
}

impl fmt::Display for IbanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            IbanError::Empty => "IBAN is required",
            IbanError::InvalidCharacters => "IBAN may only contain letters and digits",
            IbanError::InvalidLength => "IBAN length does not match country specification",
            IbanError::BadChecksum => "IBAN checksum is invalid",
        };
        write!(f, "{msg}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IbanValidation {
    Valid,
    Invalid(IbanError),
}

impl IbanValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, IbanValidation::Valid)
    }

    pub fn error(&self) -> Option<IbanError> {
        match self {
            IbanValidation::Valid => None,
            IbanValidation::Invalid(err) => Some(*err),
        }
    }
}

pub fn validate_iban(raw: &str) -> IbanValidation {
    let iban = normalize_iban(raw);

    if iban.is_empty() {
        return IbanValidation::Invalid(IbanError::Empty);
    }
    if !has_valid_characters(&iban) {
        return IbanValidation::Invalid(IbanError::InvalidCharacters);
    }
    if !has_valid_length(&iban) {
        return IbanValidation::Invalid(IbanError::InvalidLength);
    }
    if !has_valid_checksum(&iban) {
        return IbanValidation::Invalid(IbanError::BadChecksum);
    }
    IbanValidation::Valid
}

pub fn normalize_iban(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !is_form_whitespace(*ch))
        .collect::<String>()
        .to_uppercase()
}

// Same set as a JavaScript `\s`: Unicode White_Space without U+0085, plus
// U+FEFF so a pasted byte order mark is dropped.
fn is_form_whitespace(ch: char) -> bool {
    (ch.is_whitespace() && ch != '\u{85}') || ch == '\u{FEFF}'
}

pub fn has_valid_characters(iban: &str) -> bool {
    !iban.is_empty()
        && iban
            .chars()
            .all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit())
}

pub fn has_valid_length(iban: &str) -> bool {
    let Some(country) = iban.get(0..2) else {
        return false;
    };
    match iban_length(country) {
        Some(expected) => iban.len() == expected,
        None => false,
    }
}

pub fn has_valid_checksum(iban: &str) -> bool {
    if iban.len() < 4 || !iban.is_char_boundary(4) {
        return false;
    }
    let rearranged = format!("{}{}", &iban[4..], &iban[0..4]);
    mod97(&rearranged) == Some(1)
}

pub fn iban_check_digits(country: &str, bban: &str) -> Result<String, String> {
    if country.len() != 2 || !country.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return Err("IBAN country code must be 2 letters".to_string());
    }
    let combined = format!("{}{}00", bban, country.to_ascii_uppercase());
    let remainder =
        mod97(&combined).ok_or_else(|| "IBAN contains invalid character".to_string())?;
    Ok(format!("{:02}", 98 - remainder))
}

pub fn format_iban(raw: &str) -> String {
    let iban = normalize_iban(raw);
    let chars: Vec<char> = iban.chars().collect();
    chars
        .chunks(4)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

// Letters expand to two digits (A=10 .. Z=35), so the remainder is folded in
// one decimal digit at a time.
fn mod97(value: &str) -> Option<u32> {
    let mut remainder: u32 = 0;
    for ch in value.chars() {
        if let Some(digit) = ch.to_digit(10) {
            remainder = (remainder * 10 + digit) % 97;
        } else if ch.is_ascii_alphabetic() {
            let val = ch.to_ascii_uppercase() as u32 - 'A' as u32 + 10;
            remainder = (remainder * 10 + val / 10) % 97;
            remainder = (remainder * 10 + val % 10) % 97;
        } else {
            return None;
        }
    }
    Some(remainder)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_HU: &str = "HU42117730161111101800000000";

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(validate_iban(""), IbanValidation::Invalid(IbanError::Empty));
        assert_eq!(
            validate_iban(" \t\n "),
            IbanValidation::Invalid(IbanError::Empty)
        );
    }

    #[test]
    fn punctuation_is_invalid_characters() {
        assert_eq!(
            validate_iban("HU@@000000000000000000000000"),
            IbanValidation::Invalid(IbanError::InvalidCharacters)
        );
        assert_eq!(
            validate_iban("HU42-1177-3016"),
            IbanValidation::Invalid(IbanError::InvalidCharacters)
        );
    }

    #[test]
    fn character_gate_runs_before_length_gate() {
        // Too short for HU and contains a non-Latin letter.
        assert_eq!(
            validate_iban("HU1É"),
            IbanValidation::Invalid(IbanError::InvalidCharacters)
        );
    }

    #[test]
    fn short_hungarian_iban_is_invalid_length() {
        assert_eq!(
            validate_iban("HU1234"),
            IbanValidation::Invalid(IbanError::InvalidLength)
        );
    }

    #[test]
    fn unknown_country_is_invalid_length() {
        assert_eq!(
            validate_iban("GB82WEST12345698765432"),
            IbanValidation::Invalid(IbanError::InvalidLength)
        );
    }

    #[test]
    fn known_good_ibans_pass() {
        for iban in [
            VALID_HU,
            "DE89370400440532013000",
            "AT611904300234573201",
            "BE68539007547034",
            "SK3112000000198742637541",
            "RO49AAAA1B31007593840000",
            "MK07250120000058984",
        ] {
            assert_eq!(validate_iban(iban), IbanValidation::Valid, "{iban}");
        }
    }

    #[test]
    fn single_digit_change_breaks_checksum() {
        let bytes = VALID_HU.as_bytes();
        for pos in 2..bytes.len() {
            let mut altered = bytes.to_vec();
            altered[pos] = b'0' + ((altered[pos] - b'0' + 1) % 10);
            let altered = String::from_utf8(altered).unwrap();
            assert_eq!(
                validate_iban(&altered),
                IbanValidation::Invalid(IbanError::BadChecksum),
                "{altered}"
            );
        }
    }

    #[test]
    fn case_and_whitespace_are_ignored() {
        assert!(validate_iban("hu42 1177 3016 1111 1018 0000 0000").is_valid());
        assert!(validate_iban("  Hu42117730161111101800000000\t").is_valid());
        assert!(validate_iban("\u{FEFF}HU42117730161111101800000000").is_valid());
        assert!(validate_iban("HU42\u{A0}1177\u{2009}3016\u{3000}1111101800000000").is_valid());
        assert_eq!(
            validate_iban("HU42\u{85}117730161111101800000000"),
            IbanValidation::Invalid(IbanError::InvalidCharacters)
        );
        assert_eq!(
            validate_iban("de89 3704 0044 0532 0130 01"),
            validate_iban("DE89370400440532013001")
        );
    }

    #[test]
    fn validation_is_repeatable() {
        let input = "DE89 3704 0044 0532 0130 00";
        assert_eq!(validate_iban(input), validate_iban(input));
    }

    #[test]
    fn accessors_match_shape() {
        let ok = validate_iban(VALID_HU);
        assert!(ok.is_valid());
        assert_eq!(ok.error(), None);

        let bad = validate_iban("");
        assert!(!bad.is_valid());
        assert_eq!(bad.error().map(|err| err.code()), Some("EMPTY"));
    }

    #[test]
    fn check_digits_rebuild_known_iban() {
        assert_eq!(
            iban_check_digits("HU", "117730161111101800000000").unwrap(),
            "42"
        );
        assert_eq!(iban_check_digits("DE", "370400440532013000").unwrap(), "89");
        assert!(iban_check_digits("H", "1234").is_err());
        assert!(iban_check_digits("HU", "12-34").is_err());
    }

    #[test]
    fn format_groups_by_four() {
        assert_eq!(format_iban("be68539007547034"), "BE68 5390 0754 7034");
        assert_eq!(format_iban("MK07250120000058984"), "MK07 2501 2000 0058 984");
        assert_eq!(format_iban(""), "");
    }

    #[test]
    fn helpers_reject_short_or_foreign_input() {
        assert!(!has_valid_length("H"));
        assert!(!has_valid_checksum("HU4"));
        assert!(!has_valid_characters(""));
    }
}
