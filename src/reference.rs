// Countries accepted for IBAN payouts. A code missing here is rejected, the
// same way a wrong length is.
pub const IBAN_LENGTHS: &[(&str, usize)] = &[
    ("HU", 28),
    ("DE", 22),
    ("AT", 20),
    ("SK", 24),
    ("RO", 24),
    ("MK", 19),
    ("BE", 16),
];

pub const DAMAGE_TYPES: &[&str] = &["SCREEN", "WATER", "BATTERY", "THEFT", "OTHER"];

pub fn iban_length(country: &str) -> Option<usize> {
    IBAN_LENGTHS
        .iter()
        .find(|(code, _)| *code == country)
        .map(|(_, len)| *len)
}

pub fn is_damage_type(code: &str) -> bool {
    DAMAGE_TYPES.iter().any(|known| *known == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_countries_have_lengths() {
        assert_eq!(iban_length("HU"), Some(28));
        assert_eq!(iban_length("BE"), Some(16));
        assert_eq!(iban_length("MK"), Some(19));
    }

    #[test]
    fn unknown_and_lowercase_countries_are_absent() {
        assert_eq!(iban_length("GB"), None);
        assert_eq!(iban_length("hu"), None);
        assert_eq!(iban_length(""), None);
    }

    #[test]
    fn damage_codes_are_exact() {
        assert!(is_damage_type("SCREEN"));
        assert!(!is_damage_type("screen"));
        assert!(!is_damage_type("FIRE"));
    }
}
