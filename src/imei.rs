pub const IMEI_LENGTH: usize = 15;

pub fn validate_imei(raw: &str) -> bool {
    if raw.len() != IMEI_LENGTH || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    luhn_sum(raw.bytes().map(|b| u32::from(b - b'0'))) % 10 == 0
}

pub fn imei_check_digit(body: &str) -> Option<u8> {
    if body.len() != IMEI_LENGTH - 1 || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // The check digit sits at an even position, so it is added unchanged.
    let sum = luhn_sum(body.bytes().map(|b| u32::from(b - b'0')));
    Some(((10 - sum % 10) % 10) as u8)
}

// Digits at odd zero-based positions are doubled, folding 10..18 back to 1..9.
fn luhn_sum(digits: impl Iterator<Item = u32>) -> u32 {
    digits
        .enumerate()
        .map(|(idx, digit)| {
            if idx % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum()
}
