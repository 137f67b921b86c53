//! Integration tests for the public validation API
//!
//! Exercises the two checksum validators and the wizard gates the way a
//! form front end would call them.

use claim_check::{
    validate_iban, validate_imei, ClaimDetails, ClaimDraft, Field, FieldError, IbanError,
    IbanValidation, PersonalDetails, RuleViolation, SubmitError,
};

#[test]
fn test_iban_error_codes_follow_gate_order() {
    let cases = vec![
        ("", Some("EMPTY")),
        ("HU@@000000000000000000000000", Some("INVALID_CHARACTERS")),
        ("HU1234", Some("INVALID_LENGTH")),
        ("GB82WEST12345698765432", Some("INVALID_LENGTH")),
        ("HU42117730161111101800000001", Some("BAD_CHECKSUM")),
        ("HU42117730161111101800000000", None),
    ];

    for (input, expected) in cases {
        let result = validate_iban(input);
        assert_eq!(
            result.error().map(|err| err.code()),
            expected,
            "Unexpected result for: {}",
            input
        );
        assert_eq!(result.is_valid(), expected.is_none());
    }
}

#[test]
fn test_iban_normalization_does_not_touch_input() {
    let input = String::from("ro49 aaaa 1b31 0075 9384 0000");
    let before = input.clone();

    assert_eq!(validate_iban(&input), IbanValidation::Valid);
    assert_eq!(input, before);
}

#[test]
fn test_iban_spacing_is_irrelevant() {
    let spaced = ["MK07 2501 2000 0058 984", "MK0725 0120000058984", " MK07250120000058984 "];
    for input in spaced {
        assert!(validate_iban(input).is_valid(), "Should accept: {}", input);
    }
}

#[test]
fn test_imei_examples() {
    assert!(validate_imei("490154203237518"));
    assert!(!validate_imei("490154203237519"));
    assert!(!validate_imei("12345"));
    assert!(!validate_imei("49015420323751A"));
}

#[test]
fn test_validators_are_usable_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(|| {
                (0..100).all(|_| {
                    validate_iban("BE68539007547034").is_valid()
                        && validate_imei("356938035643809")
                })
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn test_wizard_flow_end_to_end() {
    let mut draft = ClaimDraft::new();

    draft
        .submit_personal(PersonalDetails {
            name: "Horváth Gábor".to_string(),
            email: "gabor.horvath@example.hu".to_string(),
            phone: "+36701112233".to_string(),
        })
        .unwrap();

    let mut details = ClaimDetails {
        device_number: "490154203237518".to_string(),
        insurance_number: "100200300".to_string(),
        city: "Miskolc".to_string(),
        birth_date: "1968-07-21".to_string(),
        damage_type: "THEFT".to_string(),
        iban: "HU42 1177 3016 1111 1018 0000 000".to_string(),
    };

    let err = draft.submit_details(details.clone()).unwrap_err();
    assert_eq!(
        err,
        SubmitError::Invalid(vec![FieldError {
            field: Field::Iban,
            violation: RuleViolation::Iban(IbanError::InvalidLength),
        }])
    );
    assert!(draft.details().is_none());

    details.iban.push('0');
    draft.submit_details(details).unwrap();

    let record = draft.finalize("claim-42".to_string()).unwrap();
    assert_eq!(record.claim_id, "claim-42");
    assert_eq!(record.device_number, "490154203237518");
    assert!(draft.personal().is_none());
}
