use proptest::prelude::*;
use sghm_forms::masks::{mask_cpf, mask_phone, unmask, validate_cpf, validate_phone};

#[test]
fn documented_examples_hold() {
    assert_eq!(mask_cpf("12345678901"), "123.456.789-01");
    assert_eq!(mask_cpf("123"), "123");
    assert_eq!(mask_phone("11987654321"), "(11) 98765-4321");
    assert_eq!(mask_phone("1133334444"), "(11) 3333-4444");

    assert!(validate_cpf("52998224725"));
    assert!(validate_cpf("111.444.777-35"));
    assert!(!validate_cpf("123.456.789-00"));
    assert!(!validate_cpf("11111111111"));

    assert!(validate_phone("11987654321"));
    assert!(!validate_phone("123"));
}

#[test]
fn every_repeated_digit_cpf_is_rejected() {
    for d in '0'..='9' {
        let cpf: String = std::iter::repeat(d).take(11).collect();
        assert!(!validate_cpf(&cpf), "{} should be rejected", cpf);
    }
}

#[test]
fn masking_an_already_masked_value_is_stable() {
    let masked = mask_cpf("52998224725");
    assert_eq!(mask_cpf(&masked), masked);

    let phone = mask_phone("61998765432");
    assert_eq!(mask_phone(&phone), phone);
}

proptest! {
    #[test]
    fn unmask_inverts_cpf_mask(digits in "[0-9]{0,11}") {
        prop_assert_eq!(unmask(&mask_cpf(&digits)), digits);
    }

    #[test]
    fn cpf_mask_keeps_min_11_digits(input in ".{0,40}") {
        let masked = mask_cpf(&input);
        let expected = unmask(&input).len().min(11);
        prop_assert!(masked.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-'));
        prop_assert_eq!(unmask(&masked).len(), expected);
        prop_assert!(masked.len() <= 14);
    }

    #[test]
    fn phone_mask_uses_mobile_block_only_for_11_digits(digits in "[0-9]{3,15}") {
        let masked = mask_phone(&digits);
        let kept = digits.len().min(11);
        let first_block = masked
            .split(") ")
            .nth(1)
            .map(|local| local.split('-').next().unwrap_or("").len())
            .unwrap_or(0);

        if kept == 11 {
            prop_assert_eq!(first_block, 5);
        } else {
            prop_assert_eq!(first_block, (kept - 2).min(4));
        }
        prop_assert_eq!(unmask(&masked), digits[..kept].to_string());
    }

    #[test]
    fn validate_cpf_requires_exactly_11_digits(digits in "[0-9]{0,20}") {
        prop_assume!(digits.len() != 11);
        prop_assert!(!validate_cpf(&digits));
    }

    #[test]
    fn generated_check_digits_validate(base in proptest::array::uniform9(0u8..10)) {
        let (first, second) = sghm_forms::masks::cpf_check_digits(&base);
        let mut cpf: String = base.iter().map(|d| char::from(b'0' + d)).collect();
        cpf.push(char::from(b'0' + first));
        cpf.push(char::from(b'0' + second));

        let repeated = cpf.chars().all(|c| c == cpf.chars().next().unwrap());
        prop_assert_eq!(validate_cpf(&cpf), !repeated);
        prop_assert_eq!(validate_cpf(&mask_cpf(&cpf)), !repeated);
    }
}
