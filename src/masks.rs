// Input masks for Brazilian identifiers (CPF) and phone numbers
//
// Every function here is total: any string in, a string or bool out.
// Masking is driven by the digit count, so partially typed input
// produces a partially punctuated value instead of an error.

/// Maximum digits kept by both the CPF and the phone masks
pub const MAX_DIGITS: usize = 11;

/// Strip everything except ASCII digits, preserving order
pub fn unmask(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn limited_digits(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_DIGITS)
        .collect()
}

/// Apply the CPF mask `000.000.000-00` to whatever digits are present
pub fn mask_cpf(input: &str) -> String {
    let digits = limited_digits(input);
    let mut out = String::with_capacity(digits.len() + 3);

    for (i, c) in digits.chars().enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(c);
    }

    out
}

/// Apply the phone mask `(00) 0000-0000`, or `(00) 00000-0000` once 11 digits are present
pub fn mask_phone(input: &str) -> String {
    let digits = limited_digits(input);
    let len = digits.len();

    // Area code gets parentheses only once a local digit follows it
    if len <= 2 {
        return digits;
    }

    let first_block = if len == MAX_DIGITS { 5 } else { 4 };
    tracing::trace!(len, first_block, "masking phone");

    let (area, local) = digits.split_at(2);
    let mut out = String::with_capacity(len + 4);
    out.push('(');
    out.push_str(area);
    out.push_str(") ");

    if local.len() > first_block {
        let (head, tail) = local.split_at(first_block);
        out.push_str(head);
        out.push('-');
        out.push_str(tail);
    } else {
        out.push_str(local);
    }

    out
}

/// Check digit for a weighted sum, `(sum * 10) mod 11` with 10 and 11 folded to 0
fn check_digit(sum: u32) -> u8 {
    match (sum * 10) % 11 {
        10 | 11 => 0,
        r => r as u8,
    }
}

/// Compute both CPF check digits for a 9-digit base
pub fn cpf_check_digits(base: &[u8; 9]) -> (u8, u8) {
    let first_sum: u32 = base
        .iter()
        .zip((2..=10u32).rev())
        .map(|(&d, w)| d as u32 * w)
        .sum();
    let first = check_digit(first_sum);

    let second_sum: u32 = base
        .iter()
        .chain(std::iter::once(&first))
        .zip((2..=11u32).rev())
        .map(|(&d, w)| d as u32 * w)
        .sum();
    let second = check_digit(second_sum);

    (first, second)
}

/// Parse exactly 11 digits into an array, `None` for any other length
pub(crate) fn cpf_digits(input: &str) -> Option<[u8; 11]> {
    let digits = unmask(input);
    if digits.len() != MAX_DIGITS {
        return None;
    }

    let mut out = [0u8; 11];
    for (slot, b) in out.iter_mut().zip(digits.bytes()) {
        *slot = b - b'0';
    }
    Some(out)
}

pub(crate) fn all_same(digits: &[u8]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

/// Validate a CPF (masked or not) by length, repetition and both check digits
pub fn validate_cpf(input: &str) -> bool {
    let Some(digits) = cpf_digits(input) else {
        return false;
    };

    if all_same(&digits) {
        return false;
    }

    let mut base = [0u8; 9];
    base.copy_from_slice(&digits[..9]);
    let (first, second) = cpf_check_digits(&base);

    first == digits[9] && second == digits[10]
}

/// A phone is valid with 10 (landline) or 11 (mobile) digits
pub fn validate_phone(input: &str) -> bool {
    matches!(unmask(input).len(), 10 | 11)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_cpf_progressive() {
        assert_eq!(mask_cpf(""), "");
        assert_eq!(mask_cpf("1"), "1");
        assert_eq!(mask_cpf("123"), "123");
        assert_eq!(mask_cpf("1234"), "123.4");
        assert_eq!(mask_cpf("12345"), "123.45");
        assert_eq!(mask_cpf("123456"), "123.456");
        assert_eq!(mask_cpf("1234567"), "123.456.7");
        assert_eq!(mask_cpf("123456789"), "123.456.789");
        assert_eq!(mask_cpf("1234567890"), "123.456.789-0");
        assert_eq!(mask_cpf("12345678901"), "123.456.789-01");
    }

    #[test]
    fn test_mask_cpf_truncates_and_strips() {
        assert_eq!(mask_cpf("123456789012345"), "123.456.789-01");
        assert_eq!(mask_cpf("abc 123.456.789-01 xyz"), "123.456.789-01");
        assert_eq!(mask_cpf("no digits"), "");
    }

    #[test]
    fn test_mask_phone_landline_progressive() {
        assert_eq!(mask_phone("1"), "1");
        assert_eq!(mask_phone("11"), "11");
        assert_eq!(mask_phone("113"), "(11) 3");
        assert_eq!(mask_phone("113333"), "(11) 3333");
        assert_eq!(mask_phone("1133334"), "(11) 3333-4");
        assert_eq!(mask_phone("1133334444"), "(11) 3333-4444");
    }

    #[test]
    fn test_mask_phone_mobile() {
        assert_eq!(mask_phone("11987654321"), "(11) 98765-4321");
        assert_eq!(mask_phone("(11) 9876-54321"), "(11) 98765-4321");
        assert_eq!(mask_phone("119876543210000"), "(11) 98765-4321");
    }

    #[test]
    fn test_unmask_ignores_non_ascii_digits() {
        assert_eq!(unmask("(11) 98765-4321"), "11987654321");
        assert_eq!(unmask("١٢٣"), "");
        assert_eq!(unmask(""), "");
    }

    #[test]
    fn test_cpf_check_digits() {
        assert_eq!(cpf_check_digits(&[5, 2, 9, 9, 8, 2, 2, 4, 7]), (2, 5));
        assert_eq!(cpf_check_digits(&[1, 1, 1, 4, 4, 4, 7, 7, 7]), (3, 5));
    }

    #[test]
    fn test_validate_cpf() {
        assert!(validate_cpf("52998224725"));
        assert!(validate_cpf("111.444.777-35"));
        assert!(!validate_cpf("123.456.789-00"));
        assert!(!validate_cpf("11111111111"));
        assert!(!validate_cpf("000.000.000-00"));
        assert!(!validate_cpf("5299822472"));
        assert!(!validate_cpf("529982247250"));
        assert!(!validate_cpf(""));
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("11987654321"));
        assert!(validate_phone("(11) 3333-4444"));
        assert!(!validate_phone("123"));
        assert!(!validate_phone("119876543210"));
    }
}
