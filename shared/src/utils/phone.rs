//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

// International dialing prefix: "+" followed by one to four digits
static DIAL_PREFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+\d{1,4}").expect("dial prefix pattern is valid")
});

/// National-number length rule for one country
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryDialRule {
    /// ISO 3166-1 alpha-2 code
    pub iso: &'static str,
    /// Dial code including the leading "+"
    pub dial_code: &'static str,
    pub min_length: usize,
    pub max_length: usize,
}

impl CountryDialRule {
    const fn new(iso: &'static str, dial_code: &'static str, min_length: usize, max_length: usize) -> Self {
        Self {
            iso,
            dial_code,
            min_length,
            max_length,
        }
    }

    /// Whether a national number's digit count fits this country
    pub fn accepts(&self, national_number: &str) -> bool {
        let digits = national_number.chars().filter(|c| c.is_ascii_digit()).count();
        digits >= self.min_length && digits <= self.max_length
    }
}

/// Countries offered at signup
pub static COUNTRY_RULES: &[CountryDialRule] = &[
    // Europe
    CountryDialRule::new("PT", "+351", 9, 9),
    CountryDialRule::new("ES", "+34", 9, 9),
    CountryDialRule::new("FR", "+33", 10, 10),
    CountryDialRule::new("DE", "+49", 10, 12),
    CountryDialRule::new("IT", "+39", 10, 11),
    CountryDialRule::new("GB", "+44", 10, 11),
    CountryDialRule::new("NL", "+31", 9, 9),
    CountryDialRule::new("BE", "+32", 9, 9),
    CountryDialRule::new("CH", "+41", 9, 9),
    CountryDialRule::new("AT", "+43", 10, 13),
    CountryDialRule::new("SE", "+46", 9, 9),
    CountryDialRule::new("NO", "+47", 8, 8),
    CountryDialRule::new("DK", "+45", 8, 8),
    CountryDialRule::new("FI", "+358", 9, 10),
    CountryDialRule::new("IE", "+353", 9, 9),
    CountryDialRule::new("PL", "+48", 9, 9),
    CountryDialRule::new("CZ", "+420", 9, 9),
    CountryDialRule::new("HU", "+36", 9, 9),
    CountryDialRule::new("GR", "+30", 10, 10),
    // Americas
    CountryDialRule::new("US", "+1", 10, 10),
    CountryDialRule::new("CA", "+1", 10, 10),
    CountryDialRule::new("MX", "+52", 10, 10),
    CountryDialRule::new("BR", "+55", 10, 11),
    CountryDialRule::new("AR", "+54", 10, 10),
    CountryDialRule::new("CL", "+56", 9, 9),
    CountryDialRule::new("CO", "+57", 10, 10),
    CountryDialRule::new("PE", "+51", 9, 9),
    // Asia
    CountryDialRule::new("CN", "+86", 11, 11),
    CountryDialRule::new("JP", "+81", 10, 11),
    CountryDialRule::new("KR", "+82", 10, 11),
    CountryDialRule::new("IN", "+91", 10, 10),
    CountryDialRule::new("SG", "+65", 8, 8),
    CountryDialRule::new("MY", "+60", 9, 10),
    CountryDialRule::new("TH", "+66", 9, 9),
    CountryDialRule::new("VN", "+84", 9, 10),
    CountryDialRule::new("PH", "+63", 10, 10),
    CountryDialRule::new("ID", "+62", 10, 12),
    // Middle East
    CountryDialRule::new("AE", "+971", 9, 9),
    CountryDialRule::new("SA", "+966", 9, 9),
    CountryDialRule::new("IL", "+972", 9, 9),
    CountryDialRule::new("TR", "+90", 10, 10),
    // Africa
    CountryDialRule::new("ZA", "+27", 9, 9),
    CountryDialRule::new("NG", "+234", 10, 10),
    CountryDialRule::new("KE", "+254", 9, 9),
    CountryDialRule::new("EG", "+20", 10, 10),
    CountryDialRule::new("MA", "+212", 9, 9),
    // Oceania
    CountryDialRule::new("AU", "+61", 9, 9),
    CountryDialRule::new("NZ", "+64", 8, 9),
];

/// Why a phone number was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneValidationError {
    /// No leading "+" dial prefix
    InvalidFormat,
    /// National number length outside the resolved country's range
    InvalidForCountry(&'static str),
}

impl PhoneValidationError {
    /// Client-facing message
    pub fn message(&self) -> &'static str {
        match self {
            PhoneValidationError::InvalidFormat => "Invalid phone number format",
            PhoneValidationError::InvalidForCountry(_) => "Invalid phone number for selected country",
        }
    }
}

impl fmt::Display for PhoneValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for PhoneValidationError {}

/// Resolve the country of an international number by its longest matching dial code.
///
/// Returns the rule and the remainder of the number after the dial code.
pub fn split_country_code(phone: &str) -> Option<(&'static CountryDialRule, &str)> {
    COUNTRY_RULES
        .iter()
        .filter(|rule| phone.starts_with(rule.dial_code))
        .max_by_key(|rule| rule.dial_code.len())
        .map(|rule| (rule, &phone[rule.dial_code.len()..]))
}

/// Check a number submitted for verification.
///
/// The number must start with "+" and a dial prefix. When the prefix belongs to a
/// known country the national part must have that country's length; numbers of
/// unknown countries pass on the prefix check alone.
pub fn validate_phone_number(phone: &str) -> Result<Option<&'static CountryDialRule>, PhoneValidationError> {
    if !DIAL_PREFIX_REGEX.is_match(phone) {
        return Err(PhoneValidationError::InvalidFormat);
    }

    match split_country_code(phone) {
        Some((rule, national)) if rule.accepts(national) => Ok(Some(rule)),
        Some((rule, _)) => Err(PhoneValidationError::InvalidForCountry(rule.iso)),
        None => Ok(None),
    }
}

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Destination form handed to SMS providers: formatting stripped, leading "+" ensured
pub fn format_for_delivery(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.starts_with('+') {
        normalized
    } else {
        format!("+{}", normalized)
    }
}

/// Mask a phone number for logs (e.g., +35****5678)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
