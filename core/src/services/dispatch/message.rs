//! SMS bodies

use er_shared::Language;

/// Body of the verification SMS
pub fn verification_message(language: Language, code: &str, expiry_minutes: u32) -> String {
    match language {
        Language::Portuguese => format!(
            "EscrowReno: O seu código de verificação é {}. Válido por {} minutos. Não partilhe este código.",
            code, expiry_minutes
        ),
        Language::English => format!(
            "EscrowReno: Your verification code is {}. Valid for {} minutes. Do not share this code.",
            code, expiry_minutes
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portuguese_message() {
        assert_eq!(
            verification_message(Language::Portuguese, "482913", 5),
            "EscrowReno: O seu código de verificação é 482913. Válido por 5 minutos. Não partilhe este código."
        );
    }

    #[test]
    fn test_english_message_follows_expiry() {
        assert_eq!(
            verification_message(Language::English, "482913", 10),
            "EscrowReno: Your verification code is 482913. Valid for 10 minutes. Do not share this code."
        );
    }
}
