//! Language of outbound messages

use serde::{Deserialize, Serialize};

/// Language used to render the verification SMS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "pt")]
    Portuguese,
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// Get language code (ISO 639-1)
    pub fn code(&self) -> &'static str {
        match self {
            Language::Portuguese => "pt",
            Language::English => "en",
        }
    }

    /// Parse a request-supplied code, falling back to the default for unknown values
    pub fn from_code_or_default(code: Option<&str>) -> Self {
        code.and_then(|c| c.parse().ok()).unwrap_or_default()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pt" | "pt-pt" | "pt-br" | "portuguese" => Ok(Language::Portuguese),
            "en" | "en-us" | "en-gb" | "english" => Ok(Language::English),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_str() {
        assert_eq!("pt".parse::<Language>().unwrap(), Language::Portuguese);
        assert_eq!("EN".parse::<Language>().unwrap(), Language::English);
        assert_eq!("pt-BR".parse::<Language>().unwrap(), Language::Portuguese);
        assert!("zh".parse::<Language>().is_err());
    }

    #[test]
    fn test_defaults_to_portuguese() {
        assert_eq!(Language::default(), Language::Portuguese);
        assert_eq!(Language::from_code_or_default(None), Language::Portuguese);
        assert_eq!(Language::from_code_or_default(Some("fr")), Language::Portuguese);
        assert_eq!(Language::from_code_or_default(Some("en")), Language::English);
    }

    #[test]
    fn test_serde_codes() {
        assert_eq!(serde_json::to_string(&Language::English).unwrap(), "\"en\"");
        let lang: Language = serde_json::from_str("\"pt\"").unwrap();
        assert_eq!(lang, Language::Portuguese);
    }
}
