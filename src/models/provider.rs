// file: src/models/provider.rs
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// The closed set of external calendar services this widget can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarProvider {
    Google,
    Microsoft,
    Apple,
}

impl CalendarProvider {
    pub const ALL: [CalendarProvider; 3] = [
        CalendarProvider::Google,
        CalendarProvider::Microsoft,
        CalendarProvider::Apple,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarProvider::Google => "google",
            CalendarProvider::Microsoft => "microsoft",
            CalendarProvider::Apple => "apple",
        }
    }

    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "google" => Ok(CalendarProvider::Google),
            "microsoft" => Ok(CalendarProvider::Microsoft),
            "apple" => Ok(CalendarProvider::Apple),
            other => Err(AppError::config(format!("Unknown provider: {other}"))),
        }
    }
}

impl std::fmt::Display for CalendarProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_as_str() {
        assert_eq!(CalendarProvider::Google.as_str(), "google");
        assert_eq!(CalendarProvider::Microsoft.as_str(), "microsoft");
        assert_eq!(CalendarProvider::Apple.as_str(), "apple");
    }

    #[test]
    fn test_provider_parse_round_trip() {
        for provider in CalendarProvider::ALL {
            assert_eq!(CalendarProvider::parse(provider.as_str()).unwrap(), provider);
        }
    }

    #[test]
    fn test_provider_parse_unknown() {
        let err = CalendarProvider::parse("caldav").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_provider_serde_lowercase() {
        let json = serde_json::to_string(&CalendarProvider::Microsoft).unwrap();
        assert_eq!(json, "\"microsoft\"");
        let back: CalendarProvider = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CalendarProvider::Microsoft);
    }
}
