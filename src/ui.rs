//! UI Library Settings
//!
//! Configuration handed to the component library at bootstrap. The only
//! setting is the locale, which decides how dates and times are shown.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Supported UI locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    /// BCP 47 language tag
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::ZhCn => "zh-CN",
            Locale::EnUs => "en-US",
        }
    }

    pub fn date_format(&self) -> &'static str {
        match self {
            Locale::ZhCn => "%Y年%m月%d日",
            Locale::EnUs => "%Y-%m-%d",
        }
    }

    pub fn datetime_format(&self) -> &'static str {
        match self {
            Locale::ZhCn => "%Y年%m月%d日 %H:%M",
            Locale::EnUs => "%Y-%m-%d %H:%M",
        }
    }

    /// Format an entry time for display
    pub fn format_datetime(&self, value: &NaiveDateTime) -> String {
        value.format(self.datetime_format()).to_string()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported locale: {0}")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    /// Accepts `zh-CN`, `zh_cn`, `en-US`, ... (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "zh-cn" | "zh" => Ok(Locale::ZhCn),
            "en-us" | "en" => Ok(Locale::EnUs),
            _ => Err(UnknownLocale(s.to_string())),
        }
    }
}

/// Settings registered with the UI component library
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiLibraryConfig {
    #[serde(default)]
    pub locale: Locale,
}

impl UiLibraryConfig {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_default_locale_is_zh_cn() {
        assert_eq!(UiLibraryConfig::default().locale, Locale::ZhCn);
        assert_eq!(Locale::default().tag(), "zh-CN");
    }

    #[test]
    fn test_parse_locale() {
        assert_eq!("zh-CN".parse::<Locale>(), Ok(Locale::ZhCn));
        assert_eq!("zh_cn".parse::<Locale>(), Ok(Locale::ZhCn));
        assert_eq!("EN-us".parse::<Locale>(), Ok(Locale::EnUs));
        assert!("fr-FR".parse::<Locale>().is_err());
    }

    #[test]
    fn test_format_datetime() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        assert_eq!(Locale::ZhCn.format_datetime(&dt), "2024年03月09日 14:05");
        assert_eq!(Locale::EnUs.format_datetime(&dt), "2024-03-09 14:05");
    }

    #[test]
    fn test_serde_uses_language_tags() {
        let json = serde_json::to_string(&UiLibraryConfig::default()).unwrap();
        assert_eq!(json, r#"{"locale":"zh-CN"}"#);
    }
}
