//! Language selection
//!
//! The dashboard language is read once at start-up from the process locale
//! (or given on the command line) and then passed explicitly to the weather
//! fetch and to the clock's day/month names.

use std::fmt;

use chrono::Locale;

/// Environment variables consulted for the process locale, in priority order
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Language used when the process locale is unset or unusable ("C", "POSIX")
const FALLBACK_LANGUAGE: &str = "en";

/// A lower-case two-letter language code such as `fr` or `en`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Extracts the language part of a locale or language tag.
    ///
    /// Accepts `fr`, `fr-FR`, `fr_FR.UTF-8`, `de_DE@euro` and the like.
    /// Returns `None` unless the language part is exactly two ASCII letters.
    pub fn parse(tag: &str) -> Option<Self> {
        let language = tag
            .split(['-', '_', '.', '@'].as_slice())
            .next()
            .unwrap_or_default();

        if language.len() == 2 && language.chars().all(|c| c.is_ascii_alphabetic()) {
            Some(Self(language.to_ascii_lowercase()))
        } else {
            None
        }
    }

    /// Reads the language from the process locale environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves the language from the first usable locale variable.
    ///
    /// Empty or unparseable values are skipped, matching how `LC_ALL=`
    /// defers to `LANG`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        LOCALE_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find_map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Calendar locale used for localized day and month names
    pub fn calendar_locale(&self) -> Locale {
        match self.as_str() {
            "fr" => Locale::fr_FR,
            "de" => Locale::de_DE,
            "es" => Locale::es_ES,
            "it" => Locale::it_IT,
            "pt" => Locale::pt_PT,
            "nl" => Locale::nl_NL,
            "pl" => Locale::pl_PL,
            "sv" => Locale::sv_SE,
            "ru" => Locale::ru_RU,
            "ja" => Locale::ja_JP,
            "zh" => Locale::zh_CN,
            _ => Locale::en_US,
        }
    }
}

impl Default for LanguageTag {
    fn default() -> Self {
        Self(FALLBACK_LANGUAGE.to_string())
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
