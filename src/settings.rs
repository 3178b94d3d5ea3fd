//! Display preferences (currency and language).
//!
//! Kept under their own keys, outside the aggregate blob, as plain strings.
//! Only presentation code reads them; prices in the store stay unitless.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::storage::Store;

pub const CURRENCY_KEY: &str = "app-currency";
pub const LANGUAGE_KEY: &str = "app-language";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "TRY")]
    Try,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Try => "TRY",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "TRY" => Some(Currency::Try),
            "USD" => Some(Currency::Usd),
            "EUR" => Some(Currency::Eur),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Tr,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Tr => "tr",
            Language::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "tr" => Some(Language::Tr),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    /// BCP 47 locale used for number and date formatting.
    pub fn locale(self) -> &'static str {
        match self {
            Language::Tr => "tr-TR",
            Language::En => "en-US",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub currency: Currency,
    pub language: Language,
}

/// Read both preferences; missing, unknown or unreadable values use defaults.
pub fn load_settings(store: &Store) -> Settings {
    let read = |key: &str| match store.medium().get(key) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(key, error = %e, "cannot read setting; using default");
            None
        }
    };

    Settings {
        currency: read(CURRENCY_KEY)
            .and_then(|c| Currency::from_code(c.trim()))
            .unwrap_or_default(),
        language: read(LANGUAGE_KEY)
            .and_then(|l| Language::from_code(l.trim()))
            .unwrap_or_default(),
    }
}

pub fn set_currency(store: &mut Store, currency: Currency) -> Result<(), AppError> {
    store.medium_mut().set(CURRENCY_KEY, currency.code())
}

pub fn set_language(store: &mut Store, language: Language) -> Result<(), AppError> {
    store.medium_mut().set(LANGUAGE_KEY, language.code())
}
