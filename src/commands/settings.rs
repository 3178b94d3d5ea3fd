//! Display preference commands.

use std::sync::RwLock;

use crate::error::AppError;
use crate::settings::{self, Currency, Language, Settings};
use crate::state::{read_store, write_store};
#[cfg(feature = "desktop")]
use crate::state::AppState;
use crate::storage::Store;

pub fn get_settings_inner(lock: &RwLock<Store>) -> Result<Settings, AppError> {
    Ok(settings::load_settings(&*read_store(lock)?))
}

pub fn set_currency_inner(currency: Currency, lock: &RwLock<Store>) -> Result<(), AppError> {
    settings::set_currency(&mut *write_store(lock)?, currency)
}

pub fn set_language_inner(language: Language, lock: &RwLock<Store>) -> Result<(), AppError> {
    settings::set_language(&mut *write_store(lock)?, language)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn get_settings(state: tauri::State<'_, AppState>) -> Result<Settings, AppError> {
    get_settings_inner(&state.store)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn set_currency(
    currency: Currency,
    state: tauri::State<'_, AppState>,
) -> Result<(), AppError> {
    set_currency_inner(currency, &state.store)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn set_language(
    language: Language,
    state: tauri::State<'_, AppState>,
) -> Result<(), AppError> {
    set_language_inner(language, &state.store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::seeded_store;

    #[test]
    fn set_then_get() {
        let lock = RwLock::new(seeded_store());
        assert_eq!(get_settings_inner(&lock).expect("get"), Settings::default());
        set_currency_inner(Currency::Usd, &lock).expect("currency");
        set_language_inner(Language::En, &lock).expect("language");
        let settings = get_settings_inner(&lock).expect("get");
        assert_eq!(settings.currency, Currency::Usd);
        assert_eq!(settings.language, Language::En);
    }
}
