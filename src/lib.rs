#[macro_use]
extern crate rust_i18n;

i18n!("locales", fallback = "en");

pub mod claude;
pub mod cli;
pub mod config;
pub mod error;
pub mod path_utils;
pub mod render;

#[cfg(test)]
pub mod test_utils;

/// Select the UI locale from `CCSETTING_LANG`, defaulting to English.
pub fn init_locale() {
    let requested = std::env::var(config::ENV_LANG).ok();
    rust_i18n::set_locale(config::resolve_locale(requested.as_deref()));
}
