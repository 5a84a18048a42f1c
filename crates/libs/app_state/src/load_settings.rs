use crate::{AppSettings, RawSettings};
use color_eyre::eyre::Result;
use std::path::Path;
use std::sync::LazyLock;

/// Load the app settings from YAML + environment variables.
///
/// Environment variables use the `APP` prefix and `__` as separator,
/// e.g. `APP__SECRETS__DATABASE_URL`.
pub fn load_app_settings() -> Result<AppSettings> {
    // Need to load from dotenv to get it to overwrite the db url from env.
    dotenv::from_path(".env").ok();
    let config_path = Path::new("config/settings.yaml").canonicalize()?;

    let builder = config::Config::builder()
        .add_source(config::File::from(config_path))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("api.allowed_origins"),
        );

    let raw_settings = builder.build()?.try_deserialize::<RawSettings>()?;
    Ok(raw_settings.into())
}

/// Immutable global settings, initialized on first access.
pub static SETTINGS: LazyLock<AppSettings> =
    LazyLock::new(|| load_app_settings().expect("Cannot load app settings."));

#[must_use]
pub fn settings() -> &'static AppSettings {
    &SETTINGS
}
