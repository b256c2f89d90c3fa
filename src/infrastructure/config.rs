use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub storage: StorageSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub history_file: String,
}

/// Load storage settings from `config/storage`. The file is optional; the
/// default keeps the history next to the binary so the tool works with no
/// setup at all.
pub fn load_storage_config() -> anyhow::Result<StorageConfig> {
    let settings = config::Config::builder()
        .set_default("storage.history_file", "led_calculator_history.json")?
        .add_source(config::File::with_name("config/storage").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_storage_config_always_yields_a_path() {
        let config = load_storage_config().unwrap();
        assert!(!config.storage.history_file.is_empty());
    }
}
