use std::fs;

use serde::Deserialize;

#[derive(Debug)]
pub struct Settings {
    pub api_base_url: String,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000/api".into(),
            email: None,
            password: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

/// Defaults, overridden by `console.toml`, overridden by `APP__*`
/// environment variables.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("console.toml") {
        apply_file(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Ok(v) = std::env::var("APP__EMAIL") {
        settings.email = Some(v);
    }
    if let Ok(v) = std::env::var("APP__PASSWORD") {
        settings.password = Some(v);
    }

    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let Ok(file_settings) = toml::from_str::<FileSettings>(raw) else {
        return;
    };
    if let Some(v) = file_settings.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_settings.email {
        settings.email = Some(v);
    }
    if let Some(v) = file_settings.password {
        settings.password = Some(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_values_override_defaults() {
        let mut settings = Settings::default();
        apply_file(
            &mut settings,
            "api_base_url = \"https://charity.example.org/api\"\nemail = \"admin@example.org\"\n",
        );
        assert_eq!(settings.api_base_url, "https://charity.example.org/api");
        assert_eq!(settings.email.as_deref(), Some("admin@example.org"));
        assert!(settings.password.is_none());
    }

    #[test]
    fn malformed_file_keeps_defaults() {
        let mut settings = Settings::default();
        apply_file(&mut settings, "api_base_url = [nonsense");
        assert_eq!(settings.api_base_url, Settings::default().api_base_url);
    }
}
