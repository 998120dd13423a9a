use crate::error::{CarbonError, Result};
use crate::models::HouseholdProfile;
use dialoguer::{Input, Password};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub user: UserConfig,
    /// Initial values for the calculator form.
    #[serde(default)]
    pub defaults: HouseholdProfile,
    #[serde(default)]
    pub gemini: GeminiConfig,
    pub mail: Option<MailConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default = "default_user_name")]
    pub name: String,
    pub email: Option<String>,
}

fn default_user_name() -> String {
    "User".into()
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            name: default_user_name(),
            email: None,
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_chat_timeout")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.into()
}

fn default_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.into()
}

fn default_chat_timeout() -> u64 {
    60
}

impl GeminiConfig {
    /// An unsubstituted `${VAR}` placeholder counts as missing.
    pub fn is_configured(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && !key.starts_with("${")
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_chat_timeout(),
        }
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct MailConfig {
    pub smtp_host: String,
    #[serde(
        default = "default_smtp_port",
        deserialize_with = "deserialize_port"
    )]
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    /// Defaults to `username` when absent.
    pub from_address: Option<String>,
    #[serde(default = "default_mail_timeout")]
    pub timeout_secs: u64,
}

fn default_smtp_port() -> u16 {
    587
}

fn default_mail_timeout() -> u64 {
    30
}

/// Accepts both `587` and `"587"` so the port can come from `${SMTP_PORT}`.
fn deserialize_port<'de, D>(deserializer: D) -> std::result::Result<u16, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PortValue {
        Number(u16),
        Text(String),
    }

    match PortValue::deserialize(deserializer)? {
        PortValue::Number(port) => Ok(port),
        PortValue::Text(value) => value.trim().parse::<u16>().map_err(|_| {
            D::Error::custom(format!(
                "invalid port '{}' - ensure SMTP_PORT environment variable is set",
                value
            ))
        }),
    }
}

impl MailConfig {
    pub fn sender(&self) -> &str {
        self.from_address.as_deref().unwrap_or(&self.username)
    }

    pub fn is_configured(&self) -> bool {
        !self.smtp_host.trim().is_empty()
            && !self.username.trim().is_empty()
            && !self.password.is_empty()
            && !self.password.starts_with("${")
    }
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(CarbonError::Config(format!(
                "Config file not found at {:?}. Run `carbonwise init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| CarbonError::Config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::parse(&config_str)?;
        config.apply_env_fallbacks();
        tracing::debug!(path = %config_path.display(), "configuration loaded");

        Ok(config)
    }

    /// Like `load`, but when no file is found in the standard locations the
    /// defaults are used. An explicit path must exist; parse errors still
    /// surface.
    pub fn load_or_default(config_override: Option<PathBuf>) -> Result<Self> {
        if config_override.is_some() || Self::exists(None) {
            return Self::load(config_override);
        }

        tracing::warn!("No configuration file found - using defaults");
        let mut config = Config::default();
        config.apply_env_fallbacks();
        Ok(config)
    }

    /// Substitute `${VAR}` references and parse YAML.
    pub fn parse(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        serde_yaml::from_str(&content)
            .map_err(|e| CarbonError::Config(format!("Failed to parse config: {}", e)))
    }

    /// The API key may come from the environment even without a config entry.
    fn apply_env_fallbacks(&mut self) {
        if !self.gemini.is_configured() {
            if let Ok(key) = std::env::var(GEMINI_API_KEY_ENV) {
                self.gemini.api_key = key;
            }
        }
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("carbonwise").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/carbonwise/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CarbonError::Config("Cannot determine config directory".into()))?
            .join("carbonwise");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up carbonwise!");
        println!();

        println!("Report recipient");
        let name: String = Input::new()
            .with_prompt("  Your name")
            .default(default_user_name())
            .interact_text()
            .map_err(input_error)?;

        let email: String = Input::new()
            .with_prompt("  Email address (blank to skip)")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(input_error)?;

        println!();

        println!("Gemini chat (leave blank to read ${{{}}} at startup)", GEMINI_API_KEY_ENV);
        let api_key: String = Password::new()
            .with_prompt("  API key")
            .allow_empty_password(true)
            .interact()
            .map_err(input_error)?;

        println!();

        println!("SMTP mail submission (leave host blank to skip)");
        let smtp_host: String = Input::new()
            .with_prompt("  Host")
            .default("smtp.gmail.com".into())
            .allow_empty(true)
            .interact_text()
            .map_err(input_error)?;

        let mail = if smtp_host.trim().is_empty() {
            None
        } else {
            let smtp_port: u16 = Input::new()
                .with_prompt("  Port")
                .default(default_smtp_port())
                .interact_text()
                .map_err(input_error)?;

            let username: String = Input::new()
                .with_prompt("  Username (sender address)")
                .interact_text()
                .map_err(input_error)?;

            let password: String = Password::new()
                .with_prompt("  Password / app password")
                .allow_empty_password(true)
                .interact()
                .map_err(input_error)?;

            Some(MailConfig {
                smtp_host,
                smtp_port,
                username,
                password,
                from_address: None,
                timeout_secs: default_mail_timeout(),
            })
        };

        println!();

        let config = Config {
            user: UserConfig {
                name,
                email: Some(email).filter(|e| !e.trim().is_empty()),
            },
            defaults: HouseholdProfile::default(),
            gemini: GeminiConfig {
                api_key: if api_key.is_empty() {
                    format!("${{{}}}", GEMINI_API_KEY_ENV)
                } else {
                    api_key
                },
                ..GeminiConfig::default()
            },
            mail,
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| CarbonError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# carbonwise configuration\n# Generated by `carbonwise init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        let mut config = config;
        config.apply_env_fallbacks();
        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        let re = match regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") {
            Ok(re) => re,
            Err(_) => return result,
        };

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("CARBONWISE_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| CarbonError::Config("Cannot determine data directory".into()))?
            .join("carbonwise");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("carbonwise.log"))
    }
}

fn input_error(e: dialoguer::Error) -> CarbonError {
    CarbonError::Config(format!("Input error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DietType;

    #[test]
    fn missing_explicit_config_is_an_error() {
        let result = Config::load_or_default(Some(PathBuf::from("/nonexistent/typo.yaml")));
        assert!(matches!(result, Err(CarbonError::Config(_))));
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
user:
  name: Asha
  email: asha@example.com
defaults:
  electricity_kwh: 220
  diet: nonveg
gemini:
  api_key: abc123
  model: gemini-2.5-flash
mail:
  smtp_host: smtp.example.com
  smtp_port: "2525"
  username: reports@example.com
  password: secret
"#;
        let config = Config::parse(yaml).unwrap();

        assert_eq!(config.user.name, "Asha");
        assert_eq!(config.defaults.electricity_kwh, 220.0);
        assert_eq!(config.defaults.diet, DietType::NonVeg);
        // Unlisted profile fields keep the form defaults.
        assert_eq!(config.defaults.household_size, 4);
        assert!(config.gemini.is_configured());
        assert_eq!(config.gemini.timeout_secs, 60);

        let mail = config.mail.unwrap();
        assert_eq!(mail.smtp_port, 2525);
        assert_eq!(mail.sender(), "reports@example.com");
        assert!(mail.is_configured());
    }

    #[test]
    fn parse_empty_sections_use_defaults() {
        let config = Config::parse("{}").unwrap();
        assert_eq!(config.user.name, "User");
        assert_eq!(config.gemini.model, DEFAULT_GEMINI_MODEL);
        assert!(!config.gemini.is_configured());
        assert!(config.mail.is_none());
    }

    #[test]
    fn parse_rejects_bad_port() {
        let yaml = "mail:\n  smtp_host: h\n  smtp_port: \"${CARBONWISE_TEST_UNSET_PORT}\"\n  username: u\n  password: p\n";
        assert!(Config::parse(yaml).is_err());
    }

    #[test]
    fn env_vars_are_substituted() {
        std::env::set_var("CARBONWISE_TEST_KEY", "from-env");
        let config = Config::parse("gemini:\n  api_key: ${CARBONWISE_TEST_KEY}\n").unwrap();
        assert_eq!(config.gemini.api_key, "from-env");
    }

    #[test]
    fn unresolved_placeholder_is_not_configured() {
        let config = Config::parse("gemini:\n  api_key: ${CARBONWISE_TEST_MISSING_KEY}\n").unwrap();
        assert!(!config.gemini.is_configured());
    }

    #[test]
    fn debug_redacts_secrets() {
        let gemini = GeminiConfig {
            api_key: "super-secret".into(),
            ..GeminiConfig::default()
        };
        let mail = MailConfig {
            smtp_host: "smtp.example.com".into(),
            smtp_port: 587,
            username: "me@example.com".into(),
            password: "hunter2".into(),
            from_address: None,
            timeout_secs: 30,
        };

        let rendered = format!("{:?} {:?}", gemini, mail);
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
