use crate::api::middleware::error_handling::ErrorHandlingConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub malformed_body_trigger: String,
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            malformed_body_trigger: std::env::var("MALFORMED_BODY_TRIGGER")
                .unwrap_or_else(|_| ErrorHandlingConfig::default().malformed_body_trigger),
            log_json: std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.listen_addr.is_empty() {
            return Err("LISTEN_ADDR cannot be empty".to_string());
        }

        if self.malformed_body_trigger.trim().is_empty() {
            return Err("MALFORMED_BODY_TRIGGER cannot be blank".to_string());
        }

        Ok(())
    }

    pub fn error_handling(&self) -> ErrorHandlingConfig {
        ErrorHandlingConfig::new().with_malformed_body_trigger(self.malformed_body_trigger.clone())
    }
}
