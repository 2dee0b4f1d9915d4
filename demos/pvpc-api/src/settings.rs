//! Server settings, loaded from environment variables.

use std::path::PathBuf;

use pvpc_sdk::ClientConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CHALLENGE_FILE: &str = ".well-known/openai-apps-challenge";

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// OpenAI apps domain-verification file served at
    /// `/.well-known/openai-apps-challenge`.
    pub challenge_file: PathBuf,
    pub client: ClientConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            challenge_file: PathBuf::from(DEFAULT_CHALLENGE_FILE),
            client: ClientConfig::default(),
        }
    }
}

impl Settings {
    /// Read `HOST`, `PORT`, `OPENAI_CHALLENGE_FILE` and the client variables
    /// (`ESIOS_TOKEN`, ...).
    /// Load `.env` first if one should apply.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = std::env::var("PORT")
            .ok()
            .map(|s| parse_port(&s))
            .unwrap_or(DEFAULT_PORT);
        let challenge_file = std::env::var("OPENAI_CHALLENGE_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CHALLENGE_FILE));

        Self {
            host,
            port,
            challenge_file,
            client: ClientConfig::from_env(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_port(raw: &str) -> u16 {
    match raw.trim().parse::<u16>() {
        Ok(port) => port,
        Err(_) => {
            tracing::warn!(value = raw, "invalid PORT, using {DEFAULT_PORT}");
            DEFAULT_PORT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_parsing_falls_back_to_default() {
        assert_eq!(parse_port("8080"), 8080);
        assert_eq!(parse_port(" 8080 "), 8080);
        assert_eq!(parse_port("http"), 3000);
        assert_eq!(parse_port("70000"), 3000);
    }

    #[test]
    fn default_binds_all_interfaces_on_3000() {
        let settings = Settings::default();
        assert_eq!(settings.bind_addr(), "0.0.0.0:3000");
        assert_eq!(
            settings.challenge_file,
            PathBuf::from(".well-known/openai-apps-challenge")
        );
    }
}
