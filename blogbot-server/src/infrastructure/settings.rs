use anyhow::{Context, Result, anyhow};

const BOT_TOKEN_PLACEHOLDER: &str = "YOUR_BOT_TOKEN_HERE";

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_path: String,
    pub api_host: String,
    pub api_port: u16,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub bot_token: Option<String>,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub http_request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "blog.db".to_string());
        let api_host = std::env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let api_port: u16 = std::env::var("API_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .context("Failed to parse API_PORT, expecting port number")?;

        let admin_username = parse_secret(std::env::var("ADMIN_USERNAME").ok());
        let admin_password = parse_secret(std::env::var("ADMIN_PASSWORD").ok());

        let bot_token = parse_bot_token(std::env::var("BOT_TOKEN").ok());

        let cors_origins = parse_cors_origins(
            std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| format!("http://{api_host}:{api_port}")),
        );
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());
        let http_request_body_limit_bytes =
            parse_usize_env("HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;
        let http_concurrency_limit = parse_usize_env("HTTP_CONCURRENCY_LIMIT", 256)?;

        Ok(Self {
            database_path,
            api_host,
            api_port,
            admin_username,
            admin_password,
            bot_token,
            cors_origins,
            log_level,
            http_request_body_limit_bytes,
            http_concurrency_limit,
        })
    }

    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    pub fn admin_url(&self) -> String {
        format!("http://{}/admin", self.http_addr())
    }

    /// Admin `(username, password)`; only the HTTP API needs them.
    pub fn require_admin_credentials(&self) -> Result<(&str, &str)> {
        let username = self
            .admin_username
            .as_deref()
            .ok_or_else(|| anyhow!("ADMIN_USERNAME is required to run the API"))?;
        let password = self
            .admin_password
            .as_deref()
            .ok_or_else(|| anyhow!("ADMIN_PASSWORD is required to run the API"))?;
        Ok((username, password))
    }

    pub fn require_bot_token(&self) -> Result<&str> {
        self.bot_token
            .as_deref()
            .ok_or_else(|| anyhow!("BOT_TOKEN is required to run the bot"))
    }
}

// Blank counts as unset; a non-blank value is kept byte for byte.
fn parse_secret(raw: Option<String>) -> Option<String> {
    raw.filter(|value| !value.trim().is_empty())
}

fn parse_bot_token(raw: Option<String>) -> Option<String> {
    raw.map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty() && token != BOT_TOKEN_PLACEHOLDER)
}

fn parse_cors_origins(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_usize_env(key: &str, default: usize) -> Result<usize> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{Settings, parse_bot_token, parse_cors_origins, parse_secret};

    fn settings_with_admin(username: Option<&str>, password: Option<&str>) -> Settings {
        Settings {
            database_path: "blog.db".to_string(),
            api_host: "127.0.0.1".to_string(),
            api_port: 8000,
            admin_username: username.map(str::to_string),
            admin_password: password.map(str::to_string),
            bot_token: None,
            cors_origins: vec![],
            log_level: "info".to_string(),
            http_request_body_limit_bytes: 1024,
            http_concurrency_limit: 1,
        }
    }

    #[test]
    fn secrets_keep_surrounding_spaces_and_reject_blank() {
        assert_eq!(
            parse_secret(Some("  pass word ".to_string())).as_deref(),
            Some("  pass word ")
        );
        assert_eq!(parse_secret(Some(" \t ".to_string())), None);
        assert_eq!(parse_secret(None), None);
    }

    #[test]
    fn admin_credentials_are_required_only_on_demand() {
        let settings = settings_with_admin(Some("admin"), None);
        let err = settings
            .require_admin_credentials()
            .expect_err("missing password must fail");
        assert!(err.to_string().contains("ADMIN_PASSWORD"));

        let settings = settings_with_admin(Some("admin"), Some(" secret "));
        let (username, password) = settings
            .require_admin_credentials()
            .expect("credentials must be present");
        assert_eq!(username, "admin");
        assert_eq!(password, " secret ");
    }

    #[test]
    fn bot_token_placeholder_is_treated_as_missing() {
        assert_eq!(parse_bot_token(Some("YOUR_BOT_TOKEN_HERE".to_string())), None);
        assert_eq!(parse_bot_token(Some("   ".to_string())), None);
        assert_eq!(parse_bot_token(None), None);
        assert_eq!(
            parse_bot_token(Some(" 123:abc ".to_string())).as_deref(),
            Some("123:abc")
        );
    }

    #[test]
    fn cors_origins_skip_blank_entries() {
        let origins = parse_cors_origins(" http://a.test , ,http://b.test".to_string());
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }
}
