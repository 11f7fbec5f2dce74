use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Which provider directory the search pipeline talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryBackend {
    /// Seeded in-memory dataset
    Mock,
    /// A running mock directory API reached over HTTP
    MockApi { base_url: String },
    /// Vendor A
    CareDirectory { base_url: String, api_key: String },
    /// Vendor B
    Teletherapy { base_url: String, api_key: String },
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub directory_backend: DirectoryBackend,
    pub upload_dir: PathBuf,
    pub public_base_url: String,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .context("PORT must be a valid number")?;

        let backend_name =
            env::var("DIRECTORY_BACKEND").unwrap_or_else(|_| "mock".to_string());

        Ok(Self {
            port,
            database_url: env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "mindbridge".to_string()),
            directory_backend: DirectoryBackend::from_env(&backend_name)?,
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./uploads")),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}", port)),
            admin_email: env::var("ADMIN_EMAIL").ok().filter(|s| !s.is_empty()),
            admin_password: env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty()),
            allowed_origins: parse_list(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
        })
    }

    /// Session cookies are marked `Secure` when the site is served over https
    pub fn secure_cookies(&self) -> bool {
        self.public_base_url
            .trim()
            .to_ascii_lowercase()
            .starts_with("https://")
    }
}

impl DirectoryBackend {
    fn from_env(name: &str) -> Result<Self> {
        match name.trim() {
            "mock" => Ok(Self::Mock),
            "mock_api" => Ok(Self::MockApi {
                base_url: env::var("MOCK_API_URL")
                    .context("MOCK_API_URL must be set when DIRECTORY_BACKEND=mock_api")?,
            }),
            "care_directory" => Ok(Self::CareDirectory {
                base_url: env::var("CARE_DIRECTORY_API_URL").context(
                    "CARE_DIRECTORY_API_URL must be set when DIRECTORY_BACKEND=care_directory",
                )?,
                api_key: env::var("CARE_DIRECTORY_API_KEY").context(
                    "CARE_DIRECTORY_API_KEY must be set when DIRECTORY_BACKEND=care_directory",
                )?,
            }),
            "teletherapy" => Ok(Self::Teletherapy {
                base_url: env::var("TELETHERAPY_API_URL").context(
                    "TELETHERAPY_API_URL must be set when DIRECTORY_BACKEND=teletherapy",
                )?,
                api_key: env::var("TELETHERAPY_API_KEY").context(
                    "TELETHERAPY_API_KEY must be set when DIRECTORY_BACKEND=teletherapy",
                )?,
            }),
            other => bail!(
                "Unknown DIRECTORY_BACKEND '{}' (expected mock, mock_api, care_directory or teletherapy)",
                other
            ),
        }
    }

    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::MockApi { .. } => "mock_api",
            Self::CareDirectory { .. } => "care_directory",
            Self::Teletherapy { .. } => "teletherapy",
        }
    }
}

/// Split a comma-separated env value, dropping blanks
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse_list("https://a.example, ,https://b.example"),
            vec!["https://a.example", "https://b.example"]
        );
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn test_mock_backend_needs_no_env() {
        assert_eq!(DirectoryBackend::from_env("mock").unwrap(), DirectoryBackend::Mock);
    }

    #[test]
    fn test_secure_cookies_follow_public_url_scheme() {
        let mut config = Config {
            port: 8080,
            database_url: None,
            jwt_secret: "secret".to_string(),
            jwt_issuer: "mindbridge".to_string(),
            directory_backend: DirectoryBackend::Mock,
            upload_dir: PathBuf::from("./uploads"),
            public_base_url: "http://localhost:8080".to_string(),
            admin_email: None,
            admin_password: None,
            allowed_origins: Vec::new(),
        };
        assert!(!config.secure_cookies());

        config.public_base_url = "HTTPS://mindbridge.example".to_string();
        assert!(config.secure_cookies());
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let err = DirectoryBackend::from_env("yellow_pages").unwrap_err();
        assert!(err.to_string().contains("yellow_pages"));
    }
}
