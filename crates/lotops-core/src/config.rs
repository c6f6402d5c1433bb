//! Environment-driven configuration for the lotops binaries.
//!
//! Every setting is read from process environment variables (a `.env` file
//! is honored during development), parsed once at startup, and validated
//! before any service is constructed.

use std::env;

const DEFAULT_DB_CONNECTIONS: u32 = 20;
const DEFAULT_DB_TIMEOUT_SECS: u64 = 30;
const DEFAULT_IMPORT_FILE_SIZE_MB: usize = 10;
const DEFAULT_IMPORT_BATCH_FILES: usize = 10;
const DEFAULT_PREVIEW_ROWS: usize = 5;
const DEFAULT_RETENTION_SECS: u64 = 30;

/// Reads `name` and parses it, falling back to `default` when the variable
/// is unset or unparseable.
fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|raw| raw.parse::<T>().ok())
        .unwrap_or(default)
}

/// Reads a comma-separated list, trimming and lowercasing each entry.
fn env_list(name: &str, default: &str) -> Vec<String> {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .collect()
}

/// Settings every lotops binary reads, regardless of role.
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub environment: String,
}

impl BaseConfig {
    fn from_env() -> Result<Self, anyhow::Error> {
        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        // Origins keep their case; they are matched verbatim by the CORS layer.
        let cors_raw = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a number"))?,
            cors_origins: cors_raw.split(',').map(|s| s.trim().to_string()).collect(),
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_CONNECTIONS),
            db_timeout_seconds: env_parse("DB_TIMEOUT_SECONDS", DEFAULT_DB_TIMEOUT_SECS),
            environment,
        };

        if base.is_production() && cors_raw.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS is '*' but the environment is production; list explicit origins"
            ));
        }

        Ok(base)
    }

    fn is_production(&self) -> bool {
        matches!(
            self.environment.to_lowercase().as_str(),
            "production" | "prod"
        )
    }
}

/// Inventory platform settings, CSV import policy included.
#[derive(Clone, Debug)]
pub struct PlatformConfig {
    pub base: BaseConfig,
    pub database_url: String,
    pub max_import_file_size_bytes: usize,
    pub import_allowed_extensions: Vec<String>,
    pub import_allowed_content_types: Vec<String>,
    pub max_import_files_per_batch: usize,
    /// Number of parsed rows retained per file for operator preview.
    pub import_preview_rows: usize,
    /// Seconds a successful import stays visible before it is pruned.
    pub import_retention_seconds: u64,
}

impl PlatformConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let config = PlatformConfig {
            base: BaseConfig::from_env()?,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            max_import_file_size_bytes: env_parse(
                "MAX_IMPORT_FILE_SIZE_MB",
                DEFAULT_IMPORT_FILE_SIZE_MB,
            ) * 1024
                * 1024,
            import_allowed_extensions: env_list("IMPORT_ALLOWED_EXTENSIONS", "csv,txt"),
            import_allowed_content_types: env_list(
                "IMPORT_ALLOWED_CONTENT_TYPES",
                "text/csv,application/csv,text/plain,application/vnd.ms-excel",
            ),
            max_import_files_per_batch: env_parse(
                "MAX_IMPORT_FILES_PER_BATCH",
                DEFAULT_IMPORT_BATCH_FILES,
            ),
            import_preview_rows: env_parse("IMPORT_PREVIEW_ROWS", DEFAULT_PREVIEW_ROWS),
            import_retention_seconds: env_parse("IMPORT_RETENTION_SECONDS", DEFAULT_RETENTION_SECS),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.database_url.starts_with("postgresql://") {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a postgresql:// connection string"
            ));
        }

        if self.max_import_file_size_bytes == 0 {
            return Err(anyhow::anyhow!(
                "MAX_IMPORT_FILE_SIZE_MB must be greater than zero"
            ));
        }

        if self.max_import_files_per_batch == 0 {
            return Err(anyhow::anyhow!(
                "MAX_IMPORT_FILES_PER_BATCH must be greater than zero"
            ));
        }

        if self.import_allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "IMPORT_ALLOWED_EXTENSIONS must list at least one extension"
            ));
        }

        Ok(())
    }
}

/// Boxed configuration handed to the binaries at startup.
#[derive(Clone, Debug)]
pub struct Config(pub Box<PlatformConfig>);

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Ok(Config(Box::new(PlatformConfig::from_env()?)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_platform().validate()
    }

    /// True when ENVIRONMENT (or APP_ENV) names a production deployment.
    pub fn is_production(&self) -> bool {
        self.as_platform().base.is_production()
    }

    fn as_platform(&self) -> &PlatformConfig {
        &self.0
    }

    pub fn server_port(&self) -> u16 {
        self.as_platform().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_platform().base.cors_origins
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_platform().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.as_platform().base.db_timeout_seconds
    }

    pub fn database_url(&self) -> &str {
        &self.as_platform().database_url
    }

    pub fn max_import_file_size_bytes(&self) -> usize {
        self.as_platform().max_import_file_size_bytes
    }

    pub fn import_allowed_extensions(&self) -> &[String] {
        &self.as_platform().import_allowed_extensions
    }

    pub fn import_allowed_content_types(&self) -> &[String] {
        &self.as_platform().import_allowed_content_types
    }

    pub fn max_import_files_per_batch(&self) -> usize {
        self.as_platform().max_import_files_per_batch
    }

    pub fn import_preview_rows(&self) -> usize {
        self.as_platform().import_preview_rows
    }

    pub fn import_retention_seconds(&self) -> u64 {
        self.as_platform().import_retention_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_base(environment: &str) -> BaseConfig {
        BaseConfig {
            server_port: 4000,
            cors_origins: vec!["*".to_string()],
            db_max_connections: 5,
            db_timeout_seconds: 30,
            environment: environment.to_string(),
        }
    }

    fn test_platform() -> PlatformConfig {
        PlatformConfig {
            base: test_base("test"),
            database_url: "postgresql://localhost/lotops".to_string(),
            max_import_file_size_bytes: 1024 * 1024,
            import_allowed_extensions: vec!["csv".to_string()],
            import_allowed_content_types: vec!["text/csv".to_string()],
            max_import_files_per_batch: 10,
            import_preview_rows: 5,
            import_retention_seconds: 30,
        }
    }

    #[test]
    fn test_is_production_matches_known_names() {
        for name in ["production", "prod", "PRODUCTION", "Prod"] {
            assert!(test_base(name).is_production(), "{name}");
        }
        for name in ["development", "test", "staging", "preprod"] {
            assert!(!test_base(name).is_production(), "{name}");
        }
    }

    #[test]
    fn test_validate_rejects_non_postgres_url() {
        let mut config = test_platform();
        config.database_url = "mysql://localhost/lotops".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let mut config = test_platform();
        config.max_import_file_size_bytes = 0;
        assert!(config.validate().is_err());

        let mut config = test_platform();
        config.max_import_files_per_batch = 0;
        assert!(config.validate().is_err());

        let mut config = test_platform();
        config.import_allowed_extensions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(test_platform().validate().is_ok());
    }
}
