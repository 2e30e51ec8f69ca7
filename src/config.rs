use std::env;
use std::time::Duration;

/// Main configuration struct for seedvec.
///
/// One instance lives for the duration of one invocation; there is no
/// module-level state.
#[derive(Debug, Clone)]
pub struct SeedvecConfig {
    pub input: InputConfig,
    pub embedding: EmbeddingConfig,
    pub output: OutputConfig,
}

/// Input configuration
#[derive(Debug, Clone)]
pub struct InputConfig {
    pub file: String,
    pub table: String,
    pub column: String,
    pub fix_syntax: bool,
}

/// Embedding service configuration
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable the key was looked up in, kept for
    /// the missing-credential notice.
    pub api_key_env: String,
    pub api_key: Option<String>,
    pub pace: Duration,
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub backup_suffix: String,
    pub dry_run: bool,
}

impl SeedvecConfig {
    /// Create configuration from CLI arguments, resolving the API key from
    /// the environment.
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        let api_key = env::var(&cli.api_key_env)
            .ok()
            .filter(|key| !key.is_empty());

        Self {
            input: InputConfig {
                file: cli.file.clone(),
                table: cli.table.clone(),
                column: cli.column.clone(),
                fix_syntax: cli.fix_syntax,
            },
            embedding: EmbeddingConfig {
                endpoint: cli.endpoint.clone(),
                model: cli.model.clone(),
                api_key_env: cli.api_key_env.clone(),
                api_key,
                pace: Duration::from_millis(cli.pace_ms),
            },
            output: OutputConfig {
                backup_suffix: cli.backup_suffix.clone(),
                dry_run: cli.dry_run,
            },
        }
    }
}

impl Default for SeedvecConfig {
    fn default() -> Self {
        Self {
            input: InputConfig {
                file: "db/04-seed-data.sql".to_string(),
                table: "products".to_string(),
                column: "embedding".to_string(),
                fix_syntax: false,
            },
            embedding: EmbeddingConfig {
                endpoint: "https://generativelanguage.googleapis.com".to_string(),
                model: "text-embedding-004".to_string(),
                api_key_env: "GEMINI_API_KEY".to_string(),
                api_key: None,
                pace: Duration::from_millis(500),
            },
            output: OutputConfig {
                backup_suffix: ".bak".to_string(),
                dry_run: false,
            },
        }
    }
}
