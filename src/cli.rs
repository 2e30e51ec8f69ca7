use clap::Parser;

#[derive(Parser)]
#[command(name = "seedvec")]
#[command(about = "Inject embedding vectors into SQL seed files")]
#[command(
    long_about = "Inject embedding vectors into SQL seed files\n\nScans INSERT blocks for the target table, computes an embedding for each\nrow via the configured service, and rewrites the file in place with a\nbackup of the original. Already-augmented blocks are left untouched."
)]
#[command(version)]
pub struct Cli {
    /// Seed file to process
    #[arg(default_value = "db/04-seed-data.sql")]
    pub file: String,

    #[arg(
        long = "fix-syntax",
        help = "Run the trailing-comma syntax fix instead of embedding injection",
        help_heading = "Mode Options"
    )]
    pub fix_syntax: bool,

    #[arg(
        long = "table",
        default_value = "products",
        help = "Table whose INSERT blocks are augmented",
        help_heading = "Input Options"
    )]
    pub table: String,

    #[arg(
        long = "column",
        default_value = "embedding",
        help = "Name of the derived column added to each block",
        help_heading = "Input Options"
    )]
    pub column: String,

    #[arg(
        long = "model",
        default_value = "text-embedding-004",
        help = "Embedding model name",
        help_heading = "Embedding Options"
    )]
    pub model: String,

    #[arg(
        long = "endpoint",
        default_value = "https://generativelanguage.googleapis.com",
        help = "Base URL of the embedding service",
        help_heading = "Embedding Options"
    )]
    pub endpoint: String,

    #[arg(
        long = "api-key-env",
        default_value = "GEMINI_API_KEY",
        help = "Environment variable holding the API key",
        help_heading = "Embedding Options"
    )]
    pub api_key_env: String,

    #[arg(
        long = "pace-ms",
        default_value_t = 500,
        help = "Minimum interval between embedding calls, in milliseconds",
        help_heading = "Embedding Options"
    )]
    pub pace_ms: u64,

    #[arg(
        long = "backup-suffix",
        default_value = ".bak",
        help = "Suffix appended to the backup file name",
        help_heading = "Output Options"
    )]
    pub backup_suffix: String,

    #[arg(
        long = "dry-run",
        help = "Process the file but write nothing to disk",
        help_heading = "Output Options"
    )]
    pub dry_run: bool,
}
