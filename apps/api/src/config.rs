use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    /// Root of the artifact store. Each user gets a subdirectory named after their id.
    pub projects_dir: PathBuf,
    /// HTML→PDF converter binary, invoked as `<bin> <input.html> <output.pdf>`.
    pub pdf_renderer_bin: String,
    /// Extra converter arguments, whitespace-separated, placed before the paths.
    pub pdf_renderer_args: Vec<String>,
    /// Upper bound on a single generation call. Generated documents are long.
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            projects_dir: PathBuf::from(optional_env("PROJECTS_DIR", "db")),
            pdf_renderer_bin: optional_env("PDF_RENDERER_BIN", "weasyprint"),
            pdf_renderer_args: optional_env("PDF_RENDERER_ARGS", "")
                .split_whitespace()
                .map(str::to_string)
                .collect(),
            llm_timeout_secs: optional_env("LLM_TIMEOUT_SECS", "300")
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
