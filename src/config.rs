use anyhow::{Context, Result};
use clap::Parser;
use std::env;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Product CRUD API")]
pub struct Args {
    /// Host to bind to (overrides PRODUCT_API_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides PRODUCT_API_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (overrides PRODUCT_API_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Run migrations and exit
    #[arg(long)]
    pub migrate: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    ///
    /// The database URL has no default: a process started without one
    /// (env or flag) fails here, before any listener is opened.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        // Parse CLI once
        let args = Args::parse();

        // --- Environment fallback ---
        let env_host = env::var("PRODUCT_API_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = match env::var("PRODUCT_API_PORT") {
            Ok(value) => Some(
                value
                    .parse::<u16>()
                    .with_context(|| format!("parsing PRODUCT_API_PORT value `{}`", value))?,
            ),
            Err(env::VarError::NotPresent) => None,
            Err(err) => return Err(err).context("reading PRODUCT_API_PORT"),
        };
        let env_db = env::var("PRODUCT_API_DATABASE_URL").ok();

        // --- Merge ---
        let cfg = Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.or(env_port).unwrap_or(3000),
            database_url: args
                .database_url
                .or(env_db)
                .context("PRODUCT_API_DATABASE_URL is not set and --database-url was not given")?,
        };

        Ok((cfg, args.migrate))
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
