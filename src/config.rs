use anyhow::{Context, Result};
use clap::Parser;
use std::env;

const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub cors_origins: Vec<String>,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Map pins and comments REST API")]
pub struct Args {
    /// Host to bind to (overrides PINBOARD_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides PINBOARD_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (overrides PINBOARD_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Allowed CORS origin; repeatable, `*` allows any (overrides PINBOARD_CORS_ORIGINS)
    #[arg(long = "cors-origin")]
    pub cors_origins: Vec<String>,

    /// Run migrations and exit
    #[arg(long)]
    pub migrate: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        let args = Args::parse();
        let migrate = args.migrate;
        let cfg = Self::resolve(args, |key| env::var(key))?;
        Ok((cfg, migrate))
    }

    /// Merge CLI args over values from `lookup`, falling back to defaults.
    pub fn resolve<F>(args: Args, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        // --- Environment fallback ---
        let env_host = lookup("PINBOARD_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = match lookup("PINBOARD_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing PINBOARD_PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => 8080,
            Err(err) => return Err(err).context("reading PINBOARD_PORT"),
        };
        let env_db = lookup("PINBOARD_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://./data/pinboard.db".into());
        let env_origins = lookup("PINBOARD_CORS_ORIGINS")
            .map(|raw| split_origins(&raw))
            .unwrap_or_else(|_| vec![DEFAULT_CORS_ORIGIN.into()]);

        // --- Merge ---
        Ok(Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            database_url: args.database_url.unwrap_or(env_db),
            cors_origins: if args.cors_origins.is_empty() {
                env_origins
            } else {
                args.cors_origins
            },
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
