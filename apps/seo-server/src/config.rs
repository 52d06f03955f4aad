use axum::http::HeaderValue;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "seo-server", version, about = "On-page SEO audit API")]
pub struct Cli {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 10000)]
    pub port: u16,

    /// Comma separated list of origins allowed by CORS.
    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5174,https://tools.studio37.cc"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://seo-cache.db?mode=rwc")]
    pub database_url: String,

    /// Serve `/analyze` without the response cache.
    #[arg(long)]
    pub no_cache: bool,
}

impl Cli {
    pub fn origin_headers(&self) -> anyhow::Result<Vec<HeaderValue>> {
        self.allowed_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|e| anyhow::anyhow!("invalid origin {origin:?}: {e}"))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["seo-server"]);
        assert_eq!(
            cli.allowed_origins,
            vec!["http://localhost:5174", "https://tools.studio37.cc"]
        );
        assert!(!cli.no_cache);
    }

    #[test]
    fn test_origin_list_is_split() {
        let cli = Cli::parse_from([
            "seo-server",
            "--allowed-origins",
            "https://a.example, https://b.example",
            "--no-cache",
        ]);
        let origins = cli.origin_headers().unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[1], "https://b.example");
        assert!(cli.no_cache);
    }
}
