use serde::Deserialize;

pub const DEFAULT_BUCKET: &str = "vickikbt-fixit-app";
pub const DEFAULT_REGION: &str = "us-east-2";
pub const DEFAULT_PUBLIC_URL: &str = "https://vickikbt-fixit-app.s3.us-east-2.amazonaws.com/";

#[derive(Debug, Clone, Deserialize)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// Base URL objects are publicly reachable under, ends with `/`.
    pub public_url: String,
    /// Custom endpoint (MinIO, localstack). Uses path-style addressing when set.
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub s3: S3Config,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let mut public_url =
            std::env::var("S3_PUBLIC_URL").unwrap_or_else(|_| DEFAULT_PUBLIC_URL.into());
        if !public_url.ends_with('/') {
            public_url.push('/');
        }

        let s3 = S3Config {
            bucket: std::env::var("S3_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.into()),
            region: std::env::var("S3_REGION").unwrap_or_else(|_| DEFAULT_REGION.into()),
            public_url,
            endpoint: std::env::var("S3_ENDPOINT").ok().filter(|v| !v.is_empty()),
            access_key: std::env::var("S3_ACCESS_KEY").ok(),
            secret_key: std::env::var("S3_SECRET_KEY").ok(),
        };

        Ok(Self {
            database_url,
            max_connections,
            s3,
        })
    }
}
