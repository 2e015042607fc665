use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub access_token_ttl_secs: i64,
    pub refresh_token_ttl_secs: i64,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid PORT: {}", e))?;
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?;
        let access_token_ttl_secs = std::env::var("ACCESS_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid ACCESS_TOKEN_TTL_SECS: {}", e))?;
        let refresh_token_ttl_secs = std::env::var("REFRESH_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "86400".into())
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid REFRESH_TOKEN_TTL_SECS: {}", e))?;
        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            database_url,
            jwt_secret,
            access_token_ttl_secs,
            refresh_token_ttl_secs,
            cors_origins,
        })
    }
}
