use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server bind address (e.g., "0.0.0.0:3000")
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Maximum labels verified concurrently within one batch request
    #[serde(default = "default_batch_concurrency")]
    pub batch_concurrency: usize,

    /// Maximum labels accepted in one batch request
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// Request body size limit in bytes
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_batch_concurrency() -> usize {
    4
}

fn default_max_batch_size() -> usize {
    500
}

fn default_body_limit_bytes() -> usize {
    10 * 1024 * 1024
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            batch_concurrency: default_batch_concurrency(),
            max_batch_size: default_max_batch_size(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env::<Self>().map(Self::sanitized)
    }

    /// Clamp batch concurrency to at least one.
    fn sanitized(mut self) -> Self {
        self.batch_concurrency = self.batch_concurrency.max(1);
        self
    }
}
