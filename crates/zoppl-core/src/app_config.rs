#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Image-analysis endpoint that accepts the multipart upload.
    pub endpoint_url: String,
    pub user_agent: String,
    pub log_level: String,
    /// Largest image accepted for upload; larger files are rejected locally.
    pub max_image_bytes: u64,
}
