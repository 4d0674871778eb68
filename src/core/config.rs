use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub swagger: SwaggerConfig,
    pub storage: StorageConfig,
    pub text_analytics: TextAnalyticsConfig,
    pub summarizer: SummarizerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Azure Blob Storage configuration
#[derive(Clone)]
pub struct StorageConfig {
    /// Storage account connection string (`AccountName=...;AccountKey=...`)
    pub connection_string: String,
    /// Container holding every uploaded file
    pub container: String,
}

/// Azure AI Language (text analytics) configuration
#[derive(Clone)]
pub struct TextAnalyticsConfig {
    /// Resource endpoint, e.g. `https://my-resource.cognitiveservices.azure.com`
    pub endpoint: String,
    /// Subscription key sent as `Ocp-Apim-Subscription-Key`
    pub api_key: String,
    /// Language hint for the submitted document
    pub language: String,
    /// Maximum number of sentences the extractive summary may contain
    pub sentence_count: u32,
    /// Delay between two status polls of a running job
    pub poll_interval: Duration,
}

#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    /// Surface analytics failures as 502 instead of a degraded summary
    pub strict_errors: bool,
}

// Secrets stay out of logs.
impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("connection_string", &"***")
            .field("container", &self.container)
            .finish()
    }
}

impl std::fmt::Debug for TextAnalyticsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextAnalyticsConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"***")
            .field("language", &self.language)
            .field("sentence_count", &self.sentence_count)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

/// Source of configuration values, keyed by variable name
type Vars<'a> = &'a dyn Fn(&str) -> Option<String>;

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Self::from_vars(&|key| env::var(key).ok())
    }

    pub fn from_vars(vars: Vars<'_>) -> Result<Self, String> {
        Ok(Config {
            app: AppConfig::from_vars(vars)?,
            swagger: SwaggerConfig::from_vars(vars)?,
            storage: StorageConfig::from_vars(vars)?,
            text_analytics: TextAnalyticsConfig::from_vars(vars)?,
            summarizer: SummarizerConfig::from_vars(vars)?,
        })
    }
}

impl AppConfig {
    const DEFAULT_PORT: u16 = 7071;
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 100 * 1024 * 1024; // 100MB

    pub fn from_vars(vars: Vars<'_>) -> Result<Self, String> {
        let host = vars("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match vars("PORT") {
            Some(p) => p
                .parse::<u16>()
                .map_err(|e| format!("Invalid PORT: {}", e))?,
            None => Self::DEFAULT_PORT,
        };

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = vars("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = vars("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl SwaggerConfig {
    pub fn from_vars(vars: Vars<'_>) -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = vars("SWAGGER_USERNAME").filter(|s| !s.is_empty());
        let password = vars("SWAGGER_PASSWORD").filter(|s| !s.is_empty());
        let title = vars("SWAGGER_TITLE").unwrap_or_else(|| "Translate & Summarize API".to_string());
        let version = vars("SWAGGER_VERSION").unwrap_or_else(|| "0.1.0".to_string());
        let description = vars("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|| "Upload, download and summarize documents".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl StorageConfig {
    pub const DEFAULT_CONTAINER: &'static str = "uploaded-files";

    pub fn from_vars(vars: Vars<'_>) -> Result<Self, String> {
        let connection_string = vars("ConnectionString")
            .or_else(|| vars("AZURE_STORAGE_CONNECTION_STRING"))
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| "ConnectionString environment variable is required".to_string())?;

        let container = vars("BLOB_CONTAINER_NAME")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_CONTAINER.to_string());

        Ok(Self {
            connection_string,
            container,
        })
    }
}

impl TextAnalyticsConfig {
    const DEFAULT_LANGUAGE: &'static str = "en";
    const DEFAULT_SENTENCE_COUNT: u32 = 3;
    const MAX_SENTENCE_COUNT: u32 = 20;
    const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

    pub fn from_vars(vars: Vars<'_>) -> Result<Self, String> {
        let endpoint = vars("TEXT_ANALYTICS_ENDPOINT")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| "TEXT_ANALYTICS_ENDPOINT environment variable is required".to_string())?;

        reqwest::Url::parse(&endpoint)
            .map_err(|e| format!("TEXT_ANALYTICS_ENDPOINT must be a valid URL: {}", e))?;
        let endpoint = endpoint.trim_end_matches('/').to_string();

        let api_key = vars("TEXT_ANALYTICS_KEY")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| "TEXT_ANALYTICS_KEY environment variable is required".to_string())?;

        let language = vars("TEXT_ANALYTICS_LANGUAGE")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_LANGUAGE.to_string());

        let sentence_count = vars("TEXT_ANALYTICS_SENTENCE_COUNT")
            .unwrap_or_else(|| Self::DEFAULT_SENTENCE_COUNT.to_string())
            .parse::<u32>()
            .map_err(|_| "TEXT_ANALYTICS_SENTENCE_COUNT must be a valid number".to_string())?;
        if !(1..=Self::MAX_SENTENCE_COUNT).contains(&sentence_count) {
            return Err(format!(
                "TEXT_ANALYTICS_SENTENCE_COUNT must be between 1 and {}",
                Self::MAX_SENTENCE_COUNT
            ));
        }

        let poll_interval_ms = vars("TEXT_ANALYTICS_POLL_INTERVAL_MS")
            .unwrap_or_else(|| Self::DEFAULT_POLL_INTERVAL_MS.to_string())
            .parse::<u64>()
            .map_err(|_| "TEXT_ANALYTICS_POLL_INTERVAL_MS must be a valid number".to_string())?;

        Ok(Self {
            endpoint,
            api_key,
            language,
            sentence_count,
            poll_interval: Duration::from_millis(poll_interval_ms),
        })
    }
}

impl SummarizerConfig {
    pub fn from_vars(vars: Vars<'_>) -> Result<Self, String> {
        let strict_errors = match vars("SUMMARIZER_STRICT_ERRORS") {
            Some(v) => v
                .trim()
                .parse::<bool>()
                .map_err(|_| "SUMMARIZER_STRICT_ERRORS must be true or false".to_string())?,
            None => false,
        };

        Ok(Self { strict_errors })
    }
}
