use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Apify
    pub apify_token: String,
    pub request_delay_ms: u64,

    // Brand context
    pub brand_handle: String,
    pub competitor_handles: Vec<String>,

    // Analysis
    pub max_posts_per_analysis: u32,
    pub min_posts_for_analysis: usize,

    // Web server
    pub web_host: String,
    pub web_port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            apify_token: required_env("APIFY_API_TOKEN"),
            request_delay_ms: env::var("REQUEST_DELAY_MS")
                .unwrap_or_else(|_| "2000".to_string())
                .parse()
                .expect("REQUEST_DELAY_MS must be a number"),
            brand_handle: env::var("BRAND_INSTAGRAM_HANDLE")
                .unwrap_or_else(|_| "zigurat_cca".to_string()),
            competitor_handles: env::var("COMPETITOR_HANDLES")
                .unwrap_or_else(|_| "kunstmann_chile,tropera_brewing,ccu_artesanal".to_string())
                .split(',')
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
                .collect(),
            max_posts_per_analysis: env::var("MAX_POSTS_PER_ANALYSIS")
                .unwrap_or_else(|_| "50".to_string())
                .parse()
                .expect("MAX_POSTS_PER_ANALYSIS must be a number"),
            min_posts_for_analysis: env::var("MIN_POSTS_FOR_ANALYSIS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .expect("MIN_POSTS_FOR_ANALYSIS must be a number"),
            web_host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_port: env::var("WEB_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("WEB_PORT must be a number"),
        }
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
