use common::ResolutionPolicy;
use log::Level;
use web_sys::window;

const STORAGE_PREFIX: &str = "stockpredict_";

/// Global application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Gateway host (e.g., "localhost" or "api.example.com")
    pub api_host: String,

    /// Gateway port (e.g., 8081)
    pub api_port: u16,

    /// Path under which the prediction routes live (e.g., "/api/stocks")
    pub api_path: String,

    /// Use HTTPS for API requests
    pub api_use_https: bool,

    /// Default log level for the application
    pub log_level: Level,

    /// Enable debug mode
    pub debug_mode: bool,

    /// How responses of superseded requests are treated
    pub resolution_policy: ResolutionPolicy,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_host: "localhost".to_string(),
            api_port: 8081,
            api_path: "/api/stocks".to_string(),
            api_use_https: false,
            log_level: Level::Info,
            debug_mode: false,
            resolution_policy: ResolutionPolicy::default(),
        }
    }
}

fn storage_key(name: &str) -> String {
    format!("{}{}", STORAGE_PREFIX, name)
}

fn parse_log_level(value: &str) -> Option<Level> {
    match value.to_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

impl AppSettings {
    /// Create settings from environment/window location
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        let Some(window) = window() else {
            return settings;
        };

        if let Ok(hostname) = window.location().hostname() {
            settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";

            // In development, use more verbose logging
            if settings.debug_mode {
                settings.log_level = Level::Debug;
            }
        }

        // Overrides saved in localStorage
        if let Ok(Some(storage)) = window.local_storage() {
            let read = |name: &str| storage.get_item(&storage_key(name)).ok().flatten();

            if let Some(api_host) = read("api_host") {
                settings.api_host = api_host;
            }
            if let Some(port_val) = read("api_port").and_then(|p| p.parse::<u16>().ok()) {
                settings.api_port = port_val;
            }
            if let Some(api_path) = read("api_path") {
                settings.api_path = api_path;
            }
            if let Some(use_https) = read("api_use_https") {
                settings.api_use_https = use_https.to_lowercase() == "true";
            }
            if let Some(level) = read("log_level").as_deref().and_then(parse_log_level) {
                settings.log_level = level;
            }
            if let Some(policy) = read("resolution_policy") {
                match policy.parse::<ResolutionPolicy>() {
                    Ok(policy) => settings.resolution_policy = policy,
                    Err(e) => log::warn!("Ignoring stored resolution policy: {}", e),
                }
            }
        }

        settings
    }

    /// Get the base API URL (protocol + host + port + path)
    pub fn api_base_url(&self) -> String {
        let protocol = if self.api_use_https { "https" } else { "http" };
        format!(
            "{}://{}:{}{}",
            protocol,
            self.api_host,
            self.api_port,
            self.api_path.trim_end_matches('/')
        )
    }

    /// Get the full API URL for an endpoint
    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base_url(), endpoint)
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::default());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
