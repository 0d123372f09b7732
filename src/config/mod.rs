//! Configuration management

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use anyhow::Result;

/// Names the theme controller uses to talk to the page.
///
/// Shared between server and client: the server embeds it in every page as
/// JSON and the client reads it back before building its adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// localStorage key holding "light" or "dark"
    pub storage_key: String,
    /// Class toggled on <html> while the dark theme is active
    pub dark_class: String,
    /// DOM event dispatched on `document` after every applied change
    pub event_name: String,
    /// Media query reporting the OS preference
    pub media_query: String,
    /// DOM event a host fires after swapping page content in place
    pub navigation_event: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            dark_class: "dark".to_string(),
            event_name: "theme-changed".to_string(),
            media_query: "(prefers-color-scheme: dark)".to_string(),
            navigation_event: "site:navigated".to_string(),
        }
    }
}

/// Element id of the embedded JSON theme config
pub const THEME_CONFIG_ELEMENT_ID: &str = "theme-config";

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the built client bundle (served as a fallback)
    #[serde(default)]
    pub assets_dir: Option<std::path::PathBuf>,

    #[serde(default)]
    pub theme: ThemeConfig,
}

fn default_port() -> u16 {
    8080
}

/// Get config directory (XDG_CONFIG_HOME or platform default)
#[cfg(feature = "server")]
pub fn get_config_dir() -> std::path::PathBuf {
    if let Ok(dir) = std::env::var("SITE_CONFIG_DIR") {
        return std::path::PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return std::path::PathBuf::from(home).join("Library/Application Support/site-frontend");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return std::path::PathBuf::from(xdg).join("site-frontend");
        }
        if let Ok(home) = std::env::var("HOME") {
            return std::path::PathBuf::from(home).join(".config/site-frontend");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return std::path::PathBuf::from(appdata).join("site-frontend");
        }
    }

    // Fallback to current directory
    std::path::PathBuf::from(".")
}

#[cfg(feature = "server")]
pub fn load_config() -> Result<Config> {
    let config_dir = get_config_dir();

    let mut builder = ::config::Config::builder()
        // Start with defaults
        .set_default("port", default_port() as i64)?
        // Load from config file if it exists
        .add_source(
            ::config::File::with_name(&config_dir.join("config").to_string_lossy()).required(false),
        )
        // Override with environment variables (SITE_PORT, SITE_THEME__STORAGE_KEY, etc.)
        .add_source(
            ::config::Environment::with_prefix("SITE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    // Explicit precedence: SITE_PORT > PORT > config > default
    if let Ok(port) = std::env::var("SITE_PORT") {
        // The SITE_ env source already picked this up as a string
        let port_num = port.parse::<u16>().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid SITE_PORT {:?}, using {}", port, default_port());
            default_port()
        });
        builder = builder.set_override("port", port_num as i64)?;
    } else if let Ok(port) = std::env::var("PORT") {
        // Legacy PORT fallback (container platforms)
        if let Ok(port_num) = port.parse::<u16>() {
            builder = builder.set_override("port", port_num as i64)?;
        }
    }

    let config = builder.build()?;

    Ok(config.try_deserialize()?)
}
