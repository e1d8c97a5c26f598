//! Application configuration for ContentLink.
//!
//! User config lives at `~/.contentlink/contentlink.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ContentLinkError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "contentlink.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".contentlink";

// ---------------------------------------------------------------------------
// Config structs (matching contentlink.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Link resolution tuning.
    #[serde(default)]
    pub resolver: ResolverSection,

    /// Backend endpoints.
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// Blog endpoints used to qualify article URLs with a system authority.
    #[serde(default)]
    pub blogs: Vec<BlogEndpoint>,
}

/// `[resolver]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverSection {
    /// Maximum number of candidate links resolved per body.
    #[serde(default = "default_max_links")]
    pub max_links: usize,

    /// Number of candidates resolved concurrently.
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,

    /// Maximum distinct URLs visited while following one redirect chain.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// The publisher's primary domain (article and content URLs live under it).
    #[serde(default = "default_publisher_domain")]
    pub publisher_domain: String,

    /// Cookie sent on probes to the publisher domain (`name=value`).
    #[serde(default = "default_routing_cookie")]
    pub routing_cookie: String,

    /// Prefix stripped from content ids when building content references.
    #[serde(default = "default_thing_uri_prefix")]
    pub thing_uri_prefix: String,

    /// URL shortener patterns (regexes matched against the whole href).
    #[serde(default = "default_shortener_patterns")]
    pub shortener_patterns: Vec<String>,
}

impl Default for ResolverSection {
    fn default() -> Self {
        Self {
            max_links: default_max_links(),
            pool_size: default_pool_size(),
            max_redirects: default_max_redirects(),
            publisher_domain: default_publisher_domain(),
            routing_cookie: default_routing_cookie(),
            thing_uri_prefix: default_thing_uri_prefix(),
            shortener_patterns: default_shortener_patterns(),
        }
    }
}

fn default_max_links() -> usize {
    50
}
fn default_pool_size() -> usize {
    8
}
fn default_max_redirects() -> usize {
    10
}
fn default_publisher_domain() -> String {
    "ft.com".into()
}
fn default_routing_cookie() -> String {
    "FT_SITE=NEXT".into()
}
fn default_thing_uri_prefix() -> String {
    "http://www.ft.com/thing/".into()
}
fn default_shortener_patterns() -> Vec<String> {
    vec![
        r"https?://on\.ft\.com/.*".into(),
        r"https?://bit\.ly/.*".into(),
        r"https?://t\.co/.*".into(),
    ]
}

/// `[endpoints]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// Base URI of the document store (the `/content-query` path is appended).
    #[serde(default = "default_document_store_base_uri")]
    pub document_store_base_uri: String,

    /// `Host` header sent to the document store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_store_host: Option<String>,

    /// Base URI of the content read endpoint (`/{uuid}` is appended).
    #[serde(default = "default_content_read_base_uri")]
    pub content_read_base_uri: String,

    /// `Host` header sent to the content read endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_read_host: Option<String>,

    /// Timeout applied to every outbound request.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            document_store_base_uri: default_document_store_base_uri(),
            document_store_host: None,
            content_read_base_uri: default_content_read_base_uri(),
            content_read_host: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_document_store_base_uri() -> String {
    "http://localhost:14180".into()
}
fn default_content_read_base_uri() -> String {
    "http://localhost:14180/content".into()
}
fn default_timeout_ms() -> u64 {
    5000
}

/// `[[blogs]]` entry: maps a blog host to its originating system id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogEndpoint {
    /// Host plus optional path prefix, e.g. `blogs.ft.com/the-world`.
    pub host: String,
    /// System id suffix, e.g. `FT-LABS-WP-1-24`.
    pub id: String,
}

// ---------------------------------------------------------------------------
// Resolver config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime resolver configuration, merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Maximum number of candidate links resolved per body.
    pub max_links: usize,
    /// Number of candidates resolved concurrently.
    pub pool_size: usize,
    /// Maximum distinct URLs visited per redirect chain.
    pub max_redirects: usize,
    /// The publisher's primary domain.
    pub publisher_domain: String,
    /// Cookie sent on probes to the publisher domain.
    pub routing_cookie: Option<String>,
    /// Prefix stripped from content ids.
    pub thing_uri_prefix: String,
    /// URL shortener regexes.
    pub shortener_patterns: Vec<String>,
    /// Document store base URI.
    pub document_store_base_uri: String,
    /// Document store `Host` override.
    pub document_store_host: Option<String>,
    /// Content read base URI.
    pub content_read_base_uri: String,
    /// Content read `Host` override.
    pub content_read_host: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl From<&AppConfig> for ResolverConfig {
    fn from(config: &AppConfig) -> Self {
        let routing_cookie = Some(config.resolver.routing_cookie.clone())
            .filter(|cookie| !cookie.trim().is_empty());

        Self {
            max_links: config.resolver.max_links,
            pool_size: config.resolver.pool_size,
            max_redirects: config.resolver.max_redirects,
            publisher_domain: config.resolver.publisher_domain.clone(),
            routing_cookie,
            thing_uri_prefix: config.resolver.thing_uri_prefix.clone(),
            shortener_patterns: config.resolver.shortener_patterns.clone(),
            document_store_base_uri: config.endpoints.document_store_base_uri.clone(),
            document_store_host: config.endpoints.document_store_host.clone(),
            content_read_base_uri: config.endpoints.content_read_base_uri.clone(),
            content_read_host: config.endpoints.content_read_host.clone(),
            timeout: Duration::from_millis(config.endpoints.timeout_ms),
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl ResolverConfig {
    /// Reject settings the orchestrator cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.pool_size == 0 {
            return Err(ContentLinkError::config("pool_size must be at least 1"));
        }
        if self.max_redirects == 0 {
            return Err(ContentLinkError::config("max_redirects must be at least 1"));
        }
        if self.publisher_domain.trim().is_empty() {
            return Err(ContentLinkError::config("publisher_domain must not be empty"));
        }
        for pattern in &self.shortener_patterns {
            regex::Regex::new(pattern).map_err(|e| {
                ContentLinkError::config(format!("invalid shortener pattern {pattern:?}: {e}"))
            })?;
        }
        for uri in [&self.document_store_base_uri, &self.content_read_base_uri] {
            url::Url::parse(uri)
                .map_err(|e| ContentLinkError::config(format!("invalid endpoint {uri:?}: {e}")))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.contentlink/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ContentLinkError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.contentlink/contentlink.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ContentLinkError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        ContentLinkError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ContentLinkError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| ContentLinkError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ContentLinkError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
