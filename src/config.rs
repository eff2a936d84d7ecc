// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Backend configuration loaded from environment variables.
//!
//! Every value is resolved once at startup from an ordered list of candidate
//! variables. The first one that is set and non-empty wins.

use std::env;

/// Backend URL candidates, most specific first.
pub const URL_SOURCES: &[&str] = &["SUPABASE_URL", "EXPO_PUBLIC_SUPABASE_URL"];

/// Public (anon) key candidates.
pub const PUBLIC_KEY_SOURCES: &[KeySource] = &[
    KeySource::new("SUPABASE_ANON_KEY", KeyTier::Anon),
    KeySource::new("EXPO_PUBLIC_SUPABASE_ANON_KEY", KeyTier::Anon),
];

/// Privileged key candidates. The anon entries are a degraded fallback:
/// row-level security may hide rows and storage objects from them.
pub const PRIVILEGED_KEY_SOURCES: &[KeySource] = &[
    KeySource::new("SUPABASE_SERVICE_ROLE_KEY", KeyTier::ServiceRole),
    KeySource::new("SUPABASE_ANON_KEY", KeyTier::Anon),
    KeySource::new("EXPO_PUBLIC_SUPABASE_ANON_KEY", KeyTier::Anon),
];

const DEFAULT_THUMBNAIL_BUCKET: &str = "thumbnails";
const DEFAULT_SIGNED_URL_TTL_SECS: u64 = 3600;
/// Longest signed URL lifetime accepted from the environment (one year).
pub const MAX_SIGNED_URL_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Privilege level of the resolved API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTier {
    Anon,
    ServiceRole,
}

impl std::fmt::Display for KeyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyTier::Anon => write!(f, "anon"),
            KeyTier::ServiceRole => write!(f, "service_role"),
        }
    }
}

/// One candidate environment variable for the API key.
#[derive(Debug, Clone, Copy)]
pub struct KeySource {
    pub var: &'static str,
    pub tier: KeyTier,
}

impl KeySource {
    pub const fn new(var: &'static str, tier: KeyTier) -> Self {
        Self { var, tier }
    }
}

/// Backend configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Project URL (e.g. https://xyz.supabase.co), without trailing slash
    pub supabase_url: String,
    /// API key sent as `apikey` and bearer token
    pub api_key: String,
    /// Which kind of key was resolved
    pub key_tier: KeyTier,
    /// Variable the key was read from
    pub key_source: &'static str,
    /// Storage bucket holding video thumbnails
    pub thumbnail_bucket: String,
    /// Lifetime of generated signed URLs
    pub signed_url_ttl_secs: u64,
}

impl Config {
    /// Default config for testing only.
    pub fn test_default(supabase_url: &str) -> Self {
        Self {
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            api_key: "test-anon-key".to_string(),
            key_tier: KeyTier::Anon,
            key_source: "SUPABASE_ANON_KEY",
            thumbnail_bucket: DEFAULT_THUMBNAIL_BUCKET.to_string(),
            signed_url_ttl_secs: DEFAULT_SIGNED_URL_TTL_SECS,
        }
    }

    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env(key_sources: &[KeySource]) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(key_sources, |name| env::var(name).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(key_sources: &[KeySource], lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let supabase_url = URL_SOURCES
            .iter()
            .find_map(|name| present(*name))
            .ok_or_else(|| ConfigError::Missing(URL_SOURCES.join(" or ")))?;

        let (api_key, source) = key_sources
            .iter()
            .find_map(|source| present(source.var).map(|key| (key, *source)))
            .ok_or_else(|| {
                let names: Vec<&str> = key_sources.iter().map(|s| s.var).collect();
                ConfigError::Missing(names.join(" or "))
            })?;

        let signed_url_ttl_secs = match present("SIGNED_URL_TTL_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(ttl) if ttl > 0 && ttl <= MAX_SIGNED_URL_TTL_SECS => ttl,
                _ => return Err(ConfigError::Invalid("SIGNED_URL_TTL_SECS", raw)),
            },
            None => DEFAULT_SIGNED_URL_TTL_SECS,
        };

        Ok(Self {
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            api_key,
            key_tier: source.tier,
            key_source: source.var,
            thumbnail_bucket: present("THUMBNAIL_BUCKET")
                .unwrap_or_else(|| DEFAULT_THUMBNAIL_BUCKET.to_string()),
            signed_url_ttl_secs,
        })
    }

    /// Whether a privileged chain had to fall back to a public key.
    pub fn is_degraded(&self, requested: &[KeySource]) -> bool {
        let wanted_privileged = requested.iter().any(|s| s.tier == KeyTier::ServiceRole);
        wanted_privileged && self.key_tier == KeyTier::Anon
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
