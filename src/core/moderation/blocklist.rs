// Scam domain blocklist.
//
// In-memory set of normalized hostnames backed by a `BlocklistStore`.
// Every mutation rewrites the persisted list while the write lock is held,
// so the set and the backing list never disagree.

use async_trait::async_trait;
use regex::Regex;
use std::collections::HashSet;
use thiserror::Error;
use tokio::sync::RwLock;

const URL_PATTERN: &str = r"(?i)https?://[^\s<>]+";

#[derive(Debug, Error)]
pub enum BlocklistError {
    #[error("Not a valid domain: {0}")]
    InvalidDomain(String),

    #[error("Storage error: {0}")]
    Store(String),

    #[error("Invalid URL pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Persistence for the blocklist. Implementations store the full list.
#[async_trait]
pub trait BlocklistStore: Send + Sync {
    async fn load(&self) -> Result<Vec<String>, BlocklistError>;
    async fn save(&self, domains: &[String]) -> Result<(), BlocklistError>;
}

/// Reduce a domain or URL to the bare lowercase hostname used as blocklist key.
///
/// Strips scheme, userinfo, port, path, a leading `www.` and trailing dots.
/// Returns `None` when nothing host-like is left.
pub fn normalize_domain(input: &str) -> Option<String> {
    let lowered = input.trim().to_lowercase();
    let rest = lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"))
        .unwrap_or(&lowered);

    let authority = rest
        .split(|c: char| matches!(c, '/' | '?' | '#'))
        .next()
        .unwrap_or_default();
    let without_userinfo = authority.rsplit('@').next().unwrap_or_default();

    let host: String = without_userinfo
        .chars()
        .take_while(|c| c.is_alphanumeric() || matches!(c, '-' | '.' | '_'))
        .collect();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let host = host.trim_matches('.');

    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

pub struct DomainBlocklist<S: BlocklistStore> {
    store: S,
    domains: RwLock<HashSet<String>>,
    url_pattern: Regex,
}

impl<S: BlocklistStore> DomainBlocklist<S> {
    /// Load the persisted list, normalizing and de-duplicating entries.
    pub async fn load(store: S) -> Result<Self, BlocklistError> {
        let raw = store.load().await?;
        let domains: HashSet<String> = raw.iter().filter_map(|d| normalize_domain(d)).collect();

        tracing::info!(count = domains.len(), "Loaded scam domain blocklist");

        Ok(Self {
            store,
            domains: RwLock::new(domains),
            url_pattern: Regex::new(URL_PATTERN)?,
        })
    }

    /// Whether any http(s) link in `text` points at a blocklisted host.
    pub async fn contains_scam_link(&self, text: &str) -> bool {
        let domains = self.domains.read().await;
        if domains.is_empty() {
            return false;
        }

        self.url_pattern
            .find_iter(text)
            .filter_map(|m| normalize_domain(m.as_str()))
            .any(|host| domains.contains(&host))
    }

    /// Whether `domain` (normalized) is on the list.
    pub async fn contains(&self, domain: &str) -> bool {
        match normalize_domain(domain) {
            Some(domain) => self.domains.read().await.contains(&domain),
            None => false,
        }
    }

    /// Add a domain. Returns `false` if it was already present (nothing is written).
    pub async fn add(&self, domain: &str) -> Result<bool, BlocklistError> {
        let normalized =
            normalize_domain(domain).ok_or_else(|| BlocklistError::InvalidDomain(domain.into()))?;

        let mut domains = self.domains.write().await;
        if !domains.insert(normalized.clone()) {
            return Ok(false);
        }

        if let Err(e) = self.store.save(&sorted(&domains)).await {
            domains.remove(&normalized);
            return Err(e);
        }

        tracing::info!(domain = %normalized, "Added scam domain");
        Ok(true)
    }

    /// Remove a domain. Returns `false` if it was not on the list.
    pub async fn remove(&self, domain: &str) -> Result<bool, BlocklistError> {
        let normalized =
            normalize_domain(domain).ok_or_else(|| BlocklistError::InvalidDomain(domain.into()))?;

        let mut domains = self.domains.write().await;
        if !domains.remove(&normalized) {
            return Ok(false);
        }

        if let Err(e) = self.store.save(&sorted(&domains)).await {
            domains.insert(normalized);
            return Err(e);
        }

        tracing::info!(domain = %normalized, "Removed scam domain");
        Ok(true)
    }

    pub async fn len(&self) -> usize {
        self.domains.read().await.len()
    }

    /// Sorted snapshot of the list.
    #[cfg(test)]
    pub async fn domains(&self) -> Vec<String> {
        sorted(&*self.domains.read().await)
    }
}

fn sorted(domains: &HashSet<String>) -> Vec<String> {
    let mut list: Vec<String> = domains.iter().cloned().collect();
    list.sort();
    list
}
