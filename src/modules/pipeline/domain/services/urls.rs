//! URL composition for outbound records
//!
//! Media and player URLs are built from parsed components. `MediaUrls::fix`
//! only repairs values that were already stored with a doubled host prefix.

use reqwest::Url;

use crate::shared::errors::{AppError, AppResult};

pub const SCREENSHOT_SLOTS: usize = 4;

/// Resolves catalog media and player links against the configured hosts
#[derive(Debug, Clone)]
pub struct MediaUrls {
    site: Url,
    player_host: String,
    /// Host prefixes that string concatenation upstream may have doubled
    doubled_prefixes: Vec<String>,
}

impl MediaUrls {
    pub fn new(site: Url, player_host: &str) -> Self {
        let player_host = player_host.trim_end_matches('/').to_string();

        let mut doubled_prefixes = Vec::new();
        if let Some(host) = site.host_str() {
            let authority = match site.port() {
                Some(port) => format!("{}:{}", host, port),
                None => host.to_string(),
            };
            doubled_prefixes.push(format!("https://{}", authority));
            doubled_prefixes.push(format!("http://{}", authority));
        }
        if player_host.len() > 2 {
            doubled_prefixes.push(player_host.clone());
        }
        doubled_prefixes.dedup();

        Self {
            site,
            player_host,
            doubled_prefixes,
        }
    }

    /// Collapse a doubled host prefix (`https://hosthttps://host/x` -> `https://host/x`).
    /// Idempotent; `None` stays `None`.
    pub fn fix(&self, url: Option<&str>) -> Option<String> {
        url.map(|u| collapse_doubled(u, &self.doubled_prefixes))
    }

    /// Resolve a possibly relative media reference against the site root
    pub fn absolutize(&self, reference: Option<&str>) -> String {
        let Some(reference) = self.fix(reference).filter(|r| !r.is_empty()) else {
            return String::new();
        };

        if Url::parse(&reference).is_ok() {
            return reference;
        }
        if reference.starts_with("//") {
            return format!("{}:{}", self.site.scheme(), reference);
        }
        self.site
            .join(&reference)
            .map(|url| url.to_string())
            .unwrap_or(reference)
    }

    /// Player links come protocol-relative; bare paths get the player host
    pub fn player_url(&self, link: Option<&str>) -> String {
        let Some(link) = self.fix(link).filter(|l| !l.is_empty()) else {
            return String::new();
        };

        if link.starts_with("//") || Url::parse(&link).is_ok() {
            link
        } else if link.starts_with('/') {
            format!("{}{}", self.player_host, link)
        } else {
            format!("{}/{}", self.player_host, link)
        }
    }
}

fn collapse_doubled(url: &str, prefixes: &[String]) -> String {
    let mut fixed = url.to_string();
    loop {
        let before = fixed.len();
        for prefix in prefixes.iter().filter(|p| !p.is_empty()) {
            let doubled = format!("{prefix}{prefix}");
            while fixed.contains(&doubled) {
                fixed = fixed.replace(&doubled, prefix);
            }
        }
        // every replacement shortens the string
        if fixed.len() == before {
            return fixed;
        }
    }
}

/// Deterministic poster/screenshot locations in the asset bucket
#[derive(Debug, Clone)]
pub struct AssetUrls {
    base: Url,
}

impl AssetUrls {
    pub fn new(base: Url) -> AppResult<Self> {
        if base.cannot_be_a_base() {
            return Err(AppError::ConfigError(format!(
                "asset base URL {} cannot carry a path",
                base
            )));
        }
        Ok(Self { base })
    }

    pub fn poster(&self, anime_id: &str) -> String {
        self.asset(anime_id, "poster.jpeg")
    }

    pub fn screenshots(&self, anime_id: &str) -> Vec<String> {
        (1..=SCREENSHOT_SLOTS)
            .map(|slot| self.asset(anime_id, &format!("screenshot{}.jpg", slot)))
            .collect()
    }

    fn asset(&self, anime_id: &str, file: &str) -> String {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["anime", anime_id, file]);
        }
        url.to_string()
    }
}
