//! Destination schema
//!
//! Field names are the destination's column names. Everything except `score`
//! always carries a value; `score` is `null` for unrated titles.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_QUALITY: &str = "HD";
pub const DEFAULT_MINIMAL_AGE: &str = "16";
pub const DEFAULT_COUNTRIES: &str = "Япония";
pub const DEFAULT_DESCRIPTION: &str = "Нет описания";
pub const DEFAULT_SEASON: &str = "1";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OutboundRecord {
    pub id: String,
    pub licensenameru: bool,
    pub name: String,
    pub russian: String,
    pub japanese: String,
    pub quality: String,
    pub poster: String,
    pub kind: String,
    pub score: Option<String>,
    pub status: String,
    pub episodes: i64,
    pub duration: i64,
    pub season: String,
    pub released: String,
    pub minimal_age: String,
    pub countries: String,
    pub description: String,
    pub actors: Vec<NameEntry>,
    pub studios: Vec<NameEntry>,
    pub directors: Vec<NameEntry>,
    pub genres: Vec<NameEntry>,
    pub externallinks: Vec<ExternalLinkEntry>,
    pub screenshots: Vec<UrlEntry>,
    pub opening: Vec<UrlEntry>,
    pub trailer: Vec<UrlEntry>,
    pub associated: Vec<AssociatedEntry>,
    pub list: Vec<Value>,
    pub alternative_player: String,
    pub fandubbers: String,
}

/// `{ "name": ... }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NameEntry {
    pub name: String,
}

impl NameEntry {
    pub fn list(names: Option<&[String]>) -> Vec<NameEntry> {
        names
            .unwrap_or_default()
            .iter()
            .map(|name| NameEntry { name: name.clone() })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UrlEntry {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExternalLinkEntry {
    pub site: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssociatedEntry {
    pub id: String,
    pub title: String,
    pub poster: String,
}
