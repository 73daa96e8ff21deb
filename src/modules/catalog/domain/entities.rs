//! Catalog record as returned by the GraphQL `animes` query
//!
//! Fields the pipeline reads are modelled explicitly; everything else the
//! query returns is kept verbatim in `extra` so a checkpoint round-trip never
//! drops data.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    pub id: String,
    #[serde(default)]
    pub mal_id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub russian: Option<String>,
    #[serde(default)]
    pub license_name_ru: Option<String>,
    #[serde(default)]
    pub english: Option<String>,
    #[serde(default)]
    pub japanese: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub synonyms: Vec<String>,

    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub episodes: Option<i64>,
    #[serde(default)]
    pub episodes_aired: Option<i64>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub aired_on: Option<IncompleteDate>,
    #[serde(default)]
    pub released_on: Option<IncompleteDate>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub poster: Option<Poster>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub screenshots: Vec<Screenshot>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub videos: Vec<Video>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub fandubbers: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fansubbers: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub licensors: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub related: Vec<RelatedEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub external_links: Vec<ExternalLink>,

    #[serde(default)]
    pub description: Option<String>,

    /// Unmodelled fields (genres, studios, roles, stats, timestamps, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct IncompleteDate {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<i32>,
    #[serde(default)]
    pub day: Option<i32>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Poster {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub original_url: Option<String>,
    #[serde(default)]
    pub main_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Screenshot {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub original_url: Option<String>,
    #[serde(default)]
    pub x166_url: Option<String>,
    #[serde(default)]
    pub x332_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub player_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExternalLink {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// One entry of the `related` list; exactly one of `anime`/`manga` is set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RelatedEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub anime: Option<RelatedRef>,
    #[serde(default)]
    pub manga: Option<RelatedRef>,
    #[serde(default)]
    pub relation_kind: Option<String>,
    #[serde(default)]
    pub relation_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RelatedRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Anime,
    Manga,
}

/// Flattened view of a related entry: {targetId, targetKind, relationLabel}
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedTarget {
    pub target_id: String,
    pub target_kind: TargetKind,
    pub relation_label: String,
}

impl RelatedEntry {
    pub fn target(&self) -> Option<RelatedTarget> {
        let (target, target_kind) = match (&self.anime, &self.manga) {
            (Some(anime), _) => (anime, TargetKind::Anime),
            (None, Some(manga)) => (manga, TargetKind::Manga),
            (None, None) => return None,
        };
        if target.id.is_empty() {
            return None;
        }

        Some(RelatedTarget {
            target_id: target.id.clone(),
            target_kind,
            relation_label: self
                .relation_text
                .clone()
                .or_else(|| self.relation_kind.clone())
                .unwrap_or_default(),
        })
    }
}

/// Related record resolved through a second catalog lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelatedSummary {
    pub id: String,
    pub title: String,
    pub poster_url: Option<String>,
}

impl CatalogRecord {
    /// Localized title, falling back to the primary name
    pub fn display_title(&self) -> String {
        non_empty(&self.russian)
            .or_else(|| non_empty(&self.name))
            .unwrap_or_default()
            .to_string()
    }

    /// Related anime target IDs, de-duplicated, in first-seen order
    pub fn related_anime_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.related
            .iter()
            .filter_map(RelatedEntry::target)
            .filter(|target| target.target_kind == TargetKind::Anime)
            .map(|target| target.target_id)
            .filter(|id| seen.insert(id.clone()))
            .collect()
    }

    pub fn poster_original_url(&self) -> Option<&str> {
        self.poster
            .as_ref()
            .and_then(|p| p.original_url.as_deref())
            .filter(|url| !url.is_empty())
    }

    pub fn to_summary(&self) -> RelatedSummary {
        RelatedSummary {
            id: self.id.clone(),
            title: self.display_title(),
            poster_url: self.poster_original_url().map(str::to_string),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
