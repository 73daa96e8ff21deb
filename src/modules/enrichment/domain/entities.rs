use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One player-source match for a catalog ID
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EnrichmentRecord {
    #[serde(default)]
    pub id: Option<String>,
    /// Player link, usually protocol-relative (`//kodik.info/seria/...`)
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub shikimori_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_season: Option<String>,
    #[serde(default)]
    pub material_data: Option<MaterialData>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MaterialData {
    #[serde(default, deserialize_with = "lenient_string")]
    pub minimal_age: Option<String>,
    #[serde(default)]
    pub countries: Option<Vec<String>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub anime_description: Option<String>,
    #[serde(default)]
    pub anime_genres: Option<Vec<String>>,
    #[serde(default)]
    pub anime_studios: Option<Vec<String>>,
    #[serde(default)]
    pub actors: Option<Vec<String>>,
    #[serde(default)]
    pub directors: Option<Vec<String>>,
}

impl EnrichmentRecord {
    pub fn material(&self) -> MaterialData {
        self.material_data.clone().unwrap_or_default()
    }
}

/// Accept a string or a non-zero number; anything else reads as absent
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    })
}
