use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::modules::catalog::domain::CatalogRecord;

#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Serialize)]
pub struct AnimesVariables {
    pub ids: String,
}

/// GraphQL envelope: either `errors` or `data` (or, oddly, neither)
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnimesData {
    #[serde(default)]
    pub animes: Option<Vec<CatalogRecord>>,
}
