use serde::{Deserialize, Serialize};

use crate::models::{null_as_default, BudgetRange, EntityId};

/// An unscored directory entry for a college. Independent of any request, so
/// it never carries similarity or confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntity {
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub programs: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub min_gpa: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub budget_range: BudgetRange,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub college_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub streams: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub facilities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub established: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CatalogEntity {
    pub fn new(id: impl Into<EntityId>, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            location: String::new(),
            programs: Vec::new(),
            min_gpa: 0.0,
            budget_range: BudgetRange::default(),
            college_type: None,
            website: None,
            streams: Vec::new(),
            facilities: Vec::new(),
            established: None,
            description: None,
        }
    }
}
