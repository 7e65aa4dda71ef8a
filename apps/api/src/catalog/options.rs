use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::catalog::CatalogEntity;
use crate::models::form::{ANY_LOCATION, BUDGETS, STREAMS};

/// Dropdown option lists for the student form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormOptions {
    pub programs: Vec<String>,
    /// Starts with the "Any" sentinel, then catalog locations sorted.
    pub locations: Vec<String>,
    pub streams: Vec<String>,
    pub budgets: Vec<String>,
}

pub fn form_options(catalog: &[CatalogEntity]) -> FormOptions {
    let programs: BTreeSet<&str> = catalog
        .iter()
        .flat_map(|c| c.programs.iter().map(String::as_str))
        .filter(|p| !p.trim().is_empty())
        .collect();

    let locations: BTreeSet<&str> = catalog
        .iter()
        .map(|c| c.location.as_str())
        .filter(|l| !l.trim().is_empty())
        .collect();

    FormOptions {
        programs: programs.into_iter().map(str::to_string).collect(),
        locations: std::iter::once(ANY_LOCATION)
            .chain(locations)
            .map(str::to_string)
            .collect(),
        streams: STREAMS.iter().map(|s| s.to_string()).collect(),
        budgets: BUDGETS.iter().map(|s| s.to_string()).collect(),
    }
}
