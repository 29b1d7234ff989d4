//! Crisis-resource lookup results.

use serde::{Deserialize, Serialize};

use super::{CrisisResource, Extra};

/// Resources for a country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignpostResponse {
    pub country: String,
    #[serde(default)]
    pub resources: Vec<CrisisResource>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A resource with its position in a smart ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResource {
    /// 1-based rank. Equal ranks are ties.
    pub rank: u32,
    pub resource: CrisisResource,
    #[serde(default)]
    pub why: Option<String>,
}

/// Resources ranked against a free-text query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartSignpostResponse {
    pub country: String,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub ranked: Vec<RankedResource>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl SmartSignpostResponse {
    /// Sorts the ranking and checks that it is dense.
    ///
    /// Ranks must start at 1 and the distinct values must be consecutive;
    /// ties are allowed. Returns a description of the first violation.
    pub(crate) fn normalize_ranking(&mut self) -> Result<(), String> {
        self.ranked.sort_by_key(|r| r.rank);

        let mut previous: u32 = 0;
        for item in &self.ranked {
            let tie = previous > 0 && item.rank == previous;
            if !tie && item.rank != previous.saturating_add(1) {
                return Err(if previous == 0 {
                    format!("ranking starts at rank {} instead of 1", item.rank)
                } else {
                    format!(
                        "ranking has a gap: rank {} follows rank {previous}",
                        item.rank
                    )
                });
            }
            previous = item.rank;
        }
        Ok(())
    }

    /// Resources sharing the best rank.
    pub fn top(&self) -> impl Iterator<Item = &CrisisResource> {
        self.ranked
            .iter()
            .take_while(|r| r.rank == 1)
            .map(|r| &r.resource)
    }
}

/// A country the service has resources for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code.
    pub code: String,
    pub name: String,
}

/// Countries with resource coverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryList {
    pub countries: Vec<Country>,
}

/// Country inferred from the caller's network location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedCountry {
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
}
