//! Boundary defaulting for sparse upstream records.
//!
//! The upstream API leaves most fields optional; rather than threading
//! presence checks through every consumer, absence is resolved exactly once
//! here. `normalize` is total: any input produces a valid record.

use std::collections::BTreeMap;

use super::types::{
    GovernmentInfo, NormalizedCountry, PLACEHOLDER_FLAG_URL, RawCountry,
};

/// Fills every optional field of a raw record with its documented default.
///
/// Present values pass through untouched; defaults apply only to absence:
/// capitals/states → `["N/A"]`, population → `0`, region/subregion →
/// `"Unknown"`, continents → `["Unknown"]`, currencies/languages → empty,
/// government leader → `"N/A"`, flag → the placeholder reference.
pub fn normalize(raw: &RawCountry) -> NormalizedCountry {
    let flag_url = raw
        .flags
        .as_ref()
        .and_then(|f| f.png.clone().or_else(|| f.svg.clone()))
        .unwrap_or_else(|| PLACEHOLDER_FLAG_URL.to_string());

    let currencies: BTreeMap<String, String> = raw
        .currencies
        .as_ref()
        .map(|map| {
            map.iter()
                .map(|(code, c)| (code.clone(), c.name.clone()))
                .collect()
        })
        .unwrap_or_default();

    let languages: BTreeMap<String, String> = raw
        .languages
        .as_ref()
        .map(|map| map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        .unwrap_or_default();

    NormalizedCountry {
        code: raw.cca3.clone().unwrap_or_else(|| "N/A".to_string()),
        common_name: raw.name.common.clone(),
        flag_url,
        capitals: raw
            .capital
            .clone()
            .unwrap_or_else(|| vec!["N/A".to_string()]),
        population: raw.population.unwrap_or(0),
        region: raw.region.clone().unwrap_or_else(|| "Unknown".to_string()),
        subregion: raw
            .subregion
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
        continents: raw
            .continents
            .clone()
            .unwrap_or_else(|| vec!["Unknown".to_string()]),
        currencies,
        languages,
        states: raw.states.clone().unwrap_or_else(|| vec!["N/A".to_string()]),
        government: GovernmentInfo {
            leader: raw
                .government
                .as_ref()
                .and_then(|g| g.leader.clone())
                .unwrap_or_else(|| "N/A".to_string()),
        },
    }
}
