use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Flag reference used whenever the upstream record carries no usable image.
pub const PLACEHOLDER_FLAG_URL: &str = "https://via.placeholder.com/150";

/// Country record as the restcountries v3.1 API ships it.
///
/// Only `name.common` is guaranteed; every other field may be missing from
/// the payload. Consumers that want a total shape go through
/// [`normalize`](crate::countries::normalize::normalize).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct RawCountry {
    /// Three-letter country code (`cca3`), the stable key when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cca3: Option<String>,
    pub name: CountryName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<Flags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subregion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continents: Option<Vec<String>>,
    /// Currency code → display record. Missing and `{}` are both valid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currencies: Option<HashMap<String, Currency>>,
    /// Language code → display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<HashMap<String, String>>,
    /// Rarely populated upstream; best-effort.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states: Option<Vec<String>>,
    /// Rarely populated upstream; best-effort.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub government: Option<Government>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CountryName {
    pub common: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Flags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub png: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Currency {
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Government {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader: Option<String>,
}

/// Total country record: every field is concrete, no presence checks needed
/// downstream. Produced exclusively by the normalizer.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NormalizedCountry {
    pub code: String,
    pub common_name: String,
    pub flag_url: String,
    pub capitals: Vec<String>,
    pub population: u64,
    pub region: String,
    pub subregion: String,
    pub continents: Vec<String>,
    /// Currency code → display name, ordered for stable rendering.
    pub currencies: BTreeMap<String, String>,
    /// Language code → display name, ordered for stable rendering.
    pub languages: BTreeMap<String, String>,
    pub states: Vec<String>,
    pub government: GovernmentInfo,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GovernmentInfo {
    pub leader: String,
}

/// The minimum projection a list row needs: display name, flag reference,
/// and a stable key for selection.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRow {
    pub name: String,
    pub flag: String,
    pub key: String,
}

impl From<&RawCountry> for CountryRow {
    fn from(raw: &RawCountry) -> Self {
        // List rows favor the vector flag; the key falls back to the common
        // name, which is the one field guaranteed present.
        let flag = raw
            .flags
            .as_ref()
            .and_then(|f| f.svg.clone().or_else(|| f.png.clone()))
            .unwrap_or_else(|| PLACEHOLDER_FLAG_URL.to_string());
        CountryRow {
            name: raw.name.common.clone(),
            flag,
            key: raw.cca3.clone().unwrap_or_else(|| raw.name.common.clone()),
        }
    }
}

/// Access to the display name, implemented by both record shapes so the
/// filter can operate on raw or normalized lists alike.
pub trait CommonName {
    fn common_name(&self) -> &str;
}

impl CommonName for RawCountry {
    fn common_name(&self) -> &str {
        &self.name.common
    }
}

impl CommonName for NormalizedCountry {
    fn common_name(&self) -> &str {
        &self.common_name
    }
}
