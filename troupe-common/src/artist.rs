//! Artist entity model
//!
//! One canonical record shape for the whole client. The backend is known
//! to serve two JSON spellings of the same record (`{id, name, ...}` and a
//! capitalized `{ID, Name, Image, CreationDate}` variant); both normalize
//! to [`Artist`] at the deserialization boundary via serde aliases so no
//! downstream code ever sees the variance.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Creation date as served by the backend: a bare year in most records,
/// a free-form string in a few legacy ones. The filter engine matches on
/// the string form either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreationDate {
    Year(i64),
    Text(String),
}

impl fmt::Display for CreationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreationDate::Year(y) => write!(f, "{}", y),
            CreationDate::Text(s) => write!(f, "{}", s),
        }
    }
}

impl Default for CreationDate {
    fn default() -> Self {
        CreationDate::Year(0)
    }
}

impl From<i64> for CreationDate {
    fn from(year: i64) -> Self {
        CreationDate::Year(year)
    }
}

/// One artist/band record in the directory. Immutable once loaded; the
/// loader owns the full list and replaces it wholesale on refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(alias = "ID")]
    pub id: u32,

    #[serde(alias = "Name")]
    pub name: String,

    #[serde(default, alias = "Members")]
    pub members: Vec<String>,

    #[serde(rename = "creationDate", alias = "CreationDate", default)]
    pub creation_date: CreationDate,

    #[serde(rename = "firstAlbum", alias = "FirstAlbum", default)]
    pub first_album: String,

    #[serde(default, alias = "Image")]
    pub image: String,

    /// URL of the locations record for this artist (upstream relation)
    #[serde(rename = "locations", alias = "LocationsURL", default,
            skip_serializing_if = "Option::is_none")]
    pub locations_url: Option<String>,

    /// URL of the concert dates record for this artist
    #[serde(rename = "concertDates", alias = "DatesURL", default,
            skip_serializing_if = "Option::is_none")]
    pub dates_url: Option<String>,

    /// URL of the date-location relations record for this artist
    #[serde(rename = "relations", alias = "RelationsURL", default,
            skip_serializing_if = "Option::is_none")]
    pub relations_url: Option<String>,
}
