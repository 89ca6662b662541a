//! Autocomplete suggestion engine

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use troupe_common::Artist;

/// Maximum number of suggestions shown, applied after deduplication.
pub const SUGGESTION_LIMIT: usize = 5;

/// Which artist field a suggestion was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SuggestionKind {
    #[serde(rename = "artist/band")]
    ArtistBand,
    #[serde(rename = "member")]
    Member,
    #[serde(rename = "first album")]
    FirstAlbum,
    #[serde(rename = "creation date")]
    CreationDate,
    #[serde(rename = "location")]
    Location,
}

impl SuggestionKind {
    pub fn label(&self) -> &'static str {
        match self {
            SuggestionKind::ArtistBand => "artist/band",
            SuggestionKind::Member => "member",
            SuggestionKind::FirstAlbum => "first album",
            SuggestionKind::CreationDate => "creation date",
            SuggestionKind::Location => "location",
        }
    }
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One autocomplete candidate. Ephemeral: regenerated on every pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    /// Back-reference to the matching artist; absent for location
    /// suggestions, which commit by re-running the search instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<u32>,
}

/// Produce up to [`SUGGESTION_LIMIT`] suggestions for a query.
///
/// Emits one candidate per matching field per artist (name, each member,
/// first album, creation date), deduplicates by (text, kind) with the
/// first occurrence winning and insertion order preserved, then truncates.
pub fn suggest(query: &str, artists: &[Artist]) -> Vec<Suggestion> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    for artist in artists {
        if artist.name.to_lowercase().contains(&query) {
            results.push(Suggestion {
                text: artist.name.clone(),
                kind: SuggestionKind::ArtistBand,
                artist_id: Some(artist.id),
            });
        }
        for member in &artist.members {
            if member.to_lowercase().contains(&query) {
                results.push(Suggestion {
                    text: member.clone(),
                    kind: SuggestionKind::Member,
                    artist_id: Some(artist.id),
                });
            }
        }
        if artist.first_album.to_lowercase().contains(&query) {
            results.push(Suggestion {
                text: artist.first_album.clone(),
                kind: SuggestionKind::FirstAlbum,
                artist_id: Some(artist.id),
            });
        }
        let date = artist.creation_date.to_string();
        if date.to_lowercase().contains(&query) {
            results.push(Suggestion {
                text: date,
                kind: SuggestionKind::CreationDate,
                artist_id: Some(artist.id),
            });
        }
    }

    dedup_and_cap(results)
}

/// Append asynchronously-fetched location suggestions to an existing
/// panel, keeping the dedup and cap rules.
pub fn append_locations(suggestions: &mut Vec<Suggestion>, locations: Vec<String>) {
    for location in locations {
        suggestions.push(Suggestion {
            text: location,
            kind: SuggestionKind::Location,
            artist_id: None,
        });
    }
    let merged = dedup_and_cap(std::mem::take(suggestions));
    *suggestions = merged;
}

fn dedup_and_cap(candidates: Vec<Suggestion>) -> Vec<Suggestion> {
    let mut seen: HashSet<(String, SuggestionKind)> = HashSet::new();
    let mut unique = Vec::new();
    for candidate in candidates {
        if seen.insert((candidate.text.clone(), candidate.kind)) {
            unique.push(candidate);
        }
    }
    unique.truncate(SUGGESTION_LIMIT);
    unique
}
