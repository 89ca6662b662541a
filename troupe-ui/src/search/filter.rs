//! Substring filter over the artist list

use troupe_common::Artist;

/// Filter artists by a free-text query.
///
/// Case-insensitive substring match against the artist name, each member
/// name, the first album, and the string form of the creation date; an
/// artist matches if ANY field matches. An empty or whitespace-only query
/// returns the full list unchanged. Original order is preserved and the
/// result is always a subset of the input.
pub fn filter(query: &str, artists: &[Artist]) -> Vec<Artist> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return artists.to_vec();
    }

    artists
        .iter()
        .filter(|artist| matches_query(artist, &query))
        .cloned()
        .collect()
}

fn matches_query(artist: &Artist, query_lower: &str) -> bool {
    artist.name.to_lowercase().contains(query_lower)
        || artist
            .members
            .iter()
            .any(|member| member.to_lowercase().contains(query_lower))
        || artist.first_album.to_lowercase().contains(query_lower)
        || artist
            .creation_date
            .to_string()
            .to_lowercase()
            .contains(query_lower)
}
