//! View state and pure rendering
//!
//! `render()` maps the controller's [`ViewState`] to a [`Document`]
//! display tree with no I/O and no DOM-style mutation; the front end
//! decides how to draw it (the bundled binary prints `to_text()`).
//! A zero-match view renders the dedicated no-results placeholder, which
//! is a different node from an error banner.

use crate::keys::PanelState;
use crate::search::Suggestion;
use serde::Serialize;
use troupe_common::Artist;

/// Alert banner severity, mirroring the directory's alert styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    Success,
    Warning,
    Error,
}

/// Inline alert banner shown above the card list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    /// Whether the front end should offer a retry action
    pub retryable: bool,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: BannerKind::Success, message: message.into(), retryable: false }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { kind: BannerKind::Warning, message: message.into(), retryable: false }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: BannerKind::Error, message: message.into(), retryable: true }
    }
}

/// Everything the display surface is derived from. Owned by the
/// controller; the filtered list is always a subset of the last full
/// load (or a wholesale server-side result set).
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Raw query text as last typed
    pub query: String,
    /// Current filtered view
    pub artists: Vec<Artist>,
    /// Current suggestion panel contents
    pub suggestions: Vec<Suggestion>,
    /// Panel open/highlight state
    pub panel: PanelState,
    /// Inline alert, if any
    pub banner: Option<Banner>,
    /// Spinner message while a load or fallback search is in flight
    pub loading: Option<String>,
}

/// One rendered artist card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardNode {
    pub id: u32,
    pub name: String,
    pub members: Vec<String>,
    pub creation_date: String,
    pub first_album: String,
    pub image: String,
}

/// One rendered suggestion row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionNode {
    pub text: String,
    pub kind: String,
    pub highlighted: bool,
}

/// Main body of the view: cards, or the no-results placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Body {
    Cards(Vec<CardNode>),
    NoResults,
}

/// Display-tree description of the whole surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub banner: Option<Banner>,
    pub loading: Option<String>,
    pub body: Body,
    /// Empty when the panel is closed
    pub suggestions: Vec<SuggestionNode>,
}

/// Pure mapping from view state to display tree.
pub fn render(state: &ViewState) -> Document {
    let body = if state.artists.is_empty() {
        Body::NoResults
    } else {
        Body::Cards(
            state
                .artists
                .iter()
                .map(|artist| CardNode {
                    id: artist.id,
                    name: artist.name.clone(),
                    members: artist.members.clone(),
                    creation_date: artist.creation_date.to_string(),
                    first_album: if artist.first_album.is_empty() {
                        "Unknown".to_string()
                    } else {
                        artist.first_album.clone()
                    },
                    image: artist.image.clone(),
                })
                .collect(),
        )
    };

    let suggestions = if state.panel.is_open() {
        state
            .suggestions
            .iter()
            .enumerate()
            .map(|(i, s)| SuggestionNode {
                text: s.text.clone(),
                kind: s.kind.label().to_string(),
                highlighted: state.panel.selected() == Some(i),
            })
            .collect()
    } else {
        Vec::new()
    };

    Document {
        banner: state.banner.clone(),
        loading: state.loading.clone(),
        body,
        suggestions,
    }
}

impl Document {
    /// Plain-text rendering for the terminal front end.
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        if let Some(loading) = &self.loading {
            out.push_str(&format!("... {}\n", loading));
        }
        if let Some(banner) = &self.banner {
            out.push_str(&format!("[{:?}] {}", banner.kind, banner.message));
            if banner.retryable {
                out.push_str(" (type :retry)");
            }
            out.push('\n');
        }

        match &self.body {
            Body::NoResults => {
                out.push_str("No artists found matching your search.\n");
            }
            Body::Cards(cards) => {
                for card in cards {
                    out.push_str(&format!(
                        "#{} {} | formed {} | first album: {}\n",
                        card.id, card.name, card.creation_date, card.first_album
                    ));
                    if !card.members.is_empty() {
                        out.push_str(&format!("    members: {}\n", card.members.join(", ")));
                    }
                }
            }
        }

        if !self.suggestions.is_empty() {
            out.push_str("suggestions:\n");
            for suggestion in &self.suggestions {
                let marker = if suggestion.highlighted { ">" } else { " " };
                out.push_str(&format!(
                    "  {} {} - {}\n",
                    marker, suggestion.text, suggestion.kind
                ));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SuggestionKind;
    use troupe_common::CreationDate;

    fn queen() -> Artist {
        Artist {
            id: 1,
            name: "Queen".to_string(),
            members: vec!["Freddie Mercury".to_string()],
            creation_date: CreationDate::Year(1970),
            first_album: "Queen".to_string(),
            image: "q.jpg".to_string(),
            locations_url: None,
            dates_url: None,
            relations_url: None,
        }
    }

    #[test]
    fn test_zero_matches_renders_placeholder_not_banner() {
        let state = ViewState {
            query: "zzz".to_string(),
            ..Default::default()
        };
        let doc = render(&state);
        assert_eq!(doc.body, Body::NoResults);
        assert!(doc.banner.is_none());
    }

    #[test]
    fn test_error_banner_is_distinct_from_placeholder() {
        let state = ViewState {
            banner: Some(Banner::error("Unable to fetch data—try again?")),
            ..Default::default()
        };
        let doc = render(&state);
        assert!(matches!(doc.banner, Some(Banner { kind: BannerKind::Error, .. })));
        assert!(doc.banner.as_ref().unwrap().retryable);
    }

    #[test]
    fn test_cards_carry_artist_fields() {
        let state = ViewState {
            artists: vec![queen()],
            ..Default::default()
        };
        let doc = render(&state);
        match doc.body {
            Body::Cards(cards) => {
                assert_eq!(cards.len(), 1);
                assert_eq!(cards[0].name, "Queen");
                assert_eq!(cards[0].creation_date, "1970");
                assert_eq!(cards[0].members, vec!["Freddie Mercury"]);
            }
            Body::NoResults => panic!("expected cards"),
        }
    }

    #[test]
    fn test_missing_first_album_renders_unknown() {
        let mut artist = queen();
        artist.first_album = String::new();
        let state = ViewState {
            artists: vec![artist],
            ..Default::default()
        };
        match render(&state).body {
            Body::Cards(cards) => assert_eq!(cards[0].first_album, "Unknown"),
            Body::NoResults => panic!("expected cards"),
        }
    }

    #[test]
    fn test_suggestions_rendered_only_while_open() {
        let mut state = ViewState {
            artists: vec![queen()],
            suggestions: vec![Suggestion {
                text: "Queen".to_string(),
                kind: SuggestionKind::ArtistBand,
                artist_id: Some(1),
            }],
            ..Default::default()
        };
        assert!(render(&state).suggestions.is_empty());

        state.panel.open();
        state.panel.arrow_down(1);
        let doc = render(&state);
        assert_eq!(doc.suggestions.len(), 1);
        assert!(doc.suggestions[0].highlighted);
    }
}
