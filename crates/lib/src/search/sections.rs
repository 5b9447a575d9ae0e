//! Section list for the search screen: modifiers, recent searches, results.

use crate::store::{RecentSearch, RequestStatus};

pub const SECTION_HEIGHT: u32 = 20;
pub const RECENT_LABEL_HEIGHT: u32 = 42;
pub const RECENT_SEPARATOR_HEIGHT: u32 = 3;
pub const MODIFIER_LABEL_HEIGHT: u32 = 58;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKey {
    Modifiers,
    Recent,
    Results,
}

/// A search term prefix the user can insert, e.g. `from:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modifier {
    /// Text inserted into the search box.
    pub value: &'static str,
    /// Label, e.g. `from:username`.
    pub modifier: String,
    pub description: String,
}

/// Stand-in row shown in the results section instead of posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Searching,
    NoResults,
    Failure,
}

impl Placeholder {
    pub fn id(&self) -> &'static str {
        match self {
            Placeholder::Searching => "searching",
            Placeholder::NoResults => "no results",
            Placeholder::Failure => "failure",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchItem {
    Modifier(Modifier),
    Recent(RecentSearch),
    Post(String),
    Placeholder(Placeholder),
}

impl SearchItem {
    /// Stable list key.
    pub fn key(&self) -> String {
        match self {
            SearchItem::Modifier(m) => format!("modifier-{}", m.value),
            SearchItem::Recent(r) => format!("recent-{}", r.terms),
            SearchItem::Post(id) => id.clone(),
            SearchItem::Placeholder(p) => p.id().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub key: SectionKey,
    /// Header text; empty means no header.
    pub title: String,
    pub items: Vec<SearchItem>,
}

pub fn modifiers() -> Vec<Modifier> {
    vec![
        Modifier {
            value: "from:",
            modifier: "from:username".to_string(),
            description: "to find posts from specific users".to_string(),
        },
        Modifier {
            value: "in:",
            modifier: "in:channel-name".to_string(),
            description: "to find posts in specific channels".to_string(),
        },
    ]
}

/// Sections to show for the current search input and request status.
pub fn build_sections(
    recent: &[RecentSearch],
    status: RequestStatus,
    post_ids: &[String],
    value: &str,
) -> Vec<Section> {
    let mut sections = vec![Section {
        key: SectionKey::Modifiers,
        title: String::new(),
        items: modifiers().into_iter().map(SearchItem::Modifier).collect(),
    }];

    if !recent.is_empty() {
        sections.push(Section {
            key: SectionKey::Recent,
            title: "Recent Searches".to_string(),
            items: recent.iter().cloned().map(SearchItem::Recent).collect(),
        });
    }

    let results = match status {
        RequestStatus::Started => Some(vec![SearchItem::Placeholder(Placeholder::Searching)]),
        RequestStatus::Success if !post_ids.is_empty() => {
            Some(post_ids.iter().cloned().map(SearchItem::Post).collect())
        }
        RequestStatus::Success if !value.is_empty() => {
            Some(vec![SearchItem::Placeholder(Placeholder::NoResults)])
        }
        RequestStatus::Failure => Some(vec![SearchItem::Placeholder(Placeholder::Failure)]),
        _ => None,
    };

    if let Some(items) = results {
        sections.push(Section {
            key: SectionKey::Results,
            title: "Search Results".to_string(),
            items,
        });
    }

    sections
}

/// Insert a modifier into the search box text.
pub fn apply_modifier(value: &str, modifier: &str) -> String {
    if value.is_empty() {
        modifier.to_string()
    } else if value.ends_with(' ') {
        format!("{}{}", value, modifier)
    } else {
        format!("{} {}", value, modifier)
    }
}

/// Offset of the results header: below the modifiers and `recent_len` recent searches.
pub fn results_scroll_offset(recent_len: usize) -> u32 {
    let n = recent_len as u32;
    SECTION_HEIGHT
        + 2 * MODIFIER_LABEL_HEIGHT
        + n * RECENT_LABEL_HEIGHT
        + (n + 1) * RECENT_SEPARATOR_HEIGHT
}

pub fn should_scroll_to_results(prev: RequestStatus, status: RequestStatus) -> bool {
    prev != status && matches!(status, RequestStatus::Success | RequestStatus::Started)
}
