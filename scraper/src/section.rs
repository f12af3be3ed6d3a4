//! Locating the ranking list that belongs to a heading.

use crate::dom::{normalize_text, DomElement};
use crate::entries::has_entries;
use crate::error::NotFound;

/// Heading label of the weekly word-of-mouth ranking
pub const RANKING_HEADING: &str = "一周口碑榜";

/// Douban's id for the word-of-mouth list on older layouts
pub const KNOWN_LIST_ID: &str = "listCont2";

const RANKING_LIST_CLASS: &str = "content";

const SIBLING_WINDOW: usize = 5;
const FOLLOWING_WINDOW: usize = 40;

/// Ways of finding the list once the heading is known, tried in [`Strategy::ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// A list among the heading's next few element siblings
    NextSibling,
    /// A list inside the heading's parent that comes after the heading,
    /// preferring `ul.content`
    ParentSection,
    /// The first list among the elements that follow the heading
    FollowingWindow,
    /// The list with Douban's known id, anywhere in the page
    KnownListId,
}

impl Strategy {
    pub const ORDER: [Strategy; 4] = [
        Strategy::NextSibling,
        Strategy::ParentSection,
        Strategy::FollowingWindow,
        Strategy::KnownListId,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::NextSibling => "next_sibling",
            Strategy::ParentSection => "parent_section",
            Strategy::FollowingWindow => "following_window",
            Strategy::KnownListId => "known_list_id",
        }
    }

    fn find<E: DomElement>(self, root: E, heading: E) -> Option<E> {
        match self {
            Strategy::NextSibling => heading
                .next_sibling_elements()
                .into_iter()
                .take(SIBLING_WINDOW)
                .find(|e| e.is_list()),
            Strategy::ParentSection => {
                let parent = heading.parent_element()?;
                let after_heading = heading.following_elements();
                let candidates: Vec<E> = parent
                    .descendant_elements()
                    .into_iter()
                    .filter(|e| e.is_list() && after_heading.contains(e))
                    .collect();
                // Douban marks ranking lists with `content`
                candidates
                    .iter()
                    .copied()
                    .find(|e| e.has_class(RANKING_LIST_CLASS))
                    .or_else(|| candidates.first().copied())
            }
            Strategy::FollowingWindow => heading
                .following_elements()
                .into_iter()
                .take(FOLLOWING_WINDOW)
                .find(|e| e.is_list()),
            Strategy::KnownListId => root
                .descendant_elements()
                .into_iter()
                .find(|e| e.tag() == "ul" && e.attr("id") == Some(KNOWN_LIST_ID)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Section<E> {
    pub heading: E,
    pub list: E,
    pub strategy: Strategy,
}

impl<E: DomElement> Section<E> {
    /// The label published inside the heading, e.g. "11月28日 更新".
    pub fn week_label(&self, heading_text: &str) -> String {
        week_label(self.heading, heading_text)
    }
}

/// First `h1`..`h6` whose normalized text contains `heading_text`.
pub fn find_heading<E: DomElement>(root: E, heading_text: &str) -> Option<E> {
    let needle = normalize_text(heading_text);
    std::iter::once(root)
        .chain(root.descendant_elements())
        .find(|e| e.is_heading() && e.normalized_text().contains(&needle))
}

/// Find the ranking list that follows `heading_text`.
///
/// Strategies are tried in order and the first candidate that yields at least
/// one entry wins. If candidates exist but none yields entries, the first one
/// is returned so the caller sees an empty ranking instead of a structural
/// failure.
pub fn locate_section<E: DomElement>(root: E, heading_text: &str) -> Result<Section<E>, NotFound> {
    let heading = find_heading(root, heading_text)
        .ok_or_else(|| NotFound::HeadingMissing(heading_text.to_string()))?;

    let mut fallback = None;
    for strategy in Strategy::ORDER {
        let Some(list) = strategy.find(root, heading) else {
            log::debug!("strategy {} found no list", strategy.as_str());
            continue;
        };
        let section = Section {
            heading,
            list,
            strategy,
        };
        if has_entries(list) {
            log::debug!("ranking list located by {}", strategy.as_str());
            return Ok(section);
        }
        log::debug!("strategy {} found a list without entries", strategy.as_str());
        if fallback.is_none() {
            fallback = Some(section);
        }
    }

    fallback.ok_or_else(|| NotFound::ListMissing(heading_text.to_string()))
}

/// Text of the first `span` in the heading, or else the heading text without the keyword.
pub fn week_label<E: DomElement>(heading: E, heading_text: &str) -> String {
    let span_text = heading
        .descendant_elements()
        .into_iter()
        .find(|e| e.tag() == "span")
        .map(|span| span.normalized_text())
        .filter(|text| !text.is_empty());
    if let Some(text) = span_text {
        return text;
    }

    heading
        .normalized_text()
        .replace(heading_text, "")
        .trim_matches(|c: char| c == '·' || c == '.' || c.is_whitespace())
        .to_string()
}
