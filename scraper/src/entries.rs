use url::Url;

use crate::dom::DomElement;
use crate::model::WeekEntry;

/// Only the top of the ranking is kept
pub const MAX_ENTRIES: usize = 5;

/// Title and link anchor of a list item, if it has both.
///
/// Douban puts the movie link in `div.name > a`; any other anchor with text
/// is accepted when that wrapper is missing.
fn item_link<E: DomElement>(item: E) -> Option<(String, E)> {
    let anchors: Vec<E> = item
        .descendant_elements()
        .into_iter()
        .filter(|e| e.tag() == "a" && e.attr("href").map_or(false, |h| !h.trim().is_empty()))
        .collect();

    let preferred = anchors.iter().copied().find(|a| {
        let mut ancestor = a.parent_element();
        while let Some(el) = ancestor {
            if el == item {
                return false;
            }
            if el.has_class("name") {
                return true;
            }
            ancestor = el.parent_element();
        }
        false
    });

    preferred
        .into_iter()
        .chain(anchors.iter().copied())
        .map(|a| (a.normalized_text(), a))
        .find(|(title, _)| !title.is_empty())
}

fn list_items<E: DomElement>(container: E) -> impl Iterator<Item = E> {
    container
        .child_elements()
        .into_iter()
        .filter(|e| e.tag() == "li")
        .take(MAX_ENTRIES)
}

/// Whether at least one of the first items carries a title and a link.
pub fn has_entries<E: DomElement>(container: E) -> bool {
    list_items(container).any(|item| item_link(item).is_some())
}

/// Extract the ranking from a list container.
///
/// Only the first [`MAX_ENTRIES`] `li` children are considered. The rank is
/// the item's position among them, so an item skipped for lacking a title or
/// a usable link leaves a gap instead of shifting the ones after it.
/// Relative links are resolved against `base`; anything that is not
/// http(s) afterwards is dropped.
pub fn extract_entries<E: DomElement>(container: E, base: &Url) -> Vec<WeekEntry> {
    list_items(container)
        .enumerate()
        .filter_map(|(index, item)| {
            let rank = index as u8 + 1;
            let Some((title, anchor)) = item_link(item) else {
                log::debug!("skipping item {}: no title or link", rank);
                return None;
            };
            let href = anchor.attr("href")?.trim();
            let url = match base.join(href) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => url,
                Ok(url) => {
                    log::debug!("skipping item {}: unsupported link {}", rank, url);
                    return None;
                }
                Err(e) => {
                    log::debug!("skipping item {}: bad link {:?}: {}", rank, href, e);
                    return None;
                }
            };
            Some(WeekEntry {
                rank,
                title,
                url: url.to_string(),
            })
        })
        .collect()
}
