//! Title search over dashboard rows
//!
//! Case-insensitive substring match with all whitespace removed from both the
//! title and the term. Rows without a title are searched as "Untitled".

use crate::models::LinkSummary;

fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn matches_search(link: &LinkSummary, term: &str) -> bool {
    normalize(link.display_title()).contains(&normalize(term))
}

pub fn filter_links<'a>(links: &'a [LinkSummary], term: &str) -> Vec<&'a LinkSummary> {
    links.iter().filter(|l| matches_search(l, term)).collect()
}
