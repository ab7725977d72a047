//! Archive browsing: filters, search, pagination and name suggestions.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{CreatureId, CreatureRecord};

pub const ITEMS_PER_PAGE: usize = 24;
pub const SUGGESTION_LIMIT: usize = 5;
/// Filter value that matches every record.
pub const ALL: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub generation: String,
    pub attribute: String,
    pub search: String,
    /// 1-based.
    pub page: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            generation: ALL.to_string(),
            attribute: ALL.to_string(),
            search: String::new(),
            page: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogPage<'a> {
    pub items: Vec<&'a CreatureRecord>,
    pub total_items: usize,
    pub total_pages: usize,
    /// Page actually shown after clamping.
    pub page: usize,
}

fn matches_filter(value: Option<&str>, filter: &str) -> bool {
    filter == ALL || value == Some(filter)
}

/// Records matching the generation/attribute filters and the name search, in
/// input order.
pub fn filter<'a>(records: &'a [CreatureRecord], query: &CatalogQuery) -> Vec<&'a CreatureRecord> {
    let needle = query.search.to_lowercase();
    records
        .iter()
        .filter(|r| matches_filter(r.generation.as_deref(), &query.generation))
        .filter(|r| matches_filter(r.attribute.as_deref(), &query.attribute))
        .filter(|r| needle.is_empty() || r.id.as_str().to_lowercase().contains(&needle))
        .collect()
}

pub fn total_pages(total_items: usize) -> usize {
    total_items.div_ceil(ITEMS_PER_PAGE)
}

/// Out-of-range pages (and every page of an empty result) fall back to 1.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    if page == 0 || page > total_pages {
        1
    } else {
        page
    }
}

pub fn paginate<T>(items: &[T], page: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(ITEMS_PER_PAGE);
    if start >= items.len() {
        return &[];
    }
    let end = (start + ITEMS_PER_PAGE).min(items.len());
    &items[start..end]
}

pub fn browse<'a>(records: &'a [CreatureRecord], query: &CatalogQuery) -> CatalogPage<'a> {
    let matching = filter(records, query);
    let total_items = matching.len();
    let total_pages = total_pages(total_items);
    let page = clamp_page(query.page, total_pages);
    CatalogPage {
        items: paginate(&matching, page).to_vec(),
        total_items,
        total_pages,
        page,
    }
}

fn distinct_with_all<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let distinct: BTreeSet<&str> = values.flatten().filter(|v| !v.is_empty()).collect();
    std::iter::once(ALL.to_string())
        .chain(distinct.into_iter().map(str::to_string))
        .collect()
}

/// `"All"` followed by every generation present, sorted.
pub fn generations(records: &[CreatureRecord]) -> Vec<String> {
    distinct_with_all(records.iter().map(|r| r.generation.as_deref()))
}

/// `"All"` followed by every attribute present, sorted.
pub fn attributes(records: &[CreatureRecord]) -> Vec<String> {
    distinct_with_all(records.iter().map(|r| r.attribute.as_deref()))
}

/// Up to [`SUGGESTION_LIMIT`] records whose name contains `term`, ignoring case.
pub fn suggest<'a>(records: &'a [CreatureRecord], term: &str) -> Vec<&'a CreatureRecord> {
    if term.is_empty() {
        return Vec::new();
    }
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|r| r.id.as_str().to_lowercase().contains(&needle))
        .take(SUGGESTION_LIMIT)
        .collect()
}

pub fn find_record<'a>(records: &'a [CreatureRecord], id: &CreatureId) -> Option<&'a CreatureRecord> {
    records.iter().find(|r| &r.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::record;

    fn tagged(id: &str, generation: &str, attribute: &str) -> CreatureRecord {
        let mut r = record(id);
        r.generation = Some(generation.to_string());
        r.attribute = Some(attribute.to_string());
        r
    }

    fn numbered(count: usize) -> Vec<CreatureRecord> {
        (0..count).map(|i| record(&format!("mon_{i:03}"))).collect()
    }

    #[test]
    fn test_default_query_matches_everything() {
        let records = vec![tagged("Agumon", "Rookie", "Vaccine"), record("Kuramon")];
        assert_eq!(filter(&records, &CatalogQuery::default()).len(), 2);
    }

    #[test]
    fn test_generation_and_attribute_filters_combine() {
        let records = vec![
            tagged("Agumon", "Rookie", "Vaccine"),
            tagged("Gabumon", "Rookie", "Data"),
            tagged("Greymon", "Champion", "Vaccine"),
        ];
        let query = CatalogQuery {
            generation: "Rookie".to_string(),
            attribute: "Vaccine".to_string(),
            ..CatalogQuery::default()
        };
        let names: Vec<&str> = filter(&records, &query).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(names, vec!["Agumon"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let records = vec![record("Garurumon"), record("WereGarurumon"), record("Agumon")];
        let query = CatalogQuery {
            search: "GARU".to_string(),
            ..CatalogQuery::default()
        };
        assert_eq!(filter(&records, &query).len(), 2);
    }

    #[test]
    fn test_missing_generation_never_matches_specific_filter() {
        let records = vec![record("Kuramon")];
        let query = CatalogQuery {
            generation: "Baby".to_string(),
            ..CatalogQuery::default()
        };
        assert!(filter(&records, &query).is_empty());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(24), 1);
        assert_eq!(total_pages(25), 2);
    }

    #[test]
    fn test_browse_second_page() {
        let records = numbered(30);
        let query = CatalogQuery {
            page: 2,
            ..CatalogQuery::default()
        };
        let page = browse(&records, &query);
        assert_eq!(page.total_items, 30);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.page, 2);
        assert_eq!(page.items.len(), 6);
        assert_eq!(page.items[0].id.as_str(), "mon_024");
    }

    #[test]
    fn test_browse_out_of_range_page_resets_to_first() {
        let records = numbered(5);
        let query = CatalogQuery {
            page: 9,
            ..CatalogQuery::default()
        };
        let page = browse(&records, &query);
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 5);
    }

    #[test]
    fn test_browse_empty_result_is_page_one() {
        let query = CatalogQuery {
            page: 3,
            search: "zzz".to_string(),
            ..CatalogQuery::default()
        };
        let records = numbered(5);
        let page = browse(&records, &query);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_generations_sorted_with_all_first() {
        let records = vec![
            tagged("Greymon", "Champion", "Vaccine"),
            tagged("Agumon", "Rookie", "Vaccine"),
            tagged("Gabumon", "Rookie", "Data"),
            record("Kuramon"),
        ];
        assert_eq!(generations(&records), vec!["All", "Champion", "Rookie"]);
        assert_eq!(attributes(&records), vec!["All", "Data", "Vaccine"]);
    }

    #[test]
    fn test_suggest_caps_at_limit() {
        let records = numbered(12);
        assert_eq!(suggest(&records, "MON").len(), SUGGESTION_LIMIT);
        assert!(suggest(&records, "").is_empty());
    }

    #[test]
    fn test_find_record() {
        let records = vec![record("Agumon")];
        assert!(find_record(&records, &"Agumon".into()).is_some());
        assert!(find_record(&records, &"Ghost".into()).is_none());
    }
}
