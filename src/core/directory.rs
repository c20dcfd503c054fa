//! Partner directory: filter, sort, paginate.
//!
//! Everything here is a pure function of its arguments. [`DirectoryView`]
//! is the caller-side state holder that keeps page navigation honest when
//! the filter changes.

use crate::core::pagination::{page_numbers, PageItem};
use crate::domain::model::Partner;
use crate::utils::error::DirectoryError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    MostHired,
    RateAsc,
    RateDesc,
    Newest,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::MostHired => "most-hired",
            SortKey::RateAsc => "rate-asc",
            SortKey::RateDesc => "rate-desc",
            SortKey::Newest => "newest",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "most-hired" => Ok(SortKey::MostHired),
            "rate-asc" => Ok(SortKey::RateAsc),
            "rate-desc" => Ok(SortKey::RateDesc),
            "newest" => Ok(SortKey::Newest),
            other => Err(DirectoryError::InvalidConfigValueError {
                field: "sort".to_string(),
                value: other.to_string(),
                reason: "expected one of most-hired, rate-asc, rate-desc, newest".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    /// Empty means no market filter.
    pub selected_markets: BTreeSet<String>,
    pub sort_key: SortKey,
}

impl FilterState {
    pub fn new<I, S>(markets: I, sort_key: SortKey) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected_markets: markets.into_iter().map(Into::into).collect(),
            sort_key,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// 1-based.
    pub current_page: usize,
    pub page_size: usize,
}

impl PageState {
    pub fn first(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size,
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryPage<'a> {
    pub partners: Vec<&'a Partner>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

impl DirectoryPage<'_> {
    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }

    pub fn page_items(&self) -> Vec<PageItem> {
        page_numbers(self.current_page, self.total_pages)
    }
}

/// Keeps partners serving at least one selected market, in input order.
pub fn filter_partners<'a>(
    partners: &'a [Partner],
    markets: &BTreeSet<String>,
) -> Vec<&'a Partner> {
    partners
        .iter()
        .filter(|p| markets.is_empty() || p.serves_any(markets))
        .collect()
}

/// Stable sort; equal keys keep their relative order.
pub fn sort_partners(partners: &mut [&Partner], key: SortKey) {
    match key {
        SortKey::MostHired => partners.sort_by(|a, b| b.hires.cmp(&a.hires)),
        SortKey::RateAsc => partners.sort_by(|a, b| a.rate.total_cmp(&b.rate)),
        SortKey::RateDesc => partners.sort_by(|a, b| b.rate.total_cmp(&a.rate)),
        // undated records keep input order after all dated ones
        SortKey::Newest => partners.sort_by(|a, b| match (a.created_at, b.created_at) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
    }
}

/// Never returns zero; an empty result is one empty page.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Slice for a 1-based page. Out-of-range pages yield an empty slice.
pub fn paginate<'a, T>(items: &'a [T], page: PageState) -> &'a [T] {
    let size = page.page_size.max(1);
    let start = page.current_page.saturating_sub(1).saturating_mul(size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}

pub fn build_page<'a>(
    partners: &'a [Partner],
    filter: &FilterState,
    page: PageState,
) -> DirectoryPage<'a> {
    let mut matching = filter_partners(partners, &filter.selected_markets);
    sort_partners(&mut matching, filter.sort_key);

    let total_count = matching.len();
    let visible = paginate(&matching, page).to_vec();

    DirectoryPage {
        partners: visible,
        current_page: page.current_page,
        total_pages: total_pages(total_count, page.page_size),
        total_count,
    }
}

/// Distinct market tags in first-seen order.
pub fn market_options(partners: &[Partner]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut options = Vec::new();
    for market in partners.iter().flat_map(|p| &p.markets) {
        if seen.insert(market.as_str()) {
            options.push(market.as_str());
        }
    }
    options
}

/// Directory state as owned by a caller.
#[derive(Debug, Clone)]
pub struct DirectoryView {
    partners: Vec<Partner>,
    filter: FilterState,
    page: PageState,
}

impl DirectoryView {
    pub fn new(partners: Vec<Partner>, page_size: usize) -> Self {
        Self {
            partners,
            filter: FilterState::default(),
            page: PageState::first(page_size.max(1)),
        }
    }

    pub fn partners(&self) -> &[Partner] {
        &self.partners
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn current_page(&self) -> usize {
        self.page.current_page
    }

    pub fn total_pages(&self) -> usize {
        let count = filter_partners(&self.partners, &self.filter.selected_markets).len();
        total_pages(count, self.page.page_size)
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        self.page.current_page = 1;
    }

    pub fn toggle_market(&mut self, market: &str) {
        if !self.filter.selected_markets.remove(market) {
            self.filter.selected_markets.insert(market.to_string());
        }
        self.page.current_page = 1;
    }

    pub fn clear_markets(&mut self) {
        self.filter.selected_markets.clear();
        self.page.current_page = 1;
    }

    pub fn set_sort(&mut self, key: SortKey) {
        self.filter.sort_key = key;
        self.page.current_page = 1;
    }

    /// Moves to `page`, clamped into `[1, total_pages]`. Returns the page landed on.
    pub fn go_to(&mut self, page: usize) -> usize {
        self.page.current_page = page.clamp(1, self.total_pages());
        self.page.current_page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to(self.page.current_page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> usize {
        self.go_to(self.page.current_page.saturating_sub(1))
    }

    pub fn current(&self) -> DirectoryPage<'_> {
        build_page(&self.partners, &self.filter, self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn partner(id: &str, rate: f64, hires: u32, markets: &[&str]) -> Partner {
        Partner {
            id: id.to_string(),
            name: format!("Partner {}", id),
            photo_url: None,
            rate,
            markets: markets.iter().map(|m| m.to_string()).collect(),
            hires,
            verified: true,
            bio: None,
            expertise: None,
            languages: None,
            created_at: None,
        }
    }

    fn ids(partners: &[&Partner]) -> Vec<String> {
        partners.iter().map(|p| p.id.clone()).collect()
    }

    fn markets(tags: &[&str]) -> BTreeSet<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_order() {
        let partners = vec![
            partner("a", 80.0, 1, &["Mexico"]),
            partner("b", 90.0, 2, &[]),
            partner("c", 70.0, 3, &["Spain"]),
        ];
        assert_eq!(ids(&filter_partners(&partners, &BTreeSet::new())), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_filter_matches_any_selected_market() {
        let partners = vec![
            partner("1", 80.0, 1, &["Brazil"]),
            partner("2", 80.0, 1, &["Mexico"]),
            partner("3", 80.0, 1, &["Brazil", "Chile"]),
        ];
        assert_eq!(ids(&filter_partners(&partners, &markets(&["Brazil"]))), vec!["1", "3"]);
        assert_eq!(
            ids(&filter_partners(&partners, &markets(&["Chile", "Mexico"]))),
            vec!["2", "3"]
        );
        assert!(filter_partners(&partners, &markets(&["Peru"])).is_empty());
    }

    #[test]
    fn test_most_hired_is_stable() {
        let partners = vec![
            partner("A", 80.0, 5, &[]),
            partner("B", 80.0, 10, &[]),
            partner("C", 80.0, 5, &[]),
        ];
        let mut refs: Vec<&Partner> = partners.iter().collect();
        sort_partners(&mut refs, SortKey::MostHired);
        assert_eq!(ids(&refs), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_rate_sorts_are_stable() {
        let partners = vec![
            partner("a", 90.0, 0, &[]),
            partner("b", 75.0, 0, &[]),
            partner("c", 90.0, 0, &[]),
            partner("d", 100.0, 0, &[]),
        ];
        let mut asc: Vec<&Partner> = partners.iter().collect();
        sort_partners(&mut asc, SortKey::RateAsc);
        assert_eq!(ids(&asc), vec!["b", "a", "c", "d"]);

        let mut desc: Vec<&Partner> = partners.iter().collect();
        sort_partners(&mut desc, SortKey::RateDesc);
        assert_eq!(ids(&desc), vec!["d", "a", "c", "b"]);
    }

    #[test]
    fn test_newest_without_timestamps_keeps_order() {
        let partners = vec![
            partner("x", 90.0, 1, &[]),
            partner("y", 50.0, 9, &[]),
            partner("z", 70.0, 4, &[]),
        ];
        let mut refs: Vec<&Partner> = partners.iter().collect();
        sort_partners(&mut refs, SortKey::Newest);
        assert_eq!(ids(&refs), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_newest_puts_recent_first_and_undated_last() {
        let mut old = partner("old", 80.0, 0, &[]);
        old.created_at = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let mut recent = partner("recent", 80.0, 0, &[]);
        recent.created_at = Some(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());
        let undated = partner("undated", 80.0, 0, &[]);

        let partners = vec![undated, old, recent];
        let mut refs: Vec<&Partner> = partners.iter().collect();
        sort_partners(&mut refs, SortKey::Newest);
        assert_eq!(ids(&refs), vec!["recent", "old", "undated"]);
    }

    #[test]
    fn test_pagination_of_32_results() {
        let partners: Vec<Partner> = (0..32)
            .map(|i| partner(&i.to_string(), 80.0, 0, &["Brazil"]))
            .collect();
        let filter = FilterState::new(["Brazil"], SortKey::Newest);

        let first = build_page(&partners, &filter, PageState::first(15));
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_count, 32);
        assert_eq!(first.partners.len(), 15);

        let third = build_page(&partners, &filter, PageState { current_page: 3, page_size: 15 });
        assert_eq!(ids(&third.partners), vec!["30", "31"]);

        let fourth = build_page(&partners, &filter, PageState { current_page: 4, page_size: 15 });
        assert!(fourth.is_empty());
        assert_eq!(fourth.total_pages, 3);
    }

    #[test]
    fn test_no_results_is_one_empty_page() {
        let page = build_page(&[], &FilterState::default(), PageState::default());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_count, 0);
        assert!(page.is_empty());
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 15), 1);
        assert_eq!(total_pages(15, 15), 1);
        assert_eq!(total_pages(16, 15), 2);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_page_zero_behaves_like_first_page() {
        let items = [1, 2, 3];
        assert_eq!(paginate(&items, PageState { current_page: 0, page_size: 2 }), &[1, 2]);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut partners: Vec<Partner> = (0..40)
            .map(|i| partner(&format!("mx{}", i), 80.0, 0, &["Mexico"]))
            .collect();
        partners.push(partner("br", 80.0, 0, &["Brazil"]));

        let mut view = DirectoryView::new(partners, 15);
        assert_eq!(view.go_to(3), 3);

        view.toggle_market("Brazil");
        assert_eq!(view.current_page(), 1);
        let page = view.current();
        assert_eq!(page.total_pages, 1);
        assert_eq!(ids(&page.partners), vec!["br"]);
    }

    #[test]
    fn test_clear_markets_shows_everyone_from_page_one() {
        let partners: Vec<Partner> = (0..30)
            .map(|i| {
                let markets: &[&str] = if i == 0 { &["Peru"] } else { &[] };
                partner(&i.to_string(), 80.0, 0, markets)
            })
            .collect();
        let mut view = DirectoryView::new(partners, 15);
        view.toggle_market("Peru");
        assert_eq!(view.total_pages(), 1);

        view.clear_markets();
        assert_eq!(view.go_to(2), 2);
        view.toggle_market("Peru");
        view.clear_markets();
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.current().total_count, 30);
    }

    #[test]
    fn test_navigation_clamps() {
        let partners: Vec<Partner> = (0..20).map(|i| partner(&i.to_string(), 80.0, 0, &[])).collect();
        let mut view = DirectoryView::new(partners, 15);

        assert_eq!(view.go_to(9), 2);
        assert_eq!(view.next_page(), 2);
        assert_eq!(view.prev_page(), 1);
        assert_eq!(view.prev_page(), 1);
        assert_eq!(view.go_to(0), 1);
    }

    #[test]
    fn test_sort_key_round_trips_through_str() {
        for key in [SortKey::MostHired, SortKey::RateAsc, SortKey::RateDesc, SortKey::Newest] {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
        assert!("cheapest".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_market_options_first_seen_order() {
        let partners = vec![
            partner("1", 80.0, 0, &["LATAM", "Mexico"]),
            partner("2", 80.0, 0, &["Mexico", "Brazil"]),
        ];
        assert_eq!(market_options(&partners), vec!["LATAM", "Mexico", "Brazil"]);
    }
}
