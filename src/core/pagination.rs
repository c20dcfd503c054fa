use serde::{Serialize, Serializer};
use std::fmt;

/// Up to this many pages are listed without ellipses.
const COMPACT_LIMIT: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

impl Serialize for PageItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageItem::Page(n) => serializer.serialize_u64(*n as u64),
            PageItem::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(n) => write!(f, "{}", n),
            PageItem::Ellipsis => f.write_str("..."),
        }
    }
}

/// Compact page-number list for pagination controls.
///
/// Page 1 and the last page are always shown, together with the pages next
/// to `current`. Gaps are marked with a single [`PageItem::Ellipsis`].
pub fn page_numbers(current: usize, total: usize) -> Vec<PageItem> {
    let total = total.max(1);
    let current = current.clamp(1, total);

    if total <= COMPACT_LIMIT {
        return (1..=total).map(PageItem::Page).collect();
    }

    let mut items = vec![PageItem::Page(1)];
    if current > 3 {
        items.push(PageItem::Ellipsis);
    }

    let start = current.saturating_sub(1).max(2);
    let end = (current + 1).min(total - 1);
    items.extend((start..=end).map(PageItem::Page));

    if current < total - 2 {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(total));
    items
}
