//! Page-side JavaScript and the idle heuristic.

/// Resource entries that may still trickle in while the page counts as idle.
const IDLE_ALLOWANCE: u64 = 2;

/// Number of resources the page has fetched so far.
pub(super) const RESOURCE_COUNT_JS: &str = "performance.getEntriesByType('resource').length";

/// Script returning the `href` of every element matching `selector`.
///
/// `a.href` is already absolute (resolved against the page URL). Elements
/// without an href are dropped.
pub(super) fn link_query_script(selector: &str) -> String {
    let quoted = serde_json::to_string(selector).unwrap_or_else(|_| "\"a.download\"".to_string());
    format!(
        "Array.from(document.querySelectorAll({})).map(a => a.href).filter(h => typeof h === 'string' && h.length > 0)",
        quoted
    )
}

/// True when at most [`IDLE_ALLOWANCE`] resources finished during the last quiet window.
pub(super) fn is_idle(previous: u64, current: u64) -> bool {
    current.saturating_sub(previous) <= IDLE_ALLOWANCE
}
