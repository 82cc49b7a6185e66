use crate::domain::model::{DeveloperRecord, FilterState, RoleFilter};

/// Derives the visible subsequence of `all`, keeping input order.
///
/// The role filter narrows first; a non-blank search term then keeps records
/// whose name, or any single tech stack token, contains the term ignoring case.
/// Surrounding whitespace in a non-blank term is part of the match text.
pub fn filter_developers<'a>(
    all: &'a [DeveloperRecord],
    role_filter: RoleFilter,
    search_term: &str,
) -> Vec<&'a DeveloperRecord> {
    let mut visible: Vec<&DeveloperRecord> = all
        .iter()
        .filter(|dev| role_filter.admits(dev.role))
        .collect();

    // 只用 trim 判斷是否要搜尋，比對時使用原字串
    if search_term.trim().is_empty() {
        return visible;
    }

    let needle = search_term.to_lowercase();
    visible.retain(|dev| matches_search(dev, &needle));
    visible
}

pub fn apply_filter<'a>(
    all: &'a [DeveloperRecord],
    state: &FilterState,
) -> Vec<&'a DeveloperRecord> {
    filter_developers(all, state.role_filter, &state.search_term)
}

// needle 必須已轉為小寫
fn matches_search(dev: &DeveloperRecord, needle: &str) -> bool {
    dev.name.to_lowercase().contains(needle)
        || dev
            .tech_stack
            .iter()
            .any(|tech| tech.to_lowercase().contains(needle))
}
