//! Resolves which owners' rules, ledger records, and goals are visible.

use super::scope_model::{CoupleLink, ResolvedScope, ViewMode};

/// Maps the current user, their view mode, and an optional couple link to
/// the owner ids a query may touch.
///
/// Users without a link always resolve to themselves, whatever the view
/// mode says. A link that does not involve the current user is ignored.
pub fn resolve_scope(
    current_user_id: &str,
    view_mode: ViewMode,
    couple_link: Option<&CoupleLink>,
) -> ResolvedScope {
    match couple_link {
        Some(link) if link.involves(current_user_id) => match view_mode {
            ViewMode::Both => ResolvedScope::new(vec![
                link.partner_a_id.clone(),
                link.partner_b_id.clone(),
            ]),
            ViewMode::PartnerA => ResolvedScope::single(&link.partner_a_id),
            ViewMode::PartnerB => ResolvedScope::single(&link.partner_b_id),
        },
        _ => ResolvedScope::single(current_user_id),
    }
}
