//! Result deduplication by canonical profile URL.
//!
//! Sources are merged in chain order, so "first occurrence wins" means an
//! official API record beats a scraped one for the same account. A later
//! duplicate is dropped even if its description is longer.

use std::collections::HashSet;

use crate::types::MatchedAccount;

use super::url_normalize::canonical_url;

/// Remove accounts whose canonical URL was already seen, preserving order.
pub fn deduplicate(accounts: Vec<MatchedAccount>) -> Vec<MatchedAccount> {
    let mut seen: HashSet<String> = HashSet::with_capacity(accounts.len());
    accounts
        .into_iter()
        .filter(|matched| seen.insert(canonical_url(&matched.account.url)))
        .collect()
}
