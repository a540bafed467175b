//! Keyword rotation.
//!
//! Each schedule cycles through its keyword pool without repeats until every
//! keyword has been consumed, then starts over. The "used" set is re-derived
//! from the execution history on every invocation; no rotation state is
//! persisted.

use rand::seq::IndexedRandom;
use std::collections::HashSet;

use crate::db::entities::execution_history;
use crate::error::{AppError, AppResult};

/// Distinct keywords already consumed by a schedule. Rows that failed before
/// keyword selection carry no keyword and are ignored.
pub fn used_keywords(history: &[execution_history::Model]) -> HashSet<String> {
    history
        .iter()
        .filter_map(|record| record.keyword_used.clone())
        .collect()
}

/// Pick the next keyword, uniformly at random from the unused part of the
/// pool. An exhausted pool resets: the pick is drawn from the full pool
/// again, with no reset event recorded.
pub fn select_keyword(pool: &[String], used: &HashSet<String>) -> AppResult<String> {
    if pool.is_empty() {
        return Err(AppError::NoKeywordsConfigured);
    }

    let available: Vec<&String> = pool.iter().filter(|k| !used.contains(*k)).collect();

    let mut rng = rand::rng();
    let chosen = if available.is_empty() {
        pool.choose(&mut rng)
    } else {
        available.choose(&mut rng).copied()
    };

    chosen
        .map(|k| k.clone())
        .ok_or(AppError::NoKeywordsConfigured)
}
