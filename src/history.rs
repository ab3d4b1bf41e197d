use serde::Serialize;
use std::collections::VecDeque;
use tokio::sync::Mutex;

use crate::normalize_text;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub keyword: String,
    pub searched_at: String,
}

/// Recently analysed keywords, most recent first.
///
/// Re-adding a keyword (compared case- and whitespace-insensitively) moves it
/// to the front; adding past `limit` drops the oldest entry.
pub struct SearchHistory {
    limit: usize,
    entries: Mutex<VecDeque<HistoryEntry>>,
}

impl SearchHistory {
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            limit,
            entries: Mutex::new(VecDeque::with_capacity(limit)),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub async fn add(&self, keyword: &str) -> Vec<HistoryEntry> {
        let normalized = normalize_text(keyword);
        let mut guard = self.entries.lock().await;
        if normalized.is_empty() {
            return guard.iter().cloned().collect();
        }

        guard.retain(|entry| normalize_text(&entry.keyword) != normalized);
        guard.push_front(HistoryEntry {
            keyword: keyword.trim().to_string(),
            searched_at: chrono::Utc::now().to_rfc3339(),
        });
        guard.truncate(self.limit);
        guard.iter().cloned().collect()
    }

    pub async fn list(&self) -> Vec<HistoryEntry> {
        let guard = self.entries.lock().await;
        guard.iter().cloned().collect()
    }

    pub async fn keywords(&self) -> Vec<String> {
        let guard = self.entries.lock().await;
        guard.iter().map(|entry| entry.keyword.clone()).collect()
    }

    pub async fn clear(&self) -> usize {
        let mut guard = self.entries.lock().await;
        let removed = guard.len();
        guard.clear();
        removed
    }
}
