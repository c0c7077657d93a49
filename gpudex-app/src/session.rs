//! Per-process memory of the last search.

use gpudex_catalog::SearchHit;

/// Last query and its results, used to resolve "result N" references.
///
/// Both fields change together: a new search overwrites both, and
/// [`SessionState::clear`] resets both. Nothing here is persisted.
#[derive(Debug, Default)]
pub struct SessionState {
    last_query: String,
    last_results: Vec<SearchHit>,
}

impl SessionState {
    /// A fresh session with no search yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the remembered search.
    pub fn record(&mut self, query: impl Into<String>, results: Vec<SearchHit>) {
        self.last_query = query.into();
        self.last_results = results;
    }

    /// Forget the remembered search.
    pub fn clear(&mut self) {
        self.last_query.clear();
        self.last_results.clear();
    }

    /// Last query, empty if none.
    #[must_use]
    pub fn last_query(&self) -> &str {
        &self.last_query
    }

    /// Last result set.
    #[must_use]
    pub fn results(&self) -> &[SearchHit] {
        &self.last_results
    }

    /// Result at a 1-based position.
    #[must_use]
    pub fn result(&self, index: usize) -> Option<&SearchHit> {
        index
            .checked_sub(1)
            .and_then(|i| self.last_results.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: &str) -> SearchHit {
        SearchHit {
            title: title.to_string(),
            url: format!("local://{}", title.to_lowercase()),
            description: "Local catalogue data.".to_string(),
        }
    }

    #[test]
    fn test_record_and_lookup() {
        let mut session = SessionState::new();
        assert!(session.last_query().is_empty());
        assert!(session.result(1).is_none());

        session.record("rtx", vec![hit("A"), hit("B")]);
        assert_eq!(session.last_query(), "rtx");
        assert_eq!(session.result(2).map(|h| h.title.as_str()), Some("B"));
        assert!(session.result(0).is_none());
        assert!(session.result(3).is_none());
    }

    #[test]
    fn test_clear_resets_both() {
        let mut session = SessionState::new();
        session.record("arc", vec![hit("Arc A770")]);
        session.clear();

        assert!(session.last_query().is_empty());
        assert!(session.results().is_empty());
    }
}
