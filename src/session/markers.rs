use std::collections::HashSet;

/// Per-session record of which articles already had their view counted.
///
/// Lives as long as the process; entries are only ever added.
#[derive(Debug, Default)]
pub struct SessionMarkers {
    seen: HashSet<String>,
}

impl SessionMarkers {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(article_id: &str) -> String {
        format!("viewed_article_{article_id}")
    }

    pub fn contains(&self, article_id: &str) -> bool {
        self.seen.contains(&Self::key(article_id))
    }

    pub fn mark(&mut self, article_id: &str) {
        self.seen.insert(Self::key(article_id));
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }
}
