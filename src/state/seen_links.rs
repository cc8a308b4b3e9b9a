use std::collections::HashSet;

/// Product links already dispatched during this run
///
/// The set only grows. A link is inserted before its page is visited, so a
/// link whose extraction fails is still never visited twice.
#[derive(Debug, Default)]
pub struct SeenLinks {
    links: HashSet<String>,
}

impl SeenLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `link` as seen
    ///
    /// Returns true if the link was not seen before.
    pub fn insert(&mut self, link: &str) -> bool {
        if self.links.contains(link) {
            return false;
        }
        self.links.insert(link.to_string())
    }

    pub fn contains(&self, link: &str) -> bool {
        self.links.contains(link)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
