use std::collections::{HashMap, VecDeque};

use crate::runtime::{Parsed, Session};

/// An LRU-memoizing decorator around [`Session::parse`].
///
/// Plot and spreadsheet hosts re-parse the same cell text on every refresh;
/// wrapping the parser in a small least-recently-used cache keyed by the raw
/// source string makes those refreshes allocation-free. The decorator is
/// injectable and optional — nothing in the engine depends on it.
///
/// The cache key is the source text alone, so a host that redefines
/// functions between identical inputs should clear the cache on definition
/// changes.
///
/// # Example
/// ```
/// use algom::{memo::MemoParser, runtime::Session};
///
/// let session = Session::new();
/// let mut parser = MemoParser::new(16);
///
/// let first = parser.parse(&session, "2 + 2;");
/// let second = parser.parse(&session, "2 + 2;");
/// assert_eq!(first, second);
/// assert_eq!(parser.len(), 1);
/// ```
pub struct MemoParser {
    capacity: usize,
    entries:  HashMap<String, Parsed>,
    order:    VecDeque<String>,
}

impl MemoParser {
    /// Creates a cache holding at most `capacity` distinct inputs.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { capacity: capacity.max(1),
               entries:  HashMap::new(),
               order:    VecDeque::new(), }
    }

    /// Parses through the cache.
    pub fn parse(&mut self, session: &Session, source: &str) -> Parsed {
        if let Some(parsed) = self.entries.get(source) {
            let parsed = parsed.clone();
            self.touch(source);
            return parsed;
        }

        let parsed = session.parse(source);
        if self.entries.len() == self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.entries.insert(source.to_string(), parsed.clone());
        self.order.push_back(source.to_string());
        parsed
    }

    /// Marks `source` as most recently used.
    fn touch(&mut self, source: &str) {
        if let Some(position) = self.order.iter().position(|s| s == source) {
            let key = self.order.remove(position).unwrap();
            self.order.push_back(key);
        }
    }

    /// Number of cached inputs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every cached parse.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::MemoParser;
    use crate::runtime::Session;

    #[test]
    fn caches_and_evicts_least_recently_used() {
        let session = Session::new();
        let mut parser = MemoParser::new(2);

        parser.parse(&session, "1;");
        parser.parse(&session, "2;");
        parser.parse(&session, "1;"); // refresh "1;"
        parser.parse(&session, "3;"); // evicts "2;"

        assert_eq!(parser.len(), 2);
        parser.parse(&session, "2;"); // must re-enter, evicting "1;"
        assert_eq!(parser.len(), 2);
    }

    #[test]
    fn cached_results_match_fresh_parses() {
        let session = Session::new();
        let mut parser = MemoParser::new(4);
        let cached = parser.parse(&session, "2x + 1;");
        assert_eq!(cached, session.parse("2x + 1;"));
    }
}
