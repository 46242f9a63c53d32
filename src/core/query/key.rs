//! Cache keys.

use std::fmt;

/// Identity of a cached request: resource path plus parameters,
/// e.g. `["employees", "5"]`.
///
/// Keys form a hierarchy; invalidating `["employees"]` covers every key
/// that starts with it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self(parts.into_iter().map(|p| p.to_string()).collect())
    }

    /// Append one segment.
    pub fn with(mut self, part: impl ToString) -> Self {
        self.0.push(part.to_string());
        self
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// Whether `prefix` is a leading part of this key (or equal to it).
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matching() {
        let all = QueryKey::new(["employees"]);
        let one = QueryKey::new(["employees"]).with(5);
        let stats = QueryKey::new(["statistics"]);

        assert!(one.starts_with(&all));
        assert!(all.starts_with(&all));
        assert!(!all.starts_with(&one));
        assert!(!stats.starts_with(&all));
        assert_eq!(one.parts(), ["employees", "5"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            QueryKey::new(["employees", "search", "jo"]).to_string(),
            "[employees, search, jo]"
        );
    }
}
