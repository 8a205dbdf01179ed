use std::collections::BTreeSet;

/// Resolved recipients plus the department's reply-to address.
///
/// Addresses are trimmed on insert; blank entries are dropped and duplicates
/// collapse. Iteration order is lexical and carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientSet {
    reply_to: String,
    addresses: BTreeSet<String>,
}

impl RecipientSet {
    pub fn new(reply_to: impl Into<String>) -> Self {
        Self {
            reply_to: reply_to.into(),
            addresses: BTreeSet::new(),
        }
    }

    /// Insert an address. Returns `false` for blanks and duplicates.
    pub fn insert(&mut self, address: &str) -> bool {
        let address = address.trim();
        if address.is_empty() {
            return false;
        }
        self.addresses.insert(address.to_owned())
    }

    pub fn reply_to(&self) -> &str {
        &self.reply_to
    }

    pub fn contains(&self, address: &str) -> bool {
        self.addresses.contains(address)
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.addresses.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.addresses.iter().cloned().collect()
    }
}

impl<S: AsRef<str>> Extend<S> for RecipientSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for address in iter {
            self.insert(address.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_blanks_and_duplicates() {
        let mut set = RecipientSet::new("reply@x.com");
        set.extend(["a@x", "a@x", "", "   ", " a@x ", "b@x"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("a@x"));
        assert!(set.contains("b@x"));
        assert_eq!(set.reply_to(), "reply@x.com");
    }

    #[test]
    fn insert_reports_novelty() {
        let mut set = RecipientSet::default();
        assert!(set.is_empty());
        assert!(set.insert("a@x"));
        assert!(!set.insert("a@x"));
        assert!(!set.insert(""));
        assert_eq!(set.to_vec(), ["a@x"]);
    }
}
