use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

/// Derive a short stable seed from a namespace (page id, client id, ...)
pub fn namespace_seed(namespace: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(namespace.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// CRC32 of several parts joined by `:`. Used for deterministic bucketing.
pub fn stable_hash(parts: &[&str]) -> u32 {
    let mut hasher = Hasher::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            hasher.update(b":");
        }
        hasher.update(part.as_bytes());
    }
    hasher.finalize()
}

/// Sequential ID generator for sections, variants and tests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(namespace: &str) -> Self {
        Self {
            seed: namespace_seed(namespace),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Generate an ID that is not contained in `taken`
    pub fn new_id_avoiding<'a, I>(&mut self, taken: I) -> String
    where
        I: IntoIterator<Item = &'a str> + Clone,
    {
        loop {
            let id = self.new_id();
            if !taken.clone().into_iter().any(|t| t == id) {
                return id;
            }
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_seed_is_stable() {
        let id1 = namespace_seed("page:home");
        let id2 = namespace_seed("page:home");
        assert_eq!(id1, id2);
        assert_ne!(id1, namespace_seed("page:about"));
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::new("page:home");

        let id1 = gen.new_id();
        let id2 = gen.new_id();

        assert!(id1.ends_with("-1"));
        assert!(id2.ends_with("-2"));
        assert!(id1.starts_with(gen.seed()));
        assert_eq!(gen.count(), 2);
    }

    #[test]
    fn test_new_id_avoiding_skips_taken() {
        let mut gen = IdGenerator::from_seed("s".to_string());
        let taken = vec!["s-1", "s-2"];

        let id = gen.new_id_avoiding(taken.iter().copied());
        assert_eq!(id, "s-3");
    }

    #[test]
    fn test_stable_hash_separates_parts() {
        assert_ne!(stable_hash(&["ab", "c"]), stable_hash(&["a", "bc"]));
        assert_eq!(stable_hash(&["x", "y"]), stable_hash(&["x", "y"]));
    }
}
