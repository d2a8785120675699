//! Uid generation for pages and their sections.
//!
//! A scope string (site uid + slug for pages, the page uid for sections)
//! is hashed to a CRC32 seed; instances within the scope get sequential
//! `seed-n` uids.

use crc32fast::Hasher;

/// Stable uid seed for a scope string.
pub fn scope_uid(scope: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(scope.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential uid generator within one scope.
#[derive(Debug, Clone)]
pub struct UidGenerator {
    seed: String,
    count: u32,
}

impl UidGenerator {
    pub fn new(scope: &str) -> Self {
        Self {
            seed: scope_uid(scope),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Next sequential uid.
    pub fn next_uid(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_uid_is_stable() {
        let a = scope_uid("site-1/hello");
        let b = scope_uid("site-1/hello");
        assert_eq!(a, b);

        let c = scope_uid("site-1/other");
        assert_ne!(a, c);
    }

    #[test]
    fn test_sequential_uids_share_seed() {
        let mut gen = UidGenerator::new("page-1");

        let u1 = gen.next_uid();
        let u2 = gen.next_uid();
        let u3 = gen.next_uid();

        assert!(u1.ends_with("-1"));
        assert!(u2.ends_with("-2"));
        assert!(u3.ends_with("-3"));

        let seed = gen.seed().to_string();
        assert!(u1.starts_with(&seed));
        assert!(u3.starts_with(&seed));
    }
}
