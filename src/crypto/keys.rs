//! In-memory holder for the derived vault key.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A derived vault key that zeroes its memory when dropped.
///
/// Never written to disk.  It lives only as long as the session that
/// derived it.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct VaultKey {
    bytes: Vec<u8>,
}

impl VaultKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to build a cipher).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl PartialEq for VaultKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes.as_slice().ct_eq(other.bytes.as_slice()).into()
    }
}

impl Eq for VaultKey {}

impl fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VaultKey([REDACTED; {}])", self.bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_does_not_leak_bytes() {
        let key = VaultKey::new(vec![0xAB; 32]);
        let shown = format!("{key:?}");
        assert_eq!(shown, "VaultKey([REDACTED; 32])");
    }

    #[test]
    fn equality_compares_contents() {
        assert_eq!(VaultKey::new(vec![1, 2, 3]), VaultKey::new(vec![1, 2, 3]));
        assert_ne!(VaultKey::new(vec![1, 2, 3]), VaultKey::new(vec![1, 2, 4]));
        assert_ne!(VaultKey::new(vec![1, 2, 3]), VaultKey::new(vec![1, 2]));
    }
}
