//! SHA-256 fingerprints of persisted artifacts.
//!
//! A fingerprint is computed over the exact bytes written to disk, so a
//! re-run on unchanged inputs yields the same digest and any edit to a
//! persisted file is detected by `verify_outputs`.

use sha2::{Digest, Sha256};

/// Lowercase 64-character hex SHA-256 of `bytes`.
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::fingerprint;

    #[test]
    fn empty_input_has_known_digest() {
        assert_eq!(
            fingerprint(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn digest_is_lowercase_hex() {
        let digest = fingerprint(b"guardian");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn single_byte_change_changes_digest() {
        assert_ne!(fingerprint(b"[true,false]"), fingerprint(b"[true,true]"));
    }
}
