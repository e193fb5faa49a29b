//! Fingerprint of the loaded price file.

use sha2::{Digest, Sha256};

/// Calculate the SHA-256 checksum of the raw source bytes.
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn calculate_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_consistency() {
        let content = b"#date,#adm1+name\n2020-01-15,NCR\n";
        assert_eq!(calculate_checksum(content), calculate_checksum(content));
    }

    #[test]
    fn test_different_content_different_checksum() {
        let checksum1 = calculate_checksum(b"2020-01-15,NCR");
        let checksum2 = calculate_checksum(b"2020-01-15,CAR");
        assert_ne!(checksum1, checksum2);
        assert_eq!(checksum1.len(), 64);
    }
}
