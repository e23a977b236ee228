use ring::digest;

/// SHA-256 digest of `content` as lowercase hex.
pub fn content_digest(content: &[u8]) -> String {
    let hash = digest::digest(&digest::SHA256, content);
    hash.as_ref().iter().map(|b| format!("{b:02x}")).collect()
}

/// True when `current` no longer hashes to `original_digest`.
pub fn detect_modifications(original_digest: &str, current: &[u8]) -> bool {
    content_digest(current) != original_digest
}

/// Digest-equality check against a stored expected digest.
///
/// This is a plain hash comparison, not signature verification; it proves
/// the bytes are unchanged, never who produced them. Callers needing
/// provenance must layer an asymmetric signature scheme on top.
pub fn digests_match(expected_digest: &str, data: &[u8]) -> bool {
    content_digest(data) == expected_digest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_matches_the_sha256_test_vector() {
        assert_eq!(
            content_digest(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            content_digest(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn digest_is_deterministic() {
        let content = b"Company: Acme Corp\nValuation: $5 million";
        assert_eq!(content_digest(content), content_digest(content));
    }

    #[test]
    fn unchanged_content_is_not_flagged() {
        let content = b"term sheet body";
        let original = content_digest(content);
        assert!(!detect_modifications(&original, content));
    }

    #[test]
    fn any_byte_change_is_flagged() {
        let original = content_digest(b"term sheet body");
        assert!(detect_modifications(&original, b"term sheet bodY"));
        assert!(detect_modifications(&original, b""));
    }

    #[test]
    fn digests_match_is_the_inverse_check() {
        let data = b"signed payload";
        let expected = content_digest(data);
        assert!(digests_match(&expected, data));
        assert!(!digests_match(&expected, b"signed payloat"));
    }
}
