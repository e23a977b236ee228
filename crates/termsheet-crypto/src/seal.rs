use std::num::NonZeroU32;

use ring::aead::{AES_256_GCM, Aad, LessSafeKey, NONCE_LEN, Nonce, UnboundKey};
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};

use crate::CryptoError;

const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;
const PBKDF2_ITERATIONS: NonZeroU32 = NonZeroU32::new(100_000).unwrap();

/// Encrypts `content` under a passphrase-derived AES-256-GCM key.
///
/// Envelope layout: 16-byte salt, 12-byte nonce, ciphertext with the auth
/// tag appended. Salt and nonce are fresh per call, so sealing the same
/// content twice yields different envelopes.
pub fn seal(content: &[u8], passphrase: &str) -> Result<Vec<u8>, CryptoError> {
    let rng = SystemRandom::new();
    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt).map_err(|_| CryptoError::Rng)?;
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rng.fill(&mut nonce_bytes).map_err(|_| CryptoError::Rng)?;

    let key = derive_key(passphrase, &salt)?;
    let mut in_out = content.to_vec();
    key.seal_in_place_append_tag(
        Nonce::assume_unique_for_key(nonce_bytes),
        Aad::empty(),
        &mut in_out,
    )
    .map_err(|_| CryptoError::SealFailure)?;

    let mut envelope = Vec::with_capacity(SALT_LEN + NONCE_LEN + in_out.len());
    envelope.extend_from_slice(&salt);
    envelope.extend_from_slice(&nonce_bytes);
    envelope.extend_from_slice(&in_out);
    Ok(envelope)
}

/// Decrypts an envelope produced by [`seal`].
///
/// A wrong passphrase and a modified envelope are indistinguishable; both
/// fail authentication and surface as [`CryptoError::OpenFailure`].
pub fn open(envelope: &[u8], passphrase: &str) -> Result<Vec<u8>, CryptoError> {
    if envelope.len() < SALT_LEN + NONCE_LEN + AES_256_GCM.tag_len() {
        return Err(CryptoError::Envelope);
    }
    let (salt, rest) = envelope.split_at(SALT_LEN);
    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);

    let key = derive_key(passphrase, salt)?;
    let nonce =
        Nonce::try_assume_unique_for_key(nonce_bytes).map_err(|_| CryptoError::Envelope)?;
    let mut in_out = ciphertext.to_vec();
    let plain = key
        .open_in_place(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| CryptoError::OpenFailure)?;
    Ok(plain.to_vec())
}

fn derive_key(passphrase: &str, salt: &[u8]) -> Result<LessSafeKey, CryptoError> {
    let mut key_bytes = [0u8; KEY_LEN];
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        PBKDF2_ITERATIONS,
        salt,
        passphrase.as_bytes(),
        &mut key_bytes,
    );
    let unbound =
        UnboundKey::new(&AES_256_GCM, &key_bytes).map_err(|_| CryptoError::KeyDerivation)?;
    Ok(LessSafeKey::new(unbound))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_then_open_roundtrips() {
        let content = b"Company: Acme Corp\nValuation: $5 million";
        let envelope = seal(content, "correct horse").unwrap();
        let plain = open(&envelope, "correct horse").unwrap();
        assert_eq!(plain, content);
    }

    #[test]
    fn empty_content_roundtrips() {
        let envelope = seal(b"", "pw").unwrap();
        assert_eq!(open(&envelope, "pw").unwrap(), b"");
    }

    #[test]
    fn wrong_passphrase_fails_authentication() {
        let envelope = seal(b"secret terms", "right").unwrap();
        assert_eq!(open(&envelope, "wrong"), Err(CryptoError::OpenFailure));
    }

    #[test]
    fn tampered_ciphertext_fails_authentication() {
        let mut envelope = seal(b"secret terms", "pw").unwrap();
        let mid = SALT_LEN + NONCE_LEN + 2;
        envelope[mid] ^= 0x01;
        assert_eq!(open(&envelope, "pw"), Err(CryptoError::OpenFailure));
    }

    #[test]
    fn tampered_tag_fails_authentication() {
        let mut envelope = seal(b"secret terms", "pw").unwrap();
        let last = envelope.len() - 1;
        envelope[last] ^= 0x01;
        assert_eq!(open(&envelope, "pw"), Err(CryptoError::OpenFailure));
    }

    #[test]
    fn short_envelope_is_rejected_before_key_derivation() {
        assert_eq!(open(b"tiny", "pw"), Err(CryptoError::Envelope));
    }

    #[test]
    fn fresh_salt_and_nonce_per_seal() {
        let a = seal(b"same content", "pw").unwrap();
        let b = seal(b"same content", "pw").unwrap();
        assert_ne!(a, b);
    }
}
