use thiserror::Error;

/// Failures from digesting, sealing or opening document content.
///
/// The underlying primitives report no detail on purpose, so these variants
/// carry none either.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("envelope too short or malformed")]
    Envelope,
    #[error("key derivation failed")]
    KeyDerivation,
    #[error("encryption failed")]
    SealFailure,
    #[error("decryption failed: wrong passphrase or modified data")]
    OpenFailure,
    #[error("secure randomness unavailable")]
    Rng,
}
