//! Document integrity and confidentiality: SHA-256 content digests,
//! modification detection, and passphrase-based authenticated encryption.

mod digest;
mod error;
mod seal;

pub use digest::{content_digest, detect_modifications, digests_match};
pub use error::CryptoError;
pub use seal::{open, seal};
