//! SHA-256 password hashing implementation.

use sha2::{Digest, Sha256};

use userhub_core::ports::PasswordHasher;

/// Unsalted SHA-256 digest over the password's UTF-8 bytes, encoded as
/// lowercase hex.
///
/// Stored credentials are exactly this digest, so the same computation must
/// run at registration and at login; any drift in case or encoding breaks
/// every account. Unsalted means identical passwords share a digest - a
/// salted KDF would be stronger but would invalidate all stored hashes.
pub struct Sha256PasswordHasher;

impl PasswordHasher for Sha256PasswordHasher {
    fn hash(&self, plaintext: &str) -> String {
        hex::encode(Sha256::digest(plaintext.as_bytes()))
    }

    fn verify(&self, plaintext: &str, digest: &str) -> bool {
        // Ordinal comparison, exact match only.
        self.hash(plaintext) == digest
    }
}
