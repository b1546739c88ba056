//! Password hashing and random code/suffix generation.
//!
//! Both are opaque collaborators of the core flows: `hash(password) → digest`,
//! `verify(password, digest) → bool`, and digit-string generation for OTP
//! codes and voter-number suffixes.

use rand::RngExt;

use crate::domain::types::OTP_CODE_LEN;

/// Default bcrypt cost factor.
pub const BCRYPT_COST: u32 = 12;

/// Hash a password with bcrypt (salted, one-way).
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, BCRYPT_COST)
}

/// Verify a password against a bcrypt digest.
pub fn verify_password(password: &str, digest: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(password, digest)
}

/// Charset for numeric codes.
const DIGITS: &[u8] = b"0123456789";

/// Generate a random 6-digit OTP code.
pub fn generate_otp_code() -> String {
    random_digits(OTP_CODE_LEN)
}

/// Random 4-digit voter-number suffix (0000–9999).
pub fn random_voter_no_suffix() -> u16 {
    rand::rng().random_range(0..10_000)
}

fn random_digits(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| DIGITS[rng.random_range(0..DIGITS.len())] as char)
        .collect()
}
