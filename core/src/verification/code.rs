//! Verification code generation

use rand::Rng;
use smartsms_shared::config::CodeAlgorithm;

const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a numeric code of `len` digits
///
/// Every position is drawn uniformly; leading zeros are allowed.
pub fn simple(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Generates a mixed-case alphanumeric code of `len` characters
pub fn random(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| char::from(ALPHANUMERIC[rng.gen_range(0..ALPHANUMERIC.len())]))
        .collect()
}

/// Generates a code using the configured algorithm
pub fn generate(algorithm: CodeAlgorithm, len: usize) -> String {
    match algorithm {
        CodeAlgorithm::Simple => simple(len),
        CodeAlgorithm::Random => random(len),
    }
}
