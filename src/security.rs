use subtle::ConstantTimeEq;

/// Constant-time check of a client-supplied admin key against the configured
/// one. The reload endpoint gates on this so the key cannot be recovered by
/// timing the comparison.
pub fn verify_admin_key(provided: &str, expected: &str) -> bool {
    if provided.len() != expected.len() {
        return false;
    }
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}
