//! Effective-language resolution for one request.
//!
//! The client's signal (query parameter or cookie) is untrusted input: it can
//! be absent, empty, or a code the site does not serve. Resolution is total —
//! every possible signal maps to a member of the supported set, so nothing
//! downstream ever handles an unsupported language.

/// Resolve the effective language for a request.
///
/// Exact, case-sensitive membership in `supported` is required; anything else
/// resolves to `default`. An unsupported code is never echoed back.
///
/// # Arguments
/// * `signal` - Raw client-provided language code, if any
/// * `supported` - Configured supported-language set
/// * `default` - Configured default language (must be in `supported`)
pub fn resolve_language(signal: Option<&str>, supported: &[String], default: &str) -> String {
    match signal {
        Some(code) if !code.is_empty() && supported.iter().any(|s| s == code) => code.to_string(),
        _ => default.to_string(),
    }
}
