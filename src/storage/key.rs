//! Storage-key derivation.
//!
//! The cell name is `sanitize(namespace) + "__v" + sanitize(version)`. The
//! derivation is deterministic so two page loads with the same configuration
//! always read and write the same cell, and any namespace/version change
//! lands on a different cell (triggering forced re-consent).

/// Default namespace: the library name.
pub const DEFAULT_NAMESPACE: &str = env!("CARGO_PKG_NAME");

/// Default consent version.
pub const DEFAULT_VERSION: &str = "1";

/// Lowercase the input and collapse every run of characters outside
/// `[a-z0-9.]` into a single `-`, trimming leading/trailing dashes.
fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_dash = false;
    for ch in raw.chars() {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_alphanumeric() || ch == '.' {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch);
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Derive the storage key for a namespace/version pair, falling back to the
/// library defaults when unset.
pub fn build_storage_key(namespace: Option<&str>, version: Option<&str>) -> String {
    let namespace = sanitize(namespace.unwrap_or(DEFAULT_NAMESPACE));
    let version = sanitize(version.unwrap_or(DEFAULT_VERSION));
    format!("{namespace}__v{version}")
}
