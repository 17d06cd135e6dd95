//! The persisted side of consent: storage keys, cookie attributes, the
//! versioned JSON codec, the storage-cell abstraction, and audit entries.
//!
//! The consent record lives in a single storage cell (a cookie) whose name is
//! derived from a namespace and a consent version. Bumping either changes the
//! key, which the engine treats as a forced re-consent.
//!
//! | Piece | Responsibility |
//! |-------|----------------|
//! | [`key`] | Deterministic storage-key derivation |
//! | [`options`] | [`ConsentCookieOptions`](options::ConsentCookieOptions): expiry, SameSite, Secure, Path, Domain |
//! | [`codec`] | JSON encode/decode with schema-version gate and legacy migration |
//! | [`cell`] | [`ConsentStorage`](cell::ConsentStorage) trait, in-memory jar, headless no-op |
//! | [`audit`] | Flattened [`AuditEntry`](audit::AuditEntry) records for host audit logs |

pub mod audit;
pub mod cell;
pub mod codec;
pub mod key;
pub mod options;
