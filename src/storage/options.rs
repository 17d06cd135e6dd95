use cookie::{Cookie, SameSite};
use time::Duration;

/// Attributes for the persisted consent cell.
///
/// Expiry is expressed in days ([`max_age_days`](Self::max_age_days)) unless
/// an explicit [`max_age_seconds`](Self::max_age_seconds) override is set;
/// both are clamped to zero or above. `secure: None` means "auto": the cell
/// is marked `Secure` whenever the host reports a secure origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsentCookieOptions {
    pub max_age_days: i64,
    pub max_age_seconds: Option<i64>,
    pub same_site: SameSite,
    pub secure: Option<bool>,
    pub path: String,
    pub domain: Option<String>,
}

impl Default for ConsentCookieOptions {
    fn default() -> Self {
        Self {
            max_age_days: 365,
            max_age_seconds: None,
            same_site: SameSite::Lax,
            secure: None,
            path: "/".to_string(),
            domain: None,
        }
    }
}

impl ConsentCookieOptions {
    /// Effective Max-Age, never negative.
    pub fn max_age(&self) -> Duration {
        match self.max_age_seconds {
            Some(seconds) => Duration::seconds(seconds.max(0)),
            None => Duration::days(self.max_age_days.max(0)),
        }
    }

    /// Effective Secure flag for the given origin.
    pub fn secure_for_origin(&self, secure_origin: bool) -> bool {
        self.secure.unwrap_or(secure_origin)
    }

    /// Assemble the storage cell with these attributes.
    pub fn build_cookie(&self, key: &str, value: String, secure_origin: bool) -> Cookie<'static> {
        let mut builder = Cookie::build((key.to_string(), value))
            .path(self.path.clone())
            .same_site(self.same_site)
            .secure(self.secure_for_origin(secure_origin))
            .max_age(self.max_age());
        if let Some(domain) = &self.domain {
            builder = builder.domain(domain.clone());
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_expiry_is_one_year() {
        let opts = ConsentCookieOptions::default();
        assert_eq!(opts.max_age(), Duration::days(365));
    }

    #[test]
    fn test_seconds_override_wins() {
        let opts = ConsentCookieOptions {
            max_age_seconds: Some(3600),
            ..Default::default()
        };
        assert_eq!(opts.max_age(), Duration::seconds(3600));
    }

    #[test]
    fn test_negative_expiry_clamps_to_zero() {
        let days = ConsentCookieOptions {
            max_age_days: -5,
            ..Default::default()
        };
        assert_eq!(days.max_age(), Duration::ZERO);

        let seconds = ConsentCookieOptions {
            max_age_seconds: Some(-1),
            ..Default::default()
        };
        assert_eq!(seconds.max_age(), Duration::ZERO);
    }

    #[test]
    fn test_secure_auto_follows_origin() {
        let opts = ConsentCookieOptions::default();
        assert!(opts.secure_for_origin(true));
        assert!(!opts.secure_for_origin(false));

        let forced_off = ConsentCookieOptions {
            secure: Some(false),
            ..Default::default()
        };
        assert!(!forced_off.secure_for_origin(true));
    }

    #[test]
    fn test_build_cookie_carries_attributes() {
        let opts = ConsentCookieOptions {
            domain: Some("example.com.br".to_string()),
            same_site: SameSite::Strict,
            ..Default::default()
        };
        let cookie = opts.build_cookie("lgpd-consent__v1", "{}".to_string(), true);
        assert_eq!(cookie.name(), "lgpd-consent__v1");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.domain(), Some("example.com.br"));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(Duration::days(365)));
    }
}
