//! Visitor cookie consent.

/// Optional cookie categories a visitor accepted.
///
/// Necessary cookies (the domain preference, the admin session) are always
/// on and not part of the decision. The persisted form lists the accepted
/// categories separated by `|`, always starting with `necessary`, e.g.
/// `necessary|analytics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CookieConsent {
    pub analytics: bool,
    pub marketing: bool,
}

impl CookieConsent {
    pub const ALL: CookieConsent = CookieConsent {
        analytics: true,
        marketing: true,
    };

    pub const NECESSARY_ONLY: CookieConsent = CookieConsent {
        analytics: false,
        marketing: false,
    };

    pub fn encode(&self) -> String {
        let mut parts = vec!["necessary"];
        if self.analytics {
            parts.push("analytics");
        }
        if self.marketing {
            parts.push("marketing");
        }
        parts.join("|")
    }

    /// Parses a persisted value. Anything malformed reads as "not decided".
    pub fn parse(raw: &str) -> Option<Self> {
        let mut consent = CookieConsent::default();
        let mut necessary = false;
        for part in raw.split('|') {
            match part {
                "necessary" => necessary = true,
                "analytics" => consent.analytics = true,
                "marketing" => consent.marketing = true,
                _ => return None,
            }
        }
        necessary.then_some(consent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_forms() {
        assert_eq!(CookieConsent::ALL.encode(), "necessary|analytics|marketing");
        assert_eq!(CookieConsent::NECESSARY_ONLY.encode(), "necessary");
        assert_eq!(
            CookieConsent::parse("necessary|marketing"),
            Some(CookieConsent {
                analytics: false,
                marketing: true
            })
        );
    }

    #[test]
    fn test_malformed_values_read_as_undecided() {
        assert_eq!(CookieConsent::parse(""), None);
        assert_eq!(CookieConsent::parse("analytics"), None);
        assert_eq!(CookieConsent::parse("necessary|tracking"), None);
        assert_eq!(CookieConsent::parse(r#"{"necessary":true}"#), None);
    }
}
