//! Share-intent URL construction and the delayed fallback plan.

use std::time::Instant;
use url::Url;

/// Build the share-intent URL with the percent-encoded text template.
///
/// The rendered board image is never attached; the intent API only takes
/// text.
pub fn share_url(intent_base: &str, text: &str) -> Result<Url, url::ParseError> {
    Url::parse_with_params(intent_base, &[("text", text)])
}

/// A share action deferred until after a capture failure's grace delay.
#[derive(Debug, Clone)]
pub struct PendingShare {
    pub url: Url,
    pub due: Instant,
}

impl PendingShare {
    /// Whether the fallback is ready to fire.
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }
}
