use url::Url;

use crate::error::Result;
use crate::models::Media;

/// Turns CMS media references into displayable URLs.
#[derive(Debug, Clone)]
pub struct MediaResolver {
    base: Url,
}

impl MediaResolver {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base: Url::parse(base_url)?,
        })
    }

    /// Absolute references pass through, relative ones are appended to the
    /// media base, keeping any path prefix the base has. Absent or empty
    /// references resolve to nothing.
    pub fn resolve(&self, media: Option<&Media>) -> Option<String> {
        let reference = media?.url.as_deref()?.trim();
        if reference.is_empty() {
            return None;
        }

        if reference.starts_with("http://")
            || reference.starts_with("https://")
            || reference.starts_with("//")
        {
            return Some(reference.to_string());
        }

        let joined = format!(
            "{}/{}",
            self.base.as_str().trim_end_matches('/'),
            reference.trim_start_matches('/')
        );
        match Url::parse(&joined) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                tracing::debug!("Unresolvable media reference {}: {}", reference, e);
                None
            }
        }
    }
}
