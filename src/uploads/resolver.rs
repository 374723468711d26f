use crate::domain::types::ImageReference;

/// Join the configured base URL and a stored `image_file` value.
///
/// Plain concatenation: no separator is inserted, nothing is escaped and the
/// result is not checked for reachability. An empty `image_file` yields the
/// bare base URL, which callers must treat as "no image".
pub fn resolve(base_url: &str, image_file: &str) -> String {
    let mut url = String::with_capacity(base_url.len() + image_file.len());
    url.push_str(base_url);
    url.push_str(image_file);
    url
}

/// Resolver bound to the base URL chosen at startup.
#[derive(Debug, Clone)]
pub struct ImageUrlResolver {
    base_url: String,
}

impl ImageUrlResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Display URL for a stored reference.
    pub fn url_for(&self, image_file: &ImageReference) -> String {
        resolve(&self.base_url, image_file.as_str())
    }
}
