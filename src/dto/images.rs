use serde::Serialize;

use crate::domain::types::ImageReference;
use crate::uploads::ImageUrlResolver;

/// Stored image reference together with its display URL.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImageLinkDto {
    pub filename: String,
    pub url: String,
}

impl ImageLinkDto {
    pub fn new(image_file: &ImageReference, resolver: &ImageUrlResolver) -> Self {
        Self {
            filename: image_file.as_str().to_string(),
            url: resolver.url_for(image_file),
        }
    }
}
