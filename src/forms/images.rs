use std::path::Path;

use actix_multipart::form::{MultipartForm, tempfile::TempFile};

/// Multipart body of the image upload endpoint.
#[derive(MultipartForm)]
pub struct UploadImageForm {
    #[multipart(limit = "10MB")]
    pub file: TempFile,
}

impl UploadImageForm {
    /// Extension of the client-supplied filename including the leading dot,
    /// or an empty string when there is none.
    pub fn extension(&self) -> String {
        file_extension(self.file.file_name.as_deref())
    }

    pub fn content_type(&self) -> Option<String> {
        self.file.content_type.as_ref().map(ToString::to_string)
    }
}

fn file_extension(file_name: Option<&str>) -> String {
    file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}
