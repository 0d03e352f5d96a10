use bytes::Bytes;

const BYTES_PER_MB: usize = 1024 * 1024;

/// An audio file received from a caller, held in memory for one request.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub filename: String,
    pub mime_type: String,
    pub data: Bytes,
}

impl AudioUpload {
    pub fn new(filename: String, mime_type: String, data: Bytes) -> Self {
        Self {
            filename,
            mime_type,
            data,
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

/// Limits applied to an upload before any vendor call is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_file_size_bytes: usize,
    pub allowed_mime_types: Vec<String>,
}

impl UploadPolicy {
    pub fn new(max_file_size_bytes: usize, allowed_mime_types: Vec<String>) -> Self {
        Self {
            max_file_size_bytes,
            allowed_mime_types,
        }
    }

    /// Matches the essence of `mime` (type/subtype, no parameters) against the allow-list.
    pub fn allows(&self, mime: &str) -> bool {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        self.allowed_mime_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(essence))
    }

    pub fn exceeds_limit(&self, size_bytes: usize) -> bool {
        size_bytes > self.max_file_size_bytes
    }

    pub fn max_file_size_mb(&self) -> usize {
        self.max_file_size_bytes.div_ceil(BYTES_PER_MB)
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 10 * BYTES_PER_MB,
            allowed_mime_types: default_allowed_mime_types(),
        }
    }
}

pub fn default_allowed_mime_types() -> Vec<String> {
    [
        "audio/mp4",
        "audio/m4a",
        "audio/mpeg",
        "audio/wav",
        "audio/webm",
        "audio/ogg",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
