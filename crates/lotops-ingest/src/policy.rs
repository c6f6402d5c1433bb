use std::path::Path;

/// Admission errors raised before any parsing happens.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("file is empty")]
    Empty,

    #[error("file is {size} bytes, over the {max} byte limit")]
    Oversized { size: usize, max: usize },

    #[error("no usable extension on {0:?}")]
    MissingExtension(String),

    #[error("extension {extension:?} is not an accepted feed format (accepted: {allowed})")]
    UnsupportedExtension { extension: String, allowed: String },

    #[error("content type {content_type:?} is not an accepted feed format (accepted: {allowed})")]
    UnsupportedContentType {
        content_type: String,
        allowed: String,
    },

    #[error("{count} files in one registration, over the {max} file limit")]
    BatchTooLarge { count: usize, max: usize },
}

/// Import file admission policy.
///
/// Enforced per file before a byte of CSV is parsed, without coupling to
/// the registry or store implementations.
pub struct ImportPolicy {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
    allowed_content_types: Vec<String>,
    max_files_per_batch: usize,
}

impl ImportPolicy {
    pub fn new(
        max_file_size: usize,
        allowed_extensions: Vec<String>,
        allowed_content_types: Vec<String>,
        max_files_per_batch: usize,
    ) -> Self {
        Self {
            max_file_size,
            allowed_extensions,
            allowed_content_types,
            max_files_per_batch,
        }
    }

    /// Refuse a registration outright when it carries too many files.
    /// There is no partial acceptance of an oversized batch.
    pub fn validate_batch_size(&self, count: usize) -> Result<(), PolicyError> {
        if count > self.max_files_per_batch {
            return Err(PolicyError::BatchTooLarge {
                count,
                max: self.max_files_per_batch,
            });
        }

        Ok(())
    }

    /// Admit one file. Checks run size first, then filename, then content
    /// type; `content_type` is optional because multipart parts may omit it.
    pub fn admit(
        &self,
        filename: &str,
        content_type: Option<&str>,
        size: usize,
    ) -> Result<(), PolicyError> {
        self.check_size(size)?;
        self.check_extension(filename)?;
        if let Some(content_type) = content_type {
            self.check_content_type(content_type)?;
        }
        Ok(())
    }

    fn check_size(&self, size: usize) -> Result<(), PolicyError> {
        match size {
            0 => Err(PolicyError::Empty),
            n if n > self.max_file_size => Err(PolicyError::Oversized {
                size: n,
                max: self.max_file_size,
            }),
            _ => Ok(()),
        }
    }

    fn check_extension(&self, filename: &str) -> Result<(), PolicyError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| PolicyError::MissingExtension(filename.to_string()))?
            .to_lowercase();

        if self.allowed_extensions.contains(&extension) {
            return Ok(());
        }

        Err(PolicyError::UnsupportedExtension {
            extension,
            allowed: self.allowed_extensions.join(", "),
        })
    }

    fn check_content_type(&self, content_type: &str) -> Result<(), PolicyError> {
        // Multipart parts may append parameters ("text/csv; charset=utf-8");
        // only the media type itself is matched.
        let essence = match content_type.split_once(';') {
            Some((media, _params)) => media,
            None => content_type,
        };
        let essence = essence.trim().to_lowercase();

        if self.allowed_content_types.iter().any(|ct| *ct == essence) {
            return Ok(());
        }

        Err(PolicyError::UnsupportedContentType {
            content_type: content_type.to_string(),
            allowed: self.allowed_content_types.join(", "),
        })
    }
}
