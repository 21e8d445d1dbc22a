//! Candidate file validation.
//!
//! Pure predicate with no side effects: a file is accepted only if its MIME
//! type is on the allow-list and its size is within the cap. Rejections carry
//! a human-readable reason and never abort the rest of a batch.

use crate::entry::CandidateFile;

/// MIME types accepted for product images
pub const ALLOWED_CONTENT_TYPES: [&str; 4] =
    ["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// Maximum accepted file size (5 MiB)
pub const MAX_FILE_BYTES: usize = 5 * 1024 * 1024;

/// Why a candidate file was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// MIME type not on the allow-list
    UnsupportedType(String),
    /// File exceeds [`MAX_FILE_BYTES`]
    TooLarge { size: usize },
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::UnsupportedType(mime) => write!(
                f,
                "unsupported format {mime}; only JPEG, PNG and WEBP are allowed"
            ),
            RejectReason::TooLarge { size } => write!(
                f,
                "file is {size} bytes; images must not exceed {MAX_FILE_BYTES} bytes (5 MiB)"
            ),
        }
    }
}

/// Check whether a candidate file is an acceptable product image
pub fn validate(file: &CandidateFile) -> Result<(), RejectReason> {
    if !ALLOWED_CONTENT_TYPES
        .iter()
        .any(|allowed| file.content_type.eq_ignore_ascii_case(allowed))
    {
        return Err(RejectReason::UnsupportedType(file.content_type.clone()));
    }

    if file.bytes.len() > MAX_FILE_BYTES {
        return Err(RejectReason::TooLarge {
            size: file.bytes.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn candidate(content_type: &str, size: usize) -> CandidateFile {
        CandidateFile {
            name: "photo.bin".to_string(),
            content_type: content_type.to_string(),
            bytes: Bytes::from(vec![0u8; size]),
        }
    }

    #[test]
    fn test_accepts_allowed_types() {
        for mime in ALLOWED_CONTENT_TYPES {
            assert!(validate(&candidate(mime, 1024)).is_ok(), "{mime}");
        }
    }

    #[test]
    fn test_type_check_is_case_insensitive() {
        assert!(validate(&candidate("IMAGE/JPEG", 1024)).is_ok());
    }

    #[test]
    fn test_rejects_unsupported_type() {
        let result = validate(&candidate("application/pdf", 1024));
        assert_eq!(
            result,
            Err(RejectReason::UnsupportedType("application/pdf".to_string()))
        );
    }

    #[test]
    fn test_rejects_oversized_file() {
        let result = validate(&candidate("image/png", MAX_FILE_BYTES + 1));
        assert!(matches!(result, Err(RejectReason::TooLarge { .. })));
    }

    #[test]
    fn test_accepts_file_at_exact_limit() {
        assert!(validate(&candidate("image/png", MAX_FILE_BYTES)).is_ok());
    }

    #[test]
    fn test_reject_reason_is_human_readable() {
        let reason = RejectReason::UnsupportedType("text/plain".to_string());
        assert!(reason.to_string().contains("text/plain"));

        let reason = RejectReason::TooLarge { size: 6_000_000 };
        assert!(reason.to_string().contains("6000000"));
    }
}
