use std::path::PathBuf;

use thiserror::Error;

/// Library-level error type returned by the ranking pipeline and its
/// collaborator clients.
///
/// Per-file extraction failures and per-document embedding failures are
/// non-fatal: they are wrapped in [`DocumentFailure`] entries and returned
/// alongside successful results. Variants surfacing from `evaluate` itself
/// abort the whole invocation.
#[derive(Debug, Error)]
pub enum RankerError {
    #[error("no candidate encoding could decode '{path}'")]
    UnsupportedEncoding { path: PathBuf },

    #[error("could not extract text from PDF '{path}': {message}")]
    CorruptDocument { path: PathBuf, message: String },

    #[error("embedding error: {0}")]
    Embedding(String),

    #[error("generation error: {0}")]
    Generation(String),

    #[error("none of the supplied resume files could be extracted")]
    NoUsableDocuments,

    #[error("job {0} not found in the stored collection")]
    UnknownJob(uuid::Uuid),

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// A non-fatal per-document failure, reported to the caller alongside the
/// records that did succeed. `name` identifies the offending document (file
/// stem or logical name).
#[derive(Debug)]
pub struct DocumentFailure {
    pub name: String,
    pub error: RankerError,
}

impl DocumentFailure {
    pub fn new(name: impl Into<String>, error: RankerError) -> Self {
        Self {
            name: name.into(),
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_encoding_names_the_file() {
        let err = RankerError::UnsupportedEncoding {
            path: PathBuf::from("resume.txt"),
        };
        assert!(err.to_string().contains("resume.txt"));
    }

    #[test]
    fn test_document_failure_carries_name_and_cause() {
        let failure = DocumentFailure::new(
            "broken.pdf",
            RankerError::CorruptDocument {
                path: PathBuf::from("broken.pdf"),
                message: "unexpected EOF".to_string(),
            },
        );
        assert_eq!(failure.name, "broken.pdf");
        assert!(failure.error.to_string().contains("unexpected EOF"));
    }
}
