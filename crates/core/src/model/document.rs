use thiserror::Error;

/// Upper bound on the size of an uploaded document (10 MiB).
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

const PDF_MAGIC: &[u8] = b"%PDF";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DocumentError {
    #[error("The file is empty. Please choose a PDF with some content.")]
    Empty,

    #[error("File size too large. Please upload a file smaller than 10MB.")]
    TooLarge { size: usize },

    #[error("Only PDF files are supported.")]
    NotPdf,
}

/// A PDF that passed local checks and may be sent to the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfDocument {
    file_name: String,
    bytes: Vec<u8>,
}

impl PdfDocument {
    /// Validate an uploaded file before any network call is made.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError` when the file is empty, larger than
    /// `MAX_DOCUMENT_BYTES`, or neither named `*.pdf` nor starting with the PDF magic bytes.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, DocumentError> {
        let file_name = file_name.into();
        if bytes.is_empty() {
            return Err(DocumentError::Empty);
        }
        if bytes.len() > MAX_DOCUMENT_BYTES {
            return Err(DocumentError::TooLarge { size: bytes.len() });
        }
        let has_pdf_name = std::path::Path::new(&file_name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if !has_pdf_name && !bytes.starts_with(PDF_MAGIC) {
            return Err(DocumentError::NotPdf);
        }
        Ok(Self { file_name, bytes })
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
