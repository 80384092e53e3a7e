use std::sync::Arc;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error("font `{0}` is not part of the active font set")]
    /// The requested font name is absent from the active font set
    FontNotFound(String),

    #[error("failed to load font `{name}`")]
    /// The font is known but its data could not be fetched or parsed
    FontLoad {
        name: String,
        #[source]
        source: Arc<PDFError>,
    },

    #[error("page {0} does not exist in the document")]
    /// A page index was used that the document doesn't contain
    PageMissing(usize),
}

impl PDFError {
    /// Whether this error means the font simply isn't known, in which case callers
    /// should substitute the fallback font rather than give up
    pub fn is_font_not_found(&self) -> bool {
        matches!(self, PDFError::FontNotFound(_))
    }
}
