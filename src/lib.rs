//! Flowing text layout and pagination for fixed-size PDF canvases.
//!
//! Text values are laid out into boxes on a page: wrapped, optionally shrunk to fit,
//! aligned and justified, and carried over onto continuation pages when they run past
//! the bottom of their box. The result is drawn onto any [Canvas], including the
//! [Document] PDF writer provided here.
//!
//! # Example
//!
//! ```no_run
//! use pdf_flow::layout::{LayoutConfig, TextBox, TextSchema};
//! use pdf_flow::{Document, FontSet, FontSource, Mm, Page, RenderSession};
//!
//! let fonts = FontSet::new("Body", FontSource::File("font.ttf".into()));
//! let config = LayoutConfig::default();
//!
//! let mut doc = Document::new(config.page_size);
//! fonts.embed_into(&mut doc).expect("can load fonts");
//! doc.add_page(Page::new(config.page_size));
//!
//! let schema = TextSchema::new("body", TextBox::new(Mm(20.0), Mm(20.0), Mm(170.0), Mm(40.0)));
//! let session = RenderSession::new(&fonts, config);
//! let report = session.render(&mut doc, 0, &[(&schema, "Hello, world!")]);
//! assert!(report.is_success());
//!
//! doc.write(std::fs::File::create("out.pdf").expect("can create file"))
//!     .expect("can write pdf");
//! ```

mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

mod content;

mod document;
pub use document::*;

mod font;
pub use font::*;

/// The text-flow pipeline: segmentation, wrapping, sizing, alignment and pagination
pub mod layout;

mod metrics;
pub use metrics::*;

mod page;
pub use page::*;

pub mod pagesize;
pub use pagesize::PageSize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod session;
pub use session::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

#[cfg(test)]
mod test_support;

/// Re-export PDF-writer functionality
pub use pdf_writer;
