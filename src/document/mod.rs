//! Page-level access to a loaded PDF.
//!
//! The rest of the crate never touches `lopdf` directly: it asks a
//! [`PageSource`] for the text of page N and for page N as a standalone
//! document.

mod extract;
mod source;

pub use extract::extract_page;
pub use source::{PageSource, PageView, SourceDocument};
