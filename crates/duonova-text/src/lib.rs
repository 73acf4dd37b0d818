//! DuoNova Text
//!
//! Turns uploaded documents into clean, section-aware plain text for
//! hybrid processing and for the heuristic fallback.
//!
//! # Architecture
//!
//! ```text
//! bytes → extract_document → StructuredDocument → TextNormalizer → text
//! ```
//!
//! Normalization is idempotent: feeding its output back in returns the same
//! string.
//!
//! # Examples
//!
//! ```
//! use duonova_text::TextNormalizer;
//!
//! let normalizer = TextNormalizer::new();
//! let text = normalizer.normalize("Jane   Doe  EXPERIENCE\nSoftware engi-\nneer at Acme");
//! assert_eq!(text, "Jane Doe\n\nEXPERIENCE\nSoftware engineer at Acme");
//! assert_eq!(normalizer.normalize(&text), text);
//! ```

#![warn(missing_docs)]

mod contacts;
mod document;
mod error;
mod extract;
mod normalizer;

pub use contacts::{detect_emails, detect_phone_numbers, detect_profile_links, detect_urls};
pub use document::{Anchor, LayoutLine, StructuredDocument};
pub use error::TextError;
pub use extract::{detect_file_type, extract_document, extract_text};
pub use normalizer::{TextNormalizer, SECTION_HEADINGS};
