//! StarML markup: tokenizer and parser.
//!
//! ```
//! let doc = stardewui::markup::parse(r#"<label text={Name} />"#).unwrap();
//! assert_eq!(doc.root.tag(), "label");
//! ```

pub mod parser;
pub mod tokenizer;

pub use parser::{parse, ParseError};
pub use tokenizer::Token;
