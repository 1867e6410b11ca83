//! Source parsers.
//!
//! - `script`: JS/TS/JSX/TSX via swc
//! - `markup`: a tolerant HTML tokenizer for component templates
//! - `sfc`: splits a `.vue` file into its template and script blocks

pub mod markup;
pub mod script;
pub mod sfc;
