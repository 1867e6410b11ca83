//! i18n-auto - extract hardcoded Chinese text into i18n catalogs
//!
//! i18n-auto finds Chinese literal text in JavaScript, TypeScript, JSX/TSX and
//! Vue single-file components, moves it into a key/text JSON catalog, and
//! rewrites each occurrence into a translation call. Catalogs for other
//! languages are generated from the base catalog through a translation
//! service.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and validation
//! - `core`: Extraction engine (parsers, rewriters, catalogs)
//! - `translate`: Translation service backends
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod translate;
pub mod utils;
