//! Extraction engine: eligibility, keys, catalogs, parsers and rewriters.

pub mod catalog;
pub mod dispatch;
pub mod eligibility;
pub mod file_scanner;
pub mod format;
pub mod generate;
pub mod key;
pub mod parsers;
pub mod rewrite;

pub use catalog::{Catalog, CatalogSink, CatalogStore, RecordOutcome};
pub use dispatch::{FileKind, process_file};
pub use generate::{GenerateOptions, GenerateStats, GeneratedCatalog, generate_catalog};
pub use rewrite::{RewriteContext, RewriteResult};
