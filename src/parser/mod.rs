//! Catalog ingestion: JSON input rows in, a normalized, validated
//! `Catalog` out. Row parsing/expansion lives in `json`; cross-reference
//! checks over the assembled catalog live in `validation`.

pub mod json;
pub mod validation;

pub use json::{load_catalog_from_dir, load_catalog_input, load_config_or_default, CatalogInput};
pub use validation::{validate_catalog, ValidationResult};

use crate::config::TimetableConfig;
use crate::error::Result;
use crate::types::Catalog;
use std::path::Path;

/// Load, expand, and validate a catalog from a directory containing
/// `catalog.json` and an optional `config.toml`.
pub fn load_and_validate(dir: &Path) -> Result<(Catalog, TimetableConfig)> {
    let config = load_config_or_default(dir);
    let catalog = load_catalog_from_dir(dir, &config)?;
    validate_catalog(&catalog)?;
    Ok((catalog, config))
}
