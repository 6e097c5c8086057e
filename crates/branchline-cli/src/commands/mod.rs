//! Command handlers.
//!
//! Each handler translates parsed arguments into core calls and renders the
//! result. No business rules live here.

pub mod completions;
pub mod config;
pub mod franchise;
pub mod init;
pub mod office;
pub mod product;

use std::fmt::Display;

use serde::de::DeserializeOwned;
use tracing::debug;

use branchline_adapters::JsonFileStore;
use branchline_core::application::Catalog;

use crate::{
    cli::GlobalArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
};

/// Open the configured store and wire the services against it.
pub fn open_catalog(global: &GlobalArgs, config: &AppConfig) -> CliResult<Catalog> {
    let path = config.data_path(global.data.as_deref());
    debug!(path = %path.display(), "opening store");

    let store = JsonFileStore::open(&path)?;
    Ok(store.catalog())
}

/// Parse a `--json` payload into a raw input record.
pub(crate) fn parse_payload<T: DeserializeOwned>(kind: &str, raw: &str) -> CliResult<T> {
    serde_json::from_str(raw).with_cli_context(|| format!("Malformed {kind} payload"))
}

/// `#3`, or `#-` for a record that has no id yet.
pub(crate) fn tag<I: Display>(id: Option<I>) -> String {
    match id {
        Some(id) => format!("#{id}"),
        None => "#-".into(),
    }
}
