// src/export/logic.rs

use crate::config::Config;
use crate::core::logic::Core;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the projected grid of the stored roster.
    /// Returns false when there was nothing to export.
    pub fn export(
        pool: &DbPool,
        cfg: &Config,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<bool> {
        let path = expand_tilde(file);
        let path = path.as_path();
        ensure_writable(path, force)?;

        let (_, grid) = Core::load_grid(pool, cfg)?;
        if grid.is_empty() {
            warning("No employees to export.");
            return Ok(false);
        }

        match format {
            ExportFormat::Csv => export_csv(&grid, path)?,
            ExportFormat::Json => export_json(&grid, path)?,
        }

        Ok(true)
    }
}
