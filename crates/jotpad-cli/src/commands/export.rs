use std::path::{Path, PathBuf};

use chrono::Utc;
use jotpad_core::export::{render_notes_export, suggested_export_file_name};

use crate::cli::ExportFormat;
use crate::commands::common::{open_store, write_output};
use crate::error::CliError;

pub fn run_export(
    format: ExportFormat,
    output_path: Option<&Path>,
    data_dir: &Path,
) -> Result<(), CliError> {
    let store = open_store(data_dir);
    let rendered = render_notes_export(&store.state().items, format.into())?;
    let now_ms = Utc::now().timestamp_millis();
    let target = output_path.map(|path| export_target(path, format, now_ms));

    write_output(&rendered, target.as_deref())
}

/// A directory target gets a timestamped file name inside it.
pub fn export_target(path: &Path, format: ExportFormat, timestamp_ms: i64) -> PathBuf {
    if path.is_dir() {
        path.join(suggested_export_file_name(format.into(), timestamp_ms))
    } else {
        path.to_path_buf()
    }
}
