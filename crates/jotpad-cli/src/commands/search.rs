use std::path::Path;

use crate::commands::common::{normalize_search_query, open_store};
use crate::commands::list::print_notes;
use crate::error::CliError;

pub fn run_search(
    query: &str,
    limit: usize,
    as_json: bool,
    data_dir: &Path,
) -> Result<(), CliError> {
    let normalized_query = normalize_search_query(query)?;
    let store = open_store(data_dir);
    let mut notes = store.list(Some(&normalized_query)).items;
    notes.truncate(limit);

    print_notes(&notes, as_json)
}
