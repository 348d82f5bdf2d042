use jotpad_core::storage::decode_notes;
use jotpad_core::store::WELCOME_TITLE;
use jotpad_core::{MemoryStorage, Note, NoteStore};
use pretty_assertions::assert_eq;

use crate::cli::ExportFormat;
use crate::commands::add::run_add;
use crate::commands::common::{
    default_editor, format_relative_time, normalize_content, normalize_note_identifier,
    normalize_search_query, note_preview, note_to_list_item, open_store,
    render_preview_document, resolve_note, truncate_chars,
};
use crate::commands::delete::run_delete;
use crate::commands::export::{export_target, run_export};
use crate::error::CliError;

fn note_with_id(id: &str, title: &str, updated_at: i64) -> Note {
    Note {
        id: id.parse().unwrap(),
        title: title.to_string(),
        content: String::new(),
        created_at: updated_at,
        updated_at,
    }
}

fn store_with(notes: &[Note]) -> NoteStore<MemoryStorage> {
    let mut store = NoteStore::new(MemoryStorage::with_notes(notes));
    store.initialize();
    store
}

#[test]
fn normalize_content_trims_and_rejects_empty() {
    assert_eq!(normalize_content("  hello  "), Some("hello".to_string()));
    assert_eq!(normalize_content(" \n\t "), None);
}

#[test]
fn normalize_content_keeps_multiline_text() {
    assert_eq!(
        normalize_content("line 1\nline 2\n"),
        Some("line 1\nline 2".to_string())
    );
}

#[test]
fn normalize_inputs_reject_blank_values() {
    assert!(matches!(
        normalize_search_query("   "),
        Err(CliError::EmptySearchQuery)
    ));
    assert!(matches!(
        normalize_note_identifier(""),
        Err(CliError::EmptyNoteId)
    ));
}

#[test]
fn default_editor_is_defined() {
    assert!(!default_editor().is_empty());
}

#[test]
fn format_relative_time_units() {
    let now = 10_000_000_000;
    assert_eq!(format_relative_time(now - 30_000, now), "just now");
    assert_eq!(format_relative_time(now - 120_000, now), "2m ago");
    assert_eq!(format_relative_time(now - 2 * 60 * 60_000, now), "2h ago");
    assert_eq!(format_relative_time(now - 3 * 24 * 60 * 60_000, now), "3d ago");
    assert_eq!(format_relative_time(now + 5_000, now), "just now");
}

#[test]
fn note_preview_skips_blank_lines_and_truncates() {
    let note = Note::new(
        "",
        "\n\nThis is a very long sentence that should be shortened\nsecond",
    );
    assert_eq!(note_preview(&note, 20), "This is a very lo...");
    assert_eq!(truncate_chars("short", 20), "short");
}

#[test]
fn note_to_list_item_keeps_raw_title() {
    let note = Note::new("", "# Body");
    let item = note_to_list_item(&note);
    assert_eq!(item.title, "");
    assert_eq!(item.preview, "# Body");
    assert_eq!(item.relative_time, "just now");
}

#[test]
fn preview_document_escapes_title_and_renders_body() {
    let note = Note::new("<img src=x onerror=alert(1)>", "**hi**");
    let html = render_preview_document(&note);

    assert!(html.contains("<h1 class=\"note-title\">&lt;img src=x onerror=alert(1)&gt;</h1>"));
    assert!(html.contains("<p><strong>hi</strong></p>"));
    assert!(!html.contains("<img"));
}

#[test]
fn preview_document_uses_untitled_fallback() {
    let html = render_preview_document(&Note::new(" ", ""));
    assert!(html.contains(">Untitled</h1>"));
}

#[test]
fn resolve_note_accepts_full_id_and_unique_prefix() {
    let first = note_with_id("aaaaaaaa-0000-4000-8000-000000000001", "first", 200);
    let second = note_with_id("aaaaaaaa-0000-4000-8000-000000000002", "second", 100);
    let other = note_with_id("bbbbbbbb-0000-4000-8000-000000000003", "other", 50);
    let store = store_with(&[first.clone(), second.clone(), other.clone()]);

    assert_eq!(
        resolve_note("AAAAAAAA-0000-4000-8000-000000000002", &store).unwrap(),
        second
    );
    assert_eq!(resolve_note("bbbb", &store).unwrap(), other);
    assert_eq!(
        resolve_note("aaaaaaaa-0000-4000-8000-0000000000", &store).map_err(|e| e.to_string()),
        Err(
            "ID prefix 'aaaaaaaa-0000-4000-8000-0000000000' is ambiguous; matches: \
             aaaaaaaa-0000, aaaaaaaa-0000"
                .to_string()
        )
    );
    assert!(matches!(
        resolve_note("cccc", &store),
        Err(CliError::NoteNotFound(query)) if query == "cccc"
    ));
    assert_eq!(resolve_note("aaaaaaaa-0000-4000-8000-000000000001", &store).unwrap(), first);
}

#[test]
fn add_then_delete_round_trips_through_notes_file() {
    let dir = tempfile::tempdir().unwrap();

    run_add(&["Buy".to_string(), "milk".to_string()], Some(" Errands "), None, dir.path())
        .unwrap();

    let store = open_store(dir.path());
    let items = &store.state().items;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "Errands");
    assert_eq!(items[0].content, "Buy milk");
    assert_eq!(items[1].title, WELCOME_TITLE);
    let created = items[0].id;

    run_delete(&created.to_string(), dir.path()).unwrap();

    let store = open_store(dir.path());
    assert_eq!(store.state().items.len(), 1);
    assert_eq!(store.get(&created), None);
}

#[test]
fn export_writes_json_collection_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("export.json");

    run_export(ExportFormat::Json, Some(&output), dir.path()).unwrap();

    let exported = decode_notes(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(exported.len(), 1);
    assert_eq!(exported[0].title, WELCOME_TITLE);
}

#[test]
fn export_into_directory_uses_timestamped_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("exports");
    std::fs::create_dir(&out_dir).unwrap();

    assert_eq!(
        export_target(&out_dir, ExportFormat::Markdown, 42),
        out_dir.join("jotpad-export-42.md")
    );
    let file = dir.path().join("notes.json");
    assert_eq!(export_target(&file, ExportFormat::Json, 42), file);

    run_export(ExportFormat::Markdown, Some(&out_dir), dir.path()).unwrap();

    let written: Vec<_> = std::fs::read_dir(&out_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(written.len(), 1);
    assert!(written[0].starts_with("jotpad-export-"));
    assert!(written[0].ends_with(".md"));
}

#[test]
fn completion_scripts_name_the_binary() {
    use crate::cli::CompletionShell;
    use crate::commands::completions::completion_script;

    for shell in [
        CompletionShell::Bash,
        CompletionShell::Zsh,
        CompletionShell::Fish,
        CompletionShell::PowerShell,
    ] {
        let script = String::from_utf8(completion_script(shell)).unwrap();
        assert!(script.contains("jot"), "{shell:?} script lacks binary name");
    }
}
