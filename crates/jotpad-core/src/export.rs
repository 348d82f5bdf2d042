//! Note export helpers shared by Jotpad front ends.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::Note;

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// Render notes as pretty-printed JSON in the persisted layout.
pub fn render_json_export(notes: &[Note]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(notes)
}

/// Render notes in Markdown with frontmatter blocks.
#[must_use]
pub fn render_markdown_export(notes: &[Note]) -> String {
    let mut output = String::new();

    for (index, note) in notes.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }

        let _ = writeln!(output, "---");
        let _ = writeln!(output, "id: {}", note.id);
        let _ = writeln!(output, "title: {}", frontmatter_value(&note.title));
        let _ = writeln!(output, "created_at: {}", note.created_at);
        let _ = writeln!(output, "updated_at: {}", note.updated_at);
        let _ = writeln!(output, "---");
        let _ = writeln!(output);
        output.push_str(&note.content);
        output.push('\n');
    }

    output
}

/// Render notes based on selected export format.
pub fn render_notes_export(notes: &[Note], format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => render_json_export(notes),
        ExportFormat::Markdown => Ok(render_markdown_export(notes)),
    }
}

/// Build a deterministic default file name for export flows.
#[must_use]
pub fn suggested_export_file_name(format: ExportFormat, timestamp_ms: i64) -> String {
    format!("jotpad-export-{timestamp_ms}.{}", format.extension())
}

// Titles are free text; quote them so colons or leading dashes stay inert.
fn frontmatter_value(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| String::from("\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::decode_notes;
    use pretty_assertions::assert_eq;

    fn sample_note() -> Note {
        Note {
            id: "cccccccc-cccc-4ccc-8ccc-111111111111".parse().unwrap(),
            title: "Plan: week 3".to_string(),
            content: "# Hello export".to_string(),
            created_at: 123,
            updated_at: 456,
        }
    }

    #[test]
    fn render_markdown_export_includes_frontmatter_and_content() {
        let rendered = render_markdown_export(&[sample_note()]);

        assert!(rendered.contains("id: cccccccc-cccc-4ccc-8ccc-111111111111"));
        assert!(rendered.contains("title: \"Plan: week 3\""));
        assert!(rendered.contains("created_at: 123"));
        assert!(rendered.contains("updated_at: 456"));
        assert!(rendered.ends_with("---\n\n# Hello export\n"));
    }

    #[test]
    fn render_json_export_matches_storage_layout() {
        let notes = vec![sample_note()];
        let rendered = render_json_export(&notes).unwrap();

        assert!(rendered.contains("\"createdAt\": 123"));
        assert_eq!(decode_notes(&rendered).unwrap(), notes);
    }

    #[test]
    fn render_notes_export_dispatches_on_format() {
        let notes = vec![sample_note()];
        assert!(render_notes_export(&notes, ExportFormat::Json)
            .unwrap()
            .starts_with('['));
        assert!(render_notes_export(&notes, ExportFormat::Markdown)
            .unwrap()
            .starts_with("---"));
    }

    #[test]
    fn suggested_export_file_name_uses_format_extension() {
        assert_eq!(
            suggested_export_file_name(ExportFormat::Json, 123),
            "jotpad-export-123.json"
        );
        assert_eq!(
            suggested_export_file_name(ExportFormat::Markdown, 456),
            "jotpad-export-456.md"
        );
    }
}
