use docx_rs::{read_docx, DocumentChild, Insert, InsertChild, Paragraph, ParagraphChild, Run, RunChild};

/// Joins the text of every body paragraph with `\n`, in document order.
/// Empty paragraphs still contribute a line; tables and headers are not read.
pub fn extract_docx_text(data: &[u8]) -> Result<String, String> {
    let package =
        read_docx(data).map_err(|err| format!("Unable to read the DOCX document: {err}"))?;

    let paragraphs: Vec<String> = package
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut buffer = String::new();
    for child in &paragraph.children {
        append_paragraph_child_text(child, &mut buffer);
    }
    buffer
}

fn append_paragraph_child_text(child: &ParagraphChild, buffer: &mut String) {
    match child {
        ParagraphChild::Run(run) => append_run_text(run, buffer),
        ParagraphChild::Insert(insert) => append_insert_text(insert, buffer),
        ParagraphChild::Hyperlink(hyperlink) => {
            for inner in &hyperlink.children {
                append_paragraph_child_text(inner, buffer);
            }
        }
        _ => {}
    }
}

fn append_insert_text(insert: &Insert, buffer: &mut String) {
    for child in &insert.children {
        if let InsertChild::Run(run) = child {
            append_run_text(run, buffer);
        }
    }
}

fn append_run_text(run: &Run, buffer: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(text) => buffer.push_str(&text.text),
            RunChild::Break(_) => buffer.push('\n'),
            RunChild::Tab(_) => buffer.push('\t'),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::docx_fixture;

    #[test]
    fn test_empty_paragraphs_keep_their_line() {
        let bytes = docx_fixture(&["Summary", "", "Experience"]);
        assert_eq!(extract_docx_text(&bytes).unwrap(), "Summary\n\nExperience");
    }

    #[test]
    fn test_multiple_runs_are_concatenated() {
        use docx_rs::{Docx, Run};

        let mut cursor = std::io::Cursor::new(Vec::new());
        Docx::new()
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("Skills: "))
                    .add_run(Run::new().add_text("Rust").bold()),
            )
            .build()
            .pack(&mut cursor)
            .unwrap();

        assert_eq!(extract_docx_text(cursor.get_ref()).unwrap(), "Skills: Rust");
    }

    #[test]
    fn test_non_zip_content_is_an_error() {
        let err = extract_docx_text(b"%PDF-1.4 not a word file").unwrap_err();
        assert!(err.starts_with("Unable to read the DOCX document"));
    }
}
