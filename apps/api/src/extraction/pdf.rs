/// Extracts the text of every page, concatenated in document order.
pub fn extract_pdf_text(data: &[u8]) -> Result<String, String> {
    pdf_extract::extract_text_from_mem(data)
        .map_err(|err| format!("Unable to extract text from the PDF document: {err}"))
}
