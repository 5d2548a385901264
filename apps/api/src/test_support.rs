//! Fixtures shared by unit and router tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use docx_rs::{Docx, Paragraph, Run};

use crate::llm_client::{CompletionClient, CompletionError};

type Responder = dyn Fn(&str) -> Result<String, CompletionError> + Send + Sync;

/// Completion client that answers from a closure and records every prompt it saw.
pub struct StubCompletion {
    responder: Box<Responder>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubCompletion {
    pub fn new(
        responder: impl Fn(&str) -> Result<String, CompletionError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            responder: Box::new(responder),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn fixed(reply: &'static str) -> Arc<Self> {
        Self::new(move |_| Ok(reply.to_string()))
    }

    pub fn failing() -> Arc<Self> {
        Self::new(|_| {
            Err(CompletionError::Api {
                status: 503,
                message: "upstream unavailable".to_string(),
            })
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for StubCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.responder)(prompt)
    }
}

/// Builds a DOCX with one paragraph per entry.
pub fn docx_fixture(paragraphs: &[&str]) -> Vec<u8> {
    let docx = paragraphs.iter().fold(Docx::new(), |doc, text| {
        doc.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)))
    });
    let mut cursor = std::io::Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).unwrap();
    cursor.into_inner()
}

/// Builds a single-page PDF showing `text` in Helvetica, with a correct xref table.
pub fn pdf_fixture(text: &str) -> Vec<u8> {
    let content = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", index + 1, body).as_bytes());
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    out
}

pub const BOUNDARY: &str = "screener-test-boundary";

/// A part of a multipart/form-data body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, filename, content) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(content);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
