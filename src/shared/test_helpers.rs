use crate::core::error::{AppError, Result};
use crate::modules::storage::{BlobStore, StoredBlob};
use crate::modules::text_analytics::{Summarize, SummarizeError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Blob store kept in memory
#[derive(Default)]
pub struct InMemoryBlobStore {
    blobs: Mutex<HashMap<String, (Vec<u8>, String)>>,
    fail_uploads: bool,
}

#[allow(dead_code)]
impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose uploads always fail
    pub fn failing() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    pub fn with_blob(self, name: &str, data: Vec<u8>, content_type: &str) -> Self {
        self.blobs
            .lock()
            .unwrap()
            .insert(name.to_string(), (data, content_type.to_string()));
        self
    }

    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.blobs.lock().unwrap().get(name).map(|(d, _)| d.clone())
    }

    pub fn names(&self) -> Vec<String> {
        self.blobs.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    fn container_name(&self) -> &str {
        "uploaded-files"
    }

    async fn ensure_container_exists(&self) -> Result<()> {
        Ok(())
    }

    async fn upload(&self, name: &str, data: Vec<u8>, content_type: &str) -> Result<()> {
        if self.fail_uploads {
            return Err(AppError::Storage("simulated outage".to_string()));
        }
        self.blobs
            .lock()
            .unwrap()
            .insert(name.to_string(), (data, content_type.to_string()));
        Ok(())
    }

    async fn download(&self, name: &str) -> Result<Option<StoredBlob>> {
        Ok(self
            .blobs
            .lock()
            .unwrap()
            .get(name)
            .map(|(content, content_type)| StoredBlob {
                name: name.to_string(),
                content: content.clone(),
                content_type: Some(content_type.clone()),
            }))
    }
}

/// Canned outcome of a stub summarization call
pub enum StubOutcome {
    Sentences(Vec<&'static str>),
    ServiceError(&'static str),
    TransportError,
}

/// Summarizer returning a canned outcome and counting calls
pub struct StubSummarizer {
    outcome: StubOutcome,
    calls: AtomicUsize,
    last_text: Mutex<Option<String>>,
}

#[allow(dead_code)]
impl StubSummarizer {
    pub fn new(outcome: StubOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_text: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_text(&self) -> Option<String> {
        self.last_text.lock().unwrap().clone()
    }
}

#[async_trait]
impl Summarize for StubSummarizer {
    async fn summarize(&self, text: &str) -> std::result::Result<Vec<String>, SummarizeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_text.lock().unwrap() = Some(text.to_string());

        match &self.outcome {
            StubOutcome::Sentences(s) => Ok(s.iter().map(|s| s.to_string()).collect()),
            StubOutcome::ServiceError(code) => Err(SummarizeError::RequestFailed {
                status: 400,
                code: code.to_string(),
                message: "stubbed failure".to_string(),
            }),
            StubOutcome::TransportError => {
                Err(SummarizeError::Transport("connection reset".to_string()))
            }
        }
    }
}

/// Builds a one-page PDF showing each line with Helvetica
pub fn build_pdf(lines: &[&str]) -> Vec<u8> {
    let mut content = String::new();
    if !lines.is_empty() {
        content.push_str("BT /F1 12 Tf 72 720 Td");
        for (i, line) in lines.iter().enumerate() {
            let escaped = line
                .replace('\\', "\\\\")
                .replace('(', "\\(")
                .replace(')', "\\)");
            if i > 0 {
                content.push_str(" 0 -20 Td");
            }
            content.push_str(&format!(" ({}) Tj", escaped));
        }
        content.push_str(" ET");
    }

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, object) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, object).as_bytes());
    }

    let xref_offset = pdf.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{:010} 00000 n \n", offset));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    ));
    pdf.extend_from_slice(xref.as_bytes());

    pdf
}
