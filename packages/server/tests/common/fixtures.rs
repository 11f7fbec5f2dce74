//! Test fixtures for building request bodies.

use serde_json::{json, Value};

/// A complete admin form submission
pub fn post_draft(title: &str, category: &str) -> Value {
    json!({
        "title": title,
        "excerpt": "A short summary for the blog index.",
        "content": "<p>Therapy works best when the fit is right.</p>",
        "authorName": "Dr. Sarah Johnson",
        "authorRole": "Clinical Psychologist",
        "category": category,
        "publishDate": "2026-04-10",
        "featured": false
    })
}

pub const MULTIPART_BOUNDARY: &str = "mindbridge-test-boundary";

/// Multipart body with one `file` field
pub fn multipart_file(content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(data.len() + 256);
    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"upload\"\r\nContent-Type: {ct}\r\n\r\n",
            b = MULTIPART_BOUNDARY,
            ct = content_type
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
    body
}
