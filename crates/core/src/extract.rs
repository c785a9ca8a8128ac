use std::fs;
use std::path::Path;

use html2text::from_read;
use pulldown_cmark::{html, Parser};

use crate::error::{Result, SiftError};

pub const SUPPORTED_EXTENSIONS: &[&str] =
    &["pdf", "txt", "text", "md", "markdown", "html", "htm"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub page_number: u32,
    pub text: String,
}

pub trait PageExtractor: Sync {
    fn extract_pages(&self, path: &Path) -> Result<Vec<PageText>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FileExtractor;

impl PageExtractor for FileExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<PageText>> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase());
        match ext.as_deref() {
            Some("pdf") => pdf_to_pages(path),
            Some("txt") | Some("text") => Ok(text_to_pages(&read_text_lossy(path)?)),
            Some("md") | Some("markdown") => {
                let content = read_text_lossy(path)?;
                Ok(text_to_pages(&markdown_to_text(&content)))
            }
            Some("html") | Some("htm") => {
                let content = read_text_lossy(path)?;
                Ok(text_to_pages(&html_to_plaintext(&content)))
            }
            _ => Err(SiftError::UnsupportedInput(path.to_path_buf())),
        }
    }
}

pub fn supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn pdf_to_pages(path: &Path) -> Result<Vec<PageText>> {
    let pages = pdf_extract::extract_text_by_pages(path)
        .map_err(|e| extraction_error(path, format!("pdf extract failed: {e}")))?;
    Ok(pages
        .into_iter()
        .enumerate()
        .map(|(idx, text)| PageText {
            page_number: idx as u32 + 1,
            text,
        })
        .collect())
}

// Plain-text formats carry page breaks as form feeds, when they carry any.
fn text_to_pages(text: &str) -> Vec<PageText> {
    text.split('\u{c}')
        .enumerate()
        .map(|(idx, chunk)| PageText {
            page_number: idx as u32 + 1,
            text: chunk.to_string(),
        })
        .collect()
}

fn markdown_to_text(md: &str) -> String {
    let mut html_buf = String::new();
    html::push_html(&mut html_buf, Parser::new(md));
    html_to_plaintext(&html_buf)
}

fn html_to_plaintext(html_src: &str) -> String {
    from_read(html_src.as_bytes(), 80)
}

fn read_text_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| extraction_error(path, e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).to_string())
}

fn extraction_error(path: &Path, reason: String) -> SiftError {
    SiftError::Extraction {
        path: path.to_path_buf(),
        reason,
    }
}
