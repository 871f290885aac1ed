// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Form data, for both request bodies and decoded responses

use bytes::Bytes;

use crate::error::Result;
use crate::file::Blob;

/// Ordered multi-valued form data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    entries: Vec<FormEntry>,
}

/// One named entry
#[derive(Debug, Clone, PartialEq)]
pub struct FormEntry {
    pub name: String,
    pub value: FormValue,
}

/// Entry value: plain text or a file part
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    File(FilePart),
}

/// File part of a multipart form
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl FormData {
    /// Create empty form data
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text entry
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push(FormEntry {
            name: name.into(),
            value: FormValue::Text(value.into()),
        });
    }

    /// Append a file part
    pub fn append_file(&mut self, name: impl Into<String>, part: FilePart) {
        self.entries.push(FormEntry {
            name: name.into(),
            value: FormValue::File(part),
        });
    }

    /// First value for `name`
    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.value)
    }

    /// All values for `name`
    pub fn get_all(&self, name: &str) -> Vec<&FormValue> {
        self.entries
            .iter()
            .filter(|e| e.name == name)
            .map(|e| &e.value)
            .collect()
    }

    /// First text value for `name`
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            FormValue::Text(s) => Some(s),
            FormValue::File(_) => None,
        }
    }

    /// First file part for `name`
    pub fn file(&self, name: &str) -> Option<&FilePart> {
        match self.get(name)? {
            FormValue::File(part) => Some(part),
            FormValue::Text(_) => None,
        }
    }

    /// Iterate entries in order
    pub fn iter(&self) -> impl Iterator<Item = &FormEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = FormData::new();
        for (k, v) in iter {
            form.append(k, v);
        }
        form
    }
}

/// Input element for [`form_body`]
#[derive(Debug, Clone)]
pub struct FormElement {
    pub name: String,
    pub value: FormElementValue,
    pub file_name: Option<String>,
}

/// Either a string or a blob
#[derive(Debug, Clone)]
pub enum FormElementValue {
    Text(String),
    Blob(Blob),
}

impl FormElement {
    /// A text element
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: FormElementValue::Text(value.into()),
            file_name: None,
        }
    }

    /// A blob element, optionally with a file name
    pub fn blob(name: impl Into<String>, blob: Blob, file_name: Option<String>) -> Self {
        Self {
            name: name.into(),
            value: FormElementValue::Blob(blob),
            file_name,
        }
    }
}

/// Collect elements into form data; blobs are read into file parts
pub async fn to_form_data(elements: Vec<FormElement>) -> Result<FormData> {
    let mut form = FormData::new();
    for element in elements {
        match element.value {
            FormElementValue::Text(value) => form.append(element.name, value),
            FormElementValue::Blob(blob) => {
                let data = blob.bytes().await?;
                let content_type = Some(blob.mime_type().to_string()).filter(|m| !m.is_empty());
                // Browsers name anonymous blob parts "blob"
                let file_name = element.file_name.or_else(|| {
                    Some(
                        blob.path()
                            .and_then(|p| p.file_name())
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_else(|| "blob".to_string()),
                    )
                });
                form.append_file(
                    element.name,
                    FilePart {
                        file_name,
                        content_type,
                        data,
                    },
                );
            }
        }
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_lookup() {
        let mut form: FormData = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
        form.append_file(
            "upload",
            FilePart {
                file_name: Some("x.txt".into()),
                content_type: Some("text/plain".into()),
                data: Bytes::from_static(b"x"),
            },
        );

        assert_eq!(form.len(), 4);
        assert_eq!(form.text("a"), Some("1"));
        assert_eq!(form.get_all("a").len(), 2);
        assert!(form.text("upload").is_none());
        assert_eq!(form.file("upload").unwrap().file_name.as_deref(), Some("x.txt"));
    }

    #[tokio::test]
    async fn test_to_form_data_reads_blobs() {
        let form = to_form_data(vec![
            FormElement::text("title", "report"),
            FormElement::blob("file", Blob::new("body", "text/plain"), Some("r.txt".into())),
            FormElement::blob("raw", Blob::new("raw", ""), None),
        ])
        .await
        .unwrap();

        assert_eq!(form.text("title"), Some("report"));
        let part = form.file("file").unwrap();
        assert_eq!(part.file_name.as_deref(), Some("r.txt"));
        assert_eq!(part.content_type.as_deref(), Some("text/plain"));
        assert_eq!(form.file("raw").unwrap().file_name.as_deref(), Some("blob"));
        assert_eq!(form.file("raw").unwrap().content_type, None);
    }
}
