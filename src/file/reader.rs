// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Async file reader

use base64::Engine;
use bytes::Bytes;

use super::blob::{Blob, OCTET_STREAM};
use crate::error::{Error, Result};

/// Reads blobs as raw bytes, data URLs, or decoded text
#[derive(Debug, Clone, Copy, Default)]
pub struct FileReader;

impl FileReader {
    /// Read the whole blob
    pub async fn read_as_array_buffer(blob: &Blob) -> Result<Bytes> {
        blob.bytes().await
    }

    /// Read the blob as a `data:<mime>;base64,<payload>` URL
    pub async fn read_as_data_url(blob: &Blob) -> Result<String> {
        let data = blob.bytes().await?;
        let mime_type = if blob.mime_type().is_empty() {
            OCTET_STREAM
        } else {
            blob.mime_type()
        };
        let encoded = base64::engine::general_purpose::STANDARD.encode(&data);
        Ok(format!("data:{};base64,{}", mime_type, encoded))
    }

    /// Read the blob as text.
    ///
    /// `encoding` defaults to UTF-8. Invalid sequences decode to U+FFFD.
    pub async fn read_as_text(blob: &Blob, encoding: Option<&str>) -> Result<String> {
        let data = blob.bytes().await?;
        decode_text(&data, encoding.unwrap_or("utf-8"))
    }
}

fn decode_text(data: &[u8], encoding: &str) -> Result<String> {
    match encoding.trim().to_ascii_lowercase().as_str() {
        "utf-8" | "utf8" | "unicode-1-1-utf-8" => {
            let data = data.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(data);
            Ok(String::from_utf8_lossy(data).into_owned())
        }
        "utf-16le" | "utf-16" => Ok(decode_utf16(data, u16::from_le_bytes, [0xFF, 0xFE])),
        "utf-16be" => Ok(decode_utf16(data, u16::from_be_bytes, [0xFE, 0xFF])),
        "iso-8859-1" | "latin1" | "l1" | "us-ascii" | "ascii" => {
            Ok(data.iter().map(|&b| b as char).collect())
        }
        other => Err(Error::file_read(format!("unsupported encoding '{}'", other))),
    }
}

fn decode_utf16(data: &[u8], to_unit: fn([u8; 2]) -> u16, bom: [u8; 2]) -> String {
    let data = data.strip_prefix(&bom).unwrap_or(data);
    let units = data.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));
    let mut text: String = char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if data.len() % 2 == 1 {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}
