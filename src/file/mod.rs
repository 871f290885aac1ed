// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Blobs and asynchronous file reading

mod blob;
mod reader;

pub use blob::{Blob, OCTET_STREAM};
pub use reader::FileReader;
