//! Blob object
//!
//! Blobs store file content. They contain only the raw file data,
//! without any metadata like the path (that lives in the index and commit tree).
//!
//! ## Format
//!
//! On disk: the original bytes, no header

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

/// Blob object representing file content
///
/// Each unique file content is stored once, identified by the SHA-1 hash of its bytes.
#[derive(Debug, Clone, new)]
pub struct Blob {
    /// Original file bytes
    data: Bytes,
    /// Whether the content failed UTF-8 decoding when staged
    is_binary: bool,
}

impl Blob {
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn is_binary(&self) -> bool {
        self.is_binary
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(self.data.clone())
    }
}

impl Unpackable for Blob {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let is_binary = std::str::from_utf8(&content).is_err();
        Ok(Self::new(content.into(), is_binary))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.data).to_string()
    }
}
