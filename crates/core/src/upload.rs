//! Uploaded product images.
//!
//! An [`ImageUpload`] pairs the metadata a client sent with a file part
//! (file name, content type) with an async byte source. Reading it yields a
//! [`ProductImage`] holding the complete content in memory.

use std::io::Cursor;

use tokio::io::{AsyncRead, AsyncReadExt};

/// Content type reported for images stored without one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A fully-read image, ready to be attached to a product record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImage {
    pub name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl ProductImage {
    /// The stored content type, or [`DEFAULT_CONTENT_TYPE`] when none was recorded.
    pub fn content_type_or_default(&self) -> &str {
        self.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE)
    }
}

/// A file part whose bytes have not been read yet.
#[derive(Debug)]
pub struct ImageUpload<R> {
    file_name: Option<String>,
    content_type: Option<String>,
    body: R,
}

impl<R> ImageUpload<R> {
    pub fn new(file_name: Option<String>, content_type: Option<String>, body: R) -> Self {
        Self {
            file_name,
            content_type,
            body,
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}

impl<R: AsyncRead + Unpin> ImageUpload<R> {
    /// Read the body to the end.
    ///
    /// Fails with the underlying I/O error if the source breaks off before
    /// end-of-stream; no partial image is returned in that case.
    pub async fn read_image(mut self) -> std::io::Result<ProductImage> {
        let mut data = Vec::new();
        self.body.read_to_end(&mut data).await?;
        Ok(ProductImage {
            name: self.file_name,
            content_type: self.content_type,
            data,
        })
    }

    /// Buffer the body in memory so the upload no longer borrows its source.
    pub async fn spool(mut self) -> std::io::Result<ImageUpload<Cursor<Vec<u8>>>> {
        let mut data = Vec::new();
        self.body.read_to_end(&mut data).await?;
        Ok(ImageUpload {
            file_name: self.file_name,
            content_type: self.content_type,
            body: Cursor::new(data),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
