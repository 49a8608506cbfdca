// Crate error type. Every variant states *where* things went wrong.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Two buffers handed to a whole-image operation differ in size.
    #[error("{op}: size mismatch (expected {expected:?}, got {actual:?})")]
    Dimensions {
        op: &'static str,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// The recipe itself is unusable (zero sizes etc.).
    #[error("Config error: {0}")]
    Config(String),

    /// PNG encoding failed.
    #[error("PNG encode error: {0}")]
    Encode(#[from] image::ImageError),

    /// Writing the output file failed.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn check_dims(
        op: &'static str,
        expected: (u32, u32),
        actual: (u32, u32),
    ) -> Result<()> {
        if expected != actual {
            return Err(Error::Dimensions { op, expected, actual });
        }
        Ok(())
    }
}
