//! Flat memory image loading for the CLI demo.
//!
//! The reference slave has no notion of an executable format; a program
//! image is just a sequence of little-endian 32-bit words loaded starting at
//! word address zero.

use std::fs;
use std::path::Path;

use crate::common::error::SlaveError;
use crate::soc::MemorySlave;

/// Reads `path` and decodes it as a little-endian stream of 32-bit words.
///
/// # Errors
///
/// Returns an error string if the file cannot be read or its length is not
/// a multiple of four bytes.
pub fn read_word_image(path: &Path) -> Result<Vec<u32>, String> {
    let bytes = fs::read(path).map_err(|e| format!("could not read {}: {e}", path.display()))?;
    if bytes.len() % 4 != 0 {
        return Err(format!(
            "{} is {} bytes, not a multiple of 4",
            path.display(),
            bytes.len()
        ));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes(chunk.try_into().unwrap()))
        .collect())
}

/// Loads `image` into `slave` starting at word address zero.
///
/// # Errors
///
/// Returns [`SlaveError::OutOfBounds`] if the image is larger than the
/// slave's backing store.
pub fn load_image(slave: &mut MemorySlave, image: &[u32]) -> Result<(), SlaveError> {
    slave.load_image(0, image)
}
