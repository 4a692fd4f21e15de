// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration regions stored on disk as little-endian 32-bit words

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use byteorder::{ByteOrder, LittleEndian};

/// Decode little-endian words; the length must be a multiple of 4
pub fn words_from_le_bytes(bytes: &[u8]) -> Result<Vec<u32>> {
    if bytes.len() % 4 != 0 {
        bail!(
            "region is {} bytes, not a whole number of 32-bit words",
            bytes.len()
        );
    }
    let mut words = vec![0u32; bytes.len() / 4];
    LittleEndian::read_u32_into(bytes, &mut words);
    Ok(words)
}

/// Encode words as little-endian bytes
pub fn words_to_le_bytes(words: &[u32]) -> Vec<u8> {
    let mut bytes = vec![0u8; words.len() * 4];
    LittleEndian::write_u32_into(words, &mut bytes);
    bytes
}

/// Read a region file into words
pub fn read_region_file(path: &Path) -> Result<Vec<u32>> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read region file {}", path.display()))?;
    words_from_le_bytes(&bytes).with_context(|| format!("Invalid region file {}", path.display()))
}

/// Write words as a region file
pub fn write_region_file(path: &Path, words: &[u32]) -> Result<()> {
    fs::write(path, words_to_le_bytes(words))
        .with_context(|| format!("Failed to write region file {}", path.display()))
}
