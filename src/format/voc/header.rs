//! VOC header validation and sample-rate mappings

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Read;

use crate::error::{Error, Result};

/// Description string every VOC file opens with.
pub const DESCRIPTION: &[u8; 19] = b"Creative Voice File";
/// Only header version this crate accepts.
pub const VERSION: u16 = 0x010A;
/// Where the data blocks start for version `0x010A` files.
pub const DATA_OFFSET: u16 = 26;

/// Fixed 26-byte header at the front of every VOC file.
#[derive(Debug, Clone)]
pub struct VocHeader {
    /// 20-byte description field, starting with `"Creative Voice File"`
    pub description: [u8; 20],
    /// Offset of the first data block, always 26
    pub datablock_offset: u16,
    /// Format version
    pub version: u16,
    /// Checksum over the version: `!version + 0x1234`
    pub id: u16,
}

impl VocHeader {
    /// Read and validate a header from the current position. All four
    /// fields must check out; the reader is left at the first data block.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut description = [0u8; 20];
        reader
            .read_exact(&mut description)
            .map_err(|e| Error::read("VOC description", e))?;
        if !description.starts_with(DESCRIPTION) {
            return Err(Error::malformed("VOC description mismatch"));
        }

        let datablock_offset = reader
            .read_u16::<LittleEndian>()
            .map_err(|e| Error::read("VOC header", e))?;
        if datablock_offset != DATA_OFFSET {
            return Err(Error::malformed(format!(
                "VOC datablock offset {}, expected {}",
                datablock_offset, DATA_OFFSET
            )));
        }

        let version = reader
            .read_u16::<LittleEndian>()
            .map_err(|e| Error::read("VOC header", e))?;
        if version != VERSION {
            return Err(Error::malformed(format!(
                "VOC version 0x{:04X}, expected 0x{:04X}",
                version, VERSION
            )));
        }

        let id = reader
            .read_u16::<LittleEndian>()
            .map_err(|e| Error::read("VOC header", e))?;
        if id != (!version).wrapping_add(0x1234) {
            return Err(Error::malformed(format!(
                "VOC id 0x{:04X} does not match version",
                id
            )));
        }

        Ok(VocHeader {
            description,
            datablock_offset,
            version,
            id,
        })
    }
}

/// Map a sound-block frequency divisor to a sample rate in Hz.
///
/// The divisor pairs Creative's tools emitted for 11 and 22 kHz material
/// are forced to the exact rates; everything else goes through the nominal
/// formula with truncating division.
pub fn rate_from_divisor(divisor: u32) -> Result<u32> {
    match divisor {
        0xA5 | 0xA6 => Ok(11025),
        0xD2 | 0xD3 => Ok(22050),
        d if d >= 256 => Err(Error::malformed(format!(
            "invalid VOC frequency divisor {}",
            d
        ))),
        d => Ok(1_000_000 / (256 - d)),
    }
}

/// Map an extra-info (code 8) 16-bit divisor to a sample rate in Hz.
pub fn extended_rate_from_divisor(divisor: u32) -> Result<u32> {
    if divisor >= 65_536 {
        return Err(Error::malformed(format!(
            "invalid VOC extended frequency divisor {}",
            divisor
        )));
    }
    Ok(256_000_000 / (65_536 - divisor))
}
