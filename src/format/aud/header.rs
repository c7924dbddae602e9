//! AUD header and chunk structures
//!
//! An AUD file is a fixed 12-byte header followed by compressed chunks.
//! Each chunk carries its own small header ending in a `0xDEAF` magic; the
//! magic is the only integrity check the format has, so a mismatch anywhere
//! in the stream is treated as corruption.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Read;

use crate::error::{Error, Result};

/// Trailer magic every chunk header carries.
pub const CHUNK_MAGIC: u32 = 0xDEAF;

const FLAG_STEREO: u8 = 0x01;
const FLAG_16BIT: u8 = 0x02;

/// Compression scheme declared by the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AudCompression {
    /// Westwood's own 4-bit ADPCM
    WestwoodCompressed = 1,
    /// IMA ADPCM; a known code, but this crate does not decode it
    ImaAdpcm = 99,
}

impl TryFrom<u8> for AudCompression {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(AudCompression::WestwoodCompressed),
            99 => Ok(AudCompression::ImaAdpcm),
            other => Err(Error::malformed(format!(
                "unknown AUD compression code {}",
                other
            ))),
        }
    }
}

/// Sample layout flags.
///
/// Only the stereo and 16-bit bits are defined; any other bit set makes the
/// header invalid. The flags feed the duration computation only; decoded
/// AUD output is always reported as 16-bit mono.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudFlags(u8);

impl AudFlags {
    /// Stereo bit
    pub fn stereo(self) -> bool {
        self.0 & FLAG_STEREO != 0
    }

    /// 16-bit samples bit
    pub fn sixteen_bit(self) -> bool {
        self.0 & FLAG_16BIT != 0
    }

    /// Raw flag byte as stored in the file
    pub fn bits(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for AudFlags {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        if value & !(FLAG_STEREO | FLAG_16BIT) != 0 {
            return Err(Error::malformed(format!(
                "unknown AUD flag bits 0x{:02x}",
                value
            )));
        }
        Ok(AudFlags(value))
    }
}

/// Fixed header at the front of every AUD file.
#[derive(Debug, Clone)]
pub struct AudHeader {
    /// Playback rate in Hz
    pub sample_rate: u16,
    /// Byte count of the compressed payload following the header
    pub data_size: i32,
    /// Declared byte count of the decoded output
    pub output_size: i32,
    /// Sample layout flags
    pub flags: AudFlags,
    /// Compression scheme of the payload
    pub compression: AudCompression,
}

impl AudHeader {
    /// Header length in bytes; the payload starts here.
    pub const SIZE: u64 = 12;

    /// Read and validate a header from the current position.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let sample_rate = reader
            .read_u16::<LittleEndian>()
            .map_err(|e| Error::read("AUD header", e))?;
        let data_size = reader
            .read_i32::<LittleEndian>()
            .map_err(|e| Error::read("AUD header", e))?;
        let output_size = reader
            .read_i32::<LittleEndian>()
            .map_err(|e| Error::read("AUD header", e))?;
        let flags = AudFlags::try_from(
            reader.read_u8().map_err(|e| Error::read("AUD header", e))?,
        )?;
        let compression = AudCompression::try_from(
            reader.read_u8().map_err(|e| Error::read("AUD header", e))?,
        )?;

        Ok(AudHeader {
            sample_rate,
            data_size,
            output_size,
            flags,
            compression,
        })
    }

    /// Declared duration in seconds, 0 for a zero-rate header.
    ///
    /// The output byte count is normalized to mono 8-bit samples first:
    /// halved once for stereo and once again for 16-bit samples.
    pub fn length_seconds(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        let mut samples = self.output_size;
        if self.flags.stereo() {
            samples /= 2;
        }
        if self.flags.sixteen_bit() {
            samples /= 2;
        }
        samples as f32 / f32::from(self.sample_rate)
    }
}

/// Framing header in front of each compressed chunk.
#[derive(Debug, Clone, Copy)]
pub struct AudChunk {
    /// Compressed bytes following this header
    pub compressed_size: u16,
    /// Decoded bytes this chunk expands to
    pub output_size: u16,
}

impl AudChunk {
    /// Read one chunk header, validating the trailing magic.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let compressed_size = reader
            .read_u16::<LittleEndian>()
            .map_err(|e| Error::read("AUD chunk header", e))?;
        let output_size = reader
            .read_u16::<LittleEndian>()
            .map_err(|e| Error::read("AUD chunk header", e))?;
        let magic = reader
            .read_u32::<LittleEndian>()
            .map_err(|e| Error::read("AUD chunk header", e))?;

        if magic != CHUNK_MAGIC {
            return Err(Error::malformed(format!(
                "AUD chunk magic 0x{:08X}, expected 0x{:08X}",
                magic, CHUNK_MAGIC
            )));
        }

        Ok(AudChunk {
            compressed_size,
            output_size,
        })
    }
}
