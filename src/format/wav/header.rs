//! RIFF/WAVE chunk layout and parsing

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Read, Seek, SeekFrom};
use tracing::trace;

use crate::error::{Error, Result};

/// Codecs a `fmt ` chunk may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum WaveType {
    /// Uncompressed linear PCM
    Pcm = 0x0001,
    /// IMA ADPCM, 4 bits per sample
    ImaAdpcm = 0x0011,
}

impl TryFrom<u16> for WaveType {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            0x0001 => Ok(WaveType::Pcm),
            0x0011 => Ok(WaveType::ImaAdpcm),
            other => Err(Error::unsupported_codec(format!(
                "WAV wave type 0x{:04X}",
                other
            ))),
        }
    }
}

/// Contents of the `fmt ` chunk.
#[derive(Debug, Clone)]
pub struct WavFmtChunk {
    /// Declared codec
    pub wave_type: WaveType,
    /// Channel count
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Average bytes per second
    pub byte_rate: u32,
    /// Bytes per sample frame; one compressed block for IMA ADPCM
    pub block_align: u16,
    /// Bits per sample as encoded
    pub sample_bits: u16,
}

impl WavFmtChunk {
    /// Parse from the chunk payload. The wave type is checked before
    /// anything else so unsupported codecs reject early.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < 16 {
            return Err(Error::malformed(format!(
                "WAV fmt chunk of {} bytes",
                data.len()
            )));
        }

        let wave_type = WaveType::try_from(u16::from_le_bytes([data[0], data[1]]))?;
        let channels = u16::from_le_bytes([data[2], data[3]]);
        let sample_rate = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
        let byte_rate = u32::from_le_bytes([data[8], data[9], data[10], data[11]]);
        let block_align = u16::from_le_bytes([data[12], data[13]]);
        let sample_bits = u16::from_le_bytes([data[14], data[15]]);

        Ok(WavFmtChunk {
            wave_type,
            channels,
            sample_rate,
            byte_rate,
            block_align,
            sample_bits,
        })
    }
}

/// Location of the `data` chunk payload within the source.
#[derive(Debug, Clone, Copy)]
pub struct WavDataChunk {
    pub offset: u64,
    pub length: u32,
}

/// Everything the chunk walk collects.
#[derive(Debug, Clone)]
pub struct WavHeader {
    pub fmt: WavFmtChunk,
    pub data: WavDataChunk,
    /// Per-channel sample count from the `fact` chunk, 0 when absent
    pub uncompressed_size: u32,
}

impl WavHeader {
    /// Validate the RIFF/WAVE tags, then walk the chunk sequence and
    /// collect `fmt `, `fact` and `data`.
    ///
    /// Chunks start 2-byte aligned; a pad byte is skipped when the walk
    /// lands on an odd position. Unknown chunks are skipped by their
    /// declared size, and when a chunk appears twice the later one wins.
    /// A clean end of the source between chunks ends the walk; running
    /// out mid-chunk does not.
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let mut riff = [0u8; 12];
        reader
            .read_exact(&mut riff)
            .map_err(|e| Error::read("RIFF header", e))?;
        if &riff[0..4] != b"RIFF" {
            return Err(Error::malformed("missing RIFF tag"));
        }
        if &riff[8..12] != b"WAVE" {
            return Err(Error::malformed("missing WAVE tag"));
        }

        let mut fmt = None;
        let mut data = None;
        let mut uncompressed_size = 0u32;

        loop {
            if reader.stream_position()? & 1 == 1 {
                let mut pad = [0u8; 1];
                if read_some(reader, &mut pad)? == 0 {
                    break;
                }
            }

            let mut tag = [0u8; 4];
            match read_some(reader, &mut tag)? {
                0 => break,
                4 => {}
                _ => return Err(Error::truncated("WAV chunk tag")),
            }
            let size = reader
                .read_u32::<LittleEndian>()
                .map_err(|e| Error::read("WAV chunk size", e))?;

            match &tag {
                b"fmt " => {
                    let mut payload = vec![0u8; size as usize];
                    reader
                        .read_exact(&mut payload)
                        .map_err(|e| Error::read("WAV fmt chunk", e))?;
                    fmt = Some(WavFmtChunk::from_bytes(&payload)?);
                }
                b"fact" => {
                    if size < 4 {
                        return Err(Error::malformed(format!("WAV fact chunk of {} bytes", size)));
                    }
                    uncompressed_size = reader
                        .read_u32::<LittleEndian>()
                        .map_err(|e| Error::read("WAV fact chunk", e))?;
                    reader.seek(SeekFrom::Current(i64::from(size - 4)))?;
                }
                b"data" => {
                    let offset = reader.stream_position()?;
                    data = Some(WavDataChunk {
                        offset,
                        length: size,
                    });
                    reader.seek(SeekFrom::Current(i64::from(size)))?;
                }
                other => {
                    trace!(
                        "Skipping WAV chunk {:?} ({} bytes)",
                        String::from_utf8_lossy(other),
                        size
                    );
                    reader.seek(SeekFrom::Current(i64::from(size)))?;
                }
            }
        }

        let fmt = fmt.ok_or_else(|| Error::malformed("WAV file without fmt chunk"))?;
        let data = data.ok_or_else(|| Error::malformed("WAV file without data chunk"))?;
        Ok(WavHeader {
            fmt,
            data,
            uncompressed_size,
        })
    }
}

/// Read into `buf` until it is full or the source ends; returns the
/// number of bytes read.
fn read_some<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..]).map_err(Error::Io)?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
