//! Westwood AUD container
//!
//! AUD is the sound format of Westwood's mid-90s RTS titles: a 12-byte
//! header followed by compressed chunks, each framed by a small header with
//! a `0xDEAF` magic trailer. The payload is Westwood's own 4-bit ADPCM;
//! files marking their payload as IMA ADPCM parse but refuse to open a
//! decode stream.

mod header;
mod stream;

pub use header::{AudChunk, AudCompression, AudFlags, AudHeader, CHUNK_MAGIC};
pub use stream::AudStream;

use std::io::{Read, Seek, SeekFrom};

use crate::error::{Error, Result};

/// Parsed AUD container bound to its byte source.
#[derive(Debug)]
pub struct AudFormat<R> {
    reader: R,
    header: AudHeader,
}

impl<R: Read + Seek> AudFormat<R> {
    /// Parse the header at the start of `reader` and take ownership of it.
    pub fn new(mut reader: R) -> Result<Self> {
        let header = Self::parse(&mut reader)?;
        Ok(Self::from_parts(header, reader))
    }

    /// Header-only parse from the start of the source.
    pub(crate) fn parse(reader: &mut R) -> Result<AudHeader> {
        reader.seek(SeekFrom::Start(0))?;
        AudHeader::read(reader)
    }

    pub(crate) fn from_parts(header: AudHeader, reader: R) -> Self {
        Self { reader, header }
    }

    /// Header fields as parsed.
    pub fn header(&self) -> &AudHeader {
        &self.header
    }

    /// Decoded output is always mono.
    pub fn channels(&self) -> u16 {
        1
    }

    /// Decoded output is always 16-bit.
    pub fn sample_bits(&self) -> u16 {
        16
    }

    /// Playback rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        u32::from(self.header.sample_rate)
    }

    /// Declared duration in seconds.
    pub fn length_seconds(&self) -> f32 {
        self.header.length_seconds()
    }

    /// Open a fresh PCM cursor at the start of the payload.
    ///
    /// Fails with [`Error::UnsupportedCodec`] for IMA-flavored AUD files:
    /// the header is valid, but no decoder exists for that payload.
    pub fn open_pcm_stream(&mut self) -> Result<AudStream<'_, R>> {
        if self.header.compression != AudCompression::WestwoodCompressed {
            return Err(Error::unsupported_codec(
                "AUD IMA-ADPCM payload has no decoder",
            ));
        }

        self.reader.seek(SeekFrom::Start(AudHeader::SIZE))?;
        Ok(AudStream::new(&mut self.reader, self.header.data_size))
    }
}
