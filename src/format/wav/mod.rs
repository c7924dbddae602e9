//! RIFF/WAVE container
//!
//! Handles plain PCM and IMA-ADPCM WAV files. The chunk layout is walked
//! once at construction; the sample data itself is decoded eagerly when a
//! PCM stream is opened, since IMA blocks cannot be decoded incrementally
//! without carrying per-channel block state across pulls.

mod header;
mod stream;

pub use header::{WavDataChunk, WavFmtChunk, WavHeader, WaveType};
pub use stream::WavStream;

use std::io::{Read, Seek, SeekFrom};

use crate::error::{Error, Result};

/// Parsed WAV container bound to its byte source.
#[derive(Debug)]
pub struct WavFormat<R> {
    reader: R,
    header: WavHeader,
}

impl<R: Read + Seek> WavFormat<R> {
    /// Parse the chunk layout at the start of `reader` and take ownership
    /// of it.
    pub fn new(mut reader: R) -> Result<Self> {
        let header = Self::parse(&mut reader)?;
        Ok(Self::from_parts(header, reader))
    }

    /// Chunk walk from the start of the source, with the layout checks a
    /// later decode depends on.
    pub(crate) fn parse(reader: &mut R) -> Result<WavHeader> {
        reader.seek(SeekFrom::Start(0))?;
        let header = WavHeader::read(reader)?;

        if header.fmt.wave_type == WaveType::ImaAdpcm {
            if header.fmt.channels == 0 {
                return Err(Error::unsupported_layout("WAV IMA-ADPCM with 0 channels"));
            }
            if header.fmt.block_align == 0 {
                return Err(Error::malformed("WAV IMA-ADPCM block alignment of 0"));
            }
        }

        Ok(header)
    }

    pub(crate) fn from_parts(header: WavHeader, reader: R) -> Self {
        Self { reader, header }
    }

    /// Chunk contents as parsed.
    pub fn header(&self) -> &WavHeader {
        &self.header
    }

    /// Channel count from the `fmt ` chunk.
    pub fn channels(&self) -> u16 {
        self.header.fmt.channels
    }

    /// Bits per sample of the PCM the stream serves; 16 for IMA-ADPCM
    /// regardless of the encoded depth.
    pub fn sample_bits(&self) -> u16 {
        match self.header.fmt.wave_type {
            WaveType::Pcm => self.header.fmt.sample_bits,
            WaveType::ImaAdpcm => 16,
        }
    }

    /// Sample rate in Hz from the `fmt ` chunk.
    pub fn sample_rate(&self) -> u32 {
        self.header.fmt.sample_rate
    }

    /// Declared length using the historical byte-to-bit-rate ratio. The
    /// divisor takes the encoded bit depth, so this is not a true duration
    /// for compressed payloads; kept for compatibility with the files'
    /// original consumers.
    pub fn length_seconds(&self) -> f32 {
        let divisor = u32::from(self.header.fmt.channels)
            * self.header.fmt.sample_rate
            * u32::from(self.header.fmt.sample_bits);
        if divisor == 0 {
            return 0.0;
        }
        self.header.data.length as f32 / divisor as f32
    }

    /// Read the `data` chunk, decode it if needed, and serve it as a PCM
    /// cursor. Each call re-reads and re-decodes from the source.
    pub fn open_pcm_stream(&mut self) -> Result<WavStream> {
        self.reader
            .seek(SeekFrom::Start(self.header.data.offset))?;
        let mut raw = vec![0u8; self.header.data.length as usize];
        self.reader
            .read_exact(&mut raw)
            .map_err(|e| Error::read("WAV data chunk", e))?;
        Ok(WavStream::new(stream::decode_payload(&self.header, raw)))
    }
}
