//! Audio container formats
//!
//! Each submodule owns one container: parse eagerly from a byte source,
//! expose the shared metadata surface, and produce a PCM pull cursor.
//! [`SoundFormat`] is the tagged union the probe chain returns, so callers
//! dispatch on a value instead of downcasting.

pub mod aud;
pub mod voc;
pub mod wav;

pub use aud::AudFormat;
pub use voc::VocFormat;
pub use wav::WavFormat;

use std::io::{Read, Seek};

use crate::error::Result;
use aud::AudStream;
use voc::VocStream;
use wav::WavStream;

/// A successfully parsed container of any supported format.
#[derive(Debug)]
pub enum SoundFormat<R> {
    Aud(AudFormat<R>),
    Voc(VocFormat<R>),
    Wav(WavFormat<R>),
}

impl<R: Read + Seek> SoundFormat<R> {
    /// Short name of the detected container.
    pub fn name(&self) -> &'static str {
        match self {
            SoundFormat::Aud(_) => "aud",
            SoundFormat::Voc(_) => "voc",
            SoundFormat::Wav(_) => "wav",
        }
    }

    /// Channel count of the PCM the stream serves.
    pub fn channels(&self) -> u16 {
        match self {
            SoundFormat::Aud(f) => f.channels(),
            SoundFormat::Voc(f) => f.channels(),
            SoundFormat::Wav(f) => f.channels(),
        }
    }

    /// Bits per sample of the PCM the stream serves.
    pub fn sample_bits(&self) -> u16 {
        match self {
            SoundFormat::Aud(f) => f.sample_bits(),
            SoundFormat::Voc(f) => f.sample_bits(),
            SoundFormat::Wav(f) => f.sample_bits(),
        }
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        match self {
            SoundFormat::Aud(f) => f.sample_rate(),
            SoundFormat::Voc(f) => f.sample_rate(),
            SoundFormat::Wav(f) => f.sample_rate(),
        }
    }

    /// Declared length in seconds, as each container reports it.
    pub fn length_seconds(&self) -> f32 {
        match self {
            SoundFormat::Aud(f) => f.length_seconds(),
            SoundFormat::Voc(f) => f.length_seconds(),
            SoundFormat::Wav(f) => f.length_seconds(),
        }
    }

    /// Open a PCM cursor over the payload.
    ///
    /// The cursor borrows this object's byte source, so only one can be
    /// open at a time; opening again later restarts from the beginning.
    pub fn open_pcm_stream(&mut self) -> Result<PcmStream<'_, R>> {
        match self {
            SoundFormat::Aud(f) => Ok(PcmStream::Aud(f.open_pcm_stream()?)),
            SoundFormat::Voc(f) => Ok(PcmStream::Voc(f.open_pcm_stream()?)),
            SoundFormat::Wav(f) => Ok(PcmStream::Wav(f.open_pcm_stream()?)),
        }
    }
}

/// PCM pull cursor over any supported container.
#[derive(Debug)]
pub enum PcmStream<'a, R: Read + Seek> {
    Aud(AudStream<'a, R>),
    Voc(VocStream<'a, R>),
    Wav(WavStream),
}

impl<'a, R: Read + Seek> PcmStream<'a, R> {
    /// Fill `buf` with decoded PCM bytes; returns the count written, 0 at
    /// end of stream.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        match self {
            PcmStream::Aud(s) => s.read(buf),
            PcmStream::Voc(s) => s.read(buf),
            PcmStream::Wav(s) => Ok(s.read(buf)),
        }
    }

    /// Decode everything that remains, appending to `out`; returns the
    /// byte count added.
    pub fn read_to_end(&mut self, out: &mut Vec<u8>) -> Result<usize> {
        let mut total = 0;
        let mut buf = [0u8; 4096];
        loop {
            let n = self.read(&mut buf)?;
            if n == 0 {
                return Ok(total);
            }
            out.extend_from_slice(&buf[..n]);
            total += n;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn voc_file(payload: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"Creative Voice File\x1A");
        bytes.extend_from_slice(&26u16.to_le_bytes());
        bytes.extend_from_slice(&0x010Au16.to_le_bytes());
        bytes.extend_from_slice(&0x1129u16.to_le_bytes());
        bytes.push(1);
        bytes.extend_from_slice(&((payload.len() + 2) as u32).to_le_bytes()[..3]);
        bytes.push(0xA5);
        bytes.push(0);
        bytes.extend_from_slice(payload);
        bytes.push(0);
        bytes
    }

    #[test]
    fn test_dispatch_reports_container_metadata() {
        let voc = VocFormat::new(Cursor::new(voc_file(&[1, 2, 3]))).unwrap();
        let format = SoundFormat::Voc(voc);

        assert_eq!(format.name(), "voc");
        assert_eq!(format.channels(), 1);
        assert_eq!(format.sample_bits(), 8);
        assert_eq!(format.sample_rate(), 11025);
    }

    #[test]
    fn test_read_to_end_crosses_pull_boundaries() {
        let payload: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();
        let voc = VocFormat::new(Cursor::new(voc_file(&payload))).unwrap();
        let mut format = SoundFormat::Voc(voc);

        let mut decoded = Vec::new();
        let n = format
            .open_pcm_stream()
            .unwrap()
            .read_to_end(&mut decoded)
            .unwrap();
        assert_eq!(n, payload.len());
        assert_eq!(decoded, payload);
    }
}
