//! Creative Voice File (VOC) container
//!
//! VOC is the native format of Sound Blaster tooling: a fixed 26-byte
//! header followed by typed data blocks. Only uncompressed 8-bit mono
//! sound data is supported; the block sequence is scanned eagerly at
//! construction and samples are pulled from the recorded block offsets
//! afterwards.

mod blocks;
mod header;
mod stream;

pub use blocks::{BlockScan, VocBlock};
pub use header::VocHeader;
pub use stream::VocStream;

use std::io::{Read, Seek, SeekFrom};

use crate::error::Result;

/// Parsed VOC container bound to its byte source.
#[derive(Debug)]
pub struct VocFormat<R> {
    reader: R,
    header: VocHeader,
    scan: BlockScan,
}

impl<R: Read + Seek> VocFormat<R> {
    /// Parse the container at the start of `reader` and take ownership
    /// of it.
    pub fn new(mut reader: R) -> Result<Self> {
        let (header, scan) = Self::parse(&mut reader)?;
        Ok(Self::from_parts(header, scan, reader))
    }

    /// Header check plus the full block scan from the start of the source.
    pub(crate) fn parse(reader: &mut R) -> Result<(VocHeader, BlockScan)> {
        reader.seek(SeekFrom::Start(0))?;
        let header = VocHeader::read(reader)?;
        let scan = blocks::scan_blocks(reader)?;
        Ok((header, scan))
    }

    pub(crate) fn from_parts(header: VocHeader, scan: BlockScan, reader: R) -> Self {
        Self {
            reader,
            header,
            scan,
        }
    }

    /// Header fields as parsed.
    pub fn header(&self) -> &VocHeader {
        &self.header
    }

    /// VOC sound data is always mono.
    pub fn channels(&self) -> u16 {
        1
    }

    /// Samples are unsigned 8-bit.
    pub fn sample_bits(&self) -> u16 {
        8
    }

    /// Common rate of the sound-data blocks, 0 for a file without any.
    pub fn sample_rate(&self) -> u32 {
        self.scan.sample_rate
    }

    /// Sample count summed over the sound-data blocks. Silence runs are
    /// served by the stream but not counted here.
    pub fn total_samples(&self) -> u64 {
        self.scan.total_samples
    }

    /// Duration of the sound-data blocks in seconds.
    pub fn length_seconds(&self) -> f32 {
        if self.scan.sample_rate == 0 {
            return 0.0;
        }
        self.scan.total_samples as f32 / self.scan.sample_rate as f32
    }

    /// Open a fresh PCM cursor at the first sample-bearing block.
    pub fn open_pcm_stream(&mut self) -> Result<VocStream<'_, R>> {
        VocStream::new(&mut self.reader, &self.scan.blocks)
    }
}
