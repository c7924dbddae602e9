//! Streaming Westwood ADPCM decode

use byteorder::ReadBytesExt;
use std::io::{Read, Seek};

use super::header::AudChunk;
use crate::codec::adpcm::{self, AdpcmState};
use crate::error::{Error, Result};

/// Pull cursor producing little-endian 16-bit PCM from an AUD payload.
///
/// One compressed byte expands to two samples (four output bytes), low
/// nibble first. A single predictor/step-index pair advances across the
/// whole payload; chunk boundaries do not reset it. The cursor decodes
/// exactly as much input as a request needs; decoded bytes that did not fit
/// the caller's buffer wait in a small carry and are served first on the
/// next call, so any read size resumes bit-exactly.
#[derive(Debug)]
pub struct AudStream<'a, R> {
    reader: &'a mut R,
    /// Undelivered payload bytes, counting each chunk's 8-byte header
    bytes_left: i32,
    /// Compressed bytes still to decode in the current chunk
    chunk_remaining: u16,
    state: AdpcmState,
    carry: [u8; 4],
    carry_len: u8,
    carry_pos: u8,
}

impl<'a, R: Read + Seek> AudStream<'a, R> {
    pub(crate) fn new(reader: &'a mut R, data_size: i32) -> Self {
        Self {
            reader,
            bytes_left: data_size,
            chunk_remaining: 0,
            state: AdpcmState::new(),
            carry: [0; 4],
            carry_len: 0,
            carry_pos: 0,
        }
    }

    /// Fill `buf` with decoded PCM bytes; returns the count written, 0 once
    /// the payload is exhausted.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut written = 0;

        while written < buf.len() {
            if self.carry_pos < self.carry_len {
                buf[written] = self.carry[usize::from(self.carry_pos)];
                self.carry_pos += 1;
                written += 1;
                continue;
            }

            if self.bytes_left <= 0 {
                break;
            }
            if self.chunk_remaining == 0 {
                self.open_chunk()?;
                continue;
            }

            let byte = self
                .reader
                .read_u8()
                .map_err(|e| Error::read("AUD chunk data", e))?;
            self.chunk_remaining -= 1;
            self.bytes_left -= 1;

            let low = adpcm::decode_nibble(byte & 0x0F, &mut self.state);
            let high = adpcm::decode_nibble(byte >> 4, &mut self.state);
            self.carry[..2].copy_from_slice(&low.to_le_bytes());
            self.carry[2..].copy_from_slice(&high.to_le_bytes());
            self.carry_len = 4;
            self.carry_pos = 0;
        }

        Ok(written)
    }

    /// Read and validate the next chunk header, which consumes 8 bytes of
    /// the declared payload.
    fn open_chunk(&mut self) -> Result<()> {
        let chunk = AudChunk::read(self.reader)?;
        self.bytes_left -= 8;
        self.chunk_remaining = chunk.compressed_size;
        Ok(())
    }
}
