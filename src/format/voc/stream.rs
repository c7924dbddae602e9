//! Pull cursor over scanned VOC blocks

use std::io::{Read, Seek, SeekFrom};

use super::blocks::VocBlock;
use crate::error::{Error, Result};

/// Pull cursor yielding unsigned 8-bit PCM from a scanned block list.
///
/// Sound-data blocks are read from the source at their recorded offsets;
/// silence blocks are synthesized as zero bytes without touching the
/// source at all.
#[derive(Debug)]
pub struct VocStream<'a, R: Read + Seek> {
    reader: &'a mut R,
    blocks: &'a [VocBlock],
    /// Block the cursor is inside; `blocks.len()` means end of data.
    block_index: usize,
    /// Samples left to serve from the current block.
    remaining: u32,
    /// Current block synthesizes zeros instead of reading the source.
    silent: bool,
}

impl<'a, R: Read + Seek> VocStream<'a, R> {
    pub(crate) fn new(reader: &'a mut R, blocks: &'a [VocBlock]) -> Result<Self> {
        let mut stream = VocStream {
            reader,
            blocks,
            block_index: 0,
            remaining: 0,
            silent: false,
        };
        stream.enter_block(0)?;
        Ok(stream)
    }

    /// Move the cursor to the first sample-bearing block at or after
    /// `index`, seeking the source when the block has backing bytes.
    fn enter_block(&mut self, index: usize) -> Result<()> {
        self.block_index = index;
        self.remaining = 0;
        while self.block_index < self.blocks.len() {
            match self.blocks[self.block_index] {
                VocBlock::SoundData {
                    sample_count,
                    offset,
                    ..
                } if sample_count > 0 => {
                    self.reader
                        .seek(SeekFrom::Start(offset))
                        .map_err(Error::Io)?;
                    self.remaining = sample_count;
                    self.silent = false;
                    return Ok(());
                }
                VocBlock::Silence { sample_count, .. } if sample_count > 0 => {
                    self.remaining = sample_count;
                    self.silent = true;
                    return Ok(());
                }
                _ => {}
            }
            self.block_index += 1;
        }
        Ok(())
    }

    /// Fill `buf` with as many samples as the block list still holds.
    /// Returns the number of bytes written, 0 at end of stream.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut written = 0;
        while written < buf.len() {
            if self.remaining == 0 {
                if self.block_index >= self.blocks.len() {
                    break;
                }
                self.enter_block(self.block_index + 1)?;
                continue;
            }

            let want = ((buf.len() - written) as u64).min(u64::from(self.remaining)) as usize;
            let chunk = &mut buf[written..written + want];
            if self.silent {
                chunk.fill(0);
            } else {
                self.reader
                    .read_exact(chunk)
                    .map_err(|e| Error::read("VOC sample data", e))?;
            }
            written += want;
            self.remaining -= want as u32;
        }
        Ok(written)
    }
}
