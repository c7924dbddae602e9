//! WAV payload decode and PCM cursor
//!
//! WAV decodes eagerly: the whole `data` chunk is pulled into memory and,
//! for IMA ADPCM, expanded to 16-bit PCM up front. The cursor then just
//! copies out of the decoded buffer.

use super::header::{WavHeader, WaveType};
use crate::codec::adpcm::{self, AdpcmState, MAX_STEP_INDEX};

/// Pull cursor over an eagerly decoded WAV payload.
#[derive(Debug)]
pub struct WavStream {
    data: Vec<u8>,
    position: usize,
}

impl WavStream {
    pub(crate) fn new(data: Vec<u8>) -> Self {
        WavStream { data, position: 0 }
    }

    /// Copy decoded PCM bytes into `buf`; returns the count copied, 0 at
    /// end of stream.
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        let n = buf.len().min(self.data.len() - self.position);
        buf[..n].copy_from_slice(&self.data[self.position..self.position + n]);
        self.position += n;
        n
    }
}

/// Turn the raw `data` chunk payload into the bytes the stream serves.
/// PCM passes through untouched.
pub(crate) fn decode_payload(header: &WavHeader, raw: Vec<u8>) -> Vec<u8> {
    match header.fmt.wave_type {
        WaveType::Pcm => raw,
        WaveType::ImaAdpcm => decode_ima_adpcm(header, &raw),
    }
}

/// Expand IMA-ADPCM blocks to interleaved little-endian 16-bit PCM.
///
/// Each block opens with a 4-byte header per channel (predictor, step
/// index, one reserved byte) whose predictor becomes that channel's first
/// output sample. The rest of the block is consumed in 4-byte groups per
/// channel; each group decodes to 8 samples, interleaved across channels.
/// The output buffer is sized from the `fact` chunk; once it fills, the
/// partially decoded buffer is returned as-is. Callers must ensure a
/// non-zero channel count and block alignment.
fn decode_ima_adpcm(header: &WavHeader, raw: &[u8]) -> Vec<u8> {
    let channels = usize::from(header.fmt.channels);
    let block_align = usize::from(header.fmt.block_align);
    let num_blocks = raw.len() / block_align;
    let block_payload = block_align.saturating_sub(channels * 4);
    let output_size = header.uncompressed_size as usize * channels * 2;

    let mut output = vec![0u8; output_size];
    let mut states = vec![AdpcmState::new(); channels];
    let mut out_offset = 0;

    for block in 0..num_blocks {
        let mut pos = block * block_align;

        for state in states.iter_mut() {
            let predictor = i16::from_le_bytes([raw[pos], raw[pos + 1]]);
            let step_index = i32::from(raw[pos + 2]).min(MAX_STEP_INDEX);
            pos += 4;
            *state = AdpcmState::with(i32::from(predictor), step_index);

            if out_offset + 2 > output.len() {
                return output;
            }
            output[out_offset..out_offset + 2].copy_from_slice(&predictor.to_le_bytes());
            out_offset += 2;
        }

        let mut block_offset = 0;
        while block_offset < block_payload {
            for (c, state) in states.iter_mut().enumerate() {
                if pos + 4 > raw.len() {
                    return output;
                }
                let group = &raw[pos..pos + 4];
                pos += 4;

                let mut sample_offset = out_offset + 2 * c;
                for &byte in group {
                    for nibble in [byte & 0x0F, byte >> 4] {
                        let sample = adpcm::decode_nibble(nibble, state);
                        if sample_offset + 2 > output.len() {
                            return output;
                        }
                        output[sample_offset..sample_offset + 2]
                            .copy_from_slice(&sample.to_le_bytes());
                        sample_offset += 2 * channels;
                    }
                }
                block_offset += 4;
            }
            out_offset += 16 * channels;
        }
    }

    output
}
