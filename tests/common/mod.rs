//! Common test utilities for oldwave integration tests
//!
//! Builders for synthetic AUD, VOC and WAV fixtures, plus a reference
//! expansion helper for checking decoded ADPCM output byte-for-byte.

#![allow(dead_code)]

use oldwave::codec::adpcm::{self, AdpcmState};

// ============================================================================
// AUD Fixtures
// ============================================================================

/// Trailer magic carried by every AUD chunk header.
pub const AUD_CHUNK_MAGIC: u32 = 0xDEAF;

/// Westwood-compressed payload code.
pub const AUD_WESTWOOD: u8 = 1;
/// IMA ADPCM payload code; parses but does not decode.
pub const AUD_IMA: u8 = 99;

/// Assemble a 12-byte AUD header.
pub fn aud_header(
    sample_rate: u16,
    data_size: i32,
    output_size: i32,
    flags: u8,
    compression: u8,
) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(12);
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&data_size.to_le_bytes());
    bytes.extend_from_slice(&output_size.to_le_bytes());
    bytes.push(flags);
    bytes.push(compression);
    bytes
}

/// Frame one chunk around `payload`, declaring the 4x expansion a Westwood
/// payload yields.
pub fn aud_chunk(payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(8 + payload.len());
    bytes.extend_from_slice(&(payload.len() as u16).to_le_bytes());
    bytes.extend_from_slice(&((payload.len() * 4) as u16).to_le_bytes());
    bytes.extend_from_slice(&AUD_CHUNK_MAGIC.to_le_bytes());
    bytes.extend_from_slice(payload);
    bytes
}

/// Assemble a complete Westwood-compressed AUD file with one chunk per
/// payload slice and a data size covering exactly those chunks.
pub fn aud_file(sample_rate: u16, payloads: &[&[u8]]) -> Vec<u8> {
    let data_size: i32 = payloads.iter().map(|p| 8 + p.len() as i32).sum();
    let output_size: i32 = payloads.iter().map(|p| 4 * p.len() as i32).sum();
    let mut bytes = aud_header(sample_rate, data_size, output_size, 0, AUD_WESTWOOD);
    for payload in payloads {
        bytes.extend_from_slice(&aud_chunk(payload));
    }
    bytes
}

/// Expand Westwood payload bytes the way a correct decoder must: low nibble
/// then high nibble per byte, one running state across the whole payload,
/// 16-bit little-endian output.
pub fn expand_westwood(payload: &[u8]) -> Vec<u8> {
    let mut state = AdpcmState::new();
    let mut pcm = Vec::with_capacity(payload.len() * 4);
    for &byte in payload {
        for nibble in [byte & 0x0F, byte >> 4] {
            let sample = adpcm::decode_nibble(nibble, &mut state);
            pcm.extend_from_slice(&sample.to_le_bytes());
        }
    }
    pcm
}

// ============================================================================
// VOC Fixtures
// ============================================================================

/// Assemble the fixed 26-byte VOC file header.
pub fn voc_header() -> Vec<u8> {
    let mut bytes = Vec::with_capacity(26);
    bytes.extend_from_slice(b"Creative Voice File\x1A");
    bytes.extend_from_slice(&26u16.to_le_bytes());
    bytes.extend_from_slice(&0x010Au16.to_le_bytes());
    bytes.extend_from_slice(&0x1129u16.to_le_bytes());
    bytes
}

/// Sound data block (code 1) wrapping `samples`. Divisor `0xA5` maps to
/// 11025 Hz, `0xD2` to 22050 Hz.
pub fn voc_sound_block(divisor: u8, samples: &[u8]) -> Vec<u8> {
    let length = (samples.len() + 2) as u32;
    let mut bytes = vec![1];
    bytes.extend_from_slice(&length.to_le_bytes()[..3]);
    bytes.push(divisor);
    bytes.push(0);
    bytes.extend_from_slice(samples);
    bytes
}

/// Silence block (code 3) spanning `count + 1` samples.
pub fn voc_silence_block(count: u16, divisor: u8) -> Vec<u8> {
    let mut bytes = vec![3, 3, 0, 0];
    bytes.extend_from_slice(&count.to_le_bytes());
    bytes.push(divisor);
    bytes
}

/// Extra info block (code 8) overriding the next sound block's rate with
/// `256_000_000 / (65_536 - divisor)`.
pub fn voc_extra_info_block(divisor: u16) -> Vec<u8> {
    let mut bytes = vec![8, 4, 0, 0];
    bytes.extend_from_slice(&divisor.to_le_bytes());
    bytes.push(0);
    bytes.push(0);
    bytes
}

/// Complete VOC file: header, the given blocks, a terminator block.
pub fn voc_file(blocks: &[Vec<u8>]) -> Vec<u8> {
    let mut bytes = voc_header();
    for block in blocks {
        bytes.extend_from_slice(block);
    }
    bytes.push(0);
    bytes
}

// ============================================================================
// WAV Fixtures
// ============================================================================

/// Wave type code for linear PCM.
pub const WAVE_PCM: u16 = 0x0001;
/// Wave type code for IMA ADPCM.
pub const WAVE_IMA_ADPCM: u16 = 0x0011;

/// One RIFF chunk: tag, little-endian size, payload. No pad byte; callers
/// exercising odd-size padding append it themselves.
pub fn wav_chunk(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(8 + payload.len());
    bytes.extend_from_slice(tag);
    bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    bytes.extend_from_slice(payload);
    bytes
}

/// 16-byte `fmt ` payload.
pub fn wav_fmt(
    wave_type: u16,
    channels: u16,
    sample_rate: u32,
    block_align: u16,
    bits: u16,
) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(16);
    bytes.extend_from_slice(&wave_type.to_le_bytes());
    bytes.extend_from_slice(&channels.to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    let byte_rate = sample_rate * u32::from(channels) * u32::from(bits) / 8;
    bytes.extend_from_slice(&byte_rate.to_le_bytes());
    bytes.extend_from_slice(&block_align.to_le_bytes());
    bytes.extend_from_slice(&bits.to_le_bytes());
    bytes
}

/// Wrap chunk bodies in a RIFF/WAVE container with a correct outer size.
pub fn wav_file(chunks: &[Vec<u8>]) -> Vec<u8> {
    let body_len: usize = chunks.iter().map(Vec::len).sum();
    let mut bytes = Vec::with_capacity(12 + body_len);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&((body_len + 4) as u32).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    for chunk in chunks {
        bytes.extend_from_slice(chunk);
    }
    bytes
}

/// One IMA ADPCM block for a mono stream: 4-byte header seeding the
/// predictor and step index, then the nibble groups.
pub fn ima_mono_block(predictor: i16, step_index: u8, groups: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(4 + groups.len());
    bytes.extend_from_slice(&predictor.to_le_bytes());
    bytes.push(step_index);
    bytes.push(0);
    bytes.extend_from_slice(groups);
    bytes
}
