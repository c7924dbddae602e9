//! Shared 4-bit ADPCM decode core
//!
//! Westwood's AUD payload and WAV IMA-ADPCM blocks compress 16-bit samples
//! down to 4-bit codes against the same adaptive step table; only the
//! framing around the nibble stream differs between the two. Each code
//! carries a sign bit and a 3-bit magnitude. Decoding reconstructs a delta
//! from the current step size, accumulates it into a running predictor, and
//! nudges the step index up or down for the next code.
//!
//! The arithmetic here, down to the truncating division order in the delta
//! reconstruction, must stay bit-exact with the reference decoders or long
//! streams drift audibly.

/// Signed step-index adjustment per 3-bit magnitude code.
pub const INDEX_ADJUST: [i32; 8] = [-1, -1, -1, -1, 2, 4, 6, 8];

/// Step magnitudes indexed by the running step index.
#[rustfmt::skip]
pub const STEP_TABLE: [i32; 89] = [
        7,     8,     9,    10,    11,    12,    13,    14,    16,    17,
       19,    21,    23,    25,    28,    31,    34,    37,    41,    45,
       50,    55,    60,    66,    73,    80,    88,    97,   107,   118,
      130,   143,   157,   173,   190,   209,   230,   253,   279,   307,
      337,   371,   408,   449,   494,   544,   598,   658,   724,   796,
      876,   963,  1060,  1166,  1282,  1411,  1552,  1707,  1878,  2066,
     2272,  2499,  2749,  3024,  3327,  3660,  4026,  4428,  4871,  5358,
     5894,  6484,  7132,  7845,  8630,  9493, 10442, 11487, 12635, 13899,
    15289, 16818, 18500, 20350, 22385, 24623, 27086, 29794, 32767,
];

/// Largest valid step index.
pub const MAX_STEP_INDEX: i32 = 88;

/// Running decoder state threaded through every nibble of a stream.
///
/// The state is deliberately separate from the decode function so callers
/// control its scope: AUD threads one state across all chunks of a file,
/// while WAV IMA re-seeds one per channel from each block header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdpcmState {
    /// Reconstructed running sample value, kept within i16 range
    pub predictor: i32,
    /// Current position in [`STEP_TABLE`], kept in `0..=MAX_STEP_INDEX`
    pub step_index: i32,
}

impl AdpcmState {
    /// Fresh state: zero predictor at the smallest step.
    pub fn new() -> Self {
        Self::default()
    }

    /// State seeded from explicit values, as recovered from a WAV IMA block
    /// header. `step_index` must already be within `0..=MAX_STEP_INDEX`.
    pub fn with(predictor: i32, step_index: i32) -> Self {
        Self {
            predictor,
            step_index,
        }
    }
}

/// Decode one 4-bit code, advance the state, and return the reconstructed
/// 16-bit sample.
///
/// Bit 3 of `nibble` is the sign, bits 0..3 the magnitude; higher bits are
/// ignored. The delta is `step * magnitude / 4 + step / 8` with both
/// divisions truncating, which is the exact sequence the Westwood and IMA
/// reference decoders use.
pub fn decode_nibble(nibble: u8, state: &mut AdpcmState) -> i16 {
    let magnitude = usize::from(nibble & 0x7);
    let step = STEP_TABLE[state.step_index as usize];

    let mut delta = step * magnitude as i32 / 4 + step / 8;
    if nibble & 0x8 != 0 {
        delta = -delta;
    }

    state.predictor = (state.predictor + delta).clamp(i32::from(i16::MIN), i32::from(i16::MAX));
    state.step_index = (state.step_index + INDEX_ADJUST[magnitude]).clamp(0, MAX_STEP_INDEX);

    state.predictor as i16
}
