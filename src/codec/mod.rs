//! Audio codec primitives
//!
//! The containers in this crate share a single compression scheme: 4-bit
//! adaptive-step ADPCM. Everything container-specific (chunk framing, block
//! headers, channel interleaving) lives with the formats; the nibble
//! arithmetic lives here.

pub mod adpcm;

pub use adpcm::{decode_nibble, AdpcmState};
