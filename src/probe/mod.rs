//! Format detection for extension-less sound assets
//!
//! The game archives this crate targets store sounds without reliable file
//! extensions, so the only dependable identification is to try each container
//! parser in turn. A parser that rejects the source leaves no mark on it:
//! every recognizer seeks back to the start before reading, which makes the
//! chain order-independent apart from ambiguity (a 12-byte AUD header is
//! permissive, so AUD is tried first on purpose).

use std::io::{Read, Seek};
use tracing::debug;

use crate::error::{Error, Result};
use crate::format::{AudFormat, SoundFormat, VocFormat, WavFormat};

/// Identify the container in `reader` and return a handle to it.
///
/// Recognizers run in a fixed order: AUD, VOC, WAV. Each failed attempt is
/// logged at debug level and swallowed; [`Error::UnrecognizedFormat`] is
/// returned only once every candidate has refused the source.
pub fn probe<R: Read + Seek>(mut reader: R) -> Result<SoundFormat<R>> {
    match AudFormat::parse(&mut reader) {
        Ok(header) => {
            debug!("Detected AUD container");
            return Ok(SoundFormat::Aud(AudFormat::from_parts(header, reader)));
        }
        Err(err) => debug!("Not an AUD file: {}", err),
    }

    match VocFormat::parse(&mut reader) {
        Ok((header, scan)) => {
            debug!("Detected VOC container");
            return Ok(SoundFormat::Voc(VocFormat::from_parts(header, scan, reader)));
        }
        Err(err) => debug!("Not a VOC file: {}", err),
    }

    match WavFormat::parse(&mut reader) {
        Ok(header) => {
            debug!("Detected WAV container");
            return Ok(SoundFormat::Wav(WavFormat::from_parts(header, reader)));
        }
        Err(err) => debug!("Not a WAV file: {}", err),
    }

    Err(Error::UnrecognizedFormat)
}
