//! Eager scan of the VOC data-block sequence
//!
//! Blocks are walked once at construction time. Sound-data payloads are
//! not read here; only their offsets and lengths are recorded so the
//! stream can seek back to them later.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use tracing::trace;

use super::header::{extended_rate_from_divisor, rate_from_divisor};
use crate::error::{Error, Result};

/// One parsed block from a VOC file's data area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocBlock {
    /// Code 1: `sample_count` bytes of unsigned 8-bit PCM at `offset`.
    SoundData {
        rate: u32,
        sample_count: u32,
        offset: u64,
    },
    /// Code 3: a run of zero samples with no backing bytes.
    Silence { rate: u32, sample_count: u32 },
    /// Code 6: repeat count, parsed for completeness but never applied.
    RepeatStart { count: u32 },
    /// Code 7: end of a repeat section.
    RepeatEnd,
    /// Code 8: rate override for the sound-data block that must follow.
    /// Never survives the scan; it is either merged or rejected.
    ExtraInfo { rate: u32 },
}

/// Outcome of the block scan.
#[derive(Debug, Clone)]
pub struct BlockScan {
    pub blocks: Vec<VocBlock>,
    /// Common rate of all sound-data blocks.
    pub sample_rate: u32,
    /// Samples across sound-data blocks. Silence is not counted.
    pub total_samples: u64,
}

/// Walk the block sequence from the current position and validate it.
///
/// The sequence ends at a terminator block (code 0), any code above 9,
/// codes 2, 4 and 5, or a clean end of the source at a block boundary.
/// Running out of bytes inside a block is an error.
pub fn scan_blocks<R: Read + Seek>(reader: &mut R) -> Result<BlockScan> {
    let mut blocks = Vec::new();
    let mut sample_rate = 0u32;

    loop {
        let mut code = [0u8; 1];
        match reader.read_exact(&mut code) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(Error::Io(e)),
        }
        let code = code[0];
        if code == 0 || code > 9 {
            break;
        }

        let length = reader
            .read_u24::<LittleEndian>()
            .map_err(|e| Error::read("VOC block length", e))?;
        match code {
            1 => {
                if length < 2 {
                    return Err(Error::malformed(format!(
                        "VOC sound data block length {}",
                        length
                    )));
                }
                let divisor = reader
                    .read_u8()
                    .map_err(|e| Error::read("VOC sound data block", e))?;
                let mut rate = rate_from_divisor(u32::from(divisor))?;
                let codec = reader
                    .read_u8()
                    .map_err(|e| Error::read("VOC sound data block", e))?;
                if codec != 0 {
                    return Err(Error::unsupported_codec(format!(
                        "VOC sound data codec {}",
                        codec
                    )));
                }

                let sample_count = length - 2;
                let offset = reader.stream_position().map_err(Error::Io)?;

                // A directly preceding extra-info block overrides the
                // rate and is consumed by the merge.
                if let Some(&VocBlock::ExtraInfo { rate: extended }) = blocks.last() {
                    rate = extended;
                    blocks.pop();
                }
                if sample_rate < rate {
                    sample_rate = rate;
                }

                blocks.push(VocBlock::SoundData {
                    rate,
                    sample_count,
                    offset,
                });
                reader
                    .seek(SeekFrom::Current(i64::from(sample_count)))
                    .map_err(Error::Io)?;
            }
            3 => {
                if length != 3 {
                    return Err(Error::malformed(format!(
                        "VOC silence block length {}",
                        length
                    )));
                }
                let sample_count = u32::from(
                    reader
                        .read_u16::<LittleEndian>()
                        .map_err(|e| Error::read("VOC silence block", e))?,
                ) + 1;
                let divisor = reader
                    .read_u8()
                    .map_err(|e| Error::read("VOC silence block", e))?;
                let rate = rate_from_divisor(u32::from(divisor))?;
                blocks.push(VocBlock::Silence { rate, sample_count });
            }
            6 => {
                if length != 2 {
                    return Err(Error::malformed(format!(
                        "VOC repeat start block length {}",
                        length
                    )));
                }
                let count = u32::from(
                    reader
                        .read_u16::<LittleEndian>()
                        .map_err(|e| Error::read("VOC repeat start block", e))?,
                ) + 1;
                blocks.push(VocBlock::RepeatStart { count });
            }
            7 => blocks.push(VocBlock::RepeatEnd),
            8 => {
                if length != 4 {
                    return Err(Error::malformed(format!(
                        "VOC extra info block length {}",
                        length
                    )));
                }
                let divisor = reader
                    .read_u16::<LittleEndian>()
                    .map_err(|e| Error::read("VOC extra info block", e))?;
                let rate = extended_rate_from_divisor(u32::from(divisor))?;
                let codec = reader
                    .read_u8()
                    .map_err(|e| Error::read("VOC extra info block", e))?;
                if codec != 0 {
                    return Err(Error::unsupported_codec(format!(
                        "VOC extra info codec {}",
                        codec
                    )));
                }
                let channels = u16::from(
                    reader
                        .read_u8()
                        .map_err(|e| Error::read("VOC extra info block", e))?,
                ) + 1;
                if channels != 1 {
                    return Err(Error::unsupported_layout(format!(
                        "{} channels in VOC extra info block",
                        channels
                    )));
                }
                blocks.push(VocBlock::ExtraInfo { rate });
            }
            9 => {
                return Err(Error::unsupported_codec(
                    "VOC new-format sound data block",
                ))
            }
            // Codes 2, 4 and 5 end the sequence without error.
            _ => break,
        }
    }

    let mut total_samples = 0u64;
    for block in &blocks {
        match *block {
            VocBlock::ExtraInfo { .. } => {
                return Err(Error::inconsistent(
                    "VOC extra info block not followed by sound data",
                ))
            }
            VocBlock::SoundData {
                rate, sample_count, ..
            } => {
                if rate != sample_rate {
                    return Err(Error::inconsistent(format!(
                        "VOC sound data at {} Hz in a {} Hz file",
                        rate, sample_rate
                    )));
                }
                total_samples += u64::from(sample_count);
            }
            _ => {}
        }
    }

    trace!(
        "Scanned {} VOC blocks: {} samples at {} Hz",
        blocks.len(),
        total_samples,
        sample_rate
    );
    Ok(BlockScan {
        blocks,
        sample_rate,
        total_samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sound_block(divisor: u8, payload: &[u8]) -> Vec<u8> {
        let length = (payload.len() + 2) as u32;
        let mut bytes = vec![1];
        bytes.extend_from_slice(&length.to_le_bytes()[..3]);
        bytes.push(divisor);
        bytes.push(0);
        bytes.extend_from_slice(payload);
        bytes
    }

    #[test]
    fn test_single_sound_block() {
        let mut data = sound_block(0xA5, &[1, 2, 3, 4]);
        data.push(0);
        let scan = scan_blocks(&mut Cursor::new(data)).unwrap();
        assert_eq!(scan.sample_rate, 11025);
        assert_eq!(scan.total_samples, 4);
        assert_eq!(
            scan.blocks,
            vec![VocBlock::SoundData {
                rate: 11025,
                sample_count: 4,
                offset: 6,
            }]
        );
    }

    #[test]
    fn test_block_length_uses_all_three_bytes() {
        // Length 70_002 = 0x011172 puts a significant value in every byte
        // of the 24-bit field.
        let payload = vec![0u8; 70_000];
        let mut data = sound_block(0xA5, &payload);
        data.push(0);
        let scan = scan_blocks(&mut Cursor::new(data)).unwrap();
        assert_eq!(scan.total_samples, 70_000);
        assert!(matches!(
            scan.blocks[0],
            VocBlock::SoundData {
                sample_count: 70_000,
                ..
            }
        ));
    }

    #[test]
    fn test_extra_info_merges_into_sound_data() {
        // 256_000_000 / (65_536 - 54_322) rounds down to 22_828 Hz.
        let mut data = vec![8, 4, 0, 0];
        data.extend_from_slice(&54_322u16.to_le_bytes());
        data.push(0);
        data.push(0);
        data.extend_from_slice(&sound_block(0xA5, &[0; 8]));
        data.push(0);

        let scan = scan_blocks(&mut Cursor::new(data)).unwrap();
        assert_eq!(scan.blocks.len(), 1);
        assert_eq!(scan.sample_rate, 22828);
        assert!(matches!(
            scan.blocks[0],
            VocBlock::SoundData { rate: 22828, .. }
        ));
    }

    #[test]
    fn test_unmerged_extra_info_rejected() {
        let mut data = vec![8, 4, 0, 0];
        data.extend_from_slice(&54_322u16.to_le_bytes());
        data.push(0);
        data.push(0);
        data.push(0);
        let err = scan_blocks(&mut Cursor::new(data)).unwrap_err();
        assert!(matches!(err, Error::InconsistentStream(_)));
    }

    #[test]
    fn test_mixed_rates_rejected() {
        let mut data = sound_block(0xA5, &[0; 4]);
        data.extend_from_slice(&sound_block(0xD2, &[0; 4]));
        data.push(0);
        let err = scan_blocks(&mut Cursor::new(data)).unwrap_err();
        assert!(matches!(err, Error::InconsistentStream(_)));
    }

    #[test]
    fn test_silence_counts_samples_but_not_totals() {
        let mut data = sound_block(0xA5, &[0; 4]);
        data.extend_from_slice(&[3, 3, 0, 0]);
        data.extend_from_slice(&99u16.to_le_bytes());
        data.push(0xA5);
        data.push(0);
        let scan = scan_blocks(&mut Cursor::new(data)).unwrap();
        assert_eq!(scan.total_samples, 4);
        assert_eq!(
            scan.blocks[1],
            VocBlock::Silence {
                rate: 11025,
                sample_count: 100,
            }
        );
    }

    #[test]
    fn test_silence_rate_not_held_to_container_rate() {
        let mut data = vec![3, 3, 0, 0];
        data.extend_from_slice(&9u16.to_le_bytes());
        data.push(0xD2);
        data.extend_from_slice(&sound_block(0xA5, &[0; 4]));
        data.push(0);
        let scan = scan_blocks(&mut Cursor::new(data)).unwrap();
        assert_eq!(scan.sample_rate, 11025);
        assert_eq!(scan.blocks.len(), 2);
    }

    #[test]
    fn test_repeat_blocks_parsed_only() {
        let mut data = vec![6, 2, 0, 0];
        data.extend_from_slice(&4u16.to_le_bytes());
        data.extend_from_slice(&sound_block(0xA5, &[0; 4]));
        data.extend_from_slice(&[7, 0, 0, 0]);
        data.push(0);
        let scan = scan_blocks(&mut Cursor::new(data)).unwrap();
        assert_eq!(scan.blocks.len(), 3);
        assert_eq!(scan.blocks[0], VocBlock::RepeatStart { count: 5 });
        assert_eq!(scan.blocks[2], VocBlock::RepeatEnd);
        assert_eq!(scan.total_samples, 4);
    }

    #[test]
    fn test_bad_codec_rejected() {
        let mut data = sound_block(0xA5, &[0; 4]);
        data[5] = 4;
        let err = scan_blocks(&mut Cursor::new(data)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedCodec(_)));
    }

    #[test]
    fn test_new_format_block_rejected() {
        let data = vec![9, 12, 0, 0];
        let err = scan_blocks(&mut Cursor::new(data)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedCodec(_)));
    }

    #[test]
    fn test_unknown_codes_end_scan() {
        for code in [2u8, 4, 5] {
            let mut data = sound_block(0xA5, &[0; 4]);
            data.push(code);
            data.extend_from_slice(&[0, 0, 0]);
            let scan = scan_blocks(&mut Cursor::new(data)).unwrap();
            assert_eq!(scan.blocks.len(), 1, "code {} should end the scan", code);
        }
        let mut data = sound_block(0xA5, &[0; 4]);
        data.push(200);
        let scan = scan_blocks(&mut Cursor::new(data)).unwrap();
        assert_eq!(scan.blocks.len(), 1);
    }

    #[test]
    fn test_eof_at_block_boundary_ends_scan() {
        let data = sound_block(0xA5, &[0; 4]);
        let scan = scan_blocks(&mut Cursor::new(data)).unwrap();
        assert_eq!(scan.blocks.len(), 1);
        assert_eq!(scan.total_samples, 4);
    }

    #[test]
    fn test_eof_inside_block_is_truncated() {
        let data = sound_block(0xA5, &[0; 4]);
        let err = scan_blocks(&mut Cursor::new(&data[..3])).unwrap_err();
        assert!(matches!(err, Error::Truncated(_)));
    }
}
