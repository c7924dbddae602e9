//! oldwave - decoders for legacy game audio containers
//!
//! oldwave reads the sound formats shipped by mid-90s Westwood and Creative
//! tooling and turns them into linear PCM: Westwood AUD (4-bit ADPCM),
//! Creative Labs VOC, and RIFF WAV including IMA ADPCM payloads. Sources are
//! identified by content, not extension, because the archives these files
//! come from rarely keep one.
//!
//! # Architecture
//!
//! - `probe`: content-based format detection
//! - `format`: container parsers and their PCM streams (AUD, VOC, WAV)
//! - `codec`: the shared 4-bit ADPCM sample expander
//! - `error`: the crate-wide error type
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::fs;
//! use std::io::Cursor;
//!
//! let bytes = fs::read("sounds/intro.aud")?;
//! let mut format = oldwave::probe(Cursor::new(bytes))?;
//! println!("{}: {} Hz", format.name(), format.sample_rate());
//!
//! let mut stream = format.open_pcm_stream()?;
//! let mut pcm = Vec::new();
//! stream.read_to_end(&mut pcm)?;
//! println!("{} bytes of PCM", pcm.len());
//! # Ok::<(), oldwave::error::Error>(())
//! ```

pub mod codec;
pub mod error;
pub mod format;
pub mod probe;

pub use error::{Error, Result};
pub use format::{PcmStream, SoundFormat};
pub use probe::probe;

/// oldwave version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const VERSION_MAJOR: u32 = 0;
pub const VERSION_MINOR: u32 = 1;
pub const VERSION_PATCH: u32 = 0;

/// Configuration for the oldwave library
#[derive(Debug, Clone)]
pub struct Config {
    /// Enable verbose logging
    pub verbose: bool,
    /// Enable debug output
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            debug: false,
        }
    }
}

/// Initialize the oldwave library with the given configuration
pub fn init(config: Config) -> Result<()> {
    if config.verbose || config.debug {
        let level = if config.debug { "debug" } else { "info" };
        tracing_subscriber::fmt().with_env_filter(level).init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION_MAJOR, 0);
        assert_eq!(VERSION_MINOR, 1);
        assert_eq!(VERSION_PATCH, 0);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.verbose, false);
        assert_eq!(config.debug, false);
    }

    #[test]
    fn test_init() {
        let config = Config::default();
        assert!(init(config).is_ok());
    }
}
