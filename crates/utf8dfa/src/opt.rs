//! Helper module with the options for recovering from malformed input.
//!
//! The core [`decode`](crate::decode()) has no options; it stops at the first
//! malformed sequence. The [`decode_with`](crate::recover::decode_with)
//! function instead consults an options object to decide whether to stop,
//! replace, or skip malformed sequences.
//!
//!
//! # Example
//!
//! ```
//! # use utf8dfa::opt::{Options, Recovery};
//! let options = Options::builder()
//!     .recovery(Recovery::Skip)
//!     .max_errors(10)
//!     .build();
//!
//! assert_eq!(options.recovery(), Recovery::Skip);
//! assert_eq!(options.max_errors(), 10);
//! ```

/// The diagnostic volume.
///
/// It determines which errors a recovering decoder retains in its
/// [`Outcome`](crate::recover::Outcome). Errors are counted independent of
/// volume.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Volume {
    /// Retain no errors.
    #[default]
    Silent,
    /// Retain the first error only.
    Regular,
    /// Retain all errors.
    Detailed,
}

/// The strategy for malformed sequences.
///
/// Both replacing and skipping treat a *maximal subpart* as one malformed
/// sequence, i.e., the longest prefix of a well-formed sequence, or one byte
/// if there is no such prefix. That is the practice recommended by the Unicode
/// Standard and also used by [`String::from_utf8_lossy`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Recovery {
    /// Stop at the first malformed sequence with an error.
    Stop,
    /// Replace each malformed sequence with the replacement character.
    #[default]
    Replace,
    /// Skip malformed sequences.
    Skip,
}

#[derive(Clone, Debug)]
struct OptionData {
    volume: Volume,
    recovery: Recovery,
    replacement: char,
    max_errors: usize,
}

impl OptionData {
    pub const fn new() -> Self {
        Self {
            volume: Volume::Silent,
            recovery: Recovery::Replace,
            replacement: char::REPLACEMENT_CHARACTER,
            max_errors: usize::MAX,
        }
    }
}

/// A builder of options objects.
#[derive(Debug)]
pub struct OptionBuilder(OptionData);

impl OptionBuilder {
    /// Set the volume.
    pub fn volume(&mut self, volume: Volume) -> &mut Self {
        self.0.volume = volume;
        self
    }

    /// Set the recovery strategy.
    pub fn recovery(&mut self, recovery: Recovery) -> &mut Self {
        self.0.recovery = recovery;
        self
    }

    /// Set the replacement character.
    ///
    /// It only matters for [`Recovery::Replace`].
    pub fn replacement(&mut self, replacement: char) -> &mut Self {
        self.0.replacement = replacement;
        self
    }

    /// Set the maximum number of malformed sequences to recover from.
    ///
    /// Once a recovering decoder encounters one more malformed sequence, it
    /// fails with [`ErrorKind::TooManyErrors`](crate::err::ErrorKind).
    pub fn max_errors(&mut self, max_errors: usize) -> &mut Self {
        self.0.max_errors = max_errors;
        self
    }

    /// Instantiate the options.
    pub fn build(&self) -> Options {
        Options(self.0.clone())
    }
}

/// An options object.
#[derive(Clone, Debug)]
pub struct Options(OptionData);

impl Default for Options {
    fn default() -> Self {
        Options(OptionData::new())
    }
}

impl Options {
    /// Create a new builder with the default option values.
    pub fn builder() -> OptionBuilder {
        OptionBuilder(OptionData::new())
    }

    /// Instantiate the default options but stopping at the first error.
    pub fn strict() -> Options {
        Self::builder().recovery(Recovery::Stop).build()
    }

    /// Instantiate the default options but retaining the first error.
    pub fn with_log() -> Options {
        Self::builder().volume(Volume::Regular).build()
    }

    /// Instantiate the default options but retaining all errors.
    pub fn with_detailed_log() -> Options {
        Self::builder().volume(Volume::Detailed).build()
    }

    /// Get the volume.
    pub fn volume(&self) -> Volume {
        self.0.volume
    }

    /// Get the recovery strategy.
    pub fn recovery(&self) -> Recovery {
        self.0.recovery
    }

    /// Get the replacement character.
    pub fn replacement(&self) -> char {
        self.0.replacement
    }

    /// Get the maximum number of malformed sequences to recover from.
    pub fn max_errors(&self) -> usize {
        self.0.max_errors
    }
}
