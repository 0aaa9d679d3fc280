//! The set of known formats, and dispatch to them

use std::fmt;
use std::io::{self, Seek, SeekFrom};
use tracing::{debug, info, warn};

use crate::{Certainty, MapType, ReadSeek, RegistryConfig, RegistryError};

/// Builds one codec. Registries are assembled from an ordered list of these.
pub type CodecConstructor = fn() -> Box<dyn MapType>;

/// One codec's answer during [`FormatRegistry::identify`]
#[derive(Debug, Clone, Copy)]
pub struct Detection<'a> {
    pub codec: &'a dyn MapType,
    pub certainty: Certainty,
}

impl<'a> Detection<'a> {
    pub fn code(&self) -> &'a str {
        self.codec.code()
    }
}

/// Registered codecs, in registration order.
///
/// Codes are unique. Once built, a registry is only read, so it can be shared
/// between threads freely.
#[derive(Default)]
pub struct FormatRegistry {
    codecs: Vec<Box<dyn MapType>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from constructors, in list order.
    ///
    /// Codes disabled in `config` are skipped. A duplicate code is an error.
    pub fn from_constructors(
        constructors: &[CodecConstructor],
        config: &RegistryConfig,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for construct in constructors {
            let codec = construct();
            if config.is_disabled(codec.code()) {
                info!("Format '{}' disabled by config", codec.code());
                continue;
            }
            registry.register_boxed(codec)?;
        }
        Ok(registry)
    }

    /// Add a codec. Fails if its code is already taken.
    pub fn register(&mut self, codec: impl MapType + 'static) -> Result<(), RegistryError> {
        self.register_boxed(Box::new(codec))
    }

    pub fn register_boxed(&mut self, codec: Box<dyn MapType>) -> Result<(), RegistryError> {
        if self.get_by_code(codec.code()).is_some() {
            return Err(RegistryError::DuplicateCode(codec.code().to_string()));
        }
        debug!(
            "Registered format '{}' ({})",
            codec.code(),
            codec.friendly_name()
        );
        self.codecs.push(codec);
        Ok(())
    }

    /// Look up a codec by its exact code
    pub fn get_by_code(&self, code: &str) -> Option<&dyn MapType> {
        self.codecs
            .iter()
            .find(|c| c.code() == code)
            .map(|c| c.as_ref())
    }

    /// All codes, in registration order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.codecs.iter().map(|c| c.code())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn MapType> {
        self.codecs.iter().map(|c| c.as_ref())
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    /// Codecs that declare `ext` (case-insensitive, with or without the dot)
    pub fn find_by_extension(&self, ext: &str) -> Vec<&dyn MapType> {
        let ext = ext.trim_start_matches('.');
        self.iter()
            .filter(|c| c.extensions().iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .collect()
    }

    /// Ask every codec how likely `input` is to be in its format.
    ///
    /// Results are ordered `Definitely`, then `Possibly`, then
    /// `DefinitelyNot`; codecs with equal certainty stay in registration
    /// order. The stream position is restored after each codec, so the same
    /// input always gives the same ranking. A codec that fails with an I/O
    /// error counts as `DefinitelyNot`.
    pub fn identify(&self, input: &mut dyn ReadSeek) -> io::Result<Vec<Detection<'_>>> {
        let start = input.stream_position()?;
        let mut detections = Vec::with_capacity(self.codecs.len());
        for codec in &self.codecs {
            let certainty = match codec.is_instance(&mut *input) {
                Ok(certainty) => certainty,
                Err(e) => {
                    warn!("Format '{}' failed while probing: {}", codec.code(), e);
                    Certainty::DefinitelyNot
                }
            };
            input.seek(SeekFrom::Start(start))?;
            detections.push(Detection {
                codec: codec.as_ref(),
                certainty,
            });
        }
        // Stable sort keeps registration order among equals
        detections.sort_by(|a, b| b.certainty.cmp(&a.certainty));
        Ok(detections)
    }

    /// The highest ranked codec for `input`, if it is confident enough.
    ///
    /// A `Possibly` match is only returned when `accept_possibly` is set.
    pub fn best_match(
        &self,
        input: &mut dyn ReadSeek,
        accept_possibly: bool,
    ) -> io::Result<Option<&dyn MapType>> {
        let detections = self.identify(input)?;
        let Some(best) = detections.first() else {
            return Ok(None);
        };
        let tied = detections
            .iter()
            .filter(|d| d.certainty == best.certainty)
            .count();
        if tied > 1 && best.certainty != Certainty::DefinitelyNot {
            debug!(
                "{} formats report '{}', picking '{}' by registration order",
                tied,
                best.certainty,
                best.code()
            );
        }
        let accepted = match best.certainty {
            Certainty::Definitely => true,
            Certainty::Possibly => accept_possibly,
            Certainty::DefinitelyNot => false,
        };
        Ok(accepted.then_some(best.codec))
    }
}

impl fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.codes()).finish()
    }
}
