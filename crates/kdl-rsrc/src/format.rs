//! Output container formats.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RsrcError;

/// The container variant a resource file is written as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Classic,
    Extended,
    Rez,
}

impl Format {
    /// File extension (without the dot) for artifacts in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Classic => "ndat",
            Format::Extended => "kdat",
            Format::Rez => "rez",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Format::Classic => "classic",
            Format::Extended => "extended",
            Format::Rez => "rez",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = RsrcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Ok(Format::Classic),
            "extended" => Ok(Format::Extended),
            "rez" => Ok(Format::Rez),
            _ => Err(RsrcError::UnknownFormat {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions() {
        assert_eq!(Format::Classic.extension(), "ndat");
        assert_eq!(Format::Extended.extension(), "kdat");
        assert_eq!(Format::Rez.extension(), "rez");
    }

    #[test]
    fn default_is_classic() {
        assert_eq!(Format::default(), Format::Classic);
    }

    #[test]
    fn parse_names() {
        assert_eq!("extended".parse::<Format>().unwrap(), Format::Extended);
        assert_eq!("Rez".parse::<Format>().unwrap(), Format::Rez);
        assert!(matches!(
            "pict".parse::<Format>(),
            Err(RsrcError::UnknownFormat { .. })
        ));
    }
}
