use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// A partition of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    /// Training samples.
    #[default]
    Train,
    /// Validation samples.
    Validation,
    /// Test samples.
    Test,
}

/// The granularity of the samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Single word images.
    #[default]
    Word,
    /// Full text line images.
    Line,
}

impl Split {
    /// The lower-case name of the split.
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Validation => "validation",
            Split::Test => "test",
        }
    }
}

impl Level {
    /// The lower-case name of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Word => "word",
            Level::Line => "line",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Split {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train" => Ok(Split::Train),
            "validation" | "val" => Ok(Split::Validation),
            "test" => Ok(Split::Test),
            _ => Err(DataError::UnknownSplit(s.to_string())),
        }
    }
}

impl FromStr for Level {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "word" => Ok(Level::Word),
            "line" => Ok(Level::Line),
            _ => Err(DataError::UnknownLevel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() -> Result<(), DataError> {
        for split in [Split::Train, Split::Validation, Split::Test] {
            assert_eq!(split.to_string().parse::<Split>()?, split);
        }
        assert_eq!("val".parse::<Split>()?, Split::Validation);
        assert_eq!("line".parse::<Level>()?, Level::Line);
        assert!("page".parse::<Level>().is_err());
        assert!("dev".parse::<Split>().is_err());
        Ok(())
    }
}
