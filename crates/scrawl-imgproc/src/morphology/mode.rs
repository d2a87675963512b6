use std::fmt;
use std::str::FromStr;

use scrawl_image::ImageError;

/// The morphological operator to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MorphologyMode {
    /// Max over the neighborhood.
    Dilation,
    /// Min over the neighborhood.
    Erosion,
    /// Erosion followed by dilation.
    Opening,
    /// Dilation followed by erosion.
    Closing,
}

impl MorphologyMode {
    /// All the modes, in the order used when drawing one at random.
    pub const ALL: [MorphologyMode; 4] = [
        MorphologyMode::Dilation,
        MorphologyMode::Erosion,
        MorphologyMode::Opening,
        MorphologyMode::Closing,
    ];

    /// The lower-case name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            MorphologyMode::Dilation => "dilation",
            MorphologyMode::Erosion => "erosion",
            MorphologyMode::Opening => "opening",
            MorphologyMode::Closing => "closing",
        }
    }
}

impl fmt::Display for MorphologyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MorphologyMode {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ImageError::UnknownMorphologyMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_modes() -> Result<(), ImageError> {
        for mode in MorphologyMode::ALL {
            assert_eq!(mode.to_string().parse::<MorphologyMode>()?, mode);
        }
        assert_eq!(
            "tophat".parse::<MorphologyMode>(),
            Err(ImageError::UnknownMorphologyMode("tophat".to_string()))
        );
        Ok(())
    }
}
