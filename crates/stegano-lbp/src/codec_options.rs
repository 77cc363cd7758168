use std::fmt;
use std::str::FromStr;

/// Order in which the three color channels of a decoded image are handed to
/// the codec.
///
/// The grayscale weights `0.11 / 0.59 / 0.30` apply to channel 0, 1 and 2 and
/// the codec fills channels in index order. Embedding and extraction need
/// the same order, otherwise texture map and bit positions differ.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChannelOrder {
    /// Blue, green, red. Channel weights then follow the usual luminance formula.
    #[default]
    Bgr,
    /// Red, green, blue, as delivered by the image decoder.
    Rgb,
}

impl FromStr for ChannelOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bgr" => Ok(ChannelOrder::Bgr),
            "rgb" => Ok(ChannelOrder::Rgb),
            other => Err(format!("unknown channel order `{other}`, use `bgr` or `rgb`")),
        }
    }
}

impl fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelOrder::Bgr => write!(f, "bgr"),
            ChannelOrder::Rgb => write!(f, "rgb"),
        }
    }
}

/// Options for reading and writing carrier images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecOptions {
    /// Channel order used when loading and saving images.
    pub channel_order: ChannelOrder,

    /// If set, carriers with other `(height, width)` are rejected.
    pub expected_dimensions: Option<(usize, usize)>,
}

impl CodecOptions {
    pub fn with_channel_order(mut self, channel_order: ChannelOrder) -> Self {
        self.channel_order = channel_order;
        self
    }

    pub fn with_expected_dimensions(mut self, height: usize, width: usize) -> Self {
        self.expected_dimensions = Some((height, width));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_bgr_without_size_restriction() {
        let options = CodecOptions::default();
        assert_eq!(options.channel_order, ChannelOrder::Bgr);
        assert_eq!(options.expected_dimensions, None);
    }

    #[test]
    fn should_parse_channel_orders() {
        assert_eq!("BGR".parse::<ChannelOrder>().unwrap(), ChannelOrder::Bgr);
        assert_eq!("rgb".parse::<ChannelOrder>().unwrap(), ChannelOrder::Rgb);
        assert!("rgba".parse::<ChannelOrder>().is_err());
        assert_eq!(ChannelOrder::Rgb.to_string(), "rgb");
    }
}
