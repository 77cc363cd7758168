use clap::{Parser, Subcommand};
use stegano_lbp::{ChannelOrder, CodecOptions, StegoError};

use crate::commands::*;
use crate::CliResult;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Channel order the codec sees, must match between hide and unveil
    #[arg(long, global = true, value_name = "bgr|rgb", default_value_t = ChannelOrder::Bgr)]
    pub channel_order: ChannelOrder,

    /// Reject images that are not exactly HEIGHTxWIDTH pixels, e.g. 512x512
    #[arg(long, global = true, value_name = "HEIGHTxWIDTH", value_parser = parse_size)]
    pub expect_size: Option<(usize, usize)>,

    #[command(subcommand)]
    pub command: Commands,
}

impl CliArgs {
    pub fn codec_options(&self) -> CodecOptions {
        let options = CodecOptions::default().with_channel_order(self.channel_order);
        match self.expect_size {
            Some((height, width)) => options.with_expected_dimensions(height, width),
            None => options,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Hide(hide::HideArgs),
    Unveil(unveil::UnveilArgs),
    Capacity(capacity::CapacityArgs),
}

fn parse_size(s: &str) -> Result<(usize, usize), String> {
    let (height, width) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("`{s}` is not of the form HEIGHTxWIDTH"))?;
    let height = height
        .trim()
        .parse()
        .map_err(|e| format!("invalid height `{height}`: {e}"))?;
    let width = width
        .trim()
        .parse()
        .map_err(|e| format!("invalid width `{width}`: {e}"))?;

    Ok((height, width))
}

/// Returns the given password, or asks for one on the terminal.
pub fn ask_for_password(password: Option<String>, confirm: bool) -> CliResult<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    let prompt = dialoguer::Password::new().with_prompt("Password");
    let prompt = if confirm {
        prompt.with_confirmation("Repeat password", "Error: the passwords don't match.")
    } else {
        prompt
    };

    prompt
        .interact()
        .map_err(|e| StegoError::IoError(std::io::Error::new(std::io::ErrorKind::Other, e)))
}
