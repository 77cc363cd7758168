use std::path::PathBuf;

use clap::Args;
use stegano_lbp::CodecOptions;

use crate::CliResult;

/// Shows how the texture of an image splits and how much text fits in
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// Carrier image to analyze
    #[arg(short = 'i', long = "in", value_name = "image file", required = true)]
    pub media: PathBuf,
}

impl CapacityArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let report = stegano_lbp::commands::capacity(&self.media, &options)?;

        println!("Image:          {}x{} pixels", report.height, report.width);
        println!("Smooth pixels:  {}", report.smooth_pixels);
        println!("Rough pixels:   {}", report.rough_pixels);
        println!(
            "Capacity:       {} bits ({:.4} bpp)",
            report.capacity_bits,
            report.bits_per_pixel()
        );
        println!("Max. message:   {} characters", report.max_message_chars());
        Ok(())
    }
}
