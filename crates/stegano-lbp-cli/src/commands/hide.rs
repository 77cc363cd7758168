use std::path::PathBuf;

use clap::Args;
use stegano_lbp::CodecOptions;

use crate::cli::ask_for_password;
use crate::CliResult;

/// Hides a text message in an image, the result is always a PNG
#[derive(Args, Debug)]
pub struct HideArgs {
    /// Password that scatters the message over the image, asked for if missing
    #[arg(short, long, value_name = "password")]
    pub password: Option<String>,

    /// Carrier image, used readonly
    #[arg(short = 'i', long = "in", value_name = "image file", required = true)]
    pub media: PathBuf,

    /// Final image will be stored as file
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output image file",
        required = true
    )]
    pub write_to_file: PathBuf,

    /// A text message that will be hidden
    #[arg(short, long, value_name = "text message", required = true)]
    pub message: String,
}

impl HideArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let password = ask_for_password(self.password, true)?;

        let report = stegano_lbp::api::hide::prepare()
            .with_image(&self.media)
            .with_output(&self.write_to_file)
            .with_message(&self.message)
            .with_password(password)
            .with_options(options)
            .execute()?;

        println!(
            "Hidden {} bits in {}x{} pixels ({:.4} bpp, capacity {} bits)",
            report.payload_bits,
            report.height,
            report.width,
            report.bits_per_pixel(),
            report.capacity_bits
        );
        Ok(())
    }
}
