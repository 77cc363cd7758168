use std::path::PathBuf;

use clap::Args;
use stegano_lbp::CodecOptions;

use crate::cli::ask_for_password;
use crate::CliResult;

/// Unveils a text message from an image
#[derive(Args, Debug)]
pub struct UnveilArgs {
    /// Password used for hiding, asked for if missing
    #[arg(short, long, value_name = "password")]
    pub password: Option<String>,

    /// Source image that contains the secret message
    #[arg(
        short = 'i',
        long = "in",
        value_name = "image source file",
        required = true
    )]
    pub media: PathBuf,

    /// Write the message to this file instead of printing it
    #[arg(short = 'o', long = "out", value_name = "output file")]
    pub output_file: Option<PathBuf>,
}

impl UnveilArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let password = ask_for_password(self.password, false)?;

        let api = stegano_lbp::api::unveil::prepare()
            .with_secret_image(&self.media)
            .with_password(password)
            .with_options(options);

        match self.output_file {
            Some(output_file) => {
                api.into_output_file(output_file).execute()?;
            }
            None => println!("{}", api.execute()?),
        }
        Ok(())
    }
}
