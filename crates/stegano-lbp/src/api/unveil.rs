use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::{commands, CodecOptions, StegoError};

use super::Password;

pub fn prepare() -> UnveilApi {
    UnveilApi::default()
}

#[derive(Default, Debug)]
pub struct UnveilApi {
    secret_media: Option<PathBuf>,
    output_file: Option<PathBuf>,
    password: Password,
    options: CodecOptions,
}

impl UnveilApi {
    /// Use the given codec options
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// This is the secret image that contains the message to be unveiled
    pub fn with_secret_image(mut self, secret_image: impl AsRef<Path>) -> Self {
        self.secret_media = Some(secret_image.as_ref().to_path_buf());
        self
    }

    /// If set, the message is also written to this file
    pub fn into_output_file(mut self, output_file: impl AsRef<Path>) -> Self {
        self.output_file = Some(output_file.as_ref().to_path_buf());
        self
    }

    /// Set the password that was used for hiding
    pub fn with_password<P: Into<Password>>(mut self, password: P) -> Self {
        self.password = password.into();
        self
    }

    /// Execute the unveil process and blocks until it is finished
    pub fn execute(self) -> Result<String, StegoError> {
        let Some(secret_media) = self.secret_media else {
            return Err(StegoError::CarrierNotSet);
        };
        let Some(password) = self.password.as_ref() else {
            return Err(StegoError::MissingPassword);
        };

        let message = commands::unveil(&secret_media, password, &self.options)?;

        if let Some(output_file) = self.output_file {
            fs::write(&output_file, message.as_bytes())
                .map_err(|source| StegoError::WriteError { source })?;
            info!("message written to {output_file:?}");
        }

        Ok(message)
    }
}
