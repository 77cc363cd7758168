use std::path::{Path, PathBuf};

use crate::commands::{self, HideReport};
use crate::{CodecOptions, StegoError};

use super::Password;

pub fn prepare() -> HideApi {
    HideApi::default()
}

#[derive(Default, Debug)]
pub struct HideApi {
    message: Option<String>,
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    password: Password,
    options: CodecOptions,
}

impl HideApi {
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn use_message<S: AsRef<str>>(mut self, message: Option<S>) -> Self {
        self.message = message.map(|s| s.as_ref().to_string());
        self
    }

    /// The carrier image
    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    /// Where the stego image goes, it is always written as PNG
    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Set the password that derives the pixel visiting order
    pub fn with_password<P: Into<Password>>(mut self, password: P) -> Self {
        self.password = password.into();
        self
    }

    pub fn execute(self) -> Result<HideReport, StegoError> {
        self.validate()?;
        let Some(image) = self.image else {
            return Err(StegoError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(StegoError::TargetNotSet);
        };
        let (Some(message), Some(password)) = (self.message, self.password.as_ref()) else {
            return Err(StegoError::MissingMessage);
        };

        commands::hide(&image, &output, &message, password, &self.options)
    }

    fn validate(&self) -> Result<(), StegoError> {
        if self.message.is_none() {
            return Err(StegoError::MissingMessage);
        }
        if !self.password.is_set() {
            return Err(StegoError::MissingPassword);
        }

        Ok(())
    }
}
