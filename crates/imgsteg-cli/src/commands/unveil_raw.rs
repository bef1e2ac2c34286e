use std::path::PathBuf;

use clap::Args;
use imgsteg_core::api;

use crate::cli::CodecArgs;
use crate::CliResult;

/// Unveils the raw bits of an image, without looking for a message
#[derive(Args, Debug)]
pub struct UnveilRawArgs {
    /// Source image that contains secret data
    #[arg(short = 'i', long = "in", value_name = "image source file")]
    pub input_image: PathBuf,

    /// The unmodified carrier image, required for DWT
    #[arg(long, value_name = "original image file")]
    pub original: Option<PathBuf>,

    /// Raw data will be stored as binary file
    #[arg(short = 'o', long = "out", value_name = "output file")]
    pub output_file: PathBuf,

    #[command(flatten)]
    pub codec: CodecArgs,
}

impl UnveilRawArgs {
    pub fn run(self) -> CliResult<()> {
        api::unveil_raw::prepare()
            .from_secret_file(&self.input_image)
            .use_original_image(self.original.as_ref())
            .with_options(self.codec.options())
            .into_raw_file(&self.output_file)
            .execute()
    }
}
