use std::path::PathBuf;

use clap::Args;
use imgsteg_core::api;

use crate::cli::CodecArgs;
use crate::display::{clean, paint, Style};
use crate::CliResult;

/// Unveils hidden data from an image
#[derive(Args, Debug)]
pub struct UnveilArgs {
    /// Source image that contains secret data
    #[arg(short = 'i', long = "in", value_name = "image source file")]
    pub input_image: PathBuf,

    /// The unmodified carrier image, required for DWT
    #[arg(long, value_name = "original image file")]
    pub original: Option<PathBuf>,

    /// Data will be stored as file, otherwise it is printed as text
    #[arg(short = 'o', long = "out", value_name = "output file")]
    pub output_file: Option<PathBuf>,

    #[command(flatten)]
    pub codec: CodecArgs,
}

impl UnveilArgs {
    pub fn run(self, interactive: bool) -> CliResult<()> {
        let data = api::unveil::prepare()
            .from_secret_file(&self.input_image)
            .use_original_image(self.original.as_ref())
            .use_output_file(self.output_file.as_ref())
            .with_options(self.codec.options())
            .execute()?;

        match self.output_file {
            Some(file) => println!(
                "{}",
                paint(
                    &format!("Unveiled {} bytes into {}", data.len(), file.display()),
                    Style::Success,
                    interactive
                )
            ),
            None => println!("{}", clean(&String::from_utf8_lossy(&data))),
        }

        Ok(())
    }
}
