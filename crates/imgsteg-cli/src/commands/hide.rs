use std::path::PathBuf;

use clap::{ArgGroup, Args};
use imgsteg_core::api::{self, hide::HideReport};
use imgsteg_core::{CodecOptions, StegoError};

use crate::cli::CodecArgs;
use crate::display::{paint, similarity_report, Style};
use crate::CliResult;

/// Hides a message or a file in an image
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("payload")
        .required(true)
        .args(["data_file", "message"])
))]
pub struct HideArgs {
    /// Carrier image (PNG, JPEG or BMP), used readonly
    #[arg(short = 'i', long = "in", value_name = "image file")]
    pub media: PathBuf,

    /// Final image will be stored as file, the extension picks the format.
    /// Defaults to `<stem>.<technique>.png|jpg` next to the carrier.
    #[arg(short = 'o', long = "out", value_name = "output image file")]
    pub write_to_file: Option<PathBuf>,

    /// File to hide in the image
    #[arg(short = 'd', long = "data", value_name = "data file")]
    pub data_file: Option<PathBuf>,

    /// A text message that will be hidden
    #[arg(short, long, value_name = "text message")]
    pub message: Option<String>,

    /// JPEG quality (1-100) when the output is a JPEG file
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,

    /// Unveils the written image right away and reports how much survived
    #[arg(long)]
    pub verify: bool,

    #[command(flatten)]
    pub codec: CodecArgs,
}

impl HideArgs {
    pub fn run(self, interactive: bool) -> CliResult<()> {
        let options = self.codec.options();
        let expected = match (&self.message, &self.data_file) {
            (Some(message), _) => message.as_bytes().to_vec(),
            (None, Some(file)) => api::read_payload(file)?,
            (None, None) => return Err(StegoError::MissingMessage),
        };

        let mut hide = api::hide::prepare()
            .with_data(expected.clone())
            .with_image(&self.media)
            .use_output(self.write_to_file.as_ref())
            .with_options(options);
        if let Some(quality) = self.quality {
            hide = hide.with_jpeg_quality(quality);
        }
        let report = hide.execute()?;
        println!("{}", summary(&report, options, interactive));

        if self.verify {
            let unveiled = match api::unveil::prepare()
                .from_secret_file(&report.output)
                .with_original_image(&self.media)
                .with_options(options)
                .execute()
            {
                Ok(data) => data,
                Err(StegoError::NoSecretData) => Vec::new(),
                Err(e) => return Err(e),
            };
            println!("{}", similarity_report(&expected, &unveiled, interactive));
        }

        Ok(())
    }
}

fn summary(report: &HideReport, options: CodecOptions, interactive: bool) -> String {
    let mut text = format!(
        "Hid {} bits with {} in {} (capacity {} bits)",
        report.payload_bits,
        options.technique(),
        report.output.display(),
        report.capacity
    );
    if report.is_truncated() {
        text.push('\n');
        text.push_str(&paint(
            "The data exceeds the capacity and was cut off",
            Style::Warning,
            interactive,
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn summary_should_warn_about_truncation() {
        let mut report = HideReport {
            output: Path::new("out.png").to_path_buf(),
            payload_bits: 96,
            capacity: 300,
        };
        let text = summary(&report, CodecOptions::default(), false);
        assert_eq!(text, "Hid 96 bits with lsb in out.png (capacity 300 bits)");

        report.capacity = 64;
        let text = summary(&report, CodecOptions::default(), false);
        assert!(text.ends_with("cut off"));
    }
}
