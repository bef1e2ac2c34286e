use std::path::PathBuf;

use clap::Args;
use imgsteg_core::api;

use crate::display::similarity_report;
use crate::CliResult;

/// Reports how similar an unveiled file is to the expected one
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// The data that was hidden
    #[arg(value_name = "expected file")]
    pub expected: PathBuf,

    /// The data that was unveiled
    #[arg(value_name = "actual file")]
    pub actual: PathBuf,
}

impl CompareArgs {
    pub fn run(self, interactive: bool) -> CliResult<()> {
        let expected = api::read_payload(&self.expected)?;
        let actual = api::read_payload(&self.actual)?;
        println!("{}", similarity_report(&expected, &actual, interactive));

        Ok(())
    }
}
