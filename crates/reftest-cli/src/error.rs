use reftest_core::{CheckError, CodecError};
use snafu::Snafu;

pub type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CliError {
    #[snafu(display("Failed to read --{what} vector: {source}"))]
    LoadVector {
        what: &'static str,
        source: CodecError,
    },

    #[snafu(display("Failed to read blob header: {source}"))]
    LoadHeader { source: CodecError },

    #[snafu(display("Failed to read blob values: {source}"))]
    LoadValues { source: CodecError },

    #[snafu(display("Cannot run {check} check: {source}"))]
    Check {
        check: &'static str,
        source: CheckError,
    },

    #[snafu(display("Failed to render JSON output: {source}"))]
    RenderJson { source: serde_json::Error },
}
