/// Filesystem adapters: SBOM input and report output
mod file_writer;
mod syft_reader;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use syft_reader::SyftJsonReader;
