pub mod batch;
pub mod canvas;
pub mod cli;
pub mod output;

pub use batch::{run, squareify_file, BatchConfig, BatchSummary, InputKind};
pub use canvas::{centered_offset, squared_canvas};
pub use cli::Cli;
pub use output::{encode, OutputFormat, OutputLayout, OutputProfile};
