mod console;
mod export;
mod sink;

pub use console::{ConsoleReporter, ConsoleSink};
pub use export::{ExportData, FileSink, JsonSink};
pub use sink::{MemorySink, ResultSink, ResultWriter};
