//! Line sinks
//!
//! A sink receives every line a run produces, in order. The runner and the
//! executor only ever see one sink; fanning out to several destinations is
//! the sink's job (see `RunLogger`).

/// Receiver of text lines
pub trait LineSink: Send {
    /// Handles one line, without its trailing newline
    fn emit(&mut self, line: &str);
}

impl<S: LineSink + ?Sized> LineSink for &mut S {
    fn emit(&mut self, line: &str) {
        (**self).emit(line);
    }
}

/// Collects lines in memory
impl LineSink for Vec<String> {
    fn emit(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

/// Discards every line
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LineSink for NullSink {
    fn emit(&mut self, _line: &str) {}
}
