use std::io::Write;

use crate::error::SinkError;

/// Destination for printer output, one call per line.
pub trait LineSink {
    fn write_line(&mut self, line: &str) -> Result<(), SinkError>;
}

/// Newline-terminated lines on any writer (stdout for the CLI).
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LineSink for WriterSink<W> {
    fn write_line(&mut self, line: &str) -> Result<(), SinkError> {
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }
}

/// Keeps every line in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl LineSink for MemorySink {
    fn write_line(&mut self, line: &str) -> Result<(), SinkError> {
        self.lines.push(line.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writer_sink_terminates_each_line() {
        let mut sink = WriterSink::new(Vec::new());
        sink.write_line("   id: 42").expect("write");
        sink.write_line("").expect("write");
        sink.write_line("1 entries.").expect("write");
        let out = String::from_utf8(sink.into_inner()).expect("utf8");
        assert_eq!(out, "   id: 42\n\n1 entries.\n");
    }

    #[test]
    fn test_writer_sink_surfaces_io_errors() {
        let mut sink = WriterSink::new(BrokenPipe);
        let err = sink.write_line("lost").expect_err("broken pipe");
        assert!(matches!(err, SinkError::Io(ref e) if e.kind() == std::io::ErrorKind::BrokenPipe));
    }

    #[test]
    fn test_memory_sink_keeps_order() {
        let mut sink = MemorySink::new();
        for line in ["a", "b", "c"] {
            sink.write_line(line).expect("write");
        }
        assert_eq!(sink.lines(), ["a", "b", "c"]);
    }
}
