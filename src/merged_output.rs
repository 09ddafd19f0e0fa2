//! Merging a child's stdout and stderr into a single stream of lines
//!
//! The child gets one pipe as both its stdout and its stderr, so the lines
//! come back in exactly the order the child wrote them. The reading side
//! splits that pipe into decoded lines as soon as each one is complete.

use std::io::{self, BufRead, BufReader, PipeReader, Read};
use std::process::Stdio;

/// One pipe shared by a child's stdout and stderr
pub struct SharedPipe {
    /// Read end kept by the parent
    pub reader: PipeReader,
    /// Write end for the child's stdout
    pub stdout: Stdio,
    /// Write end for the child's stderr
    pub stderr: Stdio,
}

/// Create a pipe whose write end serves as both stdout and stderr
///
/// The caller must let the `Stdio` halves drop once the child is spawned,
/// otherwise the reader never sees EOF.
pub fn shared_pipe() -> io::Result<SharedPipe> {
    let (reader, writer) = io::pipe()?;
    Ok(SharedPipe {
        reader,
        stdout: Stdio::from(writer.try_clone()?),
        stderr: Stdio::from(writer),
    })
}

/// Iterator over the decoded lines of a reader
///
/// Invalid UTF-8 is replaced rather than rejected. The line terminator
/// (`\n` or `\r\n`) is stripped.
pub struct Lines<R> {
    reader: BufReader<R>,
    buffer: Vec<u8>,
}

/// Split `reader` into lines
pub fn lines<R: Read>(reader: R) -> Lines<R> {
    Lines {
        reader: BufReader::new(reader),
        buffer: Vec::new(),
    }
}

impl<R: Read> Iterator for Lines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(0) => return None, // EOF
                Ok(_) => return Some(Ok(decode_line(&self.buffer))),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}
