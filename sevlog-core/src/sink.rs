use std::{
    fs::File,
    io::{self, BufWriter, IsTerminal, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::diagnostics::report_failure;

/// A writable destination the logger can also shut down.
pub trait Sink: Write + Send {
    /// Releases the destination. Closing an already closed sink is an error for
    /// sinks that own a handle.
    fn close(&mut self) -> io::Result<()>;
    /// Short human readable name used in failure reports.
    fn describe(&self) -> String;
    fn is_terminal(&self) -> bool {
        false
    }
}

/// Sink handle shared between severities and the logger's close list.
pub type SharedSink = Arc<Mutex<dyn Sink>>;

pub fn shared<S: Sink + 'static>(sink: S) -> SharedSink {
    Arc::new(Mutex::new(sink))
}

/// Whether two handles point at the same sink.
pub fn same_sink(a: &SharedSink, b: &SharedSink) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Locks a shared sink, recovering it if a writer panicked while holding it.
pub fn lock_sink(sink: &SharedSink) -> MutexGuard<'_, dyn Sink + 'static> {
    sink.lock().unwrap_or_else(PoisonError::into_inner)
}

fn closed_error(what: &str) -> io::Error {
    io::Error::other(format!("{what} is already closed"))
}

/// Append-only log file.
pub struct LogFile {
    path: PathBuf,
    file: Option<BufWriter<File>>,
}

impl LogFile {
    /// Opens `path` for appending, creating it with mode `0666` (before umask)
    /// when missing.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let mut options = File::options();
        options.create(true).append(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o666);
        }
        let file = options.open(&path)?;
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            file: Some(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file(&mut self) -> io::Result<&mut BufWriter<File>> {
        match self.file.as_mut() {
            Some(file) => Ok(file),
            None => Err(closed_error(&self.path.display().to_string())),
        }
    }
}

impl Write for LogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file()?.flush()
    }
}

impl Sink for LogFile {
    fn close(&mut self) -> io::Result<()> {
        let file = self
            .file
            .take()
            .ok_or_else(|| closed_error(&self.path.display().to_string()))?;
        file.into_inner().map_err(|err| err.into_error())?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Opens a log file for appending, or terminates the process with status 1.
///
/// A program that cannot open its own log file is not expected to continue, so
/// the failure is reported on stderr instead of being returned.
pub fn file_for_saving<P: AsRef<Path>>(path: P) -> LogFile {
    match LogFile::new(&path) {
        Ok(file) => file,
        Err(err) => {
            let target = format!("log file {}", path.as_ref().display());
            report_failure(&mut LogStderr, "open", &target, &err);
            std::process::exit(1);
        }
    }
}

#[derive(Default, Debug, Clone, Copy)]
pub struct LogStdout;

impl Write for LogStdout {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().lock().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        io::stdout().lock().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

impl Sink for LogStdout {
    // The process keeps its standard streams; closing only flushes.
    fn close(&mut self) -> io::Result<()> {
        self.flush()
    }

    fn describe(&self) -> String {
        "stdout".into()
    }

    fn is_terminal(&self) -> bool {
        io::stdout().is_terminal()
    }
}

#[derive(Default, Debug, Clone, Copy)]
pub struct LogStderr;

impl Write for LogStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().lock().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        io::stderr().lock().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

impl Sink for LogStderr {
    fn close(&mut self) -> io::Result<()> {
        self.flush()
    }

    fn describe(&self) -> String {
        "stderr".into()
    }

    fn is_terminal(&self) -> bool {
        io::stderr().is_terminal()
    }
}

#[derive(Default, Debug)]
struct MemoryBuffer {
    bytes: Vec<u8>,
    closed: bool,
}

/// In-memory sink. Clones share the same buffer, so a caller can keep one
/// clone to read back what the logger wrote into another.
#[derive(Default, Debug, Clone)]
pub struct MemorySink {
    buffer: Arc<Mutex<MemoryBuffer>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn buffer(&self) -> MutexGuard<'_, MemoryBuffer> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer().bytes).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    pub fn is_closed(&self) -> bool {
        self.buffer().closed
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut buffer = self.buffer();
        if buffer.closed {
            return Err(closed_error("memory sink"));
        }
        buffer.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Sink for MemorySink {
    fn close(&mut self) -> io::Result<()> {
        let mut buffer = self.buffer();
        if buffer.closed {
            return Err(closed_error("memory sink"));
        }
        buffer.closed = true;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".into()
    }
}
