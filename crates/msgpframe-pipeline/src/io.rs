//! Input and output streams for a pipeline run.
//!
//! Paths are validated before anything is opened. Streams close when the
//! owning value is dropped, on success and error paths alike.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, ErrorKind, Read, StdinLock, StdoutLock, Write};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Name reported for standard input.
pub const STDIN_NAME: &str = "(stdin)";

/// Name reported for standard output.
pub const STDOUT_NAME: &str = "(stdout)";

const IO_BUFFER_CAPACITY: usize = 256 * 1024;

/// Where a run reads from and writes to. `None` means the standard stream.
#[derive(Debug, Clone, Default)]
pub struct StreamPaths {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl StreamPaths {
    pub fn new(input: Option<PathBuf>, output: Option<PathBuf>) -> Self {
        Self { input, output }
    }

    /// Check both paths without opening either.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.input {
            check_input(path)?;
        }
        if let Some(path) = &self.output {
            check_output(path)?;
        }
        Ok(())
    }

    /// Validate, then open the input only.
    pub fn open_input(&self) -> Result<Input, ConfigError> {
        self.validate()?;
        Input::open(self.input.as_deref())
    }

    /// Validate both paths, then open the input and create the output.
    pub fn open(&self) -> Result<(Input, Output), ConfigError> {
        self.validate()?;
        let input = Input::open(self.input.as_deref())?;
        let output = Output::create(self.output.as_deref())?;
        Ok((input, output))
    }
}

/// The input path must exist and be a regular file.
pub fn check_input(path: &Path) -> Result<(), ConfigError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(ConfigError::InputNotFile(path.to_path_buf())),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            Err(ConfigError::InputMissing(path.to_path_buf()))
        }
        Err(source) => Err(ConfigError::Open {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// The output path must not exist yet.
pub fn check_output(path: &Path) -> Result<(), ConfigError> {
    match fs::symlink_metadata(path) {
        Ok(_) => Err(ConfigError::OutputExists(path.to_path_buf())),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(ConfigError::Open {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// A buffered input stream: standard input or a file.
pub struct Input {
    name: String,
    inner: InputInner,
}

enum InputInner {
    Stdin(StdinLock<'static>),
    File(BufReader<File>),
}

impl Input {
    /// Open `path`, or standard input when `None`.
    pub fn open(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self {
                name: STDIN_NAME.to_string(),
                inner: InputInner::Stdin(io::stdin().lock()),
            });
        };

        check_input(path)?;
        let file = File::open(path).map_err(|source| ConfigError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            name: path.display().to_string(),
            inner: InputInner::File(BufReader::with_capacity(IO_BUFFER_CAPACITY, file)),
        })
    }

    /// Name used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Read for Input {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.inner {
            InputInner::Stdin(stdin) => stdin.read(buf),
            InputInner::File(file) => file.read(buf),
        }
    }
}

impl BufRead for Input {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match &mut self.inner {
            InputInner::Stdin(stdin) => stdin.fill_buf(),
            InputInner::File(file) => file.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match &mut self.inner {
            InputInner::Stdin(stdin) => stdin.consume(amt),
            InputInner::File(file) => file.consume(amt),
        }
    }
}

/// A buffered output stream: standard output or a newly created file.
pub struct Output {
    name: String,
    inner: BufWriter<OutputInner>,
}

enum OutputInner {
    Stdout(StdoutLock<'static>),
    File(File),
}

impl Output {
    /// Create `path`, or use standard output when `None`.
    ///
    /// An existing file is never truncated or overwritten.
    pub fn create(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self {
                name: STDOUT_NAME.to_string(),
                inner: BufWriter::with_capacity(
                    IO_BUFFER_CAPACITY,
                    OutputInner::Stdout(io::stdout().lock()),
                ),
            });
        };

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|source| {
                if source.kind() == ErrorKind::AlreadyExists {
                    ConfigError::OutputExists(path.to_path_buf())
                } else {
                    ConfigError::Open {
                        path: path.to_path_buf(),
                        source,
                    }
                }
            })?;
        Ok(Self {
            name: path.display().to_string(),
            inner: BufWriter::with_capacity(IO_BUFFER_CAPACITY, OutputInner::File(file)),
        })
    }

    /// Name used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl Write for OutputInner {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputInner::Stdout(stdout) => stdout.write(buf),
            OutputInner::File(file) => file.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputInner::Stdout(stdout) => stdout.flush(),
            OutputInner::File(file) => file.flush(),
        }
    }
}
