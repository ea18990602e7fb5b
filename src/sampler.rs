//! Uniform random line selection.
//!
//! Flavor responses pick one line out of a plain text file. The file is never
//! loaded whole: a first pass counts newline-terminated lines, a random index
//! is drawn from `[0, count)`, and a second pass reads up to that line.
//!
//! A trailing fragment without `\n` is not counted as a line.

use rand::Rng;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;
use thiserror::Error;

/// Errors produced while sampling a line source.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("line source unavailable: {0}")]
    SourceUnavailable(#[from] io::Error),

    #[error("line source contains no lines")]
    EmptySource,
}

impl SampleError {
    /// Static label for log fields.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SourceUnavailable(_) => "source_unavailable",
            Self::EmptySource => "empty_source",
        }
    }
}

/// Open `path` and return one uniformly chosen line.
pub fn sample_file<G>(path: &Path, rng: &mut G) -> Result<String, SampleError>
where
    G: Rng + ?Sized,
{
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    sample_line(&mut reader, rng)
}

/// Return one uniformly chosen line from `source`, without its line ending.
///
/// `source` is rewound between passes, so its initial position does not
/// matter.
pub fn sample_line<R, G>(source: &mut R, rng: &mut G) -> Result<String, SampleError>
where
    R: BufRead + Seek,
    G: Rng + ?Sized,
{
    source.seek(SeekFrom::Start(0))?;
    let count = count_lines(source)?;
    if count == 0 {
        return Err(SampleError::EmptySource);
    }

    let index = rng.gen_range(0..count);
    source.seek(SeekFrom::Start(0))?;
    read_line_at(source, index)
}

/// Count `\n` bytes without holding more than one buffer in memory.
fn count_lines<R: BufRead>(source: &mut R) -> io::Result<u64> {
    let mut count = 0u64;
    loop {
        let chunk = source.fill_buf()?;
        if chunk.is_empty() {
            return Ok(count);
        }
        count += chunk.iter().filter(|&&b| b == b'\n').count() as u64;
        let len = chunk.len();
        source.consume(len);
    }
}

fn read_line_at<R: BufRead>(source: &mut R, index: u64) -> Result<String, SampleError> {
    let mut buf = Vec::new();
    let mut current = 0u64;
    loop {
        buf.clear();
        let read = source.read_until(b'\n', &mut buf)?;
        // The source shrank between the two passes.
        if read == 0 || buf.last() != Some(&b'\n') {
            return Err(SampleError::SourceUnavailable(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "line source changed while sampling",
            )));
        }
        if current == index {
            break;
        }
        current += 1;
    }

    while matches!(buf.last(), Some(b'\n' | b'\r')) {
        buf.pop();
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
