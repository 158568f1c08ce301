use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::{tempdir, TempDir};

/// Field separator of a delimited table
#[derive(Clone, Debug)]
pub struct Delimiter(String);

impl From<&str> for Delimiter {
    fn from(s: &str) -> Self {
        Delimiter(s.to_string())
    }
}

impl Delimiter {
    /// Split a line into trimmed words
    pub fn split_words(&self, line: &str) -> Vec<Box<str>> {
        line.split(self.0.as_str())
            .map(|x| x.trim().to_owned().into_boxed_str())
            .collect()
    }
}

///
/// Write every line into the output_file
///
/// * `lines` - vector of lines
/// * `output_file` - file name--either gzipped or not
///
pub fn write_lines(lines: &[Box<str>], output_file_path: &str) -> anyhow::Result<()> {
    if file_ext(output_file_path).as_deref() == Some("gz") {
        let file = File::create(output_file_path)
            .map_err(|e| anyhow::anyhow!("failed to create {}: {}", output_file_path, e))?;
        let mut buf = BufWriter::new(GzEncoder::new(file, Compression::default()));
        write_each_line(&mut buf, lines, output_file_path)?;
        // the gzip trailer is only complete after `finish`
        let encoder = buf
            .into_inner()
            .map_err(|e| anyhow::anyhow!("{}: {}", output_file_path, e.error()))?;
        encoder
            .finish()
            .map_err(|e| anyhow::anyhow!("{}: {}", output_file_path, e))?;
    } else {
        let mut buf = open_buf_writer(output_file_path)?;
        write_each_line(&mut buf, lines, output_file_path)?;
        buf.flush()
            .map_err(|e| anyhow::anyhow!("{}: {}", output_file_path, e))?;
    }
    Ok(())
}

fn write_each_line<W: Write>(buf: &mut W, lines: &[Box<str>], file: &str) -> anyhow::Result<()> {
    for line in lines {
        if let Err(e) = writeln!(buf, "{}", line) {
            if e.kind() == std::io::ErrorKind::BrokenPipe {
                return Ok(());
            } else {
                return Err(anyhow::anyhow!("{}: {}", file, e));
            }
        }
    }
    Ok(())
}

pub struct ReadLinesOut<T: Send> {
    pub lines: Vec<Vec<T>>,
    pub header: Vec<Box<str>>,
}

///
/// Read a delimited text file into words, with the first non-empty,
/// non-comment line taken as a header
///
/// * `input_file` - file name--either gzipped or not
/// * `delim` - delimiter
///
pub fn read_lines_of_words_delim(
    input_file: &str,
    delim: impl Into<Delimiter>,
) -> anyhow::Result<ReadLinesOut<Box<str>>> {
    let delim = delim.into();
    let buf_reader: Box<dyn BufRead> = open_buf_reader(input_file)?;

    let mut lines_raw = vec![];
    for line in buf_reader.lines() {
        let line = line?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        lines_raw.push(line.into_boxed_str());
    }

    let Some((hdr, body)) = lines_raw.split_first() else {
        return Err(anyhow::anyhow!("{}: no header line", input_file));
    };

    let header = delim.split_words(hdr);

    // Parsing takes more time, so split them into parallel jobs
    let lines: Vec<Vec<Box<str>>> = body.par_iter().map(|s| delim.split_words(s)).collect();

    Ok(ReadLinesOut { lines, header })
}

///
/// Open a file for reading, and return a buffered reader
/// * `input_file` - file name--either gzipped or not
pub fn open_buf_reader(input_file: &str) -> anyhow::Result<Box<dyn BufRead>> {
    let file = File::open(input_file)
        .map_err(|e| anyhow::anyhow!("failed to open {}: {}", input_file, e))?;
    match file_ext(input_file).as_deref() {
        Some("gz") => Ok(Box::new(BufReader::new(GzDecoder::new(file)))),
        _ => Ok(Box::new(BufReader::new(file))),
    }
}

///
/// Open a file for writing, and return a buffered writer
/// * `output_file` - file name--either gzipped or not
pub fn open_buf_writer(output_file: &str) -> anyhow::Result<Box<dyn std::io::Write>> {
    // we can simply override with stdout
    if output_file.eq_ignore_ascii_case("stdout") {
        return Ok(Box::new(BufWriter::new(std::io::stdout())));
    }

    let file = File::create(output_file)
        .map_err(|e| anyhow::anyhow!("failed to create {}: {}", output_file, e))?;
    match file_ext(output_file).as_deref() {
        Some("gz") => {
            let encoder = GzEncoder::new(file, Compression::default());
            Ok(Box::new(BufWriter::new(encoder)))
        }
        _ => Ok(Box::new(BufWriter::new(file))),
    }
}

///
/// Take the extension of a file
/// * `file` - file name
///
pub fn file_ext(file: &str) -> Option<Box<str>> {
    Path::new(file)
        .extension()
        .and_then(|x| x.to_str())
        .map(|x| x.to_string().into_boxed_str())
}

///
/// Create a directory if needed
/// * `file` - file name
///
pub fn mkdir(file: &str) -> anyhow::Result<()> {
    let path = Path::new(file);
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    Ok(())
}

///
/// Create a temporary directory and suggest a file name in it. The
/// directory is removed when the returned `TempDir` is dropped.
/// * `suffix` - suffix of the file name
///
pub fn create_temp_dir_file(suffix: &str) -> anyhow::Result<(TempDir, std::path::PathBuf)> {
    let temp_dir = tempdir()?;
    let temp_file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile_in(temp_dir.path())?
        .path()
        .to_owned();

    Ok((temp_dir, temp_file))
}
