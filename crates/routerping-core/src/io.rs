use crate::error::Result;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

const TAIL_CHUNK: u64 = 4096;

/// Append a single line to a file, creating the file and its parents if needed.
pub fn append_line(path: &Path, line: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut f = OpenOptions::new().create(true).append(true).open(path)?;
    // One write call so a crash cannot leave a line without its newline.
    f.write_all(format!("{line}\n").as_bytes())?;
    Ok(())
}

/// Return the last non-blank line of a file, reading backwards from the end.
///
/// A missing file and a file with no non-blank lines both yield `None`.
pub fn last_line(path: &Path) -> Result<Option<String>> {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let len = file.metadata()?.len();
    let Some((start, end)) = last_line_span(&mut file, len)? else {
        return Ok(None);
    };

    let mut line = vec![0u8; (end - start) as usize];
    file.seek(SeekFrom::Start(start))?;
    file.read_exact(&mut line)?;
    Ok(Some(
        String::from_utf8_lossy(&line)
            .trim_end_matches('\r')
            .to_string(),
    ))
}

/// Byte range `[start, end)` of the last non-blank line, excluding its `\n`.
///
/// Scans backwards one chunk at a time, looking at each byte once.
fn last_line_span(file: &mut File, len: u64) -> Result<Option<(u64, u64)>> {
    let mut chunk = vec![0u8; TAIL_CHUNK as usize];
    // Offset of the nearest newline after the current byte.
    let mut newline = len;
    let mut end: Option<u64> = None;
    let mut pos = len;

    while pos > 0 {
        let step = TAIL_CHUNK.min(pos);
        pos -= step;
        let buf = &mut chunk[..step as usize];
        file.seek(SeekFrom::Start(pos))?;
        file.read_exact(buf)?;

        for (i, &b) in buf.iter().enumerate().rev() {
            let offset = pos + i as u64;
            match (b, end) {
                (b'\n', Some(e)) => return Ok(Some((offset + 1, e))),
                (b'\n', None) => newline = offset,
                (b, None) if !b.is_ascii_whitespace() => end = Some(newline),
                _ => {}
            }
        }
    }
    Ok(end.map(|e| (0, e)))
}
