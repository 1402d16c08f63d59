//! Dump command implementation.

use super::edit::open_stream;
use crate::error::CliResult;
use serde::Serialize;
use std::io::SeekFrom;
use std::path::Path;

const BYTES_PER_LINE: usize = 16;

/// One line of hex dump output.
#[derive(Debug, Serialize)]
pub struct DumpLine {
    /// Offset of the first byte on the line.
    pub offset: u64,
    /// Bytes, hex encoded and space separated.
    pub hex: String,
    /// Bytes as printable ASCII, `.` for anything else.
    pub ascii: String,
}

/// A dumped byte range.
#[derive(Debug, Serialize)]
pub struct Dump {
    /// Total file size.
    pub size: u64,
    /// First dumped offset.
    pub offset: u64,
    /// Number of bytes dumped.
    pub length: u64,
    /// The dumped bytes.
    pub lines: Vec<DumpLine>,
}

/// Runs the dump command.
pub fn run(
    path: &Path,
    offset: u64,
    length: Option<u64>,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dump = read_dump(path, offset, length)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&dump)?);
        }
        _ => {
            print_text_output(&dump);
        }
    }

    Ok(())
}

/// Reads `length` bytes (or up to the end) starting at `offset`.
pub fn read_dump(path: &Path, offset: u64, length: Option<u64>) -> CliResult<Dump> {
    let mut stream = open_stream(path)?;
    let size = stream.len();
    stream.seek(SeekFrom::Start(offset))?;

    let available = size - offset;
    let wanted = length.map_or(available, |len| len.min(available));
    let bytes = stream.read_vec(wanted as usize)?;

    let lines = bytes
        .chunks(BYTES_PER_LINE)
        .enumerate()
        .map(|(i, chunk)| DumpLine {
            offset: offset + (i * BYTES_PER_LINE) as u64,
            hex: hex_encode(chunk),
            ascii: chunk
                .iter()
                .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
                .collect(),
        })
        .collect();

    Ok(Dump {
        size,
        offset,
        length: bytes.len() as u64,
        lines,
    })
}

fn print_text_output(dump: &Dump) {
    println!(
        "{} bytes at {} ({} bytes total)",
        dump.length, dump.offset, dump.size
    );

    for line in &dump.lines {
        println!(
            "{:08x}  {:<width$}  |{}|",
            line.offset,
            line.hex,
            line.ascii,
            width = BYTES_PER_LINE * 3 - 1
        );
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn dump_splits_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.bin");
        let mut data = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ".to_vec();
        data.push(0x00);
        std::fs::write(&path, &data).unwrap();

        let dump = read_dump(&path, 8, None).unwrap();
        assert_eq!(dump.size, 27);
        assert_eq!(dump.length, 19);
        assert_eq!(dump.lines.len(), 2);
        assert_eq!(dump.lines[0].offset, 8);
        assert_eq!(dump.lines[0].ascii, "IJKLMNOPQRSTUVWX");
        assert_eq!(dump.lines[1].hex, "59 5a 00");
        assert_eq!(dump.lines[1].ascii, "YZ.");
    }

    #[test]
    fn dump_clamps_length_and_rejects_bad_offset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.bin");
        std::fs::write(&path, b"abc").unwrap();

        assert_eq!(read_dump(&path, 1, Some(100)).unwrap().length, 2);
        assert!(read_dump(&path, 4, None).is_err());
    }
}
