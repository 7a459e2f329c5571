//! Readers for the delimited tabular files used for bulk loading.
//!
//! Every file is expected to carry a header row; headers and fields are trimmed
//! so that `"incident_type , severity"` lines up with the column names.
use std::fs::File;
use std::io;
use std::path::Path;

use csv::{Reader, ReaderBuilder, Trim};

pub const DEFAULT_DELIMITER: u8 = b',';

/// Ensures we always create CSV readers with the same settings
pub fn create_csv_reader<R: io::Read>(rdr: R, delimiter: u8) -> Reader<R> {
    ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(rdr)
}

/// Opens `path` for reading as a delimited file with a header row.
///
/// # Errors
/// Fails if the file can not be opened.
pub fn open_csv_reader(path: &Path, delimiter: u8) -> csv::Result<Reader<File>> {
    let file = File::open(path)?;
    Ok(create_csv_reader(file, delimiter))
}

/// Converts the configured delimiter into the single byte the CSV reader wants.
///
/// Returns `None` for characters outside ASCII.
#[must_use]
pub fn delimiter_byte(delimiter: char) -> Option<u8> {
    u8::try_from(u32::from(delimiter))
        .ok()
        .filter(u8::is_ascii)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_headers_and_records_with_custom_delimiter() -> Result<(), csv::Error> {
        let data = "ticket_id; subject ;priority\nT-1;Printer jammed;High\nT-2; VPN down ;Low\n";
        let mut rdr = create_csv_reader(data.as_bytes(), b';');

        let headers = rdr.headers()?.clone();
        assert_eq!(vec!["ticket_id", "subject", "priority"], headers.iter().collect::<Vec<_>>());

        let records = rdr.records().collect::<Result<Vec<_>, _>>()?;
        assert_eq!(2, records.len());
        assert_eq!(Some("VPN down"), records[1].get(1));
        Ok(())
    }

    #[test]
    fn ragged_rows_are_reported() {
        let data = "a,b\n1,2\n3\n";
        let mut rdr = create_csv_reader(data.as_bytes(), DEFAULT_DELIMITER);
        let result = rdr.records().collect::<Result<Vec<_>, _>>();
        assert!(result.is_err(), "expected an error for a row with too few fields");
    }

    #[test]
    fn non_ascii_delimiters_are_rejected() {
        assert_eq!(Some(b';'), delimiter_byte(';'));
        assert_eq!(Some(b'\t'), delimiter_byte('\t'));
        assert_eq!(None, delimiter_byte('§'));
    }
}
