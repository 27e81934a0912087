//! Ledger ingestion - parse the semicolon-delimited referral ledger.
//!
//! Format: first line is a header (discarded), every following line holds
//! exactly nine semicolon-separated fields:
//!
//! ```text
//! name;karma;country;region;city;first_date;last_date;invited_by;invited
//! ```
//!
//! `invited` is a comma-separated sub-list, possibly empty. All fields are
//! trimmed of surrounding whitespace. Any malformed row or unparseable karma
//! token aborts ingestion; partial success has no meaning here.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{LedgerError, Result};
use crate::karma::Karma;
use crate::types::PersonRecord;

/// Read and parse a ledger file.
pub fn read_ledger(path: &Path) -> Result<Vec<PersonRecord>> {
    let file = File::open(path).map_err(|source| LedgerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_ledger(BufReader::new(file), path)
}

/// Parse ledger rows from any buffered reader. `path` is only used for I/O
/// error context.
pub fn parse_ledger<R: BufRead>(reader: R, path: &Path) -> Result<Vec<PersonRecord>> {
    let mut records = Vec::new();

    // Line numbers are 1-based; line 1 is the header.
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| LedgerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line_no == 0 {
            continue;
        }
        records.push(parse_row(&line, line_no + 1)?);
    }

    Ok(records)
}

/// Parse a single data row. `line_no` is the 1-based source line for errors.
fn parse_row(line: &str, line_no: usize) -> Result<PersonRecord> {
    let fields: Vec<&str> = line.split(';').map(str::trim).collect();
    if fields.len() != 9 {
        return Err(LedgerError::MalformedRow {
            line: line_no,
            found: fields.len(),
        });
    }

    let name = fields[0].to_string();
    let karma = Karma::parse(fields[1]).ok_or_else(|| LedgerError::InvalidKarma {
        line: line_no,
        name: name.clone(),
        token: fields[1].to_string(),
    })?;

    let invited_by = match fields[7] {
        "" => None,
        inviter => Some(inviter.to_string()),
    };
    let invited = match fields[8] {
        "" => Vec::new(),
        list => list.split(',').map(|i| i.trim().to_string()).collect(),
    };

    Ok(PersonRecord {
        name,
        karma,
        country: fields[2].to_string(),
        region: fields[3].to_string(),
        city: fields[4].to_string(),
        first_seen: fields[5].to_string(),
        last_seen: fields[6].to_string(),
        invited_by,
        invited,
    })
}
