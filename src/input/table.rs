use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::{Result, RocError};
use crate::input::DataTable;

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Loads a delimited table with a header line. Tab-delimited when the header
/// contains a tab, comma-delimited otherwise. `.gz` inputs are decompressed.
pub fn load_table(path: &Path) -> Result<DataTable> {
    let reader = open_maybe_gz(path)?;
    let table = read_table(reader)?;
    tracing::info!(
        path = %path.display(),
        rows = table.n_rows(),
        columns = table.columns().len(),
        "loaded score table"
    );
    Ok(table)
}

pub fn read_table<R: BufRead>(mut reader: R) -> Result<DataTable> {
    let mut buf = String::new();
    let read = reader.read_line(&mut buf)?;
    if read == 0 {
        return Err(RocError::Parse {
            line: 1,
            message: "table is empty".to_string(),
        });
    }
    let header_line = buf.trim_end_matches(['\r', '\n']).trim_start_matches('\u{feff}');
    let delimiter = if header_line.contains('\t') { '\t' } else { ',' };
    let columns: Vec<String> = split_fields(header_line, delimiter);
    if columns.iter().all(|c| c.is_empty()) {
        return Err(RocError::Parse {
            line: 1,
            message: "table header is empty".to_string(),
        });
    }

    let mut rows = Vec::new();
    let mut lines = Vec::new();
    let mut line_no = 1usize;
    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_fields(line, delimiter);
        if fields.len() != columns.len() {
            return Err(RocError::Parse {
                line: line_no,
                message: format!(
                    "expected {} fields, found {}",
                    columns.len(),
                    fields.len()
                ),
            });
        }
        rows.push(fields);
        lines.push(line_no);
    }

    DataTable::with_lines(columns, rows, lines)
}

/// Writes `table` tab-delimited with a header line.
pub fn write_table(table: &DataTable, path: &Path) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "{}", table.columns().join("\t"))?;
    for row in table.rows() {
        writeln!(w, "{}", row.join("\t"))?;
    }
    w.flush()?;
    Ok(())
}

fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    line.split(delimiter)
        .map(|s| {
            let s = s.trim();
            s.strip_prefix('"')
                .and_then(|inner| inner.strip_suffix('"'))
                .unwrap_or(s)
                .to_string()
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/table.rs"]
mod tests;
