use crate::error::{Error, Result};
use crate::feature::{Feature, TypeId};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const START_COLUMNS: [&str; 1] = ["start"];
const END_COLUMNS: [&str; 1] = ["end"];
const LABEL_COLUMNS: [&str; 2] = ["label", "name"];
const TYPE_COLUMNS: [&str; 3] = ["type_id", "type", "id"];

/// Read features from a delimited file. `.tsv` and `.tab` files are tab
/// separated, everything else comma separated.
pub fn from_path(path: &Path) -> Result<Vec<Feature>> {
    let delimiter = match path.extension().and_then(|e| e.to_str()) {
        Some("tsv" | "tab") => b'\t',
        _ => b',',
    };
    read_features(File::open(path)?, delimiter)
}

/// Read features from a table with a header naming the `start`, `end`,
/// `label` and `type_id` columns, in any order.
pub fn read_features<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Feature>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let column = |names: &[&str]| -> Result<usize> {
        headers
            .iter()
            .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
            .ok_or_else(|| Error::InvalidRecord {
                line: 1,
                reason: format!("missing `{}` column", names[0]),
            })
    };
    let start_col = column(&START_COLUMNS)?;
    let end_col = column(&END_COLUMNS)?;
    let label_col = column(&LABEL_COLUMNS)?;
    let type_col = column(&TYPE_COLUMNS)?;

    let mut features = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line() as usize);
        let field = |col: usize| record.get(col).unwrap_or("");
        let offset = |col: usize| -> Result<usize> {
            field(col).parse::<usize>().map_err(|_| Error::InvalidRecord {
                line,
                reason: format!("`{}` is not a sequence offset", field(col)),
            })
        };

        features.push(Feature {
            start: offset(start_col)?,
            end: offset(end_col)?,
            label: field(label_col).to_string(),
            type_id: TypeId::from(field(type_col)),
        });
    }

    tracing::debug!("read {} features", features.len());
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv() {
        let data = "start,end,label,type_id\n0,5,promoter,1\n# skipped\n5,8,RBS,2\n";
        let features = read_features(data.as_bytes(), b',').unwrap();
        assert_eq!(
            features,
            vec![Feature::new(0, 5, "promoter", 1), Feature::new(5, 8, "RBS", 2)]
        );
    }

    #[test]
    fn test_read_tsv_any_column_order() {
        let data = "label\tid\tend\tstart\nlacZ\t3\t120\t20\n";
        let features = read_features(data.as_bytes(), b'\t').unwrap();
        assert_eq!(features, vec![Feature::new(20, 120, "lacZ", 3)]);
    }

    #[test]
    fn test_missing_column() {
        let data = "start,end,label\n0,5,A\n";
        match read_features(data.as_bytes(), b',') {
            Err(Error::InvalidRecord { line, reason }) => {
                assert_eq!(line, 1);
                assert!(reason.contains("type_id"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_negative_offset() {
        let data = "start,end,label,type_id\n-1,5,A,1\n";
        match read_features(data.as_bytes(), b',') {
            Err(Error::InvalidRecord { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_header_only() {
        let data = "start,end,label,type_id\n";
        assert!(read_features(data.as_bytes(), b',').unwrap().is_empty());
    }
}
