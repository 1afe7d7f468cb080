use crate::error::{Error, Result};
use bio::io::{fasta, fastq};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// The reference sequence features are laid over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub id: String,
    pub seq: String,
}

/// File format detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Fasta,
    Fastq,
    /// Bare sequence text, whitespace ignored.
    Plain,
}

impl FileFormat {
    pub fn detect_from_path(path: &Path) -> Option<Self> {
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();
        let filename = filename.strip_suffix(".gz").unwrap_or(filename.as_str());

        if filename.ends_with(".fastq") || filename.ends_with(".fq") {
            Some(FileFormat::Fastq)
        } else if [".fasta", ".fa", ".fna", ".fas"].iter().any(|ext| filename.ends_with(ext)) {
            Some(FileFormat::Fasta)
        } else if filename.ends_with(".txt") || filename.ends_with(".seq") {
            Some(FileFormat::Plain)
        } else {
            None
        }
    }

    pub fn detect_from_content(data: &[u8]) -> Self {
        match data.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'>') => FileFormat::Fasta,
            Some(b'@') => FileFormat::Fastq,
            _ => FileFormat::Plain,
        }
    }
}

fn is_gzipped(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Load one record from a FASTA, FASTQ or plain sequence file, gzipped or not.
/// `record_id` selects a record by id; the first record is used otherwise.
pub fn from_path(path: &Path, record_id: Option<&str>) -> Result<SequenceRecord> {
    let mut file = BufReader::new(File::open(path)?);
    let mut data = Vec::new();
    if is_gzipped(path) {
        GzDecoder::new(file).read_to_end(&mut data)?;
    } else {
        file.read_to_end(&mut data)?;
    }

    let format = FileFormat::detect_from_path(path)
        .unwrap_or_else(|| FileFormat::detect_from_content(&data));
    let fallback_id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("sequence");
    read_sequence(&data[..], format, record_id, fallback_id)
}

/// Parse a sequence from an in-memory buffer or any other reader.
pub fn read_sequence<'a, R: Read + 'a>(
    reader: R,
    format: FileFormat,
    record_id: Option<&str>,
    fallback_id: &str,
) -> Result<SequenceRecord> {
    let mut records: Box<dyn Iterator<Item = Result<SequenceRecord>> + 'a> = match format {
        FileFormat::Fasta => {
            let records = fasta::Reader::new(reader).records();
            Box::new(records.map(|r| -> Result<SequenceRecord> {
                let r = r?;
                Ok(SequenceRecord {
                    id: r.id().to_string(),
                    seq: String::from_utf8_lossy(r.seq()).into_owned(),
                })
            }))
        }
        FileFormat::Fastq => {
            let records = fastq::Reader::new(reader).records();
            Box::new(records.map(|r| -> Result<SequenceRecord> {
                let r = r.map_err(|e| Error::InvalidRecord {
                    line: 0,
                    reason: e.to_string(),
                })?;
                Ok(SequenceRecord {
                    id: r.id().to_string(),
                    seq: String::from_utf8_lossy(r.seq()).into_owned(),
                })
            }))
        }
        FileFormat::Plain => {
            let mut text = String::new();
            BufReader::new(reader).read_to_string(&mut text)?;
            let seq: String = text.split_whitespace().collect();
            Box::new(std::iter::once(Ok(SequenceRecord {
                id: fallback_id.to_string(),
                seq,
            })))
        }
    };

    match record_id {
        Some(id) => {
            for record in records {
                let record = record?;
                if record.id == id {
                    return Ok(record);
                }
            }
            Err(Error::RecordNotFound(id.to_string()))
        }
        None => records
            .next()
            .unwrap_or(Err(Error::EmptyInput("sequence records"))),
    }
}
