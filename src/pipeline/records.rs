//! Sequence record assembly from raw line streams.
//!
//! The byte source delivers one line per emission from plain or gzipped
//! files (or stdin); the assembler reassembles FASTQ line quartets or FASTA
//! chevron blocks into records; the validator rejects records shorter than
//! k and tallies stream statistics for the end-of-run report.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::{Result, SpektError};

/// A single sequence record.
///
/// Created by the assembler, consumed exactly once by a minimizer worker,
/// then dropped. Bases are normalised to uppercase ACGTN at construction;
/// any other byte becomes `N`.
#[derive(Debug, Clone)]
pub struct SeqRecord {
    pub id: Vec<u8>,
    pub seq: Vec<u8>,
    pub qual: Option<Vec<u8>>,
}

impl SeqRecord {
    fn from_fastq(l1: &[u8], l2: &[u8], l3: &[u8], l4: &[u8]) -> Result<Self> {
        if l1.first() != Some(&b'@') {
            return Err(SpektError::MalformedFastq(
                "read header does not begin with @".to_string(),
            ));
        }
        if l3.first() != Some(&b'+') {
            return Err(SpektError::MalformedFastq(
                "separator line does not begin with +".to_string(),
            ));
        }
        if l2.len() != l4.len() {
            return Err(SpektError::MalformedFastq(format!(
                "sequence and quality lines have unequal lengths ({} vs {})",
                l2.len(),
                l4.len()
            )));
        }
        Ok(SeqRecord {
            id: l1[1..].to_vec(),
            seq: normalise_bases(l2),
            qual: Some(l4.to_vec()),
        })
    }

    fn from_fasta(header: &[u8], body: &[u8]) -> Result<Self> {
        if body.is_empty() {
            return Err(SpektError::MalformedFasta(format!(
                "entry '{}' has no sequence data",
                String::from_utf8_lossy(header)
            )));
        }
        Ok(SeqRecord {
            id: header.to_vec(),
            seq: normalise_bases(body),
            qual: None,
        })
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
}

/// Uppercase and restrict to the ACGTN alphabet.
fn normalise_bases(raw: &[u8]) -> Vec<u8> {
    raw.iter()
        .map(|b| match b.to_ascii_uppercase() {
            c @ (b'A' | b'C' | b'G' | b'T' | b'N') => c,
            _ => b'N',
        })
        .collect()
}

/// Input record format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Fastq,
    Fasta,
}

/// Open a path as a buffered line source, decoding gzip when the filename
/// ends in `.gz`.
pub fn open_line_source(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    let file = File::open(path).map_err(|e| SpektError::io(path, "open", e))?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        let gz: Box<dyn Read + Send> = Box::new(MultiGzDecoder::new(file));
        Ok(Box::new(BufReader::new(gz)))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// A stdin-backed line source.
pub fn stdin_line_source() -> Box<dyn BufRead + Send> {
    Box::new(BufReader::new(io::stdin()))
}

/// Reassembles raw lines into sequence records, in input order.
pub struct RecordAssembler<R: BufRead> {
    reader: R,
    format: RecordFormat,
    line: Vec<u8>,
    // pending FASTA entry
    header: Option<Vec<u8>>,
    body: Vec<u8>,
    finished: bool,
}

impl<R: BufRead> RecordAssembler<R> {
    pub fn new(reader: R, format: RecordFormat) -> Self {
        RecordAssembler {
            reader,
            format,
            line: Vec::new(),
            header: None,
            body: Vec::new(),
            finished: false,
        }
    }

    /// Read the next line, stripped of the trailing newline (and carriage
    /// return). Returns None at end of stream.
    fn next_line(&mut self) -> Result<Option<&[u8]>> {
        self.line.clear();
        let n = self
            .reader
            .read_until(b'\n', &mut self.line)
            .map_err(|e| SpektError::io("<stream>", "read", e))?;
        if n == 0 {
            return Ok(None);
        }
        while matches!(self.line.last(), Some(&b'\n') | Some(&b'\r')) {
            self.line.pop();
        }
        Ok(Some(&self.line))
    }

    fn next_fastq(&mut self) -> Result<Option<SeqRecord>> {
        let l1 = match self.next_line()? {
            Some(line) => line.to_vec(),
            None => return Ok(None),
        };
        let mut rest = Vec::with_capacity(3);
        for _ in 0..3 {
            match self.next_line()? {
                Some(line) => rest.push(line.to_vec()),
                None => {
                    // a trailing partial quartet carries no usable record
                    log::warn!("dropping truncated FASTQ record at end of stream");
                    return Ok(None);
                }
            }
        }
        SeqRecord::from_fastq(&l1, &rest[0], &rest[1], &rest[2]).map(Some)
    }

    fn next_fasta(&mut self) -> Result<Option<SeqRecord>> {
        loop {
            let line = match self.next_line()? {
                Some(line) => line.to_vec(),
                None => {
                    // end of stream: emit the pending entry
                    if let Some(header) = self.header.take() {
                        let record = SeqRecord::from_fasta(&header, &self.body)?;
                        self.body.clear();
                        return Ok(Some(record));
                    }
                    return Ok(None);
                }
            };
            if line.is_empty() {
                continue;
            }
            if line[0] == b'>' {
                let new_header = line[1..].to_vec();
                if let Some(header) = self.header.replace(new_header) {
                    let record = SeqRecord::from_fasta(&header, &self.body)?;
                    self.body.clear();
                    return Ok(Some(record));
                }
                continue;
            }
            if self.header.is_none() {
                return Err(SpektError::MalformedFasta(
                    "sequence data before the first > header".to_string(),
                ));
            }
            self.body
                .extend(line.iter().copied().filter(|b| !b.is_ascii_whitespace()));
        }
    }
}

impl<R: BufRead> Iterator for RecordAssembler<R> {
    type Item = Result<SeqRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = match self.format {
            RecordFormat::Fastq => self.next_fastq(),
            RecordFormat::Fasta => self.next_fasta(),
        };
        match result {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Rejects records shorter than k and accumulates stream statistics.
#[derive(Debug)]
pub struct RecordValidator {
    k: usize,
    count: u64,
    length_sum: u64,
}

impl RecordValidator {
    pub fn new(k: usize) -> Self {
        RecordValidator {
            k,
            count: 0,
            length_sum: 0,
        }
    }

    /// Check one record, tallying it when it passes.
    pub fn check(&mut self, record: &SeqRecord) -> Result<()> {
        if record.len() < self.k {
            return Err(SpektError::SequenceTooShort {
                id: String::from_utf8_lossy(&record.id).to_string(),
                length: record.len(),
                k: self.k,
            });
        }
        self.count += 1;
        self.length_sum += record.len() as u64;
        Ok(())
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean_length(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.length_sum as f64 / self.count as f64
    }
}
