//! The boss: worker orchestration, flush control and sketch serialization.
//!
//! A background reader thread assembles and validates records, feeding a
//! bounded channel (the backpressure point). A pool of minimizer workers
//! picks records up through a queue-of-queues register: each idle worker
//! publishes its own task sender, and the boss hands the next record to
//! whichever worker surfaced first. Workers return each record's unique
//! minimizer set on a single fan-in channel, and the boss alone mutates the
//! spectrum and the sketches, so the hot state needs no locks. Results are
//! re-sequenced to dispatch order before they touch the spectrum, so the
//! insert sequence is a function of the input alone and the sketch is
//! bit-identical for any worker count, decayed runs included.
//!
//! Flushes require quiescence: the boss stops dispatching, waits until
//! every dispatched record's result has been collected, then drains the
//! spectrum into the histosketch. Without that barrier, minimizers from
//! records after an interval boundary could land in the pre-flush spectrum.

use std::collections::HashMap;
use std::path::PathBuf;
use std::thread;

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use log::{info, warn};

use crate::constants::{CWS_SEED, RECORD_CHANNEL_SIZE, SKETCH_EXT};
use crate::core::{extract_into, MinimizerWorkspace};
use crate::error::{Result, SpektError};
use crate::params::SketchParams;
use crate::pipeline::records::{
    open_line_source, stdin_line_source, RecordAssembler, RecordFormat, RecordValidator, SeqRecord,
};
use crate::sketch::{HistoSketch, KhfSketch, KmvSketch, SketchAlgorithm, SketchEnvelope};
use crate::spectrum::KmerSpectrum;

/// Run-level options that shape which outputs the pipeline produces.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Input is FASTA rather than FASTQ.
    pub fasta: bool,
    /// Print the slot array to stdout at every flush.
    pub stream: bool,
    /// Also produce a KHF MinHash sketch.
    pub khf: bool,
    /// Also produce a KMV (bottom-k) MinHash sketch.
    pub kmv: bool,
    /// Optional label stored in the sketch envelope.
    pub banner: Option<String>,
}

/// Statistics reported after a completed run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub records: u64,
    pub mean_read_length: f64,
    pub minimizers: u64,
    pub interval_flushes: u64,
    /// Every sketch file written, in write order.
    pub outputs: Vec<PathBuf>,
}

/// The sketches produced by one run, as written to disk.
#[derive(Debug, Clone)]
pub struct SketchedSample {
    pub histosketch: SketchEnvelope,
    pub khf: Option<SketchEnvelope>,
    pub kmv: Option<SketchEnvelope>,
    pub report: PipelineReport,
}

enum WorkerTask {
    Record(u64, SeqRecord),
    Stop,
}

/// A worker or reader thread vanished mid-run. Surfaced as a broken-pipe
/// I/O failure because the stream can no longer be completed.
fn pool_error(msg: &str) -> SpektError {
    SpektError::io(
        "<worker-pool>",
        "recv",
        std::io::Error::new(std::io::ErrorKind::BrokenPipe, msg.to_string()),
    )
}

/// Sketch a stream of sequence records into `<out_base>.sketch` (plus
/// interval snapshots and optional companion sketches).
///
/// `inputs` may be empty, in which case records are read from stdin.
pub fn run(
    params: &SketchParams,
    inputs: &[PathBuf],
    out_base: &str,
    opts: &RunOptions,
) -> Result<SketchedSample> {
    Boss::new(params, opts, out_base)?.run(inputs.to_vec())
}

struct Boss {
    params: SketchParams,
    opts: RunOptions,
    out_base: String,
    spectrum: KmerSpectrum,
    histosketch: HistoSketch,
    khf: Option<KhfSketch>,
    kmv: Option<KmvSketch>,
    minimizer_count: u64,
    interval_flushes: u64,
    outputs: Vec<PathBuf>,
    // results that arrived ahead of their turn, keyed by dispatch sequence
    pending: HashMap<u64, Vec<u64>>,
    next_seq: u64,
}

impl Boss {
    fn new(params: &SketchParams, opts: &RunOptions, out_base: &str) -> Result<Self> {
        Ok(Boss {
            params: params.clone(),
            opts: opts.clone(),
            out_base: out_base.to_string(),
            spectrum: KmerSpectrum::new(params.spectrum_bins, params.decay_weight())?,
            histosketch: HistoSketch::new(params, CWS_SEED),
            khf: opts.khf.then(|| KhfSketch::new(params.sketch_size)),
            kmv: opts.kmv.then(|| KmvSketch::new(params.sketch_size)),
            minimizer_count: 0,
            interval_flushes: 0,
            outputs: Vec::new(),
            pending: HashMap::new(),
            next_seq: 0,
        })
    }

    fn run(mut self, inputs: Vec<PathBuf>) -> Result<SketchedSample> {
        let format = if self.opts.fasta {
            RecordFormat::Fasta
        } else {
            RecordFormat::Fastq
        };

        // reader thread: byte source -> assembler -> validator. Errors are
        // propagated in-band; the join handle only carries stream statistics.
        let (record_tx, record_rx) = bounded::<Result<SeqRecord>>(RECORD_CHANNEL_SIZE);
        let reader_k = self.params.k;
        let reader_handle =
            thread::spawn(move || reader_thread(inputs, format, reader_k, record_tx));

        // worker pool with a queue-of-queues idle register
        let (idle_tx, idle_rx) = unbounded::<Sender<WorkerTask>>();
        let (result_tx, result_rx) = unbounded::<(u64, Vec<u64>)>();
        let mut worker_handles = Vec::with_capacity(self.params.workers);
        for _ in 0..self.params.workers {
            let idle_tx = idle_tx.clone();
            let result_tx = result_tx.clone();
            let (k, w) = (self.params.k, self.params.w);
            worker_handles.push(thread::spawn(move || {
                let mut ws = MinimizerWorkspace::new();
                loop {
                    // a fresh channel per registration: the sender moves into
                    // the register, so an abandoned pool unblocks the recv
                    let (task_tx, task_rx) = unbounded::<WorkerTask>();
                    if idle_tx.send(task_tx).is_err() {
                        break;
                    }
                    match task_rx.recv() {
                        Ok(WorkerTask::Record(seq, record)) => {
                            extract_into(&record.seq, k, w, &mut ws);
                            if result_tx.send((seq, std::mem::take(&mut ws.buffer))).is_err() {
                                break;
                            }
                        }
                        Ok(WorkerTask::Stop) => break,
                        Err(_) => continue,
                    }
                }
            }));
        }
        // the boss keeps only the receiving ends
        drop(idle_tx);
        drop(result_tx);

        let mut dispatched: u64 = 0;
        let mut collected: u64 = 0;
        let mut records: u64 = 0;
        let mut pending_flush = false;

        for message in record_rx.iter() {
            let record = message?;

            // a flush boundary reached on the previous record is honoured
            // before any later record is dispatched; a boundary that
            // coincides with end-of-stream falls through to the final flush
            if pending_flush {
                self.quiesce(&result_rx, dispatched, &mut collected)?;
                self.interval_flush()?;
                pending_flush = false;
            }

            let worker = idle_rx
                .recv()
                .map_err(|_| pool_error("worker pool stopped unexpectedly"))?;
            if worker.send(WorkerTask::Record(dispatched, record)).is_err() {
                return Err(pool_error("worker stopped while work was pending"));
            }
            dispatched += 1;
            records += 1;

            // absorb whatever results are already waiting
            while let Ok((seq, minimizers)) = result_rx.try_recv() {
                self.collect_result(seq, minimizers);
                collected += 1;
            }

            if self.params.interval > 0 && records % self.params.interval == 0 {
                pending_flush = true;
            }
        }

        // end of input: wait for in-flight records, then stop the pool
        self.quiesce(&result_rx, dispatched, &mut collected)?;
        for _ in 0..self.params.workers {
            if let Ok(worker) = idle_rx.recv() {
                let _ = worker.send(WorkerTask::Stop);
            }
        }
        for handle in worker_handles {
            let _ = handle.join();
        }

        let validator = reader_handle
            .join()
            .map_err(|_| pool_error("reader thread panicked"))?;

        if records == 0 {
            return Err(SpektError::io(
                "<input>",
                "stream",
                std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "no sequence records received",
                ),
            ));
        }

        info!("processed {} sequences in total", validator.count());
        info!("mean sequence length: {:.0}", validator.mean_length());
        info!("found {} minimizers", self.minimizer_count);
        info!(
            "histosketching across {} bins",
            self.params.spectrum_bins
        );

        self.final_flush(validator)
    }

    /// Block until every dispatched record's minimizer set has been absorbed.
    fn quiesce(
        &mut self,
        result_rx: &Receiver<(u64, Vec<u64>)>,
        dispatched: u64,
        collected: &mut u64,
    ) -> Result<()> {
        while *collected < dispatched {
            let (seq, minimizers) = result_rx
                .recv()
                .map_err(|_| pool_error("worker pool stopped while draining"))?;
            self.collect_result(seq, minimizers);
            *collected += 1;
        }
        debug_assert!(self.pending.is_empty());
        Ok(())
    }

    /// Buffer one worker result and absorb everything now contiguous in
    /// dispatch order. Re-sequencing keeps the spectrum insert order
    /// independent of worker interleaving, which matters once decay makes
    /// inserts non-commutative.
    fn collect_result(&mut self, seq: u64, minimizers: Vec<u64>) {
        self.pending.insert(seq, minimizers);
        while let Some(minimizers) = self.pending.remove(&self.next_seq) {
            self.absorb(&minimizers);
            self.next_seq += 1;
        }
    }

    /// Feed one record's minimizer set into the spectrum and the optional
    /// companion sketches.
    fn absorb(&mut self, minimizers: &[u64]) {
        for &minimizer in minimizers {
            self.spectrum.insert(minimizer, 1.0);
            if let Some(khf) = &mut self.khf {
                khf.add_hash(minimizer);
            }
            if let Some(kmv) = &mut self.kmv {
                kmv.add_hash(minimizer);
            }
        }
        self.minimizer_count += minimizers.len() as u64;
    }

    /// Drain every used spectrum bin into the histosketch, resetting the
    /// spectrum.
    fn drain_spectrum(&mut self) {
        for bin in self.spectrum.drain() {
            self.histosketch.add_element(bin.bin as u64, bin.frequency);
        }
    }

    fn interval_flush(&mut self) -> Result<()> {
        self.interval_flushes += 1;
        info!(
            "reached interval {} -> histosketching {} spectrum bins",
            self.interval_flushes,
            self.spectrum.cardinality()
        );
        self.drain_spectrum();
        let path = PathBuf::from(format!(
            "{}.interval-{}.{}",
            self.out_base, self.interval_flushes, SKETCH_EXT
        ));
        let envelope = self.histo_envelope();
        envelope.save(&path)?;
        info!("written interval snapshot: {}", path.display());
        self.outputs.push(path);
        if self.opts.stream {
            println!("{}", slots_csv(envelope.mins.as_slice()));
        }
        Ok(())
    }

    fn final_flush(mut self, validator: RecordValidator) -> Result<SketchedSample> {
        self.drain_spectrum();

        let path = if self.interval_flushes > 0 {
            PathBuf::from(format!("{}.final.{}", self.out_base, SKETCH_EXT))
        } else {
            PathBuf::from(format!("{}.{}", self.out_base, SKETCH_EXT))
        };
        let histosketch = self.histo_envelope();
        histosketch.save(&path)?;
        info!("written sketch to disk: {}", path.display());
        self.outputs.push(path);
        if self.opts.stream {
            println!("{}", slots_csv(histosketch.mins.as_slice()));
        }

        let khf = match &self.khf {
            Some(khf) => {
                let envelope = self.minhash_envelope(SketchAlgorithm::Khf, khf.finalize());
                let path = PathBuf::from(format!("{}.khf.{}", self.out_base, SKETCH_EXT));
                envelope.save(&path)?;
                info!("written KHF sketch to disk: {}", path.display());
                self.outputs.push(path);
                Some(envelope)
            }
            None => None,
        };
        let kmv = match &self.kmv {
            Some(kmv) => {
                let envelope = self.minhash_envelope(SketchAlgorithm::Kmv, kmv.finalize());
                let path = PathBuf::from(format!("{}.kmv.{}", self.out_base, SKETCH_EXT));
                envelope.save(&path)?;
                info!("written KMV sketch to disk: {}", path.display());
                self.outputs.push(path);
                Some(envelope)
            }
            None => None,
        };

        if self.minimizer_count == 0 {
            warn!("no minimizers were found; the sketch is empty");
        }

        Ok(SketchedSample {
            histosketch,
            khf,
            kmv,
            report: PipelineReport {
                records: validator.count(),
                mean_read_length: validator.mean_length(),
                minimizers: self.minimizer_count,
                interval_flushes: self.interval_flushes,
                outputs: self.outputs,
            },
        })
    }

    fn histo_envelope(&self) -> SketchEnvelope {
        SketchEnvelope::new(
            SketchAlgorithm::HistoSketch,
            self.params.k as u32,
            self.params.sketch_size as u32,
            self.params.spectrum_bins,
            self.params.concept_drift(),
            self.params.decay_ratio,
            self.histosketch.seed(),
            self.histosketch.slots().to_vec(),
            self.histosketch.scores().to_vec(),
            self.opts.banner.clone(),
        )
    }

    fn minhash_envelope(&self, algorithm: SketchAlgorithm, mins: Vec<u64>) -> SketchEnvelope {
        SketchEnvelope::new(
            algorithm,
            self.params.k as u32,
            self.params.sketch_size as u32,
            self.params.spectrum_bins,
            self.params.concept_drift(),
            self.params.decay_ratio,
            CWS_SEED,
            mins,
            Vec::new(),
            self.opts.banner.clone(),
        )
    }
}

fn slots_csv(slots: &[u64]) -> String {
    let cells: Vec<String> = slots.iter().map(|s| s.to_string()).collect();
    cells.join(",")
}

/// Byte source + assembler + validator, feeding the bounded record channel.
///
/// Errors (unreadable input, malformed records, short reads) are sent
/// in-band and terminate the stream; the returned validator carries the
/// statistics of everything that passed.
fn reader_thread(
    inputs: Vec<PathBuf>,
    format: RecordFormat,
    k: usize,
    tx: Sender<Result<SeqRecord>>,
) -> RecordValidator {
    let mut validator = RecordValidator::new(k);
    if inputs.is_empty() {
        info!("reading from stdin");
        stream_records(stdin_line_source(), format, &mut validator, &tx);
        return validator;
    }
    for path in &inputs {
        info!("streaming {}", path.display());
        let reader = match open_line_source(path) {
            Ok(reader) => reader,
            Err(e) => {
                let _ = tx.send(Err(e));
                return validator;
            }
        };
        if !stream_records(reader, format, &mut validator, &tx) {
            return validator;
        }
    }
    validator
}

/// Returns false when streaming stopped early (error sent or receiver gone).
fn stream_records(
    reader: Box<dyn std::io::BufRead + Send>,
    format: RecordFormat,
    validator: &mut RecordValidator,
    tx: &Sender<Result<SeqRecord>>,
) -> bool {
    for record in RecordAssembler::new(reader, format) {
        match record {
            Ok(record) => {
                if let Err(e) = validator.check(&record) {
                    let _ = tx.send(Err(e));
                    return false;
                }
                if tx.send(Ok(record)).is_err() {
                    return false;
                }
            }
            Err(e) => {
                let _ = tx.send(Err(e));
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_fasta(path: &std::path::Path, entries: &[(&str, &str)]) {
        let mut data = String::new();
        for (id, seq) in entries {
            data.push_str(&format!(">{}\n{}\n", id, seq));
        }
        fs::write(path, data).unwrap();
    }

    fn params(interval: u64, workers: usize) -> SketchParams {
        SketchParams::new(4, 4, 8, 256, 1.0, interval, workers).unwrap()
    }

    #[test]
    fn test_single_record_pipeline() {
        let dir = tempdir().unwrap();
        let fasta = dir.path().join("sample.fa");
        write_fasta(&fasta, &[("seq1", "ACGTACGTACGT")]);
        let out = dir.path().join("sample").to_string_lossy().to_string();

        let opts = RunOptions {
            fasta: true,
            ..Default::default()
        };
        let sample = run(&params(0, 1), &[fasta], &out, &opts).unwrap();

        assert_eq!(sample.report.records, 1);
        assert_eq!(sample.histosketch.mins.len(), 8);
        assert!(dir.path().join("sample.sketch").exists());
    }

    #[test]
    fn test_identical_runs_are_identical() {
        let dir = tempdir().unwrap();
        let fasta = dir.path().join("sample.fa");
        write_fasta(&fasta, &[("seq1", "ACGTACGTACGT")]);
        let opts = RunOptions {
            fasta: true,
            ..Default::default()
        };

        let out_a = dir.path().join("a").to_string_lossy().to_string();
        let out_b = dir.path().join("b").to_string_lossy().to_string();
        let a = run(&params(0, 1), &[fasta.clone()], &out_a, &opts).unwrap();
        let b = run(&params(0, 1), &[fasta], &out_b, &opts).unwrap();

        assert_eq!(a.histosketch.mins, b.histosketch.mins);
        assert_eq!(a.histosketch.md5sum, b.histosketch.md5sum);
        assert!((a.histosketch.similarity(&b.histosketch).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_worker_count_does_not_change_sketch() {
        let dir = tempdir().unwrap();
        let fasta = dir.path().join("many.fa");
        let entries: Vec<(String, String)> = (0..40)
            .map(|i| {
                let seq: String = "ACGGTCAGGTTACCAGGACT"
                    .chars()
                    .cycle()
                    .skip(i % 7)
                    .take(60)
                    .collect();
                (format!("seq{}", i), seq)
            })
            .collect();
        let borrowed: Vec<(&str, &str)> = entries
            .iter()
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect();
        write_fasta(&fasta, &borrowed);
        let opts = RunOptions {
            fasta: true,
            ..Default::default()
        };

        let out_a = dir.path().join("p1").to_string_lossy().to_string();
        let out_b = dir.path().join("p4").to_string_lossy().to_string();
        let a = run(&params(0, 1), &[fasta.clone()], &out_a, &opts).unwrap();
        let b = run(&params(0, 4), &[fasta], &out_b, &opts).unwrap();

        assert_eq!(a.histosketch.mins, b.histosketch.mins);
        assert_eq!(a.histosketch.weights, b.histosketch.weights);
    }

    #[test]
    fn test_decayed_sketch_deterministic_across_worker_counts() {
        // decay makes spectrum inserts non-commutative, so this only holds
        // because results are re-sequenced to dispatch order
        let dir = tempdir().unwrap();
        let fasta = dir.path().join("many.fa");
        let entries: Vec<(String, String)> = (0..40)
            .map(|i| {
                let seq: String = "ACGGTCAGGTTACCAGGACT"
                    .chars()
                    .cycle()
                    .skip(i % 7)
                    .take(60)
                    .collect();
                (format!("seq{}", i), seq)
            })
            .collect();
        let borrowed: Vec<(&str, &str)> = entries
            .iter()
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect();
        write_fasta(&fasta, &borrowed);
        let opts = RunOptions {
            fasta: true,
            ..Default::default()
        };

        let drifting = |workers| SketchParams::new(4, 4, 8, 256, 0.5, 0, workers).unwrap();
        let out_a = dir.path().join("d1").to_string_lossy().to_string();
        let out_b = dir.path().join("d4").to_string_lossy().to_string();
        let a = run(&drifting(1), &[fasta.clone()], &out_a, &opts).unwrap();
        let b = run(&drifting(4), &[fasta], &out_b, &opts).unwrap();

        assert_eq!(a.histosketch.mins, b.histosketch.mins);
        assert_eq!(a.histosketch.weights, b.histosketch.weights);
    }

    #[test]
    fn test_interval_snapshots_and_final_naming() {
        let dir = tempdir().unwrap();
        let fasta = dir.path().join("many.fa");
        let entries: Vec<(String, String)> = (0..30)
            .map(|i| {
                let seq: String = "ACGGTCAGGTTACCAGGACT"
                    .chars()
                    .cycle()
                    .skip(i % 5)
                    .take(50)
                    .collect();
                (format!("seq{}", i), seq)
            })
            .collect();
        let borrowed: Vec<(&str, &str)> = entries
            .iter()
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect();
        write_fasta(&fasta, &borrowed);

        let out = dir.path().join("run").to_string_lossy().to_string();
        let opts = RunOptions {
            fasta: true,
            ..Default::default()
        };
        // 30 records at interval 10: boundaries at 10 and 20 produce
        // snapshots; the boundary at 30 coincides with end of stream and is
        // subsumed by the final flush
        let sample = run(&params(10, 2), &[fasta], &out, &opts).unwrap();

        assert_eq!(sample.report.interval_flushes, 2);
        assert!(dir.path().join("run.interval-1.sketch").exists());
        assert!(dir.path().join("run.interval-2.sketch").exists());
        assert!(!dir.path().join("run.interval-3.sketch").exists());
        assert!(dir.path().join("run.final.sketch").exists());
        assert!(!dir.path().join("run.sketch").exists());
    }

    #[test]
    fn test_short_record_aborts_without_output() {
        let dir = tempdir().unwrap();
        let fasta = dir.path().join("short.fa");
        write_fasta(&fasta, &[("tiny", "ACG")]);
        let out = dir.path().join("short").to_string_lossy().to_string();
        let opts = RunOptions {
            fasta: true,
            ..Default::default()
        };

        let err = run(&params(0, 2), &[fasta], &out, &opts).unwrap_err();
        assert!(matches!(err, SpektError::SequenceTooShort { .. }));
        assert!(!dir.path().join("short.sketch").exists());
    }

    #[test]
    fn test_malformed_fastq_aborts_without_output() {
        let dir = tempdir().unwrap();
        let fastq = dir.path().join("bad.fq");
        fs::write(&fastq, "@read1\nACGTACGT\n+\nIII\n").unwrap();
        let out = dir.path().join("bad").to_string_lossy().to_string();

        let err = run(&params(0, 2), &[fastq], &out, &RunOptions::default()).unwrap_err();
        assert!(matches!(err, SpektError::MalformedFastq(_)));
        assert!(!dir.path().join("bad.sketch").exists());
    }

    #[test]
    fn test_empty_stream_is_an_error() {
        let dir = tempdir().unwrap();
        let fastq = dir.path().join("empty.fq");
        fs::write(&fastq, "").unwrap();
        let out = dir.path().join("empty").to_string_lossy().to_string();

        let err = run(&params(0, 1), &[fastq], &out, &RunOptions::default()).unwrap_err();
        assert!(matches!(err, SpektError::InputIo { .. }));
    }

    #[test]
    fn test_companion_sketches_written() {
        let dir = tempdir().unwrap();
        let fasta = dir.path().join("sample.fa");
        write_fasta(&fasta, &[("seq1", "ACGGTCAGGTTACCAGGACTACGGTCAGG")]);
        let out = dir.path().join("sample").to_string_lossy().to_string();
        let opts = RunOptions {
            fasta: true,
            khf: true,
            kmv: true,
            ..Default::default()
        };

        let sample = run(&params(0, 1), &[fasta], &out, &opts).unwrap();
        assert!(sample.khf.is_some());
        assert!(sample.kmv.is_some());
        assert!(dir.path().join("sample.khf.sketch").exists());
        assert!(dir.path().join("sample.kmv.sketch").exists());

        let khf = sample.khf.unwrap();
        assert_eq!(khf.algorithm, "khf");
        assert!((khf.similarity(&khf.clone()).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_reverse_complement_gives_identical_slots() {
        let seq = "GGACTTCAGGTCAACGGTTACCAGGACTTT";
        let rc: String = seq
            .chars()
            .rev()
            .map(|c| match c {
                'A' => 'T',
                'C' => 'G',
                'G' => 'C',
                'T' => 'A',
                other => other,
            })
            .collect();

        let dir = tempdir().unwrap();
        let fwd = dir.path().join("fwd.fa");
        let rev = dir.path().join("rev.fa");
        write_fasta(&fwd, &[("fwd", seq)]);
        write_fasta(&rev, &[("rev", &rc)]);

        let p = SketchParams::new(5, 5, 16, 256, 1.0, 0, 1).unwrap();
        let opts = RunOptions {
            fasta: true,
            ..Default::default()
        };
        let out_f = dir.path().join("f").to_string_lossy().to_string();
        let out_r = dir.path().join("r").to_string_lossy().to_string();
        let a = run(&p, &[fwd], &out_f, &opts).unwrap();
        let b = run(&p, &[rev], &out_r, &opts).unwrap();

        assert_eq!(a.histosketch.mins, b.histosketch.mins);
    }
}
