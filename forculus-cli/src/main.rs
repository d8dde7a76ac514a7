//! `forculus`: a demonstration binary for the Forculus threshold encryption
//! scheme.
//!
//! Drives the Inserter (client) role over a plaintext file, or the
//! Evaluator (server) role over a share-record CSV file, per the
//! [`forculus_client`] and [`forculus_service`] crates. This binary is
//! wiring: the cryptographic work lives in `forculus-core`, and the wire
//! format lives in `forculus-types`.

mod config;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use clap::Parser;
use eyre::Context as _;
use forculus_client::{CsvShareSink, ForculusInserter};
use forculus_service::{CsvResultSink, CsvShareSource, ForculusEvaluator};

use config::{Command, EvaluateCommand, ForculusCliConfig, InsertCommand};

fn open_input(path: &Path) -> eyre::Result<Box<dyn Read>> {
    if path == Path::new("-") {
        Ok(Box::new(io::stdin()))
    } else {
        Ok(Box::new(File::open(path).with_context(|| {
            format!("while opening input file {}", path.display())
        })?))
    }
}

fn open_output(path: &Path) -> eyre::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        Ok(Box::new(io::stdout()))
    } else {
        Ok(Box::new(File::create(path).with_context(|| {
            format!("while creating output file {}", path.display())
        })?))
    }
}

/// Runs the Inserter role: one `insert` per non-empty input line.
fn run_insert(config: &ForculusCliConfig, cmd: &InsertCommand) -> eyre::Result<()> {
    let input = BufReader::new(open_input(&cmd.input)?);
    let output = BufWriter::new(open_output(&cmd.output)?);

    let sink = CsvShareSink::new(output);
    let mut inserter = ForculusInserter::new(config.threshold, config.epoch, sink)
        .context("while constructing the Inserter")?;

    let mut reported = 0usize;
    for line in input.lines() {
        let line = line.context("while reading a plaintext line")?;
        if line.is_empty() {
            continue;
        }
        inserter
            .insert(line.as_bytes())
            .context("while inserting a plaintext")?;
        reported += 1;
    }

    tracing::info!(
        reported,
        distinct_plaintexts = inserter.cached_plaintexts(),
        "insert finished"
    );

    let mut sink = inserter.into_sink();
    sink.flush().context("while flushing share records")?;
    Ok(())
}

/// Runs the Evaluator role: reads every share record from `cmd.input`,
/// attempts recovery per group, and writes recovered plaintexts to
/// `cmd.output`. This is the "read a whole CSV file, recover, and write a
/// results CSV file in one call" convenience named in §10.5, layered over
/// [`forculus_service::ForculusEvaluator::compute_and_emit`] without
/// changing its semantics.
fn run_evaluate(config: &ForculusCliConfig, cmd: &EvaluateCommand) -> eyre::Result<()> {
    let input = BufReader::new(open_input(&cmd.input)?);
    let output = BufWriter::new(open_output(&cmd.output)?);

    let evaluator =
        ForculusEvaluator::new(config.threshold).context("while constructing the Evaluator")?;
    let mut source = CsvShareSource::new(input);
    let mut sink = CsvResultSink::new(output);

    evaluator
        .compute_and_emit(&mut source, &mut sink)
        .context("while computing and emitting recovered plaintexts")?;

    sink.flush().context("while flushing recovered plaintexts")?;
    Ok(())
}

fn main() -> eyre::Result<()> {
    nodes_observability::install_tracing("forculus=info,warn");

    let config = ForculusCliConfig::parse();
    tracing::info!(threshold = config.threshold, epoch = config.epoch, "starting forculus");

    match &config.command {
        Command::Insert(cmd) => run_insert(&config, cmd)?,
        Command::Evaluate(cmd) => run_evaluate(&config, cmd)?,
    }

    Ok(())
}
