//! CLI/environment configuration for the `forculus` demonstration binary
//! (§4.6, §10.2).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Reports (inserts) plaintexts, one per input line, into a share-record
/// CSV file.
#[derive(Clone, Parser, Debug)]
pub struct InsertCommand {
    /// Path to a file with one plaintext per line. Use `-` to read from
    /// stdin.
    #[clap(long, env = "FORCULUS_INSERT_INPUT", default_value = "-")]
    pub input: PathBuf,

    /// Path to the share-record CSV file to append to. Use `-` to write to
    /// stdout.
    #[clap(long, env = "FORCULUS_INSERT_OUTPUT", default_value = "-")]
    pub output: PathBuf,
}

/// Recovers plaintexts from a share-record CSV file and writes the
/// recovered `(plaintext, count)` pairs to a results CSV file.
#[derive(Clone, Parser, Debug)]
pub struct EvaluateCommand {
    /// Path to the share-record CSV file to read. Use `-` to read from
    /// stdin.
    #[clap(long, env = "FORCULUS_EVALUATE_INPUT", default_value = "-")]
    pub input: PathBuf,

    /// Path to the results CSV file to write. Use `-` to write to stdout.
    #[clap(long, env = "FORCULUS_EVALUATE_OUTPUT", default_value = "-")]
    pub output: PathBuf,
}

/// The `forculus` subcommands: the Inserter (client) role and the Evaluator
/// (server) role.
#[derive(Clone, Subcommand, Debug)]
pub enum Command {
    /// Run the Inserter role over a file of plaintexts.
    Insert(InsertCommand),
    /// Run the Evaluator role over a file of share records.
    Evaluate(EvaluateCommand),
}

/// The configuration for the Forculus scheme (§4.6): threshold `k` and
/// epoch `e`. The prime `q` is a compile-time constant of `forculus-core`
/// and is not configurable.
///
/// Mirrors the `long`/`env`-with-`default_value` idiom used elsewhere in
/// this workspace.
/// Unlike most of this workspace's flags, `threshold` has no default: it is
/// security-critical (it governs how many reports are needed before the
/// server can recover anything) and must be supplied explicitly.
#[derive(Parser, Debug)]
#[command(name = "forculus", version, about)]
pub struct ForculusCliConfig {
    /// The threshold k: minimum number of distinct reports of the same
    /// plaintext required for recovery. Must be >= 2.
    #[clap(long, env = "FORCULUS_THRESHOLD")]
    pub threshold: usize,

    /// The epoch parameter e, binding key derivation to a deployment
    /// generation. Defaults to 1, matching the source implementation's
    /// default (§10.5). Only consulted by `insert`: recovery reconstructs
    /// `c_0` from the shares themselves and needs no epoch (§4.5).
    #[clap(long, env = "FORCULUS_EPOCH", default_value = "1")]
    pub epoch: u128,

    /// Which role to run.
    #[command(subcommand)]
    pub command: Command,
}
