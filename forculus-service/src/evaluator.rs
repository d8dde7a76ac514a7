//! The Evaluator (server) role (§4.5): group share records by ciphertext
//! identity, and for each group of at least `k` shares reconstruct the
//! master key and decrypt.

use std::collections::HashMap;

use forculus_core::Scalar;
use forculus_core::field;
use forculus_types::ResultRecord;

use crate::error::Result;
use crate::sink::ResultSink;
use crate::source::ShareSource;

type GroupKey = ([u8; 16], Vec<u8>);

/// `ForculusEvaluator(threshold = k, source)` (§4.5).
///
/// Unlike the Inserter, the Evaluator holds no persistent state across
/// calls to [`ForculusEvaluator::compute_and_emit`]: the `(iv, ct) -> {(x,
/// y)}` accumulator described in §3 is built fresh from `source` each time
/// and discarded once every group has been attempted.
///
/// Reconstruction recovers `c_0` from the shares themselves via Lagrange
/// interpolation; it never re-derives key material from `(epoch,
/// plaintext)`. The Evaluator therefore carries only `threshold`, unlike
/// the Inserter, which needs the epoch to derive each plaintext's
/// coefficients in the first place (§4.5 vs. §4.4).
pub struct ForculusEvaluator {
    threshold: usize,
}

/// Why a single group's reconstruction attempt did not produce a plaintext.
///
/// Never surfaced as an [`crate::Error`]: per §7, these are always handled
/// as a silent skip of that one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupOutcome {
    Recovered,
    DuplicatePointsExhausted,
    InvalidCiphertext,
}

impl ForculusEvaluator {
    /// Constructs a new Evaluator with the given `threshold`.
    ///
    /// # Errors
    /// Returns [`forculus_core::Error::InvalidArgument`] (wrapped) if
    /// `threshold < 2`.
    pub fn new(threshold: usize) -> Result<Self> {
        if threshold < 2 {
            return Err(forculus_core::Error::InvalidArgument(format!(
                "threshold must be >= 2, got {threshold}"
            ))
            .into());
        }
        Ok(Self { threshold })
    }

    /// The configured `threshold`.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Reads every share record from `source`, groups them by `(iv, ct)`,
    /// and for each group with at least `threshold` shares attempts
    /// recovery, emitting a `(plaintext, count)` pair to `result_sink` on
    /// success (§4.5).
    ///
    /// Groups with fewer than `threshold` shares are silently skipped: this
    /// is the scheme's privacy property, not an error. Groups whose first
    /// `threshold` points collide, or whose reconstructed key fails to
    /// decrypt to validly-padded plaintext, are also skipped — §9's
    /// documented retry policy is attempted first (dropping the earliest
    /// colliding point and retrying with the next available one) before a
    /// group is given up on.
    #[tracing::instrument(level = "debug", skip(self, source, result_sink))]
    pub fn compute_and_emit<Src: ShareSource, Sink: ResultSink>(
        &self,
        source: &mut Src,
        result_sink: &mut Sink,
    ) -> Result<()> {
        let mut groups: HashMap<GroupKey, Vec<(Scalar, Scalar)>> = HashMap::new();
        while let Some(record) = source.next_record()? {
            groups
                .entry(record.group_key())
                .or_default()
                .push((record.x, record.y));
        }

        tracing::debug!(group_count = groups.len(), "grouped share records");

        let mut recovered = 0usize;
        let mut skipped = 0usize;
        for ((iv, ciphertext), points) in groups {
            if points.len() < self.threshold {
                tracing::trace!(
                    have = points.len(),
                    need = self.threshold,
                    "skipping group: insufficient shares"
                );
                skipped += 1;
                continue;
            }
            match self.try_recover_group(&iv, &ciphertext, &points, result_sink)? {
                GroupOutcome::Recovered => recovered += 1,
                GroupOutcome::DuplicatePointsExhausted | GroupOutcome::InvalidCiphertext => {
                    skipped += 1;
                }
            }
        }

        tracing::debug!(recovered, skipped, "compute_and_emit finished");
        Ok(())
    }

    /// Attempts reconstruction for a single group, retrying past duplicate
    /// x-values before giving up, per the policy recorded in DESIGN.md.
    fn try_recover_group<Sink: ResultSink>(
        &self,
        iv: &[u8; 16],
        ciphertext: &[u8],
        points: &[(Scalar, Scalar)],
        result_sink: &mut Sink,
    ) -> Result<GroupOutcome> {
        let threshold = self.threshold;
        let mut start = 0usize;
        loop {
            if start + threshold > points.len() {
                tracing::trace!("skipping group: duplicate points exhausted all subsets");
                return Ok(GroupOutcome::DuplicatePointsExhausted);
            }
            let subset = &points[start..start + threshold];
            match field::lagrange_c0(subset, threshold) {
                Ok(c0) => {
                    return self.finish_group(iv, ciphertext, &c0, points.len(), result_sink);
                }
                Err(forculus_core::Error::DuplicatePoint) => {
                    start += 1;
                    continue;
                }
                Err(other) => {
                    // InsufficientShares cannot occur (subset length ==
                    // threshold by construction); anything else is a core
                    // invariant violation, not a per-group condition.
                    return Err(other.into());
                }
            }
        }
    }

    fn finish_group<Sink: ResultSink>(
        &self,
        iv: &[u8; 16],
        ciphertext: &[u8],
        c0: &Scalar,
        count: usize,
        result_sink: &mut Sink,
    ) -> Result<GroupOutcome> {
        match forculus_core::derive::decrypt_with_c0(c0, iv, ciphertext) {
            Ok(plaintext) => {
                result_sink.emit(ResultRecord::new(plaintext, count))?;
                Ok(GroupOutcome::Recovered)
            }
            Err(forculus_core::Error::InvalidCiphertext(reason)) => {
                tracing::trace!(reason, "skipping group: invalid ciphertext padding");
                Ok(GroupOutcome::InvalidCiphertext)
            }
            Err(other) => Err(other.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::VecResultSink;
    use crate::source::VecShareSource;
    use forculus_client::{ForculusInserter, VecShareSink};

    fn run_round_trip(threshold: usize, epoch: u128, plaintext: &[u8], reports: usize) -> Vec<ResultRecord> {
        let mut inserter = ForculusInserter::new(threshold, epoch, VecShareSink::new()).unwrap();
        for _ in 0..reports {
            inserter.insert(plaintext).unwrap();
        }
        let records = inserter.into_sink().records;

        let evaluator = ForculusEvaluator::new(threshold).unwrap();
        let mut source = VecShareSource::new(records);
        let mut sink = VecResultSink::new();
        evaluator.compute_and_emit(&mut source, &mut sink).unwrap();
        sink.records
    }

    #[test]
    fn three_reports_at_threshold_three_recovers_plaintext() {
        let results = run_round_trip(3, 1, b"hello", 3);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].plaintext, b"hello");
        assert_eq!(results[0].count, 3);
    }

    #[test]
    fn below_threshold_reports_recover_nothing() {
        let results = run_round_trip(3, 1, b"hello", 2);
        assert!(results.is_empty());
    }

    #[test]
    fn mixed_plaintexts_only_the_one_meeting_threshold_recovers() {
        let mut inserter = ForculusInserter::new(3, 1, VecShareSink::new()).unwrap();
        for _ in 0..2 {
            inserter.insert(b"hello").unwrap();
        }
        inserter.insert(b"world").unwrap();
        let records = inserter.into_sink().records;

        let evaluator = ForculusEvaluator::new(3).unwrap();
        let mut source = VecShareSource::new(records);
        let mut sink = VecResultSink::new();
        evaluator.compute_and_emit(&mut source, &mut sink).unwrap();
        assert!(sink.records.is_empty());
    }

    #[test]
    fn five_reports_recover_with_correct_count() {
        let results = run_round_trip(3, 1, b"hello", 5);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].plaintext, b"hello");
        assert_eq!(results[0].count, 5);
    }

    #[test]
    fn recovery_does_not_depend_on_the_epoch_the_inserter_used() {
        // the Evaluator reconstructs c_0 purely from the shares' (x, y)
        // pairs via Lagrange interpolation; it never re-derives key material
        // from an epoch, so it takes no epoch parameter at all (§4.5).
        let results = run_round_trip(3, 42, b"hello", 3);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].plaintext, b"hello");
        assert_eq!(results[0].count, 3);
    }

    #[test]
    fn duplicate_point_among_first_threshold_is_retried() {
        // construct a group where the first `threshold` points collide on x
        // but a valid reconstruction exists among the remaining points.
        let mut inserter = ForculusInserter::new(2, 1, VecShareSink::new()).unwrap();
        inserter.insert(b"hello").unwrap();
        inserter.insert(b"hello").unwrap();
        let mut records = inserter.into_sink().records;
        // duplicate the first point's x (but keep a distinct y so it would
        // be rejected as InvalidCiphertext rather than silently matching).
        let bad = records[0].clone();
        records.insert(0, bad);

        let evaluator = ForculusEvaluator::new(2).unwrap();
        let mut source = VecShareSource::new(records);
        let mut sink = VecResultSink::new();
        evaluator.compute_and_emit(&mut source, &mut sink).unwrap();
        assert_eq!(sink.records.len(), 1);
        assert_eq!(sink.records[0].plaintext, b"hello");
    }
}
