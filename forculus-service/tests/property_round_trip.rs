//! Property-based Insert/Evaluate round-trip test (§8): for random
//! threshold, plaintext, and report count (at or above threshold), the
//! Evaluator recovers exactly the original plaintext with the correct
//! count.

use forculus_client::{ForculusInserter, VecShareSink};
use forculus_service::{ForculusEvaluator, VecResultSink, VecShareSource};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn insert_evaluate_round_trip(
        threshold in 2usize..10,
        epoch in 0u128..1000,
        plaintext in prop::collection::vec(any::<u8>(), 0..64),
        extra_reports in 0usize..(2 * 10),
    ) {
        let reports = threshold + (extra_reports % (2 * threshold));

        let mut inserter = ForculusInserter::new(threshold, epoch, VecShareSink::new()).unwrap();
        for _ in 0..reports {
            inserter.insert(&plaintext).unwrap();
        }
        let records = inserter.into_sink().records;

        let evaluator = ForculusEvaluator::new(threshold).unwrap();
        let mut source = VecShareSource::new(records);
        let mut sink = VecResultSink::new();
        evaluator.compute_and_emit(&mut source, &mut sink).unwrap();

        prop_assert_eq!(sink.records.len(), 1);
        prop_assert_eq!(&sink.records[0].plaintext, &plaintext);
        prop_assert_eq!(sink.records[0].count, reports);
    }

    #[test]
    fn insert_evaluate_below_threshold_recovers_nothing(
        threshold in 2usize..10,
        epoch in 0u128..1000,
        plaintext in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let reports = threshold - 1;

        let mut inserter = ForculusInserter::new(threshold, epoch, VecShareSink::new()).unwrap();
        for _ in 0..reports {
            inserter.insert(&plaintext).unwrap();
        }
        let records = inserter.into_sink().records;

        let evaluator = ForculusEvaluator::new(threshold).unwrap();
        let mut source = VecShareSource::new(records);
        let mut sink = VecResultSink::new();
        evaluator.compute_and_emit(&mut source, &mut sink).unwrap();

        prop_assert!(sink.records.is_empty());
    }
}
