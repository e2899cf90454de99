//! Properties of the instrumented sequence under arbitrary access scripts.
//!
//! A script is a list of `get`/`set` calls, some of them out of range. The
//! trace must hold exactly one event per successful call and must replay to
//! the live buffer.

use proptest::prelude::*;
use sortrace_core::{AccessOp, InstrumentedSequence, Replay, SequenceError, Value};

#[derive(Clone, Debug)]
enum Call {
    Get(usize),
    Set(usize, Value),
}

prop_compose! {
    fn arb_buffer()(v in prop::collection::vec(-100i32..=100, 0..=12)) -> Vec<Value> {
        v.into_iter().map(f64::from).collect()
    }
}

fn arb_call() -> impl Strategy<Value = Call> {
    // Indices up to 15 so short buffers see out-of-range calls.
    prop_oneof![
        (0usize..16).prop_map(Call::Get),
        (0usize..16, -100i32..=100).prop_map(|(i, v)| Call::Set(i, f64::from(v))),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64, // good CI/runtime balance
        .. ProptestConfig::default()
    })]

    #[test]
    fn trace_matches_successful_calls(
        initial in arb_buffer(),
        script in prop::collection::vec(arb_call(), 0..40),
    ) {
        let mut seq = InstrumentedSequence::new(&initial);
        let mut ok = 0usize;

        for call in &script {
            let before = seq.as_slice().to_vec();
            let res = match *call {
                Call::Get(i) => seq.get(i).map(|_| ()),
                Call::Set(i, v) => seq.set(i, v),
            };
            match res {
                Ok(()) => {
                    ok += 1;
                    let ev = seq.events().last().unwrap();
                    match ev.op {
                        AccessOp::Get => prop_assert_eq!(&ev.snapshot, &before),
                        AccessOp::Set => prop_assert_eq!(ev.snapshot[ev.index], ev.value),
                    }
                }
                Err(SequenceError::IndexOutOfRange { index, len }) => {
                    prop_assert!(index >= len);
                    prop_assert_eq!(seq.as_slice(), before.as_slice());
                }
            }
            prop_assert_eq!(seq.len(), initial.len());
        }

        prop_assert_eq!(seq.events().len(), ok);
        let replayed = Replay::new().replay(&initial, seq.events()).unwrap();
        prop_assert_eq!(replayed.as_slice(), seq.as_slice());

        seq.reset();
        prop_assert!(seq.events().is_empty());
        prop_assert_eq!(seq.as_slice(), replayed.as_slice());
    }
}
