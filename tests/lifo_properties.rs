//! Property tests for LIFO ordering and size accounting.

use bytestack::StackRegistry;
use proptest::prelude::*;

fn payloads() -> impl Strategy<Value = Vec<Vec<u8>>> {
    proptest::collection::vec(proptest::collection::vec(any::<u8>(), 1..64), 1..32)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // -----------------------------------------------------------------------
    // Property: n pushes followed by n pops return the payloads in exactly
    // reverse order, byte-for-byte.
    // -----------------------------------------------------------------------
    #[test]
    fn pops_return_pushes_in_reverse_order(payloads in payloads()) {
        let mut stacks = StackRegistry::new();
        let handle = stacks.create();

        for payload in &payloads {
            stacks.push(handle, payload);
        }
        prop_assert_eq!(stacks.size(handle), payloads.len());

        let mut buf = [0u8; 64];
        for expected in payloads.iter().rev() {
            let written = stacks.pop(handle, &mut buf);
            prop_assert_eq!(&buf[..written], expected.as_slice());
        }
        prop_assert_eq!(stacks.pop(handle, &mut buf), 0);
    }

    // -----------------------------------------------------------------------
    // Property: size after n pushes and k pops equals n - k.
    // -----------------------------------------------------------------------
    #[test]
    fn size_tracks_push_and_pop_counts(
        payloads in payloads(),
        pops in 0usize..40,
    ) {
        let mut stacks = StackRegistry::new();
        let handle = stacks.create();

        for payload in &payloads {
            stacks.push(handle, payload);
        }

        let mut buf = [0u8; 64];
        let mut popped = 0;
        for _ in 0..pops {
            if stacks.pop(handle, &mut buf) > 0 {
                popped += 1;
            }
        }

        prop_assert_eq!(stacks.size(handle), payloads.len().saturating_sub(popped));
        prop_assert_eq!(popped, pops.min(payloads.len()));
    }

    // -----------------------------------------------------------------------
    // Property: interleaved operations on two stacks behave like two
    // independent Vec<Vec<u8>> models.
    // -----------------------------------------------------------------------
    #[test]
    fn interleaved_stacks_match_reference_model(
        ops in proptest::collection::vec(
            (0usize..2, proptest::option::of(proptest::collection::vec(any::<u8>(), 1..16))),
            1..64,
        ),
    ) {
        let mut stacks = StackRegistry::new();
        let handles = [stacks.create(), stacks.create()];
        let mut model: [Vec<Vec<u8>>; 2] = [Vec::new(), Vec::new()];

        let mut buf = [0u8; 16];
        for (which, op) in ops {
            match op {
                // Some(payload): push it; None: pop.
                Some(payload) => {
                    stacks.push(handles[which], &payload);
                    model[which].push(payload);
                }
                None => {
                    let written = stacks.pop(handles[which], &mut buf);
                    match model[which].pop() {
                        Some(expected) => prop_assert_eq!(&buf[..written], expected.as_slice()),
                        None => prop_assert_eq!(written, 0),
                    }
                }
            }
            prop_assert_eq!(stacks.size(handles[0]), model[0].len());
            prop_assert_eq!(stacks.size(handles[1]), model[1].len());
        }
    }

    // -----------------------------------------------------------------------
    // Property: releasing and re-creating stacks never hands out a handle
    // that aliases a different live stack.
    // -----------------------------------------------------------------------
    #[test]
    fn churn_never_aliases_live_stacks(
        ops in proptest::collection::vec(prop_oneof![Just(true), Just(false)], 1..64),
    ) {
        let mut stacks = StackRegistry::new();
        let mut live = Vec::new();

        for (tag, create) in ops.into_iter().enumerate() {
            if create {
                let handle = stacks.create();
                prop_assert!(handle.raw() >= 0);
                // Tag each stack with a unique payload.
                stacks.push(handle, &(tag as u64).to_le_bytes());
                live.push((handle, tag as u64));
            } else if !live.is_empty() {
                let (handle, _) = live.swap_remove(tag % live.len());
                stacks.release(handle);
            }
        }

        prop_assert_eq!(stacks.live(), live.len());
        let mut buf = [0u8; 8];
        for (handle, tag) in live {
            prop_assert_eq!(stacks.pop(handle, &mut buf), 8);
            prop_assert_eq!(u64::from_le_bytes(buf), tag);
        }
    }
}
