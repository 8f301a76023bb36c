// tests/pipeline_tests.rs

// Import necessary types from the chromaq crate
use chromaq::{
    decode_tokens, normalize_candidate, verify, verify_candidate, ChromaError, DerivationOptions, Deriver, Gate,
    Instruction, Lane, Policy,
};
use chromaq::validation::{REASON_ACCEPTED, REASON_ADJACENCY, REASON_OUT_OF_RANGE};

// Helper: render tokens as 7-digit segments
fn encode(tokens: &[u64]) -> String {
    tokens.iter().map(|t| format!("{:07}", t)).collect()
}

fn derive(tokens: &[u64], m: usize, max_lanes: usize, max_layers: usize, reversible_only: bool) -> Result<chromaq::DerivationResult, ChromaError> {
    Deriver::new(Policy::default()).derive(tokens, m, DerivationOptions { max_lanes, max_layers, reversible_only })
}

#[test]
fn test_end_to_end_two_by_two() -> Result<(), ChromaError> {
    let digits = encode(&[10, 20, 30, 40]);
    let report = verify_candidate(&digits, false, &Policy::default());
    println!("{}", report);

    assert!(report.is_ok());
    assert_eq!(report.reason(), REASON_ACCEPTED);
    assert_eq!(report.side(), 2);
    assert_eq!(report.tokens(), [10, 20, 30, 40]);

    let result = derive(report.tokens(), report.side(), 2, 2, false)?;
    println!("{}", result);
    println!("{}", result.quantum());

    assert_eq!(result.lanes(), 2);
    assert_eq!(result.layers(), 2);

    // 10 -> rz, 20 -> rx, barrier, 30 -> t, 40 -> s, barrier
    let quantum = result.quantum().instructions();
    assert_eq!(quantum.len(), 6);
    assert!(matches!(quantum[0], Instruction::Rotation { gate: Gate::Rz, lane: Lane(0), .. }));
    assert!(matches!(quantum[1], Instruction::Rotation { gate: Gate::Rx, lane: Lane(1), .. }));
    assert_eq!(quantum[2], Instruction::Barrier);
    assert_eq!(quantum[3], Instruction::Single { gate: Gate::T, lane: Lane(0) });
    assert_eq!(quantum[4], Instruction::Single { gate: Gate::S, lane: Lane(1) });
    assert_eq!(quantum[5], Instruction::Barrier);

    // One barrier per row, quantum side only
    assert_eq!(result.quantum().barrier_count(), 2);
    assert_eq!(result.classical().barrier_count(), 0);
    assert!(result.classical().is_empty());

    assert_eq!(
        result.quantum().to_sequence_line(),
        "rz(2.1598449493429825,0) rx(4.123340357836604,1) t(0) s(1)"
    );
    Ok(())
}

#[test]
fn test_normalized_binary_candidate() -> Result<(), ChromaError> {
    // 1000000_0000002 as a single decimal number, fed in as binary
    let decimal: u64 = 10_000_000_000_002;
    let binary = format!("0b{:b}", decimal);
    let digits = normalize_candidate(&binary)?;
    assert_eq!(digits, decimal.to_string());
    assert_eq!(decode_tokens(&digits, 7), vec![1_000_000, 2]);
    // Two tokens: not a square
    let report = verify_candidate(&digits, false, &Policy::default());
    assert_eq!(report.reason(), "Token count 2 is not a perfect square.");
    Ok(())
}

#[test]
fn test_leading_zeros_change_segmentation() -> Result<(), ChromaError> {
    // The normalizer strips leading zeros before decoding
    let digits = normalize_candidate(&encode(&[10, 20, 30, 40]))?;
    assert_eq!(digits, "10000002000000300000040");
    assert_eq!(decode_tokens(&digits, 7), vec![1_000_000, 2_000_000, 3_000_000, 40]);
    Ok(())
}

#[test]
fn test_malformed_trailing_fragment_is_absent() {
    // Leniency contract: bad fragment silently dropped, count drops with it
    let mut digits = encode(&[11, 22, 33, 44]);
    digits.push_str("12x");
    let tokens = decode_tokens(&digits, 7);
    assert_eq!(tokens, vec![11, 22, 33, 44]);
    assert!(verify_candidate(&digits, false, &Policy::default()).is_ok());
}

#[test]
fn test_rejections_carry_reasons() {
    let policy = Policy::default();

    let report = verify(vec![1, 1, 2, 3], false, &policy);
    assert!(!report.is_ok());
    assert_eq!(report.reason(), REASON_ADJACENCY);
    assert_eq!(report.side(), 2);

    // Checkerboard: the equal tokens are diagonal, never orthogonal
    let report = verify(vec![1, 2, 2, 1], false, &policy);
    assert!(report.is_ok());
    assert_eq!(report.colors().join(" "), "#000000 #000001 #000001 #000000");

    let report = verify(vec![5, 5, 7, 9], true, &policy);
    assert_eq!(report.reason(), REASON_ADJACENCY);

    let report = verify(vec![1, 2, 3, 16_777_217], false, &policy);
    assert_eq!(report.reason(), REASON_OUT_OF_RANGE);
    assert!(report.colors().is_empty());

    let report = verify(vec![1, 2], false, &policy);
    assert_eq!(report.side(), 0);
}

#[test]
fn test_seven_digit_segment_range_paths() {
    let policy = Policy::default();

    // An all-zero segment decodes to token 0, below the range
    let report = verify_candidate("0000000", false, &policy);
    assert_eq!(report.tokens(), [0]);
    assert_eq!(report.reason(), REASON_OUT_OF_RANGE);
    assert_eq!(report.side(), 1);

    // The largest 7-digit segment still sits under 16^6
    let report = verify_candidate(&encode(&[9_999_999]), false, &policy);
    assert!(report.is_ok());
    assert_eq!(report.colors(), ["#98967e".to_string()]);

    // Above 16^6 only reachable through pre-decoded tokens
    let report = verify(vec![16_777_217], false, &policy);
    assert_eq!(report.reason(), REASON_OUT_OF_RANGE);
}

#[test]
fn test_reversible_only_parity() -> Result<(), ChromaError> {
    let tokens: Vec<u64> = vec![3, 8, 13, 6, 1, 12, 17, 4, 9];
    let result = derive(&tokens, 3, 3, 3, true)?;

    let quantum_ops: Vec<&Instruction> = result.quantum().operations().collect();
    let classical_ops: Vec<&Instruction> = result.classical().instructions().iter().collect();
    assert_eq!(quantum_ops, classical_ops);
    assert_eq!(quantum_ops.len(), 9);
    assert!(quantum_ops.iter().all(|i| i.gate().is_some_and(|g| g.has_shadow_equivalent())));
    Ok(())
}

#[test]
fn test_idempotence() -> Result<(), ChromaError> {
    let policy = Policy::default();
    let digits = encode(&[10, 20, 30, 40, 50, 60, 70, 80, 90]);
    let first = verify_candidate(&digits, true, &policy);
    let second = verify_candidate(&digits, true, &policy);
    assert_eq!(first, second);

    let a = derive(first.tokens(), first.side(), 8, 16, false)?;
    let b = derive(first.tokens(), first.side(), 8, 16, false)?;
    assert_eq!(a, b);
    Ok(())
}
