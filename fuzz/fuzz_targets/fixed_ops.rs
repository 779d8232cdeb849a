#![no_main]
use libfuzzer_sys::fuzz_target;
use num_bigint::BigInt;
use numcheck_harness::run;
use numcheck_model::{Felt, FixedWidth};
use numcheck_suite::{fixed_spec, FixedOp, NativeTarget};

fuzz_target!(|data: &[u8]| {
    let [op, a0, a1, b0, b1, ..] = *data else {
        return;
    };
    let op = FixedOp::ALL[usize::from(op) % FixedOp::ALL.len()];
    let a = BigInt::from(i16::from_le_bytes([a0, a1]));
    let b = BigInt::from(i16::from_le_bytes([b0, b1]));
    let Ok(width) = FixedWidth::signed(16) else {
        return;
    };
    let args: Vec<Felt> = [a, b]
        .iter()
        .take(op.arity())
        .map(Felt::from_int)
        .collect();
    let mut target = NativeTarget::<i16>::new();
    if let Err(err) = run(&mut target, &fixed_spec(&width, op), &args, None) {
        panic!("{err}");
    }
});
