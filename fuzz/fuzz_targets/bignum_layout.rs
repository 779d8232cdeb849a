#![no_main]
use libfuzzer_sys::fuzz_target;
use num_bigint::{BigInt, BigUint};
use numcheck_model::{Felt, Radix};

fuzz_target!(|data: &[u8]| {
    let Some((&first, rest)) = data.split_first() else {
        return;
    };
    let Ok(radix) = Radix::new(4 + u32::from(first) % 122) else {
        return;
    };
    let mut felts: Vec<Felt> = rest
        .chunks(16)
        .map(|chunk| Felt::from_int(&BigInt::from(BigUint::from_bytes_le(chunk))))
        .collect();
    felts.push(Felt::minus_one());
    if let Ok(n) = radix.read_num(&felts) {
        assert!(radix.is_num(&n));
        assert_eq!(n.to_felts(), felts);
        assert_eq!(radix.int_to_num(&radix.num_to_int(&n)), n);
    }
});
