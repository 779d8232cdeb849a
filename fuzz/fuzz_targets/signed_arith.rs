#![no_main]
use libfuzzer_sys::fuzz_target;
use num_bigint::BigInt;
use numcheck_model::{trunc_div_rem, Radix};

fuzz_target!(|data: &[u8]| {
    if data.len() < 33 {
        return;
    }
    let Ok(radix) = Radix::new(4 + u32::from(data[0]) % 122) else {
        return;
    };
    let x = BigInt::from_signed_bytes_le(&data[1..17]);
    let y = BigInt::from_signed_bytes_le(&data[17..33]);
    let (a, b) = (radix.int_to_signed(&x), radix.int_to_signed(&y));

    assert_eq!(radix.signed_to_int(&radix.signed_add(&a, &b)), &x + &y);
    assert_eq!(radix.signed_to_int(&radix.signed_sub(&a, &b)), &x - &y);
    assert_eq!(radix.signed_to_int(&radix.signed_mul(&a, &b)), &x * &y);
    let (q, r) = radix.signed_div(&a, &b);
    let (want_q, want_r) = trunc_div_rem(&x, &y);
    assert_eq!(radix.signed_to_int(&q), want_q);
    assert_eq!(radix.signed_to_int(&r), want_r);
    assert_eq!(radix.signed_compare(&a, &b), x.cmp(&y) as i8);
});
