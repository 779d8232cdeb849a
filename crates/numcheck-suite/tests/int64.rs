#[macro_use]
mod common;

fixed_width_suite!(i64, FixedWidth::signed(64).unwrap());

#[test]
fn test_min_boundaries() {
    let w = width();
    let min = BigInt::from(i64::MIN);
    assert_eq!(w.neg(&min), min);
    assert_eq!(w.div_rem(&min, &BigInt::from(-1)), (min.clone(), BigInt::from(0)));
    let (abs, sign) = w.abs_sign(&min);
    assert_eq!(abs, BigInt::from(1u64 << 63));
    assert_eq!(sign, BigInt::from(-1));
    for op in [FixedOp::Neg, FixedOp::AbsSign, FixedOp::Pow2, FixedOp::Id] {
        let kind = common::run_fixed::<i64>(&w, op, &[min.clone()]).unwrap();
        assert_eq!(kind, OutcomeKind::ExpectedSuccess, "{}", op.name());
    }
    let kind =
        common::run_fixed::<i64>(&w, FixedOp::DivRem, &[min.clone(), BigInt::from(-1)]).unwrap();
    assert_eq!(kind, OutcomeKind::ExpectedSuccess);
}

#[test]
fn test_shr_of_negative_fills_with_sign() {
    let w = width();
    let minus_eight = BigInt::from(-8);
    assert_eq!(w.shr(&minus_eight, &BigInt::from(1)).unwrap(), BigInt::from(-4));
    assert_eq!(w.shr(&minus_eight, &BigInt::from(500)).unwrap(), BigInt::from(-1));
}
