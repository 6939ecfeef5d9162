//! Integration tests for the propagation rules

use n2n_uncertain::{Error, Uncertain};
use proptest::prelude::*;
use rstest::rstest;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[rstest]
#[case(3.0, 4.0, 5.0)] // case 1
#[case(0.0, 2.5, 2.5)] // case 2
#[case(1.5, 0.0, 1.5)] // case 3
fn sums_in_quadrature(#[case] da: f64, #[case] db: f64, #[case] expected: f64) {
    let a = Uncertain::new(7.0, da).unwrap();
    let b = Uncertain::new(2.0, db).unwrap();
    assert!(close((a + b).uncertainty(), expected));
    assert!(close((a - b).uncertainty(), expected));
}

#[rstest]
#[case(10.0, 1.0, 5.0, 0.5)] // case 1
#[case(-3.0, 0.3, 4.0, 0.2)] // case 2
#[case(2.0, 0.0, -8.0, 0.8)] // case 3
fn quotients_combine_relative(#[case] a: f64, #[case] da: f64, #[case] b: f64, #[case] db: f64) {
    let x = Uncertain::new(a, da).unwrap();
    let y = Uncertain::new(b, db).unwrap();
    let q = x.checked_div(y).unwrap();
    let expected = (a / b).abs() * (da / a).hypot(db / b);
    assert!(close(q.uncertainty(), expected));
}

#[test]
fn zero_divisor_is_domain_error() {
    let x = Uncertain::new(1.0, 0.1).unwrap();
    assert_eq!(
        x.checked_div(Uncertain::new(0.0, 0.1).unwrap()),
        Err(Error::ZeroNominalValue {
            operation: "division"
        })
    );
    assert!(Uncertain::exact(0.0).recip().is_err());
}

#[test]
fn deserialise_rejects_negative_uncertainty() {
    let ok: Uncertain = serde_json::from_str(r#"{"value": 1.0, "uncertainty": 0.5}"#).unwrap();
    assert_eq!(ok, Uncertain::new(1.0, 0.5).unwrap());

    let bad = serde_json::from_str::<Uncertain>(r#"{"value": 1.0, "uncertainty": -0.5}"#);
    assert!(bad.is_err());
}

fn nonzero() -> impl Strategy<Value = f64> {
    prop_oneof![-1.0e6..-1.0e-3, 1.0e-3..1.0e6]
}

proptest! {
    #[test]
    fn divide_then_multiply_restores_value(
        a in nonzero(), da in 0.0..1.0e3,
        b in nonzero(), db in 0.0..1.0e3,
    ) {
        let x = Uncertain::new(a, da).unwrap();
        let y = Uncertain::new(b, db).unwrap();

        let q = x.checked_div(y).unwrap();
        let restored = q * y;
        prop_assert!(close(restored.value(), a));

        // no worse than multiplying by the reciprocal
        let naive = x * y.recip().unwrap();
        prop_assert!(q.uncertainty() <= naive.uncertainty() * (1.0 + 1e-12));
    }

    #[test]
    fn uncertainty_never_negative(
        a in -1.0e3..1.0e3f64, da in 0.0..1.0e2,
        b in -1.0e3..1.0e3f64, db in 0.0..1.0e2,
        k in -1.0e3..1.0e3f64,
    ) {
        let x = Uncertain::new(a, da).unwrap();
        let y = Uncertain::new(b, db).unwrap();

        prop_assert!((x + y).uncertainty() >= 0.0);
        prop_assert!((x - y).uncertainty() >= 0.0);
        prop_assert!((x * y).uncertainty() >= 0.0);
        prop_assert!(x.scale(k).uncertainty() >= 0.0);
        if let Ok(q) = x.checked_div(y) {
            prop_assert!(q.uncertainty() >= 0.0);
        }
        if let Ok(p) = x.powf(2.0) {
            prop_assert!(p.uncertainty() >= 0.0);
        }
    }
}
