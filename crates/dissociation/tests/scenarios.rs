//! End-to-end scenarios over concrete carriers.
//!
//! Each test drives the public surface the way a consumer would: build a
//! set, check it, enumerate spans, extract a basis, and confirm the
//! certificates by re-deriving every element.

use dissociation::group::{Additive, CommutativeGroup, Rational, Xor, ZMod};
use dissociation::{
    check, dissociation_number, dissociation_witness, extract_basis, is_dissociated,
    maximal_dissociated_subset, represent, span, Coefficient, Collection, Error, Kernel, Limits,
    PreconditionCheck,
};

fn ints(values: &[i64]) -> Collection<Additive<i64>> {
    values.iter().copied().map(Additive).collect()
}

fn rats(values: &[i128]) -> Collection<Rational> {
    values
        .iter()
        .map(|&n| Rational::from_integer(n).unwrap())
        .collect()
}

// =============================================================================
// Nonzero rationals under multiplication
// =============================================================================

#[test]
fn rationals_2_3_6_witness_is_six_against_two_three() {
    let s = rats(&[2, 3, 6]);
    let w = dissociation_witness(&s).unwrap().expect("6 = 2·3");

    let six = rats(&[6]);
    let two_three = rats(&[2, 3]);
    let sides = [w.left().clone(), w.right().clone()];
    assert!(sides.contains(&six));
    assert!(sides.contains(&two_three));
    assert_eq!(w.value(), Rational::from_integer(6).unwrap());
}

#[test]
fn rationals_2_3_6_basis_spans_six() {
    let s = rats(&[2, 3, 6]);
    assert_eq!(maximal_dissociated_subset(&s).unwrap(), rats(&[2, 3]));

    let basis = extract_basis(&s, 2).unwrap();
    assert_eq!(basis.len(), 2);
    assert!(basis.elements().is_subset(&s));

    let six = Rational::from_integer(6).unwrap();
    assert!(span(basis.elements()).unwrap().contains(&six));
    let cert = basis.certificate(&six).unwrap();
    assert_eq!(cert.evaluate(), six);
    assert_eq!(cert.coefficient(&Rational::from_integer(2).unwrap()), Coefficient::Positive);
    assert_eq!(cert.coefficient(&Rational::from_integer(3).unwrap()), Coefficient::Positive);
}

#[test]
fn rationals_with_negative_elements() {
    // -1 has order two: {-1} is dissociated, {-1, -2, 2} is not.
    let s = rats(&[-1, -2, 2]);
    let w = dissociation_witness(&s).unwrap().unwrap();
    assert!(w.verify(&s));
    assert!(is_dissociated(&rats(&[-1])).unwrap());
    assert!(!is_dissociated(&rats(&[-1, 1])).unwrap());
}

#[test]
fn rationals_fractions_in_span() {
    let s = rats(&[2, 3]);
    let sp = span(&s).unwrap();
    assert_eq!(sp.len(), 9);
    assert!(sp.contains(&Rational::new(2, 3).unwrap()));
    assert!(sp.contains(&Rational::new(1, 6).unwrap()));
    assert!(!sp.contains(&Rational::from_integer(4).unwrap()));
}

// =============================================================================
// Integers under addition
// =============================================================================

#[test]
fn integers_1_2_3() {
    let s = ints(&[1, 2, 3]);
    assert!(!is_dissociated(&s).unwrap());
    assert_eq!(dissociation_number(&s).unwrap(), 2);

    let basis = extract_basis(&s, 2).unwrap();
    assert_eq!(basis.elements(), &ints(&[1, 2]));
    assert!(span(basis.elements()).unwrap().contains(&Additive(3)));

    let three = basis.certificate(&Additive(3)).unwrap();
    assert_eq!(three.coefficient(&Additive(1)), Coefficient::Positive);
    assert_eq!(three.coefficient(&Additive(2)), Coefficient::Positive);
}

#[test]
fn integers_represent_uses_signs() {
    let s = ints(&[5, 7]);
    let c = represent(&Additive(2), &s).unwrap().unwrap();
    assert_eq!(c.evaluate(), Additive(2));
    assert_eq!(c.coefficient(&Additive(5)), Coefficient::Negative);
    assert_eq!(c.coefficient(&Additive(7)), Coefficient::Positive);
    assert!(represent(&Additive(3), &s).unwrap().is_none());
}

#[test]
fn empty_set() {
    let s: Collection<Additive<i64>> = Collection::new();
    assert!(is_dissociated(&s).unwrap());
    assert!(extract_basis(&s, 0).unwrap().is_empty());
    assert_eq!(span(&s).unwrap(), ints(&[0]));
}

#[test]
fn span_is_not_closed() {
    let s = ints(&[1]);
    let once = span(&s).unwrap();
    let twice = span(&once).unwrap();
    assert_eq!(once, ints(&[-1, 0, 1]));
    assert!(once.is_subset(&twice));
    assert_ne!(once, twice);
    assert!(twice.contains(&Additive(2)));
}

// =============================================================================
// Other carriers
// =============================================================================

#[test]
fn xor_vectors_basis_is_a_linear_basis() {
    let s: Collection<Xor> = (1..8u64).map(Xor).collect();
    let basis = extract_basis(&s, 3).unwrap();
    assert_eq!(basis.len(), 3);
    assert!(basis.verify(&s, 3));
    assert!(extract_basis(&s, 2).is_err());
}

#[test]
fn zmod_wraps_around() {
    let s: Collection<ZMod<7>> = [1, 2, 4].into_iter().map(ZMod::new).collect();
    // 1 + 2 + 4 = 0 mod 7 = ∏∅.
    let w = dissociation_witness(&s).unwrap().unwrap();
    assert!(w.verify(&s));
    assert!(w.value().is_identity());
    assert_eq!(span(&s).unwrap().len(), 7);
}

#[test]
fn product_carrier() {
    let s: Collection<(Additive<i64>, Xor)> = [
        (Additive(1), Xor(0)),
        (Additive(0), Xor(1)),
        (Additive(1), Xor(1)),
    ]
    .into_iter()
    .collect();
    let verdict = check(&s).unwrap();
    assert!(!verdict.is_dissociated());
    assert_eq!(dissociation_number(&s).unwrap(), 2);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn false_bound_is_a_typed_error() {
    let s = ints(&[1, 2, 4, 8]);
    assert_eq!(
        extract_basis(&s, 3).unwrap_err(),
        Error::PreconditionViolation { bound: 3, size: 4 }
    );

    let trusted = Kernel::new(Limits {
        precondition: PreconditionCheck::Trusted,
        ..Limits::default()
    });
    assert!(matches!(
        trusted.extract_basis(&s, 3),
        Err(Error::PreconditionViolation { bound: 3, .. })
    ));
}

#[test]
fn oversized_inputs_are_refused() {
    let kernel = Kernel::new(Limits {
        max_check_width: 4,
        max_span_width: 3,
        ..Limits::default()
    });
    let s = ints(&[1, 2, 4, 8, 16]);
    assert!(matches!(kernel.check(&s), Err(Error::TooLarge { .. })));
    assert!(matches!(kernel.span(&s), Err(Error::TooLarge { .. })));
    assert!(kernel.span(&ints(&[1, 2, 4])).is_ok());
}
