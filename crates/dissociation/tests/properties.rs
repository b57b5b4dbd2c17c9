//! Property-based tests for the dissociation kernel.
//!
//! Uses proptest to check the algebraic guarantees on small random sets of
//! integers (under addition) and bit vectors (under XOR). Element ranges are
//! kept narrow so collisions are common and both verdicts get exercised.

use dissociation::group::{Additive, CommutativeGroup, Xor};
use dissociation::{
    check, dissociation_number, extract_basis, is_dissociated, maximal_dissociated_subset,
    quotient_in_span, quotient_set, reduce_to_disjoint, represent, span, Collection, Error,
    SubsetMask,
};
use proptest::collection::vec;
use proptest::prelude::*;

fn int_set(max_len: usize) -> impl Strategy<Value = Collection<Additive<i64>>> {
    vec(-12i64..=12, 0..=max_len).prop_map(|xs| xs.into_iter().map(Additive).collect())
}

fn xor_set(max_len: usize) -> impl Strategy<Value = Collection<Xor>> {
    vec(0u64..32, 0..=max_len).prop_map(|xs| xs.into_iter().map(Xor).collect())
}

// =============================================================================
// Span Properties
// =============================================================================

proptest! {
    /// S ⊆ Span(S)
    #[test]
    fn prop_span_contains_base(s in int_set(7)) {
        let sp = span(&s).unwrap();
        prop_assert!(s.is_subset(&sp));
        prop_assert!(sp.contains(&Additive::identity()));
    }

    /// Span(S) is symmetric under inversion
    #[test]
    fn prop_span_closed_under_inverse(s in int_set(6)) {
        let sp = span(&s).unwrap();
        prop_assert_eq!(sp.inverted(), sp);
    }

    /// Span(S) = {∏t · (∏u)⁻¹ : t, u ⊆ S}
    #[test]
    fn prop_span_equals_quotient_set(s in int_set(6)) {
        prop_assert_eq!(span(&s).unwrap(), quotient_set(&s).unwrap());
    }

    /// Span(S) ⊆ Span(Span(S)), equality not required
    #[test]
    fn prop_span_of_span_contains_span(s in int_set(2)) {
        let once = span(&s).unwrap();
        let twice = span(&once).unwrap();
        prop_assert!(once.is_subset(&twice));
    }

    /// Every span value has a representation that evaluates back to it
    #[test]
    fn prop_represent_round_trip(s in int_set(5), pick in any::<prop::sample::Index>()) {
        let sp = span(&s).unwrap();
        let target = sp.as_slice()[pick.index(sp.len())];
        let c = represent(&target, &s).unwrap().expect("target is in the span");
        prop_assert_eq!(c.evaluate(), target);
        prop_assert!(c.support().is_subset(&s));
    }

    /// quotient_in_span(t, u) evaluates to ∏t · (∏u)⁻¹
    #[test]
    fn prop_quotient_in_span(s in int_set(8), t_bits: u64, u_bits: u64) {
        let full = SubsetMask::full(s.len()).bits();
        let t = s.select(SubsetMask::from_bits(t_bits & full));
        let u = s.select(SubsetMask::from_bits(u_bits & full));
        let c = quotient_in_span(&t, &u);
        prop_assert_eq!(c.evaluate(), t.product().quotient(&u.product()));
    }
}

// =============================================================================
// Dissociation Properties
// =============================================================================

proptest! {
    /// Not dissociated iff a valid disjoint witness is returned
    #[test]
    fn prop_witness_round_trip(s in int_set(9)) {
        let verdict = check(&s).unwrap();
        match verdict.witness() {
            Some(w) => {
                prop_assert!(w.verify(&s));
                prop_assert_ne!(w.left(), w.right());
                prop_assert!(w.left().is_disjoint(w.right()));
                prop_assert_eq!(w.left().product(), w.right().product());
            }
            None => {
                let values: Collection<_> = SubsetMask::all(s.len())
                    .map(|m| s.select(m).product())
                    .collect();
                prop_assert_eq!(values.len(), 1usize << s.len());
            }
        }
    }

    /// Dissociated(S) ⇒ Dissociated(T) for every T ⊆ S
    #[test]
    fn prop_monotone(s in int_set(7), bits: u64) {
        let t = s.select(SubsetMask::from_bits(bits & SubsetMask::full(s.len()).bits()));
        if is_dissociated(&s).unwrap() {
            prop_assert!(is_dissociated(&t).unwrap());
        }
        if !is_dissociated(&t).unwrap() {
            prop_assert!(!is_dissociated(&s).unwrap());
        }
    }

    /// Dissociated(S⁻¹) ⇔ Dissociated(S)
    #[test]
    fn prop_inversion_symmetry(s in int_set(8)) {
        prop_assert_eq!(is_dissociated(&s).unwrap(), is_dissociated(&s.inverted()).unwrap());
    }

    /// Singletons are dissociated exactly when not the identity
    #[test]
    fn prop_singletons(x in -5i64..=5) {
        let s = Collection::singleton(Additive(x));
        prop_assert_eq!(is_dissociated(&s).unwrap(), x != 0);
    }

    /// Removing the common part of two colliding collections keeps them colliding
    #[test]
    fn prop_reduce_to_disjoint(s in int_set(8), t_bits: u64, u_bits: u64) {
        let full = SubsetMask::full(s.len()).bits();
        let t = s.select(SubsetMask::from_bits(t_bits & full));
        let u = s.select(SubsetMask::from_bits(u_bits & full));
        match reduce_to_disjoint(&t, &u) {
            None => {
                prop_assert_eq!(t, u);
            }
            Some(w) => {
                prop_assert!(w.left().is_disjoint(w.right()));
                prop_assert_eq!(
                    w.left().product().quotient(&w.right().product()),
                    t.product().quotient(&u.product())
                );
            }
        }
    }
}

// =============================================================================
// Extraction Properties
// =============================================================================

proptest! {
    /// With the true dissociation number as bound, extraction succeeds and
    /// every element re-derives from its certificate
    #[test]
    fn prop_extraction_correct(s in int_set(7)) {
        let d = dissociation_number(&s).unwrap();
        let basis = extract_basis(&s, d).unwrap();
        prop_assert!(basis.verify(&s, d));
        prop_assert!(basis.elements().is_subset(&s));
        prop_assert!(basis.len() <= d);
        prop_assert!(s.is_subset(&span(basis.elements()).unwrap()));
    }

    /// Any bound below the dissociation number is rejected
    #[test]
    fn prop_extraction_rejects_false_bound(s in int_set(6)) {
        let d = dissociation_number(&s).unwrap();
        if d > 0 {
            let rejected = matches!(
                extract_basis(&s, d - 1),
                Err(Error::PreconditionViolation { .. })
            );
            prop_assert!(rejected);
        }
    }

    /// The greedy subset is dissociated and cannot be extended
    #[test]
    fn prop_greedy_is_maximal(s in xor_set(8)) {
        let m = maximal_dissociated_subset(&s).unwrap();
        prop_assert!(is_dissociated(&m).unwrap());
        for a in s.difference(&m) {
            prop_assert!(!is_dissociated(&m.insert(a)).unwrap());
        }
    }

    /// Over 𝔽₂ vectors, dissociation is linear independence, so the basis
    /// size equals the rank of S
    #[test]
    fn prop_xor_basis_is_rank(s in xor_set(8)) {
        let d = dissociation_number(&s).unwrap();
        let basis = extract_basis(&s, d).unwrap();
        prop_assert_eq!(basis.len(), d);
        prop_assert_eq!(span(basis.elements()).unwrap().len(), 1usize << d);
    }
}
