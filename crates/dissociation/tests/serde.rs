//! JSON shape of the public result types.

#![cfg(feature = "serde")]

use dissociation::group::{Additive, Rational};
use dissociation::{check, extract_basis, Collection, Limits, PreconditionCheck};

#[test]
fn witness_json_shape() {
    let s: Collection<_> = [1i64, 2, 3].into_iter().map(Additive).collect();
    let verdict = check(&s).unwrap();
    let json = serde_json::to_value(&verdict).unwrap();
    assert_eq!(json["status"], "not-dissociated");
    assert!(json["witness"]["left"].is_array());
    assert!(json["witness"]["right"].is_array());

    let dissociated: Collection<_> = [1i64, 2].into_iter().map(Additive).collect();
    let json = serde_json::to_value(check(&dissociated).unwrap()).unwrap();
    assert_eq!(json["status"], "dissociated");
}

#[test]
fn basis_survives_json() {
    let s: Collection<Rational> = [2i128, 3, 6]
        .into_iter()
        .map(|n| Rational::from_integer(n).unwrap())
        .collect();
    let basis = extract_basis(&s, 2).unwrap();
    let text = serde_json::to_string(&basis).unwrap();
    let back: dissociation::Basis<Rational> = serde_json::from_str(&text).unwrap();
    assert_eq!(back, basis);
    assert!(back.verify(&s, 2));
}

#[test]
fn rationals_serialize_as_text() {
    let r = Rational::new(-3, 4).unwrap();
    assert_eq!(serde_json::to_value(&r).unwrap(), "-3/4");

    let text = "1606938044258990275541962092341162602522202993782792835301376";
    let big: Rational = serde_json::from_value(serde_json::json!(text)).unwrap();
    assert_eq!(big.to_string(), text);
    assert!(serde_json::from_str::<Rational>(r#""0""#).is_err());
}

#[test]
fn limits_fill_defaults() {
    let limits: Limits = serde_json::from_str(r#"{"precondition": "trusted"}"#).unwrap();
    assert_eq!(limits.precondition, PreconditionCheck::Trusted);
    assert_eq!(limits.max_check_width, Limits::DEFAULT_CHECK_WIDTH);
    assert!(serde_json::from_str::<Limits>(r#"{"max_width": 3}"#).is_err());
}
