use std::collections::hash_map::DefaultHasher;

use serde_json::json;

use super::*;

crate::property_enum! {
	enum Facing {
		North => "north",
		East => "east",
	}
}

fn hash_of(v: &Value) -> u64 {
	let mut h = DefaultHasher::new();
	v.hash(&mut h);
	h.finish()
}

#[test]
fn matches_type_is_strict() {
	assert!(Value::Int(3).matches_type(&ValueType::Int));
	assert!(!Value::Int(3).matches_type(&ValueType::Float));
	assert!(!Value::Float(3.0).matches_type(&ValueType::Int));
	assert!(!Value::String("true".into()).matches_type(&ValueType::Bool));
}

#[test]
fn enum_values_must_name_a_variant() {
	let ty = Facing::value_type();
	assert!(Value::Enum("north".into()).matches_type(&ty));
	assert!(!Value::Enum("up".into()).matches_type(&ty));
	assert!(!Value::String("north".into()).matches_type(&ty));
}

#[test]
fn json_encoding_per_variant() {
	assert_eq!(Value::Bool(true).to_json().unwrap(), json!(true));
	assert_eq!(Value::Int(-7).to_json().unwrap(), json!(-7));
	assert_eq!(Value::Float(1.5).to_json().unwrap(), json!(1.5));
	assert_eq!(Value::from("hi").to_json().unwrap(), json!("hi"));
	assert_eq!(
		Value::Vec3(Vec3i::new(3, 1, 4)).to_json().unwrap(),
		json!({"x": 3, "y": 1, "z": 4})
	);
	assert_eq!(Value::Enum("east".into()).to_json().unwrap(), json!("east"));
}

#[test]
fn non_finite_floats_do_not_encode() {
	assert!(Value::Float(f64::NAN).to_json().is_err());
	assert!(Value::Float(f64::INFINITY).to_json().is_err());
}

#[test]
fn decoding_never_truncates() {
	assert!(Value::from_json(&ValueType::Int, &json!(1.5)).is_err());
	assert!(Value::from_json(&ValueType::Int, &json!("1")).is_err());
	assert!(Value::from_json(&ValueType::Bool, &json!(1)).is_err());
	assert!(Value::from_json(&ValueType::Vec3, &json!({"x": 1, "y": 2})).is_err());
	assert!(Value::from_json(&ValueType::Vec3, &json!({"x": 1, "y": 2, "z": 5_000_000_000_i64})).is_err());
	assert!(Value::from_json(&ValueType::Vec3, &json!({"x": 1, "y": 2, "z": 3, "w": 9})).is_err());
}

#[test]
fn integer_json_widens_into_float() {
	assert_eq!(
		Value::from_json(&ValueType::Float, &json!(2)).unwrap(),
		Value::Float(2.0)
	);
}

#[test]
fn enum_decoding_checks_variants() {
	let ty = Facing::value_type();
	assert_eq!(
		Value::from_json(&ty, &json!("north")).unwrap(),
		Value::Enum("north".into())
	);
	let err = Value::from_json(&ty, &json!("up")).unwrap_err();
	assert!(err.contains("Facing"), "{err}");
}

#[test]
fn property_type_round_trips_through_value() {
	assert_eq!(i64::from_value(&42_i64.into_value()), Some(42));
	assert_eq!(f64::from_value(&0.25_f64.into_value()), Some(0.25));
	assert_eq!(
		String::from_value(&"x".to_string().into_value()),
		Some("x".to_string())
	);
	assert_eq!(Facing::from_value(&Facing::East.into_value()), Some(Facing::East));
	assert_eq!(bool::from_value(&Value::Int(1)), None);
}

#[test]
fn property_enum_helpers() {
	assert_eq!(Facing::VARIANTS, &["north", "east"]);
	assert_eq!(Facing::North.as_str(), "north");
	assert_eq!(Facing::from_name("east"), Some(Facing::East));
	assert_eq!(Facing::from_name("up"), None);
	assert_eq!(
		Facing::value_type(),
		ValueType::Enum(EnumType::new("Facing", &["north", "east"]))
	);
}

#[test]
fn signed_zero_hashes_alike() {
	assert_eq!(Value::Float(0.0), Value::Float(-0.0));
	assert_eq!(hash_of(&Value::Float(0.0)), hash_of(&Value::Float(-0.0)));
	assert_ne!(hash_of(&Value::Int(1)), hash_of(&Value::Bool(true)));
}
