use proptest::prelude::*;

use super::*;

#[test]
fn canonical_form_joins_halves() {
	let key = NamespacedKey::new("keystone", "open_speed").unwrap();
	assert_eq!(key.as_str(), "keystone:open_speed");
	assert_eq!(key.namespace(), "keystone");
	assert_eq!(key.name(), "open_speed");
	assert_eq!(key.to_string(), "keystone:open_speed");
}

#[test]
fn parse_splits_on_first_separator() {
	let key = NamespacedKey::parse("mod:door/rotation").unwrap();
	assert_eq!(key.namespace(), "mod");
	assert_eq!(key.name(), "door/rotation");

	// ':' is not a legal name character, so a second separator is rejected
	assert_eq!(
		NamespacedKey::parse("a:b:c"),
		Err(KeyError::InvalidName {
			key: "a:b:c".into(),
			ch: ':'
		})
	);
}

#[test]
fn rejects_malformed_keys() {
	assert!(matches!(
		NamespacedKey::parse("nocolon"),
		Err(KeyError::MissingSeparator(_))
	));
	assert!(matches!(
		NamespacedKey::new("", "x"),
		Err(KeyError::EmptyNamespace(_))
	));
	assert!(matches!(
		NamespacedKey::new("ns", ""),
		Err(KeyError::EmptyName(_))
	));
	assert!(matches!(
		NamespacedKey::new("Upper", "x"),
		Err(KeyError::InvalidNamespace { ch: 'U', .. })
	));
	assert!(matches!(
		NamespacedKey::new("ns/sub", "x"),
		Err(KeyError::InvalidNamespace { ch: '/', .. })
	));
	assert!(matches!(
		NamespacedKey::new("ns", "with space"),
		Err(KeyError::InvalidName { ch: ' ', .. })
	));
}

#[test]
fn keys_are_value_equal() {
	let a = NamespacedKey::new("ns", "speed").unwrap();
	let b = NamespacedKey::parse("ns:speed").unwrap();
	assert_eq!(a, b);
}

#[test]
fn serde_uses_canonical_string() {
	let key = NamespacedKey::new("ns", "speed").unwrap();
	let json = serde_json::to_string(&key).unwrap();
	assert_eq!(json, "\"ns:speed\"");
	let back: NamespacedKey = serde_json::from_str(&json).unwrap();
	assert_eq!(back, key);
	assert!(serde_json::from_str::<NamespacedKey>("\"bad\"").is_err());
}

proptest! {
	#[test]
	fn prop_parse_inverts_display(ns in "[a-z0-9._-]{1,12}", name in "[a-z0-9/._-]{1,16}") {
		let key = NamespacedKey::new(&ns, &name).unwrap();
		let parsed = NamespacedKey::parse(key.as_str()).unwrap();
		prop_assert_eq!(parsed.namespace(), ns.as_str());
		prop_assert_eq!(parsed.name(), name.as_str());
		prop_assert_eq!(parsed, key);
	}
}
