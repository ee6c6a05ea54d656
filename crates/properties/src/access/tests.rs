use proptest::prelude::*;

use super::*;

const ALL: [AccessLevel; 5] = [
	AccessLevel::None,
	AccessLevel::Read,
	AccessLevel::Edit,
	AccessLevel::Add,
	AccessLevel::Remove,
];

#[test]
fn bit_positions() {
	assert_eq!(AccessLevel::None.as_flags().bits(), 0);
	assert_eq!(AccessLevel::Read.as_flags().bits(), 1);
	assert_eq!(AccessLevel::Edit.as_flags().bits(), 2);
	assert_eq!(AccessLevel::Add.as_flags().bits(), 4);
	assert_eq!(AccessLevel::Remove.as_flags().bits(), 8);
}

#[test]
fn named_composites() {
	assert_eq!(AccessLevelFlags::READ_ONLY, AccessLevelFlags::READ);
	assert_eq!(
		AccessLevelFlags::USER_EDITABLE,
		AccessLevelFlags::READ | AccessLevelFlags::EDIT
	);
	assert_eq!(AccessLevelFlags::HIDDEN.bits(), 0);
}

#[test]
fn has_flag_is_containment() {
	let flags = AccessLevelFlags::USER_EDITABLE;
	assert!(flags.has_flag(AccessLevel::Read));
	assert!(flags.has_flag(AccessLevel::Edit));
	assert!(!flags.has_flag(AccessLevel::Add));
	// the empty bit pattern is contained in everything
	assert!(AccessLevelFlags::HIDDEN.has_flag(AccessLevel::None));
}

#[test]
fn empty_level_sets() {
	assert!(AccessLevelFlags::HIDDEN.has_flags(&[]));
	assert!(!AccessLevelFlags::all().has_one_flag_of(&[]));
	assert_eq!(AccessLevelFlags::flags_of(&[]), AccessLevelFlags::empty());
}

#[test]
fn flags_of_tolerates_duplicates() {
	let flags = AccessLevelFlags::flags_of(&[
		AccessLevel::Read,
		AccessLevel::Read,
		AccessLevel::Remove,
		AccessLevel::None,
	]);
	assert_eq!(flags.bits(), 0b1001);
}

#[test]
fn has_one_flag_of_needs_a_real_bit() {
	let flags = AccessLevelFlags::READ_ONLY;
	assert!(flags.has_one_flag_of(&[AccessLevel::Edit, AccessLevel::Read]));
	assert!(!flags.has_one_flag_of(&[AccessLevel::Edit, AccessLevel::None]));
}

fn arb_levels() -> impl Strategy<Value = Vec<AccessLevel>> {
	prop::collection::vec(prop::sample::select(ALL.to_vec()), 0..12)
}

proptest! {
	#[test]
	fn prop_flags_of_satisfies_has_flags(levels in arb_levels()) {
		let flags = AccessLevelFlags::flags_of(&levels);
		prop_assert!(flags.has_flags(&levels));
	}

	#[test]
	fn prop_nothing_intersects_zero(levels in arb_levels()) {
		prop_assume!(!levels.is_empty());
		prop_assert!(!AccessLevelFlags::empty().has_one_flag_of(&levels));
	}

	#[test]
	fn prop_flags_of_matches_iterator_collect(levels in arb_levels()) {
		let collected: AccessLevelFlags = levels.iter().copied().collect();
		prop_assert_eq!(AccessLevelFlags::flags_of(&levels), collected);
	}
}
