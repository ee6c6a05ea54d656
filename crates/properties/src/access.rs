/// A single permission a caller may hold on a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessLevel {
	/// No permission. Carries no bit.
	None,
	/// Permission to observe the value.
	Read,
	/// Permission to change an existing value.
	Edit,
	/// Permission to add the property to an owner.
	Add,
	/// Permission to remove the property from an owner.
	Remove,
}

bitflags::bitflags! {
	/// Who may read, edit, add or remove a property.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct AccessLevelFlags: u8 {
		/// Permission to observe the value.
		const READ = 1 << 0;
		/// Permission to change an existing value.
		const EDIT = 1 << 1;
		/// Permission to add the property to an owner.
		const ADD = 1 << 2;
		/// Permission to remove the property from an owner.
		const REMOVE = 1 << 3;

		/// Visible but not changeable.
		const READ_ONLY = Self::READ.bits();
		/// Visible and changeable by users.
		const USER_EDITABLE = Self::READ.bits() | Self::EDIT.bits();
	}
}

impl AccessLevel {
	/// Returns the bitflag for this level. [`AccessLevel::None`] maps to the empty set.
	pub const fn as_flags(self) -> AccessLevelFlags {
		match self {
			Self::None => AccessLevelFlags::empty(),
			Self::Read => AccessLevelFlags::READ,
			Self::Edit => AccessLevelFlags::EDIT,
			Self::Add => AccessLevelFlags::ADD,
			Self::Remove => AccessLevelFlags::REMOVE,
		}
	}
}

impl AccessLevelFlags {
	/// No access at all; the property is invisible to users.
	pub const HIDDEN: Self = Self::empty();

	/// Returns true if every bit of `level` is set.
	#[inline]
	pub const fn has_flag(self, level: AccessLevel) -> bool {
		self.contains(level.as_flags())
	}

	/// Returns true if every level's bit is set. Vacuously true for no levels.
	pub fn has_flags(self, levels: &[AccessLevel]) -> bool {
		levels.iter().all(|&level| self.has_flag(level))
	}

	/// Returns true if at least one level's bit is set. Vacuously false for no levels.
	pub fn has_one_flag_of(self, levels: &[AccessLevel]) -> bool {
		levels.iter().any(|&level| self.intersects(level.as_flags()))
	}

	/// OR-reduces `levels` into a single flag value; duplicates are harmless.
	pub fn flags_of(levels: &[AccessLevel]) -> Self {
		levels.iter().copied().collect()
	}
}

impl From<AccessLevel> for AccessLevelFlags {
	fn from(level: AccessLevel) -> Self {
		level.as_flags()
	}
}

impl FromIterator<AccessLevel> for AccessLevelFlags {
	fn from_iter<I: IntoIterator<Item = AccessLevel>>(iter: I) -> Self {
		let mut flags = AccessLevelFlags::empty();
		for level in iter {
			flags |= level.as_flags();
		}
		flags
	}
}

#[cfg(test)]
mod tests;
