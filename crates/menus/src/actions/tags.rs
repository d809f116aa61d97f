//! Binding tags used to narrow which bindings a resolution considers.

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

/// A single binding tag, e.g. `"context"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(Cow<'static, str>);

impl Tag {
	/// Creates a tag from a static name without allocating.
	pub const fn new(name: &'static str) -> Self {
		Self(Cow::Borrowed(name))
	}

	/// Creates a tag from an owned name.
	pub fn owned(name: impl Into<String>) -> Self {
		Self(Cow::Owned(name.into()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Tag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&'static str> for Tag {
	fn from(name: &'static str) -> Self {
		Self::new(name)
	}
}

/// Ordered, duplicate-free set of tags attached to an action or binding.
///
/// Sets are tiny in practice, so membership is a linear scan over inline
/// storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TagSet(SmallVec<[Tag; 2]>);

impl TagSet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, tag: impl Into<Tag>) -> bool {
		let tag = tag.into();
		if self.contains(&tag) {
			return false;
		}
		self.0.push(tag);
		true
	}

	pub fn contains(&self, tag: &Tag) -> bool {
		self.0.iter().any(|t| t == tag)
	}

	/// Returns true if at least one tag is shared with `other`.
	pub fn intersects(&self, other: &TagSet) -> bool {
		self.0.iter().any(|t| other.contains(t))
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Tag> {
		self.0.iter()
	}
}

impl<T: Into<Tag>> FromIterator<T> for TagSet {
	fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
		let mut set = Self::new();
		for tag in iter {
			set.insert(tag);
		}
		set
	}
}

impl<T: Into<Tag>, const N: usize> From<[T; N]> for TagSet {
	fn from(tags: [T; N]) -> Self {
		tags.into_iter().collect()
	}
}

impl fmt::Display for TagSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("[")?;
		for (i, tag) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			f.write_str(tag.as_str())?;
		}
		f.write_str("]")
	}
}
