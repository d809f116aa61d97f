//! Categories group menu items under a shared header.

mod context;

#[cfg(test)]
mod tests;

use std::fmt;
use std::rc::Rc;

pub use context::{ContextCategoryCache, create_context_category};

use crate::actions::Binding;
use crate::items::{CategoryHeaderItem, ItemRef};

/// A named grouping of menu items.
pub struct Category {
	name: String,
	description: String,
	item: ItemRef,
	bindings: Vec<Binding>,
}

/// Shared handle to a category. Identity is pointer identity.
pub type CategoryRef = Rc<Category>;

impl Category {
	/// Creates a category whose header shows its name.
	pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
		let name = name.into();
		let item: ItemRef = Rc::new(CategoryHeaderItem::new(name.clone()));
		Self {
			name,
			description: description.into(),
			item,
			bindings: Vec::new(),
		}
	}

	/// Replaces the header item template.
	pub fn with_item(mut self, item: ItemRef) -> Self {
		self.item = item;
		self
	}

	pub fn with_bindings(mut self, bindings: impl IntoIterator<Item = Binding>) -> Self {
		self.bindings.extend(bindings);
		self
	}

	pub fn into_ref(self) -> CategoryRef {
		Rc::new(self)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn description(&self) -> &str {
		&self.description
	}

	/// Header item placed before the category's members.
	pub fn item(&self) -> &ItemRef {
		&self.item
	}

	pub fn bindings(&self) -> &[Binding] {
		&self.bindings
	}
}

impl fmt::Debug for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Category")
			.field("name", &self.name)
			.field("description", &self.description)
			.field("header", &self.item.label())
			.field("bindings", &self.bindings)
			.finish()
	}
}

/// Compares two optional categories by identity; `None` matches only `None`.
pub fn same_category(a: Option<&CategoryRef>, b: Option<&CategoryRef>) -> bool {
	match (a, b) {
		(Some(a), Some(b)) => Rc::ptr_eq(a, b),
		(None, None) => true,
		_ => false,
	}
}
