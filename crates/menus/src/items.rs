//! Menu items as seen by the action engine and the menu.

use std::fmt;
use std::rc::Rc;

use crate::actions::{Binding, Result};
use crate::categories::CategoryRef;

/// An object that can appear in a menu.
///
/// Apart from [`MenuItem::action_bindings`] and [`MenuItem::category`] the
/// engine treats items as opaque; the label is for the rendering layer.
pub trait MenuItem {
	fn label(&self) -> &str;

	fn action_bindings(&self) -> &[Binding];

	/// Category this item is grouped under by default.
	fn category(&self) -> Option<CategoryRef> {
		None
	}
}

/// Shared handle to an item. Identity is pointer identity.
pub type ItemRef = Rc<dyn MenuItem>;

/// Returns true if both handles point at the same item.
pub fn same_item(a: &ItemRef, b: &ItemRef) -> bool {
	Rc::ptr_eq(a, b)
}

pub(crate) fn contains_item(items: &[ItemRef], item: &ItemRef) -> bool {
	items.iter().any(|candidate| same_item(candidate, item))
}

type ExecuteFn = Rc<dyn Fn() -> Result<()>>;

/// General purpose item with a name, optional description and category.
pub struct StandardMenuItem {
	name: String,
	description: Option<String>,
	category: Option<CategoryRef>,
	bindings: Vec<Binding>,
	on_execute: Option<ExecuteFn>,
}

impl StandardMenuItem {
	pub fn builder(name: impl Into<String>) -> StandardMenuItemBuilder {
		StandardMenuItemBuilder {
			item: StandardMenuItem {
				name: name.into(),
				description: None,
				category: None,
				bindings: Vec::new(),
				on_execute: None,
			},
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// Runs the item's primary behavior; a no-op for items without one.
	pub fn execute(&self) -> Result<()> {
		match &self.on_execute {
			Some(execute) => execute(),
			None => Ok(()),
		}
	}
}

impl MenuItem for StandardMenuItem {
	fn label(&self) -> &str {
		&self.name
	}

	fn action_bindings(&self) -> &[Binding] {
		&self.bindings
	}

	fn category(&self) -> Option<CategoryRef> {
		self.category.clone()
	}
}

impl fmt::Debug for StandardMenuItem {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("StandardMenuItem")
			.field("name", &self.name)
			.field("description", &self.description)
			.field("category", &self.category.as_ref().map(|c| c.name()))
			.field("bindings", &self.bindings)
			.finish_non_exhaustive()
	}
}

/// Builder for [`StandardMenuItem`].
pub struct StandardMenuItemBuilder {
	item: StandardMenuItem,
}

impl StandardMenuItemBuilder {
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.item.description = Some(description.into());
		self
	}

	pub fn category(mut self, category: CategoryRef) -> Self {
		self.item.category = Some(category);
		self
	}

	pub fn binding(mut self, binding: impl Into<Binding>) -> Self {
		self.item.bindings.push(binding.into());
		self
	}

	pub fn bindings(mut self, bindings: impl IntoIterator<Item = Binding>) -> Self {
		self.item.bindings.extend(bindings);
		self
	}

	pub fn on_execute(mut self, execute: impl Fn() -> Result<()> + 'static) -> Self {
		self.item.on_execute = Some(Rc::new(execute));
		self
	}

	pub fn build(self) -> StandardMenuItem {
		self.item
	}

	/// Builds the item behind a shared [`ItemRef`].
	pub fn into_ref(self) -> ItemRef {
		Rc::new(self.item)
	}
}

/// Header item interleaved before the members of a category.
#[derive(Debug, Clone)]
pub struct CategoryHeaderItem {
	label: String,
	bindings: Vec<Binding>,
}

impl CategoryHeaderItem {
	pub fn new(label: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			bindings: Vec::new(),
		}
	}

	pub fn with_bindings(mut self, bindings: impl IntoIterator<Item = Binding>) -> Self {
		self.bindings.extend(bindings);
		self
	}
}

impl MenuItem for CategoryHeaderItem {
	fn label(&self) -> &str {
		&self.label
	}

	fn action_bindings(&self) -> &[Binding] {
		&self.bindings
	}
}
