//! Bindings attach concrete data for one action node to an item.

use std::any::Any;
use std::fmt;
use std::rc::{Rc, Weak};

use super::node::{ActionId, ErasedNode};
use super::tags::TagSet;

/// Type-erased binding as stored on items.
///
/// Immutable once created. Cloning shares the same data allocation, so one
/// binding may be attached to several items.
#[derive(Clone)]
pub struct Binding {
	action: Weak<dyn ErasedNode>,
	action_id: ActionId,
	data: Rc<dyn Any>,
	tags: TagSet,
}

impl Binding {
	pub fn action_id(&self) -> ActionId {
		self.action_id
	}

	pub fn tags(&self) -> &TagSet {
		&self.tags
	}

	/// Returns the bound data if it has type `T`.
	pub fn data<T: 'static>(&self) -> Option<&T> {
		self.data.downcast_ref::<T>()
	}

	/// Returns true if both bindings share the same data allocation.
	pub fn ptr_eq(&self, other: &Binding) -> bool {
		Rc::ptr_eq(&self.data, &other.data)
	}

	/// The bound node, if its declaring module still holds it.
	pub(crate) fn node(&self) -> Option<Rc<dyn ErasedNode>> {
		self.action.upgrade()
	}
}

impl fmt::Debug for Binding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Binding")
			.field("action", &self.action_id)
			.field("tags", &self.tags)
			.finish_non_exhaustive()
	}
}

/// Typed binding returned by [`Action::create_binding`].
///
/// Converts into the erased [`Binding`] items store.
///
/// [`Action::create_binding`]: super::Action::create_binding
pub struct ActionBinding<I> {
	data: Rc<I>,
	binding: Binding,
}

impl<I: 'static> ActionBinding<I> {
	pub(crate) fn new(
		action: Weak<dyn ErasedNode>,
		action_id: ActionId,
		data: I,
		tags: TagSet,
	) -> Self {
		let data = Rc::new(data);
		let binding = Binding {
			action,
			action_id,
			data: data.clone() as Rc<dyn Any>,
			tags,
		};
		Self { data, binding }
	}

	pub fn data(&self) -> &I {
		&self.data
	}

	pub fn tags(&self) -> &TagSet {
		&self.binding.tags
	}

	pub fn action_id(&self) -> ActionId {
		self.binding.action_id
	}

	/// Returns the erased binding without consuming the typed handle.
	pub fn binding(&self) -> &Binding {
		&self.binding
	}

	pub fn into_binding(self) -> Binding {
		self.binding
	}
}

impl<I> Clone for ActionBinding<I> {
	fn clone(&self) -> Self {
		Self {
			data: self.data.clone(),
			binding: self.binding.clone(),
		}
	}
}

impl<I: fmt::Debug> fmt::Debug for ActionBinding<I> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ActionBinding")
			.field("action", &self.binding.action_id)
			.field("data", &self.data)
			.field("tags", &self.binding.tags)
			.finish()
	}
}

impl<I: 'static> From<ActionBinding<I>> for Binding {
	fn from(binding: ActionBinding<I>) -> Self {
		binding.into_binding()
	}
}
