//! Terminal action results.

use std::fmt;
use std::rc::Rc;

use super::error::Result;
use crate::items::ItemRef;

/// The user-facing outcome of resolving a terminal action.
///
/// Resolution itself is side-effect free; anything the action does happens
/// later, when a collaborator calls [`Executable::execute`].
pub trait Executable {
	fn execute(&self) -> Result<()>;

	/// Item presenting this result in a menu, e.g. a context menu entry.
	fn menu_item(&self) -> Option<ItemRef> {
		None
	}
}

impl<E: Executable + ?Sized> Executable for Box<E> {
	fn execute(&self) -> Result<()> {
		(**self).execute()
	}

	fn menu_item(&self) -> Option<ItemRef> {
		(**self).menu_item()
	}
}

impl<E: Executable + ?Sized> Executable for Rc<E> {
	fn execute(&self) -> Result<()> {
		(**self).execute()
	}

	fn menu_item(&self) -> Option<ItemRef> {
		(**self).menu_item()
	}
}

/// Closure-backed [`Executable`].
#[derive(Clone)]
pub struct ExecutableResult {
	execute: Rc<dyn Fn() -> Result<()>>,
	menu_item: Option<ItemRef>,
}

impl ExecutableResult {
	pub fn new(execute: impl Fn() -> Result<()> + 'static) -> Self {
		Self {
			execute: Rc::new(execute),
			menu_item: None,
		}
	}

	pub fn with_menu_item(mut self, item: ItemRef) -> Self {
		self.menu_item = Some(item);
		self
	}

	/// Shares the execute step, e.g. with the menu item built for it.
	pub fn execute_fn(&self) -> Rc<dyn Fn() -> Result<()>> {
		self.execute.clone()
	}
}

impl Executable for ExecutableResult {
	fn execute(&self) -> Result<()> {
		(self.execute)()
	}

	fn menu_item(&self) -> Option<ItemRef> {
		self.menu_item.clone()
	}
}

impl fmt::Debug for ExecutableResult {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ExecutableResult")
			.field("menu_item", &self.menu_item.as_ref().map(|item| item.label().to_owned()))
			.finish_non_exhaustive()
	}
}
