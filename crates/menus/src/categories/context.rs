//! Progress categories for context menus ("2/5 of the selection").

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap as HashMap;

use super::{Category, CategoryRef};
use crate::items::{CategoryHeaderItem, ItemRef};

/// Builds the category for context entries supported by `count` of the
/// `total_count` selected items.
pub fn create_context_category(count: usize, total_count: usize) -> Category {
	let header: ItemRef = Rc::new(CategoryHeaderItem::new(format!("{count}/{total_count}")));
	Category::new(
		format!("Context menu category {count}/{total_count}"),
		"The category for context menu items indicating how many are correct",
	)
	.with_item(header)
}

/// Memoizes [`create_context_category`] by `(count, total_count)`.
///
/// Entries are immutable and never evicted: the key space is bounded by
/// realistic selection sizes, and handing out the same category lets the
/// menu group entries by identity. The cache is an owned value so each
/// menu subsystem, and each test, can hold its own.
#[derive(Debug, Default)]
pub struct ContextCategoryCache {
	entries: RefCell<HashMap<usize, HashMap<usize, CategoryRef>>>,
}

impl ContextCategoryCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the cached category for the pair, creating it on first use.
	pub fn get(&self, count: usize, total_count: usize) -> CategoryRef {
		if let Some(category) = self
			.entries
			.borrow()
			.get(&count)
			.and_then(|by_total| by_total.get(&total_count))
		{
			return category.clone();
		}

		tracing::trace!(count, total_count, "creating context category");
		let category = create_context_category(count, total_count).into_ref();
		self.entries
			.borrow_mut()
			.entry(count)
			.or_default()
			.insert(total_count, category.clone());
		category
	}

	/// Number of cached categories.
	pub fn len(&self) -> usize {
		self.entries.borrow().values().map(HashMap::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Drops every cached category.
	pub fn clear(&self) {
		self.entries.borrow_mut().clear();
	}
}
