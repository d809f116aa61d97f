//! Context menus: the actions a selection supports, grouped by how many of
//! the selected items support each one.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap as HashMap;

use super::config::MenuCategoryConfig;
use super::Menu;
use crate::actions::{Action, Executable, Result, Tag, TagSet};
use crate::categories::{CategoryRef, ContextCategoryCache};
use crate::items::ItemRef;

/// Tag a binding must carry to take part in a context menu.
pub const CONTEXT_TAG: Tag = Tag::new("context");

/// An action that can contribute an entry to a context menu.
///
/// Only bindings sharing a tag with `tags` are considered, both when
/// counting support and when resolving.
pub trait ContextAction {
	/// Number of items in `selection` that support the action.
	fn applicable_count(&self, selection: &[ItemRef], tags: &TagSet) -> usize;

	/// Resolves the action over `selection` and returns the menu item of the
	/// result, if the action applies and its result provides one.
	fn context_item(&self, selection: &[ItemRef], tags: &TagSet) -> Result<Option<ItemRef>>;
}

impl<I, O> ContextAction for Action<I, O>
where
	I: Clone + 'static,
	O: Executable + 'static,
{
	fn applicable_count(&self, selection: &[ItemRef], tags: &TagSet) -> usize {
		self.applicable_count_with_tags(selection, tags)
	}

	fn context_item(&self, selection: &[ItemRef], tags: &TagSet) -> Result<Option<ItemRef>> {
		Ok(self
			.get_with_tags(selection, tags)?
			.and_then(|result| result.menu_item()))
	}
}

/// One context menu entry.
#[derive(Clone)]
pub struct ContextEntry {
	pub item: ItemRef,
	/// The `count/total` category the entry is grouped under.
	pub category: CategoryRef,
	/// How many selected items support the entry's action.
	pub count: usize,
}

impl fmt::Debug for ContextEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ContextEntry")
			.field("item", &self.item.label())
			.field("category", &self.category.name())
			.field("count", &self.count)
			.finish()
	}
}

/// Resolves every applicable action in `actions` over `selection`, using
/// only bindings tagged [`CONTEXT_TAG`].
///
/// Entries keep the order of `actions`. Faults from any action abort the
/// whole pass.
pub fn context_menu_entries(
	actions: &[&dyn ContextAction],
	selection: &[ItemRef],
	cache: &ContextCategoryCache,
) -> Result<Vec<ContextEntry>> {
	let tags = TagSet::from([CONTEXT_TAG]);
	let total = selection.len();
	let mut entries = Vec::new();
	for action in actions {
		let count = action.applicable_count(selection, &tags);
		if count == 0 {
			continue;
		}
		let Some(item) = action.context_item(selection, &tags)? else {
			continue;
		};
		entries.push(ContextEntry {
			item,
			category: cache.get(count, total),
			count,
		});
	}
	tracing::debug!(total, entries = entries.len(), "built context menu entries");
	Ok(entries)
}

/// Builds a menu of context entries, categories ordered by descending count.
pub fn build_context_menu(
	actions: &[&dyn ContextAction],
	selection: &[ItemRef],
	cache: &ContextCategoryCache,
) -> Result<Menu> {
	let entries = context_menu_entries(actions, selection, cache)?;

	let mut category_of: HashMap<*const (), CategoryRef> = HashMap::default();
	let mut count_of: HashMap<*const (), usize> = HashMap::default();
	for entry in &entries {
		category_of.insert(Rc::as_ptr(&entry.item).cast::<()>(), entry.category.clone());
		count_of.insert(Rc::as_ptr(&entry.category).cast::<()>(), entry.count);
	}

	let config = MenuCategoryConfig::new()
		.with_get_category(move |item| category_of.get(&Rc::as_ptr(item).cast::<()>()).cloned())
		.with_sort_categories(move |groups| {
			let mut order: Vec<_> = groups.iter().map(|group| group.category.clone()).collect();
			order.sort_by_key(|category| {
				let count = category
					.as_ref()
					.and_then(|c| count_of.get(&Rc::as_ptr(c).cast::<()>()))
					.copied()
					.unwrap_or(0);
				std::cmp::Reverse(count)
			});
			order
		});

	Ok(Menu::new(entries.into_iter().map(|entry| entry.item).collect(), config))
}
