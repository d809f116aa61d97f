//! Category configuration and the grouping pass that lays out menu items.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::categories::{Category, CategoryRef, same_category};
use crate::items::ItemRef;

/// Items sharing one category, in their original order.
#[derive(Clone)]
pub struct CategoryGroup {
	/// `None` is the uncategorized group.
	pub category: Option<CategoryRef>,
	pub items: Vec<ItemRef>,
}

impl fmt::Debug for CategoryGroup {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CategoryGroup")
			.field("category", &self.category.as_ref().map(|c| c.name()))
			.field("items", &self.items.len())
			.finish()
	}
}

/// What happens to the members of a group beyond the item cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryOverflow {
	/// Show the first `cap` members and omit the rest.
	#[default]
	DropTail,
	/// Show the n-th window of `cap` members (zero based).
	Page(usize),
}

impl CategoryOverflow {
	fn window<'a>(self, items: &'a [ItemRef], cap: Option<usize>) -> &'a [ItemRef] {
		let Some(cap) = cap else {
			return items;
		};
		let start = match self {
			Self::DropTail => 0,
			Self::Page(page) => page.saturating_mul(cap),
		};
		let start = start.min(items.len());
		let end = start.saturating_add(cap).min(items.len());
		&items[start..end]
	}
}

pub type GetCategoryFn = Rc<dyn Fn(&ItemRef) -> Option<CategoryRef>>;
pub type SortCategoriesFn = Rc<dyn Fn(&[CategoryGroup]) -> Vec<Option<CategoryRef>>>;

/// Configuration for the categories in a menu.
#[derive(Clone, Default)]
pub struct MenuCategoryConfig {
	get_category: Option<GetCategoryFn>,
	sort_categories: Option<SortCategoriesFn>,
	max_category_item_count: Option<usize>,
	overflow: CategoryOverflow,
}

impl MenuCategoryConfig {
	pub fn new() -> Self {
		Self::default()
	}

	/// Overrides how items map to categories. Defaults to
	/// [`MenuItem::category`](crate::items::MenuItem::category).
	pub fn with_get_category(
		mut self,
		get_category: impl Fn(&ItemRef) -> Option<CategoryRef> + 'static,
	) -> Self {
		self.get_category = Some(Rc::new(get_category));
		self
	}

	/// Sets the category order. Defaults to first appearance.
	///
	/// Groups missing from the returned order keep their first-appearance
	/// order after the listed ones.
	pub fn with_sort_categories(
		mut self,
		sort: impl Fn(&[CategoryGroup]) -> Vec<Option<CategoryRef>> + 'static,
	) -> Self {
		self.sort_categories = Some(Rc::new(sort));
		self
	}

	pub fn with_max_category_item_count(mut self, max: usize) -> Self {
		self.max_category_item_count = Some(max);
		self
	}

	pub fn with_overflow(mut self, overflow: CategoryOverflow) -> Self {
		self.overflow = overflow;
		self
	}

	pub fn max_category_item_count(&self) -> Option<usize> {
		self.max_category_item_count
	}

	pub fn overflow(&self) -> CategoryOverflow {
		self.overflow
	}

	pub fn category_of(&self, item: &ItemRef) -> Option<CategoryRef> {
		match &self.get_category {
			Some(get_category) => get_category(item),
			None => item.category(),
		}
	}
}

impl fmt::Debug for MenuCategoryConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MenuCategoryConfig")
			.field("get_category", &self.get_category.is_some())
			.field("sort_categories", &self.sort_categories.is_some())
			.field("max_category_item_count", &self.max_category_item_count)
			.field("overflow", &self.overflow)
			.finish()
	}
}

/// Flattened menu sequence plus which entries are category headers.
pub(crate) struct Layout {
	pub(crate) items: Vec<ItemRef>,
	pub(crate) is_header: Vec<bool>,
}

/// Groups `items` by category and returns the flattened sequence with each
/// non-empty group preceded by its category's header item.
pub fn group_items(items: &[ItemRef], config: &MenuCategoryConfig) -> Vec<ItemRef> {
	layout_items(items, config).items
}

pub(crate) fn layout_items(items: &[ItemRef], config: &MenuCategoryConfig) -> Layout {
	let mut by_category: IndexMap<Option<*const Category>, CategoryGroup> = IndexMap::new();
	for item in items {
		let category = config.category_of(item);
		by_category
			.entry(category.as_ref().map(Rc::as_ptr))
			.or_insert_with(|| CategoryGroup {
				category,
				items: Vec::new(),
			})
			.items
			.push(item.clone());
	}

	let groups: Vec<CategoryGroup> = by_category
		.into_values()
		.map(|group| CategoryGroup {
			items: config
				.overflow
				.window(&group.items, config.max_category_item_count)
				.to_vec(),
			category: group.category,
		})
		.collect();

	let groups = match &config.sort_categories {
		Some(sort) => {
			let order = sort(&groups);
			apply_order(groups, &order)
		}
		None => groups,
	};

	let mut layout = Layout {
		items: Vec::with_capacity(items.len() + groups.len()),
		is_header: Vec::with_capacity(items.len() + groups.len()),
	};
	for group in groups {
		if group.items.is_empty() {
			continue;
		}
		if let Some(category) = &group.category {
			layout.items.push(category.item().clone());
			layout.is_header.push(true);
		}
		layout.is_header.extend(std::iter::repeat_n(false, group.items.len()));
		layout.items.extend(group.items);
	}
	layout
}

fn apply_order(groups: Vec<CategoryGroup>, order: &[Option<CategoryRef>]) -> Vec<CategoryGroup> {
	let mut remaining: Vec<Option<CategoryGroup>> = groups.into_iter().map(Some).collect();
	let mut ordered = Vec::with_capacity(remaining.len());

	for wanted in order {
		let found = remaining.iter_mut().find(|slot| {
			slot.as_ref()
				.is_some_and(|group| same_category(group.category.as_ref(), wanted.as_ref()))
		});
		if let Some(group) = found.and_then(Option::take) {
			ordered.push(group);
		}
	}

	ordered.extend(remaining.into_iter().flatten());
	ordered
}
