//! Reactive menu state: laid out items, selection and cursor.

mod config;
mod context;
mod settings;


use std::cell::RefCell;
use std::fmt;

pub use config::{
	CategoryGroup, CategoryOverflow, GetCategoryFn, MenuCategoryConfig, SortCategoriesFn,
	group_items,
};
pub use context::{
	CONTEXT_TAG, ContextAction, ContextEntry, build_context_menu, context_menu_entries,
};
pub use settings::{MenuSettings, SettingsError};

use self::config::{Layout, layout_items};
use crate::actions::{Action, Result, TagSet};
use crate::items::{ItemRef, contains_item, same_item};
use crate::reactive::{Subject, Subscription};

/// Which part of the menu state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuEvent {
	/// The laid out item sequence changed.
	Items,
	/// The selection changed.
	Selection,
	/// The cursor moved.
	Cursor,
}

struct MenuState {
	source: Vec<ItemRef>,
	config: MenuCategoryConfig,
	items: Vec<ItemRef>,
	is_header: Vec<bool>,
	selected: Vec<ItemRef>,
	cursor: Option<ItemRef>,
}

impl MenuState {
	fn is_member(&self, item: &ItemRef) -> bool {
		self.items
			.iter()
			.zip(&self.is_header)
			.any(|(candidate, header)| !header && same_item(candidate, item))
	}

	fn first_member(&self) -> Option<ItemRef> {
		self.items
			.iter()
			.zip(&self.is_header)
			.find(|(_, header)| !**header)
			.map(|(item, _)| item.clone())
	}

	/// Installs a freshly computed layout and revalidates selection and
	/// cursor against it.
	fn apply_layout(&mut self, layout: Layout) -> Vec<MenuEvent> {
		self.items = layout.items;
		self.is_header = layout.is_header;

		let mut events = vec![MenuEvent::Items];

		let selected = std::mem::take(&mut self.selected);
		let before = selected.len();
		self.selected = selected
			.into_iter()
			.filter(|item| self.is_member(item))
			.collect();
		if self.selected.len() != before {
			events.push(MenuEvent::Selection);
		}

		let cursor_valid = self.cursor.as_ref().is_some_and(|cursor| self.is_member(cursor));
		if !cursor_valid {
			let next = self.first_member();
			let moved = match (&self.cursor, &next) {
				(Some(old), Some(new)) => !same_item(old, new),
				(None, None) => false,
				_ => true,
			};
			self.cursor = next;
			if moved {
				events.push(MenuEvent::Cursor);
			}
		}
		events
	}
}

/// A menu over externally owned items.
///
/// Invariants, re-established on every change to the items or the category
/// config: the selection only contains visible member items, and the cursor
/// is a visible member item or `None` when there are no members. Category
/// headers can neither be selected nor hold the cursor.
pub struct Menu {
	state: RefCell<MenuState>,
	events: Subject<MenuEvent>,
}

impl Menu {
	pub fn new(items: Vec<ItemRef>, config: MenuCategoryConfig) -> Self {
		let mut state = MenuState {
			source: items,
			config,
			items: Vec::new(),
			is_header: Vec::new(),
			selected: Vec::new(),
			cursor: None,
		};
		let layout = layout_items(&state.source, &state.config);
		state.apply_layout(layout);
		Self {
			state: RefCell::new(state),
			events: Subject::new(),
		}
	}

	/// All items including category headers, in display order.
	pub fn items(&self) -> Vec<ItemRef> {
		self.state.borrow().items.clone()
	}

	/// Visible items without category headers, in display order.
	pub fn member_items(&self) -> Vec<ItemRef> {
		let state = self.state.borrow();
		state
			.items
			.iter()
			.zip(&state.is_header)
			.filter(|(_, header)| !**header)
			.map(|(item, _)| item.clone())
			.collect()
	}

	/// Items explicitly selected for batch execution, in selection order.
	pub fn selected(&self) -> Vec<ItemRef> {
		self.state.borrow().selected.clone()
	}

	pub fn cursor(&self) -> Option<ItemRef> {
		self.state.borrow().cursor.clone()
	}

	/// The items an action invoked now applies to: the selection followed by
	/// the cursor when it is not already selected.
	pub fn all_selected(&self) -> Vec<ItemRef> {
		let state = self.state.borrow();
		let mut items = state.selected.clone();
		if let Some(cursor) = &state.cursor
			&& !contains_item(&items, cursor)
		{
			items.push(cursor.clone());
		}
		items
	}

	/// Resolves `action` over [`Menu::all_selected`].
	pub fn resolve<I: Clone + 'static, O: 'static>(&self, action: &Action<I, O>) -> Result<Option<O>> {
		action.get(&self.all_selected())
	}

	/// Resolves `action` over [`Menu::all_selected`] using only bindings
	/// sharing a tag with `tags`.
	pub fn resolve_with_tags<I: Clone + 'static, O: 'static>(
		&self,
		action: &Action<I, O>,
		tags: &TagSet,
	) -> Result<Option<O>> {
		action.get_with_tags(&self.all_selected(), tags)
	}

	/// Registers a listener for future changes.
	#[must_use = "dropping the subscription unsubscribes the listener"]
	pub fn subscribe(&self, listener: impl Fn(&MenuEvent) + 'static) -> Subscription {
		self.events.subscribe(listener)
	}

	/// Replaces the backing items.
	pub fn set_items(&self, items: Vec<ItemRef>) {
		self.relayout(|state| {
			state.source = items;
			true
		});
	}

	/// Inserts `item` at `index` of the backing items, or appends it.
	pub fn add_item(&self, item: ItemRef, index: Option<usize>) {
		self.relayout(|state| {
			let index = index.unwrap_or(state.source.len()).min(state.source.len());
			state.source.insert(index, item);
			true
		});
	}

	/// Removes `item` from the backing items. Returns false if absent.
	pub fn remove_item(&self, item: &ItemRef) -> bool {
		self.relayout(|state| {
			let before = state.source.len();
			state.source.retain(|candidate| !same_item(candidate, item));
			state.source.len() != before
		})
	}

	pub fn set_config(&self, config: MenuCategoryConfig) {
		self.relayout(|state| {
			state.config = config;
			true
		});
	}

	/// Adds `item` to or removes it from the selection.
	///
	/// Returns false, leaving the selection untouched, when `item` is not a
	/// visible member item.
	pub fn set_selected(&self, item: &ItemRef, selected: bool) -> bool {
		let mut accepted = false;
		self.mutate(|state| {
			if !state.is_member(item) {
				tracing::debug!(item = item.label(), "ignoring selection of an item outside the menu");
				return Vec::new();
			}
			accepted = true;
			let present = contains_item(&state.selected, item);
			match (selected, present) {
				(true, false) => state.selected.push(item.clone()),
				(false, true) => state.selected.retain(|candidate| !same_item(candidate, item)),
				_ => return Vec::new(),
			}
			vec![MenuEvent::Selection]
		});
		accepted
	}

	pub fn clear_selection(&self) {
		self.mutate(|state| {
			if state.selected.is_empty() {
				return Vec::new();
			}
			state.selected.clear();
			vec![MenuEvent::Selection]
		});
	}

	/// Moves the cursor to `item`. Returns false if it is not a visible
	/// member item.
	pub fn set_cursor(&self, item: &ItemRef) -> bool {
		let mut accepted = false;
		self.mutate(|state| {
			if !state.is_member(item) {
				tracing::debug!(item = item.label(), "ignoring cursor move to an item outside the menu");
				return Vec::new();
			}
			accepted = true;
			if state.cursor.as_ref().is_some_and(|cursor| same_item(cursor, item)) {
				return Vec::new();
			}
			state.cursor = Some(item.clone());
			vec![MenuEvent::Cursor]
		});
		accepted
	}

	/// Applies `change` to the backing items or config and, if it reports a
	/// change, lays the menu out again.
	///
	/// Category callbacks run with the state released, so they may read the
	/// menu.
	fn relayout(&self, change: impl FnOnce(&mut MenuState) -> bool) -> bool {
		let (source, config) = {
			let mut state = self.state.borrow_mut();
			if !change(&mut state) {
				return false;
			}
			(state.source.clone(), state.config.clone())
		};
		let layout = layout_items(&source, &config);
		let events = self.state.borrow_mut().apply_layout(layout);
		self.notify(&events);
		true
	}

	/// Applies `change` and notifies listeners once the state is released.
	fn mutate(&self, change: impl FnOnce(&mut MenuState) -> Vec<MenuEvent>) {
		let events = change(&mut self.state.borrow_mut());
		self.notify(&events);
	}

	fn notify(&self, events: &[MenuEvent]) {
		for event in events {
			tracing::trace!(?event, "menu changed");
			self.events.emit(event);
		}
	}
}

impl fmt::Debug for Menu {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.state.borrow();
		f.debug_struct("Menu")
			.field("items", &state.items.len())
			.field("selected", &state.selected.len())
			.field("cursor", &state.cursor.as_ref().map(|item| item.label().to_owned()))
			.field("config", &state.config)
			.finish()
	}
}
