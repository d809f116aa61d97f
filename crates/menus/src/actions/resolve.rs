//! Resolution of an action node over a sequence of items.
//!
//! Every item contributes independently. A binding either targets the node
//! itself, in which case its data becomes one input, or targets a handler
//! somewhere below it. Handler bindings are grouped by the child of the
//! resolving node that leads to them; each group is resolved recursively by
//! that child and yields a single input, placed where the group's first item
//! sits. Inputs are never reordered or deduplicated.

use std::collections::hash_map::Entry;
use std::rc::Rc;

use rustc_hash::FxHashMap as HashMap;

use super::binding::Binding;
use super::error::Result;
use super::node::{ActionId, ActionNode, ErasedNode};
use super::tags::TagSet;
use crate::items::{ItemRef, same_item};

/// How a binding reaches the node being resolved.
enum Target {
	/// The binding is for the node itself.
	Direct,
	/// The binding is for a descendant reached through this child.
	Via(Rc<dyn ErasedNode>),
}

enum Slot<I> {
	Value { data: I, source: ItemRef },
	Group { child: Rc<dyn ErasedNode>, sources: Vec<ItemRef> },
}

impl<I: Clone + 'static, O: 'static> ActionNode<I, O> {
	pub(crate) fn resolve(&self, items: &[ItemRef], filter: Option<&TagSet>) -> Result<Option<O>> {
		let (data, sources) = self.collect_inputs(items, filter)?;
		if data.is_empty() {
			tracing::trace!(action = %self.id, items = items.len(), "action not applicable");
			return Ok(None);
		}

		tracing::trace!(action = %self.id, inputs = data.len(), "reducing action inputs");
		(self.core)(data.as_slice(), sources.as_slice()).map(Some)
	}

	pub(crate) fn accepts_item(&self, item: &ItemRef, filter: Option<&TagSet>) -> bool {
		item.action_bindings()
			.iter()
			.any(|binding| passes_filter(binding, filter) && self.target_of(binding).is_some())
	}

	fn collect_inputs(
		&self,
		items: &[ItemRef],
		filter: Option<&TagSet>,
	) -> Result<(Vec<I>, Vec<Vec<ItemRef>>)> {
		let mut slots: Vec<Slot<I>> = Vec::new();
		let mut groups: HashMap<ActionId, usize> = HashMap::default();

		for item in items {
			for binding in item.action_bindings() {
				if !passes_filter(binding, filter) {
					continue;
				}

				match self.target_of(binding) {
					None => {}
					Some(Target::Direct) => {
						let Some(data) = binding.data::<I>() else {
							tracing::warn!(action = %self.id, "binding data does not match action input type");
							continue;
						};
						slots.push(Slot::Value {
							data: data.clone(),
							source: item.clone(),
						});
					}
					Some(Target::Via(child)) => match groups.entry(child.id()) {
						Entry::Occupied(entry) => {
							if let Slot::Group { sources, .. } = &mut slots[*entry.get()]
								&& !sources.last().is_some_and(|last| same_item(last, item))
							{
								sources.push(item.clone());
							}
						}
						Entry::Vacant(entry) => {
							entry.insert(slots.len());
							slots.push(Slot::Group {
								child,
								sources: vec![item.clone()],
							});
						}
					},
				}
			}
		}

		let mut data = Vec::with_capacity(slots.len());
		let mut sources = Vec::with_capacity(slots.len());
		for slot in slots {
			match slot {
				Slot::Value { data: value, source } => {
					data.push(value);
					sources.push(vec![source]);
				}
				Slot::Group {
					child,
					sources: group,
				} => {
					let Some(value) = child.resolve_erased(&group, filter)? else {
						continue;
					};
					match value.downcast::<I>() {
						Ok(value) => {
							data.push(*value);
							sources.push(group);
						}
						Err(_) => {
							tracing::warn!(action = %self.id, handler = %child.id(), "handler output does not match action input type");
						}
					}
				}
			}
		}

		Ok((data, sources))
	}

	fn target_of(&self, binding: &Binding) -> Option<Target> {
		if binding.action_id() == self.id {
			return Some(Target::Direct);
		}

		let Some(node) = binding.node() else {
			tracing::trace!(action = %binding.action_id(), "skipping binding of a dropped action");
			return None;
		};

		let depth = self.ancestry.depth();
		let ancestry = node.ancestry();
		if ancestry.ids.get(depth) != Some(&self.id) {
			return None;
		}

		let child = ancestry.nodes.get(depth + 1).cloned();
		match child {
			Some(child) => child.upgrade().map(Target::Via),
			None => Some(Target::Via(node)),
		}
	}
}

fn passes_filter(binding: &Binding, filter: Option<&TagSet>) -> bool {
	filter.is_none_or(|tags| binding.tags().intersects(tags))
}
