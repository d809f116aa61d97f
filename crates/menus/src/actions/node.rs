//! Action nodes: root actions and the handlers derived from them.

use std::any::Any;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use super::binding::{ActionBinding, Binding};
use super::error::Result;
use super::tags::TagSet;
use crate::items::ItemRef;

/// Process-unique identity of an action node.
///
/// Two nodes are the same capability iff their ids are equal; names play no
/// part in identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(u64);

impl ActionId {
	fn next() -> Self {
		static NEXT: AtomicU64 = AtomicU64::new(1);
		Self(NEXT.fetch_add(1, Ordering::Relaxed))
	}
}

impl fmt::Display for ActionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "action#{}", self.0)
	}
}

/// Reduction step of a node: one input per matched source, folded into a
/// single output.
///
/// `sources[i]` lists the items that produced `data[i]`. It exists for
/// provenance only; cores must not rely on it for the reduction itself.
pub type ActionCore<I, O> = Box<dyn Fn(&[I], &[Vec<ItemRef>]) -> Result<O>>;

/// Path from the root down to a node's parent.
#[derive(Clone, Default)]
pub(crate) struct Ancestry {
	pub(crate) ids: Vec<ActionId>,
	pub(crate) nodes: Vec<Weak<dyn ErasedNode>>,
}

impl Ancestry {
	fn extended(&self, id: ActionId, node: Weak<dyn ErasedNode>) -> Self {
		let mut next = self.clone();
		next.ids.push(id);
		next.nodes.push(node);
		next
	}

	pub(crate) fn depth(&self) -> usize {
		self.ids.len()
	}
}

/// Type-erased view of a node, used to walk handler chains whose
/// intermediate input types the caller never names.
pub(crate) trait ErasedNode {
	fn id(&self) -> ActionId;

	fn ancestry(&self) -> &Ancestry;

	fn resolve_erased(
		&self,
		items: &[ItemRef],
		filter: Option<&TagSet>,
	) -> Result<Option<Box<dyn Any>>>;
}

pub(crate) struct ActionNode<I, O> {
	pub(crate) id: ActionId,
	pub(crate) ancestry: Ancestry,
	pub(crate) default_tags: TagSet,
	pub(crate) core: ActionCore<I, O>,
}

impl<I: Clone + 'static, O: 'static> ErasedNode for ActionNode<I, O> {
	fn id(&self) -> ActionId {
		self.id
	}

	fn ancestry(&self) -> &Ancestry {
		&self.ancestry
	}

	fn resolve_erased(
		&self,
		items: &[ItemRef],
		filter: Option<&TagSet>,
	) -> Result<Option<Box<dyn Any>>> {
		Ok(self
			.resolve(items, filter)?
			.map(|out| Box::new(out) as Box<dyn Any>))
	}
}

/// A declared capability.
///
/// `I` is the data type bindings attach to items for this node, `O` the
/// single value a resolution produces. Root actions are built with
/// [`Action::new`]; [`Action::create_handler`] derives a handler whose output
/// feeds this node's input, to any depth.
///
/// The handle is cheap to clone. The declaring module owns the node;
/// bindings and derived handlers only hold weak references to it.
pub struct Action<I, O> {
	pub(crate) node: Rc<ActionNode<I, O>>,
}

impl<I, O> Clone for Action<I, O> {
	fn clone(&self) -> Self {
		Self {
			node: self.node.clone(),
		}
	}
}

impl<I, O> fmt::Debug for Action<I, O> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Action")
			.field("id", &self.node.id)
			.field("ancestors", &self.node.ancestry.ids)
			.field("default_tags", &self.node.default_tags)
			.finish_non_exhaustive()
	}
}

impl<I: Clone + 'static, O: 'static> Action<I, O> {
	/// Declares a root action with no default tags.
	pub fn new(core: impl Fn(&[I], &[Vec<ItemRef>]) -> Result<O> + 'static) -> Self {
		Self::with_tags(core, TagSet::new())
	}

	/// Declares a root action whose bindings default to `tags`.
	pub fn with_tags(
		core: impl Fn(&[I], &[Vec<ItemRef>]) -> Result<O> + 'static,
		tags: impl Into<TagSet>,
	) -> Self {
		Self {
			node: Rc::new(ActionNode {
				id: ActionId::next(),
				ancestry: Ancestry::default(),
				default_tags: tags.into(),
				core: Box::new(core),
			}),
		}
	}

	/// Derives a handler that reduces `T` inputs into one input of this node.
	///
	/// Default tags are inherited from this node unless `default_tags` is
	/// given.
	///
	/// # Ownership
	///
	/// Parents and bindings only hold weak references to the handler. The
	/// returned handle must be kept alive for as long as its bindings should
	/// resolve; once it is dropped, those bindings are skipped.
	#[must_use = "bindings to a dropped handler never resolve"]
	pub fn create_handler<T: Clone + 'static>(
		&self,
		core: impl Fn(&[T], &[Vec<ItemRef>]) -> Result<I> + 'static,
		default_tags: Option<TagSet>,
	) -> Action<T, I> {
		self.create_recursive_handler(|_| core, default_tags)
	}

	/// Derives a handler whose core may bind data to the handler itself.
	///
	/// `make_core` receives a weak handle to the handler under construction,
	/// so results produced by the core can carry fresh bindings to the same
	/// handler for use in nested menus without creating an ownership cycle.
	///
	/// # Ownership
	///
	/// As with [`Action::create_handler`], the returned handle is the only
	/// owner of the handler.
	#[must_use = "bindings to a dropped handler never resolve"]
	pub fn create_recursive_handler<T, F, C>(
		&self,
		make_core: F,
		default_tags: Option<TagSet>,
	) -> Action<T, I>
	where
		T: Clone + 'static,
		F: FnOnce(&WeakAction<T, I>) -> C,
		C: Fn(&[T], &[Vec<ItemRef>]) -> Result<I> + 'static,
	{
		let id = ActionId::next();
		let default_tags = default_tags.unwrap_or_else(|| self.node.default_tags.clone());
		let parent: Weak<dyn ErasedNode> = Rc::downgrade(&self.node) as Weak<dyn ErasedNode>;
		let ancestry = self.node.ancestry.extended(self.node.id, parent);

		let node = Rc::new_cyclic(|weak: &Weak<ActionNode<T, I>>| {
			let this = WeakAction {
				node: weak.clone(),
				id,
				default_tags: default_tags.clone(),
			};
			ActionNode {
				id,
				ancestry,
				default_tags,
				core: Box::new(make_core(&this)),
			}
		});
		tracing::trace!(action = %id, parent = %self.node.id, depth = node.ancestry.depth(), "derived handler");
		Action { node }
	}

	/// Attaches `data` to this node; the result is stored on an item.
	///
	/// Tags default to this node's default tags when `tags` is `None`.
	pub fn create_binding(&self, data: I, tags: Option<TagSet>) -> ActionBinding<I> {
		let node: Weak<dyn ErasedNode> = Rc::downgrade(&self.node) as Weak<dyn ErasedNode>;
		ActionBinding::new(
			node,
			self.node.id,
			data,
			tags.unwrap_or_else(|| self.node.default_tags.clone()),
		)
	}

	/// Resolves this action over `items`, in item order.
	///
	/// Returns `Ok(None)` when no item carries a binding for this node or any
	/// of its handlers. Faults raised by cores along the chain are returned
	/// unchanged.
	pub fn get(&self, items: &[ItemRef]) -> Result<Option<O>> {
		self.node.resolve(items, None)
	}

	/// Like [`Action::get`], but only bindings sharing a tag with `tags`
	/// take part, at every level of the handler chain.
	pub fn get_with_tags(&self, items: &[ItemRef], tags: &TagSet) -> Result<Option<O>> {
		self.node.resolve(items, Some(tags))
	}

	/// Runs this node's core directly on already extracted inputs.
	///
	/// `sources` is carried through for provenance; bindings are not
	/// consulted.
	pub fn get_data(&self, data: &[I], sources: &[Vec<ItemRef>]) -> Result<O> {
		(self.node.core)(data, sources)
	}

	/// Returns true if any item can contribute to a resolution of this node.
	pub fn is_applicable(&self, items: &[ItemRef]) -> bool {
		items.iter().any(|item| self.node.accepts_item(item, None))
	}

	/// Availability check matching [`Action::get_with_tags`].
	pub fn is_applicable_with_tags(&self, items: &[ItemRef], tags: &TagSet) -> bool {
		items.iter().any(|item| self.node.accepts_item(item, Some(tags)))
	}

	/// Counts the items that can contribute to a resolution of this node.
	pub fn applicable_count(&self, items: &[ItemRef]) -> usize {
		items.iter().filter(|item| self.node.accepts_item(item, None)).count()
	}

	/// Counts the items with at least one binding sharing a tag with `tags`
	/// that can contribute to a resolution of this node.
	pub fn applicable_count_with_tags(&self, items: &[ItemRef], tags: &TagSet) -> usize {
		items
			.iter()
			.filter(|item| self.node.accepts_item(item, Some(tags)))
			.count()
	}

	pub fn downgrade(&self) -> WeakAction<I, O> {
		WeakAction {
			node: Rc::downgrade(&self.node),
			id: self.node.id,
			default_tags: self.node.default_tags.clone(),
		}
	}
}

impl<I, O> Action<I, O> {
	pub fn id(&self) -> ActionId {
		self.node.id
	}

	/// Ancestors from the root down to the immediate parent; empty for roots.
	pub fn ancestors(&self) -> &[ActionId] {
		&self.node.ancestry.ids
	}

	pub fn default_tags(&self) -> &TagSet {
		&self.node.default_tags
	}

	pub fn is_root(&self) -> bool {
		self.node.ancestry.ids.is_empty()
	}

	/// Returns true if `other` was derived, directly or transitively, from
	/// this node.
	pub fn is_ancestor_of<A, B>(&self, other: &Action<A, B>) -> bool {
		other.node.ancestry.ids.contains(&self.node.id)
	}
}

/// Non-owning handle to an action node.
pub struct WeakAction<I, O> {
	node: Weak<ActionNode<I, O>>,
	id: ActionId,
	default_tags: TagSet,
}

impl<I, O> Clone for WeakAction<I, O> {
	fn clone(&self) -> Self {
		Self {
			node: self.node.clone(),
			id: self.id,
			default_tags: self.default_tags.clone(),
		}
	}
}

impl<I, O> fmt::Debug for WeakAction<I, O> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("WeakAction").field("id", &self.id).finish_non_exhaustive()
	}
}

impl<I: Clone + 'static, O: 'static> WeakAction<I, O> {
	pub fn id(&self) -> ActionId {
		self.id
	}

	pub fn upgrade(&self) -> Option<Action<I, O>> {
		self.node.upgrade().map(|node| Action { node })
	}

	/// Binds `data` to the referenced node without upgrading it.
	pub fn create_binding(&self, data: I, tags: Option<TagSet>) -> ActionBinding<I> {
		let node: Weak<dyn ErasedNode> = self.node.clone() as Weak<dyn ErasedNode>;
		ActionBinding::new(
			node,
			self.id,
			data,
			tags.unwrap_or_else(|| self.default_tags.clone()),
		)
	}
}

impl Binding {
	/// Returns true if this binding targets `action` itself.
	pub fn is_for<I, O>(&self, action: &Action<I, O>) -> bool {
		self.action_id() == action.id()
	}
}
