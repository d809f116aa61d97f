//! Action composition and menu state for a command-palette shell.
//!
//! Items declare, independently of each other, which capabilities they
//! support by carrying bindings to [`Action`] nodes. The shell resolves a
//! capability over the current selection into exactly one result, possibly
//! assembled through a chain of handlers.
//!
//! # Modules
//!
//! - [`actions`] - action nodes, handlers, bindings and resolution
//! - [`items`] - the item trait and standard item implementations
//! - [`categories`] - categories and the context category cache
//! - [`menu`] - reactive menu state, category layout and context menus
//! - [`reactive`] - listener registration for state holders

pub mod actions;
pub mod categories;
pub mod items;
pub mod menu;
pub mod reactive;

pub use actions::{
	Action, ActionBinding, ActionFault, ActionId, Binding, Executable, ExecutableResult, Tag,
	TagSet, WeakAction,
};
pub use categories::{Category, CategoryRef, ContextCategoryCache, create_context_category};
pub use items::{ItemRef, MenuItem, StandardMenuItem, same_item};
pub use menu::{Menu, MenuCategoryConfig, MenuEvent, MenuSettings};
pub use reactive::{Subject, Subscription};
