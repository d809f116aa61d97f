//! Action composition and resolution.
//!
//! Items declare support for a capability by carrying a [`Binding`] for an
//! [`Action`] node. Handlers derived from an action reduce their own inputs
//! into one input of their parent, so a capability can be assembled from
//! independently declared pieces. Resolving an action over a selection walks
//! the bindings and handler chain and yields exactly one result.

mod binding;
mod error;
mod node;
mod resolve;
mod result;
mod tags;

#[cfg(test)]
mod tests;

pub use binding::{ActionBinding, Binding};
pub use error::{ActionFault, Result};
pub use node::{Action, ActionCore, ActionId, WeakAction};
pub use result::{Executable, ExecutableResult};
pub use tags::{Tag, TagSet};
