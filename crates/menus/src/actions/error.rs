//! Errors raised while resolving actions.

use thiserror::Error;

/// Failure reported by a handler core or by an executable result.
///
/// The resolution engine never wraps or retries these: whatever a core
/// returns reaches the caller of [`Action::get`] as-is.
///
/// [`Action::get`]: super::Action::get
#[derive(Debug, Error)]
pub enum ActionFault {
	/// A core rejected its input with a message.
	#[error("{0}")]
	Failed(String),

	/// Any other error surfaced from inside a core or an execute step.
	#[error(transparent)]
	Other(#[from] Box<dyn std::error::Error + 'static>),
}

impl ActionFault {
	/// Shorthand for [`ActionFault::Failed`].
	pub fn failed(message: impl Into<String>) -> Self {
		Self::Failed(message.into())
	}
}

/// Result type returned by handler cores and resolution.
pub type Result<T> = std::result::Result<T, ActionFault>;
