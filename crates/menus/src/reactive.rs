//! Explicit change notification for reactive state holders.
//!
//! Reads never subscribe implicitly: a caller that wants to hear about
//! future changes registers a listener and keeps the returned
//! [`Subscription`] alive for as long as it cares.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<E> = Rc<dyn Fn(&E)>;

struct SubjectState<E> {
	next_id: u64,
	listeners: Vec<(u64, Listener<E>)>,
}

/// A list of listeners notified synchronously on every emitted event.
pub struct Subject<E> {
	state: Rc<RefCell<SubjectState<E>>>,
}

impl<E: 'static> Subject<E> {
	pub fn new() -> Self {
		Self {
			state: Rc::new(RefCell::new(SubjectState {
				next_id: 0,
				listeners: Vec::new(),
			})),
		}
	}

	/// Registers `listener`; it stays registered until the subscription is
	/// dropped or [`Subscription::unsubscribe`] is called.
	#[must_use = "dropping the subscription unsubscribes the listener"]
	pub fn subscribe(&self, listener: impl Fn(&E) + 'static) -> Subscription {
		let id = {
			let mut state = self.state.borrow_mut();
			state.next_id += 1;
			let id = state.next_id;
			state.listeners.push((id, Rc::new(listener)));
			id
		};

		let state: Weak<RefCell<SubjectState<E>>> = Rc::downgrade(&self.state);
		Subscription {
			cancel: Some(Box::new(move || {
				if let Some(state) = state.upgrade() {
					state.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
				}
			})),
		}
	}

	/// Notifies all listeners registered at the time of the call.
	///
	/// Listeners may read the emitting state holder and may subscribe or
	/// unsubscribe while being notified.
	pub fn emit(&self, event: &E) {
		let listeners: Vec<Listener<E>> = self
			.state
			.borrow()
			.listeners
			.iter()
			.map(|(_, listener)| listener.clone())
			.collect();
		for listener in listeners {
			listener(event);
		}
	}

	pub fn listener_count(&self) -> usize {
		self.state.borrow().listeners.len()
	}
}

impl<E: 'static> Default for Subject<E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<E> fmt::Debug for Subject<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subject")
			.field("listeners", &self.state.borrow().listeners.len())
			.finish()
	}
}

/// Drop-based listener registration.
pub struct Subscription {
	cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
	pub fn unsubscribe(mut self) {
		if let Some(cancel) = self.cancel.take() {
			cancel();
		}
	}

	/// Keeps the listener registered for the lifetime of the subject.
	pub fn detach(mut self) {
		self.cancel = None;
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(cancel) = self.cancel.take() {
			cancel();
		}
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("active", &self.cancel.is_some())
			.finish()
	}
}
