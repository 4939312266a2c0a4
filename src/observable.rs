use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::Mutex;
use smallvec::SmallVec;

use crate::combine::{self, Source};
use crate::hooks;
use crate::id::{ListenerId, ObservableId};
use crate::WireError;

/// A value cell that synchronously notifies registered listeners on every
/// `set`. Handles are cheap clones of a shared body; a listener registered
/// on any clone fires for updates made through any other clone.
pub struct Observable<T> {
	body: Arc<ObsBody<T>>,
}

struct ObsBody<T> {
	id: ObservableId,
	value: Mutex<T>,
	listeners: Mutex<SmallVec<[Listener<T>; 2]>>,
}

impl<T> Clone for Observable<T> {
	fn clone(&self) -> Self {
		Self {
			body: self.body.clone(),
		}
	}
}

/// A registered callback. Identity is the address of the shared callable,
/// not the value: `off` removes the specific instance, and the same
/// instance may be attached more than once.
pub struct Listener<T> {
	func: Arc<dyn Fn(&T) + Send + Sync>,
}

impl<T> Clone for Listener<T> {
	fn clone(&self) -> Self {
		Self {
			func: self.func.clone(),
		}
	}
}

impl<T> Listener<T> {
	pub fn new(func: impl Fn(&T) + Send + Sync + 'static) -> Self {
		Listener {
			func: Arc::new(func),
		}
	}

	pub fn id(&self) -> ListenerId {
		ListenerId::from_addr(Arc::as_ptr(&self.func) as *const () as usize)
	}

	fn same(&self, other: &Listener<T>) -> bool {
		Arc::ptr_eq(&self.func, &other.func)
	}
}

impl<T> Observable<T> {
	pub fn new(value: T) -> Self {
		Observable {
			body: Arc::new(ObsBody {
				id: ObservableId::next(),
				value: Mutex::new(value),
				listeners: Mutex::new(SmallVec::new_const()),
			}),
		}
	}

	#[inline]
	pub fn id(&self) -> ObservableId {
		self.body.id
	}

	#[inline]
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.body.value.lock().clone()
	}

	/// Stores `value`, then invokes every listener with it, in registration
	/// order. The store happens first, so a listener reading this cell sees
	/// the new value. A panicking listener aborts the rest of the dispatch;
	/// the store is not rolled back.
	#[inline]
	pub fn set(&self, value: T)
	where
		T: Clone,
	{
		self.set_filtered(value, |_| true)
	}

	/// `set`, but only listeners accepted by `notify` fire. Lets a caller
	/// suppress a specific listener for one update, e.g. to stop feedback
	/// in bidirectional wiring.
	pub fn set_filtered(&self, value: T, notify: impl Fn(&Listener<T>) -> bool)
	where
		T: Clone,
	{
		*self.body.value.lock() = value.clone();

		// Snapshot so listeners may call on/off/set reentrantly. Neither
		// lock is held while a listener runs.
		let snapshot: SmallVec<[Listener<T>; 2]> = self.body.listeners.lock().clone();
		for listener in &snapshot {
			if notify(listener) {
				(listener.func)(&value);
			}
		}
	}

	/// Registers `func` and returns the handle needed to remove it later.
	pub fn on(&self, func: impl Fn(&T) + Send + Sync + 'static) -> Listener<T> {
		let listener = Listener::new(func);
		self.attach(&listener);
		listener
	}

	/// Appends an existing handle. Attaching the same handle twice is
	/// allowed and makes it fire twice per update.
	pub fn attach(&self, listener: &Listener<T>) {
		self.body.listeners.lock().push(listener.clone());
		tracing::trace!(observable = ?self.body.id, listener = ?listener.id(), "listener added");
		hooks::wiring().notify_added(self.body.id, listener.id());
	}

	/// Removes the first registration of `listener`. Callers that want the
	/// silent no-op behavior discard the result.
	pub fn off(&self, listener: &Listener<T>) -> Result<(), WireError> {
		let mut listeners = self.body.listeners.lock();
		match listeners.iter().position(|l| l.same(listener)) {
			Some(index) => {
				listeners.remove(index);
				drop(listeners);
				tracing::trace!(observable = ?self.body.id, listener = ?listener.id(), "listener removed");
				hooks::wiring().notify_removed(self.body.id, listener.id());
				Ok(())
			}
			None => Err(WireError::ListenerNotFound {
				observable: self.body.id,
				listener: listener.id(),
			}),
		}
	}

	/// Derived observable holding `func` of this cell's current value.
	pub fn map<F, R>(&self, func: F) -> Observable<R>
	where
		F: Fn(&T) -> R + Send + Sync + 'static,
		T: Clone + Send + Sync + 'static,
		R: Clone + Send + Sync + 'static,
	{
		combine::map(move |(value,): (T,)| func(&value), (Source::from(self),))
	}
}

impl<T> Default for Observable<T>
where
	T: Default,
{
	fn default() -> Self {
		Observable::new(Default::default())
	}
}

impl<T> Debug for Observable<T>
where
	T: Debug,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.body.value.lock().fmt(f)
	}
}
