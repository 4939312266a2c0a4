use std::sync::Arc;

use parking_lot::Mutex;

use crate::id::{ListenerId, ObservableId};

pub type WiringHook = Arc<dyn Fn(ObservableId, ListenerId) + Send + Sync>;

/// Process-wide registry of wiring-change callbacks. External tooling (a
/// naming registry, debuggers) registers here to observe listener add and
/// remove events across every observable, of every value type.
pub struct WiringHooks {
	added: Mutex<Vec<WiringHook>>,
	removed: Mutex<Vec<WiringHook>>,
}

static WIRING: WiringHooks = WiringHooks {
	added: Mutex::new(Vec::new()),
	removed: Mutex::new(Vec::new()),
};

pub fn wiring() -> &'static WiringHooks {
	&WIRING
}

impl WiringHooks {
	pub fn on_added(&self, hook: impl Fn(ObservableId, ListenerId) + Send + Sync + 'static) {
		self.added.lock().push(Arc::new(hook));
	}

	pub fn on_removed(&self, hook: impl Fn(ObservableId, ListenerId) + Send + Sync + 'static) {
		self.removed.lock().push(Arc::new(hook));
	}

	pub fn clear(&self) {
		self.added.lock().clear();
		self.removed.lock().clear();
	}

	// Hooks run on a snapshot, outside the registry lock, so a hook may
	// itself wire listeners (and so fire hooks) reentrantly.
	pub(crate) fn notify_added(&self, observable: ObservableId, listener: ListenerId) {
		let hooks: Vec<WiringHook> = self.added.lock().clone();
		for hook in &hooks {
			hook(observable, listener)
		}
	}

	pub(crate) fn notify_removed(&self, observable: ObservableId, listener: ListenerId) {
		let hooks: Vec<WiringHook> = self.removed.lock().clone();
		for hook in &hooks {
			hook(observable, listener)
		}
	}
}
