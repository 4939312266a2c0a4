use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Process-wide identity of an observable. Unique, monotonically
/// increasing, never reused.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObservableId(u64);

impl ObservableId {
	pub(crate) fn next() -> Self {
		ObservableId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
	}

	pub fn as_u64(&self) -> u64 {
		self.0
	}
}

impl Debug for ObservableId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "ObservableId({})", self.0)
	}
}

/// Identity of a registered listener. Derived from the address of the
/// shared callback allocation, so two handles compare equal exactly when
/// they refer to the same callable instance.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

impl ListenerId {
	pub(crate) fn from_addr(addr: usize) -> Self {
		ListenerId(addr)
	}
}

impl Debug for ListenerId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "ListenerId({:#x})", self.0)
	}
}
