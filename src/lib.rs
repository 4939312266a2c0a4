pub mod macros;

mod combine;
mod hooks;
mod id;
mod latest;
mod observable;

pub use combine::{connect, fixed, map, map_into, onany, Source, Sources};
pub use hooks::{wiring, WiringHook, WiringHooks};
pub use id::{ListenerId, ObservableId};
pub use latest::Latest;
pub use observable::{Listener, Observable};

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WireError {
	#[error("listener {listener:?} is not registered on observable {observable:?}")]
	ListenerNotFound {
		observable: ObservableId,
		listener: ListenerId,
	},
}
