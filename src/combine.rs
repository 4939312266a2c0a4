use std::sync::Arc;

use crate::Observable;

/// One argument of a fan-in wiring. The observable-vs-constant decision is
/// made here, once, when the wiring is built; dispatch afterwards is a
/// plain match with no per-update inspection.
pub enum Source<T> {
	Cell(Observable<T>),
	Fixed(T),
}

impl<T> Clone for Source<T>
where
	T: Clone,
{
	fn clone(&self) -> Self {
		match self {
			Source::Cell(cell) => Source::Cell(cell.clone()),
			Source::Fixed(value) => Source::Fixed(value.clone()),
		}
	}
}

impl<T> Source<T> {
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		match self {
			Source::Cell(cell) => cell.get(),
			Source::Fixed(value) => value.clone(),
		}
	}
}

impl<T> From<Observable<T>> for Source<T> {
	fn from(cell: Observable<T>) -> Self {
		Source::Cell(cell)
	}
}

impl<T> From<&Observable<T>> for Source<T> {
	fn from(cell: &Observable<T>) -> Self {
		Source::Cell(cell.clone())
	}
}

/// A constant fan-in argument, passed through to the callback unchanged.
pub fn fixed<T>(value: T) -> Source<T> {
	Source::Fixed(value)
}

/// A tuple of `Source`s. `values` reads the current value of every
/// argument; `attach` registers the shared update closure on every
/// observable argument (constants register nothing).
pub trait Sources: Clone + Send + Sync + 'static {
	type Values;

	fn values(&self) -> Self::Values;

	fn attach(&self, update: Arc<dyn Fn() + Send + Sync>);
}

impl Sources for () {
	type Values = ();

	fn values(&self) -> Self::Values {}

	fn attach(&self, _update: Arc<dyn Fn() + Send + Sync>) {}
}

macro_rules! tuple_sources {
	($(($ty:ident, $idx:tt)),+) => {
		impl<$($ty),+> Sources for ($(Source<$ty>,)+)
		where
			$($ty: Clone + Send + Sync + 'static),+
		{
			type Values = ($($ty,)+);

			fn values(&self) -> Self::Values {
				($(self.$idx.get(),)+)
			}

			fn attach(&self, update: Arc<dyn Fn() + Send + Sync>) {
				$(
					if let Source::Cell(cell) = &self.$idx {
						let update = update.clone();
						cell.on(move |_| update());
					}
				)+
			}
		}
	};
}

tuple_sources!((A, 0));
tuple_sources!((A, 0), (B, 1));
tuple_sources!((A, 0), (B, 1), (C, 2));
tuple_sources!((A, 0), (B, 1), (C, 2), (D, 3));
tuple_sources!((A, 0), (B, 1), (C, 2), (D, 3), (E, 4));
tuple_sources!((A, 0), (B, 1), (C, 2), (D, 3), (E, 4), (F, 5));
tuple_sources!((A, 0), (B, 1), (C, 2), (D, 3), (E, 4), (F, 5), (G, 6));
tuple_sources!((A, 0), (B, 1), (C, 2), (D, 3), (E, 4), (F, 5), (G, 6), (H, 7));

/// Invokes `func` with the current values of *all* sources whenever any
/// observable source updates. Full recomputation, never a diff. Passing
/// the same observable twice registers the listener twice; with no
/// observable sources the callback never fires.
pub fn onany<S, F>(func: F, sources: S)
where
	S: Sources,
	F: Fn(S::Values) + Send + Sync + 'static,
{
	let update = {
		let sources = sources.clone();
		Arc::new(move || func(sources.values())) as Arc<dyn Fn() + Send + Sync>
	};
	sources.attach(update);
}

/// On every source update, assigns `func` of the current values into
/// `target`.
pub fn map_into<S, F, R>(func: F, target: &Observable<R>, sources: S)
where
	S: Sources,
	F: Fn(S::Values) -> R + Send + Sync + 'static,
	R: Clone + Send + Sync + 'static,
{
	let target = target.clone();
	onany(move |values| target.set(func(values)), sources);
}

/// Allocates a new observable seeded with `func` of the current values,
/// wired to recompute on every source update.
pub fn map<S, F, R>(func: F, sources: S) -> Observable<R>
where
	S: Sources,
	F: Fn(S::Values) -> R + Send + Sync + 'static,
	R: Clone + Send + Sync + 'static,
{
	let output = Observable::new(func(sources.values()));
	map_into(func, &output, sources);
	output
}

/// Forwards every update of `from` into `to`, untransformed. Asymmetric:
/// updates to `to` do not propagate back. No cycle check; connecting two
/// cells in both directions recurses until the stack runs out.
pub fn connect<T>(from: &Observable<T>, to: &Observable<T>)
where
	T: Clone + Send + Sync + 'static,
{
	map_into(|(value,): (T,)| value, to, (Source::from(from),));
}
