//! Type-keyed presenter factory.
//!
//! Matches a view's concrete type to the presenter constructor bound to it.
//! Bindings come from two places:
//!
//! * explicit builder calls, [`TypedFactoryBuilder::bind`];
//! * static registrations made anywhere in the binary with
//!   [`bind_presenter!`], collected through `inventory`.
//!
//! Explicit bindings win over static ones for the same view type.

use std::any::{Any, TypeId, type_name};
use std::sync::Arc;

use mvp_core::{Error, Presenter, PresenterFactory, Result, View};
use rustc_hash::FxHashMap;
use tracing::{trace, warn};

#[doc(hidden)]
pub use inventory;
#[doc(hidden)]
pub use paste;

/// Static view-to-presenter binding emitted by [`bind_presenter!`].
pub struct PresenterBinding {
	pub view_type: fn() -> TypeId,
	pub view_name: fn() -> &'static str,
	pub presenter_name: &'static str,
	pub build: fn(Arc<dyn Any + Send + Sync>) -> Option<Box<dyn Presenter>>,
}

/// Registry wrapper for static presenter bindings.
pub struct PresenterBindingReg(pub &'static PresenterBinding);
inventory::collect!(PresenterBindingReg);

/// Returns every statically registered binding.
pub fn all_bindings() -> impl Iterator<Item = &'static PresenterBinding> {
	inventory::iter::<PresenterBindingReg>.into_iter().map(|reg| reg.0)
}

type Constructor = Arc<dyn Fn(Arc<dyn Any + Send + Sync>) -> Option<Box<dyn Presenter>> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
	Explicit,
	Static,
}

struct Entry {
	view: &'static str,
	presenter: &'static str,
	origin: Origin,
	build: Constructor,
}

/// [`PresenterFactory`] dispatching on the view's concrete type.
pub struct TypedFactory {
	entries: FxHashMap<TypeId, Entry>,
}

impl TypedFactory {
	pub fn builder() -> TypedFactoryBuilder {
		TypedFactoryBuilder::default()
	}

	/// Factory made of the static bindings only.
	pub fn from_bindings() -> Self {
		Self::builder().with_static_bindings().build()
	}

	/// Returns true if a presenter is bound for views of type `V`.
	pub fn binds<V: View>(&self) -> bool {
		self.entries.contains_key(&TypeId::of::<V>())
	}

	/// Returns the presenter type name bound for views of type `V`.
	pub fn presenter_for<V: View>(&self) -> Option<&'static str> {
		self.entries.get(&TypeId::of::<V>()).map(|entry| entry.presenter)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl PresenterFactory for TypedFactory {
	fn create_presenter(&self, view: &Arc<dyn View>) -> Result<Box<dyn Presenter>> {
		let view_type = (**view).view_type_name();
		let missing = || Error::NoPresenterForView { view_type };

		let entry = self.entries.get(&Any::type_id((**view).as_any())).ok_or_else(missing)?;
		trace!(view = entry.view, presenter = entry.presenter, "constructing presenter");
		(entry.build)(Arc::clone(view).into_any_arc()).ok_or_else(missing)
	}
}

/// Builder for [`TypedFactory`].
#[derive(Default)]
pub struct TypedFactoryBuilder {
	entries: FxHashMap<TypeId, Entry>,
}

impl TypedFactoryBuilder {
	/// Binds presenters built by `ctor` to views of type `V`.
	///
	/// Rebinding a view type replaces the earlier constructor.
	pub fn bind<V, P, F>(mut self, ctor: F) -> Self
	where
		V: View,
		P: Presenter,
		F: Fn(Arc<V>) -> P + Send + Sync + 'static,
	{
		let build: Constructor = Arc::new(move |view: Arc<dyn Any + Send + Sync>| {
			let view = view.downcast::<V>().ok()?;
			Some(Box::new(ctor(view)) as Box<dyn Presenter>)
		});
		let entry = Entry {
			view: type_name::<V>(),
			presenter: type_name::<P>(),
			origin: Origin::Explicit,
			build,
		};
		if let Some(previous) = self.entries.insert(TypeId::of::<V>(), entry)
			&& previous.origin == Origin::Explicit
		{
			warn!(view = previous.view, replaced = previous.presenter, with = type_name::<P>(), "presenter binding replaced");
		}
		self
	}

	/// Adds every [`bind_presenter!`] registration for view types not bound yet.
	pub fn with_static_bindings(mut self) -> Self {
		for binding in all_bindings() {
			let build = binding.build;
			self.entries.entry((binding.view_type)()).or_insert_with(|| Entry {
				view: (binding.view_name)(),
				presenter: binding.presenter_name,
				origin: Origin::Static,
				build: Arc::new(build),
			});
		}
		self
	}

	pub fn build(self) -> TypedFactory {
		TypedFactory { entries: self.entries }
	}
}

#[doc(hidden)]
pub fn __build_presenter<V, P>(view: Arc<dyn Any + Send + Sync>, ctor: impl FnOnce(Arc<V>) -> P) -> Option<Box<dyn Presenter>>
where
	V: View,
	P: Presenter,
{
	let view = view.downcast::<V>().ok()?;
	Some(Box::new(ctor(view)))
}

/// Statically binds a presenter constructor to a view type.
///
/// ```ignore
/// bind_presenter!(login, view: LoginView, presenter: LoginPresenter);
/// bind_presenter!(feed, view: FeedView, presenter: FeedPresenter, ctor: FeedPresenter::for_view);
/// ```
///
/// Without `ctor`, the presenter is built with `Default`. A `ctor` receives
/// the typed `Arc<View>`.
#[macro_export]
macro_rules! bind_presenter {
	($name:ident, view: $view:ty, presenter: $presenter:ty, ctor: $ctor:expr $(,)?) => {
		$crate::paste::paste! {
			#[allow(non_upper_case_globals)]
			static [<PRESENTER_BINDING_ $name>]: $crate::PresenterBinding = $crate::PresenterBinding {
				view_type: ::std::any::TypeId::of::<$view>,
				view_name: ::std::any::type_name::<$view>,
				presenter_name: ::std::stringify!($presenter),
				build: |view| $crate::__build_presenter::<$view, $presenter>(view, $ctor),
			};

			$crate::inventory::submit! { $crate::PresenterBindingReg(&[<PRESENTER_BINDING_ $name>]) }
		}
	};
	($name:ident, view: $view:ty, presenter: $presenter:ty $(,)?) => {
		$crate::bind_presenter!($name, view: $view, presenter: $presenter, ctor: |_view| <$presenter as ::core::default::Default>::default());
	};
}
