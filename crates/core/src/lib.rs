//! Presenter session registry.
//!
//! Views come and go; presenters stay. A [`PresenterRegistry`] keeps exactly
//! one presenter alive per logical screen while its views are destroyed and
//! recreated, arranges sessions as roots with child sub-regions, routes view
//! lifecycle events to the right presenter, and tears down a root's children
//! together with it.
//!
//! ```ignore
//! let registry = PresenterRegistry::new(factory);
//! let handle = registry.attach_root(view.clone(), saved.as_ref())?;
//! handle.resumed();
//! handle.persisted(&mut bundle);
//! handle.destroyed(true); // view recreated, keep the presenter warm
//! ```

mod bundle;
mod config;
mod error;
mod factory;
mod id;
mod listener;
mod node;
mod presenter;
mod registry;
mod view;

pub use bundle::{PRESENTER_ID_KEY, StateBundle};
pub use config::{OrphanPolicy, ReadyPolicy, RegistryConfig};
pub use error::{Error, Result};
pub use factory::PresenterFactory;
pub use id::{IdGenerator, SequentialIds, SessionId, UuidIds};
pub use listener::LifecycleHandle;
pub use node::{NodeSnapshot, Role};
pub use presenter::{Presenter, SharedPresenter, ViewSlot};
pub use registry::PresenterRegistry;
pub use view::{View, ViewAny};
