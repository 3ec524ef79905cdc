use std::sync::Arc;

use crate::{Presenter, Result, View};

/// Builds the presenter matching a view's concrete type.
///
/// Returning [`Error::NoPresenterForView`](crate::Error::NoPresenterForView)
/// fails the attach that asked; the registry never swallows it.
pub trait PresenterFactory: Send + Sync {
	fn create_presenter(&self, view: &Arc<dyn View>) -> Result<Box<dyn Presenter>>;
}

impl<F> PresenterFactory for F
where
	F: Fn(&Arc<dyn View>) -> Result<Box<dyn Presenter>> + Send + Sync,
{
	fn create_presenter(&self, view: &Arc<dyn View>) -> Result<Box<dyn Presenter>> {
		self(view)
	}
}
