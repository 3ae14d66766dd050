//! Trip dispatch.
//!
//! The [`Dispatcher`] owns passengers, drivers and trips, wires them
//! together at construction, and assigns new trips to the driver who has
//! been idle longest. [`SharedDispatcher`] wraps it for use across threads.

mod dispatcher;
mod error;
mod registry;
mod selection;
mod shared;

pub use dispatcher::Dispatcher;
pub use error::DispatchError;
pub use selection::{Idleness, select_driver};
pub use shared::SharedDispatcher;
