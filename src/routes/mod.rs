//! Route management: the add/edit form, the persisted record, list cards and
//! the workflows tying them to storage.

pub mod display;
pub mod form;
pub mod manager;
pub mod record;

pub use display::RouteDisplay;
pub use form::{FormMode, RouteForm, RouteFormError, ValidatedRoute};
pub use manager::{RouteCounts, RouteError, RouteManager};
pub use record::NewRoute;
