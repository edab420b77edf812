mod ids;
mod route;
mod stop_pattern;
mod trip;
mod trip_pattern;

pub use ids::{PatternId, RouteId, StopId, TripId};
pub use route::{Route, TransitMode};
pub use stop_pattern::{PickDrop, StopPattern};
pub use trip::{Accessibility, Trip};
pub use trip_pattern::TripPattern;
