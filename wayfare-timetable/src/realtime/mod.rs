mod resolver;
mod snapshot;
mod snapshot_source;
mod trip_update;
mod update_result;

pub use resolver::TimetableResolver;
pub use snapshot::TimetableSnapshot;
pub use snapshot_source::TimetableSnapshotSource;
pub use trip_update::{ScheduleRelationship, StopTimeUpdate, TripUpdate, ADDED_TRIP_SERVICE_CODE};
pub use update_result::{UpdateSuccess, UpdateWarning};
