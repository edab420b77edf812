mod car_pickup_state;
mod state_data;
mod state_editor;
mod traversal_state;
mod traverse_mode;
mod traversed;
mod vehicle_rental_state;

pub use car_pickup_state::CarPickupState;
pub use state_data::{StateData, TransitLegEnd, TripBinding};
pub use state_editor::StateEditor;
pub use traversal_state::{StatePath, StateRef, TraversalState};
pub use traverse_mode::TraverseMode;
pub use traversed::Traversed;
pub use vehicle_rental_state::VehicleRentalState;
