mod bicycle_optimize_type;
mod car_pickup_options;
mod parking_options;
mod rental_options;
mod request_error;
mod routing_context;
mod routing_request;
mod street_mode;
mod wheelchair_options;

pub use bicycle_optimize_type::{BicycleOptimizeType, TriangleFactors};
pub use car_pickup_options::CarPickupOptions;
pub use parking_options::ParkingOptions;
pub use rental_options::RentalOptions;
pub use request_error::RequestError;
pub use routing_context::RoutingContext;
pub use routing_request::RoutingRequest;
pub use street_mode::StreetMode;
pub use wheelchair_options::WheelchairOptions;
