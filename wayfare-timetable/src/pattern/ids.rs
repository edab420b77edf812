use serde::{Deserialize, Serialize};
use std::{fmt::Display, sync::Arc};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub Arc<str>);

        impl $name {
            pub fn new(id: &str) -> $name {
                $name(Arc::from(id))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name::new(value)
            }
        }
    };
}

string_id!(
    /// feed-scoped identifier of a transit stop or platform
    StopId
);
string_id!(
    /// feed-scoped identifier of a scheduled trip
    TripId
);
string_id!(
    /// feed-scoped identifier of a route
    RouteId
);
string_id!(
    /// identifier of a trip pattern, unique within a graph
    PatternId
);
