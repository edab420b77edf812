use super::{RouteId, TripId};
use serde::{Deserialize, Serialize};

/// three-valued accessibility as published by transit feeds.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    Possible,
    NotPossible,
    #[default]
    NoInformation,
}

/// static description of one scheduled trip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub id: TripId,
    pub route_id: RouteId,
    /// dense integer code of the trip's service calendar, see [`crate::service::ServiceDay`]
    pub service_code: u32,
    pub wheelchair_accessible: Accessibility,
    pub headsign: Option<String>,
}

impl Trip {
    pub fn new(id: &str, route_id: &RouteId, service_code: u32) -> Trip {
        Trip {
            id: TripId::new(id),
            route_id: route_id.clone(),
            service_code,
            wheelchair_accessible: Accessibility::NoInformation,
            headsign: None,
        }
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Trip {
        self.wheelchair_accessible = accessibility;
        self
    }
}
