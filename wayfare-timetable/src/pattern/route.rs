use super::RouteId;
use serde::{Deserialize, Serialize};

/// vehicle category of a route, used to select board costs and reluctances.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransitMode {
    #[default]
    Bus,
    Tram,
    Subway,
    Rail,
    Ferry,
    CableCar,
    Gondola,
    Funicular,
    Coach,
    Trolleybus,
    Monorail,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub agency: String,
    pub short_name: Option<String>,
    pub mode: TransitMode,
}

impl Route {
    pub fn new(id: &str, agency: &str, mode: TransitMode) -> Route {
        Route {
            id: RouteId::new(id),
            agency: agency.to_string(),
            short_name: None,
            mode,
        }
    }
}
