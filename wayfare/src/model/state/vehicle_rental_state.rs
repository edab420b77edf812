use serde::{Deserialize, Serialize};

/// progress through a single vehicle rental, in search order.
///
/// a forward search moves `NotRenting -> Renting* -> HaveRented`. an arrive-by
/// search walks the same chain in reverse, starting from `HaveRented` (or
/// already renting when the vehicle may be left at the destination) and
/// reaching `NotRenting` where the vehicle was picked up.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum VehicleRentalState {
    #[default]
    NotRenting,
    RentingFromStation,
    RentingFloating,
    HaveRented,
}

impl VehicleRentalState {
    pub fn is_renting(&self) -> bool {
        matches!(
            self,
            VehicleRentalState::RentingFromStation | VehicleRentalState::RentingFloating
        )
    }
}
