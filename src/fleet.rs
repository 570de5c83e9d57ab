use serde::{Deserialize, Serialize};

use crate::registry::Registry;
use crate::resource::Resource;
use crate::transaction::Transaction;

/// What kind of vehicle a fleet entry is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VehicleKind {
    Car { doors: u8, fuel: String },
    Motorcycle { displacement_cc: u32 },
}

/// Outcome of an odometer update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MileageUpdate {
    /// The odometer was advanced to the requested value.
    Applied,
    /// The requested value was below the current reading; nothing changed.
    Stale { current: u32, requested: u32 },
}

/// A fleet vehicle with a monotonic odometer and a single-unit
/// availability flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub plate: String,
    pub make: String,
    pub model: String,
    pub kind: VehicleKind,
    mileage: u32,
    available: bool,
}

impl Vehicle {
    pub fn new(
        plate: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
        kind: VehicleKind,
        mileage: u32,
    ) -> Self {
        Self {
            plate: plate.into(),
            make: make.into(),
            model: model.into(),
            kind,
            mileage,
            available: true,
        }
    }

    pub fn mileage(&self) -> u32 {
        self.mileage
    }

    /// Advance the odometer. The reading only moves forward: a request
    /// below the current value is ignored and reported as stale, so the
    /// post-call value is always max(current, requested).
    pub fn update_mileage(&mut self, km: u32) -> MileageUpdate {
        if km < self.mileage {
            tracing::warn!(
                plate = %self.plate,
                current = self.mileage,
                requested = km,
                "stale mileage update ignored"
            );
            return MileageUpdate::Stale {
                current: self.mileage,
                requested: km,
            };
        }
        self.mileage = km;
        MileageUpdate::Applied
    }
}

impl Resource for Vehicle {
    /// The end mileage, applied to the odometer on close.
    type Closure = u32;

    fn key(&self) -> &str {
        &self.plate
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn reading(&self) -> Option<u32> {
        Some(self.mileage)
    }

    fn hand_out(&mut self) {
        self.available = false;
    }

    fn take_back(&mut self, end_mileage: &u32) {
        self.update_mileage(*end_mileage);
        self.available = true;
    }
}

impl std::fmt::Display for Vehicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            VehicleKind::Car { doors, fuel } => write!(
                f,
                "{} {} {} ({} doors, {}), {} km",
                self.plate, self.make, self.model, doors, fuel, self.mileage
            ),
            VehicleKind::Motorcycle { displacement_cc } => write!(
                f,
                "{} {} {} ({}cc), {} km",
                self.plate, self.make, self.model, displacement_cc, self.mileage
            ),
        }
    }
}

/// A licensed driver. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub name: String,
    pub licence: String,
}

impl Driver {
    pub fn new(name: impl Into<String>, licence: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            licence: licence.into(),
        }
    }
}

impl std::fmt::Display for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (licence {})", self.name, self.licence)
    }
}

/// The fleet registry: vehicles plus reservation history.
pub type Fleet = Registry<Vehicle, Driver>;

/// A reservation binds a driver to a vehicle; the closing value is the
/// end mileage.
pub type Reservation = Transaction<Driver, u32>;

#[cfg(test)]
mod tests {
    use super::*;

    fn car() -> Vehicle {
        Vehicle::new(
            "AA-123-BB",
            "Renault",
            "Clio",
            VehicleKind::Car {
                doors: 5,
                fuel: "petrol".to_string(),
            },
            45_000,
        )
    }

    #[test]
    fn test_new_vehicle_is_available() {
        assert!(car().is_available());
    }

    #[test]
    fn test_mileage_update_is_monotonic() {
        let mut vehicle = car();

        assert_eq!(vehicle.update_mileage(45_300), MileageUpdate::Applied);
        assert_eq!(vehicle.mileage(), 45_300);

        // Equal value is accepted.
        assert_eq!(vehicle.update_mileage(45_300), MileageUpdate::Applied);

        let outcome = vehicle.update_mileage(44_000);
        assert_eq!(
            outcome,
            MileageUpdate::Stale {
                current: 45_300,
                requested: 44_000
            }
        );
        assert_eq!(vehicle.mileage(), 45_300);
    }

    #[test]
    fn test_hand_out_and_take_back_flip_availability() {
        let mut vehicle = car();
        vehicle.hand_out();
        assert!(!vehicle.is_available());

        vehicle.take_back(&45_300);
        assert!(vehicle.is_available());
        assert_eq!(vehicle.mileage(), 45_300);
    }

    #[test]
    fn test_take_back_with_stale_mileage_still_releases() {
        let mut vehicle = car();
        vehicle.hand_out();

        vehicle.take_back(&40_000);
        assert!(vehicle.is_available());
        assert_eq!(vehicle.mileage(), 45_000);
    }

    #[test]
    fn test_display_per_kind() {
        assert_eq!(
            car().to_string(),
            "AA-123-BB Renault Clio (5 doors, petrol), 45000 km"
        );

        let moto = Vehicle::new(
            "EE-789-FF",
            "Yamaha",
            "MT-07",
            VehicleKind::Motorcycle { displacement_cc: 689 },
            8_000,
        );
        assert_eq!(moto.to_string(), "EE-789-FF Yamaha MT-07 (689cc), 8000 km");
    }
}
