// src/category.rs

//! Emission factor tables as closed enumerations.
//!
//! The storefront used to key factors by free-form strings, so a typo in a
//! category silently resolved to a zero factor and produced a zero-emission
//! activity. Each tabled activity kind now carries its own category enum and
//! parsing an unknown label is an error the API surfaces as a 400. Travel,
//! food and waste have no factor table; their categories keep a free-form
//! label and resolve to a zero factor by construction.
//!
//! Factors are signed kg CO2 per unit of the kind's measure (km, kWh or
//! item). Negative factors represent a saving versus the conventional
//! alternative and only exist in the shopping table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::activity::ActivityKind;
use crate::error::CarbonError;

/// `true` when a computed emission value counts as an eco-friendly saving.
pub fn is_eco_friendly(emissions: f64) -> bool {
  emissions < 0.0
}

/// Kg CO2 per kilometre travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
  CarPetrol,
  CarDiesel,
  CarElectric,
  Bus,
  Train,
  Motorcycle,
  Bicycle,
  Walking,
  FlightDomestic,
  FlightInternational,
}

impl TransportMode {
  pub const ALL: [TransportMode; 10] = [
    TransportMode::CarPetrol,
    TransportMode::CarDiesel,
    TransportMode::CarElectric,
    TransportMode::Bus,
    TransportMode::Train,
    TransportMode::Motorcycle,
    TransportMode::Bicycle,
    TransportMode::Walking,
    TransportMode::FlightDomestic,
    TransportMode::FlightInternational,
  ];

  pub fn factor(&self) -> f64 {
    match self {
      TransportMode::CarPetrol => 0.22,
      TransportMode::CarDiesel => 0.20,
      TransportMode::CarElectric => 0.05,
      TransportMode::Bus => 0.10,
      TransportMode::Train => 0.04,
      TransportMode::Motorcycle => 0.15,
      TransportMode::Bicycle => 0.0,
      TransportMode::Walking => 0.0,
      TransportMode::FlightDomestic => 0.25,
      TransportMode::FlightInternational => 0.28,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      TransportMode::CarPetrol => "car_petrol",
      TransportMode::CarDiesel => "car_diesel",
      TransportMode::CarElectric => "car_electric",
      TransportMode::Bus => "bus",
      TransportMode::Train => "train",
      TransportMode::Motorcycle => "motorcycle",
      TransportMode::Bicycle => "bicycle",
      TransportMode::Walking => "walking",
      TransportMode::FlightDomestic => "flight_domestic",
      TransportMode::FlightInternational => "flight_international",
    }
  }
}

impl FromStr for TransportMode {
  type Err = CarbonError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .iter()
      .find(|mode| mode.as_str() == s)
      .copied()
      .ok_or_else(|| CarbonError::UnknownCategory {
        kind: ActivityKind::Transport,
        label: s.to_string(),
      })
  }
}

/// Kg CO2 per kWh drawn from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergySource {
  GridElectricity,
  SolarPower,
  WindPower,
  NaturalGas,
  Coal,
}

impl EnergySource {
  pub const ALL: [EnergySource; 5] = [
    EnergySource::GridElectricity,
    EnergySource::SolarPower,
    EnergySource::WindPower,
    EnergySource::NaturalGas,
    EnergySource::Coal,
  ];

  pub fn factor(&self) -> f64 {
    match self {
      EnergySource::GridElectricity => 0.5,
      EnergySource::SolarPower => 0.05,
      EnergySource::WindPower => 0.02,
      EnergySource::NaturalGas => 0.35,
      EnergySource::Coal => 0.82,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      EnergySource::GridElectricity => "grid_electricity",
      EnergySource::SolarPower => "solar_power",
      EnergySource::WindPower => "wind_power",
      EnergySource::NaturalGas => "natural_gas",
      EnergySource::Coal => "coal",
    }
  }
}

impl FromStr for EnergySource {
  type Err = CarbonError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .iter()
      .find(|source| source.as_str() == s)
      .copied()
      .ok_or_else(|| CarbonError::UnknownCategory {
        kind: ActivityKind::Energy,
        label: s.to_string(),
      })
  }
}

/// Kg CO2 per item purchased. Sustainable products carry negative factors:
/// the saving versus the conventional alternative they replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShoppingCategory {
  BambooToothbrush,
  OrganicCottonBag,
  SolarCharger,
  ReusableWaterBottle,
  LedBulb,
  OrganicFood,
  RecycledPaper,
  HempClothing,
  CorkYogaMat,
  PlasticToothbrush,
  PlasticBag,
  RegularCharger,
  DisposableBottle,
  IncandescentBulb,
  ConventionalFood,
  RegularPaper,
  SyntheticClothing,
  PvcYogaMat,
}

impl ShoppingCategory {
  pub const ALL: [ShoppingCategory; 18] = [
    ShoppingCategory::BambooToothbrush,
    ShoppingCategory::OrganicCottonBag,
    ShoppingCategory::SolarCharger,
    ShoppingCategory::ReusableWaterBottle,
    ShoppingCategory::LedBulb,
    ShoppingCategory::OrganicFood,
    ShoppingCategory::RecycledPaper,
    ShoppingCategory::HempClothing,
    ShoppingCategory::CorkYogaMat,
    ShoppingCategory::PlasticToothbrush,
    ShoppingCategory::PlasticBag,
    ShoppingCategory::RegularCharger,
    ShoppingCategory::DisposableBottle,
    ShoppingCategory::IncandescentBulb,
    ShoppingCategory::ConventionalFood,
    ShoppingCategory::RegularPaper,
    ShoppingCategory::SyntheticClothing,
    ShoppingCategory::PvcYogaMat,
  ];

  pub fn factor(&self) -> f64 {
    match self {
      ShoppingCategory::BambooToothbrush => -2.1,
      ShoppingCategory::OrganicCottonBag => -1.8,
      ShoppingCategory::SolarCharger => -15.2,
      ShoppingCategory::ReusableWaterBottle => -8.5,
      ShoppingCategory::LedBulb => -12.0,
      ShoppingCategory::OrganicFood => -0.5,
      ShoppingCategory::RecycledPaper => -1.2,
      ShoppingCategory::HempClothing => -3.5,
      ShoppingCategory::CorkYogaMat => -4.2,
      ShoppingCategory::PlasticToothbrush => 0.8,
      ShoppingCategory::PlasticBag => 0.3,
      ShoppingCategory::RegularCharger => 2.1,
      ShoppingCategory::DisposableBottle => 0.2,
      ShoppingCategory::IncandescentBulb => 1.5,
      ShoppingCategory::ConventionalFood => 2.5,
      ShoppingCategory::RegularPaper => 0.8,
      ShoppingCategory::SyntheticClothing => 5.2,
      ShoppingCategory::PvcYogaMat => 3.8,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      ShoppingCategory::BambooToothbrush => "bamboo_toothbrush",
      ShoppingCategory::OrganicCottonBag => "organic_cotton_bag",
      ShoppingCategory::SolarCharger => "solar_charger",
      ShoppingCategory::ReusableWaterBottle => "reusable_water_bottle",
      ShoppingCategory::LedBulb => "led_bulb",
      ShoppingCategory::OrganicFood => "organic_food",
      ShoppingCategory::RecycledPaper => "recycled_paper",
      ShoppingCategory::HempClothing => "hemp_clothing",
      ShoppingCategory::CorkYogaMat => "cork_yoga_mat",
      ShoppingCategory::PlasticToothbrush => "plastic_toothbrush",
      ShoppingCategory::PlasticBag => "plastic_bag",
      ShoppingCategory::RegularCharger => "regular_charger",
      ShoppingCategory::DisposableBottle => "disposable_bottle",
      ShoppingCategory::IncandescentBulb => "incandescent_bulb",
      ShoppingCategory::ConventionalFood => "conventional_food",
      ShoppingCategory::RegularPaper => "regular_paper",
      ShoppingCategory::SyntheticClothing => "synthetic_clothing",
      ShoppingCategory::PvcYogaMat => "pvc_yoga_mat",
    }
  }
}

impl FromStr for ShoppingCategory {
  type Err = CarbonError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .iter()
      .find(|category| category.as_str() == s)
      .copied()
      .ok_or_else(|| CarbonError::UnknownCategory {
        kind: ActivityKind::Shopping,
        label: s.to_string(),
      })
  }
}

/// Kg CO2 per kWh of household usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeUse {
  HeatingNaturalGas,
  CoolingAc,
  WaterHeating,
  Appliances,
  Lighting,
}

impl HomeUse {
  pub const ALL: [HomeUse; 5] = [
    HomeUse::HeatingNaturalGas,
    HomeUse::CoolingAc,
    HomeUse::WaterHeating,
    HomeUse::Appliances,
    HomeUse::Lighting,
  ];

  pub fn factor(&self) -> f64 {
    match self {
      HomeUse::HeatingNaturalGas => 0.19,
      HomeUse::CoolingAc => 0.5,
      HomeUse::WaterHeating => 0.3,
      HomeUse::Appliances => 0.5,
      HomeUse::Lighting => 0.5,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      HomeUse::HeatingNaturalGas => "heating_natural_gas",
      HomeUse::CoolingAc => "cooling_ac",
      HomeUse::WaterHeating => "water_heating",
      HomeUse::Appliances => "appliances",
      HomeUse::Lighting => "lighting",
    }
  }
}

impl FromStr for HomeUse {
  type Err = CarbonError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .iter()
      .find(|usage| usage.as_str() == s)
      .copied()
      .ok_or_else(|| CarbonError::UnknownCategory {
        kind: ActivityKind::Home,
        label: s.to_string(),
      })
  }
}

/// A (kind, category) pair resolved against the factor tables.
#[derive(Debug, Clone, PartialEq)]
pub enum EmissionCategory {
  Transport(TransportMode),
  Energy(EnergySource),
  Shopping(ShoppingCategory),
  Home(HomeUse),
  /// A category of a kind without a factor table (travel, food, waste).
  /// The label is kept verbatim for the log; the factor is always zero.
  Unrated { kind: ActivityKind, label: String },
}

impl EmissionCategory {
  /// Resolves a raw category label for the given kind. Unknown labels of
  /// tabled kinds are rejected; untabled kinds accept any label.
  pub fn parse(kind: ActivityKind, label: &str) -> Result<Self, CarbonError> {
    match kind {
      ActivityKind::Transport => label.parse().map(EmissionCategory::Transport),
      ActivityKind::Energy => label.parse().map(EmissionCategory::Energy),
      ActivityKind::Shopping => label.parse().map(EmissionCategory::Shopping),
      ActivityKind::Home => label.parse().map(EmissionCategory::Home),
      ActivityKind::Travel | ActivityKind::Food | ActivityKind::Waste => Ok(EmissionCategory::Unrated {
        kind,
        label: label.to_string(),
      }),
    }
  }

  pub fn kind(&self) -> ActivityKind {
    match self {
      EmissionCategory::Transport(_) => ActivityKind::Transport,
      EmissionCategory::Energy(_) => ActivityKind::Energy,
      EmissionCategory::Shopping(_) => ActivityKind::Shopping,
      EmissionCategory::Home(_) => ActivityKind::Home,
      EmissionCategory::Unrated { kind, .. } => *kind,
    }
  }

  pub fn label(&self) -> &str {
    match self {
      EmissionCategory::Transport(mode) => mode.as_str(),
      EmissionCategory::Energy(source) => source.as_str(),
      EmissionCategory::Shopping(category) => category.as_str(),
      EmissionCategory::Home(usage) => usage.as_str(),
      EmissionCategory::Unrated { label, .. } => label,
    }
  }

  /// Signed kg CO2 per unit of the kind's measure.
  pub fn factor(&self) -> f64 {
    match self {
      EmissionCategory::Transport(mode) => mode.factor(),
      EmissionCategory::Energy(source) => source.factor(),
      EmissionCategory::Shopping(category) => category.factor(),
      EmissionCategory::Home(usage) => usage.factor(),
      EmissionCategory::Unrated { .. } => 0.0,
    }
  }

  /// `factor * amount`, signed. Negative values are savings.
  pub fn emissions_for(&self, amount: f64) -> f64 {
    self.factor() * amount
  }
}

impl fmt::Display for EmissionCategory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}
