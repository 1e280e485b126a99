//! Shared vocabulary: text inputs, tri-state answers, requirement groups.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TriState
// ---------------------------------------------------------------------------

/// Answer to a yes/no attribute where the user may have no preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriState {
    #[default]
    Indifferent,
    Yes,
    No,
}

impl TriState {
    /// All variants in the order a select box lists them.
    pub const ALL: [TriState; 3] = [TriState::Indifferent, TriState::Yes, TriState::No];

    /// Wire / form value.
    pub fn as_str(self) -> &'static str {
        match self {
            TriState::Indifferent => "indifferent",
            TriState::Yes => "yes",
            TriState::No => "no",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            TriState::Indifferent => "Indifferent",
            TriState::Yes => "Yes",
            TriState::No => "No",
        }
    }

    /// Lenient parse for form input. Unknown values mean no preference, so
    /// this never fails.
    pub fn from_form_value(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" => TriState::Yes,
            "no" => TriState::No,
            _ => TriState::Indifferent,
        }
    }

    /// `Some(bool)` for an explicit answer, `None` when indifferent.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            TriState::Indifferent => None,
            TriState::Yes => Some(true),
            TriState::No => Some(false),
        }
    }
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// Free-text inputs of the form. These are the only fields that can fail
/// validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Url,
    PriceMax,
    SqmMin,
    SqmMax,
    BathroomsMin,
    FloorMin,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Url,
        Field::PriceMax,
        Field::SqmMin,
        Field::SqmMax,
        Field::BathroomsMin,
        Field::FloorMin,
    ];

    /// Input name used in HTML forms and in serialized error maps.
    pub fn name(self) -> &'static str {
        match self {
            Field::Url => "url",
            Field::PriceMax => "price_max",
            Field::SqmMin => "sqm_min",
            Field::SqmMax => "sqm_max",
            Field::BathroomsMin => "bathrooms_min",
            Field::FloorMin => "floor_min",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Url => "Listing URL",
            Field::PriceMax => "Max price",
            Field::SqmMin => "Min surface (sqm)",
            Field::SqmMax => "Max surface (sqm)",
            Field::BathroomsMin => "Bathrooms (min)",
            Field::FloorMin => "Floor (min)",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Url => "https://...",
            Field::PriceMax => "e.g. 450000",
            Field::SqmMin => "e.g. 80",
            Field::SqmMax => "e.g. 100",
            Field::BathroomsMin => "e.g. 2",
            Field::FloorMin => "e.g. 3",
        }
    }
}

// ---------------------------------------------------------------------------
// Feature
// ---------------------------------------------------------------------------

/// Boolean listing attributes answered with a [`TriState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Elevator,
    OutdoorParking,
    Garage,
    Balcony,
    IsAttic,
    NeedsRestructuring,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::Elevator,
        Feature::OutdoorParking,
        Feature::Garage,
        Feature::Balcony,
        Feature::IsAttic,
        Feature::NeedsRestructuring,
    ];

    /// The requirement group this feature belongs to.
    pub fn requirement(self) -> Requirement {
        match self {
            Feature::Elevator => Requirement::Elevator,
            Feature::OutdoorParking => Requirement::OutdoorParking,
            Feature::Garage => Requirement::Garage,
            Feature::Balcony => Requirement::Balcony,
            Feature::IsAttic => Requirement::IsAttic,
            Feature::NeedsRestructuring => Requirement::NeedsRestructuring,
        }
    }

    /// JSON key, also used as the select input name.
    pub fn key(self) -> &'static str {
        self.requirement().key()
    }

    pub fn title(self) -> &'static str {
        self.requirement().title()
    }
}

// ---------------------------------------------------------------------------
// Requirement
// ---------------------------------------------------------------------------

/// The ten requirement groups of an evaluation request. Each carries its own
/// must-have flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Requirement {
    Price,
    SurfaceSqm,
    Bathrooms,
    Elevator,
    OutdoorParking,
    Garage,
    Balcony,
    IsAttic,
    Floor,
    NeedsRestructuring,
}

impl Requirement {
    pub const ALL: [Requirement; 10] = [
        Requirement::Price,
        Requirement::SurfaceSqm,
        Requirement::Bathrooms,
        Requirement::Elevator,
        Requirement::OutdoorParking,
        Requirement::Garage,
        Requirement::Balcony,
        Requirement::IsAttic,
        Requirement::Floor,
        Requirement::NeedsRestructuring,
    ];

    /// Key of this group in the backend JSON contract.
    pub fn key(self) -> &'static str {
        match self {
            Requirement::Price => "price",
            Requirement::SurfaceSqm => "surface_sqm",
            Requirement::Bathrooms => "bathrooms",
            Requirement::Elevator => "elevator",
            Requirement::OutdoorParking => "outdoor_parking",
            Requirement::Garage => "garage",
            Requirement::Balcony => "balcony",
            Requirement::IsAttic => "is_attic",
            Requirement::Floor => "floor",
            Requirement::NeedsRestructuring => "needs_restructuring",
        }
    }

    /// Checkbox input name for the must-have flag.
    pub fn must_have_input(self) -> &'static str {
        match self {
            Requirement::Price => "price_must_have",
            Requirement::SurfaceSqm => "surface_sqm_must_have",
            Requirement::Bathrooms => "bathrooms_must_have",
            Requirement::Elevator => "elevator_must_have",
            Requirement::OutdoorParking => "outdoor_parking_must_have",
            Requirement::Garage => "garage_must_have",
            Requirement::Balcony => "balcony_must_have",
            Requirement::IsAttic => "is_attic_must_have",
            Requirement::Floor => "floor_must_have",
            Requirement::NeedsRestructuring => "needs_restructuring_must_have",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Requirement::Price => "Price",
            Requirement::SurfaceSqm => "Surface",
            Requirement::Bathrooms => "Bathrooms",
            Requirement::Elevator => "Elevator",
            Requirement::OutdoorParking => "Outdoor parking",
            Requirement::Garage => "Garage",
            Requirement::Balcony => "Balcony",
            Requirement::IsAttic => "Attic",
            Requirement::Floor => "Floor",
            Requirement::NeedsRestructuring => "Needs restructuring",
        }
    }

    /// Initial state of the must-have checkbox on a fresh form.
    pub fn default_must_have(self) -> bool {
        !matches!(
            self,
            Requirement::OutdoorParking
                | Requirement::Garage
                | Requirement::Balcony
                | Requirement::IsAttic
        )
    }
}
