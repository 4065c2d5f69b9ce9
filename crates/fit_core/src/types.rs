//! Type definitions for `fit_core`.
//!
//! ID newtypes, module status and slot flags, and the input/output shapes the
//! calculator consumes and produces.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::attributes::AttributeStore;

// ---------------------------------------------------------------------------
// ID newtypes
// ---------------------------------------------------------------------------

macro_rules! numeric_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(TypeId);
numeric_id!(AttributeId);
numeric_id!(EffectId);
numeric_id!(GroupId);

/// Type id of the generic character item that owns skills and implants.
pub const CHARACTER_TYPE_ID: TypeId = TypeId(1373);

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Static-data category of an item type, as far as the engine cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Ship,
    Module,
    Subsystem,
    Charge,
    Drone,
    Fighter,
    Implant,
    Skill,
    Character,
    Environment,
    Other,
}

impl ItemCategory {
    pub fn from_category_id(category_id: i32) -> Self {
        match category_id {
            1 => Self::Character,
            6 => Self::Ship,
            7 => Self::Module,
            8 => Self::Charge,
            16 => Self::Skill,
            18 => Self::Drone,
            20 => Self::Implant,
            32 => Self::Subsystem,
            87 => Self::Fighter,
            2 => Self::Environment,
            _ => Self::Other,
        }
    }

    /// Sources of these categories never suffer the stacking penalty.
    pub const fn exempt_from_stacking(self) -> bool {
        matches!(
            self,
            Self::Ship | Self::Charge | Self::Skill | Self::Implant | Self::Subsystem
        )
    }

    /// Categories that occupy a ship slot.
    pub const fn is_fittable(self) -> bool {
        matches!(self, Self::Module | Self::Subsystem)
    }
}

// ---------------------------------------------------------------------------
// Module status and slot flags
// ---------------------------------------------------------------------------

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ModuleStatus {
    #[default]
    Offline,
    Online,
    Active,
    Overloaded,
}

impl ModuleStatus {
    /// One state lower, saturating at `Offline`.
    pub const fn demoted(self) -> Self {
        match self {
            Self::Overloaded => Self::Active,
            Self::Active => Self::Online,
            Self::Online | Self::Offline => Self::Offline,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    Hi,
    Med,
    Low,
    Rig,
    Subsystem,
}

impl SlotKind {
    const fn prefix(self) -> &'static str {
        match self {
            Self::Hi => "HiSlot",
            Self::Med => "MedSlot",
            Self::Low => "LoSlot",
            Self::Rig => "RigSlot",
            Self::Subsystem => "SubSystemSlot",
        }
    }

    pub const ALL: [SlotKind; 5] = [Self::Hi, Self::Med, Self::Low, Self::Rig, Self::Subsystem];
}

/// Position of a module on the ship, e.g. `HiSlot0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotFlag {
    pub kind: SlotKind,
    pub index: u8,
}

impl SlotFlag {
    pub const fn new(kind: SlotKind, index: u8) -> Self {
        Self { kind, index }
    }
}

impl fmt::Display for SlotFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSlotFlagError(pub String);

impl fmt::Display for ParseSlotFlagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognised slot flag '{}'", self.0)
    }
}

impl std::error::Error for ParseSlotFlagError {}

impl FromStr for SlotFlag {
    type Err = ParseSlotFlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Longest prefixes first: "SubSystemSlot" must not be read as anything shorter.
        let mut kinds = SlotKind::ALL;
        kinds.sort_by_key(|kind| std::cmp::Reverse(kind.prefix().len()));
        for kind in kinds {
            if let Some(rest) = s.strip_prefix(kind.prefix()) {
                return rest
                    .parse::<u8>()
                    .map(|index| SlotFlag { kind, index })
                    .map_err(|_| ParseSlotFlagError(s.to_string()));
            }
        }
        Err(ParseSlotFlagError(s.to_string()))
    }
}

impl TryFrom<String> for SlotFlag {
    type Error = ParseSlotFlagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SlotFlag> for String {
    fn from(flag: SlotFlag) -> Self {
        flag.to_string()
    }
}

// ---------------------------------------------------------------------------
// Item identity inside one calculation
// ---------------------------------------------------------------------------

/// Addresses one item instance of a [`SimulationInput`] during a calculation.
///
/// Indices refer to positions in the input lists; `Charge(i)` is the charge
/// loaded in `modules[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKey {
    Ship,
    Character,
    Module(usize),
    Charge(usize),
    Drone(usize),
    Fighter(usize),
    Implant(usize),
    Skill(TypeId),
    Environment(usize),
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Abyssal-style mutation applied to an item: the mutaplasmid used and the
/// rolled attribute values, layered over the resulting type's base attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mutation {
    pub mutaplasmid_id: TypeId,
    #[serde(default)]
    pub attributes: BTreeMap<AttributeId, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipInput {
    pub type_id: TypeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterInput {
    pub type_id: TypeId,
}

impl Default for CharacterInput {
    fn default() -> Self {
        Self {
            type_id: CHARACTER_TYPE_ID,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeInput {
    pub type_id: TypeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleInput {
    pub type_id: TypeId,
    pub flag: SlotFlag,
    #[serde(default)]
    pub status: ModuleStatus,
    #[serde(default)]
    pub charge: Option<ChargeInput>,
    #[serde(default)]
    pub mutation: Option<Mutation>,
    /// When this module's current status was accepted; lower is older.
    #[serde(default)]
    pub state_stamp: u64,
}

impl ModuleInput {
    pub fn new(type_id: TypeId, flag: SlotFlag) -> Self {
        Self {
            type_id,
            flag,
            status: ModuleStatus::Offline,
            charge: None,
            mutation: None,
            state_stamp: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneInput {
    pub type_id: TypeId,
    pub quantity: u32,
    #[serde(default)]
    pub active_count: u32,
    #[serde(default)]
    pub mutation: Option<Mutation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterInput {
    pub type_id: TypeId,
    pub quantity: u32,
    #[serde(default)]
    pub tube_id: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplantInput {
    pub type_id: TypeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentInput {
    pub type_id: TypeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoItem {
    pub type_id: TypeId,
    pub quantity: u32,
}

/// Everything one calculation reads. Edited only by replacing it wholesale
/// (see [`crate::apply_edits`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    pub ship: ShipInput,
    #[serde(default)]
    pub character: CharacterInput,
    #[serde(default)]
    pub modules: Vec<ModuleInput>,
    #[serde(default)]
    pub drones: Vec<DroneInput>,
    #[serde(default)]
    pub implants: Vec<ImplantInput>,
    #[serde(default)]
    pub fighters: Vec<FighterInput>,
    #[serde(default)]
    pub cargo: Vec<CargoItem>,
    #[serde(default)]
    pub environment: Vec<EnvironmentInput>,
    /// Skill type id → trained level (0–5).
    #[serde(default)]
    pub skills: BTreeMap<TypeId, u8>,
    /// Next value handed out as a module `state_stamp`.
    #[serde(default)]
    pub next_stamp: u64,
}

impl SimulationInput {
    pub fn new(ship_type: TypeId) -> Self {
        Self {
            ship: ShipInput { type_id: ship_type },
            character: CharacterInput::default(),
            modules: Vec::new(),
            drones: Vec::new(),
            implants: Vec::new(),
            fighters: Vec::new(),
            cargo: Vec::new(),
            environment: Vec::new(),
            skills: BTreeMap::new(),
            next_stamp: 0,
        }
    }

    pub fn module_index(&self, flag: SlotFlag) -> Option<usize> {
        self.modules.iter().position(|module| module.flag == flag)
    }

    pub fn module(&self, flag: SlotFlag) -> Option<&ModuleInput> {
        self.modules.iter().find(|module| module.flag == flag)
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One item with its final calculated attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemOutput {
    pub type_id: TypeId,
    pub group_id: GroupId,
    pub name: String,
    pub attributes: AttributeStore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipOutput {
    pub item: ItemOutput,
    /// Character-level derived values (e.g. `maxActiveDrones`).
    pub character_attributes: AttributeStore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleOutput {
    pub flag: SlotFlag,
    pub status: ModuleStatus,
    pub item: ItemOutput,
    pub charge: Option<ItemOutput>,
    /// How many charges fit in the module: `floor(capacity / charge volume)`.
    pub charge_quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneOutput {
    pub item: ItemOutput,
    pub quantity: u32,
    pub active_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterOutput {
    pub item: ItemOutput,
    pub quantity: u32,
    pub tube_id: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillOutput {
    pub item: ItemOutput,
    pub level: u8,
}

/// Fully calculated fit. Built in one piece and never patched afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub ship: ShipOutput,
    pub modules: Vec<ModuleOutput>,
    pub drones: Vec<DroneOutput>,
    pub fighters: Vec<FighterOutput>,
    pub implants: Vec<ItemOutput>,
    pub skills: Vec<SkillOutput>,
    pub environment: Vec<ItemOutput>,
}

impl SimulationOutput {
    pub fn module(&self, flag: SlotFlag) -> Option<&ModuleOutput> {
        self.modules.iter().find(|module| module.flag == flag)
    }

    pub fn drone(&self, type_id: TypeId) -> Option<&DroneOutput> {
        self.drones.iter().find(|drone| drone.item.type_id == type_id)
    }
}

// ---------------------------------------------------------------------------
// Calculated-or-base values
// ---------------------------------------------------------------------------

/// A value known from static data, optionally superseded by a calculated one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved<T> {
    pub base: T,
    pub calculated: Option<T>,
}

impl<T: Copy> Resolved<T> {
    pub fn new(base: T, calculated: Option<T>) -> Self {
        Self { base, calculated }
    }

    pub fn effective(&self) -> T {
        self.calculated.unwrap_or(self.base)
    }
}
