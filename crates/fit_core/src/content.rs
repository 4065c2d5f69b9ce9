//! Static game data: the read-only repository the calculator is built over.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;

use crate::effects::{EffectCategory, ModifierInfo};
use crate::types::{AttributeId, EffectId, GroupId, ItemCategory, Mutation, TypeId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDef {
    pub type_id: TypeId,
    pub name: String,
    pub group_id: GroupId,
    pub category_id: i32,
    #[serde(default)]
    pub attributes: BTreeMap<AttributeId, f64>,
    #[serde(default)]
    pub effects: SmallVec<[EffectId; 8]>,
    #[serde(default)]
    pub icon_file: Option<String>,
}

impl TypeDef {
    pub fn category(&self) -> ItemCategory {
        ItemCategory::from_category_id(self.category_id)
    }

    pub fn has_effect(&self, effect_id: EffectId) -> bool {
        self.effects.contains(&effect_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDef {
    pub attribute_id: AttributeId,
    pub name: String,
    #[serde(default)]
    pub default_value: f64,
    /// Stackable attributes are never stacking-penalized.
    #[serde(default = "default_true")]
    pub stackable: bool,
    #[serde(default = "default_true")]
    pub high_is_good: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectDef {
    pub effect_id: EffectId,
    pub name: String,
    pub category: EffectCategory,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_offensive: bool,
    #[serde(default)]
    pub is_assistance: bool,
    #[serde(default)]
    pub modifier_info: Vec<ModifierInfo>,
    #[serde(default)]
    pub target_type_name: Option<String>,
    #[serde(default)]
    pub target_group_id: Option<GroupId>,
}

/// Result of applying a mutaplasmid to a base type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationDef {
    pub base_type_id: TypeId,
    pub mutaplasmid_id: TypeId,
    pub result_type_id: TypeId,
    pub name: String,
    #[serde(default)]
    pub icon_file: Option<String>,
}

/// Read-only access to static game data.
///
/// Every lookup may miss; callers treat a miss as absent data, never as an
/// error.
pub trait StaticData {
    fn item_type(&self, type_id: TypeId) -> Option<&TypeDef>;
    fn effect(&self, effect_id: EffectId) -> Option<&EffectDef>;
    fn attribute(&self, attribute_id: AttributeId) -> Option<&AttributeDef>;
    fn attribute_by_name(&self, name: &str) -> Option<&AttributeDef>;
    fn mutation(&self, base_type_id: TypeId, mutaplasmid_id: TypeId) -> Option<&MutationDef>;

    /// Type an item actually is once `mutation` is applied.
    fn resolved_type(&self, type_id: TypeId, mutation: Option<&Mutation>) -> TypeId {
        mutation
            .and_then(|mutation| self.mutation(type_id, mutation.mutaplasmid_id))
            .map_or(type_id, |def| def.result_type_id)
    }
}

/// In-memory static data, indexed for lookup.
#[derive(Debug, Clone, Default)]
pub struct GameContent {
    pub content_version: String,
    types: AHashMap<TypeId, TypeDef>,
    effects: AHashMap<EffectId, EffectDef>,
    attributes: AHashMap<AttributeId, AttributeDef>,
    attribute_names: AHashMap<String, AttributeId>,
    mutations: AHashMap<(TypeId, TypeId), MutationDef>,
}

impl GameContent {
    pub fn new(
        content_version: impl Into<String>,
        types: Vec<TypeDef>,
        attributes: Vec<AttributeDef>,
        effects: Vec<EffectDef>,
        mutations: Vec<MutationDef>,
    ) -> Self {
        let attribute_names = attributes
            .iter()
            .map(|def| (def.name.clone(), def.attribute_id))
            .collect();
        Self {
            content_version: content_version.into(),
            types: types.into_iter().map(|def| (def.type_id, def)).collect(),
            effects: effects.into_iter().map(|def| (def.effect_id, def)).collect(),
            attributes: attributes
                .into_iter()
                .map(|def| (def.attribute_id, def))
                .collect(),
            attribute_names,
            mutations: mutations
                .into_iter()
                .map(|def| ((def.base_type_id, def.mutaplasmid_id), def))
                .collect(),
        }
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    pub fn effects(&self) -> impl Iterator<Item = &EffectDef> {
        self.effects.values()
    }

    pub fn attributes(&self) -> impl Iterator<Item = &AttributeDef> {
        self.attributes.values()
    }

    pub fn mutations(&self) -> impl Iterator<Item = &MutationDef> {
        self.mutations.values()
    }

    pub fn insert_type(&mut self, def: TypeDef) {
        self.types.insert(def.type_id, def);
    }

    pub fn insert_effect(&mut self, def: EffectDef) {
        self.effects.insert(def.effect_id, def);
    }

    pub fn insert_attribute(&mut self, def: AttributeDef) {
        self.attribute_names.insert(def.name.clone(), def.attribute_id);
        self.attributes.insert(def.attribute_id, def);
    }
}

impl StaticData for GameContent {
    fn item_type(&self, type_id: TypeId) -> Option<&TypeDef> {
        self.types.get(&type_id)
    }

    fn effect(&self, effect_id: EffectId) -> Option<&EffectDef> {
        self.effects.get(&effect_id)
    }

    fn attribute(&self, attribute_id: AttributeId) -> Option<&AttributeDef> {
        self.attributes.get(&attribute_id)
    }

    fn attribute_by_name(&self, name: &str) -> Option<&AttributeDef> {
        self.attribute_names
            .get(name)
            .and_then(|id| self.attributes.get(id))
    }

    fn mutation(&self, base_type_id: TypeId, mutaplasmid_id: TypeId) -> Option<&MutationDef> {
        self.mutations.get(&(base_type_id, mutaplasmid_id))
    }
}
