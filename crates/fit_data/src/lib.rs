//! Static data loading shared by fit_cli and the integration tests.
//!
//! A content directory holds `meta.json`, `attributes.json`, `effects.json`,
//! `types.json` and optionally `mutations.json`.

use anyhow::{ensure, Context, Result};
use fit_core::{
    AttributeDef, AttributeId, EffectDef, EffectId, GameContent, MutationDef, SimulationInput,
    StaticData, TypeDef,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

#[derive(Deserialize)]
struct MetaFile {
    content_version: String,
}

fn read_json<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T> {
    let path = dir.join(file);
    let text =
        std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {file}"))
}

/// Checks cross references in loaded content.
///
/// Catches mistakes like a type carrying an unknown effect, a modifier
/// naming an attribute that does not exist, or a mutation whose result type
/// is missing.
pub fn validate_content(content: &GameContent) -> Result<()> {
    let attribute_ids: HashSet<AttributeId> =
        content.attributes().map(|def| def.attribute_id).collect();
    let effect_ids: HashSet<EffectId> = content.effects().map(|def| def.effect_id).collect();

    for def in content.types() {
        for attribute_id in def.attributes.keys() {
            ensure!(
                attribute_ids.contains(attribute_id),
                "type {} '{}' attribute {} is not a known attribute",
                def.type_id,
                def.name,
                attribute_id,
            );
        }
        for effect_id in &def.effects {
            ensure!(
                effect_ids.contains(effect_id),
                "type {} '{}' effect {} is not a known effect",
                def.type_id,
                def.name,
                effect_id,
            );
        }
    }

    for effect in content.effects() {
        for info in &effect.modifier_info {
            for attribute_id in [info.modified_attribute_id, info.modifying_attribute_id] {
                ensure!(
                    attribute_ids.contains(&attribute_id),
                    "effect {} '{}' modifier attribute {} is not a known attribute",
                    effect.effect_id,
                    effect.name,
                    attribute_id,
                );
            }
        }
    }

    for mutation in content.mutations() {
        for type_id in [mutation.base_type_id, mutation.result_type_id] {
            ensure!(
                content.item_type(type_id).is_some(),
                "mutation '{}' references unknown type {}",
                mutation.name,
                type_id,
            );
        }
    }

    Ok(())
}

pub fn load_content(content_dir: &str) -> Result<GameContent> {
    let dir = Path::new(content_dir);
    let meta: MetaFile = read_json(dir, "meta.json")?;
    let attributes: Vec<AttributeDef> = read_json(dir, "attributes.json")?;
    let effects: Vec<EffectDef> = read_json(dir, "effects.json")?;
    let types: Vec<TypeDef> = read_json(dir, "types.json")?;
    let mutations: Vec<MutationDef> = if dir.join("mutations.json").exists() {
        read_json(dir, "mutations.json")?
    } else {
        Vec::new()
    };

    tracing::info!(
        content_version = %meta.content_version,
        types = types.len(),
        effects = effects.len(),
        attributes = attributes.len(),
        mutations = mutations.len(),
        "content loaded"
    );

    let content = GameContent::new(meta.content_version, types, attributes, effects, mutations);
    validate_content(&content).context("validating content")?;
    Ok(content)
}

/// Reads a serialized fitting.
pub fn load_fit(path: &str) -> Result<SimulationInput> {
    let json = std::fs::read_to_string(path).with_context(|| format!("reading fit file: {path}"))?;
    serde_json::from_str(&json).with_context(|| format!("parsing fit file: {path}"))
}
