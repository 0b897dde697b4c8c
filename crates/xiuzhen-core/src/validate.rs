//! Structural invariants of a [`GameState`].

use crate::catalog::MAX_FEATURE_LEVEL;
use crate::model::{CaveFeature, GameState};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Validation errors for state invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("realm thresholds must strictly increase (at index {0})")]
    RealmOrder(usize),
    #[error("{which} cursor {index} is out of range (len {len})")]
    CursorOutOfRange {
        which: &'static str,
        index: usize,
        len: usize,
    },
    #[error("duplicate id {id:?} in {collection}")]
    DuplicateId {
        collection: &'static str,
        id: String,
    },
    #[error("equipped index disagrees with equipment flags")]
    EquippedIndexMismatch,
    #[error("active pet index disagrees with pet flags")]
    ActivePetMismatch,
    #[error("cave feature {0:?} above max level")]
    FeatureLevel(CaveFeature),
    #[error("log holds {len} lines, capacity {capacity}")]
    LogOverflow { len: usize, capacity: usize },
    #[error("resource {0} is negative or non-finite")]
    BadResource(&'static str),
}

fn unique_ids<'a>(
    collection: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateId {
                collection,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

/// Validate the state, including derived indexes against the entity flags.
pub fn validate_state(state: &GameState, log_capacity: usize) -> Result<(), ValidationError> {
    for (name, value) in [
        ("lingshi", state.lingshi),
        ("shengwang", state.shengwang),
        ("yearsCultivated", state.years_cultivated),
        ("xiuwei", state.xiuwei),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::BadResource(name));
        }
    }

    if let Some(i) = state
        .realms
        .windows(2)
        .position(|w| w[0].need_xiuwei >= w[1].need_xiuwei)
    {
        return Err(ValidationError::RealmOrder(i + 1));
    }
    for (which, index, len) in [
        ("realm", state.realm_index, state.realms.len()),
        ("root", state.root_index, state.roots.len()),
    ] {
        if index >= len {
            return Err(ValidationError::CursorOutOfRange { which, index, len });
        }
    }

    unique_ids("manuals", state.manuals.iter().map(|x| x.id.as_str()))?;
    unique_ids("inventory", state.inventory.iter().map(|x| x.id.as_str()))?;
    unique_ids("pills", state.pills.iter().map(|x| x.id.as_str()))?;
    unique_ids("equipment", state.equipment.iter().map(|x| x.id.as_str()))?;
    unique_ids("pets", state.pets.iter().map(|x| x.id.as_str()))?;
    unique_ids("secretManuals", state.secret_manuals.iter().map(|x| x.id.as_str()))?;
    unique_ids("activities", state.activities.iter().map(|x| x.id.as_str()))?;
    unique_ids("dungeons", state.dungeons.iter().map(|x| x.id.as_str()))?;
    unique_ids("logs", state.logs.iter().map(|x| x.id.as_str()))?;

    let mut by_slot = BTreeMap::new();
    for e in state.equipment.iter().filter(|e| e.equipped) {
        if by_slot.insert(e.slot, e.id.clone()).is_some() {
            return Err(ValidationError::EquippedIndexMismatch);
        }
    }
    if by_slot != state.equipped_items {
        return Err(ValidationError::EquippedIndexMismatch);
    }

    let mut active = state.pets.iter().filter(|p| p.active).map(|p| p.id.as_str());
    let first = active.next();
    if active.next().is_some() || first != state.active_pet.as_deref() {
        return Err(ValidationError::ActivePetMismatch);
    }

    for f in CaveFeature::ALL {
        if state.cave.features.level(f) > MAX_FEATURE_LEVEL {
            return Err(ValidationError::FeatureLevel(f));
        }
    }

    if state.logs.len() > log_capacity {
        return Err(ValidationError::LogOverflow {
            len: state.logs.len(),
            capacity: log_capacity,
        });
    }
    Ok(())
}
