//! The levelled entity record.
//!
//! An [`Entity`] couples a level and an experience total through its
//! [`Formula`]. The two fields are never written independently: setting one
//! recomputes the other, so immediately after any mutation
//! `experience == formula.experience_for_level(level)` (after `set_level`) or
//! `level == formula.level_for_experience(experience)` (after `set_experience`).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::formula::Formula;
use crate::store::Record;
use crate::types::EntityId;

/// A game object stub tracked by an [`EntityStore`](crate::store::EntityStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    id: EntityId,
    name: String,
    level: i64,
    experience: i64,
    /// Files written before formulas were persisted carry no `formula` field.
    #[serde(default)]
    formula: Formula,
}

impl Entity {
    /// Create an entity at level 0 with no experience.
    #[must_use]
    pub fn new(name: impl Into<String>, formula: Formula) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            level: 0,
            experience: 0,
            formula,
        }
    }

    /// Create an entity at `level`, with experience derived from the formula.
    #[must_use]
    pub fn with_level(name: impl Into<String>, level: i64, formula: Formula) -> Self {
        let mut entity = Self::new(name, formula);
        entity.set_level(level);
        entity
    }

    /// Unique id, fixed at creation.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the entity.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Current level.
    #[must_use]
    pub fn level(&self) -> i64 {
        self.level
    }

    /// Set the level and recompute experience from the formula.
    pub fn set_level(&mut self, level: i64) {
        self.level = level;
        self.experience = self.formula.experience_for_level(level);
    }

    /// Current experience total.
    #[must_use]
    pub fn experience(&self) -> i64 {
        self.experience
    }

    /// Set the experience total and recompute the level from the formula.
    pub fn set_experience(&mut self, experience: i64) {
        self.experience = experience;
        self.level = self.formula.level_for_experience(experience);
    }

    /// The formula linking level and experience.
    #[must_use]
    pub fn formula(&self) -> Formula {
        self.formula
    }

    /// Swap the formula. Level and experience are left as they are until the
    /// next mutation.
    pub fn set_formula(&mut self, formula: Formula) {
        self.formula = formula;
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new("", Formula::Linear)
    }
}

impl Record for Entity {
    type Id = EntityId;

    fn key(&self) -> &EntityId {
        &self.id
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{}\n{}\n{}",
            self.id, self.name, self.level, self.experience
        )
    }
}
