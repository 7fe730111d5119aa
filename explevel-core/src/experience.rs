//! Derived experience calculations.
//!
//! Every operation comes in two calling conventions:
//!
//! - free functions taking an [`Entity`] (or a bare [`Formula`] and experience
//!   total) directly, and
//! - methods on [`EntityStore`] taking an [`EntityId`], which resolve the
//!   entity first and propagate [`ExpError::NotFound`].
//!
//! Negative amounts, levels and experience totals are accepted and flow
//! through the arithmetic unchanged ("experience debt"). Experience changes
//! saturate at the `i64` bounds rather than wrapping.

use tracing::{debug, warn};

use crate::entity::Entity;
use crate::error::{ExpError, Result};
use crate::formula::Formula;
use crate::store::EntityStore;
use crate::types::EntityId;

// ---------------------------------------------------------------------------
// Formula-level calculations
// ---------------------------------------------------------------------------

/// Experience needed to stand exactly at `level`.
#[must_use]
pub fn experience_at_level(formula: Formula, level: i64) -> i64 {
    formula.experience_for_level(level)
}

/// Level reached with `experience` in total.
#[must_use]
pub fn level_at_experience(formula: Formula, experience: i64) -> i64 {
    formula.level_for_experience(experience)
}

/// Experience still missing to reach the level after the one `experience`
/// maps to.
#[must_use]
pub fn remaining_experience_from(formula: Formula, experience: i64) -> i64 {
    let level = level_at_experience(formula, experience);
    experience_delta_from(formula, experience, level.saturating_add(1))
}

/// Percent (0–100, truncated) of the way from the current level to the next,
/// with the level derived from `experience`.
///
/// # Errors
///
/// See [`progress`].
pub fn progress_from(formula: Formula, experience: i64) -> Result<i64> {
    let level = level_at_experience(formula, experience);
    progress_within_band(formula, level, experience)
}

/// Experience gap between `experience` and the total required at `level`.
/// Negative when `level` is already behind.
#[must_use]
pub fn experience_delta_from(formula: Formula, experience: i64, level: i64) -> i64 {
    experience_at_level(formula, level).saturating_sub(experience)
}

fn progress_within_band(formula: Formula, level: i64, experience: i64) -> Result<i64> {
    let floor = experience_at_level(formula, level);
    let ceiling = experience_at_level(formula, level.saturating_add(1));
    let band = ceiling.saturating_sub(floor);
    if band == 0 {
        warn!(level, formula = %formula, "Empty experience band, progress undefined");
        return Err(ExpError::DivideByZero { level });
    }
    let earned = experience
        .checked_sub(floor)
        .and_then(|e| e.checked_mul(100))
        .ok_or(ExpError::ArithmeticOverflow { operation: "progress" })?;
    Ok(earned / band)
}

// ---------------------------------------------------------------------------
// Entity-level calculations
// ---------------------------------------------------------------------------

/// Experience still missing for `entity` to reach its next level.
#[must_use]
pub fn remaining_experience(entity: &Entity) -> i64 {
    experience_delta(entity, entity.level().saturating_add(1))
}

/// Percent (0–100, truncated) of the way from the entity's level to the next.
///
/// Uses the stored level rather than re-deriving it, so after a lossy
/// conversion the result can fall outside 0–100.
///
/// # Errors
///
/// Returns [`ExpError::DivideByZero`] if the formula gives the same
/// experience for the current and next level, or
/// [`ExpError::ArithmeticOverflow`] if the intermediate product leaves `i64`.
pub fn progress(entity: &Entity) -> Result<i64> {
    progress_within_band(entity.formula(), entity.level(), entity.experience())
}

/// Experience gap between the entity and the total required at `level`.
#[must_use]
pub fn experience_delta(entity: &Entity, level: i64) -> i64 {
    experience_delta_from(entity.formula(), entity.experience(), level)
}

/// Add `delta` (which may be negative) to the entity's experience and
/// recompute its level.
pub fn change_experience(entity: &mut Entity, delta: i64) {
    let before = entity.level();
    entity.set_experience(entity.experience().saturating_add(delta));
    if entity.level() != before {
        debug!(
            id = %entity.id(),
            from = before,
            to = entity.level(),
            experience = entity.experience(),
            "Level changed"
        );
    }
}

/// Grant `amount` experience.
pub fn add_experience(entity: &mut Entity, amount: i64) {
    change_experience(entity, amount);
}

/// Take away `amount` experience. The total may go negative.
pub fn subtract_experience(entity: &mut Entity, amount: i64) {
    change_experience(entity, amount.saturating_neg());
}

/// Reset experience to the exact total for `level`, or for the entity's
/// current level when `None` (dropping any progress towards the next one).
pub fn reset_experience(entity: &mut Entity, level: Option<i64>) {
    let level = level.unwrap_or(entity.level());
    entity.set_experience(experience_at_level(entity.formula(), level));
}

// ---------------------------------------------------------------------------
// Id-based calculations
// ---------------------------------------------------------------------------

impl EntityStore {
    /// Current level of entity `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpError::NotFound`] for an unknown id.
    pub fn level(&self, id: &EntityId) -> Result<i64> {
        Ok(self.find(id)?.level())
    }

    /// Set the level of entity `id`, recomputing its experience.
    ///
    /// # Errors
    ///
    /// Returns [`ExpError::NotFound`] for an unknown id.
    pub fn set_level(&mut self, id: &EntityId, level: i64) -> Result<()> {
        self.find_mut(id)?.set_level(level);
        Ok(())
    }

    /// Experience required at `level` under entity `id`'s formula.
    ///
    /// # Errors
    ///
    /// Returns [`ExpError::NotFound`] for an unknown id.
    pub fn experience_at_level(&self, id: &EntityId, level: i64) -> Result<i64> {
        Ok(experience_at_level(self.find(id)?.formula(), level))
    }

    /// Level entity `id` would have with `experience`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpError::NotFound`] for an unknown id.
    pub fn level_at_experience(&self, id: &EntityId, experience: i64) -> Result<i64> {
        Ok(level_at_experience(self.find(id)?.formula(), experience))
    }

    /// Experience entity `id` still needs for its next level.
    ///
    /// # Errors
    ///
    /// Returns [`ExpError::NotFound`] for an unknown id.
    pub fn remaining_experience(&self, id: &EntityId) -> Result<i64> {
        Ok(remaining_experience(self.find(id)?))
    }

    /// Progress of entity `id` towards its next level.
    ///
    /// # Errors
    ///
    /// Returns [`ExpError::NotFound`] for an unknown id, otherwise see
    /// [`progress`].
    pub fn progress(&self, id: &EntityId) -> Result<i64> {
        progress(self.find(id)?)
    }

    /// Experience gap between entity `id` and `level`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpError::NotFound`] for an unknown id.
    pub fn experience_delta(&self, id: &EntityId, level: i64) -> Result<i64> {
        Ok(experience_delta(self.find(id)?, level))
    }

    /// Add a signed experience change to entity `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpError::NotFound`] for an unknown id.
    pub fn change_experience(&mut self, id: &EntityId, delta: i64) -> Result<()> {
        change_experience(self.find_mut(id)?, delta);
        Ok(())
    }

    /// Grant experience to entity `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpError::NotFound`] for an unknown id.
    pub fn add_experience(&mut self, id: &EntityId, amount: i64) -> Result<()> {
        add_experience(self.find_mut(id)?, amount);
        Ok(())
    }

    /// Take experience from entity `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpError::NotFound`] for an unknown id.
    pub fn subtract_experience(&mut self, id: &EntityId, amount: i64) -> Result<()> {
        subtract_experience(self.find_mut(id)?, amount);
        Ok(())
    }

    /// Reset entity `id`'s experience to the total for `level` (or its
    /// current level).
    ///
    /// # Errors
    ///
    /// Returns [`ExpError::NotFound`] for an unknown id.
    pub fn reset_experience(&mut self, id: &EntityId, level: Option<i64>) -> Result<()> {
        reset_experience(self.find_mut(id)?, level);
        Ok(())
    }
}
