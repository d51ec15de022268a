//! Meal Plan Store
//!
//! In-memory mapping of plan id to plan. Plans live for the lifetime of the
//! store; nothing is persisted.
//!
//! Every operation on a plan runs while holding that plan's map entry, so
//! concurrent requests against one plan are serialized and all validation
//! happens before the plan is touched.

use super::{
    grocery::aggregate,
    helpers::{parse_index, parse_meal_type, plan_id, plan_name_or_default, serving_multiplier},
    models::{
        AddMealInput, GroceryItem, MealEntry, MealPlan, Meals, RemoveMealInput,
        UpdateServingsInput,
    },
};
use crate::error::{AppError, Result};
use crate::recipes::{models::Recipe, query::find_by_id};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

struct StoredPlan {
    /// Creation order, used to list plans in insertion order
    seq: u64,
    plan: MealPlan,
}

/// Process-local meal plan storage
pub struct MealPlanStore {
    /// DashMap allows concurrent access without external Mutexes.
    plans: DashMap<String, StoredPlan>,

    /// Next plan sequence number. Never reused, even after deletes.
    next_seq: AtomicU64,
}

impl Default for MealPlanStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MealPlanStore {
    pub fn new() -> Self {
        Self {
            plans: DashMap::new(),
            next_seq: AtomicU64::new(1),
        }
    }

    /// Number of stored plans
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Creates a plan with empty meal lists. Always succeeds.
    pub fn create(&self, name: Option<String>) -> MealPlan {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let id = plan_id(seq);

        let plan = MealPlan {
            name: plan_name_or_default(name, &id),
            id: id.clone(),
            created_at: Utc::now(),
            meals: Meals::default(),
        };

        self.plans.insert(
            id.clone(),
            StoredPlan {
                seq,
                plan: plan.clone(),
            },
        );

        tracing::info!(plan_id = %id, name = %plan.name, "meal plan created");
        plan
    }

    /// All plans, oldest first
    pub fn list(&self) -> Vec<MealPlan> {
        let mut plans: Vec<(u64, MealPlan)> = self
            .plans
            .iter()
            .map(|stored| (stored.seq, stored.plan.clone()))
            .collect();
        plans.sort_by_key(|(seq, _)| *seq);
        plans.into_iter().map(|(_, plan)| plan).collect()
    }

    pub fn get(&self, id: &str) -> Result<MealPlan> {
        self.plans
            .get(id)
            .map(|stored| stored.plan.clone())
            .ok_or(AppError::PlanNotFound)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        self.plans.remove(id).ok_or(AppError::PlanNotFound)?;
        tracing::info!(plan_id = %id, "meal plan deleted");
        Ok(())
    }

    /// Appends a snapshot of a catalog recipe to one of the plan's meals.
    ///
    /// Checked in order: plan exists, recipe exists, meal type is valid,
    /// multiplier is valid.
    pub fn add_meal(&self, id: &str, catalog: &[Recipe], input: AddMealInput) -> Result<MealEntry> {
        let mut stored = self.plans.get_mut(id).ok_or(AppError::PlanNotFound)?;

        let recipe = input
            .recipe_id
            .as_ref()
            .and_then(|recipe_id| find_by_id(catalog, recipe_id))
            .ok_or(AppError::RecipeNotFound)?;
        let meal_type = parse_meal_type(input.meal_type.as_deref())?;
        let multiplier = serving_multiplier(input.serving_multiplier.as_ref())?;

        let entry = MealEntry {
            recipe_id: recipe.id.clone(),
            recipe: recipe.clone(),
            serving_multiplier: multiplier,
            added_at: Utc::now(),
            updated_at: None,
        };
        stored.plan.meals.entries_mut(meal_type).push(entry.clone());

        tracing::debug!(plan_id = %id, recipe_id = %recipe.id, %meal_type, "meal added");
        Ok(entry)
    }

    /// Removes the entry at `index`; later entries shift down.
    pub fn remove_meal(&self, id: &str, input: RemoveMealInput) -> Result<MealEntry> {
        let mut stored = self.plans.get_mut(id).ok_or(AppError::PlanNotFound)?;

        let meal_type = parse_meal_type(input.meal_type.as_deref())?;
        let entries = stored.plan.meals.entries_mut(meal_type);
        let index = parse_index(input.index.as_ref())
            .filter(|&i| i < entries.len())
            .ok_or(AppError::EntryNotFound)?;

        let removed = entries.remove(index);
        tracing::debug!(plan_id = %id, %meal_type, index, "meal removed");
        Ok(removed)
    }

    /// Overwrites the serving multiplier of one entry and stamps `updated_at`.
    pub fn update_servings(&self, id: &str, input: UpdateServingsInput) -> Result<MealEntry> {
        let mut stored = self.plans.get_mut(id).ok_or(AppError::PlanNotFound)?;

        let meal_type = parse_meal_type(input.meal_type.as_deref())?;
        let entries = stored.plan.meals.entries_mut(meal_type);
        let index = parse_index(input.index.as_ref())
            .filter(|&i| i < entries.len())
            .ok_or(AppError::EntryNotFound)?;
        let multiplier = serving_multiplier(input.serving_multiplier.as_ref())?;

        let entry = &mut entries[index];
        entry.serving_multiplier = multiplier;
        entry.updated_at = Some(Utc::now());

        tracing::debug!(plan_id = %id, %meal_type, index, multiplier, "servings updated");
        Ok(entry.clone())
    }

    /// Consolidated ingredient list for a plan
    pub fn grocery_list(&self, id: &str) -> Result<Vec<GroceryItem>> {
        let stored = self.plans.get(id).ok_or(AppError::PlanNotFound)?;
        Ok(aggregate(&stored.plan))
    }
}
