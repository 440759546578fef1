//! Search refinement criteria and their edit operations.
//!
//! [`FilterState`] is a plain state container: no async behaviour, no history.
//! Every edit goes through [`FilterState::apply`], which either replaces one
//! field or reports a [`FinderError::ValidationRejected`]. Rejected input is
//! never silently dropped; the coordinator turns it into a visible notice.

use crate::domain::error::{FinderError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Default search radius in metres.
pub const DEFAULT_RADIUS_METERS: u32 = 1000;

/// Category names that mean "all categories" rather than a real category.
pub const ALL_CATEGORIES_SENTINELS: &[&str] = &["전체", "all"];

/// Whether a budget applies to a single menu item or to the average spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetBasis {
    /// At least one menu item must be within budget.
    #[default]
    Menu,
    /// The average menu price must be within budget.
    Average,
}

/// How the user supplied a budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetInput {
    /// A preset button; `None` is the "no limit" preset.
    Preset(Option<u32>),
    /// Free-text entry, validated before it is accepted.
    Text(String),
}

/// A single filter edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEdit {
    /// Replace the search radius (metres).
    Radius(u32),
    /// Toggle a category in or out of the set. Sentinel names clear the set.
    ToggleCategory(String),
    /// Clear the category set ("all").
    AllCategories,
    /// Replace the budget.
    Budget(BudgetInput),
    /// Replace the budget basis.
    BudgetBasis(BudgetBasis),
    /// Restore every field to its default.
    Reset,
}

/// The current refinement criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub radius_meters: u32,
    /// Selected categories; empty means all.
    pub categories: BTreeSet<String>,
    /// Budget in won, always positive when set.
    pub budget: Option<u32>,
    pub budget_basis: BudgetBasis,
}

impl FilterCriteria {
    /// Criteria with the given default radius and nothing else selected.
    #[must_use]
    pub const fn with_radius(radius_meters: u32) -> Self {
        Self {
            radius_meters,
            categories: BTreeSet::new(),
            budget: None,
            budget_basis: BudgetBasis::Menu,
        }
    }
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self::with_radius(DEFAULT_RADIUS_METERS)
    }
}

/// Owner of [`FilterCriteria`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    criteria: FilterCriteria,
    default_radius: u32,
    radius_bounds: RangeInclusive<u32>,
}

impl FilterState {
    /// Creates a filter state with deployment-specific radius settings.
    #[must_use]
    pub fn new(default_radius: u32, radius_bounds: RangeInclusive<u32>) -> Self {
        Self {
            criteria: FilterCriteria::with_radius(default_radius),
            default_radius,
            radius_bounds,
        }
    }

    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Applies one edit.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::ValidationRejected`] for a radius outside the
    /// configured bounds, a blank category name, or budget text that is not a
    /// positive whole number. The criteria are left unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use foodfinder::search::{BudgetInput, FilterEdit, FilterState};
    ///
    /// let mut filters = FilterState::new(1000, 100..=5000);
    /// filters.apply(FilterEdit::Budget(BudgetInput::Text("12,000".into())))?;
    /// assert_eq!(filters.criteria().budget, Some(12000));
    ///
    /// let rejected = filters.apply(FilterEdit::Budget(BudgetInput::Text("abc".into())));
    /// assert!(rejected.is_err());
    /// assert_eq!(filters.criteria().budget, Some(12000));
    /// # Ok::<(), foodfinder::FinderError>(())
    /// ```
    pub fn apply(&mut self, edit: FilterEdit) -> Result<()> {
        let _span = tracing::debug_span!("filter_apply", edit = ?edit).entered();

        match edit {
            FilterEdit::Radius(radius) => self.set_radius(radius)?,
            FilterEdit::ToggleCategory(category) => self.toggle_category(&category)?,
            FilterEdit::AllCategories => self.criteria.categories.clear(),
            FilterEdit::Budget(input) => self.criteria.budget = parse_budget(input)?,
            FilterEdit::BudgetBasis(basis) => self.criteria.budget_basis = basis,
            FilterEdit::Reset => self.reset(),
        }

        tracing::debug!(criteria = ?self.criteria, "filter updated");
        Ok(())
    }

    /// Restores the default criteria.
    pub fn reset(&mut self) {
        self.criteria = FilterCriteria::with_radius(self.default_radius);
    }

    fn set_radius(&mut self, radius: u32) -> Result<()> {
        if !self.radius_bounds.contains(&radius) {
            return Err(FinderError::validation(
                "radius",
                format!(
                    "{radius}m outside {}..={}m",
                    self.radius_bounds.start(),
                    self.radius_bounds.end()
                ),
            ));
        }
        self.criteria.radius_meters = radius;
        Ok(())
    }

    fn toggle_category(&mut self, category: &str) -> Result<()> {
        let category = category.trim();
        if category.is_empty() {
            return Err(FinderError::validation("category", "category name is empty"));
        }
        if ALL_CATEGORIES_SENTINELS.contains(&category) {
            self.criteria.categories.clear();
            return Ok(());
        }
        if !self.criteria.categories.remove(category) {
            self.criteria.categories.insert(category.to_string());
        }
        Ok(())
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS_METERS, 100..=5000)
    }
}

fn parse_budget(input: BudgetInput) -> Result<Option<u32>> {
    match input {
        BudgetInput::Preset(Some(0)) => Err(FinderError::validation(
            "budget",
            "preset budget must be positive",
        )),
        BudgetInput::Preset(value) => Ok(value),
        BudgetInput::Text(text) => {
            let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
            if cleaned.is_empty() {
                return Ok(None);
            }
            match cleaned.parse::<u32>() {
                Ok(value) if value > 0 => Ok(Some(value)),
                Ok(_) => Err(FinderError::validation("budget", "budget must be positive")),
                Err(_) => Err(FinderError::validation(
                    "budget",
                    format!("'{}' is not a whole number of won", text.trim()),
                )),
            }
        }
    }
}
