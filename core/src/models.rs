use std::fmt;

use anyhow::{Result, bail};
use chrono::NaiveDate;

// --- Log records ---

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightEntry {
    pub date: NaiveDate,
    pub weight_kg: f64,
}

impl WeightEntry {
    pub fn new(date: NaiveDate, weight_kg: f64) -> Result<Self> {
        validate_weight(weight_kg)?;
        Ok(Self { date, weight_kg })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaterRecord {
    /// `YYYY-MM-DD HH:MM` or `YYYY-MM-DD`, depending on how it was logged.
    pub timestamp: String,
    pub amount_ml: u32,
}

impl WaterRecord {
    /// The calendar-day part of the timestamp.
    #[must_use]
    pub fn date_key(&self) -> &str {
        date_prefix(&self.timestamp)
    }
}

/// First ten characters of a timestamp, or all of it when shorter.
#[must_use]
pub fn date_prefix(timestamp: &str) -> &str {
    let end = timestamp
        .char_indices()
        .nth(10)
        .map_or(timestamp.len(), |(i, _)| i);
    &timestamp[..end]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeRow {
    pub cost: String,
    pub dish_name: String,
    pub ingredients: String,
    pub calories: i64,
    pub instructions: String,
}

// --- Recipe goals ---

/// Dietary goal used to filter recipes by calorie count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    Gain,
    Maintain,
    Lose,
    StrictLose,
}

impl Goal {
    pub const ALL: [Goal; 4] = [Goal::Gain, Goal::Maintain, Goal::Lose, Goal::StrictLose];

    /// Map the menu number (1-4) to a goal.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Goal::Gain),
            2 => Some(Goal::Maintain),
            3 => Some(Goal::Lose),
            4 => Some(Goal::StrictLose),
            _ => None,
        }
    }

    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Goal::Gain => 1,
            Goal::Maintain => 2,
            Goal::Lose => 3,
            Goal::StrictLose => 4,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Goal::Gain => "Gain weight (500+ kcal)",
            Goal::Maintain => "Maintain weight (300-800 kcal)",
            Goal::Lose => "Lose weight (up to 500 kcal)",
            Goal::StrictLose => "Strict weight loss (up to 400 kcal)",
        }
    }

    #[must_use]
    pub fn allows(self, calories: i64) -> bool {
        match self {
            Goal::Gain => calories >= 500,
            Goal::Maintain => (300..=800).contains(&calories),
            Goal::Lose => calories <= 500,
            Goal::StrictLose => calories <= 400,
        }
    }

    /// The goal that fits a BMI reading: underweight gains, normal maintains,
    /// overweight loses, obese loses strictly.
    #[must_use]
    pub fn suggested_for(bmi: f64) -> Self {
        if bmi < 18.5 {
            Goal::Gain
        } else if bmi < 25.0 {
            Goal::Maintain
        } else if bmi < 30.0 {
            Goal::Lose
        } else {
            Goal::StrictLose
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Goal::Gain => "Gain",
            Goal::Maintain => "Maintain",
            Goal::Lose => "Lose",
            Goal::StrictLose => "Strict lose",
        };
        f.write_str(name)
    }
}

/// Calorie filter keyed by the raw goal number. Unknown goals allow nothing.
#[must_use]
pub fn is_calorie_allowed(calories: i64, goal: i64) -> bool {
    Goal::from_code(goal).is_some_and(|g| g.allows(calories))
}

// --- Budget tiers ---

pub const MAX_BUDGET: i64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetTier {
    UpTo300,
    UpTo1000,
    UpTo3000,
    UpTo5000,
}

impl BudgetTier {
    pub const ALL: [BudgetTier; 4] = [
        BudgetTier::UpTo300,
        BudgetTier::UpTo1000,
        BudgetTier::UpTo3000,
        BudgetTier::UpTo5000,
    ];

    /// Pick the cheapest tier that covers `budget`. `None` above [`MAX_BUDGET`].
    #[must_use]
    pub fn for_budget(budget: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| budget <= tier.limit())
    }

    #[must_use]
    pub fn limit(self) -> i64 {
        match self {
            BudgetTier::UpTo300 => 300,
            BudgetTier::UpTo1000 => 1000,
            BudgetTier::UpTo3000 => 3000,
            BudgetTier::UpTo5000 => MAX_BUDGET,
        }
    }

    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            BudgetTier::UpTo300 => "recipes_under_300.csv",
            BudgetTier::UpTo1000 => "recipes_under_1000.csv",
            BudgetTier::UpTo3000 => "recipes_under_3000.csv",
            BudgetTier::UpTo5000 => "recipes_under_5000.csv",
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "budget up to {}", self.limit())
    }
}

// --- Units ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSystem {
    /// Pounds and inches.
    Imperial,
    /// Kilograms and meters.
    Metric,
}

impl UnitSystem {
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(UnitSystem::Imperial),
            2 => Some(UnitSystem::Metric),
            _ => None,
        }
    }

    #[must_use]
    pub fn weight_unit(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "lb",
            UnitSystem::Metric => "kg",
        }
    }

    #[must_use]
    pub fn height_unit(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "inches",
            UnitSystem::Metric => "meters",
        }
    }
}

// --- Validation ---

pub fn validate_weight(weight_kg: f64) -> Result<()> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        bail!("Weight must be greater than 0");
    }
    Ok(())
}

pub fn validate_water_amount(amount_ml: u32) -> Result<()> {
    if amount_ml == 0 {
        bail!("Water amount must be greater than 0 ml");
    }
    Ok(())
}
