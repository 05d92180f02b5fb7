use std::fmt;

use anyhow::{Result, bail};

use crate::models::UnitSystem;

const IMPERIAL_FACTOR: f64 = 703.0;
pub const HEALTHY_BMI_MIN: f64 = 18.5;
pub const HEALTHY_BMI_MAX: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiReading {
    pub bmi: f64,
    /// Lowest weight with a healthy BMI at this height, in the input units.
    pub healthy_min: f64,
    /// Highest weight with a healthy BMI at this height, in the input units.
    pub healthy_max: f64,
    pub units: UnitSystem,
}

/// BMI plus the healthy weight band for the given height.
///
/// Imperial takes pounds and inches, metric takes kilograms and meters.
pub fn compute_bmi(weight: f64, height: f64, units: UnitSystem) -> Result<BmiReading> {
    if !weight.is_finite() || weight <= 0.0 {
        bail!("Weight must be greater than 0");
    }
    if !height.is_finite() || height <= 0.0 {
        bail!("Height must be greater than 0");
    }

    let factor = match units {
        UnitSystem::Imperial => IMPERIAL_FACTOR,
        UnitSystem::Metric => 1.0,
    };
    let height_sq = height * height;

    Ok(BmiReading {
        bmi: factor * weight / height_sq,
        healthy_min: HEALTHY_BMI_MIN * height_sq / factor,
        healthy_max: HEALTHY_BMI_MAX * height_sq / factor,
        units,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    SevereThinness,
    ModerateThinness,
    MildThinness,
    Normal,
    Overweight,
    ObeseClassI,
    ObeseClassII,
    ObeseClassIII,
}

#[must_use]
pub fn categorize(bmi: f64) -> BmiCategory {
    if bmi < 16.0 {
        BmiCategory::SevereThinness
    } else if bmi < 17.0 {
        BmiCategory::ModerateThinness
    } else if bmi < 18.5 {
        BmiCategory::MildThinness
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else if bmi < 35.0 {
        BmiCategory::ObeseClassI
    } else if bmi < 40.0 {
        BmiCategory::ObeseClassII
    } else {
        BmiCategory::ObeseClassIII
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BmiCategory::SevereThinness => "Severe Thinness",
            BmiCategory::ModerateThinness => "Moderate Thinness",
            BmiCategory::MildThinness => "Mild Thinness",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::ObeseClassI => "Obese Class I",
            BmiCategory::ObeseClassII => "Obese Class II",
            BmiCategory::ObeseClassIII => "Obese Class III",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleBmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

#[must_use]
pub fn categorize_simple(bmi: f64) -> SimpleBmiCategory {
    if bmi < 18.5 {
        SimpleBmiCategory::Underweight
    } else if bmi < 25.0 {
        SimpleBmiCategory::Normal
    } else if bmi < 30.0 {
        SimpleBmiCategory::Overweight
    } else {
        SimpleBmiCategory::Obese
    }
}

impl fmt::Display for SimpleBmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SimpleBmiCategory::Underweight => "Underweight",
            SimpleBmiCategory::Normal => "Normal",
            SimpleBmiCategory::Overweight => "Overweight",
            SimpleBmiCategory::Obese => "Obese",
        };
        f.write_str(label)
    }
}

/// Which category table to report with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryScheme {
    /// Eight WHO-style buckets from severe thinness to obese class III.
    #[default]
    Detailed,
    /// Underweight, normal, overweight, obese.
    Simple,
}

impl CategoryScheme {
    #[must_use]
    pub fn label(self, bmi: f64) -> String {
        match self {
            CategoryScheme::Detailed => categorize(bmi).to_string(),
            CategoryScheme::Simple => categorize_simple(bmi).to_string(),
        }
    }
}
