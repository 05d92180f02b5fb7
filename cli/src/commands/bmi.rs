use anyhow::Result;
use std::io::{BufRead, Write};

use healthdesk_core::bmi::{CategoryScheme, HEALTHY_BMI_MAX, HEALTHY_BMI_MIN, compute_bmi};
use healthdesk_core::models::{Goal, UnitSystem};

use super::helpers::INVALID_CHOICE;
use crate::console::Console;

const UNIT_MENU: &[&str] = &["US Customary (pounds & inches)", "Metric (kg & meters)"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gender {
    Male,
    Female,
}

impl Gender {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "M" | "m" => Some(Gender::Male),
            "F" | "f" => Some(Gender::Female),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Gender::Male => 'M',
            Gender::Female => 'F',
        }
    }
}

pub(crate) fn cmd_bmi<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    scheme: CategoryScheme,
) -> Result<()> {
    let units = loop {
        let selection = console.prompt_menu("Choose measurement system", UNIT_MENU)?;
        if let Some(units) = UnitSystem::from_code(selection) {
            break units;
        }
        console.say(INVALID_CHOICE)?;
    };

    let gender = loop {
        let line = console.prompt_line("Enter your gender (M/F): ")?;
        if let Some(gender) = Gender::parse(&line) {
            break gender;
        }
        console.say("Error: Invalid gender. Please enter M or F only.")?;
    };

    let age: u32 = console.prompt_valid(
        "Enter your age: ",
        "Error: Age must be greater than 0. Please try again.",
        |a: &u32| *a > 0,
    )?;

    let weight_unit = units.weight_unit();
    let height_unit = units.height_unit();
    let positive = |v: &f64| v.is_finite() && *v > 0.0;
    let weight: f64 = console.prompt_valid(
        &format!("Enter your weight ({weight_unit}): "),
        "Error: Weight must be greater than 0.",
        positive,
    )?;
    let height: f64 = console.prompt_valid(
        &format!("Enter your height ({height_unit}): "),
        "Error: Height must be greater than 0.",
        positive,
    )?;

    console.say(format!(
        "\nUser Data: {}, {age} years, {weight:.2} {weight_unit}, {height:.2} {height_unit}",
        gender.as_char()
    ))?;

    let reading = compute_bmi(weight, height, units)?;
    console.say("\n---- BMI Calculator ----")?;
    console.say(format!("BMI: {:.2} kg/m^2", reading.bmi))?;
    console.say(format!(
        "Healthy BMI Range: {HEALTHY_BMI_MIN} - {HEALTHY_BMI_MAX} kg/m^2"
    ))?;
    console.say(format!(
        "Healthy Weight Range: {:.2} {weight_unit} - {:.2} {weight_unit}",
        reading.healthy_min, reading.healthy_max
    ))?;
    console.say(format!("BMI Category: {}", scheme.label(reading.bmi)))?;
    console.say(format!(
        "Suggested recipe goal: {}",
        Goal::suggested_for(reading.bmi)
    ))
}
