mod bmi;
mod helpers;
mod recipe;
mod water;
mod weight;

pub(crate) use bmi::cmd_bmi;
pub(crate) use helpers::{INVALID_CHOICE, report_action_error};
pub(crate) use recipe::cmd_recipes;
pub(crate) use water::cmd_water_menu;
pub(crate) use weight::cmd_weight_menu;
