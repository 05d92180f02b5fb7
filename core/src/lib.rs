pub mod bmi;
pub mod csv_row;
pub mod dates;
pub mod models;
pub mod recipes;
pub mod water;
pub mod weight;
