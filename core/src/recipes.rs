use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::csv_row::{lossy_lines, parse_row};
use crate::models::{BudgetTier, Goal, RecipeRow};

/// Columns in every recipe file: `cost,dish,ingredients,calories,recipe`.
pub const RECIPE_FIELDS: usize = 5;

/// The four budget-tier recipe files under one directory.
#[derive(Debug, Clone)]
pub struct RecipeLibrary {
    dir: PathBuf,
}

impl RecipeLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn path_for(&self, tier: BudgetTier) -> PathBuf {
        self.dir.join(tier.file_name())
    }

    /// Recipes from the tier's file whose calories fit `goal`, in file order.
    pub fn find(&self, tier: BudgetTier, goal: Goal) -> Result<Vec<RecipeRow>> {
        find_recipes(&self.path_for(tier), goal)
    }
}

pub fn find_recipes(path: &Path, goal: Goal) -> Result<Vec<RecipeRow>> {
    let file = File::open(path)
        .with_context(|| format!("Could not open recipe file: {}", path.display()))?;
    let rows = parse_recipes(file)
        .with_context(|| format!("Failed to read recipe file: {}", path.display()))?;
    debug!(path = %path.display(), rows = rows.len(), "loaded recipe file");

    Ok(rows.into_iter().filter(|r| goal.allows(r.calories)).collect())
}

/// Parse a recipe CSV from any reader. The first line is a header and is skipped.
///
/// Rows that are short or carry a non-numeric calorie count are skipped.
/// Bytes that are not UTF-8 are replaced rather than failing the file.
pub fn parse_recipes<R: Read>(reader: R) -> Result<Vec<RecipeRow>> {
    let mut rows = Vec::new();

    for (idx, line) in lossy_lines(BufReader::new(reader)).enumerate().skip(1) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let line_num = idx + 1;
        let fields = parse_row(&line, RECIPE_FIELDS);
        if fields.len() < RECIPE_FIELDS {
            warn!(line = line_num, fields = fields.len(), "skipping short recipe row");
            continue;
        }

        let Ok(calories) = fields[3].trim().parse::<i64>() else {
            warn!(line = line_num, value = %fields[3], "skipping recipe row with bad calories");
            continue;
        };

        let Ok([cost, dish_name, ingredients, _, instructions]) =
            <[String; RECIPE_FIELDS]>::try_from(fields)
        else {
            continue;
        };

        rows.push(RecipeRow {
            cost: cost.trim().to_string(),
            dish_name: dish_name.trim().to_string(),
            ingredients: ingredients.trim().to_string(),
            calories,
            instructions: instructions.trim().to_string(),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE_CSV: &str = "\
Cost,Dish,Ingredients,Calories,Recipe
120,Lentil Soup,\"Lentils, onion, garlic\",320,\"Simmer lentils 25 min, blend\"
250,Egg Fried Rice,\"Rice, eggs, peas\",560,Fry rice with eggs
90,Cucumber Salad,\"Cucumber, yogurt\",150,Slice and toss

80,Banana Shake,\"Banana, milk, oats\",480,Blend everything
";

    #[test]
    fn test_parse_recipes_basic() {
        let rows = parse_recipes(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 4);

        assert_eq!(rows[0].cost, "120");
        assert_eq!(rows[0].dish_name, "Lentil Soup");
        assert_eq!(rows[0].ingredients, "Lentils, onion, garlic");
        assert_eq!(rows[0].calories, 320);
        assert_eq!(rows[0].instructions, "Simmer lentils 25 min, blend");

        assert_eq!(rows[3].dish_name, "Banana Shake");
    }

    #[test]
    fn test_parse_recipes_skips_bad_rows() {
        let csv = "\
Cost,Dish,Ingredients,Calories,Recipe
100,Toast,Bread,abc,Toast it
100,Short row
100,Porridge,Oats,300,Cook
";
        let rows = parse_recipes(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].dish_name, "Porridge");
    }

    #[test]
    fn test_parse_recipes_header_only() {
        let rows = parse_recipes("Cost,Dish,Ingredients,Calories,Recipe\n".as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_parse_recipes_survives_latin1_bytes() {
        let csv: &[u8] =
            b"Cost,Dish,Ingredients,Calories,Recipe\n100,Cr\xE8me,Milk,300,Stir\n90,Tea,Leaves,50,Boil\n";
        let rows = parse_recipes(csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].dish_name, "Cr\u{FFFD}me");
        assert_eq!(rows[0].calories, 300);
        assert_eq!(rows[1].dish_name, "Tea");
    }

    #[test]
    fn test_extra_commas_stay_in_instructions() {
        let csv = "h\n50,Tea,Leaves,10,Boil water, steep, pour\n";
        let rows = parse_recipes(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].instructions, "Boil water, steep, pour");
    }

    #[test]
    fn test_find_recipes_filters_by_goal() {
        let dir = TempDir::new().unwrap();
        let library = RecipeLibrary::new(dir.path());
        std::fs::write(library.path_for(BudgetTier::UpTo300), SAMPLE_CSV).unwrap();

        let gain = library.find(BudgetTier::UpTo300, Goal::Gain).unwrap();
        let names: Vec<&str> = gain.iter().map(|r| r.dish_name.as_str()).collect();
        assert_eq!(names, vec!["Egg Fried Rice"]);

        let strict = library.find(BudgetTier::UpTo300, Goal::StrictLose).unwrap();
        let names: Vec<&str> = strict.iter().map(|r| r.dish_name.as_str()).collect();
        assert_eq!(names, vec!["Lentil Soup", "Cucumber Salad"]);
    }

    #[test]
    fn test_find_recipes_no_match() {
        let dir = TempDir::new().unwrap();
        let library = RecipeLibrary::new(dir.path());
        let csv = "h\n10,Feast,Everything,2000,Cook a lot\n";
        std::fs::write(library.path_for(BudgetTier::UpTo1000), csv).unwrap();

        let rows = library.find(BudgetTier::UpTo1000, Goal::Lose).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_shipped_recipe_files_parse() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../data/recipes");
        let library = RecipeLibrary::new(dir);
        for tier in BudgetTier::ALL {
            let file = File::open(library.path_for(tier)).unwrap();
            let rows = parse_recipes(file).unwrap();
            assert!(rows.len() >= 5, "{tier} has {} rows", rows.len());
            assert!(rows.iter().all(|r| !r.instructions.is_empty()));
        }

        let gain = library.find(BudgetTier::UpTo300, Goal::Gain).unwrap();
        let names: Vec<&str> = gain.iter().map(|r| r.dish_name.as_str()).collect();
        assert_eq!(names, vec!["Rajma Rice", "Peanut Poha"]);
    }

    #[test]
    fn test_find_recipes_missing_file() {
        let dir = TempDir::new().unwrap();
        let library = RecipeLibrary::new(dir.path());
        let err = library.find(BudgetTier::UpTo5000, Goal::Gain).unwrap_err();
        assert!(err.to_string().contains("recipes_under_5000.csv"));
    }
}
