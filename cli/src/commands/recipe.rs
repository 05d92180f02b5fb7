use anyhow::Result;
use std::io::{BufRead, Write};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use healthdesk_core::models::{BudgetTier, Goal, MAX_BUDGET, RecipeRow};
use healthdesk_core::recipes::RecipeLibrary;

use super::helpers::INVALID_CHOICE;
use crate::console::Console;

pub(crate) fn cmd_recipes<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    library: &RecipeLibrary,
) -> Result<()> {
    console.say("\n---- Budget Based Recipe Suggestions ----")?;

    let budget: i64 = console.prompt_valid(
        "Enter your budget: ",
        "Error: Budget must be greater than 0.",
        |b: &i64| *b > 0,
    )?;
    let Some(tier) = BudgetTier::for_budget(budget) else {
        return console.say(format!(
            "Error: Budget out of range. The maximum supported budget is {MAX_BUDGET}."
        ));
    };

    let goal = prompt_goal(console)?;
    let recipes = library.find(tier, goal)?;

    if recipes.is_empty() {
        return console.say(format!("No matching recipes found ({tier}, goal: {goal})."));
    }

    console.say(format!(
        "\nRecipes for {tier}, goal: {goal} ({} found)",
        recipes.len()
    ))?;
    console.say(recipe_table(&recipes))?;

    let count = recipes.len();
    loop {
        let pick: usize = console.prompt_valid(
            &format!("Enter a recipe number for details (1-{count}, 0 to return): "),
            "Error: No recipe with that number.",
            |n: &usize| *n <= count,
        )?;
        if pick == 0 {
            return Ok(());
        }
        print_recipe_details(console, &recipes[pick - 1])?;
    }
}

fn prompt_goal<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Goal> {
    let labels: Vec<&str> = Goal::ALL.iter().map(|g| g.label()).collect();
    loop {
        let selection = console.prompt_menu("Choose your goal", &labels)?;
        if let Some(goal) = Goal::from_code(selection) {
            return Ok(goal);
        }
        console.say(INVALID_CHOICE)?;
    }
}

fn recipe_table(recipes: &[RecipeRow]) -> String {
    #[derive(Tabled)]
    struct RecipeListRow {
        #[tabled(rename = "#")]
        idx: usize,
        #[tabled(rename = "Dish")]
        dish: String,
        #[tabled(rename = "Cost")]
        cost: String,
        #[tabled(rename = "Calories")]
        calories: i64,
        #[tabled(rename = "Ingredients")]
        ingredients: String,
    }

    let rows: Vec<RecipeListRow> = recipes
        .iter()
        .enumerate()
        .map(|(i, r)| RecipeListRow {
            idx: i + 1,
            dish: r.dish_name.clone(),
            cost: r.cost.clone(),
            calories: r.calories,
            ingredients: r.ingredients.clone(),
        })
        .collect();

    Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..4)).with(Alignment::right()))
        .to_string()
}

fn print_recipe_details<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    recipe: &RecipeRow,
) -> Result<()> {
    console.say(format!("\n=== {} ===", recipe.dish_name))?;
    console.say(format!("Cost: {}", recipe.cost))?;
    console.say(format!("Calories: {} kcal", recipe.calories))?;
    console.say(format!("Ingredients: {}", recipe.ingredients))?;
    console.say(format!("Recipe: {}", recipe.instructions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    const TIER_CSV: &str = "\
Cost,Dish,Ingredients,Calories,Recipe
120,Lentil Soup,\"Lentils, onion\",320,\"Simmer, then blend\"
250,Egg Fried Rice,\"Rice, eggs\",560,Fry together
";

    fn run(input: &str, library: &RecipeLibrary) -> (Result<()>, String) {
        let mut c = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let result = cmd_recipes(&mut c, library);
        (result, String::from_utf8(c.into_output()).unwrap())
    }

    fn library_with_cheap_tier() -> (TempDir, RecipeLibrary) {
        let dir = TempDir::new().unwrap();
        let library = RecipeLibrary::new(dir.path());
        std::fs::write(library.path_for(BudgetTier::UpTo300), TIER_CSV).unwrap();
        (dir, library)
    }

    #[test]
    fn test_lists_matches_and_shows_details() {
        let (_dir, library) = library_with_cheap_tier();
        let (result, out) = run("200\n3\n1\n0\n", &library);
        result.unwrap();
        assert!(out.contains("Lentil Soup"));
        assert!(!out.contains("Egg Fried Rice"));
        assert!(out.contains("Ingredients: Lentils, onion"));
        assert!(out.contains("Recipe: Simmer, then blend"));
    }

    #[test]
    fn test_listing_shows_full_ingredients() {
        let dir = TempDir::new().unwrap();
        let library = RecipeLibrary::new(dir.path());
        let ingredients = "Chickpeas, spinach, tomato, onion, garlic, ginger, cumin, coriander";
        std::fs::write(
            library.path_for(BudgetTier::UpTo300),
            format!("h\n150,Chana Saag With Jeera Rice And Salad,\"{ingredients}\",450,Simmer\n"),
        )
        .unwrap();
        let (result, out) = run("150\n3\n0\n", &library);
        result.unwrap();
        assert!(out.contains(ingredients));
        assert!(out.contains("Chana Saag With Jeera Rice And Salad"));
    }

    #[test]
    fn test_budget_out_of_range() {
        let (_dir, library) = library_with_cheap_tier();
        let (result, out) = run("6000\n", &library);
        result.unwrap();
        assert!(out.contains("Budget out of range"));
        assert!(!out.contains("Choose your goal"));
    }

    #[test]
    fn test_reprompts_non_positive_budget_and_bad_goal() {
        let (_dir, library) = library_with_cheap_tier();
        let (result, out) = run("0\nabc\n150\n9\n1\n0\n", &library);
        result.unwrap();
        assert!(out.contains("Budget must be greater than 0"));
        assert!(out.contains("Invalid input"));
        assert!(out.contains(INVALID_CHOICE));
        assert!(out.contains("Egg Fried Rice"));
    }

    #[test]
    fn test_no_match() {
        let dir = TempDir::new().unwrap();
        let library = RecipeLibrary::new(dir.path());
        std::fs::write(
            library.path_for(BudgetTier::UpTo1000),
            "h\n900,Steak Dinner,Steak,1200,Grill\n",
        )
        .unwrap();
        let (result, out) = run("800\n4\n", &library);
        result.unwrap();
        assert!(out.contains("No matching recipes found"));
        assert!(!out.contains("Steak Dinner"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let library = RecipeLibrary::new(dir.path());
        let (result, _) = run("4000\n1\n", &library);
        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("recipes_under_5000.csv"));
    }
}
