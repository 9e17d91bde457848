//! Utility to print a grocery list for recipes stored in a JSON file
//!
//! The file holds an array of recipes, each with `name`, `servings` and
//! `ingredients`.

use std::path::PathBuf;

use clap::Parser;
use mealplan::conversion::format_amount;
use mealplan::grocery::{aggregate, total_cost};
use mealplan::models::Recipe;

#[derive(Parser, Debug)]
#[command(name = "grocery_list", version, about = "Build a grocery list from a JSON file of recipes")]
struct Cli {
    /// Path to the recipes JSON file
    recipes: PathBuf,

    /// Scale every recipe to this many servings first
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    servings: Option<u32>,

    /// Print the list as JSON instead of a checklist
    #[arg(long)]
    json: bool,
}

/// Parse recipes, rejecting any that cannot be scaled
fn load_recipes(text: &str) -> Result<Vec<Recipe>, String> {
    let recipes: Vec<Recipe> =
        serde_json::from_str(text).map_err(|e| format!("Invalid recipes JSON: {}", e))?;

    if let Some(recipe) = recipes.iter().find(|r| r.servings == 0) {
        return Err(format!("Recipe '{}' has 0 servings", recipe.name));
    }

    Ok(recipes)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let text = std::fs::read_to_string(&cli.recipes)
        .map_err(|e| format!("Failed to read '{}': {}", cli.recipes.display(), e))?;
    let mut recipes = load_recipes(&text)?;

    if let Some(target) = cli.servings {
        recipes = recipes.iter().map(|r| r.scaled(target)).collect();
    }

    let items = aggregate(&recipes);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    let mut current_category = None;
    for item in &items {
        if current_category != Some(item.category) {
            println!("\n{}", item.category.as_str().to_uppercase());
            current_category = Some(item.category);
        }
        println!(
            "  [ ] {:<30} {:>12}  ${:.2}",
            item.name,
            format_amount(item.amount, &item.unit),
            item.cost
        );
    }

    println!(
        "\n{} items from {} recipes, total ${:.2}",
        items.len(),
        recipes.len(),
        total_cost(&items)
    );

    Ok(())
}
