//! Status Tool
//!
//! Runtime status of the service plus usage instructions for assistants.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::db::Database;
use crate::models::{GroceryItem, MealPlanEntry, Recipe};

/// Meal planning instructions for AI assistants
pub const PLANNING_INSTRUCTIONS: &str = r#"
# Meal Planner Instructions

## Workflow

1. `create_recipe` with a name, the servings it makes, and its ingredients.
   Every ingredient needs `name`, `amount` (> 0), `unit`, `cost` (USD, total
   for the line) and a `category`.
2. `plan_meal` to put a recipe on a date (YYYY-MM-DD). Pass `servings` to cook
   more or less than the recipe makes.
3. `generate_grocery_list` for a date range. This REPLACES the stored list and
   clears every checked mark.
4. `check_grocery_item` as things go in the cart.

## Units

| Family | Units | Converts to |
|--------|-------|-------------|
| weight | g, mg, kg, oz, lb | any weight; volume with an ingredient name |
| volume | ml, l, tsp, tbsp, fl oz, cup, pint, quart, gallon | any volume; weight with an ingredient name |
| countable | whole, each, piece, cloves, head, bunch, can, ... | nothing but itself |

Weight/volume crossings use the ingredient's density (grams per cup). Unlisted
ingredients use water density, so treat those results as approximate.

When `convert_unit` answers `converted: false`, KEEP the original amount and
unit. Never invent a conversion.

## Grocery list rules

- Lines merge only when the ingredient name (any case) AND the unit match.
  "2 cloves garlic" and "1 head garlic" stay separate lines.
- Use the same unit for the same ingredient across recipes to get one line.
- Categories order the list: produce, meat, seafood, dairy, pantry, spices,
  baking, frozen, snacks, breakfast, drinks, other.
"#;

/// Status response
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub build: BuildInfo,
    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub recipe_count: Option<i64>,
    pub planned_meal_count: Option<usize>,
    pub grocery_item_count: Option<usize>,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Tracks status information for the service
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    /// Current status; database counts are `None` if the database is unreachable
    pub fn get_status(&self, db: &Database) -> ServiceStatus {
        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let counts = db.with_conn(|conn| {
            Ok((
                Recipe::count(conn)?,
                MealPlanEntry::list(conn, None, None)?.len(),
                GroceryItem::list(conn)?.len(),
            ))
        });
        let (recipe_count, planned_meal_count, grocery_item_count) = match counts {
            Ok((r, m, g)) => (Some(r), Some(m), Some(g)),
            Err(e) => {
                tracing::warn!("Status could not read database: {}", e);
                (None, None, None)
            }
        };

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ServiceStatus {
            build: BuildInfo::current(),
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            recipe_count,
            planned_meal_count,
            grocery_item_count,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
