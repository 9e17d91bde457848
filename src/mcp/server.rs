//! Meal Planner MCP Server Implementation
//!
//! Routes MCP tool calls to the tool functions.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::models::{Category, IngredientQuantity, RecipeCreate};
use crate::tools::conversion;
use crate::tools::grocery;
use crate::tools::meal_plan;
use crate::tools::recipes;
use crate::tools::status::{StatusTracker, PLANNING_INSTRUCTIONS};

/// Meal Planner MCP Service
#[derive(Clone)]
pub struct MealPlanService {
    status_tracker: Arc<StatusTracker>,
    database: Database,
    tool_router: ToolRouter<MealPlanService>,
}

impl MealPlanService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(StatusTracker::new(database_path)),
            database,
            tool_router: Self::tool_router(),
        }
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Conversion Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UnitInfoParams {
    /// Unit token, e.g. "cup", "lbs", "cloves"
    pub unit: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertUnitParams {
    /// Amount in from_unit
    pub amount: f64,
    pub from_unit: String,
    pub to_unit: String,
    /// Total cost of the amount in USD (unchanged by conversion)
    pub cost: Option<f64>,
    /// Ingredient name; required to convert between weight and volume
    pub ingredient_name: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertCostPerUnitParams {
    /// Price of one from_unit in USD
    pub cost_per_unit: f64,
    pub from_unit: String,
    pub to_unit: String,
    /// Ingredient name; required to convert between weight and volume
    pub ingredient_name: Option<String>,
}

// ============================================================================
// Recipe Parameter Structs
// ============================================================================

/// One ingredient line
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IngredientParam {
    pub name: String,
    /// Amount for the recipe's own servings (> 0)
    pub amount: f64,
    pub unit: String,
    /// Total cost of this line in USD (default 0)
    #[serde(default)]
    pub cost: f64,
    /// produce, meat, seafood, dairy, pantry, spices, baking, frozen, snacks, breakfast, drinks, other
    #[serde(default)]
    pub category: Option<String>,
}

impl From<IngredientParam> for IngredientQuantity {
    fn from(p: IngredientParam) -> Self {
        IngredientQuantity {
            category: p.category.as_deref().map(Category::from_str).unwrap_or_default(),
            name: p.name,
            amount: p.amount,
            unit: p.unit,
            cost: p.cost,
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateRecipeParams {
    pub name: String,
    /// Number of servings the recipe makes (> 0)
    pub servings: u32,
    #[serde(default)]
    pub ingredients: Vec<IngredientParam>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecipeIdParams {
    /// Recipe ID
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListRecipesParams {
    /// Search query for recipe name (optional)
    pub query: Option<String>,
    /// Maximum results (default 50, max 200)
    #[serde(default = "default_list_limit")]
    pub limit: i64,
    /// Offset for pagination (default 0)
    #[serde(default)]
    pub offset: i64,
}

fn default_list_limit() -> i64 { 50 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddRecipeIngredientParams {
    pub recipe_id: i64,
    pub ingredient: IngredientParam,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RemoveRecipeIngredientParams {
    pub recipe_id: i64,
    /// Ingredient name (case-insensitive); every line with this name is removed
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ScaleRecipeParams {
    pub id: i64,
    /// Target servings (> 0)
    pub servings: u32,
}

// ============================================================================
// Meal Plan / Grocery Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PlanMealParams {
    /// Date (YYYY-MM-DD)
    pub date: String,
    /// breakfast, lunch, dinner, snack (default unspecified)
    #[serde(default = "default_meal_type")]
    pub meal_type: String,
    pub recipe_id: i64,
    /// Servings to cook (defaults to what the recipe makes)
    pub servings: Option<u32>,
    pub notes: Option<String>,
}

fn default_meal_type() -> String { "unspecified".to_string() }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DateRangeParams {
    /// First date included (YYYY-MM-DD, optional)
    pub start_date: Option<String>,
    /// Last date included (YYYY-MM-DD, optional)
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MealPlanEntryIdParams {
    /// Meal plan entry ID
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CheckGroceryItemParams {
    /// Item id as listed, e.g. "garlic-cloves"
    pub item_id: String,
    /// Checked state (default true)
    #[serde(default = "default_checked")]
    pub checked: bool,
}

fn default_checked() -> bool { true }

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl MealPlanService {
    // --- Status ---

    #[tool(description = "Get the current status of the meal planner including build info, database counts, and process information")]
    fn mealplan_status(&self) -> Result<CallToolResult, McpError> {
        let status = self.status_tracker.get_status(&self.database);
        json_result(&status)
    }

    #[tool(description = "Get instructions for recipes, units, meal planning and grocery lists. Call this before starting a planning session.")]
    fn planning_instructions(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(PLANNING_INSTRUCTIONS)]))
    }

    // --- Units ---

    #[tool(description = "Classify a unit as weight, volume, countable or unknown and list what it converts to")]
    fn unit_info(&self, Parameters(p): Parameters<UnitInfoParams>) -> Result<CallToolResult, McpError> {
        json_result(&conversion::unit_info(&p.unit))
    }

    #[tool(description = "List every recognized unit grouped by family")]
    fn list_units(&self) -> Result<CallToolResult, McpError> {
        json_result(&conversion::list_units())
    }

    #[tool(description = "Convert an amount to another unit. Total cost is unchanged. Weight/volume conversion needs ingredient_name. If converted is false, keep the original amount and unit.")]
    fn convert_unit(&self, Parameters(p): Parameters<ConvertUnitParams>) -> Result<CallToolResult, McpError> {
        let result = conversion::convert_unit(
            p.amount,
            &p.from_unit,
            &p.to_unit,
            p.cost,
            p.ingredient_name.as_deref(),
        )
        .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Convert a price per unit (e.g. $/lb) into a price per another unit (e.g. $/oz)")]
    fn convert_cost_per_unit(&self, Parameters(p): Parameters<ConvertCostPerUnitParams>) -> Result<CallToolResult, McpError> {
        json_result(&conversion::convert_cost_per_unit(
            p.cost_per_unit,
            &p.from_unit,
            &p.to_unit,
            p.ingredient_name.as_deref(),
        ))
    }

    // --- Recipes ---

    #[tool(description = "Create a recipe with its ingredients (amounts and costs for the recipe's own servings)")]
    fn create_recipe(&self, Parameters(p): Parameters<CreateRecipeParams>) -> Result<CallToolResult, McpError> {
        let data = RecipeCreate {
            name: p.name,
            servings: p.servings,
            ingredients: p.ingredients.into_iter().map(IngredientQuantity::from).collect(),
            notes: p.notes,
        };
        let result = recipes::create_recipe(&self.database, data)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get a recipe with its ingredients, total cost and cost per serving")]
    fn get_recipe(&self, Parameters(p): Parameters<RecipeIdParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::get_recipe(&self.database, p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(recipe) => json_result(&recipe),
            None => json_result(&serde_json::json!({ "error": "Recipe not found", "id": p.id })),
        }
    }

    #[tool(description = "List recipes with optional name search and pagination")]
    fn list_recipes(&self, Parameters(p): Parameters<ListRecipesParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::list_recipes(&self.database, p.query.as_deref(), p.limit, p.offset)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Delete a recipe. Planned meals using it are removed as well.")]
    fn delete_recipe(&self, Parameters(p): Parameters<RecipeIdParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::delete_recipe(&self.database, p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Append an ingredient line to a recipe")]
    fn add_recipe_ingredient(&self, Parameters(p): Parameters<AddRecipeIngredientParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::add_recipe_ingredient(&self.database, p.recipe_id, p.ingredient.into())
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Remove an ingredient from a recipe by name")]
    fn remove_recipe_ingredient(&self, Parameters(p): Parameters<RemoveRecipeIngredientParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::remove_recipe_ingredient(&self.database, p.recipe_id, &p.name)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Show a recipe scaled to a number of servings (amounts and costs rounded to 2 decimals). The stored recipe is not changed.")]
    fn scale_recipe(&self, Parameters(p): Parameters<ScaleRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::scale_recipe(&self.database, p.id, p.servings)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Meal Plan ---

    #[tool(description = "Put a recipe on the meal plan for a date")]
    fn plan_meal(&self, Parameters(p): Parameters<PlanMealParams>) -> Result<CallToolResult, McpError> {
        let result = meal_plan::plan_meal(
            &self.database,
            &p.date,
            &p.meal_type,
            p.recipe_id,
            p.servings,
            p.notes,
        )
        .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "List planned meals, optionally within a date range")]
    fn list_meal_plan(&self, Parameters(p): Parameters<DateRangeParams>) -> Result<CallToolResult, McpError> {
        let result = meal_plan::list_meal_plan(&self.database, p.start_date, p.end_date)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Remove a planned meal")]
    fn remove_meal_plan_entry(&self, Parameters(p): Parameters<MealPlanEntryIdParams>) -> Result<CallToolResult, McpError> {
        let result = meal_plan::remove_meal_plan_entry(&self.database, p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Grocery List ---

    #[tool(description = "Rebuild the grocery list from planned meals in a date range. Replaces the stored list and clears all checked marks.")]
    fn generate_grocery_list(&self, Parameters(p): Parameters<DateRangeParams>) -> Result<CallToolResult, McpError> {
        let result = grocery::generate_grocery_list(&self.database, p.start_date, p.end_date)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get the stored grocery list with checked state and remaining cost")]
    fn get_grocery_list(&self) -> Result<CallToolResult, McpError> {
        let result = grocery::get_grocery_list(&self.database)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Check or uncheck a grocery list item")]
    fn check_grocery_item(&self, Parameters(p): Parameters<CheckGroceryItemParams>) -> Result<CallToolResult, McpError> {
        let result = grocery::check_grocery_item(&self.database, &p.item_id, p.checked)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Remove every item from the grocery list")]
    fn clear_grocery_list(&self) -> Result<CallToolResult, McpError> {
        let result = grocery::clear_grocery_list(&self.database)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for MealPlanService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mealplan".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Meal Planner".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Meal Planner - recipes, unit conversion, meal plans and grocery lists. \
                 IMPORTANT: Call planning_instructions first. \
                 Units: unit_info, list_units, convert_unit, convert_cost_per_unit. \
                 Recipes: create/get/list/delete_recipe, add/remove_recipe_ingredient, scale_recipe. \
                 Plan: plan_meal, list_meal_plan, remove_meal_plan_entry. \
                 Groceries: generate_grocery_list (replaces the list), get_grocery_list, \
                 check_grocery_item, clear_grocery_list."
                    .into(),
            ),
        }
    }
}
