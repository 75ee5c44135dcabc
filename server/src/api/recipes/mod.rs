pub mod create;
pub mod delete;
pub mod edit;
pub mod get;
pub mod list;
pub mod new;
pub mod update;

use crate::SharedState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the owner-scoped recipe pages
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/recipes", get(list::list_recipes).post(create::create_recipe))
        .route("/recipes/new", get(new::new_recipe_form))
        .route("/recipes/{id}", get(get::get_recipe))
        .route(
            "/recipes/{id}/edit",
            get(edit::edit_recipe_form).post(update::update_recipe),
        )
        .route("/recipes/{id}/delete", post(delete::delete_recipe))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        new::new_recipe_form,
        create::create_recipe,
        get::get_recipe,
        edit::edit_recipe_form,
        update::update_recipe,
        delete::delete_recipe,
    ),
    components(schemas(
        list::ListRecipesResponse,
        list::RecipeSummary,
        new::NewRecipeFormResponse,
        new::CategoryOption,
        create::RecipeForm,
        get::RecipeResponse,
        get::RecipeDetail,
        edit::EditRecipeFormResponse,
    ))
)]
pub struct ApiDoc;
