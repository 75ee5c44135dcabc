use crate::api::ErrorResponse;
use crate::auth::{AuthUser, CurrentSession, Flash};
use crate::get_conn;
use crate::models::Category;
use crate::schema::categories;
use crate::SharedState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

use super::get::{fetch_owned_recipe, RecipeDetail};
use super::new::CategoryOption;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EditRecipeFormResponse {
    pub title: String,
    pub recipe: RecipeDetail,
    pub categories: Vec<CategoryOption>,
    pub flash: Option<Flash>,
}

#[utoipa::path(
    get,
    path = "/recipes/{id}/edit",
    tag = "recipes",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Edit form data", body = EditRecipeFormResponse),
        (status = 303, description = "Not logged in, redirects to /login"),
        (status = 404, description = "Recipe not found or not owned", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn edit_recipe_form(
    AuthUser(user): AuthUser,
    session: CurrentSession,
    State(state): State<SharedState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let (recipe, category_name) = match fetch_owned_recipe(&mut conn, user.id, id) {
        Ok(Some(row)) => row,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Recipe not found".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to fetch recipe: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    let cats: Vec<Category> = match categories::table
        .order(categories::id.asc())
        .select(Category::as_select())
        .load(&mut conn)
    {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to fetch categories: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch categories".to_string(),
                }),
            )
                .into_response();
        }
    };

    (
        StatusCode::OK,
        Json(EditRecipeFormResponse {
            title: "Edit Recipe".to_string(),
            recipe: RecipeDetail {
                id: recipe.id,
                title: recipe.title,
                ingredients: recipe.ingredients,
                instructions: recipe.instructions,
                category_id: recipe.category_id,
                category_name,
            },
            categories: cats.into_iter().map(CategoryOption::from).collect(),
            flash: session.take_flash(),
        }),
    )
        .into_response()
}
