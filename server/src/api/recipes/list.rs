use crate::api::ErrorResponse;
use crate::auth::{AuthUser, CurrentSession, Flash};
use crate::get_conn;
use crate::models::Recipe;
use crate::pagination::{self, PAGE_SIZE};
use crate::schema::{categories, recipes};
use crate::SharedState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListRecipesParams {
    /// 1-based page number. Absent or non-numeric values default to 1; a
    /// page past the end yields an empty list rather than an error.
    pub page: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeSummary {
    pub id: i32,
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    /// Joined category name; null for uncategorized recipes or a dangling
    /// category reference.
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub title: String,
    pub recipes: Vec<RecipeSummary>,
    pub current_page: i64,
    pub total_pages: i64,
    /// Every page number from 1 to total_pages; the listing renders them all.
    pub pages: Vec<i64>,
    pub flash: Option<Flash>,
}

#[utoipa::path(
    get,
    path = "/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "The caller's recipes, newest first, three per page", body = ListRecipesResponse),
        (status = 303, description = "Not logged in, redirects to /login"),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_recipes(
    AuthUser(user): AuthUser,
    session: CurrentSession,
    State(state): State<SharedState>,
    Query(params): Query<ListRecipesParams>,
) -> impl IntoResponse {
    let page = pagination::parse_page(params.page.as_deref());

    let mut conn = get_conn!(state.pool);

    // Count first, then fetch. The two queries are not atomic; a write in
    // between can make total_pages disagree with the fetched page.
    let total: i64 = match recipes::table
        .filter(recipes::user_id.eq(user.id))
        .count()
        .get_result(&mut conn)
    {
        Ok(n) => n,
        Err(e) => {
            tracing::error!("Failed to count recipes: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to count recipes".to_string(),
                }),
            )
                .into_response();
        }
    };

    let total_pages = pagination::total_pages(total, PAGE_SIZE);

    let rows: Vec<(Recipe, Option<String>)> = match recipes::table
        .left_join(categories::table)
        .filter(recipes::user_id.eq(user.id))
        .order(recipes::id.desc())
        .limit(PAGE_SIZE)
        .offset(pagination::offset(page, PAGE_SIZE))
        .select((Recipe::as_select(), categories::name.nullable()))
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to fetch recipes: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipes".to_string(),
                }),
            )
                .into_response();
        }
    };

    let recipes = rows
        .into_iter()
        .map(|(recipe, category_name)| RecipeSummary {
            id: recipe.id,
            title: recipe.title,
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
            category_name,
        })
        .collect();

    (
        StatusCode::OK,
        Json(ListRecipesResponse {
            title: "My Recipes".to_string(),
            recipes,
            current_page: page,
            total_pages,
            pages: pagination::page_numbers(total_pages),
            flash: session.take_flash(),
        }),
    )
        .into_response()
}
