use crate::api::ErrorResponse;
use crate::auth::{AuthUser, CurrentSession, Flash};
use crate::get_conn;
use crate::models::Recipe;
use crate::schema::{categories, recipes};
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

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeDetail {
    pub id: i32,
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    pub category_id: Option<i32>,
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub title: String,
    pub recipe: RecipeDetail,
    pub flash: Option<Flash>,
}

fn owned_recipe_query(
    owner_id: i32,
    recipe_id: i32,
) -> impl diesel::query_dsl::methods::LoadQuery<'static, PgConnection, (Recipe, Option<String>)>
       + diesel::query_builder::QueryFragment<diesel::pg::Pg> {
    recipes::table
        .left_join(categories::table)
        .filter(recipes::id.eq(recipe_id))
        .filter(recipes::user_id.eq(owner_id))
        .select((Recipe::as_select(), categories::name.nullable()))
}

/// Fetches one recipe with the owner predicate on the query itself. A
/// recipe that exists but belongs to someone else is indistinguishable
/// from one that does not exist.
pub fn fetch_owned_recipe(
    conn: &mut PgConnection,
    owner_id: i32,
    recipe_id: i32,
) -> Result<Option<(Recipe, Option<String>)>, diesel::result::Error> {
    owned_recipe_query(owner_id, recipe_id)
        .get_result(conn)
        .optional()
}

#[utoipa::path(
    get,
    path = "/recipes/{id}",
    tag = "recipes",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe detail", body = RecipeResponse),
        (status = 303, description = "Not logged in, redirects to /login"),
        (status = 404, description = "Recipe not found or not owned", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_recipe(
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

    (
        StatusCode::OK,
        Json(RecipeResponse {
            title: recipe.title.clone(),
            recipe: RecipeDetail {
                id: recipe.id,
                title: recipe.title,
                ingredients: recipe.ingredients,
                instructions: recipe.instructions,
                category_id: recipe.category_id,
                category_name,
            },
            flash: session.take_flash(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_query_filters_on_the_owner() {
        let sql = diesel::debug_query::<diesel::pg::Pg, _>(&owned_recipe_query(7, 42)).to_string();
        assert!(sql.contains(r#""recipes"."id" = $"#), "{sql}");
        assert!(sql.contains(r#""recipes"."user_id" = $"#), "{sql}");
    }
}
