use crate::api::ErrorResponse;
use crate::auth::{AuthUser, CurrentSession, Flash};
use crate::get_conn;
use crate::schema::recipes;
use crate::SharedState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use diesel::prelude::*;

fn owned_delete(
    owner_id: i32,
    recipe_id: i32,
) -> impl diesel::query_dsl::methods::ExecuteDsl<PgConnection>
       + diesel::query_builder::QueryFragment<diesel::pg::Pg>
       + diesel::RunQueryDsl<PgConnection> {
    diesel::delete(
        recipes::table
            .filter(recipes::id.eq(recipe_id))
            .filter(recipes::user_id.eq(owner_id)),
    )
}

#[utoipa::path(
    post,
    path = "/recipes/{id}/delete",
    tag = "recipes",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 303, description = "Recipe deleted, redirects to /recipes"),
        (status = 404, description = "Recipe not found or not owned", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_recipe(
    AuthUser(user): AuthUser,
    session: CurrentSession,
    State(state): State<SharedState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let deleted = match owned_delete(user.id, id).execute(&mut conn) {
        Ok(count) => count,
        Err(e) => {
            tracing::error!("Failed to delete recipe: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to delete recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    if deleted == 0 {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe not found".to_string(),
            }),
        )
            .into_response();
    }

    // Deletions flash with the error kind so the banner renders red.
    session.set_flash(Flash::error("Recipe deleted!"));
    Redirect::to("/recipes").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_statement_filters_on_the_owner() {
        let sql = diesel::debug_query::<diesel::pg::Pg, _>(&owned_delete(7, 42)).to_string();
        assert!(sql.contains(r#""recipes"."id" = $"#), "{sql}");
        assert!(sql.contains(r#""recipes"."user_id" = $"#), "{sql}");
    }
}
