use crate::api::ErrorResponse;
use crate::auth::{AuthUser, CurrentSession, Flash};
use crate::get_conn;
use crate::schema::recipes;
use crate::SharedState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Form, Json,
};
use diesel::prelude::*;

use super::create::RecipeForm;

fn owned_update<'a>(
    owner_id: i32,
    recipe_id: i32,
    form: &'a RecipeForm,
) -> impl diesel::query_dsl::methods::ExecuteDsl<PgConnection>
       + diesel::query_builder::QueryFragment<diesel::pg::Pg>
       + diesel::RunQueryDsl<PgConnection>
       + 'a {
    diesel::update(
        recipes::table
            .filter(recipes::id.eq(recipe_id))
            .filter(recipes::user_id.eq(owner_id)),
    )
    .set((
        recipes::title.eq(&form.title),
        recipes::ingredients.eq(&form.ingredients),
        recipes::instructions.eq(&form.instructions),
        recipes::category_id.eq(form.category_id()),
    ))
}

#[utoipa::path(
    post,
    path = "/recipes/{id}/edit",
    tag = "recipes",
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body(content = RecipeForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Recipe updated, redirects to its detail page"),
        (status = 404, description = "Recipe not found or not owned", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_recipe(
    AuthUser(user): AuthUser,
    session: CurrentSession,
    State(state): State<SharedState>,
    Path(id): Path<i32>,
    Form(form): Form<RecipeForm>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    // Ownership lives on the UPDATE's own predicate, not a pre-check; a
    // non-owned id updates zero rows and reads as not found.
    let updated = match owned_update(user.id, id, &form).execute(&mut conn) {
        Ok(count) => count,
        Err(e) => {
            tracing::error!("Failed to update recipe: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    if updated == 0 {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe not found".to_string(),
            }),
        )
            .into_response();
    }

    session.set_flash(Flash::success("Recipe updated successfully!"));
    Redirect::to(&format!("/recipes/{id}")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_statement_filters_on_the_owner() {
        let form = RecipeForm {
            title: "Pancakes".to_string(),
            ingredients: "flour, eggs, milk".to_string(),
            instructions: "mix and fry".to_string(),
            category_id: None,
        };

        let sql = diesel::debug_query::<diesel::pg::Pg, _>(&owned_update(7, 42, &form)).to_string();
        assert!(sql.contains(r#""recipes"."id" = $"#), "{sql}");
        assert!(sql.contains(r#""recipes"."user_id" = $"#), "{sql}");
    }
}
