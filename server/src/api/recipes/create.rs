use crate::api::ErrorResponse;
use crate::auth::{AuthUser, CurrentSession, Flash};
use crate::get_conn;
use crate::models::NewRecipe;
use crate::schema::recipes;
use crate::SharedState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Form, Json,
};
use diesel::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;

/// Shared by create and update; fields land in the store as submitted, no
/// validation (empty titles included).
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RecipeForm {
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    /// The form's category select; an empty selection posts an empty
    /// string. The referenced category is not checked for existence.
    pub category_id: Option<String>,
}

impl RecipeForm {
    pub fn category_id(&self) -> Option<i32> {
        self.category_id.as_deref().and_then(|c| c.parse().ok())
    }
}

#[utoipa::path(
    post,
    path = "/recipes",
    tag = "recipes",
    request_body(content = RecipeForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Recipe created, redirects to /recipes"),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    session: CurrentSession,
    State(state): State<SharedState>,
    Form(form): Form<RecipeForm>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let new_recipe = NewRecipe {
        title: &form.title,
        ingredients: &form.ingredients,
        instructions: &form.instructions,
        category_id: form.category_id(),
        user_id: user.id,
    };

    match diesel::insert_into(recipes::table)
        .values(&new_recipe)
        .execute(&mut conn)
    {
        Ok(_) => {
            session.set_flash(Flash::success("Recipe added successfully!"));
            Redirect::to("/recipes").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(category_id: Option<&str>) -> RecipeForm {
        RecipeForm {
            title: "Pancakes".to_string(),
            ingredients: "flour, eggs, milk".to_string(),
            instructions: "mix and fry".to_string(),
            category_id: category_id.map(str::to_string),
        }
    }

    #[test]
    fn category_parses_when_numeric() {
        assert_eq!(form(Some("2")).category_id(), Some(2));
    }

    #[test]
    fn empty_or_missing_category_is_none() {
        assert_eq!(form(Some("")).category_id(), None);
        assert_eq!(form(None).category_id(), None);
        assert_eq!(form(Some("soup")).category_id(), None);
    }
}
