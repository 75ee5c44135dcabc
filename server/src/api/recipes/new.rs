use crate::api::ErrorResponse;
use crate::auth::{AuthUser, CurrentSession, Flash};
use crate::get_conn;
use crate::models::Category;
use crate::schema::categories;
use crate::SharedState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryOption {
    pub id: i32,
    pub name: String,
}

impl From<Category> for CategoryOption {
    fn from(category: Category) -> Self {
        CategoryOption {
            id: category.id,
            name: category.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NewRecipeFormResponse {
    pub title: String,
    pub categories: Vec<CategoryOption>,
    pub flash: Option<Flash>,
}

#[utoipa::path(
    get,
    path = "/recipes/new",
    tag = "recipes",
    responses(
        (status = 200, description = "Creation form data", body = NewRecipeFormResponse),
        (status = 303, description = "Not logged in, redirects to /login"),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn new_recipe_form(
    AuthUser(_user): AuthUser,
    session: CurrentSession,
    State(state): State<SharedState>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

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
        Json(NewRecipeFormResponse {
            title: "Add Recipe".to_string(),
            categories: cats.into_iter().map(CategoryOption::from).collect(),
            flash: session.take_flash(),
        }),
    )
        .into_response()
}
