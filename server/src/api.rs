//! JSON routes for the todo resource.

use axum::{
    extract::{FromRequest, FromRequestParts, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::error::ApiError;
use crate::store::{Todo, TodoInput, TodoStore};

/// `Json` extractor whose rejections become `ApiError::Validation`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// `Path` extractor whose rejections become `ApiError::Validation`.
///
/// Ids are taken as raw segments and resolved with [`todo_id`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);

pub fn router(store: TodoStore) -> Router {
    Router::new()
        .route("/todos", get(list_todos))
        .route("/todo", post(create_todo))
        .route(
            "/todo/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(store)
}

/// Resolves a raw `{id}` segment.
///
/// Anything that is not an integer is a validation error. Integers that no
/// todo can carry (zero, negative, or past `u64::MAX`) are simply not found.
pub fn todo_id(raw: &str) -> Result<u64, ApiError> {
    let unsigned = raw.strip_prefix('+').unwrap_or(raw);
    let digits = unsigned.strip_prefix('-').unwrap_or(unsigned);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::Validation(format!(
            "Invalid todo id `{raw}`: expected an integer"
        )));
    }
    match unsigned.parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::NotFound),
    }
}

#[tracing::instrument(skip(store))]
async fn list_todos(State(store): State<TodoStore>) -> Json<Vec<Todo>> {
    Json(store.list().await)
}

#[tracing::instrument(skip(store))]
async fn get_todo(
    State(store): State<TodoStore>,
    AppPath(id): AppPath<String>,
) -> Result<Json<Todo>, ApiError> {
    Ok(Json(store.get(todo_id(&id)?).await?))
}

#[tracing::instrument(skip(store, input))]
async fn create_todo(
    State(store): State<TodoStore>,
    AppJson(input): AppJson<TodoInput>,
) -> (StatusCode, Json<Todo>) {
    let todo = store.create(input).await;
    (StatusCode::CREATED, Json(todo))
}

#[tracing::instrument(skip(store, input))]
async fn update_todo(
    State(store): State<TodoStore>,
    AppPath(id): AppPath<String>,
    AppJson(input): AppJson<TodoInput>,
) -> Result<Json<Todo>, ApiError> {
    Ok(Json(store.update(todo_id(&id)?, input).await?))
}

#[tracing::instrument(skip(store))]
async fn delete_todo(
    State(store): State<TodoStore>,
    AppPath(id): AppPath<String>,
) -> Result<StatusCode, ApiError> {
    store.delete(todo_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_id_accepts_positive_integers() {
        assert_eq!(todo_id("1").unwrap(), 1);
        assert_eq!(todo_id("+42").unwrap(), 42);
        assert_eq!(todo_id("007").unwrap(), 7);
    }

    #[test]
    fn todo_id_maps_unissuable_integers_to_not_found() {
        for raw in ["0", "-1", "-0", "99999999999999999999", "-99999999999999999999"] {
            assert!(
                matches!(todo_id(raw), Err(ApiError::NotFound)),
                "{raw} should be not found"
            );
        }
    }

    #[test]
    fn todo_id_rejects_non_integers() {
        for raw in ["abc", "1.5", "", "-", "+", "1e3", "--1"] {
            assert!(
                matches!(todo_id(raw), Err(ApiError::Validation(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn todo_serializes_missing_description_as_null() {
        let todo = Todo {
            id: 1,
            title: "Test".to_string(),
            description: None,
            completed: false,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "title": "Test",
                "description": null,
                "completed": false
            })
        );
    }

    #[test]
    fn input_defaults_optional_fields() {
        let input: TodoInput = serde_json::from_str(r#"{"title":"No extras"}"#).unwrap();
        assert_eq!(input.title, "No extras");
        assert!(input.description.is_none());
        assert!(!input.completed);
    }

    #[test]
    fn input_accepts_explicit_null_description() {
        let input: TodoInput =
            serde_json::from_str(r#"{"title":"t","description":null,"completed":true}"#).unwrap();
        assert!(input.description.is_none());
        assert!(input.completed);
    }

    #[test]
    fn input_rejects_missing_title() {
        let result: Result<TodoInput, _> = serde_json::from_str(r#"{"completed":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn input_rejects_wrong_types() {
        let result: Result<TodoInput, _> = serde_json::from_str(r#"{"title":3}"#);
        assert!(result.is_err());
        let result: Result<TodoInput, _> =
            serde_json::from_str(r#"{"title":"t","completed":"yes"}"#);
        assert!(result.is_err());
    }
}
