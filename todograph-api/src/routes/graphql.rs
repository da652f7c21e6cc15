/// Named-operation dispatcher
///
/// The single graph-query endpoint: `POST /graphql` accepts a named
/// operation plus a variables object and routes it to the matching
/// handler. Successful results come back in a GraphQL-style envelope,
/// `{ "data": { "<operationName>": ... } }`; failures use the unified
/// error responses from [`crate::error`].
///
/// # Request shape
///
/// ```json
/// {
///   "operationName": "updateOrMarkTodo",
///   "variables": { "todoId": "...", "isMark": true }
/// }
/// ```

use axum::{extract::State, Extension, Json};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use todograph_shared::auth::identity::Identity;
use tracing::instrument;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::{auth, todos, users},
};

/// A named operation with its variables
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRequest {
    /// Operation to execute, e.g. "signUpUser" or "getTodoById"
    pub operation_name: String,

    /// Operation inputs; defaults to an empty object
    #[serde(default)]
    pub variables: Value,
}

/// Executes one named operation
///
/// The identity layer has already run: `identity` is anonymous for
/// requests without an authorization header, and requests with a bad
/// token never reach this handler.
#[instrument(skip(state, req), fields(operation = %req.operation_name))]
pub async fn execute(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<OperationRequest>,
) -> ApiResult<Json<Value>> {
    let OperationRequest {
        operation_name,
        variables,
    } = req;

    let data = match operation_name.as_str() {
        // Mutations
        "signUpUser" => respond(auth::sign_up_user(&state, parse(variables)?).await?)?,
        "signInUser" => respond(auth::sign_in_user(&state, parse(variables)?).await?)?,
        "createTodo" => respond(todos::create_todo(&state, identity, parse(variables)?).await?)?,
        "updateOrMarkTodo" => {
            respond(todos::update_or_mark_todo(&state, identity, parse(variables)?).await?)?
        }
        "deleteTodo" => respond(todos::delete_todo(&state, identity, parse(variables)?).await?)?,
        "deleteUsersTodos" => respond(users::delete_users_todos(&state).await?)?,

        // Queries
        "getUser" => respond(users::get_user(&state, identity).await?)?,
        "getUsers" => respond(users::get_users(&state).await?)?,
        "getTodoById" => {
            respond(todos::get_todo_by_id(&state, identity, parse(variables)?).await?)?
        }

        other => {
            return Err(ApiError::InvalidArgument(format!(
                "Unknown operation: {}",
                other
            )))
        }
    };

    let mut payload = serde_json::Map::new();
    payload.insert(operation_name, data);

    Ok(Json(json!({ "data": payload })))
}

/// Deserializes the variables object into an operation's input type
fn parse<T: DeserializeOwned>(variables: Value) -> ApiResult<T> {
    serde_json::from_value(variables)
        .map_err(|e| ApiError::InvalidArgument(format!("Invalid variables: {}", e)))
}

/// Serializes a handler result into the response envelope
fn respond<T: Serialize>(value: T) -> ApiResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| ApiError::InternalError(format!("Failed to serialize response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_request_deserializes() {
        let req: OperationRequest = serde_json::from_value(json!({
            "operationName": "getUser"
        }))
        .unwrap();

        assert_eq!(req.operation_name, "getUser");
        assert!(req.variables.is_null());
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        #[derive(Deserialize)]
        struct Input {
            #[allow(dead_code)]
            id: uuid::Uuid,
        }

        let result: ApiResult<Input> = parse(json!({}));
        assert!(matches!(result, Err(ApiError::InvalidArgument(_))));
    }
}
