//! Session favorites endpoints

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use econcal_core::state::Action;
use serde::Serialize;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(list_favorites))
        .route("/favorites/{id}", post(toggle_favorite))
}

#[derive(Serialize)]
pub struct FavoriteStatus {
    pub id: String,
    pub favorite: bool,
}

/// GET /favorites - Ids favorited in this session
async fn list_favorites(State(state): State<AppState>) -> Json<Vec<String>> {
    let session = state.snapshot().await;
    Json(session.favorites.iter().map(str::to_string).collect())
}

/// POST /favorites/:id - Flip an event in or out of the session favorites
async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FavoriteStatus>, AppError> {
    if state.store().get(&id).is_none() {
        return Err(AppError::not_found(format!("Event not found: {}", id)));
    }

    let session = state.dispatch(Action::ToggleFavorite(id.clone())).await;
    let favorite = session.is_favorite(&id);
    tracing::debug!(%id, favorite, "toggled favorite");

    Ok(Json(FavoriteStatus { id, favorite }))
}

#[cfg(test)]
mod tests {
    use crate::routes::tests::{send, test_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn toggle_twice_restores_favorites() {
        let app = test_app();

        let (status, body) = send(&app, "POST", "/favorites/2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["favorite"], true);

        let (_, body) = send(&app, "GET", "/favorites").await;
        assert_eq!(body, serde_json::json!(["2"]));

        let (_, body) = send(&app, "POST", "/favorites/2").await;
        assert_eq!(body["favorite"], false);

        let (_, body) = send(&app, "GET", "/favorites").await;
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn unknown_event_is_not_found() {
        let app = test_app();
        let (status, _) = send(&app, "POST", "/favorites/404").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn session_favorites_do_not_affect_the_favorites_filter() {
        let app = test_app();
        send(&app, "POST", "/favorites/2").await;

        let (_, body) = send(&app, "GET", "/events?range=custom&favorites=true").await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["days"][0]["events"][0]["id"], "1");
    }
}
