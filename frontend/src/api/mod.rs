use gloo_net::http::Request;
use gloo_storage::{LocalStorage, Storage};
use leptos::*;
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    ApiError, ApiSuccess, AuthResponse, EconomyRecord, PlayerProfile, SaveEconomyRequest,
    SignInRequest,
};

const API_BASE: &str = "/api";
const TOKEN_KEY: &str = "triplex_session";

/// The current session: a bearer token mirrored into LocalStorage and the
/// player it belongs to. Exactly one player (or none) is current at a time;
/// all signed-in UI derives from the `player` signal directly.
#[derive(Clone)]
pub struct AuthState {
    pub token: RwSignal<Option<String>>,
    pub player: RwSignal<Option<PlayerProfile>>,
}

impl AuthState {
    pub fn new() -> Self {
        let stored_token: Option<String> = LocalStorage::get(TOKEN_KEY).ok();

        Self {
            token: create_rw_signal(stored_token),
            player: create_rw_signal(None),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.player.with(|player| player.is_some())
    }

    /// A token survived the last reload but the player has not been
    /// re-fetched yet.
    pub fn has_stored_token(&self) -> bool {
        self.token.with_untracked(|token| token.is_some())
    }

    pub fn set_session(&self, response: AuthResponse) {
        LocalStorage::set(TOKEN_KEY, &response.token).ok();
        self.token.set(Some(response.token));
        self.player.set(Some(response.player));
    }

    pub fn clear_session(&self) {
        LocalStorage::delete(TOKEN_KEY);
        self.token.set(None);
        self.player.set(None);
    }
}

pub struct ApiClient;

impl ApiClient {
    fn get_token() -> Option<String> {
        LocalStorage::get(TOKEN_KEY).ok()
    }

    async fn request<T: DeserializeOwned>(
        method: &str,
        path: &str,
        body: Option<impl Serialize>,
        auth: bool,
    ) -> Result<T, String> {
        let url = format!("{}{}", API_BASE, path);

        let mut request = match method {
            "GET" => Request::get(&url),
            "POST" => Request::post(&url),
            "PUT" => Request::put(&url),
            "DELETE" => Request::delete(&url),
            _ => return Err("Invalid method".to_string()),
        };

        if auth {
            if let Some(token) = Self::get_token() {
                request = request.header("Authorization", &format!("Bearer {}", token));
            }
        }

        let response = if let Some(body) = body {
            request
                .header("Content-Type", "application/json")
                .json(&body)
                .map_err(|e| e.to_string())?
                .send()
                .await
                .map_err(|e| e.to_string())?
        } else {
            request.send().await.map_err(|e| e.to_string())?
        };

        if response.ok() {
            let result: ApiSuccess<T> = response.json().await.map_err(|e| e.to_string())?;
            Ok(result.data)
        } else {
            let error: ApiError = response.json().await.unwrap_or(ApiError {
                error: "unknown".to_string(),
                message: "An unknown error occurred".to_string(),
            });
            Err(error.message)
        }
    }

    // Auth endpoints
    pub async fn sign_in(request: SignInRequest) -> Result<AuthResponse, String> {
        Self::request("POST", "/auth/signin", Some(request), false).await
    }

    pub async fn sign_out() -> Result<(), String> {
        Self::request::<()>("POST", "/auth/signout", None::<()>, true).await
    }

    pub async fn current_player() -> Result<PlayerProfile, String> {
        Self::request::<PlayerProfile>("GET", "/auth/me", None::<()>, true).await
    }

    // Economy endpoints

    /// Fetches the caller's economy record. A 404 means the player has no
    /// record yet, which is not an error; any other failure stays an `Err`
    /// so it cannot be mistaken for an absent record.
    pub async fn load_economy() -> Result<Option<EconomyRecord>, String> {
        let url = format!("{}{}", API_BASE, "/economy/me");

        let mut request = Request::get(&url);
        if let Some(token) = Self::get_token() {
            request = request.header("Authorization", &format!("Bearer {}", token));
        }

        let response = request.send().await.map_err(|e| e.to_string())?;

        if response.status() == 404 {
            return Ok(None);
        }

        if response.ok() {
            let result: ApiSuccess<EconomyRecord> =
                response.json().await.map_err(|e| e.to_string())?;
            Ok(Some(result.data))
        } else {
            let error: ApiError = response.json().await.unwrap_or(ApiError {
                error: "unknown".to_string(),
                message: "An unknown error occurred".to_string(),
            });
            Err(error.message)
        }
    }

    pub async fn save_economy(request: SaveEconomyRequest) -> Result<(), String> {
        Self::request::<()>("PUT", "/economy/me", Some(request), true).await
    }
}
