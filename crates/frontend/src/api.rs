use gloo_net::http::Request;
use shared_types::UserSessionRecord;
use web_sys::RequestCredentials;

pub struct ApiService;

impl ApiService {
    /// Ask the server who is signed in.
    ///
    /// `Ok(None)` means the server answered but there is no usable session
    /// (401 or any other non-success status).
    pub async fn me() -> Result<Option<UserSessionRecord>, String> {
        let response = Request::get("/api/me")
            .credentials(RequestCredentials::Include)
            .send()
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        if !response.ok() {
            return Ok(None);
        }

        response
            .json()
            .await
            .map(Some)
            .map_err(|e| format!("Failed to parse response: {:?}", e))
    }

    pub async fn logout() -> Result<(), String> {
        let response = Request::post("/auth/logout")
            .credentials(RequestCredentials::Include)
            .send()
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        if !response.ok() {
            return Err(format!("HTTP error: {}", response.status()));
        }

        Ok(())
    }
}
