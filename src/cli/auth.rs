use crate::{error, management::TokenManager, success, warning};

pub async fn login(username: String, password: String) {
    let token_manager = match TokenManager::login(&username, &password).await {
        Ok(manager) => manager,
        Err(e) => error!("Login failed: {}", e),
    };

    if let Err(e) = token_manager.persist().await {
        error!("Failed to save token to cache: {}", e);
    }

    success!("Logged in as {}", username);
}

pub async fn logout() {
    match TokenManager::forget().await {
        Ok(()) => success!("Cached token removed"),
        Err(e) => warning!("Failed to remove cached token: {}", e),
    }
}
