use crate::{error, management::TokenManager, spotify, success};

pub async fn auth(refresh_token: String) {
    let token = match spotify::auth::refresh_token(&refresh_token).await {
        Ok(t) => t,
        Err(e) => error!("Failed to exchange refresh token: {}", e),
    };

    let token_manager = TokenManager::new(token);
    if let Err(e) = token_manager.persist().await {
        error!("Failed to save token to cache: {}", e);
    }

    success!("Authentication successful!");
}
