use crate::{
    errors::Error,
    store::{self, users::User},
};
use axum::{
    extract::Request,
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

// The authenticated requester, inserted into request extensions for
// handlers to extract.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

pub async fn auth(mut req: Request, next: Next) -> Response {
    let Some(token) = bearer_token(&req) else {
        return Error::Unauthenticated.into_response();
    };

    match store::users::find_by_token(store::pool(), &token).await {
        Ok(Some(user)) => {
            req.extensions_mut().insert(CurrentUser(user));

            next.run(req).await
        }
        Ok(None) => Error::Unauthenticated.into_response(),
        Err(e) => e.into_response(),
    }
}

fn bearer_token(req: &Request) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}
