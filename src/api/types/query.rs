//! Query string extractor whose rejections use the API error envelope

use axum::{
    extract::{rejection::QueryRejection, FromRequestParts, Query as AxumQuery},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Wrapper around `axum::extract::Query` that reports bad query strings as `ApiError`
#[derive(Debug, Clone, Copy, Default)]
pub struct Query<T>(pub T);

impl<S, T> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match AxumQuery::<T>::from_request_parts(parts, state).await {
            Ok(AxumQuery(value)) => Ok(Query(value)),
            Err(rejection) => {
                let mut err = ApiError::bad_request(rejection_message(&rejection))
                    .with_code("query_parse_error");
                err.status = rejection.status();
                Err(err)
            }
        }
    }
}

fn rejection_message(rejection: &QueryRejection) -> String {
    match rejection {
        QueryRejection::FailedToDeserializeQueryString(err) => {
            format!("Invalid query string: {}", err.body_text())
        }
        _ => "Invalid query string".to_string(),
    }
}
