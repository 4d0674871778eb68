use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::core::error::AppError;

/// Query string extractor that validates its target and answers with a
/// consistent 400 on failure
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::BadRequest(format!("Invalid query string: {}", rejection.body_text()))
            })?;

        value
            .validate()
            .map_err(|errors| AppError::Validation(first_message(&errors)))?;

        Ok(Self(value))
    }
}

/// Message of the first failing rule, falling back to the rule code
fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| errs.iter().map(move |e| (field.clone(), e)))
        .map(|(field, e)| match &e.message {
            Some(message) => message.to_string(),
            None => format!("{} is invalid ({})", field, e.code),
        })
        .next()
        .unwrap_or_else(|| "Invalid query parameters".to_string())
}
