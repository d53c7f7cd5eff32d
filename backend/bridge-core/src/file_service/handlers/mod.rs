//! Route handlers.
//!
//! Inputs are read with [`FormFields`]: the query string on GET, or the body
//! of a POST sent either urlencoded or as `multipart/form-data` (what the
//! extension's `FormData` posts produce). Missing fields are empty strings,
//! as a browser form would send them.

pub mod download;
pub mod file_manager;
pub mod probe;
pub mod save;
pub mod static_files;
pub mod transfer;

use crate::file_service::response::RouteError;

use axum::Form;
use axum::extract::{FromRequest, Multipart, Query, Request};
use axum::http::Method;
use axum::http::header::CONTENT_TYPE;
use log::debug;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

const URLENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART: &str = "multipart/form-data";

#[derive(Debug, Deserialize)]
pub struct PathParams {
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct TransferParams {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub dest: String,
}

/// Named text inputs of a request, whichever way the client encoded them.
///
/// - multipart bodies: every non-file part, by name
/// - urlencoded bodies and GET requests: axum's [`Form`]
/// - anything else: the query string
///
/// A name sent twice keeps its first value.
#[derive(Debug)]
pub struct FormFields<T>(pub T);

impl<S, T> FromRequest<S> for FormFields<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = RouteError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if content_type.starts_with(MULTIPART) {
            let multipart = Multipart::from_request(request, state)
                .await
                .map_err(|e| RouteError::bad_request(e.body_text()))?;
            return multipart_fields(multipart).await.map(FormFields);
        }

        if content_type.starts_with(URLENCODED) || request.method() == Method::GET {
            let Form(fields) = Form::<T>::from_request(request, state)
                .await
                .map_err(|e| RouteError::bad_request(e.body_text()))?;
            return Ok(FormFields(fields));
        }

        let Query(fields) = Query::<T>::try_from_uri(request.uri())
            .map_err(|e| RouteError::bad_request(e.body_text()))?;
        Ok(FormFields(fields))
    }
}

async fn multipart_fields<T>(mut multipart: Multipart) -> Result<T, RouteError>
where
    T: DeserializeOwned,
{
    let mut fields = Map::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| RouteError::bad_request(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if field.file_name().is_some() {
            debug!("Ignoring file part '{name}'");
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| RouteError::bad_request(e.body_text()))?;
        fields.entry(name).or_insert(Value::String(value));
    }

    serde_json::from_value(Value::Object(fields))
        .map_err(|e| RouteError::bad_request(format!("invalid form fields: {e}")))
}
