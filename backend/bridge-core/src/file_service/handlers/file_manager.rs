use crate::file_service::RouteContext;
use crate::file_service::handlers::{FormFields, PathParams};
use crate::file_service::response::{RouteError, text};

use std::path::Path;

use axum::extract::State;
use axum::response::Response;

/// Reveal `path` in the platform's file manager.
pub async fn open_in_file_manager(
    State(context): State<RouteContext>,
    FormFields(params): FormFields<PathParams>,
) -> Result<Response, RouteError> {
    context.opener.open(Path::new(&params.path))?;
    Ok(text("ok"))
}
