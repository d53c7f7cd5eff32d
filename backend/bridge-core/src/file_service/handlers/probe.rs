use crate::file_service::handlers::{FormFields, PathParams};
use crate::file_service::response::text;
use crate::fs_ops;

use std::path::Path;

use axum::response::Response;

/// `yes` if `path` names a regular file, `no` otherwise.
pub async fn is_file(FormFields(params): FormFields<PathParams>) -> Response {
    let answer = if fs_ops::is_file(Path::new(&params.path)).await {
        "yes"
    } else {
        "no"
    };
    text(answer)
}
