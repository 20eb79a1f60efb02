use axum::{
    response::{IntoResponse, Response, Redirect},
    http::StatusCode,
};
use crate::errors::{AppError, ApiError};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::debug!("Rendering error response: {}", self);
        match self {
            AppError::Api(err) => convert_api_error(err),

            AppError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                format!("Validation error: {}", err)
            ).into_response(),

            AppError::File(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("File error: {}", e)
            ).into_response(),

            AppError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                format!("Not found: {}", what)
            ).into_response(),
        }
    }
}

fn convert_api_error(err: ApiError) -> Response {
    match err {
        ApiError::Status { status, .. } if status == 401 => {
            Redirect::to("/?error=Session%20expired%2C%20please%20login").into_response()
        }

        ApiError::Status { status, .. } if status == 403 => {
            Redirect::to("/accessDenied").into_response()
        }

        // Everything else is the upstream API failing us
        _ => (
            StatusCode::BAD_GATEWAY,
            format!("API error: {}", err)
        ).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::LOCATION;

    #[test]
    fn test_expired_token_redirects_to_login() {
        let err = ApiError::Status { status: 401, body: String::new() };
        let response = AppError::Api(err).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(LOCATION).unwrap(),
            "/?error=Session%20expired%2C%20please%20login"
        );
    }

    #[test]
    fn test_upstream_errors_map_to_bad_gateway() {
        let err = ApiError::Status { status: 500, body: String::new() };
        let response = AppError::Api(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = AppError::Api(ApiError::Malformed("eof".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_forbidden_maps_to_access_denied() {
        let err = ApiError::Status { status: 403, body: "forbidden".into() };
        let response = AppError::Api(err).into_response();
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/accessDenied");
    }

    #[test]
    fn test_not_found() {
        let response = AppError::NotFound("dashboard page".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
