//! HTTP response assembly
//!
//! Turns a `PageResult` plus the request's session into a response, writing
//! the session cookie only when the session changed.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};

use crate::error::PortalError;
use crate::routes::outcome::{PageResult, PageStatus};
use crate::routes::templates::render_page;
use crate::session::{Session, SessionCodec};

pub fn build_response(
    codec: &SessionCodec,
    mut session: Session,
    result: PageResult,
) -> Result<Response, PortalError> {
    let mut response = match result.status {
        PageStatus::Render(page) => {
            let flashes = session.take_flashes();
            Html(render_page(&page, &flashes)).into_response()
        }
        PageStatus::Redirect(location) => {
            (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
        }
    };

    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    if session.is_modified() {
        let cookie = codec.set_cookie(&session)?;
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SecretKey, SessionConfig};
    use crate::routes::outcome::{LOGIN_PATH, Page};
    use crate::session::FlashLevel;

    fn codec() -> SessionCodec {
        SessionCodec::new(
            &SecretKey::new("0123456789abcdef0123456789abcdef"),
            &SessionConfig::default(),
        )
    }

    #[test]
    fn test_redirect_is_302_without_cookie() {
        let response =
            build_response(&codec(), Session::default(), PageResult::redirect(LOGIN_PATH)).unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], LOGIN_PATH);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[test]
    fn test_render_consumes_flashes() {
        let mut session = Session::default();
        session.flash(FlashLevel::Warning, "Please log in first");
        let response =
            build_response(&codec(), session, PageResult::render(Page::Login)).unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.contains("Max-Age=0"));
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    }
}
