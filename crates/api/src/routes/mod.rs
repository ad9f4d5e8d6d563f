//! Route handlers and shared response helpers.

pub mod board;
pub mod comments;
pub mod groups;
pub mod health;
pub mod members;
pub mod updates;

use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::session::{self, Flash, SelectedGroup};

/// Renders a page; if the request carried a flash, it has now been shown,
/// so the cookie is cleared with the response.
pub(crate) fn page_response(markup: String, consumed_flash: bool) -> Response {
    let mut response = Html(markup).into_response();
    if consumed_flash {
        append_cookie(&mut response, session::clear_flash_cookie());
    }
    response
}

pub(crate) fn redirect(path: &str) -> Response {
    Redirect::to(path).into_response()
}

pub(crate) fn redirect_with_flash(path: &str, flash: Flash) -> Response {
    with_cookies(redirect(path), vec![session::flash_cookie(&flash)])
}

pub(crate) fn with_cookies(mut response: Response, cookies: Vec<String>) -> Response {
    for cookie in cookies {
        append_cookie(&mut response, cookie);
    }
    response
}

fn append_cookie(response: &mut Response, cookie: String) {
    // Cookie values are base64/ASCII by construction.
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
}

/// Board actions require an entered group; without one the visitor is sent
/// back to the group list.
pub(crate) fn require_group(headers: &HeaderMap) -> Result<SelectedGroup, Response> {
    session::selected_group(headers).ok_or_else(|| redirect("/groups"))
}
