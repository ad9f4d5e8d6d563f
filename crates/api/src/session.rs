//! Selection cookies and one-shot flash messages.
//!
//! Two persisted entries, the selected group's id and name, survive page
//! reloads so a returning visitor lands back on their board without
//! re-navigating. They are set when the entry gate passes and cleared by the
//! explicit "change group" action; the gates themselves still run on every
//! sensitive action. Cookie values are base64-encoded for header safety
//! (group names are usually Korean).

use axum::http::{header, HeaderMap};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use uuid::Uuid;

pub const GROUP_ID_COOKIE: &str = "mb_group_id";
pub const GROUP_NAME_COOKIE: &str = "mb_group_name";
pub const FLASH_COOKIE: &str = "mb_flash";

/// Selection cookies live for a year; a flash only has to survive one
/// redirect.
const SELECTION_MAX_AGE_SECS: u64 = 31_536_000;
const FLASH_MAX_AGE_SECS: u64 = 60;

/// The group the visitor has entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedGroup {
    pub id: Uuid,
    pub name: String,
}

/// One-shot banner carried across a redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

fn build_cookie(name: &str, value: &str, max_age_secs: u64) -> String {
    format!("{name}={value}; Path=/; Max-Age={max_age_secs}; HttpOnly; SameSite=Lax")
}

fn clear_cookie(name: &str) -> String {
    format!("{name}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

fn encode(value: &str) -> String {
    URL_SAFE_NO_PAD.encode(value.as_bytes())
}

fn decode(value: &str) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(value.as_bytes()).ok()?;
    String::from_utf8(bytes).ok()
}

/// Set-Cookie values marking a group as entered.
pub fn enter_cookies(group: &SelectedGroup) -> Vec<String> {
    vec![
        build_cookie(
            GROUP_ID_COOKIE,
            &group.id.to_string(),
            SELECTION_MAX_AGE_SECS,
        ),
        build_cookie(GROUP_NAME_COOKIE, &encode(&group.name), SELECTION_MAX_AGE_SECS),
    ]
}

/// Set-Cookie values clearing the selection (the "change group" action).
pub fn leave_cookies() -> Vec<String> {
    vec![clear_cookie(GROUP_ID_COOKIE), clear_cookie(GROUP_NAME_COOKIE)]
}

/// Set-Cookie value carrying a flash to the next render.
pub fn flash_cookie(flash: &Flash) -> String {
    let tag = match flash.kind {
        FlashKind::Success => "s",
        FlashKind::Error => "e",
    };
    build_cookie(
        FLASH_COOKIE,
        &encode(&format!("{tag}|{}", flash.message)),
        FLASH_MAX_AGE_SECS,
    )
}

pub fn clear_flash_cookie() -> String {
    clear_cookie(FLASH_COOKIE)
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    for header in headers.get_all(header::COOKIE) {
        let header = header.to_str().ok()?;
        for pair in header.split(';') {
            let mut parts = pair.trim().splitn(2, '=');
            if parts.next() == Some(name) {
                return parts.next().map(str::to_string);
            }
        }
    }
    None
}

/// Reads the selected group from the request, if any.
pub fn selected_group(headers: &HeaderMap) -> Option<SelectedGroup> {
    let id = cookie_value(headers, GROUP_ID_COOKIE)?.parse().ok()?;
    let name = decode(&cookie_value(headers, GROUP_NAME_COOKIE)?)?;
    Some(SelectedGroup { id, name })
}

/// Reads the pending flash from the request, if any.
pub fn take_flash(headers: &HeaderMap) -> Option<Flash> {
    let raw = decode(&cookie_value(headers, FLASH_COOKIE)?)?;
    let (tag, message) = raw.split_once('|')?;
    let kind = match tag {
        "s" => FlashKind::Success,
        "e" => FlashKind::Error,
        _ => return None,
    };
    Some(Flash {
        kind,
        message: message.to_string(),
    })
}
