//! Page shell shared by every rendered screen.

use axum::http::StatusCode;
use axum::response::Html;
use shared::escape;

use crate::session::{Flash, FlashKind};

const STYLESHEET: &str = r#"
body { font-family: 'Apple SD Gothic Neo', 'Malgun Gothic', sans-serif; margin: 0; background: #f5f6f8; color: #222; }
main { max-width: 720px; margin: 0 auto; padding: 24px 16px 64px; }
h1 { font-size: 1.5rem; }
.card { background: #fff; border-radius: 12px; padding: 16px 20px; margin-bottom: 16px; box-shadow: 0 1px 3px rgba(0,0,0,.08); }
.alert { border-radius: 8px; padding: 12px 16px; margin-bottom: 16px; }
.alert-success { background: #e8f6ee; color: #17693c; }
.alert-error { background: #fdeceb; color: #a4231a; }
.update-header, .comment-header { display: flex; justify-content: space-between; align-items: baseline; gap: 8px; }
.update-name { font-weight: 700; }
.update-date, .comment-date { color: #777; font-size: .85rem; }
.update-item-label { font-weight: 600; color: #555; margin-top: 8px; }
.update-images img { max-width: 160px; max-height: 160px; margin: 4px 8px 4px 0; border-radius: 8px; }
.comment-item { border-top: 1px solid #eee; padding: 8px 0; }
.no-comments, .empty-state { color: #888; }
form.inline { display: inline; }
label { display: block; margin-top: 8px; font-size: .9rem; color: #444; }
input, textarea, select { width: 100%; box-sizing: border-box; padding: 6px 8px; margin-top: 2px; border: 1px solid #ccc; border-radius: 6px; font: inherit; }
input[type=checkbox] { width: auto; }
button, a.button { display: inline-block; margin-top: 8px; padding: 6px 14px; border: 0; border-radius: 6px; background: #4263eb; color: #fff; font: inherit; cursor: pointer; text-decoration: none; }
button.subtle, a.button.subtle { background: #e9ecef; color: #333; }
.modal-overlay { position: fixed; inset: 0; background: rgba(0,0,0,.4); display: flex; align-items: center; justify-content: center; }
.modal { background: #fff; border-radius: 12px; padding: 20px 24px; width: 320px; }
.gate-retry { color: #a4231a; }
"#;

/// Wraps a body fragment in the document shell, with the one-shot flash
/// banner (if any) at the top.
pub fn page(title: &str, body: &str, flash: Option<&Flash>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLESHEET}</style>
</head>
<body>
<main>
{flash}{body}
</main>
</body>
</html>"#,
        title = escape::html(title),
        flash = flash.map(flash_banner).unwrap_or_default(),
        body = body,
    )
}

fn flash_banner(flash: &Flash) -> String {
    let class = match flash.kind {
        FlashKind::Success => "alert alert-success",
        FlashKind::Error => "alert alert-error",
    };
    format!(
        r#"<div class="{class}" role="alert">{message}</div>"#,
        message = escape::html(&flash.message),
    )
}

/// Inline error banner for a failed action rendered in place (keeps the
/// user's in-progress form values around it).
pub fn error_banner(message: &str) -> String {
    format!(
        r#"<div class="alert alert-error" role="alert">{}</div>"#,
        escape::html(message)
    )
}

/// Standalone error page for aborted requests.
pub fn error_response(status: StatusCode, message: &str) -> Html<String> {
    let body = format!(
        r#"<div class="card"><h1>오류</h1><p>{}</p><a class="button" href="/groups">모임 목록으로</a></div>"#,
        escape::html(message)
    );
    Html(page(&format!("오류 {}", status.as_u16()), &body, None))
}
