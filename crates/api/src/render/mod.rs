//! HTML fragment assembly.
//!
//! The renderers are pure: records + view state in, markup out. There is no
//! template engine; fragments are assembled as strings, and every
//! interpolated user value passes through [`shared::escape::html`].

pub mod board;
pub mod gate;
pub mod groups;
pub mod layout;

use domain::models::member::Member;
use shared::escape;

/// `<option>` list for a commenter/author dropdown, seeded from the latest
/// fetched membership. A selected value that is no longer (or never was) a
/// member, such as the automated commenter, is appended so the current value
/// always renders selected.
pub(crate) fn member_options(members: &[Member], selected: Option<&str>) -> String {
    let mut html = String::from(r#"<option value="">이름 선택</option>"#);
    let mut matched = false;
    for member in members {
        let is_selected = selected == Some(member.name.as_str());
        matched |= is_selected;
        html.push_str(&format!(
            r#"<option value="{name}"{sel}>{name}</option>"#,
            name = escape::html(&member.name),
            sel = if is_selected { " selected" } else { "" },
        ));
    }
    if let Some(value) = selected {
        if !matched && !value.is_empty() {
            html.push_str(&format!(
                r#"<option value="{name}" selected>{name}</option>"#,
                name = escape::html(value),
            ));
        }
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn member(name: &str) -> Member {
        Member {
            id: Uuid::new_v4(),
            group_id: Uuid::new_v4(),
            name: name.to_string(),
            email: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_member_options_marks_selection() {
        let members = vec![member("김구"), member("조원일")];
        let html = member_options(&members, Some("조원일"));
        assert!(html.contains(r#"<option value="조원일" selected>"#));
        assert!(html.contains(r#"<option value="김구">"#));
        assert!(html.starts_with(r#"<option value="">이름 선택</option>"#));
    }

    #[test]
    fn test_member_options_appends_unknown_selection() {
        let members = vec![member("김구")];
        let html = member_options(&members, Some("AI"));
        assert!(html.contains(r#"<option value="AI" selected>AI</option>"#));
    }

    #[test]
    fn test_member_options_escapes_names() {
        let members = vec![member("<b>")];
        let html = member_options(&members, None);
        assert!(html.contains("&lt;b&gt;"));
        assert!(!html.contains("<b>"));
    }
}
