//! Group list screen: cards, creation form, info editor, unlock prompt.

use chrono::NaiveDate;
use domain::models::group::{Group, GroupInfoDraft};
use domain::models::member::Member;
use domain::view::{ListViewState, ViewMode};
use shared::{escape, timefmt};
use uuid::Uuid;

use crate::render::layout;
use crate::session::Flash;

/// The staff-id prompt overlay for one group's info editor.
#[derive(Debug, Clone, Copy)]
pub struct UnlockModal {
    pub group_id: Uuid,
    pub retry: bool,
}

/// Everything the groups screen renders from.
pub struct GroupsPage<'a> {
    pub groups: &'a [Group],
    /// Card currently unlocked into edit mode, if any.
    pub editing: Option<Uuid>,
    /// Membership of the editing group, seeding the leader dropdown.
    pub members_of_editing: &'a [Member],
    /// In-progress info values after a failed save.
    pub info_draft: Option<&'a GroupInfoDraft>,
    /// In-progress name after a failed creation.
    pub create_draft: Option<&'a str>,
    pub unlock_modal: Option<UnlockModal>,
    pub error: Option<&'a str>,
    pub flash: Option<&'a Flash>,
}

pub fn render(page: &GroupsPage) -> String {
    let view = ListViewState::with_editing(page.editing);

    let mut body = String::new();
    if let Some(error) = page.error {
        body.push_str(&layout::error_banner(error));
    }
    body.push_str("<h1>모임 목록</h1>");
    body.push_str(&create_form(page.create_draft));

    if page.groups.is_empty() {
        body.push_str(r#"<p class="empty-state">아직 만들어진 모임이 없습니다. 첫 번째 모임을 만들어보세요!</p>"#);
    }
    for group in page.groups {
        match view.mode(group.id) {
            ViewMode::Edit => {
                let draft = match page.info_draft {
                    Some(draft) => draft.clone(),
                    None => GroupInfoDraft::from_group(group),
                };
                body.push_str(&edit_card(group, &draft, page.members_of_editing));
            }
            ViewMode::Display => body.push_str(&display_card(group)),
        }
    }

    if let Some(modal) = page.unlock_modal {
        body.push_str(&unlock_modal(modal));
    }

    layout::page("모임 목록", &body, page.flash)
}

fn create_form(draft: Option<&str>) -> String {
    format!(
        r#"<div class="card">
<form method="post" action="/groups">
<label>새 모임 이름<input type="text" name="name" value="{name}" required></label>
<button type="submit">모임 만들기</button>
</form>
</div>"#,
        name = escape::html(draft.unwrap_or("")),
    )
}

fn display_card(group: &Group) -> String {
    let leader = match &group.leader_name {
        Some(leader) if !leader.is_empty() => format!("리더: {}", escape::html(leader)),
        _ => "리더 없음".to_string(),
    };
    format!(
        r#"<div class="card group-card">
<div class="update-header"><div class="update-name">{name}</div><div>{leader}</div></div>
<p>{current}</p>
<p>{next}</p>
<a class="button" href="/groups/{id}/enter">입장하기</a>
<a class="button subtle" href="/groups?unlock={id}">정보 수정</a>
</div>"#,
        name = escape::html(&group.name),
        leader = leader,
        current = meeting_line(
            "이번 모임",
            group.meeting_date,
            group.meeting_time.as_deref(),
            group.meeting_place.as_deref(),
        ),
        next = meeting_line(
            "다음 모임",
            group.next_meeting_date,
            group.next_meeting_time.as_deref(),
            group.next_meeting_place.as_deref(),
        ),
        id = group.id,
    )
}

fn meeting_line(
    label: &str,
    date: Option<NaiveDate>,
    time: Option<&str>,
    place: Option<&str>,
) -> String {
    let mut parts = Vec::new();
    if let Some(date) = date {
        parts.push(timefmt::korean_date(date));
    }
    if let Some(time) = time {
        parts.push(escape::html(time));
    }
    if let Some(place) = place {
        parts.push(escape::html(place));
    }
    if parts.is_empty() {
        format!("{label}: 미정")
    } else {
        format!("{label}: {}", parts.join(" "))
    }
}

fn edit_card(group: &Group, draft: &GroupInfoDraft, members: &[Member]) -> String {
    format!(
        r#"<div class="card group-card">
<div class="update-name">{name}</div>
<form method="post" action="/groups/{id}/info">
<label>리더<select name="leader_name">{leaders}</select></label>
<label>이번 모임 날짜<input type="date" name="meeting_date" value="{md}"></label>
<label>이번 모임 시간<input type="time" name="meeting_time" value="{mt}"></label>
<label>이번 모임 장소<input type="text" name="meeting_place" value="{mp}"></label>
<label>다음 모임 날짜<input type="date" name="next_meeting_date" value="{nd}"></label>
<label>다음 모임 시간<input type="time" name="next_meeting_time" value="{nt}"></label>
<label>다음 모임 장소<input type="text" name="next_meeting_place" value="{np}"></label>
<button type="submit">저장</button>
<a class="button subtle" href="/groups">취소</a>
</form>
</div>"#,
        name = escape::html(&group.name),
        id = group.id,
        leaders = leader_options(members, &draft.leader_name),
        md = escape::html(&draft.meeting_date),
        mt = escape::html(&draft.meeting_time),
        mp = escape::html(&draft.meeting_place),
        nd = escape::html(&draft.next_meeting_date),
        nt = escape::html(&draft.next_meeting_time),
        np = escape::html(&draft.next_meeting_place),
    )
}

fn leader_options(members: &[Member], selected: &str) -> String {
    let mut html = String::from(r#"<option value="">리더 없음</option>"#);
    let mut matched = false;
    for member in members {
        let is_selected = member.name == selected;
        matched |= is_selected;
        html.push_str(&format!(
            r#"<option value="{name}"{sel}>{name}</option>"#,
            name = escape::html(&member.name),
            sel = if is_selected { " selected" } else { "" },
        ));
    }
    // A leader who has since left the member list still renders selected.
    if !matched && !selected.is_empty() {
        html.push_str(&format!(
            r#"<option value="{name}" selected>{name}</option>"#,
            name = escape::html(selected),
        ));
    }
    html
}

fn unlock_modal(modal: UnlockModal) -> String {
    let retry_notice = if modal.retry {
        r#"<p class="gate-retry">사번이 일치하지 않습니다. 다시 입력해주세요.</p>"#
    } else {
        ""
    };
    format!(
        r#"<div class="modal-overlay">
<div class="modal">
<h2>정보 수정</h2>
<p>모임 정보를 수정하려면 사번을 입력해주세요.</p>
{retry_notice}
<form method="post" action="/groups/{id}/unlock">
<label>사번<input type="password" name="staff_id" autofocus required></label>
<button type="submit">확인</button>
<a class="button subtle" href="/groups">취소</a>
</form>
</div>
</div>"#,
        id = modal.group_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn group(name: &str) -> Group {
        Group {
            id: Uuid::new_v4(),
            name: name.to_string(),
            leader_name: None,
            meeting_date: None,
            meeting_time: None,
            meeting_place: None,
            next_meeting_date: None,
            next_meeting_time: None,
            next_meeting_place: None,
            created_at: Utc::now(),
        }
    }

    fn member(name: &str) -> Member {
        Member {
            id: Uuid::new_v4(),
            group_id: Uuid::new_v4(),
            name: name.to_string(),
            email: None,
            created_at: Utc::now(),
        }
    }

    fn empty_page<'a>(groups: &'a [Group]) -> GroupsPage<'a> {
        GroupsPage {
            groups,
            editing: None,
            members_of_editing: &[],
            info_draft: None,
            create_draft: None,
            unlock_modal: None,
            error: None,
            flash: None,
        }
    }

    #[test]
    fn test_display_card_shows_meeting_info() {
        let mut g = group("등산 모임");
        g.leader_name = Some("김구".to_string());
        g.meeting_date = NaiveDate::from_ymd_opt(2026, 8, 15);
        g.meeting_place = Some("강남역".to_string());
        let groups = vec![g];
        let html = render(&empty_page(&groups));

        assert!(html.contains("등산 모임"));
        assert!(html.contains("리더: 김구"));
        assert!(html.contains("이번 모임: 2026년 8월 15일 강남역"));
        assert!(html.contains("다음 모임: 미정"));
    }

    #[test]
    fn test_empty_state() {
        let html = render(&empty_page(&[]));
        assert!(html.contains("아직 만들어진 모임이 없습니다"));
    }

    #[test]
    fn test_edit_card_seeds_current_values() {
        let mut g = group("모임");
        g.leader_name = Some("김구".to_string());
        g.meeting_time = Some("19:00".to_string());
        let id = g.id;
        let groups = vec![g];
        let members = vec![member("김구"), member("조원일")];

        let mut page = empty_page(&groups);
        page.editing = Some(id);
        page.members_of_editing = &members;
        let html = render(&page);

        assert!(html.contains(r#"<option value="김구" selected>"#));
        assert!(html.contains(r#"name="meeting_time" value="19:00""#));
        assert!(html.contains(&format!("/groups/{id}/info")));
        // The display affordances for that card are replaced by the form.
        assert!(!html.contains(&format!("/groups/{id}/enter")));
    }

    #[test]
    fn test_departed_leader_still_renders_selected() {
        let mut g = group("모임");
        g.leader_name = Some("탈퇴자".to_string());
        let id = g.id;
        let groups = vec![g];
        let members = vec![member("김구")];

        let mut page = empty_page(&groups);
        page.editing = Some(id);
        page.members_of_editing = &members;
        let html = render(&page);
        assert!(html.contains(r#"<option value="탈퇴자" selected>"#));
    }

    #[test]
    fn test_unlock_modal_retry_state() {
        let groups = vec![group("모임")];
        let id = groups[0].id;
        let mut page = empty_page(&groups);
        page.unlock_modal = Some(UnlockModal {
            group_id: id,
            retry: true,
        });
        let html = render(&page);
        assert!(html.contains("사번이 일치하지 않습니다"));
        assert!(html.contains(&format!("/groups/{id}/unlock")));
    }

    #[test]
    fn test_failed_create_keeps_name() {
        let mut page = empty_page(&[]);
        page.create_draft = Some("등산 모임");
        page.error = Some("이미 존재하는 모임 이름입니다.");
        let html = render(&page);
        assert!(html.contains(r#"value="등산 모임""#));
        assert!(html.contains("이미 존재하는 모임 이름입니다."));
    }
}
