//! Board screen: update cards, comments, members, creation forms.
//!
//! The whole list re-renders from the latest fetched records after every
//! mutation, so what is on screen always matches the last successful server
//! read. Only the item addressed by the current request is ever in edit
//! mode; a failed save re-renders that one item with the submitted draft so
//! in-progress values survive.

use chrono::{DateTime, Utc};
use domain::models::comment::{Comment, CommentDraft};
use domain::models::group::Group;
use domain::models::member::{Member, MemberDraft};
use domain::models::update::{Update, UpdateDraft, UpdateWithComments};
use domain::view::{ListViewState, ViewMode};
use shared::{escape, timefmt};
use uuid::Uuid;

use crate::render::{layout, member_options};
use crate::session::Flash;

/// The one in-progress form on the page, if any: either a form being
/// (re-)rendered after a failed submit, or nothing.
#[derive(Clone, Copy)]
pub enum BoardDraft<'a> {
    None,
    NewUpdate(&'a UpdateDraft),
    EditUpdate {
        id: Uuid,
        draft: &'a UpdateDraft,
        kept_images: &'a [String],
    },
    NewComment {
        update_id: Uuid,
        draft: &'a CommentDraft,
    },
    EditComment {
        id: Uuid,
        draft: &'a CommentDraft,
    },
    NewMember(&'a MemberDraft),
    EditEmail {
        id: Uuid,
        email: &'a str,
    },
}

/// Everything the board screen renders from.
pub struct BoardPage<'a> {
    pub group: &'a Group,
    pub members: &'a [Member],
    pub updates: &'a [UpdateWithComments],
    pub editing_update: Option<Uuid>,
    pub editing_comment: Option<Uuid>,
    pub editing_member: Option<Uuid>,
    pub draft: BoardDraft<'a>,
    pub error: Option<&'a str>,
    pub flash: Option<&'a Flash>,
    pub now: DateTime<Utc>,
}

pub fn render(page: &BoardPage) -> String {
    // Edit mode comes from the page URL, or from the item whose save just
    // failed; everything else renders in display mode.
    let mut update_view = ListViewState::with_editing(page.editing_update);
    let mut comment_view = ListViewState::with_editing(page.editing_comment);
    let mut member_view = ListViewState::with_editing(page.editing_member);
    match page.draft {
        BoardDraft::EditUpdate { id, .. } => update_view.enter_edit(id),
        BoardDraft::EditComment { id, .. } => comment_view.enter_edit(id),
        BoardDraft::EditEmail { id, .. } => member_view.enter_edit(id),
        _ => {}
    }

    let mut body = String::new();
    if let Some(error) = page.error {
        body.push_str(&layout::error_banner(error));
    }
    body.push_str(&header(page.group));
    body.push_str(&members_section(page, &member_view));
    body.push_str(&new_update_form(page));
    body.push_str("<h2>근황 목록</h2>");
    if page.updates.is_empty() {
        body.push_str(r#"<p class="empty-state">아직 공유된 근황이 없습니다. 첫 번째 근황을 작성해보세요!</p>"#);
    }
    for item in page.updates {
        body.push_str(&update_card(page, item, &update_view, &comment_view));
    }

    layout::page(&page.group.name, &body, page.flash)
}

fn header(group: &Group) -> String {
    format!(
        r#"<div class="update-header">
<h1>{name}</h1>
<form class="inline" method="post" action="/board/leave"><button type="submit" class="subtle">모임 변경</button></form>
</div>"#,
        name = escape::html(&group.name),
    )
}

fn members_section(page: &BoardPage, member_view: &ListViewState) -> String {
    let mut html = String::from(r#"<div class="card"><h2>멤버</h2>"#);
    for member in page.members {
        html.push_str(&member_row(page, member, member_view));
    }

    let draft = match page.draft {
        BoardDraft::NewMember(draft) => draft.clone(),
        _ => MemberDraft::default(),
    };
    html.push_str(&format!(
        r#"<form method="post" action="/board/members">
<label>이름<input type="text" name="name" value="{name}" required></label>
<label>이메일 (선택)<input type="text" name="email" value="{email}"></label>
<button type="submit">멤버 추가</button>
</form></div>"#,
        name = escape::html(&draft.name),
        email = escape::html(&draft.email),
    ));
    html
}

fn member_row(page: &BoardPage, member: &Member, member_view: &ListViewState) -> String {
    let email_part = match member_view.mode(member.id) {
        ViewMode::Edit => {
            let value = match page.draft {
                BoardDraft::EditEmail { id, email } if id == member.id => email.to_string(),
                _ => member.email.clone().unwrap_or_default(),
            };
            format!(
                r#"<form class="inline" method="post" action="/board/members/{id}/email">
<input type="text" name="email" value="{value}">
<button type="submit">저장</button>
<a class="button subtle" href="/board">취소</a>
</form>"#,
                id = member.id,
                value = escape::html(&value),
            )
        }
        ViewMode::Display => {
            let email = member
                .email
                .as_deref()
                .map(escape::html)
                .unwrap_or_else(|| "이메일 없음".to_string());
            format!(
                r#"<span class="member-email">{email}</span> <a href="/board?edit_member={id}" title="수정">✏️</a>"#,
                email = email,
                id = member.id,
            )
        }
    };
    format!(
        r#"<div class="member-row">
<strong>{name}</strong> {email_part}
<form class="inline" method="post" action="/board/members/{id}/delete" onsubmit="return confirm('이 멤버를 삭제하시겠습니까?')"><button type="submit" class="subtle" title="삭제">🗑️</button></form>
</div>"#,
        name = escape::html(&member.name),
        email_part = email_part,
        id = member.id,
    )
}

fn new_update_form(page: &BoardPage) -> String {
    let draft = match page.draft {
        BoardDraft::NewUpdate(draft) => draft.clone(),
        _ => UpdateDraft {
            date: page.now.date_naive().to_string(),
            ..UpdateDraft::default()
        },
    };
    format!(
        r#"<div class="card"><h2>근황 공유하기</h2>
<form method="post" action="/board/updates" enctype="multipart/form-data">
<label>이름 *<select name="name" required>{names}</select></label>
<label>날짜 *<input type="date" name="date" value="{date}" required></label>
{fields}
<label>사진<input type="file" name="images" accept="image/*" multiple></label>
<button type="submit">공유하기</button>
</form></div>"#,
        names = member_options(page.members, some_nonempty(&draft.name)),
        date = escape::html(&draft.date),
        fields = text_fields(&draft),
    )
}

fn some_nonempty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn text_fields(draft: &UpdateDraft) -> String {
    let fields = [
        ("work_life", "회사생활", &draft.work_life),
        ("hobby_life", "취미생활", &draft.hobby_life),
        ("health_care", "건강관리", &draft.health_care),
        ("family_news", "가족들 소식", &draft.family_news),
        ("recent_interests", "최근 관심사", &draft.recent_interests),
    ];
    fields
        .iter()
        .map(|(name, label, value)| {
            format!(
                r#"<label>{label}<textarea name="{name}" rows="3">{value}</textarea></label>"#,
                label = label,
                name = name,
                value = escape::html(value),
            )
        })
        .collect()
}

fn update_card(
    page: &BoardPage,
    item: &UpdateWithComments,
    update_view: &ListViewState,
    comment_view: &ListViewState,
) -> String {
    let update = &item.update;
    let inner = match update_view.mode(update.id) {
        ViewMode::Edit => update_edit_form(page, update),
        ViewMode::Display => update_display(update),
    };
    format!(
        r#"<div class="card update-card">
<div class="update-header">
<div class="update-name">{name}</div>
<div>
<span class="update-date">{date}</span>
<a href="/board?edit={id}" title="수정">✏️</a>
<form class="inline" method="post" action="/board/updates/{id}/delete" onsubmit="return confirm('이 근황을 삭제하시겠습니까?')"><button type="submit" class="subtle" title="삭제">🗑️</button></form>
</div>
</div>
{inner}
{comments}
</div>"#,
        name = escape::html(&update.name),
        date = timefmt::korean_date(update.date),
        id = update.id,
        inner = inner,
        comments = comments_section(page, item, comment_view),
    )
}

fn update_display(update: &Update) -> String {
    let fields = update.labeled_fields();
    let content = if fields.is_empty() {
        r#"<div class="update-item"><div class="update-item-value">작성된 내용이 없습니다.</div></div>"#.to_string()
    } else {
        fields
            .iter()
            .map(|(label, value)| {
                format!(
                    r#"<div class="update-item"><div class="update-item-label">{label}</div><div class="update-item-value">{value}</div></div>"#,
                    label = label,
                    value = escape::html(value),
                )
            })
            .collect()
    };
    let images = update.images();
    let images_html = if images.is_empty() {
        String::new()
    } else {
        let tags: String = images
            .iter()
            .map(|url| format!(r#"<img src="{}" alt="근황 사진">"#, escape::html(url)))
            .collect();
        format!(r#"<div class="update-images">{tags}</div>"#)
    };
    format!(r#"<div class="update-content-display">{content}{images_html}</div>"#)
}

fn update_edit_form(page: &BoardPage, update: &Update) -> String {
    // A failed save re-renders the submitted draft; a fresh edit seeds the
    // form from the record's current values.
    let (draft, kept_images) = match page.draft {
        BoardDraft::EditUpdate {
            id,
            draft,
            kept_images,
        } if id == update.id => (draft.clone(), kept_images.to_vec()),
        _ => (UpdateDraft::from_update(update), update.images()),
    };
    let existing = if kept_images.is_empty() {
        String::new()
    } else {
        let rows: String = kept_images
            .iter()
            .map(|url| {
                format!(
                    r#"<div class="existing-image"><img src="{url}" alt="첨부 사진"><label><input type="checkbox" name="remove_image" value="{url}"> 삭제</label></div>"#,
                    url = escape::html(url),
                )
            })
            .collect();
        format!(r#"<div class="update-images">{rows}</div>"#)
    };
    format!(
        r#"<div class="update-edit-form">
<form method="post" action="/board/updates/{id}" enctype="multipart/form-data">
<label>이름 *<select name="name" required>{names}</select></label>
<label>날짜 *<input type="date" name="date" value="{date}" required></label>
{fields}
{existing}
<label>사진 추가<input type="file" name="images" accept="image/*" multiple></label>
<button type="submit">저장</button>
<a class="button subtle" href="/board">취소</a>
</form>
</div>"#,
        id = update.id,
        names = member_options(page.members, some_nonempty(&draft.name)),
        date = escape::html(&draft.date),
        fields = text_fields(&draft),
        existing = existing,
    )
}

fn comments_section(
    page: &BoardPage,
    item: &UpdateWithComments,
    comment_view: &ListViewState,
) -> String {
    let update = &item.update;
    let list: String = if item.comments.is_empty() {
        r#"<p class="no-comments">아직 댓글이 없습니다.</p>"#.to_string()
    } else {
        item.comments
            .iter()
            .map(|comment| comment_row(page, comment, comment_view))
            .collect()
    };

    let draft = match page.draft {
        BoardDraft::NewComment { update_id, draft } if update_id == update.id => draft.clone(),
        _ => CommentDraft::default(),
    };
    format!(
        r#"<div class="comments-section">
<h3>댓글 ({count})</h3>
{list}
<form method="post" action="/board/updates/{id}/comments">
<select name="commenter_name" required>{names}</select>
<textarea name="content" rows="2" placeholder="댓글을 입력하세요..." required>{content}</textarea>
<button type="submit">댓글 작성</button>
</form>
</div>"#,
        count = item.comments.len(),
        list = list,
        id = update.id,
        names = member_options(page.members, some_nonempty(&draft.commenter_name)),
        content = escape::html(&draft.content),
    )
}

fn comment_row(page: &BoardPage, comment: &Comment, comment_view: &ListViewState) -> String {
    let inner = match comment_view.mode(comment.id) {
        ViewMode::Edit => {
            let draft = match page.draft {
                BoardDraft::EditComment { id, draft } if id == comment.id => draft.clone(),
                _ => CommentDraft::from_comment(comment),
            };
            format!(
                r#"<form method="post" action="/board/comments/{id}">
<select name="commenter_name" required>{names}</select>
<textarea name="content" rows="2" required>{content}</textarea>
<button type="submit">저장</button>
<a class="button subtle" href="/board">취소</a>
</form>"#,
                id = comment.id,
                names = member_options(page.members, some_nonempty(&draft.commenter_name)),
                content = escape::html(&draft.content),
            )
        }
        ViewMode::Display => {
            format!(
                r#"<div class="comment-content-display">{}</div>"#,
                escape::html(&comment.content)
            )
        }
    };
    format!(
        r#"<div class="comment-item">
<div class="comment-header">
<span class="comment-author">{author}</span>
<span>
<span class="comment-date">{when}</span>
<a href="/board?edit_comment={id}" title="수정">✏️</a>
<form class="inline" method="post" action="/board/comments/{id}/delete" onsubmit="return confirm('이 댓글을 삭제하시겠습니까?')"><button type="submit" class="subtle" title="삭제">🗑️</button></form>
</span>
</div>
{inner}
</div>"#,
        author = escape::html(&comment.commenter_name),
        when = timefmt::relative(comment.created_at, page.now),
        id = comment.id,
        inner = inner,
    )
}
