//! Entry gate screen for groups with a designated leader.

use domain::models::group::Group;
use shared::escape;

use crate::render::layout;
use crate::session::Flash;

/// The leader-name prompt.
///
/// On a mismatch the prompt re-renders with the input cleared and focused,
/// ready for another try; retries are unlimited. Canceling links back to
/// the group list, so every state of the prompt has a closed exit.
pub fn entry_page(group: &Group, retry: bool, flash: Option<&Flash>) -> String {
    let retry_notice = if retry {
        r#"<p class="gate-retry">리더 이름이 일치하지 않습니다. 다시 입력해주세요.</p>"#
    } else {
        ""
    };
    let body = format!(
        r#"<div class="card">
<h1>{name} 입장</h1>
<p>이 모임은 리더가 지정되어 있습니다. 입장하려면 리더 이름을 입력해주세요.</p>
{retry_notice}
<form method="post" action="/groups/{id}/enter">
<label>리더 이름<input type="text" name="leader_name" autofocus required></label>
<button type="submit">입장</button>
<a class="button subtle" href="/groups">취소</a>
</form>
</div>"#,
        name = escape::html(&group.name),
        id = group.id,
    );
    layout::page(&format!("{} 입장", group.name), &body, flash)
}
