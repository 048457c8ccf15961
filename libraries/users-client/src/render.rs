//! Markup produced from a [`ViewState`] snapshot.
//!
//! Every string that originated from a user (names, emails, server
//! messages) goes through [`escape_html`] before it is embedded.

use crate::view::{Banner, Field, ViewState};
use users_core::User;

/// Escape `& < > " '` for safe embedding in element text and attributes
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// User list, or the empty-state placeholder
pub fn render_users(state: &ViewState) -> String {
    if state.loading && state.users.is_empty() {
        return r#"<div class="loading">Loading users...</div>"#.to_string();
    }

    if state.users.is_empty() {
        return r#"<div class="empty-state">No users registered yet</div>"#.to_string();
    }

    let cards: String = state.users.iter().map(render_user_card).collect();
    format!(
        r#"<div class="users-count">{}</div><div class="users-list">{}</div>"#,
        state.total, cards
    )
}

/// One card with edit and delete buttons
pub fn render_user_card(user: &User) -> String {
    let name = escape_html(&user.name);
    let email = escape_html(&user.email);
    format!(
        concat!(
            r#"<div class="user-card" data-user-id="{id}">"#,
            r#"<div class="user-header"><div class="user-name">{name}</div><div class="user-id">ID: {id}</div></div>"#,
            r#"<div class="user-email">{email}</div>"#,
            r#"<div class="user-actions">"#,
            r#"<button class="btn btn-warning" data-action="edit" data-id="{id}">Edit</button>"#,
            r#"<button class="btn btn-danger" data-action="delete" data-id="{id}" data-name="{name}">Delete</button>"#,
            r#"</div></div>"#,
        ),
        id = user.id,
        name = name,
        email = email,
    )
}

/// API and database indicators
pub fn render_status(state: &ViewState) -> String {
    fn indicator(label: &str, online: bool) -> String {
        let (class, text) = if online {
            ("connected", "Connected")
        } else {
            ("error", "Error")
        };
        format!(
            r#"<div class="status-item"><span class="status-dot {}"></span><span class="status-text">{}: {}</span></div>"#,
            class, label, text
        )
    }

    format!(
        "{}{}",
        indicator("API", state.api_online),
        indicator("Database", state.database_online)
    )
}

/// Banner markup; empty when there is nothing to show
pub fn render_banner(banner: Option<&Banner>) -> String {
    let Some(banner) = banner else {
        return String::new();
    };

    let details = if banner.details.is_empty() {
        String::new()
    } else {
        let items: String = banner
            .details
            .iter()
            .map(|d| format!("<li>{}</li>", escape_html(d)))
            .collect();
        format!("<ul>{}</ul>", items)
    };

    format!(
        r#"<div class="message {}">{}{}</div>"#,
        banner.kind.as_str(),
        escape_html(&banner.message),
        details
    )
}

/// Confirmation dialog for the pending delete; empty when none is pending
pub fn render_confirm(state: &ViewState) -> String {
    let Some(pending) = &state.pending_delete else {
        return String::new();
    };

    format!(
        concat!(
            r#"<div class="modal" data-pending-id="{id}"><div class="modal-content">"#,
            r#"<p>Are you sure you want to delete the user "{name}"? This action cannot be undone.</p>"#,
            r#"<button class="btn btn-secondary" data-action="cancel-delete">Cancel</button>"#,
            r#"<button class="btn btn-danger" data-action="confirm-delete">Delete</button>"#,
            r#"</div></div>"#,
        ),
        id = pending.id,
        name = escape_html(&pending.name),
    )
}

/// One labelled input with its error slot
fn render_field(state: &ViewState, field: Field) -> String {
    let (value, input_type) = match field {
        Field::Name => (&state.form.name, "text"),
        Field::Email => (&state.form.email, "email"),
    };
    let error = state.field_errors.get(&field);

    format!(
        concat!(
            r#"<input id="{id}" name="{id}" type="{input_type}" class="{class}" value="{value}">"#,
            r#"<div class="field-error" id="{id}Error">{error}</div>"#,
        ),
        id = field.as_str(),
        input_type = input_type,
        class = if error.is_some() { "error" } else { "" },
        value = escape_html(value),
        error = error.map(|msg| escape_html(msg)).unwrap_or_default(),
    )
}

/// Create/edit form with current values and field errors
pub fn render_form(state: &ViewState) -> String {
    let (submit, cancel) = if state.is_editing() {
        (
            "Update User",
            r#"<button type="button" class="btn btn-secondary" data-action="cancel-edit">Cancel</button>"#,
        )
    } else {
        ("Create User", "")
    };

    format!(
        r#"<form id="userForm">{}{}<button type="submit" class="btn btn-primary">{}</button>{}</form>"#,
        render_field(state, Field::Name),
        render_field(state, Field::Email),
        submit,
        cancel,
    )
}
