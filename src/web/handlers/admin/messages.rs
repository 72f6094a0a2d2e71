//! Contact message inbox.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;

use super::{AdminNav, SelectOption, apply_edit, non_empty};
use crate::domain::entities::AdminSession;
use crate::domain::workspace::{
    Message, MessagePriority, MessageSource, MessageStatus, Notice,
};
use crate::state::AppState;

const MESSAGES_PATH: &str = "/admin/messages";

#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    pub search: Option<String>,
    pub status: Option<String>,
}

/// A message with display labels.
#[derive(Debug, Clone)]
pub struct MessageRow {
    pub message: Message,
    pub subject: String,
    pub status: &'static str,
    pub priority: &'static str,
    pub source: &'static str,
    pub unread: bool,
}

impl From<&Message> for MessageRow {
    fn from(message: &Message) -> Self {
        Self {
            subject: message
                .subject
                .clone()
                .unwrap_or_else(|| "(no subject)".to_string()),
            status: message.status.as_str(),
            priority: match message.priority {
                MessagePriority::Low => "low",
                MessagePriority::Medium => "medium",
                MessagePriority::High => "high",
            },
            source: match message.source {
                MessageSource::ContactForm => "Contact form",
                MessageSource::Email => "Email",
                MessageSource::Linkedin => "LinkedIn",
            },
            unread: message.status == MessageStatus::Unread,
            message: message.clone(),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/messages.html")]
pub struct MessagesTemplate {
    pub nav: AdminNav,
    pub search: String,
    pub statuses: Vec<SelectOption>,
    pub rows: Vec<MessageRow>,
    pub total: usize,
}

/// # Endpoint
///
/// `GET /admin/messages?search=&status=`
pub async fn messages_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Query(query): Query<MessagesQuery>,
) -> impl IntoResponse {
    let search = query.search.unwrap_or_default();
    let status = non_empty(query.status).and_then(|s| s.parse::<MessageStatus>().ok());
    let current = status.as_ref().map(MessageStatus::as_str).or(Some(""));

    state.workspaces.with(&session.token_hash, |ws| {
        let rows = ws
            .messages
            .filtered(&search, status)
            .into_iter()
            .map(MessageRow::from)
            .collect();
        let total = ws.messages.all().len();

        let mut statuses = vec![SelectOption::new("", "All messages", current)];
        statuses.extend(
            MessageStatus::ALL
                .iter()
                .map(|s| SelectOption::new(s.as_str(), s.as_str(), current)),
        );

        MessagesTemplate {
            nav: AdminNav::new(ws, &session, "messages"),
            search: search.clone(),
            statuses,
            rows,
            total,
        }
    })
}

#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

/// `POST /admin/messages/{id}/status`
pub async fn set_message_status_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Redirect {
    apply_edit(
        &state,
        &session,
        |status: &MessageStatus| {
            Notice::success("Updated", format!("Message marked {}", status.as_str()))
        },
        |ws| {
            let status: MessageStatus = form.status.parse()?;
            ws.messages.set_status(&id, status)?;
            Ok(status)
        },
    );
    Redirect::to(MESSAGES_PATH)
}

#[derive(Debug, Deserialize)]
pub struct ReplyForm {
    pub body: String,
}

/// Records a reply. No mail leaves the server.
///
/// `POST /admin/messages/{id}/reply`
pub async fn reply_message_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
    Form(form): Form<ReplyForm>,
) -> Redirect {
    apply_edit(
        &state,
        &session,
        |_| Notice::success("Replied", "Reply recorded"),
        |ws| ws.messages.reply(&id, &form.body),
    );
    Redirect::to(MESSAGES_PATH)
}

/// `POST /admin/messages/{id}/delete`
pub async fn delete_message_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
) -> Redirect {
    apply_edit(
        &state,
        &session,
        |message: &Message| Notice::success("Deleted", format!("Message from {} removed", message.name)),
        |ws| ws.messages.delete(&id),
    );
    Redirect::to(MESSAGES_PATH)
}
