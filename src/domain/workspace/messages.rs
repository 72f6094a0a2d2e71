//! Fabricated contact inbox.
//!
//! The public contact form does not store submissions, so the inbox is a
//! fixed sample that admins can triage within their session.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::EditError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Unread,
    Read,
    Replied,
    Archived,
}

impl MessageStatus {
    pub const ALL: [MessageStatus; 4] = [
        MessageStatus::Unread,
        MessageStatus::Read,
        MessageStatus::Replied,
        MessageStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::Unread => "unread",
            MessageStatus::Read => "read",
            MessageStatus::Replied => "replied",
            MessageStatus::Archived => "archived",
        }
    }
}

impl FromStr for MessageStatus {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| EditError::Invalid(format!("unknown message status '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessagePriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageSource {
    ContactForm,
    Email,
    Linkedin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    /// Relative, human-readable receipt time.
    pub received: String,
    pub status: MessageStatus,
    pub priority: MessagePriority,
    pub source: MessageSource,
    pub replies: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct MessageBoard {
    messages: Vec<Message>,
}

#[allow(clippy::too_many_arguments)]
fn message(
    id: &str,
    name: &str,
    email: &str,
    subject: Option<&str>,
    body: &str,
    received: &str,
    status: MessageStatus,
    priority: MessagePriority,
    source: MessageSource,
) -> Message {
    Message {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        subject: subject.map(str::to_string),
        message: body.to_string(),
        received: received.to_string(),
        status,
        priority,
        source,
        replies: Vec::new(),
    }
}

impl MessageBoard {
    pub fn seeded() -> Self {
        Self {
            messages: vec![
                message(
                    "1",
                    "Sarah Johnson",
                    "sarah.johnson@techcorp.example",
                    Some("Collaboration Opportunity"),
                    "Hi Alex, I came across your portfolio and I'm impressed with your work. We have an exciting opportunity at TechCorp that might interest you. Would you be available for a brief call this week?",
                    "2 hours ago",
                    MessageStatus::Unread,
                    MessagePriority::High,
                    MessageSource::ContactForm,
                ),
                message(
                    "2",
                    "Michael Chen",
                    "mchen@startup.example",
                    Some("Frontend Developer Position"),
                    "Hello Alex, we're looking for a talented frontend developer to join our team. Your React and TypeScript skills would be a perfect fit for our project.",
                    "5 hours ago",
                    MessageStatus::Read,
                    MessagePriority::Medium,
                    MessageSource::Linkedin,
                ),
                message(
                    "3",
                    "Emily Rodriguez",
                    "emily.r@designstudio.example",
                    Some("Project Inquiry"),
                    "Hi there! I love your portfolio design. We're working on a similar project and would like to discuss potential collaboration.",
                    "1 day ago",
                    MessageStatus::Replied,
                    MessagePriority::Medium,
                    MessageSource::ContactForm,
                ),
                message(
                    "4",
                    "David Kim",
                    "david@engineering.example",
                    None,
                    "Interested in your mechanical engineering background. Would you be open to consulting on a thermal management project?",
                    "2 days ago",
                    MessageStatus::Archived,
                    MessagePriority::Low,
                    MessageSource::Email,
                ),
            ],
        }
    }

    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    pub fn unread_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.status == MessageStatus::Unread)
            .count()
    }

    /// Matches `search` against name, email or body (case-insensitive).
    pub fn filtered(&self, search: &str, status: Option<MessageStatus>) -> Vec<&Message> {
        let needle = search.to_lowercase();
        self.messages
            .iter()
            .filter(|m| {
                m.name.to_lowercase().contains(&needle)
                    || m.email.to_lowercase().contains(&needle)
                    || m.message.to_lowercase().contains(&needle)
            })
            .filter(|m| status.is_none_or(|s| m.status == s))
            .collect()
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Message, EditError> {
        self.messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| EditError::NotFound {
                kind: "message",
                id: id.to_string(),
            })
    }

    /// # Errors
    ///
    /// [`EditError::NotFound`] for an unknown id.
    pub fn set_status(&mut self, id: &str, status: MessageStatus) -> Result<(), EditError> {
        self.get_mut(id)?.status = status;
        Ok(())
    }

    /// Records a reply and marks the message replied. Nothing is sent.
    ///
    /// # Errors
    ///
    /// [`EditError::Invalid`] for an empty reply, [`EditError::NotFound`] for
    /// an unknown id.
    pub fn reply(&mut self, id: &str, body: &str) -> Result<(), EditError> {
        if body.trim().is_empty() {
            return Err(EditError::Invalid("Reply cannot be empty".into()));
        }
        let message = self.get_mut(id)?;
        message.replies.push(body.trim().to_string());
        message.status = MessageStatus::Replied;
        Ok(())
    }

    /// # Errors
    ///
    /// [`EditError::NotFound`] for an unknown id.
    pub fn delete(&mut self, id: &str) -> Result<Message, EditError> {
        let index = self
            .messages
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| EditError::NotFound {
                kind: "message",
                id: id.to_string(),
            })?;
        Ok(self.messages.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_inbox() {
        let board = MessageBoard::seeded();

        assert_eq!(board.all().len(), 4);
        assert_eq!(board.unread_count(), 1);
    }

    #[test]
    fn test_search_and_status_filter() {
        let board = MessageBoard::seeded();

        assert_eq!(board.filtered("thermal", None).len(), 1);
        assert_eq!(board.filtered("", Some(MessageStatus::Read)).len(), 1);
        assert!(board.filtered("sarah", Some(MessageStatus::Archived)).is_empty());
    }

    #[test]
    fn test_reply_marks_replied() {
        let mut board = MessageBoard::seeded();

        board.reply("1", "Thanks, happy to chat!").unwrap();

        let message = &board.all()[0];
        assert_eq!(message.status, MessageStatus::Replied);
        assert_eq!(message.replies, vec!["Thanks, happy to chat!".to_string()]);
        assert_eq!(board.unread_count(), 0);
    }

    #[test]
    fn test_empty_reply_rejected() {
        let mut board = MessageBoard::seeded();

        assert!(matches!(board.reply("1", "  "), Err(EditError::Invalid(_))));
        assert_eq!(board.all()[0].status, MessageStatus::Unread);
    }

    #[test]
    fn test_set_status_and_delete() {
        let mut board = MessageBoard::seeded();

        board.set_status("4", MessageStatus::Read).unwrap();
        assert_eq!(board.all()[3].status, MessageStatus::Read);

        board.delete("2").unwrap();
        assert_eq!(board.all().len(), 3);
        assert!(board.set_status("2", MessageStatus::Read).is_err());
    }
}
