use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::internal::models::CommentPayload;

pub const SUCCESS_MESSAGE: &str = "Komentar Anda berhasil dikirim!";

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex compiles"));

/// Why a comment was not sent. The messages are shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommentError {
    #[error("Nama tidak boleh kosong.")]
    EmptyName,
    #[error("Email tidak boleh kosong.")]
    EmptyEmail,
    #[error("Format email tidak valid.")]
    InvalidEmail,
    #[error("Komentar tidak boleh kosong.")]
    EmptyText,
    /// Any transport or server failure. Details go to the log only.
    #[error("Gagal mengirim komentar, coba lagi nanti.")]
    SubmitFailed,
}

/// Which input of the form has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Email,
    Text,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Text,
            Self::Text => Self::Name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentForm {
    pub name: String,
    pub email: String,
    pub text: String,
    pub focus: FormField,
    pub submitting: bool,
    pub error: Option<CommentError>,
}

impl CommentForm {
    /// Checks run in a fixed order; the first failure is reported.
    pub fn validate(&self) -> Result<(), CommentError> {
        let email = self.email.trim();
        if self.name.trim().is_empty() {
            return Err(CommentError::EmptyName);
        }
        if email.is_empty() {
            return Err(CommentError::EmptyEmail);
        }
        if !EMAIL_REGEX.is_match(email) {
            return Err(CommentError::InvalidEmail);
        }
        if self.text.trim().is_empty() {
            return Err(CommentError::EmptyText);
        }
        Ok(())
    }

    pub fn to_payload(&self, article_id: u64) -> CommentPayload {
        CommentPayload {
            artikel_id: article_id,
            nama: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            komentar: self.text.trim().to_string(),
        }
    }

    /// Validate and mark the form as submitting. Returns `None` when a
    /// submission is already in flight or validation fails (the error is kept
    /// on the form).
    pub fn begin_submit(&mut self, article_id: u64) -> Option<CommentPayload> {
        if self.submitting {
            tracing::debug!("comment submit ignored, one is already in flight");
            return None;
        }
        match self.validate() {
            Ok(()) => {
                self.error = None;
                self.submitting = true;
                Some(self.to_payload(article_id))
            }
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }

    /// Apply the outcome of the POST. On success the inputs are cleared.
    pub fn finish_submit(&mut self, result: Result<(), CommentError>) {
        self.submitting = false;
        match result {
            Ok(()) => {
                self.name.clear();
                self.email.clear();
                self.text.clear();
                self.focus = FormField::Name;
                self.error = None;
            }
            Err(e) => self.error = Some(e),
        }
    }

    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Text => &mut self.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, text: &str) -> CommentForm {
        CommentForm {
            name: name.to_string(),
            email: email.to_string(),
            text: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_failure_wins() {
        assert_eq!(form("", "", "").validate(), Err(CommentError::EmptyName));
        assert_eq!(form("  ", "bad", "").validate(), Err(CommentError::EmptyName));
        assert_eq!(form("A", " ", "").validate(), Err(CommentError::EmptyEmail));
        assert_eq!(form("A", "a@b", "").validate(), Err(CommentError::InvalidEmail));
        assert_eq!(form("A", "a@b.c", " ").validate(), Err(CommentError::EmptyText));
        assert_eq!(form("A", "a@b.c", "hai").validate(), Ok(()));
    }

    #[test]
    fn test_email_shape() {
        for bad in ["a b@c.d", "a@@c.d", "@c.d", "a@c", "a@.d x"] {
            assert_eq!(
                form("A", bad, "x").validate(),
                Err(CommentError::InvalidEmail),
                "{bad}"
            );
        }
        assert!(form("A", "sari.dewi@mail.unsoed.ac.id", "x").validate().is_ok());
    }

    #[test]
    fn test_messages() {
        assert_eq!(CommentError::InvalidEmail.to_string(), "Format email tidak valid.");
        assert_eq!(
            CommentError::SubmitFailed.to_string(),
            "Gagal mengirim komentar, coba lagi nanti."
        );
    }

    #[test]
    fn test_submit_lifecycle() {
        let mut f = form(" Sari ", "sari@mail.id", "Bagus ");
        let payload = f.begin_submit(9).unwrap();
        assert_eq!(payload.nama, "Sari");
        assert_eq!(payload.komentar, "Bagus");
        assert!(f.submitting);
        assert!(f.begin_submit(9).is_none());

        f.finish_submit(Ok(()));
        assert!(!f.submitting);
        assert!(f.name.is_empty() && f.email.is_empty() && f.text.is_empty());
    }

    #[test]
    fn test_failed_submit_keeps_input() {
        let mut f = form("Sari", "sari@mail.id", "Bagus");
        f.begin_submit(1).unwrap();
        f.finish_submit(Err(CommentError::SubmitFailed));
        assert_eq!(f.text, "Bagus");
        assert_eq!(f.error, Some(CommentError::SubmitFailed));
        assert!(f.begin_submit(1).is_some());
    }

    #[test]
    fn test_invalid_form_never_submits() {
        let mut f = form("Sari", "bukan-email", "Bagus");
        assert!(f.begin_submit(1).is_none());
        assert!(!f.submitting);
        assert_eq!(f.error, Some(CommentError::InvalidEmail));
    }
}
