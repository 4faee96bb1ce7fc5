//! Contact form validation and `mailto:` link construction.

use std::sync::LazyLock;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use thiserror::Error;

pub const DEFAULT_RECIPIENT: &str = "info@yearzero.vc";

pub const SUBMIT_FAILED: &str = "Please correct the errors and try again.";

pub const SUCCESS_NOTICE: &str =
    "Email client opened! Please send the message from your email application.";

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("valid name pattern"));

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").expect("valid email pattern")
});

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub fn all() -> &'static [Field] {
        &[Field::Name, Field::Email, Field::Subject, Field::Message]
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Subject => "Subject",
            Self::Message => "Message",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A rule a field value broke. `Display` gives the message shown to the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("This field is required")]
    Required,
    #[error("Name must be at least 2 characters long")]
    NameTooShort,
    #[error("Name can only contain letters and spaces")]
    NameInvalid,
    #[error("Please enter a valid name (letters and spaces only)")]
    NameNotLetters,
    #[error("Please enter a valid email address")]
    EmailInvalid,
    #[error("Subject must be at least 3 characters long")]
    SubjectTooShort,
    #[error("Subject must be less than 100 characters")]
    SubjectTooLong,
    #[error("Please enter a valid message subject (letters and spaces only)")]
    SubjectNotLetters,
    #[error("Message must be at least 10 characters long")]
    MessageTooShort,
    #[error("Message must be less than 500 characters")]
    MessageTooLong,
}

/// Raw field values as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate every field for submission, collecting all failures.
    pub fn validate(&self) -> Result<Submission, Vec<(Field, FieldError)>> {
        let errors: Vec<(Field, FieldError)> = Field::all()
            .iter()
            .filter_map(|&field| {
                validate_on_submit(field, self.value(field))
                    .err()
                    .map(|e| (field, e))
            })
            .collect();

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Submission {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        })
    }
}

/// Trimmed values that passed submit validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl Submission {
    pub fn body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}\n\n---\n\
             This message was sent via the contact form on your website.",
            self.name, self.email, self.message
        )
    }

    pub fn mailto(&self, recipient: &str) -> String {
        format!(
            "mailto:{recipient}?subject={}&body={}",
            encode_component(&self.subject),
            encode_component(&self.body())
        )
    }
}

/// Percent-encode like JavaScript's `encodeURIComponent`.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Length as a browser reports it, in UTF-16 code units.
fn js_length(value: &str) -> usize {
    value.encode_utf16().count()
}

fn is_letters(value: &str) -> bool {
    NAME_PATTERN.is_match(value)
}

/// Strict rules applied when the form is submitted.
pub fn validate_on_submit(field: Field, raw: &str) -> Result<(), FieldError> {
    let value = raw.trim();
    let len = js_length(value);
    match field {
        Field::Name if len < 2 => Err(FieldError::NameTooShort),
        Field::Name if !is_letters(value) => Err(FieldError::NameInvalid),
        Field::Email if !is_valid_email(value) => Err(FieldError::EmailInvalid),
        Field::Subject if len < 3 => Err(FieldError::SubjectTooShort),
        Field::Subject if len > 100 => Err(FieldError::SubjectTooLong),
        Field::Message if len < 10 => Err(FieldError::MessageTooShort),
        Field::Message if len > 500 => Err(FieldError::MessageTooLong),
        _ => Ok(()),
    }
}

/// Advisory rules applied as the visitor types. Empty values pass.
pub fn validate_realtime(field: Field, raw: &str) -> Result<(), FieldError> {
    let value = raw.trim();
    let len = js_length(value);
    if len == 0 {
        return Ok(());
    }
    match field {
        Field::Name if len < 2 => Err(FieldError::NameTooShort),
        Field::Name if !is_letters(value) => Err(FieldError::NameNotLetters),
        Field::Email if !is_valid_email(value) => Err(FieldError::EmailInvalid),
        Field::Subject if len < 3 => Err(FieldError::SubjectTooShort),
        Field::Subject if !is_letters(value) => Err(FieldError::SubjectNotLetters),
        Field::Message if len < 10 => Err(FieldError::MessageTooShort),
        Field::Message if len > 500 => Err(FieldError::MessageTooLong),
        _ => Ok(()),
    }
}

/// Message to show when a field loses focus, if any.
///
/// A field's `title` replaces the built-in message, mirroring how the
/// markup's title attribute doubles as the hint text.
pub fn blur_message(field: Field, raw: &str, title: Option<&str>) -> Option<String> {
    let title = title.filter(|t| !t.is_empty());
    if raw.trim().is_empty() {
        return Some(
            title
                .map(str::to_string)
                .unwrap_or_else(|| FieldError::Required.to_string()),
        );
    }
    validate_realtime(field, raw)
        .err()
        .map(|e| title.map(str::to_string).unwrap_or_else(|| e.to_string()))
}

/// Per-field feedback state behind the form widgets.
#[derive(Debug, Clone, Default)]
pub struct FieldFeedback {
    /// Set by a failed submit; styles the input as erroneous.
    pub error: bool,
    /// Message shown under the field.
    pub message: Option<String>,
}

impl FieldFeedback {
    /// Typing clears both the error styling and the message.
    pub fn on_input(&mut self) {
        self.error = false;
        self.message = None;
    }

    pub fn on_focus(&mut self) {
        self.message = None;
    }

    pub fn on_blur(&mut self, field: Field, raw: &str, title: Option<&str>) {
        self.message = blur_message(field, raw, title);
    }

    pub fn show_error(&mut self, error: FieldError) {
        self.error = true;
        self.message = Some(error.to_string());
    }
}
