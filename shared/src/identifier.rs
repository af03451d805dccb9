use regex::Regex;

/// What kind of identifier a login string is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Email,
    Phone,
}

impl IdentifierKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

/// Classifies an identifier, or `None` if it is neither an email nor a
/// 10-digit phone number.
pub fn classify(value: &str) -> Option<IdentifierKind> {
    if is_phone(value) {
        Some(IdentifierKind::Phone)
    } else if is_email(value) {
        Some(IdentifierKind::Email)
    } else {
        None
    }
}

pub fn is_valid(value: &str) -> bool {
    classify(value).is_some()
}

// Unanchored: anything containing `x@y.z` passes.
fn is_email(value: &str) -> bool {
    Regex::new(r"\S+@\S+\.\S+").is_ok_and(|re| re.is_match(value))
}

fn is_phone(value: &str) -> bool {
    Regex::new(r"^[0-9]{10}$").is_ok_and(|re| re.is_match(value))
}
