//! Common validation utilities.

use validator::ValidationError;

/// Validates the `local@domain.tld` email shape before persistence.
///
/// Intentionally a shape check rather than full RFC validation: one `@`, a
/// non-empty local part, and a domain containing at least one dot with
/// non-empty labels around it.
pub fn validate_email_shape(email: &str) -> Result<(), ValidationError> {
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Err(email_error()),
    };
    if local.is_empty() || local.chars().any(char::is_whitespace) {
        return Err(email_error());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty() || l.chars().any(char::is_whitespace)) {
        return Err(email_error());
    }
    Ok(())
}

fn email_error() -> ValidationError {
    let mut err = ValidationError::new("email_shape");
    err.message = Some("올바른 이메일 형식이 아닙니다.".into());
    err
}

/// Validates that a trimmed value is non-empty.
pub fn validate_non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("non_blank");
        err.message = Some("값을 입력해주세요.".into());
        Err(err)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_shape_accepts_plain_addresses() {
        assert!(validate_email_shape("kim@example.com").is_ok());
        assert!(validate_email_shape("a.b+c@mail.example.co.kr").is_ok());
    }

    #[test]
    fn test_validate_email_shape_requires_tld() {
        assert!(validate_email_shape("kim@example").is_err());
        assert!(validate_email_shape("kim@.com").is_err());
        assert!(validate_email_shape("kim@example.").is_err());
    }

    #[test]
    fn test_validate_email_shape_requires_single_at() {
        assert!(validate_email_shape("kimexample.com").is_err());
        assert!(validate_email_shape("kim@@example.com").is_err());
        assert!(validate_email_shape("@example.com").is_err());
    }

    #[test]
    fn test_validate_email_shape_rejects_whitespace() {
        assert!(validate_email_shape("k im@example.com").is_err());
        assert!(validate_email_shape("kim@exam ple.com").is_err());
    }

    #[test]
    fn test_validate_email_shape_error_message() {
        let err = validate_email_shape("nope").unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "올바른 이메일 형식이 아닙니다."
        );
    }

    #[test]
    fn test_validate_non_blank() {
        assert!(validate_non_blank("kim").is_ok());
        assert!(validate_non_blank("").is_err());
        assert!(validate_non_blank("   ").is_err());
    }
}
