use shared::error::{
    FlowError, EMAIL_MISSING_AT, MISSING_FIELDS, PASSWORD_MISMATCH, RESET_EMAIL_INVALID,
    WEAK_PASSWORD,
};

use crate::screen::{LoginForm, SignupForm};

pub const MIN_PASSWORD_LEN: usize = 8;

pub fn is_valid_email(email: &str) -> bool {
    email.contains('@')
}

/// At least eight characters and at least one ASCII digit.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN && password.chars().any(|c| c.is_ascii_digit())
}

pub fn validate_password(password: &str) -> Result<(), FlowError> {
    if is_strong_password(password) {
        Ok(())
    } else {
        Err(FlowError::Validation(WEAK_PASSWORD))
    }
}

pub fn validate_login(form: &LoginForm) -> Result<(), FlowError> {
    if !is_valid_email(&form.email) {
        return Err(FlowError::Validation(EMAIL_MISSING_AT));
    }
    validate_password(&form.password)
}

pub fn validate_signup(form: &SignupForm) -> Result<(), FlowError> {
    let required = [
        &form.full_name,
        &form.phone_number,
        &form.email,
        &form.occupation,
        &form.password,
        &form.confirm_password,
    ];
    if required.iter().any(|value| value.is_empty()) {
        return Err(FlowError::Validation(MISSING_FIELDS));
    }
    if !is_valid_email(&form.email) {
        return Err(FlowError::Validation(EMAIL_MISSING_AT));
    }
    validate_password(&form.password)?;
    if form.password != form.confirm_password {
        return Err(FlowError::Validation(PASSWORD_MISMATCH));
    }
    Ok(())
}

pub fn validate_reset_email(email: &str) -> Result<(), FlowError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(FlowError::Validation(RESET_EMAIL_INVALID))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_signup() -> SignupForm {
        SignupForm {
            full_name: "Ada Lovelace".into(),
            phone_number: "555-0100".into(),
            email: "ada@example.com".into(),
            occupation: "Inspector".into(),
            password: "engine1842".into(),
            confirm_password: "engine1842".into(),
        }
    }

    #[test]
    fn email_needs_only_an_at_sign() {
        assert!(is_valid_email("a@b"));
        assert!(is_valid_email("@"));
        assert!(!is_valid_email("ada.example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn password_needs_length_and_digit() {
        assert!(is_strong_password("abcd1234"));
        assert!(!is_strong_password("abc1234"));
        assert!(!is_strong_password("abcdefgh"));
        assert!(!is_strong_password(""));
        assert!(is_strong_password("12345678"));
    }

    #[test]
    fn login_checks_email_before_password() {
        let form = LoginForm {
            email: "nobody".into(),
            password: "short".into(),
        };
        assert_eq!(
            validate_login(&form),
            Err(FlowError::Validation(EMAIL_MISSING_AT))
        );

        let form = LoginForm {
            email: "a@b.com".into(),
            password: "short".into(),
        };
        assert_eq!(validate_login(&form), Err(FlowError::Validation(WEAK_PASSWORD)));
    }

    #[test]
    fn signup_rejects_each_missing_field() {
        for index in 0..6 {
            let mut form = complete_signup();
            let field = match index {
                0 => &mut form.full_name,
                1 => &mut form.phone_number,
                2 => &mut form.email,
                3 => &mut form.occupation,
                4 => &mut form.password,
                _ => &mut form.confirm_password,
            };
            field.clear();
            assert_eq!(
                validate_signup(&form),
                Err(FlowError::Validation(MISSING_FIELDS)),
                "field #{index} cleared"
            );
        }
    }

    #[test]
    fn signup_reports_mismatch_last() {
        let mut form = complete_signup();
        form.confirm_password = "engine1843".into();
        assert_eq!(
            validate_signup(&form),
            Err(FlowError::Validation(PASSWORD_MISMATCH))
        );

        form.password = "weak".into();
        assert_eq!(validate_signup(&form), Err(FlowError::Validation(WEAK_PASSWORD)));

        form.email = "ada.example.com".into();
        assert_eq!(
            validate_signup(&form),
            Err(FlowError::Validation(EMAIL_MISSING_AT))
        );
    }

    #[test]
    fn complete_signup_is_accepted() {
        assert_eq!(validate_signup(&complete_signup()), Ok(()));
    }

    #[test]
    fn reset_email_has_its_own_message() {
        assert_eq!(
            validate_reset_email("nope"),
            Err(FlowError::Validation(RESET_EMAIL_INVALID))
        );
        assert_eq!(validate_reset_email("a@b"), Ok(()));
    }
}
