//! Screen states. Each variant owns only the drafts that screen edits, so an
//! image can never be pending on the login screen and a one-time code never
//! outlives the verification step.

use serde::Serialize;
use shared::{
    domain::{ImageRef, Role, ScreenTag, Submission},
    protocol::{Action, FormField},
};

use crate::otp::OneTimeCode;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub occupation: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpChallenge {
    pub reset_email: String,
    pub code: OneTimeCode,
    pub entered: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetForm {
    pub reset_email: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureDraft {
    pub image: Option<ImageRef>,
    pub location: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Screen {
    Home,
    RoleSelection,
    Auth,
    Login(LoginForm),
    ForgotPassword { reset_email: String },
    OtpVerification(OtpChallenge),
    ResetPassword(ResetForm),
    Signup(SignupForm),
    WorkerDashboard,
    ImageUpload(CaptureDraft),
    SupervisorDashboard,
    /// Snapshot of the slot taken when the supervisor opened it.
    SupervisorView(Submission),
}

impl Screen {
    pub fn tag(&self) -> ScreenTag {
        match self {
            Screen::Home => ScreenTag::Home,
            Screen::RoleSelection => ScreenTag::RoleSelection,
            Screen::Auth => ScreenTag::Auth,
            Screen::Login(_) => ScreenTag::Login,
            Screen::ForgotPassword { .. } => ScreenTag::ForgotPassword,
            Screen::OtpVerification(_) => ScreenTag::OtpVerification,
            Screen::ResetPassword(_) => ScreenTag::ResetPassword,
            Screen::Signup(_) => ScreenTag::Signup,
            Screen::WorkerDashboard => ScreenTag::WorkerDashboard,
            Screen::ImageUpload(_) => ScreenTag::ImageUpload,
            Screen::SupervisorDashboard => ScreenTag::SupervisorDashboard,
            Screen::SupervisorView(_) => ScreenTag::SupervisorView,
        }
    }

    pub fn title(&self, role: Option<Role>) -> String {
        let with_role = |base: &str| match role {
            Some(role) => format!("{role} {base}"),
            None => base.to_string(),
        };
        match self {
            Screen::Home => "Safe Street".to_string(),
            Screen::RoleSelection => "Select Your Role".to_string(),
            Screen::Auth => with_role("Authentication"),
            Screen::Login(_) => with_role("Login"),
            Screen::ForgotPassword { .. } => "Forgot Password".to_string(),
            Screen::OtpVerification(_) => "Enter OTP".to_string(),
            Screen::ResetPassword(_) => "Reset Password".to_string(),
            Screen::Signup(_) => with_role("Sign Up"),
            Screen::WorkerDashboard => "Worker Dashboard".to_string(),
            Screen::ImageUpload(_) => "Upload a Picture".to_string(),
            Screen::SupervisorDashboard => "Supervisor Dashboard".to_string(),
            Screen::SupervisorView(_) => "Latest Upload".to_string(),
        }
    }

    /// Text inputs shown on this screen, in display order.
    pub fn fields(&self) -> Vec<(FormField, &str)> {
        match self {
            Screen::Login(form) => vec![
                (FormField::Email, form.email.as_str()),
                (FormField::Password, form.password.as_str()),
            ],
            Screen::ForgotPassword { reset_email } => {
                vec![(FormField::ResetEmail, reset_email.as_str())]
            }
            Screen::OtpVerification(challenge) => {
                vec![(FormField::OtpCode, challenge.entered.as_str())]
            }
            Screen::ResetPassword(form) => {
                vec![(FormField::NewPassword, form.new_password.as_str())]
            }
            Screen::Signup(form) => vec![
                (FormField::FullName, form.full_name.as_str()),
                (FormField::PhoneNumber, form.phone_number.as_str()),
                (FormField::Email, form.email.as_str()),
                (FormField::Occupation, form.occupation.as_str()),
                (FormField::Password, form.password.as_str()),
                (FormField::ConfirmPassword, form.confirm_password.as_str()),
            ],
            _ => Vec::new(),
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> Option<&mut String> {
        match (self, field) {
            (Screen::Login(form), FormField::Email) => Some(&mut form.email),
            (Screen::Login(form), FormField::Password) => Some(&mut form.password),
            (Screen::ForgotPassword { reset_email }, FormField::ResetEmail) => Some(reset_email),
            (Screen::OtpVerification(challenge), FormField::OtpCode) => {
                Some(&mut challenge.entered)
            }
            (Screen::ResetPassword(form), FormField::NewPassword) => Some(&mut form.new_password),
            (Screen::Signup(form), FormField::FullName) => Some(&mut form.full_name),
            (Screen::Signup(form), FormField::PhoneNumber) => Some(&mut form.phone_number),
            (Screen::Signup(form), FormField::Email) => Some(&mut form.email),
            (Screen::Signup(form), FormField::Occupation) => Some(&mut form.occupation),
            (Screen::Signup(form), FormField::Password) => Some(&mut form.password),
            (Screen::Signup(form), FormField::ConfirmPassword) => {
                Some(&mut form.confirm_password)
            }
            _ => None,
        }
    }

    /// Buttons offered on this screen. `has_upload` reports whether the
    /// latest upload slot is filled.
    pub fn available_actions(&self, has_upload: bool) -> Vec<Action> {
        match self {
            Screen::Home => vec![Action::Start],
            Screen::RoleSelection => vec![
                Action::SelectRole(Role::Worker),
                Action::SelectRole(Role::Supervisor),
                Action::Back,
            ],
            Screen::Auth => vec![Action::OpenLogin, Action::OpenSignup, Action::Back],
            Screen::Login(_) => vec![
                Action::SubmitLogin,
                Action::ForgotPassword,
                Action::SignupLink,
                Action::Back,
            ],
            Screen::ForgotPassword { .. } => vec![Action::SendOtp, Action::Back],
            Screen::OtpVerification(_) => vec![Action::VerifyOtp, Action::Back],
            Screen::ResetPassword(_) => vec![Action::SubmitReset, Action::Back],
            Screen::Signup(_) => vec![Action::SubmitSignup, Action::Back],
            Screen::WorkerDashboard => vec![Action::UploadPicture, Action::Back],
            Screen::ImageUpload(draft) => {
                let mut actions = if draft.image.is_some() {
                    vec![Action::Retake, Action::GetLocation]
                } else {
                    vec![Action::TakePicture, Action::PickFromDevice]
                };
                if draft.location.is_some() {
                    actions.push(Action::Upload);
                }
                actions.push(Action::Back);
                actions
            }
            Screen::SupervisorDashboard if has_upload => vec![Action::Open, Action::Back],
            Screen::SupervisorDashboard => vec![Action::Back],
            Screen::SupervisorView(_) => vec![Action::Back],
        }
    }
}

/// Render-ready snapshot of the active screen.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenView {
    pub tag: ScreenTag,
    pub title: String,
    pub fields: Vec<FieldView>,
    pub details: Vec<String>,
    pub actions: Vec<Action>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub field: FormField,
    pub label: &'static str,
    pub value: String,
}

impl FieldView {
    pub fn new(field: FormField, value: &str) -> Self {
        let value = if field.is_secret() {
            "*".repeat(value.chars().count())
        } else {
            value.to_string()
        };
        Self {
            field,
            label: field.placeholder(),
            value,
        }
    }
}
