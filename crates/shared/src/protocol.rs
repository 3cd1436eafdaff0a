use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Role;

/// Platform capability gated behind a runtime permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Camera,
    Location,
}

impl Capability {
    pub fn denial_message(self) -> &'static str {
        match self {
            Capability::Camera => "Camera permission is required to take pictures.",
            Capability::Location => "Location access is required to get image location.",
        }
    }
}

/// User actions. Each screen accepts a subset of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Action {
    Start,
    SelectRole(Role),
    Back,
    OpenLogin,
    OpenSignup,
    SubmitLogin,
    ForgotPassword,
    SignupLink,
    SendOtp,
    VerifyOtp,
    SubmitReset,
    SubmitSignup,
    UploadPicture,
    TakePicture,
    PickFromDevice,
    Retake,
    GetLocation,
    Upload,
    Open,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Start => "Start",
            Action::SelectRole(Role::Worker) => "Worker",
            Action::SelectRole(Role::Supervisor) => "Supervisor",
            Action::Back => "Back",
            Action::OpenLogin => "Login",
            Action::OpenSignup => "Sign Up",
            Action::SubmitLogin | Action::SubmitSignup => "Submit",
            Action::ForgotPassword => "Forgot Password?",
            Action::SignupLink => "Don't have an account? Sign up here",
            Action::SendOtp => "Send OTP",
            Action::VerifyOtp => "Verify OTP",
            Action::SubmitReset => "Reset Password",
            Action::UploadPicture => "Upload a Picture",
            Action::TakePicture => "Take Picture",
            Action::PickFromDevice => "Upload from Device",
            Action::Retake => "Retake",
            Action::GetLocation => "Get Location",
            Action::Upload => "Upload",
            Action::Open => "Open",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Editable text inputs across the form screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Email,
    Password,
    ConfirmPassword,
    FullName,
    PhoneNumber,
    Occupation,
    ResetEmail,
    OtpCode,
    NewPassword,
}

impl FormField {
    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Email => "Email",
            FormField::Password => "Password",
            FormField::ConfirmPassword => "Confirm Password",
            FormField::FullName => "Full Name",
            FormField::PhoneNumber => "Phone Number",
            FormField::Occupation => "Occupation",
            FormField::ResetEmail => "Enter your email",
            FormField::OtpCode => "Enter OTP",
            FormField::NewPassword => "Enter new password",
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(
            self,
            FormField::Password | FormField::ConfirmPassword | FormField::NewPassword
        )
    }
}
