use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new_random() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

id_newtype!(SubmissionId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Worker,
    Supervisor,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Worker => f.write_str("Worker"),
            Role::Supervisor => f.write_str("Supervisor"),
        }
    }
}

/// Discriminator for the active screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScreenTag {
    Home,
    RoleSelection,
    Auth,
    Login,
    ForgotPassword,
    OtpVerification,
    ResetPassword,
    Signup,
    WorkerDashboard,
    ImageUpload,
    SupervisorDashboard,
    SupervisorView,
}

impl ScreenTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ScreenTag::Home => "home",
            ScreenTag::RoleSelection => "roleSelection",
            ScreenTag::Auth => "auth",
            ScreenTag::Login => "login",
            ScreenTag::ForgotPassword => "forgotPassword",
            ScreenTag::OtpVerification => "otpVerification",
            ScreenTag::ResetPassword => "resetPassword",
            ScreenTag::Signup => "signup",
            ScreenTag::WorkerDashboard => "workerDashboard",
            ScreenTag::ImageUpload => "imageUpload",
            ScreenTag::SupervisorDashboard => "supervisorDashboard",
            ScreenTag::SupervisorView => "supervisorView",
        }
    }
}

impl fmt::Display for ScreenTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque handle returned by an image source (usually a file or content URI).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An image/location pair produced by a worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub submission_id: SubmissionId,
    pub image: ImageRef,
    pub location: String,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(image: ImageRef, location: impl Into<String>) -> Self {
        Self {
            submission_id: SubmissionId::new_random(),
            image,
            location: location.into(),
            submitted_at: Utc::now(),
        }
    }

    /// Compares the captured content, ignoring id and timestamp.
    pub fn same_content(&self, image: &ImageRef, location: &str) -> bool {
        &self.image == image && self.location == location
    }
}
