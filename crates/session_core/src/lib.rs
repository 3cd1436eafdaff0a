use std::sync::Arc;

use devices::{Devices, ImagePick};
use shared::{
    domain::{Role, ScreenTag, Submission},
    error::{FlowError, Notice, INVALID_OTP, NO_IMAGE_TO_RETAKE, NO_UPLOADS, UPLOAD_INCOMPLETE},
    protocol::{Action, Capability, FormField},
};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

pub mod location;
pub mod otp;
pub mod screen;
pub mod upload_slot;
pub mod validation;

pub use otp::{OneTimeCode, OtpGenerator, RandomOtpGenerator};
pub use screen::{FieldView, Screen, ScreenView};
pub use upload_slot::UploadSlot;

const SESSION_EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub enum SessionEvent {
    ScreenChanged { from: ScreenTag, to: ScreenTag },
    Notice(Notice),
    UploadStored(Submission),
}

/// Application-wide state shared by every session: today only the latest
/// upload slot.
#[derive(Clone, Default)]
pub struct AppContext {
    uploads: UploadSlot,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uploads(&self) -> &UploadSlot {
        &self.uploads
    }

    pub fn session(&self, devices: Devices) -> ScreenController {
        self.session_with_otp(devices, Arc::new(RandomOtpGenerator))
    }

    pub fn session_with_otp(
        &self,
        devices: Devices,
        otp: Arc<dyn OtpGenerator>,
    ) -> ScreenController {
        let (events, _) = broadcast::channel(SESSION_EVENT_CAPACITY);
        ScreenController {
            screen: Screen::Home,
            role: None,
            error: None,
            devices,
            uploads: self.uploads.clone(),
            otp,
            events,
        }
    }
}

/// Drives one user's walk through the screens. Every handler runs to
/// completion; on failure the screen is left untouched and the message is
/// kept in [`ScreenController::error`].
pub struct ScreenController {
    screen: Screen,
    role: Option<Role>,
    error: Option<String>,
    devices: Devices,
    uploads: UploadSlot,
    otp: Arc<dyn OtpGenerator>,
    events: broadcast::Sender<SessionEvent>,
}

impl ScreenController {
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn tag(&self) -> ScreenTag {
        self.screen.tag()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn available_actions(&self) -> Vec<Action> {
        let has_upload = !self.uploads.is_empty().await;
        self.screen.available_actions(has_upload)
    }

    pub async fn view(&self) -> ScreenView {
        let latest = self.uploads.latest().await;
        let mut details = Vec::new();
        match &self.screen {
            Screen::Home => details.push("Making roads safer, one step at a time".to_string()),
            Screen::OtpVerification(challenge) => {
                details.push(format!("Code sent to {}", challenge.reset_email));
            }
            Screen::ImageUpload(draft) => {
                if let Some(image) = &draft.image {
                    details.push(format!("Image: {image}"));
                }
                if let Some(location) = &draft.location {
                    details.push(format!("Location: {location}"));
                }
            }
            Screen::SupervisorDashboard => match &latest {
                Some(submission) => {
                    details.push(format!("Image: {}", submission.image));
                    details.push(format!("Latest Upload: {}", submission.location));
                }
                None => details.push(NO_UPLOADS.to_string()),
            },
            Screen::SupervisorView(submission) => {
                details.push(format!("Image: {}", submission.image));
                details.push(format!("Location: {}", submission.location));
                details.push(format!(
                    "Submitted: {}",
                    submission.submitted_at.format("%Y-%m-%d %H:%M:%S UTC")
                ));
            }
            _ => {}
        }

        ScreenView {
            tag: self.screen.tag(),
            title: self.screen.title(self.role),
            fields: self
                .screen
                .fields()
                .into_iter()
                .map(|(field, value)| FieldView::new(field, value))
                .collect(),
            details,
            actions: self.screen.available_actions(latest.is_some()),
            error: self.error.clone(),
        }
    }

    /// Updates a text input on the current screen.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) -> Result<(), FlowError> {
        let tag = self.screen.tag();
        match self.screen.field_mut(field) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(FlowError::UnavailableAction {
                action: format!("edit {}", field.placeholder()),
                screen: tag,
            }),
        }
    }

    /// Applies one user action and returns the screen it lands on.
    pub async fn handle(&mut self, action: Action) -> Result<ScreenTag, FlowError> {
        let from = self.screen.tag();
        match self.apply(action).await {
            Ok(()) => {
                self.error = None;
                let to = self.screen.tag();
                if to != from {
                    info!(%from, %to, %action, "screen transition");
                    let _ = self.events.send(SessionEvent::ScreenChanged { from, to });
                }
                Ok(to)
            }
            Err(err) => {
                warn!(screen = %from, %action, code = ?err.code(), error = %err, "action rejected");
                self.error = Some(err.to_string());
                // Login validation is shown inline under the form instead of as an alert.
                let inline = from == ScreenTag::Login && matches!(err, FlowError::Validation(_));
                if !inline {
                    self.notify(Notice::from(&err));
                }
                Err(err)
            }
        }
    }

    async fn apply(&mut self, action: Action) -> Result<(), FlowError> {
        use ScreenTag as T;

        match (self.screen.tag(), action) {
            (T::Home, Action::Start) => self.go(Screen::RoleSelection),
            (T::RoleSelection, Action::SelectRole(role)) => {
                self.role = Some(role);
                self.go(Screen::Auth)
            }
            (T::RoleSelection, Action::Back) => self.go(Screen::Home),
            (T::Auth, Action::OpenLogin) => self.go(Screen::Login(Default::default())),
            (T::Auth, Action::OpenSignup) => self.go(Screen::Signup(Default::default())),
            (T::Auth, Action::Back) => self.go(Screen::RoleSelection),
            (T::Login, Action::SubmitLogin) => self.submit_login(),
            (T::Login, Action::ForgotPassword) => self.go(Screen::ForgotPassword {
                reset_email: String::new(),
            }),
            (T::Login, Action::SignupLink) => self.go(Screen::Signup(Default::default())),
            (T::Login, Action::Back) => self.go(Screen::Auth),
            (T::ForgotPassword, Action::SendOtp) => self.send_otp(),
            (T::ForgotPassword, Action::Back) => self.go(Screen::Login(Default::default())),
            (T::OtpVerification, Action::VerifyOtp) => self.verify_otp(),
            (T::OtpVerification, Action::Back) => self.leave_otp_verification(),
            (T::ResetPassword, Action::SubmitReset) => self.submit_reset(),
            (T::ResetPassword, Action::Back) => self.go(Screen::Login(Default::default())),
            (T::Signup, Action::SubmitSignup) => self.submit_signup(),
            (T::Signup, Action::Back) => self.go(Screen::Auth),
            (T::WorkerDashboard, Action::UploadPicture) => {
                self.go(Screen::ImageUpload(Default::default()))
            }
            (T::WorkerDashboard, Action::Back) => self.go(Screen::RoleSelection),
            (T::ImageUpload, Action::TakePicture) => self.take_picture().await,
            (T::ImageUpload, Action::PickFromDevice) => self.pick_image().await,
            (T::ImageUpload, Action::Retake) => self.retake(),
            (T::ImageUpload, Action::GetLocation) => self.get_location().await,
            (T::ImageUpload, Action::Upload) => self.upload().await,
            (T::ImageUpload, Action::Back) => self.go(Screen::WorkerDashboard),
            (T::SupervisorDashboard, Action::Open) => self.open_latest().await,
            (T::SupervisorDashboard, Action::Back) => self.go(Screen::RoleSelection),
            (T::SupervisorView, Action::Back) => self.go(Screen::SupervisorDashboard),
            (screen, action) => Err(FlowError::UnavailableAction {
                action: action.label().to_string(),
                screen,
            }),
        }
    }

    fn go(&mut self, next: Screen) -> Result<(), FlowError> {
        self.screen = next;
        Ok(())
    }

    fn notify(&self, notice: Notice) {
        debug!(title = %notice.title, message = %notice.message, "notice");
        let _ = self.events.send(SessionEvent::Notice(notice));
    }

    fn unavailable(&self, action: Action) -> FlowError {
        FlowError::UnavailableAction {
            action: action.label().to_string(),
            screen: self.screen.tag(),
        }
    }

    fn submit_login(&mut self) -> Result<(), FlowError> {
        let Screen::Login(form) = &self.screen else {
            return Err(self.unavailable(Action::SubmitLogin));
        };
        validation::validate_login(form)?;

        // Credentials are not checked against any account store.
        self.notify(Notice::info(
            "Login Successful",
            format!("Welcome, {}", form.email),
        ));
        let next = match self.role {
            Some(Role::Worker) => Screen::WorkerDashboard,
            Some(Role::Supervisor) => Screen::SupervisorDashboard,
            None => Screen::RoleSelection,
        };
        self.go(next)
    }

    fn submit_signup(&mut self) -> Result<(), FlowError> {
        let Screen::Signup(form) = &self.screen else {
            return Err(self.unavailable(Action::SubmitSignup));
        };
        validation::validate_signup(form)?;

        let email = form.email.clone();
        self.notify(Notice::info(
            "Sign Up Successful",
            "Redirecting to Login Page...",
        ));
        self.go(Screen::Login(screen::LoginForm {
            email,
            password: String::new(),
        }))
    }

    fn send_otp(&mut self) -> Result<(), FlowError> {
        let Screen::ForgotPassword { reset_email } = &self.screen else {
            return Err(self.unavailable(Action::SendOtp));
        };
        validation::validate_reset_email(reset_email)?;

        let reset_email = reset_email.clone();
        let code = self.otp.generate();
        // No delivery channel exists; the code is shown to the user directly.
        self.notify(Notice::info("OTP Sent", format!("Your OTP is: {code}")));
        self.go(Screen::OtpVerification(screen::OtpChallenge {
            reset_email,
            code,
            entered: String::new(),
        }))
    }

    fn verify_otp(&mut self) -> Result<(), FlowError> {
        let Screen::OtpVerification(challenge) = &self.screen else {
            return Err(self.unavailable(Action::VerifyOtp));
        };
        if !challenge.code.matches(&challenge.entered) {
            return Err(FlowError::Validation(INVALID_OTP));
        }

        let reset_email = challenge.reset_email.clone();
        self.notify(Notice::info("Success", "OTP verified"));
        self.go(Screen::ResetPassword(screen::ResetForm {
            reset_email,
            new_password: String::new(),
        }))
    }

    fn leave_otp_verification(&mut self) -> Result<(), FlowError> {
        let reset_email = match &self.screen {
            Screen::OtpVerification(challenge) => challenge.reset_email.clone(),
            _ => String::new(),
        };
        self.go(Screen::ForgotPassword { reset_email })
    }

    fn submit_reset(&mut self) -> Result<(), FlowError> {
        let Screen::ResetPassword(form) = &self.screen else {
            return Err(self.unavailable(Action::SubmitReset));
        };
        validation::validate_password(&form.new_password)?;

        self.notify(Notice::info("Success", "Password reset successful"));
        self.go(Screen::Login(Default::default()))
    }

    async fn ensure_permission(&self, capability: Capability) -> Result<(), FlowError> {
        let status = self
            .devices
            .permissions
            .request(capability)
            .await
            .map_err(|err| collaborator_failure("permission request failed", err))?;
        debug!(?capability, ?status, "permission prompt answered");
        if status.is_granted() {
            Ok(())
        } else {
            Err(FlowError::PermissionDenied(capability))
        }
    }

    fn capture_draft_mut(&mut self) -> Option<&mut screen::CaptureDraft> {
        match &mut self.screen {
            Screen::ImageUpload(draft) => Some(draft),
            _ => None,
        }
    }

    fn store_picked_image(&mut self, pick: ImagePick) {
        match pick {
            ImagePick::Picked(image) => {
                debug!(%image, "image selected");
                if let Some(draft) = self.capture_draft_mut() {
                    draft.image = Some(image);
                }
            }
            ImagePick::Cancelled => debug!("image selection cancelled"),
        }
    }

    async fn take_picture(&mut self) -> Result<(), FlowError> {
        self.ensure_permission(Capability::Camera).await?;
        let images = Arc::clone(&self.devices.images);
        let pick = images
            .capture()
            .await
            .map_err(|err| collaborator_failure("camera capture failed", err))?;
        self.store_picked_image(pick);
        Ok(())
    }

    async fn pick_image(&mut self) -> Result<(), FlowError> {
        let images = Arc::clone(&self.devices.images);
        let pick = images
            .pick()
            .await
            .map_err(|err| collaborator_failure("image library unavailable", err))?;
        self.store_picked_image(pick);
        Ok(())
    }

    fn retake(&mut self) -> Result<(), FlowError> {
        if self.screen.tag() != ScreenTag::ImageUpload {
            return Err(self.unavailable(Action::Retake));
        }
        match self.capture_draft_mut() {
            Some(draft) if draft.image.is_some() => {
                draft.image = None;
                Ok(())
            }
            _ => Err(FlowError::Precondition(NO_IMAGE_TO_RETAKE)),
        }
    }

    async fn get_location(&mut self) -> Result<(), FlowError> {
        self.ensure_permission(Capability::Location).await?;
        let coords = self
            .devices
            .location
            .current_position()
            .await
            .map_err(|err| collaborator_failure("location fix failed", err))?;
        debug!(
            latitude = coords.latitude,
            longitude = coords.longitude,
            "location fix"
        );
        let results = self
            .devices
            .geocoder
            .reverse_geocode(coords)
            .await
            .map_err(|err| collaborator_failure("reverse geocoding failed", err))?;
        let description = location::describe_location(&results);
        if let Some(draft) = self.capture_draft_mut() {
            draft.location = Some(description);
        }
        Ok(())
    }

    async fn upload(&mut self) -> Result<(), FlowError> {
        let Screen::ImageUpload(draft) = &self.screen else {
            return Err(self.unavailable(Action::Upload));
        };
        let (Some(image), Some(location)) = (draft.image.clone(), draft.location.clone()) else {
            return Err(FlowError::Precondition(UPLOAD_INCOMPLETE));
        };

        let submission = Submission::new(image, location);
        let displaced = self.uploads.store(submission.clone()).await;
        info!(
            submission_id = %submission.submission_id,
            replaced = displaced.is_some(),
            "latest upload stored"
        );
        let _ = self.events.send(SessionEvent::UploadStored(submission));
        self.notify(Notice::info("Success", "Sent to the Supervisor"));
        self.go(Screen::WorkerDashboard)
    }

    async fn open_latest(&mut self) -> Result<(), FlowError> {
        match self.uploads.latest().await {
            Some(submission) => self.go(Screen::SupervisorView(submission)),
            None => Err(FlowError::Precondition(NO_UPLOADS)),
        }
    }
}

fn collaborator_failure(context: &str, err: anyhow::Error) -> FlowError {
    FlowError::Collaborator(format!("{context}: {err:#}"))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
