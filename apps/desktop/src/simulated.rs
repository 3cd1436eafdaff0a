//! Settings-driven stand-ins for the platform camera, photo library, GPS,
//! geocoder and permission prompts.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use anyhow::anyhow;
use async_trait::async_trait;
use devices::{
    Address, Coordinates, Devices, ImagePick, ImageSource, LocationSource, PermissionPrompter,
    PermissionStatus, ReverseGeocoder,
};
use shared::{domain::ImageRef, protocol::Capability};

use crate::config::Settings;

pub fn devices_from_settings(settings: &Settings) -> Devices {
    Devices {
        images: Arc::new(SimulatedImages::new(
            settings.capture_dir.clone(),
            settings.image_library.clone(),
        )),
        location: Arc::new(FixedLocation {
            coords: settings.coordinates(),
        }),
        geocoder: Arc::new(StaticGeocoder {
            address: settings.address.clone(),
        }),
        permissions: Arc::new(ConfiguredPermissions {
            camera: settings.camera_permission,
            location: settings.location_permission,
        }),
    }
}

pub struct SimulatedImages {
    capture_dir: String,
    library: Vec<String>,
    captures: AtomicUsize,
    picks: AtomicUsize,
}

impl SimulatedImages {
    pub fn new(capture_dir: String, library: Vec<String>) -> Self {
        Self {
            capture_dir,
            library,
            captures: AtomicUsize::new(0),
            picks: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ImageSource for SimulatedImages {
    async fn capture(&self) -> anyhow::Result<ImagePick> {
        let n = self.captures.fetch_add(1, Ordering::Relaxed) + 1;
        let dir = self.capture_dir.trim_end_matches('/');
        Ok(ImagePick::Picked(ImageRef::new(format!(
            "file://{dir}/capture-{n:04}.jpg"
        ))))
    }

    /// Cycles through the configured library; an empty library behaves like
    /// the user dismissing the picker.
    async fn pick(&self) -> anyhow::Result<ImagePick> {
        if self.library.is_empty() {
            return Ok(ImagePick::Cancelled);
        }
        let index = self.picks.fetch_add(1, Ordering::Relaxed) % self.library.len();
        Ok(ImagePick::Picked(ImageRef::new(self.library[index].clone())))
    }
}

pub struct FixedLocation {
    coords: Option<Coordinates>,
}

#[async_trait]
impl LocationSource for FixedLocation {
    async fn current_position(&self) -> anyhow::Result<Coordinates> {
        self.coords
            .ok_or_else(|| anyhow!("no location fix configured (set latitude and longitude)"))
    }
}

pub struct StaticGeocoder {
    address: Option<Address>,
}

#[async_trait]
impl ReverseGeocoder for StaticGeocoder {
    async fn reverse_geocode(&self, _coords: Coordinates) -> anyhow::Result<Vec<Address>> {
        Ok(self.address.iter().cloned().collect())
    }
}

pub struct ConfiguredPermissions {
    camera: bool,
    location: bool,
}

#[async_trait]
impl PermissionPrompter for ConfiguredPermissions {
    async fn request(&self, capability: Capability) -> anyhow::Result<PermissionStatus> {
        let granted = match capability {
            Capability::Camera => self.camera,
            Capability::Location => self.location,
        };
        Ok(if granted {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_are_numbered_under_capture_dir() {
        let images = SimulatedImages::new("/tmp/shots/".into(), Vec::new());
        assert_eq!(
            images.capture().await.expect("capture"),
            ImagePick::Picked(ImageRef::new("file:///tmp/shots/capture-0001.jpg"))
        );
        assert_eq!(
            images.capture().await.expect("capture"),
            ImagePick::Picked(ImageRef::new("file:///tmp/shots/capture-0002.jpg"))
        );
    }

    #[tokio::test]
    async fn empty_library_cancels_and_full_library_cycles() {
        let empty = SimulatedImages::new("/tmp".into(), Vec::new());
        assert_eq!(empty.pick().await.expect("pick"), ImagePick::Cancelled);

        let library = SimulatedImages::new("/tmp".into(), vec!["a".into(), "b".into()]);
        let mut picked = Vec::new();
        for _ in 0..3 {
            if let ImagePick::Picked(image) = library.pick().await.expect("pick") {
                picked.push(image.0);
            }
        }
        assert_eq!(picked, vec!["a", "b", "a"]);
    }

    #[tokio::test]
    async fn missing_fix_is_an_error() {
        let location = FixedLocation { coords: None };
        assert!(location.current_position().await.is_err());
    }

    #[tokio::test]
    async fn permissions_follow_settings() {
        let settings = Settings {
            camera_permission: false,
            ..Settings::default()
        };
        let devices = devices_from_settings(&settings);
        assert_eq!(
            devices
                .permissions
                .request(Capability::Camera)
                .await
                .expect("prompt"),
            PermissionStatus::Denied
        );
        assert!(devices
            .permissions
            .request(Capability::Location)
            .await
            .expect("prompt")
            .is_granted());
    }
}
