//! Platform collaborators consumed by the session: image capture/pick,
//! location fix plus reverse geocoding, and runtime permission prompts.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::{domain::ImageRef, protocol::Capability};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePick {
    Picked(ImageRef),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        self == PermissionStatus::Granted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Structured reverse-geocode result. Any component may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    pub name: Option<String>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// Components in display order.
    pub fn components(&self) -> [Option<&str>; 6] {
        [
            self.name.as_deref(),
            self.street.as_deref(),
            self.postal_code.as_deref(),
            self.city.as_deref(),
            self.region.as_deref(),
            self.country.as_deref(),
        ]
    }
}

#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn capture(&self) -> anyhow::Result<ImagePick>;
    async fn pick(&self) -> anyhow::Result<ImagePick>;
}

#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn current_position(&self) -> anyhow::Result<Coordinates>;
}

#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse_geocode(&self, coords: Coordinates) -> anyhow::Result<Vec<Address>>;
}

#[async_trait]
pub trait PermissionPrompter: Send + Sync {
    async fn request(&self, capability: Capability) -> anyhow::Result<PermissionStatus>;
}

/// Bundle of collaborators handed to a session.
#[derive(Clone)]
pub struct Devices {
    pub images: Arc<dyn ImageSource>,
    pub location: Arc<dyn LocationSource>,
    pub geocoder: Arc<dyn ReverseGeocoder>,
    pub permissions: Arc<dyn PermissionPrompter>,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysDenied;

    #[async_trait]
    impl PermissionPrompter for AlwaysDenied {
        async fn request(&self, _capability: Capability) -> anyhow::Result<PermissionStatus> {
            Ok(PermissionStatus::Denied)
        }
    }

    #[test]
    fn address_components_follow_display_order() {
        let address = Address {
            city: Some("Springfield".into()),
            country: Some("USA".into()),
            name: Some("Depot".into()),
            ..Address::default()
        };
        assert_eq!(
            address.components(),
            [Some("Depot"), None, None, Some("Springfield"), None, Some("USA")]
        );
    }

    #[test]
    fn address_deserializes_with_missing_fields() {
        let address: Address =
            serde_json::from_str(r#"{"postalCode":"62701","city":"Springfield"}"#)
                .expect("parse address");
        assert_eq!(address.postal_code.as_deref(), Some("62701"));
        assert_eq!(address.street, None);
    }

    #[tokio::test]
    async fn prompter_trait_objects_are_usable() {
        let prompter: Arc<dyn PermissionPrompter> = Arc::new(AlwaysDenied);
        let status = prompter.request(Capability::Camera).await.expect("prompt");
        assert!(!status.is_granted());
    }
}
