use std::sync::Arc;

use shared::domain::Submission;
use tokio::sync::RwLock;

/// Holder of the most recent worker submission. Cloning shares the slot.
#[derive(Debug, Clone, Default)]
pub struct UploadSlot {
    latest: Arc<RwLock<Option<Submission>>>,
}

impl UploadSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the held submission and returns the one it displaced.
    pub async fn store(&self, submission: Submission) -> Option<Submission> {
        self.latest.write().await.replace(submission)
    }

    pub async fn latest(&self) -> Option<Submission> {
        self.latest.read().await.clone()
    }

    pub async fn is_empty(&self) -> bool {
        self.latest.read().await.is_none()
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::ImageRef;

    use super::*;

    #[tokio::test]
    async fn store_overwrites_previous_submission() {
        let slot = UploadSlot::new();
        assert!(slot.is_empty().await);

        let first = Submission::new(ImageRef::new("file:///a.jpg"), "Springfield, USA");
        assert!(slot.store(first.clone()).await.is_none());

        let second = Submission::new(ImageRef::new("file:///b.jpg"), "Location not found");
        let displaced = slot.store(second.clone()).await.expect("first displaced");
        assert_eq!(displaced.submission_id, first.submission_id);

        let latest = slot.latest().await.expect("slot filled");
        assert_eq!(latest.submission_id, second.submission_id);
    }

    #[tokio::test]
    async fn clones_share_the_same_slot() {
        let writer = UploadSlot::new();
        let reader = writer.clone();
        writer
            .store(Submission::new(ImageRef::new("file:///c.jpg"), "Depot"))
            .await;
        assert!(!reader.is_empty().await);
    }
}
