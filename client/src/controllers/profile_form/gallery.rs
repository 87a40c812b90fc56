//! Gallery actions; only available once the profile exists

use shared::{
    validate_video_url, GalleryImage, GalleryVideo, LocalImage, NewGalleryVideo,
    MAX_GALLERY_IMAGES, MAX_GALLERY_VIDEOS,
};

use super::ProfileFormController;
use crate::error::{ClientError, ClientResult};
use crate::external::MarketplaceApi;

impl<A: MarketplaceApi> ProfileFormController<A> {
    pub async fn add_gallery_image(
        &mut self,
        image: LocalImage,
        caption: Option<&str>,
    ) -> ClientResult<GalleryImage> {
        self.require_profile()?;
        if self.gallery_images.len() >= MAX_GALLERY_IMAGES {
            return Err(self.reject(ClientError::LimitReached {
                resource: "gallery images",
                limit: MAX_GALLERY_IMAGES,
            }));
        }

        match self.api.add_gallery_image(&image, caption).await {
            Ok(added) => {
                self.gallery_images.push(added.clone());
                self.feedback.success("Image added to gallery");
                Ok(added)
            }
            Err(e) => {
                tracing::error!("Failed to add gallery image: {}", e);
                Err(self.reject(e))
            }
        }
    }

    /// Removes the image from the list once the server confirms
    pub async fn delete_gallery_image(&mut self, id: i64) -> ClientResult<()> {
        self.require_profile()?;

        if let Err(e) = self.api.delete_gallery_image(id).await {
            tracing::error!("Failed to delete gallery image {}: {}", id, e);
            return Err(self.reject(e));
        }

        self.gallery_images.retain(|image| image.id != id);
        Ok(())
    }

    pub async fn add_gallery_video(
        &mut self,
        url: &str,
        title: Option<&str>,
    ) -> ClientResult<GalleryVideo> {
        self.require_profile()?;
        if self.gallery_videos.len() >= MAX_GALLERY_VIDEOS {
            return Err(self.reject(ClientError::LimitReached {
                resource: "gallery videos",
                limit: MAX_GALLERY_VIDEOS,
            }));
        }
        if let Err(message) = validate_video_url(url) {
            return Err(self.reject(ClientError::validation("video_url", message)));
        }

        let video = NewGalleryVideo {
            url: url.trim().to_string(),
            title: title
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        };

        match self.api.add_gallery_video(&video).await {
            Ok(added) => {
                self.gallery_videos.push(added.clone());
                self.feedback.success("Video added to gallery");
                Ok(added)
            }
            Err(e) => {
                tracing::error!("Failed to add gallery video: {}", e);
                Err(self.reject(e))
            }
        }
    }

    pub async fn delete_gallery_video(&mut self, id: i64) -> ClientResult<()> {
        self.require_profile()?;

        if let Err(e) = self.api.delete_gallery_video(id).await {
            tracing::error!("Failed to delete gallery video {}: {}", id, e);
            return Err(self.reject(e));
        }

        self.gallery_videos.retain(|video| video.id != id);
        Ok(())
    }
}
