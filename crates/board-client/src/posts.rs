//! Post endpoints (`/posts`).

use board_model::{Post, PostUpdate, VideoUpload};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::api::{ApiClient, MessageResponse};
use crate::error::ApiResult;

impl ApiClient {
    /// All posts visible to the session, as filtered by the service.
    #[instrument(skip(self))]
    pub async fn list_posts(&self) -> ApiResult<Vec<Post>> {
        self.get_json("/posts").await
    }

    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: i64) -> ApiResult<Post> {
        self.get_json(&format!("/posts/{}", post_id)).await
    }

    /// Apply a partial update. Absent fields are left alone.
    #[instrument(skip(self, update))]
    pub async fn update_post(&self, post_id: i64, update: &PostUpdate) -> ApiResult<Post> {
        update.validate()?;
        self.send_json(Method::PUT, &format!("/posts/{}", post_id), update)
            .await
    }

    /// Toggle public visibility.
    pub async fn set_visibility(&self, post_id: i64, is_public: bool) -> ApiResult<Post> {
        self.update_post(post_id, &PostUpdate::visibility(is_public))
            .await
    }

    /// Delete a post and its video.
    #[instrument(skip(self))]
    pub async fn delete_post(&self, post_id: i64) -> ApiResult<MessageResponse> {
        self.send_empty(Method::DELETE, &format!("/posts/{}", post_id))
            .await
    }

    /// Upload a video as a new post.
    ///
    /// The upload is consumed so its content moves into the request body.
    #[instrument(skip(self, upload), fields(file = %upload.file_name, size = upload.size()))]
    pub async fn upload_post(&self, upload: VideoUpload) -> ApiResult<Post> {
        upload.validate()?;
        debug!("Uploading {} ({} bytes)", upload.file_name, upload.size());

        let form = upload_form(upload)?;
        let response = self
            .request(Method::POST, "/posts")
            .multipart(form)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Upload a video, publishing simulated progress (0-100) on `progress`.
    pub async fn upload_post_with_progress(
        &self,
        upload: VideoUpload,
        progress: &watch::Sender<u8>,
    ) -> ApiResult<Post> {
        crate::progress::track(progress, self.upload_post(upload)).await
    }
}

fn upload_form(upload: VideoUpload) -> ApiResult<Form> {
    let mut form = Form::new().text("title", upload.trimmed_title().to_string());

    if let Some(description) = upload.trimmed_description() {
        form = form.text("description", description.to_string());
    }

    let is_public = if upload.is_public { "true" } else { "false" };
    let mime = board_model::post::content_type_for(&upload.file_name);
    let video = Part::bytes(upload.content)
        .file_name(upload.file_name)
        .mime_str(mime)?;

    Ok(form.text("is_public", is_public).part("video", video))
}
