use std::path::PathBuf;

use base64::{Engine, engine::general_purpose::STANDARD};
use sha3::{Digest, Sha3_224};

/// Stores an uploaded recipe image and returns the URL it is served from.
#[async_trait::async_trait]
pub trait ImageStore: Send + Sync {
    async fn store(&self, encoded: &str) -> foodgram_shared::Result<String>;

    /// Delete the file behind a URL returned by `store`. Unknown URLs are
    /// ignored.
    async fn remove(&self, url: &str) -> foodgram_shared::Result<()>;
}

/// Writes images under `<root>/recipes/`, named by the SHA3-224 digest of
/// their content so identical uploads share one file.
#[derive(Clone)]
pub struct FsImageStore {
    root: PathBuf,
    url: String,
}

impl FsImageStore {
    pub fn new(root: impl Into<PathBuf>, url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            url: url.into(),
        }
    }
}

#[async_trait::async_trait]
impl ImageStore for FsImageStore {
    async fn store(&self, encoded: &str) -> foodgram_shared::Result<String> {
        let image = decode(encoded)?;
        let digest = format!("{:x}", Sha3_224::digest(&image.data));
        let file_name = format!("{digest}.{}", image.extension);

        let dir = self.root.join("recipes");
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(anyhow::Error::from)?;
        tokio::fs::write(dir.join(&file_name), &image.data)
            .await
            .map_err(anyhow::Error::from)?;

        tracing::debug!(file_name = %file_name, size = image.data.len(), "image stored");

        Ok(format!(
            "{}/recipes/{file_name}",
            self.url.trim_end_matches('/')
        ))
    }

    async fn remove(&self, url: &str) -> foodgram_shared::Result<()> {
        let prefix = format!("{}/recipes/", self.url.trim_end_matches('/'));
        let Some(file_name) = url.strip_prefix(&prefix) else {
            return Ok(());
        };

        if file_name.is_empty() || file_name.contains(['/', '\\']) || file_name.starts_with('.') {
            return Ok(());
        }

        match tokio::fs::remove_file(self.root.join("recipes").join(file_name)).await {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(anyhow::Error::from(err).into()),
        }

        tracing::debug!(file_name = %file_name, "image removed");

        Ok(())
    }
}

#[derive(Debug)]
struct DecodedImage {
    data: Vec<u8>,
    extension: &'static str,
}

/// Accepts `data:<mime>;base64,<payload>` or a bare base64 payload.
fn decode(encoded: &str) -> foodgram_shared::Result<DecodedImage> {
    let (mime, payload) = match encoded.strip_prefix("data:") {
        Some(rest) => match rest.split_once(";base64,") {
            Some((mime, payload)) => (Some(mime), payload),
            None => foodgram_shared::invalid!("image", "invalid", "Invalid image data."),
        },
        None => (None, encoded),
    };

    let extension = match mime {
        Some(mime) if !mime.starts_with("image/") => {
            foodgram_shared::invalid!("image", "invalid", "Unsupported image type {}.", mime)
        }
        Some(mime) => match mime_guess::get_mime_extensions_str(mime) {
            Some(exts) if exts.contains(&"jpg") => "jpg",
            Some(exts) => exts.first().copied().unwrap_or("png"),
            None => "png",
        },
        None => "png",
    };

    let Ok(data) = STANDARD.decode(payload.trim()) else {
        foodgram_shared::invalid!("image", "invalid", "Invalid image data.");
    };

    if data.is_empty() {
        foodgram_shared::invalid!("image", "required", "Image is required.");
    }

    Ok(DecodedImage { data, extension })
}
