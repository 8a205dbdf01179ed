use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use courier_core::{Attachment, AttachmentKey, AttachmentMap, MimeTable};
use courier_provider::{FileSource, ProviderError};
use futures::StreamExt;
use thiserror::Error;
use tracing::{debug, info, warn};

/// A single attachment that could not be processed. Always recovered
/// locally: the URL is skipped and the rest of the batch continues.
#[derive(Debug, Error)]
#[error("failed to fetch attachment {url}: {source}")]
pub struct AttachmentError {
    pub url: String,
    #[source]
    pub source: ProviderError,
}

/// Fetches, types, and base64-encodes attachment URLs.
pub struct AttachmentProcessor {
    source: Arc<dyn FileSource>,
    mime_types: MimeTable,
    max_concurrent: usize,
}

impl AttachmentProcessor {
    pub fn new(source: Arc<dyn FileSource>, mime_types: MimeTable, max_concurrent: usize) -> Self {
        Self {
            source,
            mime_types,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Process every non-blank URL.
    ///
    /// Keys follow each URL's position among the non-blank entries, so a
    /// failed URL leaves a gap (`file1`, `file3`) rather than shifting the
    /// keys of later files. An empty map means every URL failed.
    pub async fn process<S: AsRef<str>>(&self, urls: &[S]) -> AttachmentMap {
        let urls: Vec<&str> = urls
            .iter()
            .map(|url| url.as_ref().trim())
            .filter(|url| !url.is_empty())
            .collect();

        let results: Vec<_> = futures::stream::iter(urls.iter().enumerate())
            .map(|(index, url)| async move {
                let key = AttachmentKey::from_index(index);
                (key, self.process_one(key, url).await)
            })
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let mut attachments = AttachmentMap::new();
        for (key, result) in results {
            match result {
                Ok(attachment) => {
                    debug!(%key, name = %attachment.name, "attachment processed");
                    attachments.insert(key, attachment);
                }
                Err(err) => warn!(%key, error = %err, "skipping attachment"),
            }
        }

        info!(
            requested = urls.len(),
            processed = attachments.len(),
            "attachments processed"
        );
        attachments
    }

    async fn process_one(&self, key: AttachmentKey, url: &str) -> Result<Attachment, AttachmentError> {
        let bytes = self
            .source
            .fetch(url)
            .await
            .map_err(|source| AttachmentError {
                url: url.to_owned(),
                source,
            })?;

        let extension = file_extension(url);
        let name = match &extension {
            Some(ext) => format!("anexo{}.{ext}", key.position()),
            None => format!("anexo{}", key.position()),
        };
        let content_type = self
            .mime_types
            .lookup(extension.as_deref().unwrap_or_default())
            .to_owned();

        Ok(Attachment {
            name,
            content_type,
            content: BASE64.encode(&bytes),
        })
    }
}

/// The path portion of a URL, without scheme, host, query, or fragment.
fn url_path(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let url = &url[..end];
    match url.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("", |i| &rest[i..]),
        None => url,
    }
}

/// Last path segment of a URL, ignoring any query string.
pub fn file_name(url: &str) -> &str {
    url_path(url).rsplit('/').next().unwrap_or_default()
}

/// Lower-case extension of the URL's file name, if it has one.
pub fn file_extension(url: &str) -> Option<String> {
    let (_, ext) = file_name(url).rsplit_once('.')?;
    (!ext.is_empty()).then(|| ext.to_ascii_lowercase())
}
