use std::path::{Component, Path, PathBuf};

use crate::error::ClipResult;
use crate::markdown_converter::{ClippedDocument, ImageDownload};
use crate::resource_fetch::ResourceFetcher;

/// Save a clipped document and its images under `output_dir`
///
/// The Markdown goes to `output_dir/<folder>/<filename>`. Every entry of the
/// document's image list is fetched and written next to it, at the relative
/// filename the Markdown refers to. Image failures are logged, never fatal.
///
/// # Returns
///
/// * `ClipResult<PathBuf>` - Path of the written Markdown file
pub async fn save_clipped_document<F>(
    document: &ClippedDocument,
    output_dir: &Path,
    fetcher: &F,
) -> ClipResult<PathBuf>
where
    F: ResourceFetcher,
{
    let path = output_dir.join(document.relative_path());
    let dir = path.parent().unwrap_or(output_dir).to_path_buf();

    tokio::fs::create_dir_all(&dir).await?;
    tokio::fs::write(&path, document.markdown.as_bytes()).await?;

    let mut saved = 0usize;
    for image in &document.image_list {
        match save_image(image, &dir, fetcher).await {
            Ok(()) => saved += 1,
            Err(e) => log::warn!("Skipping image {}: {e}", image.url),
        }
    }

    log::debug!(
        "Saved markdown to {} ({} of {} images)",
        path.display(),
        saved,
        document.image_list.len()
    );

    Ok(path)
}

async fn save_image<F>(image: &ImageDownload, dir: &Path, fetcher: &F) -> ClipResult<()>
where
    F: ResourceFetcher,
{
    let relative = Path::new(&image.filename);
    if relative
        .components()
        .any(|component| !matches!(component, Component::Normal(_)))
    {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("image filename escapes the output folder: {}", image.filename),
        )
        .into());
    }

    let resource = fetcher.fetch(&image.url).await?;
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, &resource.bytes).await?;
    Ok(())
}
