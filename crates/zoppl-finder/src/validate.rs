//! Drops products that cannot be shown as a static image.

use zoppl_core::Product;

/// Segmented video playlists cannot render as an image.
const VIDEO_PLAYLIST_MARKER: &str = ".m3u8";

/// Returns `true` when the product has a non-empty image reference that is
/// not a video playlist.
#[must_use]
pub fn is_displayable(product: &Product) -> bool {
    product
        .image_url
        .as_deref()
        .is_some_and(|url| !url.is_empty() && !url.contains(VIDEO_PLAYLIST_MARKER))
}

/// Keeps displayable products, preserving their relative order.
#[must_use]
pub fn validate_products(products: Vec<Product>) -> Vec<Product> {
    let total = products.len();
    let valid: Vec<Product> = products.into_iter().filter(is_displayable).collect();
    if valid.len() < total {
        tracing::debug!(
            kept = valid.len(),
            dropped = total - valid.len(),
            "dropped products without a displayable image"
        );
    }
    valid
}
