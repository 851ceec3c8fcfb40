use std::path::Path;

use crate::{data_structures::texture::Texture, resources::load_binary};

/// Read and decode one texture file below `asset_root`.
pub async fn load_texture(
    asset_root: &Path,
    file_name: &str,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<Texture> {
    let data = load_binary(asset_root, file_name).await?;
    Texture::from_bytes(device, queue, &data, file_name)
}

/// Read several files concurrently. Results keep the order of `file_names`.
pub async fn load_many(
    asset_root: &Path,
    file_names: &[&str],
) -> Vec<anyhow::Result<Vec<u8>>> {
    let reads = file_names
        .iter()
        .map(|file_name| load_binary(asset_root, file_name));
    futures::future::join_all(reads).await
}
