//! Renders the desk offscreen. Needs a GPU adapter, so it only runs with
//! `--features integration-tests`.
#![cfg(feature = "integration-tests")]

use std::path::PathBuf;

use desk_ngin::{
    Frame, SceneManager, SceneRenderer,
    camera::{Camera, Projection},
    config::CameraConfig,
    context::{mk_instance, request_device},
    data_structures::{texture::Texture, texture_registry::TextureError},
    render::RenderTarget,
    scene::{SCENE_TEXTURES, desk::DRAWS_PER_FRAME},
};
use instant::Duration;

const SIZE: u32 = 256;
const CLEAR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

fn asset_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

async fn gpu() -> (wgpu::Device, wgpu::Queue) {
    let instance = mk_instance();
    let (_, device, queue) = request_device(&instance, None).await.unwrap();
    (device, queue)
}

async fn read_back(device: &wgpu::Device, buffer: &wgpu::Buffer) -> Vec<u8> {
    let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
    let slice = buffer.slice(..);
    slice.map_async(wgpu::MapMode::Read, move |result| {
        tx.send(result).unwrap();
    });
    device
        .poll(wgpu::PollType::Wait {
            submission_index: None,
            timeout: Some(Duration::from_secs(3)),
        })
        .unwrap();
    rx.receive().await.unwrap().unwrap();
    let data = slice.get_mapped_range().to_vec();
    buffer.unmap();
    data
}

#[tokio::test]
async fn prepare_scene_loads_every_texture() {
    let (device, queue) = gpu().await;
    let mut scene = SceneManager::new();
    scene.prepare_scene(&device, &queue, &asset_root()).await;

    assert_eq!(scene.textures().len(), SCENE_TEXTURES.len());
    assert_eq!(scene.texture_bind_groups().len(), SCENE_TEXTURES.len());
    for (slot, (_, tag)) in SCENE_TEXTURES.iter().enumerate() {
        assert_eq!(scene.find_texture_slot(tag), Some(slot));
    }
    let desk = scene.find_texture_id("deskTexture").unwrap();
    assert!(desk.mip_level_count > 1);

    scene.destroy_textures();
    assert!(scene.textures().is_empty());
    assert!(scene.texture_bind_groups().is_empty());
}

#[tokio::test]
async fn failed_texture_loads_are_reported() {
    let (device, queue) = gpu().await;
    let root = asset_root();
    let mut scene = SceneManager::new();

    let missing = scene
        .try_create_texture(&device, &queue, &root, "textures/missing.png", "missing")
        .await;
    assert!(matches!(missing, Err(TextureError::Decode { .. })));
    assert!(!scene.create_texture(&device, &queue, &root, "textures/missing.png", "missing").await);

    let slot = scene
        .try_create_texture(&device, &queue, &root, "textures/mug_texture.png", "mugTexture")
        .await
        .unwrap();
    assert_eq!(slot, 0);
    let again = scene
        .try_create_texture(&device, &queue, &root, "textures/desk_texture.png", "mugTexture")
        .await;
    assert!(matches!(again, Err(TextureError::DuplicateTag { slot: 0, .. })));
    assert_eq!(scene.textures().len(), 1);
}

#[tokio::test]
async fn renders_the_desk_over_the_clear_colour() {
    let (device, queue) = gpu().await;
    let mut scene = SceneManager::new();
    scene.prepare_scene(&device, &queue, &asset_root()).await;

    let format = Texture::COLOR_FORMAT;
    let target = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("offscreen target"),
        size: wgpu::Extent3d {
            width: SIZE,
            height: SIZE,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::COPY_SRC | wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = target.create_view(&wgpu::TextureViewDescriptor::default());
    let depth = Texture::create_depth_texture(&device, [SIZE, SIZE], "offscreen depth");

    let config = CameraConfig::default();
    let camera = Camera::from_config(&config);
    let projection = Projection::from_config(SIZE, SIZE, &config);

    let mut frame = Frame::new();
    frame.begin();
    camera.apply_uniforms(&projection, &mut frame);
    scene.render_scene(&mut frame, 0.0);
    assert_eq!(frame.len(), DRAWS_PER_FRAME);

    let mut renderer = SceneRenderer::new(&device, &queue, format);
    let output = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("readback"),
        size: (4 * SIZE * SIZE) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("test encoder"),
    });
    renderer.render(
        &device,
        &queue,
        &mut encoder,
        RenderTarget {
            color: &view,
            depth: &depth.view,
        },
        CLEAR,
        &frame,
        scene.meshes(),
        scene.texture_bind_groups(),
    );
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            aspect: wgpu::TextureAspect::All,
            texture: &target,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &output,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * SIZE),
                rows_per_image: Some(SIZE),
            },
        },
        wgpu::Extent3d {
            width: SIZE,
            height: SIZE,
            depth_or_array_layers: 1,
        },
    );
    queue.submit(std::iter::once(encoder.finish()));

    let pixels = read_back(&device, &output).await;
    let background = [0u8, 0, 0, 255];
    let covered = pixels
        .chunks_exact(4)
        .filter(|pixel| *pixel != background)
        .count();
    let total = (SIZE * SIZE) as usize;
    assert!(covered > total / 4, "only {covered} of {total} pixels were drawn");

    // the desk plane fills the bottom centre of the view
    let row = SIZE as usize * 3 / 4;
    let centre = (row * SIZE as usize + SIZE as usize / 2) * 4;
    assert_ne!(&pixels[centre..centre + 4], &background);
}
