use desk_ngin::data_structures::texture::{mip_chain, mip_level_count};
use image::{DynamicImage, Rgba, RgbaImage};

#[test]
fn mip_chain_halves_down_to_one_texel() {
    let img = DynamicImage::new_rgba8(5, 3);
    let levels = mip_chain(&img).unwrap();

    let sizes: Vec<_> = levels.iter().map(|level| level.dimensions()).collect();
    assert_eq!(sizes, [(5, 3), (2, 1), (1, 1)]);
    assert_eq!(levels.len() as u32, mip_level_count(5, 3));
}

#[test]
fn level_count_follows_the_longest_side() {
    assert_eq!(mip_level_count(1, 1), 1);
    assert_eq!(mip_level_count(256, 256), 9);
    assert_eq!(mip_level_count(128, 32), 8);
    assert_eq!(mip_level_count(0, 0), 1);
}

#[test]
fn images_are_flipped_so_v_zero_is_the_bottom() {
    let mut img = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255]));
    img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
    img.put_pixel(1, 0, Rgba([255, 0, 0, 255]));

    let levels = mip_chain(&DynamicImage::ImageRgba8(img)).unwrap();
    assert_eq!(levels[0].get_pixel(0, 0), &Rgba([0, 0, 255, 255]));
    assert_eq!(levels[0].get_pixel(0, 1), &Rgba([255, 0, 0, 255]));
}

#[test]
fn empty_images_are_rejected() {
    assert!(mip_chain(&DynamicImage::new_rgba8(0, 4)).is_err());
}

#[test]
fn bundled_textures_decode() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
    for (path, _) in desk_ngin::scene::SCENE_TEXTURES {
        let bytes = std::fs::read(dir.join(path)).unwrap();
        let img = image::load_from_memory(&bytes).unwrap();
        let levels = mip_chain(&img).unwrap();
        assert_eq!(levels.last().map(|l| l.dimensions()), Some((1, 1)), "{path}");
    }
}
