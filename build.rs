use anyhow::*;
use fs_extra::copy_items;
use fs_extra::dir::CopyOptions;
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    // Rerun when the textures change so the copy next to the binary stays fresh.
    println!("cargo:rerun-if-changed=assets/textures");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let assets_src = manifest_dir.join("assets");
    if !assets_src.exists() {
        return Ok(());
    }

    // OUT_DIR is target/<profile>/build/<pkg>/out, the binary lives in target/<profile>
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let Some(profile_dir) = out_dir.ancestors().nth(3) else {
        return Ok(());
    };

    let mut copy_options = CopyOptions::new();
    copy_options.overwrite = true;
    copy_items(&[assets_src], profile_dir, &copy_options)?;

    Ok(())
}
