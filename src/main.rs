use desk_ngin::{SceneConfig, flow};

fn main() -> anyhow::Result<()> {
    flow::run(SceneConfig::from_env())
}
