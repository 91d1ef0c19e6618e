use anyhow::Context;
use log::info;
use hydrogen::{
    animate::Animation,
    config::AnimationConfig,
    encode::FfmpegEncoder,
    schedule::reference_transitions,
};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    let config = AnimationConfig::default();
    let grid = config.grid()?;
    let schedule = config.schedule(reference_transitions()?)?;
    let ctx = config.render_context()?;
    let mut encoder
        = FfmpegEncoder::spawn(config.encode_config(&ctx))
        .context("failed to start the video encoder")?;

    info!("writing {}", config.output.display());
    let frames = Animation::new(&grid, &schedule, ctx).run(&mut encoder)?;
    info!("done: {} frames at {} fps", frames, config.fps);
    Ok(())
}
