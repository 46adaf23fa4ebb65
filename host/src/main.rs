use {
    clap::Parser,
    color_eyre::Report,
    eyre::WrapErr as _,
    std::path::PathBuf,
    tracing_subscriber::{
        fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
        EnvFilter,
    },
    tracking_host::{log_to_tracing, run, DynamicPlugin},
};

/// Loads a tracking plugin and drives it through its lifecycle.
#[derive(Debug, Parser)]
#[command(name = "tracking-host", version)]
struct Args {
    /// Path to the plugin shared library.
    plugin: PathBuf,

    /// Number of `Refresh` + `GetUserSkeleton` frames to run.
    #[arg(long, default_value_t = 1)]
    frames: usize,
}

fn install_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(tracing_error::ErrorLayer::default())
        .init();
}

fn main() -> Result<(), Report> {
    install_tracing();
    color_eyre::install()?;

    let args = Args::parse();

    let plugin = unsafe { DynamicPlugin::load(&args.plugin) }
        .wrap_err("Failed to load tracking plugin")?;

    let report =
        unsafe { run(plugin.api(), Some(log_to_tracing), args.frames) }
            .wrap_err("Plugin reported invalid data")?;

    tracing::info!(
        "{} by {} ({} tracked points)",
        report.module_name,
        report.publisher_name,
        report.tracked_points,
    );
    tracing::info!("Config: {}", report.config_path);
    tracing::info!(
        "Primary joint: {:?}, locomotion references: {:?}",
        report.primary_joint,
        report.locomotion_joints,
    );
    tracing::info!(
        "Center: {:?} {:?}",
        report.center_position,
        report.center_rotation,
    );

    for (id, joint) in report.skeleton.iter() {
        let p = joint.position;
        let r = joint.rotation;
        tracing::info!(
            "{:>14} pos ({:.3}, {:.3}, {:.3}) rot ({:.3}, {:.3}, {:.3}, {:.3})",
            id.name(),
            p.x,
            p.y,
            p.z,
            r.w,
            r.x,
            r.y,
            r.z,
        );
        if !r.is_unit(1e-6) {
            tracing::warn!("{} rotation is not normalized", id.name());
        }
    }

    if report.tracking_loss_frames > 0 {
        tracing::warn!(
            "Tracking lost in {} of {} frames",
            report.tracking_loss_frames,
            report.frames,
        );
    }

    Ok(())
}
