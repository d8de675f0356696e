use anyhow::Result;
use csust_electricity::{config, controller, telemetry};
use config::Config;
use controller::PollController;
use telemetry::init_tracing;
use tracing::{info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let cfg = Config::load()?;

    for (field, value) in [
        ("building_id", &cfg.sensor.building_id),
        ("room_id", &cfg.sensor.room_id),
    ] {
        if value.starts_with("__SET_VIA_ENV") {
            anyhow::bail!(
                "CONFIG ERROR: sensor.{field} is not set. Edit config/default.toml or export CSUST__SENSOR__{}",
                field.to_uppercase()
            );
        }
    }

    info!(
        name = %cfg.sensor.name,
        campus = %cfg.sensor.campus,
        building_id = %cfg.sensor.building_id,
        room_id = %cfg.sensor.room_id,
        "starting CSUST electricity sensor"
    );

    let mut ctl = PollController::from_config(&cfg)?;
    ctl.run_until(telemetry::shutdown_signal()).await;

    warn!("shutdown complete");
    Ok(())
}
