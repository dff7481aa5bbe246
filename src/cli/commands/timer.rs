use crate::cli::parser::{Commands, TimerCmd};
use crate::core::services::Services;
use crate::core::settings::SettingsLogic;
use crate::core::timer::TimerLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, location_notice, success};
use crate::utils::formatting::{fmt_duration, fmt_elapsed, fmt_ts};

pub fn handle(cmd: &Commands, svc: &Services) -> AppResult<()> {
    let Commands::Timer { action } = cmd else {
        return Ok(());
    };
    let actor = svc.current_actor()?;
    let geo_setting = SettingsLogic::load(svc)?.geo;

    match action {
        TimerCmd::Start { area, note, geo } => {
            let started = TimerLogic::start(svc, &actor, *area, note, geo_setting || *geo)?;
            location_notice(started.location.as_ref());
            success(format!(
                "Timer started at {}",
                fmt_ts(started.session.start)
            ));
            if let Some(fix) = started.session.geo_start {
                info(format!("Position: {}", fix.short()));
            }
        }
        TimerCmd::Stop { geo } => {
            let stopped = TimerLogic::stop(svc, &actor, geo_setting || *geo)?;
            location_notice(stopped.location.as_ref());
            success(format!(
                "Entry #{} recorded: {}",
                stopped.entry.id,
                fmt_duration(stopped.entry.duration_ms)
            ));
        }
        TimerCmd::Status => match TimerLogic::status(svc, &actor)? {
            Some(status) => println!(
                "⏱️  Running since {} in area #{} ({})",
                fmt_ts(status.session.start),
                status.session.area_id,
                fmt_elapsed(status.elapsed)
            ),
            None => info("No timer running."),
        },
    }
    Ok(())
}
