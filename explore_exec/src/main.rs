//! Exploration executable entry point.
//!
//! Replays a recorded run through the autonomy pipeline, one cycle per log row, archiving the
//! drive demands and status reports of every cycle into the session.
//!
//! # Usage
//!
//! ```text
//! explore_exec <replay_log.csv> [ground_truth.png]
//! ```
//!
//! If a ground truth map is given, the fidelity of the final occupancy map is measured against it.
//! The ground truth is a greyscale image the size of the world map where any non-black pixel is
//! navigable.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::{error, info, warn};
use ndarray::Array2;
use std::env;

// Internal
use explore_lib::{
    auto::{AutoMgr, AutoParams},
    replay::Replay,
};
use util::{
    archive::Archived,
    logger::{logger_init, LevelFilter},
    module::State,
    session::Session,
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

fn main() -> Result<(), Report> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    let session =
        Session::new("explore_exec", "sessions").wrap_err("Failed to create the session")?;

    logger_init(LevelFilter::Debug, &session).wrap_err("Failed to initialise logging")?;

    info!("Exploration Rover Replay Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    let args: Vec<String> = env::args().collect();
    let log_path = args
        .get(1)
        .ok_or_else(|| eyre!("Usage: explore_exec <replay_log.csv> [ground_truth.png]"))?;
    let ground_truth_path = args.get(2);

    // ---- LOAD PARAMETERS ----

    let params = AutoParams::load("auto.toml").wrap_err("Could not load autonomy params")?;
    let world_size = params.map.world_size;

    info!("Exec parameters loaded");

    // ---- INITIALISE MODULES ----

    let mut auto_mgr = AutoMgr::new(params).wrap_err("Failed to initialise AutoMgr")?;
    auto_mgr
        .init("auto", &session)
        .wrap_err("Failed to initialise AutoMgr archives")?;

    let replay = Replay::open(log_path).wrap_err("Failed to open the replay log")?;

    info!("Initialisation complete, starting replay\n");

    // ---- MAIN LOOP ----

    let mut num_rejected = 0usize;

    for (i, tick) in replay.ticks().enumerate() {
        let input = match tick {
            Ok(t) => t,
            Err(e) => {
                error!("Could not load cycle {}: {}", i, e);
                num_rejected += 1;
                continue;
            }
        };

        match auto_mgr.proc(&input) {
            Ok((dems, report)) => {
                info!(
                    "{:8.2} s: {} ({} nav px), throttle {:.2}, brake {:.1}, steer {:+.2} deg{}",
                    report.time_s,
                    report.nav_mode,
                    report.num_nav_pixels,
                    dems.throttle,
                    dems.brake,
                    dems.steer_deg,
                    if dems.send_pickup { ", pickup" } else { "" }
                );

                if let Err(e) = auto_mgr.write() {
                    warn!("Could not archive cycle {}: {}", i, e);
                }
            }
            // Already logged by the manager, the map and navigation state are untouched
            Err(_) => num_rejected += 1,
        }
    }

    info!(
        "Replay complete: {} cycles, {} rejected",
        replay.records().len(),
        num_rejected
    );

    // ---- OUTPUTS ----

    let map = auto_mgr.map();

    map.to_image()
        .save(session.session_root.join("occupancy_map.png"))
        .wrap_err("Could not save the occupancy map image")?;

    if let Some(img) = auto_mgr.vision_image() {
        img.save(session.session_root.join("last_vision.png"))
            .wrap_err("Could not save the vision image")?;
    }

    session.save("occupancy_map.json", map.clone());

    if let Some(path) = ground_truth_path {
        let gt_img = image::open(path)
            .wrap_err_with(|| format!("Could not open ground truth {}", path))?
            .to_luma8();

        if gt_img.dimensions() != (world_size as u32, world_size as u32) {
            return Err(eyre!(
                "Ground truth is {}x{} but the world map is {}x{}",
                gt_img.width(),
                gt_img.height(),
                world_size,
                world_size
            ));
        }

        let ground_truth = Array2::from_shape_fn((world_size, world_size), |(row, col)| {
            gt_img.get_pixel(col as u32, row as u32)[0] > 0
        });

        let fidelity = map
            .fidelity(&ground_truth)
            .wrap_err("Could not compare the map to the ground truth")?;

        info!(
            "Map fidelity: {}",
            serde_json::to_string(&fidelity).wrap_err("Could not serialise the map fidelity")?
        );
    }

    session.exit();

    Ok(())
}
