//! Whole cycle tests of the autonomy manager using synthetic frames.

use comms_if::eqpt::telem::RoverTelem;
use explore_lib::auto::{
    map::{GridCell, MapLayer},
    nav::NavMode,
    per::PerError,
    AutoMgr, AutoMgrError, AutoParams, TickInput,
};
use image::{Rgb, RgbImage};
use util::{archive::Archived, module::State};

fn telem(time_s: f64, vel_ms: f64) -> RoverTelem {
    RoverTelem {
        time_s,
        pos_x: 100.0,
        pos_y: 100.0,
        yaw_deg: 0.0,
        vel_ms,
        ..Default::default()
    }
}

fn bright_frame() -> RgbImage {
    RgbImage::from_pixel(320, 160, Rgb([220, 210, 200]))
}

fn dark_frame() -> RgbImage {
    RgbImage::from_pixel(320, 160, Rgb([50, 40, 30]))
}

fn auto_mgr() -> AutoMgr {
    AutoMgr::new(AutoParams::default()).expect("default params are valid")
}

#[test]
fn test_level_tick_updates_map_and_drives() -> Result<(), AutoMgrError> {
    let mut mgr = auto_mgr();

    let (dems, report) = mgr.proc(&TickInput {
        telem: telem(0.0, 0.5),
        frame: bright_frame(),
    })?;

    assert!(report.map_updated);
    assert!(report.num_nav_pixels > 500);

    // The map is updated before the bias is applied, so everything seen counts as explored
    assert_eq!(report.num_explored, report.num_nav_pixels);
    assert_eq!(report.num_nav_angles, 2 * report.num_nav_pixels);

    assert_eq!(mgr.nav_mode(), NavMode::Forward);
    assert_eq!(dems.throttle, 0.2);
    assert_eq!(dems.brake, 0.0);
    assert!(dems.steer_deg.abs() <= 15.0);
    assert!(!dems.send_pickup);

    // Directly ahead of the rover is navigable, nothing is an obstacle
    let map = mgr.map();
    assert!(map.get(MapLayer::Navigable, GridCell { x: 105, y: 100 }).unwrap_or(0) >= 10);
    assert_eq!(map.num_nonzero(MapLayer::Obstacle), 0);
    assert_eq!(map.num_nonzero(MapLayer::Sample), 0);

    let vision = mgr.vision_image().expect("vision image is set after a cycle");
    assert_eq!(vision.dimensions(), (320, 160));
    assert_eq!(vision.get_pixel(160, 20), &Rgb([0, 0, 255]));

    // Archivers without a session discard records
    assert!(mgr.write().is_ok());

    Ok(())
}

#[test]
fn test_tilted_tick_leaves_map_untouched() -> Result<(), AutoMgrError> {
    let mut mgr = auto_mgr();

    let mut t = telem(0.0, 0.5);
    t.roll_deg = 4.0;

    let (dems, report) = mgr.proc(&TickInput {
        telem: t,
        frame: bright_frame(),
    })?;

    assert!(!report.map_updated);
    assert_eq!(report.num_explored, 0);
    assert_eq!(report.num_nav_angles, report.num_nav_pixels);
    assert_eq!(mgr.map().num_nonzero(MapLayer::Navigable), 0);

    // Commands are still produced
    assert_eq!(dems.throttle, 0.2);

    Ok(())
}

#[test]
fn test_malformed_frame_rejected() -> Result<(), AutoMgrError> {
    let mut mgr = auto_mgr();

    mgr.proc(&TickInput {
        telem: telem(0.0, 0.5),
        frame: bright_frame(),
    })?;
    let nav_before = mgr.map().num_nonzero(MapLayer::Navigable);

    let result = mgr.proc(&TickInput {
        telem: telem(0.1, 0.5),
        frame: RgbImage::new(640, 480),
    });

    assert!(matches!(
        result,
        Err(AutoMgrError::PerError(PerError::FrameSizeMismatch(320, 160, 640, 480)))
    ));
    assert_eq!(mgr.map().num_nonzero(MapLayer::Navigable), nav_before);
    assert_eq!(mgr.nav_mode(), NavMode::Forward);

    Ok(())
}

#[test]
fn test_no_terrain_stops_then_searches() -> Result<(), AutoMgrError> {
    let mut mgr = auto_mgr();

    let (dems, report) = mgr.proc(&TickInput {
        telem: telem(0.0, 1.0),
        frame: dark_frame(),
    })?;

    assert_eq!(report.num_nav_pixels, 0);
    assert!(mgr.map().num_nonzero(MapLayer::Obstacle) > 0);
    assert_eq!(mgr.nav_mode(), NavMode::Stopped);
    assert_eq!(dems.brake, 10.0);
    assert_eq!(dems.throttle, 0.0);

    let (dems, _) = mgr.proc(&TickInput {
        telem: telem(0.1, 0.0),
        frame: dark_frame(),
    })?;

    assert_eq!(mgr.nav_mode(), NavMode::Stopped);
    assert_eq!(dems.brake, 0.0);
    assert_eq!(dems.steer_deg, -15.0);

    // Plenty of terrain in view again
    let (dems, _) = mgr.proc(&TickInput {
        telem: telem(0.2, 0.0),
        frame: bright_frame(),
    })?;

    assert_eq!(mgr.nav_mode(), NavMode::Forward);
    assert_eq!(dems.throttle, 0.2);

    Ok(())
}

#[test]
fn test_pickup_requested_when_stopped_at_sample() -> Result<(), AutoMgrError> {
    let mut mgr = auto_mgr();

    let mut t = telem(0.0, 0.0);
    t.near_sample = true;

    let (dems, _) = mgr.proc(&TickInput {
        telem: t,
        frame: dark_frame(),
    })?;
    assert!(dems.send_pickup);

    t.time_s = 0.1;
    t.picking_up = true;
    let (dems, _) = mgr.proc(&TickInput {
        telem: t,
        frame: dark_frame(),
    })?;
    assert!(!dems.send_pickup);

    Ok(())
}

#[test]
fn test_sample_is_mapped() -> Result<(), AutoMgrError> {
    let mut mgr = auto_mgr();

    // Yellow sample filling the frame
    let frame = RgbImage::from_pixel(320, 160, Rgb([200, 180, 20]));

    let (_, report) = mgr.proc(&TickInput {
        telem: telem(0.0, 0.0),
        frame,
    })?;

    assert!(report.map_updated);
    assert!(mgr.map().num_nonzero(MapLayer::Sample) > 0);

    let img = mgr.map().to_image();
    assert_eq!(img.dimensions(), (200, 200));

    Ok(())
}
