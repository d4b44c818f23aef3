//! # AutoMgr module
//!
//! This module implements the [`AutoMgr`], which is responsible for running one full cycle of the
//! autonomy pipeline:
//!
//! 1. Perception of the camera frame
//! 2. Occupancy map accumulation
//! 3. Exploration bias and conversion of the navigable terrain to polar form
//! 4. Navigation control
//!
//! The manager owns the occupancy map and the navigation state for the lifetime of the mission.
//! A cycle which fails does so before either has been modified.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::{drive::DriveDems, telem::RoverTelem};
use image::RgbImage;
use log::{debug, error};
use serde::Serialize;

use super::{
    loc::Pose,
    map::{MapAccumulator, MapError, OccupancyMap},
    nav::{NavCtrl, NavError, NavInput, NavMode},
    per::{explored_rover_coords, to_polar, PerError, PerMgr, WorldTransform},
    AutoParams,
};
use util::{
    archive::{Archived, Archiver},
    module::State,
    params::LoadError,
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Autonomy Manager
pub struct AutoMgr {
    params: AutoParams,

    per: PerMgr,
    accumulator: MapAccumulator,
    nav: NavCtrl,

    /// Global occupancy map, describing all terrain previously observed by the rover.
    map: OccupancyMap,

    /// Classification overlay of the most recent frame
    vision_image: Option<RgbImage>,

    dems: DriveDems,
    arch_dems: Archiver,

    report: AutoStatusReport,
    arch_report: Archiver,
}

/// Input data for a single cycle.
#[derive(Clone)]
pub struct TickInput {
    pub telem: RoverTelem,

    /// Raw forward camera frame
    pub frame: RgbImage,
}

/// Status report for a single cycle.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct AutoStatusReport {
    pub time_s: f64,

    /// Number of navigable pixels in the frame
    pub num_nav_pixels: usize,

    /// Number of navigable pixels in already explored map cells
    pub num_explored: usize,

    pub map_updated: bool,

    /// Mean distance of the navigable terrain (including the exploration bias)
    ///
    /// Units: rectified pixels
    pub mean_nav_dist_px: f64,

    pub num_nav_angles: usize,
    pub mean_nav_angle_deg: f64,

    pub nav_mode: &'static str,
    pub in_recovery: bool,
    pub goal_yaw_deg: Option<f64>,
    pub override_active: bool,
    pub recovery_abandoned: bool,

    pub diag_sampled: bool,
    pub mean_vel_ms: f64,
    pub mean_steer_deg: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors that can occur in the autonomy manager.
#[derive(Debug, thiserror::Error)]
pub enum AutoMgrError {
    #[error("Failed to load AutoParams: {0:?}")]
    ParamLoadError(LoadError),

    #[error("Perception error: {0}")]
    PerError(#[from] PerError),

    #[error("Map error: {0}")]
    MapError(#[from] MapError),

    #[error("Navigation error: {0}")]
    NavError(#[from] NavError),

    #[error("Could not open the {0} archive: {1}")]
    ArchiveInitError(&'static str, String),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl AutoMgr {
    /// Create a new manager, validating the parameters of every module.
    pub fn new(params: AutoParams) -> Result<Self, AutoMgrError> {
        let per = PerMgr::new(params.per.clone())?;
        let accumulator = MapAccumulator::new(params.map.clone())?;
        let nav = NavCtrl::new(params.nav.clone())?;

        Ok(Self {
            map: OccupancyMap::new(params.map.world_size),
            per,
            accumulator,
            nav,
            vision_image: None,
            dems: DriveDems::default(),
            arch_dems: Archiver::default(),
            report: AutoStatusReport::default(),
            arch_report: Archiver::default(),
            params,
        })
    }

    /// Create a new manager from a parameter file in the software root's params directory.
    pub fn from_param_file(param_file_path: &str) -> Result<Self, AutoMgrError> {
        let params = AutoParams::load(param_file_path).map_err(AutoMgrError::ParamLoadError)?;

        Self::new(params)
    }

    pub fn params(&self) -> &AutoParams {
        &self.params
    }

    pub fn map(&self) -> &OccupancyMap {
        &self.map
    }

    pub fn vision_image(&self) -> Option<&RgbImage> {
        self.vision_image.as_ref()
    }

    pub fn nav_mode(&self) -> NavMode {
        self.nav.mode()
    }
}

impl State for AutoMgr {
    type InitData = &'static str;
    type InitError = AutoMgrError;

    type InputData = TickInput;
    type OutputData = DriveDems;
    type StatusReport = AutoStatusReport;
    type ProcError = AutoMgrError;

    /// Open the archives.
    ///
    /// Expected init data is the archive directory relative to the session's archive root.
    fn init(&mut self, init_data: Self::InitData, session: &Session) -> Result<(), Self::InitError> {
        self.arch_dems = Archiver::from_path(session, format!("{}/drive_dems.csv", init_data))
            .map_err(|e| AutoMgrError::ArchiveInitError("drive_dems", e.to_string()))?;
        self.arch_report = Archiver::from_path(session, format!("{}/status_report.csv", init_data))
            .map_err(|e| AutoMgrError::ArchiveInitError("status_report", e.to_string()))?;

        Ok(())
    }

    /// Run one cycle of the autonomy pipeline.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        let telem = &input_data.telem;
        let pose = Pose::from(telem);
        let tf = WorldTransform::new(&pose, self.accumulator.params());

        // ---- PERCEPTION ----

        let perception = match self.per.process(&input_data.frame, &tf) {
            Ok(p) => p,
            Err(e) => {
                error!("Cycle at {:.2} s rejected: {}", telem.time_s, e);
                return Err(e.into());
            }
        };

        // ---- MAPPING ----

        let map_updated = self.accumulator.accumulate(
            &mut self.map,
            &pose,
            &perception.obstacle_cells,
            &perception.sample_cells,
            &perception.nav_cells,
        )?;

        // ---- EXPLORATION BIAS ----

        // Terrain in explored cells is counted twice, explored points first
        let explored = explored_rover_coords(&self.map, &perception.nav_world, &tf);
        let (nav_dists, nav_angles) = to_polar(explored.iter().chain(perception.nav_rover.iter()));

        debug!(
            "{} navigable pixels, {} in explored cells",
            perception.nav_rover.len(),
            explored.len()
        );

        // ---- NAVIGATION ----

        let (dems, nav_report) = self.nav.step(&NavInput {
            time_s: telem.time_s,
            pose: &pose,
            nav_angles_rad: &nav_angles,
            near_sample: telem.near_sample,
            picking_up: telem.picking_up,
        });

        self.vision_image = Some(perception.classification.vision_image());

        self.dems = dems;
        self.report = AutoStatusReport {
            time_s: telem.time_s,
            num_nav_pixels: perception.nav_rover.len(),
            num_explored: explored.len(),
            map_updated,
            mean_nav_dist_px: util::maths::mean(nav_dists.iter().copied()).unwrap_or(0.0),
            num_nav_angles: nav_report.num_nav_angles,
            mean_nav_angle_deg: nav_report.mean_nav_angle_deg,
            nav_mode: nav_report.mode,
            in_recovery: nav_report.in_recovery,
            goal_yaw_deg: nav_report.goal_yaw_deg,
            override_active: nav_report.override_active,
            recovery_abandoned: nav_report.recovery_abandoned,
            diag_sampled: nav_report.diag_sampled,
            mean_vel_ms: nav_report.mean_vel_ms,
            mean_steer_deg: nav_report.mean_steer_deg,
        };

        Ok((self.dems, self.report))
    }
}

impl Archived for AutoMgr {
    fn write(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.arch_dems.serialise(self.dems)?;
        self.arch_report.serialise(self.report)?;

        Ok(())
    }
}
