//! Implementations for the NavCtrl state machine

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::drive::DriveDems;
use log::{debug, info, warn};
use nalgebra::Vector2;
use serde::Serialize;

use super::{NavError, NavParams, RollingHistory};
use crate::auto::loc::Pose;
use util::maths::{clamp, get_ang_dist_deg, mean, rem_euclid};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Navigation controller.
#[derive(Debug, Clone)]
pub struct NavCtrl {
    params: NavParams,

    mode: NavMode,

    /// Mission time at which the current recovery mode was entered
    recovery_start_s: Option<f64>,

    /// Mission time of the last self diagnosis sample
    last_diag_time_s: f64,

    vel_history: RollingHistory,
    steer_history: RollingHistory,

    /// Position of the rover on the first cycle, used to head home when circling
    start_position: Option<Vector2<f64>>,

    /// Demands persist between cycles, each mode only changes the demands it cares about
    dems: DriveDems,
}

/// Input data to navigation control.
#[derive(Debug, Clone, Copy)]
pub struct NavInput<'a> {
    /// Elapsed mission time.
    ///
    /// Units: seconds
    pub time_s: f64,

    pub pose: &'a Pose,

    /// Angles of the navigable terrain (including explored terrain bias) from the rover's forward
    /// axis, positive left.
    ///
    /// Units: radians
    pub nav_angles_rad: &'a [f64],

    /// True if the rover is within pickup range of a sample
    pub near_sample: bool,

    /// True if a sample pickup is already in progress
    pub picking_up: bool,
}

/// An in progress recovery manoeuvre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Recovery {
    /// Heading to turn to.
    ///
    /// Units: degrees
    pub goal_yaw_deg: f64,

    /// Mission time at which the rover started driving out of circular motion, once aligned with
    /// the goal heading.
    pub override_start_s: Option<f64>,
}

/// Status report for NavCtrl processing.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NavStatusReport {
    pub mode: &'static str,
    pub in_recovery: bool,
    pub goal_yaw_deg: Option<f64>,
    pub override_active: bool,
    pub num_nav_angles: usize,
    pub mean_nav_angle_deg: f64,
    pub diag_sampled: bool,
    pub mean_vel_ms: f64,
    pub mean_steer_deg: f64,
    pub recovery_abandoned: bool,
}

/// The result of stepping a single mode.
struct Transition {
    mode: NavMode,
    dems: DriveDems,
    reset_history: bool,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Navigation mode. Recovery modes hold `None` until the recovery has been set up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum NavMode {
    Forward,
    Stopped,
    Stuck(Option<Recovery>),
    CircularMotion(Option<Recovery>),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl NavMode {
    pub fn name(&self) -> &'static str {
        match self {
            NavMode::Forward => "Forward",
            NavMode::Stopped => "Stopped",
            NavMode::Stuck(_) => "Stuck",
            NavMode::CircularMotion(_) => "CircularMotion",
        }
    }

    pub fn is_recovery(&self) -> bool {
        matches!(self, NavMode::Stuck(_) | NavMode::CircularMotion(_))
    }

    pub fn recovery(&self) -> Option<Recovery> {
        match self {
            NavMode::Stuck(r) | NavMode::CircularMotion(r) => *r,
            _ => None,
        }
    }
}

impl NavCtrl {
    /// Create a new controller in `Forward` mode.
    pub fn new(params: NavParams) -> Result<Self, NavError> {
        params.validate()?;

        Ok(Self {
            mode: NavMode::Forward,
            recovery_start_s: None,
            last_diag_time_s: 0.0,
            vel_history: RollingHistory::new(params.history_len, 1.0),
            steer_history: RollingHistory::new(params.history_len, 0.0),
            start_position: None,
            dems: DriveDems::default(),
            params,
        })
    }

    pub fn mode(&self) -> NavMode {
        self.mode
    }

    pub fn params(&self) -> &NavParams {
        &self.params
    }

    /// Perform one cycle of navigation control.
    pub fn step(&mut self, input: &NavInput) -> (DriveDems, NavStatusReport) {
        let mut report = NavStatusReport {
            num_nav_angles: input.nav_angles_rad.len(),
            mean_nav_angle_deg: mean_angle_deg(input.nav_angles_rad),
            ..Default::default()
        };

        let start_position = *self.start_position.get_or_insert(input.pose.position);

        // ---- SELF DIAGNOSIS ----

        if input.time_s - self.last_diag_time_s > self.params.update_rate_s {
            self.last_diag_time_s = input.time_s;
            self.diagnose(input);
            report.diag_sampled = true;
        }

        // ---- RECOVERY TIMEOUT ----

        if let (Some(max_s), Some(start_s)) =
            (self.params.max_recovery_duration_s, self.recovery_start_s)
        {
            if self.mode.is_recovery() && input.time_s - start_s > max_s {
                warn!(
                    "{} recovery not complete after {:.1} s, abandoning",
                    self.mode.name(),
                    input.time_s - start_s
                );
                self.mode = NavMode::Forward;
                self.recovery_start_s = None;
                self.reset_history();
                report.recovery_abandoned = true;
            }
        }

        // ---- MODE PROCESSING ----

        let transition = match self.mode {
            NavMode::Forward => self.forward(input),
            NavMode::Stopped => self.stopped(input),
            NavMode::Stuck(recovery) => self.stuck(input, recovery),
            NavMode::CircularMotion(recovery) => {
                self.circular_motion(input, recovery, start_position)
            }
        };
        self.apply(transition);

        // ---- SAMPLE PICKUP ----

        self.dems.send_pickup =
            input.near_sample && input.pose.vel_ms == 0.0 && !input.picking_up;

        report.mode = self.mode.name();
        report.in_recovery = self.mode.recovery().is_some();
        report.goal_yaw_deg = self.mode.recovery().map(|r| r.goal_yaw_deg);
        report.override_active = self
            .mode
            .recovery()
            .map(|r| r.override_start_s.is_some())
            .unwrap_or(false);
        report.mean_vel_ms = self.vel_history.mean();
        report.mean_steer_deg = self.steer_history.mean();

        (self.dems, report)
    }

    /// Sample the histories and force a recovery mode if the rover is misbehaving. Recoveries in
    /// progress are not interrupted.
    fn diagnose(&mut self, input: &NavInput) {
        self.steer_history.push(self.dems.steer_deg);
        self.vel_history.push(input.pose.vel_ms);

        let mean_vel = self.vel_history.mean();
        let mean_steer = self.steer_history.mean();

        debug!(
            "Self diagnosis: mean velocity {:.3} m/s, mean steer {:.2} deg",
            mean_vel, mean_steer
        );

        if self.mode.is_recovery() {
            return;
        }

        let diagnosed = if mean_vel <= self.params.stopped_vel_ms {
            NavMode::Stuck(None)
        } else if mean_steer.abs() > self.params.circular_steer_thresh_deg {
            NavMode::CircularMotion(None)
        } else {
            return;
        };

        info!("Self diagnosis: rover is in {} state", diagnosed.name());
        self.mode = diagnosed;
        self.recovery_start_s = Some(input.time_s);
    }

    fn forward(&self, input: &NavInput) -> Transition {
        let mut dems = self.dems;

        if input.nav_angles_rad.len() >= self.params.stop_forward {
            dems.throttle = if input.pose.vel_ms < self.params.max_vel_ms {
                self.params.throttle_set
            } else {
                0.0
            };
            dems.brake = 0.0;
            dems.steer_deg = mean_angle_deg(input.nav_angles_rad);

            self.stay(dems)
        } else {
            dems.throttle = 0.0;
            dems.brake = self.params.brake_set;
            dems.steer_deg = 0.0;

            Transition {
                mode: NavMode::Stopped,
                dems,
                reset_history: false,
            }
        }
    }

    fn stopped(&self, input: &NavInput) -> Transition {
        let mut dems = self.dems;

        // Still moving, keep braking
        if input.pose.vel_ms > self.params.stopped_vel_ms {
            dems.throttle = 0.0;
            dems.brake = self.params.brake_set;
            dems.steer_deg = 0.0;

            return self.stay(dems);
        }

        if input.nav_angles_rad.len() < self.params.go_forward {
            // Turn on the spot to look for a way forward
            dems.throttle = 0.0;
            dems.brake = 0.0;
            dems.steer_deg = -self.params.steer_limit_deg;

            self.stay(dems)
        } else {
            dems.throttle = self.params.throttle_set;
            dems.brake = 0.0;
            dems.steer_deg = mean_angle_deg(input.nav_angles_rad);

            Transition {
                mode: NavMode::Forward,
                dems,
                reset_history: false,
            }
        }
    }

    fn stuck(&self, input: &NavInput, recovery: Option<Recovery>) -> Transition {
        let mut dems = self.dems;

        let recovery = match recovery {
            Some(r) => r,
            None => {
                let goal_yaw_deg =
                    rem_euclid(input.pose.yaw_deg.trunc() - self.params.stuck_turn_deg, 360.0);
                info!("Stuck recovery started, turning to {:.1} deg", goal_yaw_deg);

                dems.throttle = 0.0;
                dems.brake = 0.0;

                return Transition {
                    mode: NavMode::Stuck(Some(Recovery {
                        goal_yaw_deg,
                        override_start_s: None,
                    })),
                    dems,
                    reset_history: false,
                };
            }
        };

        let error_deg = get_ang_dist_deg(input.pose.yaw_deg, recovery.goal_yaw_deg);

        if error_deg.abs() < self.params.heading_tol_deg {
            info!("Stuck recovery complete");
            Transition {
                mode: NavMode::Forward,
                dems,
                reset_history: true,
            }
        } else {
            dems.steer_deg = error_deg;
            self.stay(dems)
        }
    }

    fn circular_motion(
        &self,
        input: &NavInput,
        recovery: Option<Recovery>,
        start_position: Vector2<f64>,
    ) -> Transition {
        let mut dems = self.dems;

        // Come to a stop before starting the recovery
        if recovery.is_none() && input.pose.vel_ms > self.params.stopped_vel_ms {
            dems.throttle = 0.0;
            dems.brake = self.params.brake_set;
            dems.steer_deg = 0.0;

            return self.stay(dems);
        }

        dems.brake = 0.0;

        let mut recovery = match recovery {
            Some(r) => r,
            None => {
                let to_start = start_position - input.pose.position;
                let goal_yaw_deg = rem_euclid(to_start.y.atan2(to_start.x).to_degrees(), 360.0);
                info!(
                    "Circular motion recovery started, turning to {:.1} deg",
                    goal_yaw_deg
                );

                return Transition {
                    mode: NavMode::CircularMotion(Some(Recovery {
                        goal_yaw_deg,
                        override_start_s: None,
                    })),
                    dems,
                    reset_history: false,
                };
            }
        };

        let error_deg = get_ang_dist_deg(input.pose.yaw_deg, recovery.goal_yaw_deg);

        if error_deg.abs() >= self.params.heading_tol_deg {
            dems.steer_deg = error_deg;
            return Transition {
                mode: NavMode::CircularMotion(Some(recovery)),
                dems,
                reset_history: false,
            };
        }

        // Aligned, drive out for the override window
        dems.throttle = self.params.throttle_set;

        match recovery.override_start_s {
            None => {
                info!("Circular motion override started");
                recovery.override_start_s = Some(input.time_s);
            }
            Some(t) if input.time_s - t > self.params.override_window_s => {
                info!("Circular motion override complete");
                return Transition {
                    mode: NavMode::Forward,
                    dems,
                    reset_history: true,
                };
            }
            Some(_) => (),
        }

        Transition {
            mode: NavMode::CircularMotion(Some(recovery)),
            dems,
            reset_history: false,
        }
    }

    fn stay(&self, dems: DriveDems) -> Transition {
        Transition {
            mode: self.mode,
            dems,
            reset_history: false,
        }
    }

    fn apply(&mut self, transition: Transition) {
        if transition.mode.name() != self.mode.name() {
            info!(
                "NavCtrl mode change: {} -> {}",
                self.mode.name(),
                transition.mode.name()
            );
        }

        if transition.reset_history {
            self.reset_history();
        }
        if !transition.mode.is_recovery() {
            self.recovery_start_s = None;
        }

        self.mode = transition.mode;
        self.dems = transition.dems;
        self.dems.steer_deg = clamp(
            self.dems.steer_deg,
            -self.params.steer_limit_deg,
            self.params.steer_limit_deg,
        );
    }

    fn reset_history(&mut self) {
        self.vel_history.reset();
        self.steer_history.reset();
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Mean of the angles in degrees, or zero if there are none.
fn mean_angle_deg(angles_rad: &[f64]) -> f64 {
    mean(angles_rad.iter().map(|a| a.to_degrees())).unwrap_or(0.0)
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    const NUM_TICKS: usize = 100;

    fn nav() -> NavCtrl {
        NavCtrl::new(NavParams::default()).expect("default params are valid")
    }

    fn angles(num: usize, deg: f64) -> Vec<f64> {
        vec![deg.to_radians(); num]
    }

    fn step(
        nav: &mut NavCtrl,
        time_s: f64,
        pose: &Pose,
        nav_angles_rad: &[f64],
    ) -> (DriveDems, NavStatusReport) {
        let (dems, report) = nav.step(&NavInput {
            time_s,
            pose,
            nav_angles_rad,
            near_sample: false,
            picking_up: false,
        });

        assert!(
            dems.steer_within(nav.params().steer_limit_deg),
            "steer {} outside limit at {} s",
            dems.steer_deg,
            time_s
        );
        assert!(!dems.is_conflicting(), "throttle and brake both set at {} s", time_s);

        (dems, report)
    }

    fn moving(x: f64, y: f64, yaw_deg: f64, vel_ms: f64) -> Pose {
        Pose {
            vel_ms,
            ..Pose::at(x, y, yaw_deg)
        }
    }

    #[test]
    fn test_forward_drives_along_mean_angle() {
        let mut nav = nav();
        let pose = moving(0.0, 0.0, 0.0, 1.0);

        let (dems, report) = step(&mut nav, 0.0, &pose, &angles(100, 5.0));
        assert_eq!(nav.mode(), NavMode::Forward);
        assert_eq!(dems.throttle, 0.2);
        assert_eq!(dems.brake, 0.0);
        assert!((dems.steer_deg - 5.0).abs() < 1e-9);
        assert_eq!(report.num_nav_angles, 100);

        // Coast at max speed
        let pose = moving(0.0, 0.0, 0.0, 2.5);
        let (dems, _) = step(&mut nav, 0.1, &pose, &angles(100, -5.0));
        assert_eq!(dems.throttle, 0.0);
        assert!((dems.steer_deg + 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_steer_always_clamped() {
        let mut nav = nav();
        let pose = moving(0.0, 0.0, 0.0, 1.0);

        let (dems, _) = step(&mut nav, 0.0, &pose, &angles(100, 80.0));
        assert_eq!(dems.steer_deg, 15.0);

        let (dems, _) = step(&mut nav, 0.1, &pose, &angles(100, -80.0));
        assert_eq!(dems.steer_deg, -15.0);
    }

    #[test]
    fn test_empty_angles_route_to_stopped() {
        let mut nav = nav();
        let pose = moving(0.0, 0.0, 0.0, 1.0);

        let (dems, _) = step(&mut nav, 0.0, &pose, &[]);
        assert_eq!(nav.mode(), NavMode::Stopped);
        assert_eq!(dems.throttle, 0.0);
        assert_eq!(dems.brake, 10.0);
        assert_eq!(dems.steer_deg, 0.0);
        assert!(!dems.is_conflicting());

        // Still moving, keep braking
        let (dems, _) = step(&mut nav, 0.1, &pose, &[]);
        assert_eq!(nav.mode(), NavMode::Stopped);
        assert_eq!(dems.brake, 10.0);
    }

    #[test]
    fn test_stopped_search_then_go() {
        let mut nav = nav();
        nav.mode = NavMode::Stopped;
        let pose = moving(0.0, 0.0, 0.0, 0.0);

        let (dems, _) = step(&mut nav, 0.0, &pose, &[]);
        assert_eq!(nav.mode(), NavMode::Stopped);
        assert_eq!(dems.steer_deg, -15.0);
        assert_eq!(dems.throttle, 0.0);
        assert_eq!(dems.brake, 0.0);

        // Not quite enough terrain to go
        let (dems, _) = step(&mut nav, 0.1, &pose, &angles(499, 3.0));
        assert_eq!(nav.mode(), NavMode::Stopped);
        assert_eq!(dems.steer_deg, -15.0);

        let (dems, _) = step(&mut nav, 0.2, &pose, &angles(500, 3.0));
        assert_eq!(nav.mode(), NavMode::Forward);
        assert_eq!(dems.throttle, 0.2);
        assert_eq!(dems.brake, 0.0);
        assert!((dems.steer_deg - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_stuck_detection_and_recovery() {
        let mut nav = nav();
        let pose = moving(10.0, 10.0, 20.7, 0.1);
        let terrain = angles(100, 0.0);

        // Drive forward without moving until the diagnosis kicks in
        let mut time_s = 0.0;
        let mut entry = None;
        for _ in 0..NUM_TICKS {
            time_s += 0.6;
            let (dems, _) = step(&mut nav, time_s, &pose, &terrain);
            if nav.mode().is_recovery() {
                entry = Some(dems);
                break;
            }
        }

        let dems = entry.expect("rover should be diagnosed as stuck");
        assert_eq!(
            nav.mode(),
            NavMode::Stuck(Some(Recovery {
                goal_yaw_deg: 350.0,
                override_start_s: None
            }))
        );
        assert_eq!(dems.throttle, 0.0);
        assert_eq!(dems.brake, 0.0);

        // Turning right towards the goal
        let pose = moving(10.0, 10.0, 10.0, 0.0);
        let (dems, report) = step(&mut nav, time_s + 0.1, &pose, &terrain);
        assert_eq!(dems.steer_deg, -15.0);
        assert!(report.in_recovery);
        assert_eq!(report.goal_yaw_deg, Some(350.0));

        let pose = moving(10.0, 10.0, 357.0, 0.0);
        let (dems, _) = step(&mut nav, time_s + 0.2, &pose, &terrain);
        assert!(matches!(nav.mode(), NavMode::Stuck(Some(_))));
        assert!((dems.steer_deg + 7.0).abs() < 1e-9);

        // Within tolerance, back to forward with fresh histories
        let pose = moving(10.0, 10.0, 352.0, 0.0);
        step(&mut nav, time_s + 0.3, &pose, &terrain);
        assert_eq!(nav.mode(), NavMode::Forward);
        assert_eq!(nav.vel_history.mean(), 1.0);
        assert_eq!(nav.steer_history.mean(), 0.0);
    }

    #[test]
    fn test_circular_motion_detection_and_recovery() {
        let mut nav = nav();

        // Start at the origin, then circle hard left somewhere else
        step(&mut nav, 0.0, &moving(0.0, 0.0, 0.0, 0.5), &angles(100, 0.0));

        let pose = moving(10.0, 10.0, 0.0, 0.5);
        let terrain = angles(100, 40.0);

        let mut time_s = 0.0;
        let mut entry = None;
        for _ in 0..NUM_TICKS {
            time_s += 0.6;
            let (dems, report) = step(&mut nav, time_s, &pose, &terrain);
            if nav.mode().is_recovery() {
                entry = Some((dems, report));
                break;
            }
        }

        let (dems, report) = entry.expect("rover should be diagnosed as circling");
        assert_eq!(nav.mode(), NavMode::CircularMotion(None));
        assert!(report.mean_steer_deg > 14.5);
        assert_eq!(dems.throttle, 0.0);
        assert_eq!(dems.brake, 10.0);
        assert_eq!(dems.steer_deg, 0.0);

        // Stopped, goal is back towards the origin
        let terrain = angles(100, 0.0);
        let stopped = moving(10.0, 10.0, 0.0, 0.0);
        let (dems, _) = step(&mut nav, time_s + 0.1, &stopped, &terrain);
        assert_eq!(dems.brake, 0.0);
        let goal = nav.mode().recovery().map(|r| r.goal_yaw_deg);
        assert!((goal.unwrap_or(0.0) - 225.0).abs() < 1e-9);

        // Turn towards the goal
        let (dems, _) = step(&mut nav, time_s + 0.2, &stopped, &terrain);
        assert_eq!(dems.steer_deg, -15.0);

        // Aligned, override starts
        let aligned = moving(10.0, 10.0, 227.0, 0.0);
        let (dems, report) = step(&mut nav, time_s + 0.3, &aligned, &terrain);
        assert_eq!(dems.throttle, 0.2);
        assert!(report.override_active);

        // Still within the override window
        let (_, report) = step(&mut nav, time_s + 5.0, &aligned, &terrain);
        assert!(report.override_active);
        assert!(nav.mode().is_recovery());

        // Override window elapsed
        step(&mut nav, time_s + 5.4, &aligned, &terrain);
        assert_eq!(nav.mode(), NavMode::Forward);
    }

    #[test]
    fn test_stuck_recovery_not_interrupted_by_circling() {
        let mut nav = nav();
        let recovery = Recovery {
            goal_yaw_deg: 180.0,
            override_start_s: None,
        };
        nav.mode = NavMode::Stuck(Some(recovery));
        nav.recovery_start_s = Some(0.0);

        // Moving and steering hard left while turning towards the goal looks like circling
        let pose = moving(0.0, 0.0, 90.0, 1.0);
        let terrain = angles(100, 0.0);

        let mut time_s = 0.0;
        for _ in 0..12 {
            time_s += 0.6;
            let (dems, report) = step(&mut nav, time_s, &pose, &terrain);
            assert!(report.diag_sampled);
            assert_eq!(dems.steer_deg, 15.0);
        }

        assert!(nav.vel_history.mean() > nav.params.stopped_vel_ms);
        assert!(nav.steer_history.mean() > nav.params.circular_steer_thresh_deg);
        assert_eq!(nav.mode(), NavMode::Stuck(Some(recovery)));
    }

    #[test]
    fn test_circular_recovery_not_interrupted_by_stuck() {
        let mut nav = nav();
        let recovery = Recovery {
            goal_yaw_deg: 180.0,
            override_start_s: None,
        };
        nav.mode = NavMode::CircularMotion(Some(recovery));
        nav.recovery_start_s = Some(0.0);

        // Turning on the spot towards the goal looks like being stuck
        let pose = moving(0.0, 0.0, 90.0, 0.0);
        let terrain = angles(100, 0.0);

        let mut time_s = 0.0;
        for _ in 0..12 {
            time_s += 0.6;
            let (dems, report) = step(&mut nav, time_s, &pose, &terrain);
            assert!(report.diag_sampled);
            assert_eq!(dems.brake, 0.0);
        }

        assert!(nav.vel_history.mean() <= nav.params.stopped_vel_ms);
        assert_eq!(nav.mode(), NavMode::CircularMotion(Some(recovery)));
    }

    #[test]
    fn test_recovery_abandoned_after_timeout() {
        let mut nav = nav();
        nav.mode = NavMode::Stuck(None);
        nav.recovery_start_s = Some(0.0);
        nav.last_diag_time_s = 100.0;

        let pose = moving(0.0, 0.0, 90.0, 0.0);
        let terrain = angles(100, 0.0);

        step(&mut nav, 1.0, &pose, &terrain);
        assert!(matches!(nav.mode(), NavMode::Stuck(Some(_))));

        let (_, report) = step(&mut nav, 20.0, &pose, &terrain);
        assert!(!report.recovery_abandoned);

        let (dems, report) = step(&mut nav, 30.5, &pose, &terrain);
        assert!(report.recovery_abandoned);
        assert_eq!(nav.mode(), NavMode::Forward);
        assert_eq!(dems.throttle, 0.2);
    }

    #[test]
    fn test_pickup_signal() {
        let mut nav = nav();
        nav.mode = NavMode::Stuck(None);
        let pose = moving(0.0, 0.0, 0.0, 0.0);

        let mut input = NavInput {
            time_s: 0.0,
            pose: &pose,
            nav_angles_rad: &[],
            near_sample: true,
            picking_up: false,
        };

        let (dems, _) = nav.step(&input);
        assert!(dems.send_pickup);

        input.picking_up = true;
        let (dems, _) = nav.step(&input);
        assert!(!dems.send_pickup);

        let moving = moving(0.0, 0.0, 0.0, 0.01);
        input.picking_up = false;
        input.pose = &moving;
        let (dems, _) = nav.step(&input);
        assert!(!dems.send_pickup);
    }

    #[test]
    fn test_invalid_params() {
        let params = NavParams {
            history_len: 0,
            ..NavParams::default()
        };
        assert!(NavCtrl::new(params).is_err());
    }
}
