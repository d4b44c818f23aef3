//! # Recorded run replay
//!
//! Reads a recorded run, a CSV log with one row per cycle, and turns each row into a
//! [`TickInput`]. The log columns are:
//!
//! `time_s, image_path, x, y, yaw, pitch, roll, vel, near_sample, picking_up`
//!
//! where `image_path` is relative to the directory containing the log, and the boolean columns are
//! `true` or `false`.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::path::{Path, PathBuf};

use comms_if::eqpt::telem::RoverTelem;
use image::{ImageFormat, RgbImage};
use log::info;
use serde::{Deserialize, Serialize};

use crate::auto::TickInput;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A recorded run loaded from disk.
#[derive(Debug, Clone)]
pub struct Replay {
    /// Directory frame paths are relative to
    base_dir: PathBuf,

    records: Vec<ReplayRecord>,
}

/// A single row of the replay log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayRecord {
    pub time_s: f64,
    pub image_path: String,
    pub x: f64,
    pub y: f64,
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
    pub vel: f64,
    pub near_sample: bool,
    pub picking_up: bool,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("Could not read the replay log: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Could not read frame {0:?}: {1}")]
    IoError(PathBuf, std::io::Error),

    #[error("Frame {0:?} is not a PNG or JPEG image")]
    UnsupportedFormat(PathBuf),

    #[error("Could not decode frame {0:?}: {1}")]
    ImageError(PathBuf, image::ImageError),

    #[error("The replay log contains no records")]
    Empty,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Replay {
    /// Load the replay log at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ReplayError> {
        let path = path.as_ref();

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;

        let records = reader
            .deserialize()
            .collect::<Result<Vec<ReplayRecord>, _>>()?;

        if records.is_empty() {
            return Err(ReplayError::Empty);
        }

        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        info!(
            "Loaded replay of {} cycles ({:.2} s to {:.2} s) from {:?}",
            records.len(),
            records[0].time_s,
            records[records.len() - 1].time_s,
            path
        );

        Ok(Self { base_dir, records })
    }

    pub fn records(&self) -> &[ReplayRecord] {
        &self.records
    }

    /// Load and decode the frame of a record.
    pub fn load_frame(&self, record: &ReplayRecord) -> Result<RgbImage, ReplayError> {
        let path = self.base_dir.join(&record.image_path);

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let format = match ext.as_deref() {
            Some("png") => ImageFormat::Png,
            Some("jpg") | Some("jpeg") => ImageFormat::Jpeg,
            _ => return Err(ReplayError::UnsupportedFormat(path)),
        };

        let data = std::fs::read(&path).map_err(|e| ReplayError::IoError(path.clone(), e))?;

        image::load_from_memory_with_format(&data, format)
            .map(|img| img.to_rgb8())
            .map_err(|e| ReplayError::ImageError(path, e))
    }

    /// Iterate over the cycles of the replay, loading each frame as it's needed.
    pub fn ticks(&self) -> impl Iterator<Item = Result<TickInput, ReplayError>> + '_ {
        self.records.iter().map(move |r| {
            Ok(TickInput {
                telem: r.telem(),
                frame: self.load_frame(r)?,
            })
        })
    }
}

impl ReplayRecord {
    pub fn telem(&self) -> RoverTelem {
        RoverTelem {
            time_s: self.time_s,
            pos_x: self.x,
            pos_y: self.y,
            yaw_deg: self.yaw,
            pitch_deg: self.pitch,
            roll_deg: self.roll,
            vel_ms: self.vel,
            near_sample: self.near_sample,
            picking_up: self.picking_up,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use image::Rgb;
    use std::fs;

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("explore_replay_{}_{}", name, std::process::id()));
        fs::create_dir_all(&dir).expect("create test dir");
        dir
    }

    #[test]
    fn test_replay_load() -> Result<(), ReplayError> {
        let dir = test_dir("load");

        RgbImage::from_pixel(4, 2, Rgb([200, 10, 10]))
            .save(dir.join("frame_0.png"))
            .map_err(|e| ReplayError::ImageError(dir.join("frame_0.png"), e))?;
        RgbImage::from_pixel(8, 8, Rgb([120, 120, 120]))
            .save(dir.join("frame_1.jpeg"))
            .map_err(|e| ReplayError::ImageError(dir.join("frame_1.jpeg"), e))?;

        fs::write(
            dir.join("log.csv"),
            "time_s,image_path,x,y,yaw,pitch,roll,vel,near_sample,picking_up\n\
             0.0, frame_0.png, 99.7, 85.6, 56.8, 0.2, 359.6, 0.0, false, false\n\
             0.1, frame_0.png, 99.8, 85.7, 56.9, 0.1, 0.3, 0.4, true, false\n\
             0.2, frame_1.jpeg, 99.9, 85.8, 57.0, 0.1, 0.3, 0.4, false, false\n",
        )
        .expect("write log");

        let replay = Replay::open(dir.join("log.csv"))?;
        assert_eq!(replay.records().len(), 3);

        let rec = &replay.records()[1];
        assert_eq!(rec.image_path, "frame_0.png");
        assert!(rec.near_sample);

        let telem = rec.telem();
        assert_eq!(telem.pos_x, 99.8);
        assert_eq!(telem.yaw_deg, 56.9);
        assert_eq!(telem.vel_ms, 0.4);

        let ticks = replay.ticks().collect::<Result<Vec<_>, _>>()?;
        assert_eq!(ticks.len(), 3);
        assert_eq!(ticks[0].frame.dimensions(), (4, 2));
        assert_eq!(ticks[0].frame.get_pixel(0, 0), &Rgb([200, 10, 10]));

        // JPEG frames are decoded by extension
        assert_eq!(ticks[2].frame.dimensions(), (8, 8));

        Ok(())
    }

    #[test]
    fn test_replay_errors() {
        let dir = test_dir("errors");

        fs::write(
            dir.join("empty.csv"),
            "time_s,image_path,x,y,yaw,pitch,roll,vel,near_sample,picking_up\n",
        )
        .expect("write log");
        assert!(matches!(Replay::open(dir.join("empty.csv")), Err(ReplayError::Empty)));

        fs::write(
            dir.join("missing.csv"),
            "time_s,image_path,x,y,yaw,pitch,roll,vel,near_sample,picking_up\n\
             0.0,nope.png,0,0,0,0,0,0,false,false\n",
        )
        .expect("write log");
        let replay = Replay::open(dir.join("missing.csv")).expect("log is valid");
        assert!(matches!(
            replay.ticks().next(),
            Some(Err(ReplayError::IoError(_, _)))
        ));

        fs::write(
            dir.join("bmp.csv"),
            "time_s,image_path,x,y,yaw,pitch,roll,vel,near_sample,picking_up\n\
             0.0,frame.bmp,0,0,0,0,0,0,false,false\n",
        )
        .expect("write log");
        let replay = Replay::open(dir.join("bmp.csv")).expect("log is valid");
        assert!(matches!(
            replay.load_frame(&replay.records()[0]),
            Err(ReplayError::UnsupportedFormat(_))
        ));

        assert!(matches!(
            Replay::open(dir.join("does_not_exist.csv")),
            Err(ReplayError::CsvError(_))
        ));
    }
}
