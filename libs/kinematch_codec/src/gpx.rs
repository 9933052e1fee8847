//! GPX 1.1 export of matched paths.

use crate::error::CodecError;

use chrono::{DateTime, TimeDelta, Utc};
use geo::Point;
use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};
use std::io::Write;
use time::OffsetDateTime;

const CREATOR: &str = "kinematch";

/// Writes a single-segment track of `(lat, lon)` positions. Each position
/// is given a placeholder timestamp, one second after the previous,
/// starting at the Unix epoch.
pub fn write_gpx<W, I>(writer: W, name: &str, positions: I) -> Result<(), CodecError>
where
    W: Write,
    I: IntoIterator<Item = (f64, f64)>,
{
    let points = positions
        .into_iter()
        .enumerate()
        .map(|(index, (lat, lon))| {
            let mut waypoint = Waypoint::new(Point::new(lon, lat));
            waypoint.time = Some(placeholder_time(index)?.into());
            Ok(waypoint)
        })
        .collect::<Result<Vec<_>, CodecError>>()?;

    let mut segment = TrackSegment::new();
    segment.points = points;

    let mut track = Track::new();
    track.name = Some(name.to_string());
    track.segments.push(segment);

    let document = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(CREATOR.to_string()),
        tracks: vec![track],
        ..Gpx::default()
    };

    gpx::write(&document, writer)?;
    Ok(())
}

fn placeholder_time(index: usize) -> Result<OffsetDateTime, CodecError> {
    let time: DateTime<Utc> =
        DateTime::<Utc>::UNIX_EPOCH + TimeDelta::try_seconds(index as i64).unwrap_or_default();

    OffsetDateTime::from_unix_timestamp(time.timestamp())
        .map_err(|_| CodecError::Timestamp(time.timestamp()))
}
