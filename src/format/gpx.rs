//! GPX 1.1 document writer.
//!
//! Output layout:
//!
//! ```text
//! gpx
//! ├── metadata (copyright, link, time)
//! ├── wpt*     start, via and finish points   (gpx.waypoints)
//! ├── rte      one rtept per instruction      (gpx.route)
//! └── trk      timestamped trkpt per point    (gpx.track)
//! ```

use super::{round_to, GpxOptions};
use crate::types::{haversine_distance, Instruction, PathPoint, ResponsePath};
use crate::{Error, ErrorContext, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use time::macros::format_description;
use time::OffsetDateTime;

const GPX_NS: &str = "http://www.topografix.com/GPX/1/1";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const GH_NS: &str = "https://graphhopper.com/public/schema/gpx-1.1";
const SCHEMA_LOCATION: &str =
    "http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd";

pub(crate) type XmlWriter = Writer<Vec<u8>>;

/// Renders `paths` as GPX. More than one path is rejected.
pub fn render_gpx(
    paths: &[ResponsePath],
    options: &GpxOptions,
    with_elevation: bool,
    version: &str,
) -> Result<String> {
    if paths.len() > 1 {
        return Err(Error::invalid_argument_with_context(
            "Alternatives are currently not yet supported for GPX",
            ErrorContext::new()
                .with_field_path("type")
                .with_source("gpx"),
        ));
    }
    let start_millis = match options.time_millis {
        Some(millis) => millis,
        None => now_millis(),
    };
    let empty = ResponsePath::default();
    let path = paths.first().unwrap_or(&empty);
    let instructions = path.instructions.as_deref().unwrap_or(&[]);

    let mut w = Writer::new_with_indent(Vec::new(), b' ', 2);
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))))?;
    let creator = format!("GraphHopper {}", version);
    let mut root = BytesStart::new("gpx");
    root.push_attribute(("xmlns", GPX_NS));
    root.push_attribute(("xmlns:xsi", XSI_NS));
    root.push_attribute(("xsi:schemaLocation", SCHEMA_LOCATION));
    root.push_attribute(("xmlns:gh", GH_NS));
    root.push_attribute(("creator", creator.as_str()));
    root.push_attribute(("version", "1.1"));
    w.write_event(Event::Start(root))?;

    write_metadata(&mut w, start_millis)?;
    if options.with_waypoints {
        write_waypoints(&mut w, instructions)?;
    }
    if options.with_route {
        write_route(&mut w, instructions)?;
    }
    if options.with_track {
        write_track(&mut w, instructions, options, with_elevation, start_millis)?;
    }

    w.write_event(Event::End(BytesEnd::new("gpx")))?;
    into_string(w)
}

fn write_metadata(w: &mut XmlWriter, millis: i64) -> Result<()> {
    w.write_event(Event::Start(BytesStart::new("metadata")))?;
    let mut copyright = BytesStart::new("copyright");
    copyright.push_attribute(("author", "OpenStreetMap contributors"));
    w.write_event(Event::Empty(copyright))?;
    let mut link = BytesStart::new("link");
    link.push_attribute(("href", "http://graphhopper.com"));
    w.write_event(Event::Start(link))?;
    write_text_element(w, "text", "GraphHopper GPX")?;
    w.write_event(Event::End(BytesEnd::new("link")))?;
    write_text_element(w, "time", &format_timestamp(millis)?)?;
    w.write_event(Event::End(BytesEnd::new("metadata")))?;
    Ok(())
}

/// The start point plus every via and finish point.
fn write_waypoints(w: &mut XmlWriter, instructions: &[Instruction]) -> Result<()> {
    let first = instructions
        .first()
        .and_then(|i| i.points.first().map(|p| (p, i.text.as_str())));
    let rest = instructions
        .iter()
        .skip(1)
        .filter(|i| i.is_waypoint())
        .filter_map(|i| i.points.first().map(|p| (p, i.text.as_str())));
    for (point, name) in first.into_iter().chain(rest) {
        let mut wpt = BytesStart::new("wpt");
        push_lat_lon(&mut wpt, point);
        w.write_event(Event::Start(wpt))?;
        write_text_element(w, "name", name)?;
        w.write_event(Event::End(BytesEnd::new("wpt")))?;
    }
    Ok(())
}

fn write_route(w: &mut XmlWriter, instructions: &[Instruction]) -> Result<()> {
    w.write_event(Event::Start(BytesStart::new("rte")))?;
    for instr in instructions {
        let Some(point) = instr.points.first() else {
            continue;
        };
        let mut rtept = BytesStart::new("rtept");
        push_lat_lon(&mut rtept, point);
        w.write_event(Event::Start(rtept))?;
        write_text_element(w, "desc", &instr.text)?;
        w.write_event(Event::Start(BytesStart::new("extensions")))?;
        write_text_element(w, "gh:distance", &round_to(instr.distance, 1).to_string())?;
        write_text_element(w, "gh:time", &instr.time.to_string())?;
        write_text_element(w, "gh:sign", &instr.sign.to_string())?;
        w.write_event(Event::End(BytesEnd::new("extensions")))?;
        w.write_event(Event::End(BytesEnd::new("rtept")))?;
    }
    w.write_event(Event::End(BytesEnd::new("rte")))?;
    Ok(())
}

fn write_track(
    w: &mut XmlWriter,
    instructions: &[Instruction],
    options: &GpxOptions,
    with_elevation: bool,
    start_millis: i64,
) -> Result<()> {
    w.write_event(Event::Start(BytesStart::new("trk")))?;
    write_text_element(w, "name", &options.track_name)?;
    w.write_event(Event::Start(BytesStart::new("trkseg")))?;
    for (point, millis) in timed_track_points(instructions, start_millis) {
        let mut trkpt = BytesStart::new("trkpt");
        push_lat_lon(&mut trkpt, point);
        w.write_event(Event::Start(trkpt))?;
        if with_elevation {
            if let Some(ele) = point.ele {
                write_text_element(w, "ele", &round_to(ele, 2).to_string())?;
            }
        }
        write_text_element(w, "time", &format_timestamp(millis)?)?;
        w.write_event(Event::End(BytesEnd::new("trkpt")))?;
    }
    w.write_event(Event::End(BytesEnd::new("trkseg")))?;
    w.write_event(Event::End(BytesEnd::new("trk")))?;
    Ok(())
}

/// Assigns every track point a timestamp.
///
/// Within one instruction, time is spread by distance over the segment that
/// runs from its first point to the first point of the next instruction.
fn timed_track_points(instructions: &[Instruction], start_millis: i64) -> Vec<(&PathPoint, i64)> {
    let mut out = Vec::new();
    let mut instr_start = start_millis;
    for (i, instr) in instructions.iter().enumerate() {
        let next = instructions.get(i + 1).and_then(|n| n.points.first());
        let mut cumulative = Vec::with_capacity(instr.points.len());
        let mut total = 0.0;
        for (j, p) in instr.points.iter().enumerate() {
            if j > 0 {
                total += haversine_distance(&instr.points[j - 1], p);
            }
            cumulative.push(total);
        }
        if let (Some(last), Some(next)) = (instr.points.last(), next) {
            total += haversine_distance(last, next);
        }
        for (p, dist) in instr.points.iter().zip(cumulative) {
            let offset = if total > 0.0 {
                (instr.time as f64 * dist / total).round() as i64
            } else {
                0
            };
            out.push((p, instr_start + offset));
        }
        instr_start += instr.time as i64;
    }
    out
}

fn push_lat_lon(start: &mut BytesStart<'_>, point: &PathPoint) {
    start.push_attribute(("lat", format!("{:.6}", point.lat).as_str()));
    start.push_attribute(("lon", format!("{:.6}", point.lon).as_str()));
}

pub(crate) fn write_text_element(w: &mut XmlWriter, name: &str, text: &str) -> Result<()> {
    w.write_event(Event::Start(BytesStart::new(name)))?;
    w.write_event(Event::Text(BytesText::new(text)))?;
    w.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

pub(crate) fn into_string(w: XmlWriter) -> Result<String> {
    String::from_utf8(w.into_inner())
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// `YYYY-MM-DDTHH:MM:SSZ` in UTC.
fn format_timestamp(millis: i64) -> Result<String> {
    let out_of_range = || {
        Error::invalid_argument_with_context(
            format!("Timestamp {} is out of range", millis),
            ErrorContext::new().with_field_path("gpx.millis"),
        )
    };
    let ts = OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .map_err(|_| out_of_range())?;
    ts.format(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second]Z"
    ))
    .map_err(|_| out_of_range())
}

fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}
