//! JSON success envelope.

use super::polyline::encode_polyline;
use super::{round_to, OutputOptions};
use crate::config::OrchestratorConfig;
use crate::types::{Instruction, PathPoint, ResponsePath};
use serde_json::{json, Map, Value};

/// Renders the success document for `paths`, best path first.
pub fn render_json(
    paths: &[ResponsePath],
    debug: &Map<String, Value>,
    options: &OutputOptions,
    config: &OrchestratorConfig,
    took_ms: u64,
) -> Value {
    let mut info = Map::new();
    info.insert("copyrights".into(), json!(config.copyrights));
    info.insert("took".into(), json!(took_ms));
    if let Some(date) = &config.data_date {
        info.insert("road_data_timestamp".into(), json!(date));
    }

    json!({
        "hints": debug,
        "info": info,
        "paths": paths.iter().map(|p| path_json(p, options)).collect::<Vec<_>>(),
    })
}

fn path_json(path: &ResponsePath, options: &OutputOptions) -> Value {
    let mut obj = Map::new();
    obj.insert("distance".into(), json!(round_to(path.distance, 3)));
    obj.insert("weight".into(), json!(round_to(path.weight, 6)));
    obj.insert("time".into(), json!(path.time));
    obj.insert("transfers".into(), json!(0));

    if options.calc_points {
        obj.insert("points_encoded".into(), json!(options.points_encoded));
        if options.points_encoded {
            obj.insert(
                "points_encoded_multiplier".into(),
                json!(options.points_encoded_multiplier),
            );
        }
        if let Some(bbox) = path.bbox() {
            obj.insert("bbox".into(), json!(bbox));
        }
        obj.insert("points".into(), points_json(&path.points, options));
        if !path.waypoints.is_empty() {
            obj.insert("snapped_waypoints".into(), points_json(&path.waypoints, options));
        }
        if options.instructions {
            if let Some(instructions) = &path.instructions {
                obj.insert("instructions".into(), instructions_json(instructions));
            }
        }
    }

    if !path.details.is_empty() {
        let details: Map<String, Value> = path
            .details
            .iter()
            .map(|(name, entries)| {
                let rows = entries
                    .iter()
                    .map(|d| json!([d.first, d.last, d.value]))
                    .collect::<Vec<_>>();
                (name.clone(), Value::Array(rows))
            })
            .collect();
        obj.insert("details".into(), Value::Object(details));
    }

    if options.elevation {
        obj.insert("ascend".into(), json!(path.ascend));
        obj.insert("descend".into(), json!(path.descend));
    }
    Value::Object(obj)
}

/// Either an encoded polyline or a GeoJSON `LineString` in `[lon, lat(, ele)]` order.
fn points_json(points: &[PathPoint], options: &OutputOptions) -> Value {
    if options.points_encoded {
        return Value::String(encode_polyline(
            points,
            options.elevation,
            options.points_encoded_multiplier,
        ));
    }
    let coordinates: Vec<Value> = points
        .iter()
        .map(|p| match (options.elevation, p.ele) {
            (true, Some(ele)) => json!([p.lon, p.lat, ele]),
            _ => json!([p.lon, p.lat]),
        })
        .collect();
    json!({ "type": "LineString", "coordinates": coordinates })
}

/// Each instruction's `interval` indexes into the path points. The final
/// instruction covers a single point.
fn instructions_json(instructions: &[Instruction]) -> Value {
    let mut index = 0usize;
    let last = instructions.len().saturating_sub(1);
    let list: Vec<Value> = instructions
        .iter()
        .enumerate()
        .map(|(i, instr)| {
            let to = if i == last {
                index
            } else {
                index + instr.points.len()
            };
            let value = json!({
                "distance": round_to(instr.distance, 3),
                "sign": instr.sign,
                "interval": [index, to],
                "text": instr.text,
                "time": instr.time,
                "street_name": instr.street_name,
            });
            index += instr.points.len();
            value
        })
        .collect();
    Value::Array(list)
}
