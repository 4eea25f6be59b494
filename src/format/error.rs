//! Error documents in JSON and XML.

use super::gpx::{into_string, XmlWriter};
use super::OutputFormat;
use crate::types::RouteError;
use crate::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::{json, Map, Value};

/// Renders `errors` in the shape matching `format`: XML requested means XML errors.
///
/// Returns the body and its content type, which is the requested format's
/// own type unless XML rendering fails and JSON is used instead.
pub fn render_error(errors: &[RouteError], format: OutputFormat) -> (String, &'static str) {
    if format.is_xml() {
        match render_xml_error(errors) {
            Ok(body) => return (body, format.content_type()),
            Err(e) => tracing::warn!(error = %e, "xml error document failed, using json"),
        }
    }
    (render_json_error(errors).to_string(), "application/json")
}

/// `{"message": <first>, "hints": [{"message", "details": <type id>, ...}]}`
pub fn render_json_error(errors: &[RouteError]) -> Value {
    let message = errors.first().map(|e| e.message.as_str()).unwrap_or_default();
    let hints: Vec<Value> = errors
        .iter()
        .map(|e| {
            let mut entry = Map::new();
            entry.insert("message".into(), json!(e.message));
            entry.insert("details".into(), json!(e.kind.name()));
            for (k, v) in &e.details {
                entry.entry(k.clone()).or_insert_with(|| v.clone());
            }
            Value::Object(entry)
        })
        .collect();
    json!({ "message": message, "hints": hints })
}

/// Minimal GPX-rooted document carrying the messages as metadata extensions.
pub fn render_xml_error(errors: &[RouteError]) -> Result<String> {
    let mut w: XmlWriter = Writer::new_with_indent(Vec::new(), b' ', 2);
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))))?;

    let mut root = BytesStart::new("gpx");
    root.push_attribute(("xmlns", "http://www.topografix.com/GPX/1/1"));
    root.push_attribute(("creator", "GraphHopper"));
    root.push_attribute(("version", "1.1"));
    w.write_event(Event::Start(root))?;
    w.write_event(Event::Start(BytesStart::new("metadata")))?;
    w.write_event(Event::Start(BytesStart::new("extensions")))?;

    let message = errors.first().map(|e| e.message.as_str()).unwrap_or_default();
    w.write_event(Event::Start(BytesStart::new("message")))?;
    w.write_event(Event::Text(BytesText::new(message)))?;
    w.write_event(Event::End(BytesEnd::new("message")))?;

    w.write_event(Event::Start(BytesStart::new("hints")))?;
    for e in errors {
        let mut error = BytesStart::new("error");
        error.push_attribute(("message", e.message.as_str()));
        error.push_attribute(("details", e.kind.name()));
        w.write_event(Event::Empty(error))?;
    }
    w.write_event(Event::End(BytesEnd::new("hints")))?;

    w.write_event(Event::End(BytesEnd::new("extensions")))?;
    w.write_event(Event::End(BytesEnd::new("metadata")))?;
    w.write_event(Event::End(BytesEnd::new("gpx")))?;
    into_string(w)
}
