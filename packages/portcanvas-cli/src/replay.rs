//! Replays scene files against in-memory canvases and reports the draw
//! calls the bridge issues.

use anyhow::{Context, Result};
use portcanvas_core::{
    Bridge, BridgeOptions, DrawCall, Element, MemoryHost, RecordingSurface, Scene,
};
use portcanvas_ports::{port, OutputPort};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

pub fn load_scenes(path: &Path) -> Result<Vec<Scene>> {
    let input =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Scene::decode_all(&input).with_context(|| format!("failed to decode {}", path.display()))
}

pub fn load_options(path: &Path) -> Result<BridgeOptions> {
    let input =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    BridgeOptions::from_json(&input)
        .with_context(|| format!("invalid bridge options in {}", path.display()))
}

/// Which canvases exist while replaying.
#[derive(Debug, Clone, Default)]
pub enum Canvases {
    /// Every canvas id referenced by the scenes.
    #[default]
    Referenced,
    Only(BTreeSet<String>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceEntry {
    pub scene: usize,
    pub canvas_id: String,
    pub call: DrawCall,
}

#[derive(Debug, Default)]
pub struct ReplayReport {
    pub scenes: usize,
    pub missing: Vec<(usize, String)>,
    pub trace: Vec<TraceEntry>,
}

/// Sends every scene through a bridge wired to a [`MemoryHost`] and records
/// what was drawn on each canvas.
pub fn replay(
    scenes: &[Scene],
    options: BridgeOptions,
    canvases: &Canvases,
    size: (f64, f64),
) -> ReplayReport {
    let host = MemoryHost::new();
    let ids: BTreeSet<String> = match canvases {
        Canvases::Referenced => scenes.iter().map(|scene| scene.canvas_id.clone()).collect(),
        Canvases::Only(ids) => ids.clone(),
    };
    for id in &ids {
        host.add_canvas(id.clone(), size.0, size.1);
    }

    let output: OutputPort<Scene> = port();
    let _handle = Bridge::new(host.clone(), options).init(port(), &output);

    let mut report = ReplayReport {
        scenes: scenes.len(),
        ..ReplayReport::default()
    };

    for (index, scene) in scenes.iter().enumerate() {
        output.send(scene.clone());

        let Some(surface) = host.canvas(&scene.canvas_id) else {
            tracing::debug!(scene = index, canvas_id = %scene.canvas_id, "canvas missing");
            report.missing.push((index, scene.canvas_id.clone()));
            continue;
        };
        collect(&mut report, index, &scene.canvas_id, &surface);
    }

    report
}

fn collect(report: &mut ReplayReport, index: usize, canvas_id: &str, surface: &RecordingSurface) {
    report
        .trace
        .extend(surface.take_calls().into_iter().map(|call| TraceEntry {
            scene: index,
            canvas_id: canvas_id.to_string(),
            call,
        }));
}

/// `#scene canvas call` lines for the terminal.
pub fn text_lines(trace: &[TraceEntry]) -> Vec<String> {
    trace
        .iter()
        .map(|entry| format!("#{} {} {}", entry.scene, entry.canvas_id, describe(&entry.call)))
        .collect()
}

/// One JSON object per trace entry.
pub fn json_lines(trace: &[TraceEntry]) -> serde_json::Result<Vec<String>> {
    trace.iter().map(serde_json::to_string).collect()
}

/// One-line human readable form of a draw call.
pub fn describe(call: &DrawCall) -> String {
    fn shadow(shadow: &Option<portcanvas_core::Shadow>) -> String {
        match shadow {
            Some(s) => format!(
                "shadow={} blur={} offset={},{}",
                s.color, s.blur, s.offset_x, s.offset_y
            ),
            None => "shadow=none".to_string(),
        }
    }

    match call {
        DrawCall::Clear { width, height } => format!("clearRect 0,0 {width}x{height}"),
        DrawCall::StrokeRect {
            rect,
            color,
            line_width,
            shadow: s,
        } => format!(
            "strokeRect {},{} {}x{} {} width={} {}",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            color,
            line_width,
            shadow(s)
        ),
        DrawCall::FillRect {
            rect,
            color,
            shadow: s,
        } => format!(
            "fillRect {},{} {}x{} {} {}",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            color,
            shadow(s)
        ),
        DrawCall::FillText {
            text,
            at,
            color,
            font,
            baseline,
            shadow: s,
        } => format!(
            "fillText {:?} {},{} {} font=\"{}\" baseline={} {}",
            text,
            at.x,
            at.y,
            color,
            font,
            baseline.as_str(),
            shadow(s)
        ),
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SceneSummary {
    pub rects: usize,
    pub texts: usize,
    pub unsupported: usize,
}

pub fn summarize(scene: &Scene) -> SceneSummary {
    scene
        .elements
        .iter()
        .fold(SceneSummary::default(), |mut summary, element| {
            match element {
                Element::Rect(_) => summary.rects += 1,
                Element::Text(_) => summary.texts += 1,
                Element::Unsupported => summary.unsupported += 1,
            }
            summary
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SCENES: &str = r#"
{"canvasId": "main", "elements": [
  {"type": "element", "position": {"x": 0, "y": 0}, "size": {"width": 10, "height": 10},
   "backgroundColor": "red", "border": {"color": "black", "width": 1}},
  {"type": "text", "position": {"x": 5, "y": 5}, "content": "hi", "color": "blue"}
]}
{"canvasId": "side", "elements": [{"type": "sprite"}]}
"#;

    fn scene_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SCENES.as_bytes()).unwrap();
        file
    }

    #[test]
    fn replays_every_scene_in_order() {
        let file = scene_file();
        let scenes = load_scenes(file.path()).unwrap();
        let report = replay(&scenes, BridgeOptions::default(), &Canvases::Referenced, (100.0, 50.0));

        assert_eq!(report.scenes, 2);
        assert!(report.missing.is_empty());

        let lines: Vec<_> = report.trace.iter().map(|entry| describe(&entry.call)).collect();
        assert_eq!(
            lines,
            vec![
                "clearRect 0,0 100x50",
                "strokeRect 0,0 10x10 black width=1 shadow=none",
                "fillRect 0,0 10x10 red shadow=none",
                "fillText \"hi\" 5,5 blue font=\"normal 16px sans-serif\" baseline=top shadow=none",
                "clearRect 0,0 100x50",
            ]
        );
        assert_eq!(report.trace[4].canvas_id, "side");
    }

    #[test]
    fn json_trace_is_one_object_per_line() {
        let file = scene_file();
        let scenes = load_scenes(file.path()).unwrap();
        let report = replay(&scenes, BridgeOptions::default(), &Canvases::Referenced, (100.0, 50.0));

        let lines = json_lines(&report.trace).unwrap();
        assert_eq!(lines.len(), report.trace.len());
        for line in &lines {
            assert!(!line.contains('\n'));
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value["call"]["op"].is_string());
        }

        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["scene"], 0);
        assert_eq!(first["canvasId"], "main");
        assert_eq!(first["call"]["op"], "clear");
    }

    #[test]
    fn text_trace_prefixes_scene_and_canvas() {
        let file = scene_file();
        let scenes = load_scenes(file.path()).unwrap();
        let report = replay(&scenes, BridgeOptions::default(), &Canvases::Referenced, (100.0, 50.0));

        let lines = text_lines(&report.trace);
        assert_eq!(lines[0], "#0 main clearRect 0,0 100x50");
        assert_eq!(lines[4], "#1 side clearRect 0,0 100x50");
    }

    #[test]
    fn reports_missing_canvases() {
        let file = scene_file();
        let scenes = load_scenes(file.path()).unwrap();
        let only = Canvases::Only(BTreeSet::from(["side".to_string()]));
        let report = replay(&scenes, BridgeOptions::default().with_clear(false), &only, (1.0, 1.0));

        assert_eq!(report.missing, vec![(0, "main".to_string())]);
        assert!(report.trace.is_empty());
    }

    #[test]
    fn summarizes_element_kinds() {
        let file = scene_file();
        let scenes = load_scenes(file.path()).unwrap();
        assert_eq!(
            summarize(&scenes[0]),
            SceneSummary {
                rects: 1,
                texts: 1,
                unsupported: 0
            }
        );
        assert_eq!(summarize(&scenes[1]).unsupported, 1);
    }

    #[test]
    fn bad_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"canvasId": 3}"#).unwrap();

        let err = load_scenes(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to decode"));
    }

    #[test]
    fn options_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"clear": false, "defaultFont": {"size": 9}}"#).unwrap();

        let options = load_options(file.path()).unwrap();
        assert!(!options.clear);
        assert_eq!(options.default_font.size, 9.0);
    }
}
