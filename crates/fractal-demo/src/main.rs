// File: crates/fractal-demo/src/main.rs
// Summary: Demo loads OHLC CSV (or a random walk), replays pan/zoom/chart-type interactions and writes one PNG per frame.

use anyhow::{Context, Result};
use fractal_core::{ChartEngine, ChartEvent, ChartOptions, EventKind, Interaction, Record};
use fractal_render_skia::SkiaSurface;
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const WIDTH: f64 = 1024.0;
const HEIGHT: f64 = 640.0;

/// One scripted step: a label for the output file and the inputs to apply before painting.
enum Step {
    Input(&'static str, Vec<Interaction>),
    ChartType(&'static str, &'static str),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Args: [csv path] [options.json]
    let mut args = std::env::args().skip(1);
    let csv_arg = args.next();
    let options = match args.next() {
        Some(p) => {
            let text = std::fs::read_to_string(&p).with_context(|| format!("reading options '{p}'"))?;
            ChartOptions::from_json_str(&text).with_context(|| format!("parsing options '{p}'"))?
        }
        None => ChartOptions::default(),
    };

    let (records, stem) = match csv_arg {
        Some(raw) => {
            let (path, used_alt) = resolve_path(&raw)?;
            info!(path = %path.display(), "using input file");
            if used_alt {
                info!("extension swapped between .csv/.cvs");
            }
            let records = load_ohlc_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
            (records, short_stem(&path))
        }
        None => (random_walk(500), "random_walk".to_string()),
    };
    info!(count = records.len(), "loaded records");
    if records.is_empty() {
        anyhow::bail!("no records loaded; check headers/delimiter.");
    }

    let surface = SkiaSurface::new(WIDTH, HEIGHT, 1.0)?;
    let mut engine = ChartEngine::new(surface, options)?;
    engine.on(EventKind::Zoom, |ev| if let ChartEvent::Zoom { zoom } = ev { info!(zoom, "zoom") });
    engine.on(EventKind::Pan, |ev| if let ChartEvent::Pan { offset } = ev { info!(offset, "pan") });
    engine.load(records);

    let wheel_out = |n: usize| vec![Interaction::Wheel { delta_y: 120.0 }; n];
    let steps = vec![
        Step::Input("initial", Vec::new()),
        Step::Input("drag_back", vec![Interaction::Drag { dx: -40.0 }; 5]),
        Step::Input("zoomed_out", wheel_out(11)),
        Step::ChartType("line_lod", "line"),
        Step::ChartType("area_lod", "area"),
        Step::Input("zoomed_in", vec![Interaction::Wheel { delta_y: -120.0 }; 14]),
        Step::ChartType("candles_again", "candle"),
        Step::Input("resized", vec![Interaction::Resize { width: 640.0, height: 400.0 }]),
        Step::Input("past_the_end", vec![Interaction::Drag { dx: -1.0e6 }]),
    ];

    for (i, step) in steps.into_iter().enumerate() {
        let label = match step {
            Step::Input(label, inputs) => {
                for input in inputs {
                    engine.handle(input)?;
                }
                label
            }
            Step::ChartType(label, chart_type) => {
                engine.set_chart_type(chart_type)?;
                label
            }
        };
        if !engine.frame() {
            warn!(label, "nothing to paint");
            continue;
        }
        let out = out_name_with(&stem, &format!("{i:02}_{label}"));
        engine.surface_mut().save_png(&out)?;
        let vp = engine.viewport();
        info!(file = %out.display(), zoom = engine.zoom(), start = vp.start, end = vp.end, "wrote frame");
    }

    Ok(())
}

/// Random walk like the browser demo: high/low jitter around the previous close.
fn random_walk(n: usize) -> Vec<Record> {
    let mut rng = rand::thread_rng();
    let mut last_close = 100.0f64;
    let start = 1_700_000_000_000i64;
    (0..n)
        .map(|i| {
            let open = last_close;
            let high = open + rng.gen::<f64>() * 10.0;
            let low = open - rng.gen::<f64>() * 8.0;
            let close = low + rng.gen::<f64>() * (high - low);
            last_close = close;
            Record::new(start + i as i64 * 86_400_000, open, high, low, close)
        })
        .collect()
}

/// Resolve path, trying .csv/.cvs swap if needed.
/// Returns (actual_path, used_alt)
fn resolve_path(raw: &str) -> Result<(PathBuf, bool)> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

fn short_stem(input: &Path) -> String {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    stem.split('_').take(3).collect::<Vec<_>>().join("_")
}

/// Produce output file name like target/out/frame_<stem>_<suffix>.png
fn out_name_with(stem: &str, suffix: &str) -> PathBuf {
    let mut out = PathBuf::from("target/out");
    if stem.is_empty() {
        out.push(format!("frame_{}.png", suffix));
    } else {
        out.push(format!("frame_{}_{}.png", stem, suffix));
    }
    out
}

/// Load Binance-like OHLC CSV into records.
fn load_ohlc_csv(path: &Path) -> Result<Vec<Record>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect::<Vec<_>>();
    info!(?headers, "csv headers");

    let idx = |names: &[&str]| -> Option<usize> {
        headers.iter().position(|h| names.contains(&h.as_str()))
    };

    // Common Binance headers
    let i_time = idx(&["time", "timestamp", "open_time", "date", "datetime"]);
    let i_open = idx(&["open", "o"]);
    let i_high = idx(&["high", "h"]);
    let i_low = idx(&["low", "l"]);
    let i_close = idx(&["close", "c", "adj_close", "close_price"]);

    if i_open.is_none() || i_high.is_none() || i_low.is_none() || i_close.is_none() {
        warn!("could not find one of open/high/low/close columns");
    }

    let mut out = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let parse = |i: Option<usize>| -> Option<f64> { i.and_then(|ix| rec.get(ix)).and_then(|s| s.trim().parse::<f64>().ok()) };
        // Fall back to the row index when the time column is absent or unparseable.
        let time = i_time.and_then(|ix| rec.get(ix)).and_then(parse_time_to_ms).unwrap_or(row as i64);

        if let (Some(o), Some(h), Some(l), Some(c)) = (parse(i_open), parse(i_high), parse(i_low), parse(i_close)) {
            out.push(Record::new(time, o, h, l, c));
        }
    }
    Ok(out)
}

/// Integer epoch seconds or milliseconds to milliseconds.
fn parse_time_to_ms(s: &str) -> Option<i64> {
    let n = s.trim().parse::<i64>().ok()?;
    if n > 10_i64.pow(12) {
        Some(n) // already ms
    } else if n > 10_i64.pow(9) {
        Some(n * 1000) // epoch sec
    } else {
        Some(n)
    }
}

fn swap_ext(p: &Path) -> Option<std::path::PathBuf> {
    let mut alt = p.to_path_buf();
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "cvs" => {
            alt.set_extension("csv");
            Some(alt)
        }
        "csv" => {
            alt.set_extension("cvs");
            Some(alt)
        }
        _ => None,
    }
}
