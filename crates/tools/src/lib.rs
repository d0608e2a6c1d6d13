//! `hydromap` subcommands. Each returns the text to print on success.

use std::fs;
use std::path::PathBuf;

use foundation::bounds::Bounds;
use layers::settings::{BasemapStyle, LabelsStyle, MapSettings};
use layers::style::StyleDocument;
use urlstate::map_state::share_query;
use urlstate::param::{BasemapParam, BoundsParam, LabelsParam, QueryParam};
use urlstate::query::QueryString;
use urlstate::state::UrlState;
use urlstate::store::InMemoryQueryStore;

pub fn run(mut args: Vec<String>) -> Result<String, String> {
    if args.is_empty() {
        return Err(usage());
    }
    let cmd = args.remove(0);
    match cmd.as_str() {
        "share" => cmd_share(args),
        "inspect" => cmd_inspect(args),
        "bake" => cmd_bake(args),
        _ => Err(usage()),
    }
}

fn flag_value(args: &[String], i: &mut usize, flag: &str) -> Result<String, String> {
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_basemap(raw: &str) -> Result<BasemapStyle, String> {
    BasemapStyle::parse(raw).ok_or_else(|| {
        format!("unknown basemap {raw:?} (expected light, dark or satellite)")
    })
}

fn parse_labels(raw: &str) -> Result<LabelsStyle, String> {
    LabelsStyle::parse(raw)
        .ok_or_else(|| format!("unknown labels {raw:?} (expected dark, light or \"\")"))
}

fn cmd_share(args: Vec<String>) -> Result<String, String> {
    // hydromap share [--bounds JSON] [--basemap V] [--labels V] [--base URL]
    let mut bounds = Bounds::SOUTH_SUDAN;
    let mut settings = MapSettings::default();
    let mut base: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--bounds" => {
                let raw = flag_value(&args, &mut i, "--bounds")?;
                bounds = serde_json::from_str(&raw).map_err(|e| format!("invalid bounds: {e}"))?;
            }
            "--basemap" => settings.basemap = parse_basemap(&flag_value(&args, &mut i, "--basemap")?)?,
            "--labels" => settings.labels = parse_labels(&flag_value(&args, &mut i, "--labels")?)?,
            "--base" => base = Some(flag_value(&args, &mut i, "--base")?),
            s => return Err(format!("unknown arg: {s}\n\n{}", usage())),
        }
        i += 1;
    }

    let (prefix, existing) = match base.as_deref() {
        Some(url) => match url.split_once('?') {
            Some((path, query)) => (path.to_string(), QueryString::parse(query)),
            None => (url.to_string(), QueryString::new()),
        },
        None => (String::new(), QueryString::new()),
    };
    let query = share_query(&existing, bounds, settings);
    Ok(format!("{prefix}{}", query.to_search()))
}

fn cmd_inspect(args: Vec<String>) -> Result<String, String> {
    // hydromap inspect <url-or-query>
    let [raw] = args.as_slice() else {
        return Err(usage());
    };
    let search = match raw.split_once('?') {
        Some((_, query)) => query,
        None => raw.as_str(),
    };
    let search = search.split('#').next().unwrap_or_default();
    let state = UrlState::new(InMemoryQueryStore::from_search(search));

    let mut out = String::new();
    out.push_str(&line::<BoundsParam>(&state, BoundsParam::serialize));
    out.push_str(&line::<BasemapParam>(&state, |b| b.as_str().to_string()));
    out.push_str(&line::<LabelsParam>(&state, |l| match l {
        LabelsStyle::None => "(none)".to_string(),
        other => other.as_str().to_string(),
    }));
    Ok(out)
}

fn line<P: QueryParam>(
    state: &UrlState<InMemoryQueryStore>,
    show: impl Fn(&P::Value) -> String,
) -> String {
    let value = state.get::<P>();
    let note = match state.raw::<P>() {
        None => " (default)",
        Some(raw) if P::parse(raw).is_none() => " (default, invalid value in url)",
        Some(_) => "",
    };
    format!("{}: {}{note}\n", P::KEY, show(&value))
}

fn cmd_bake(args: Vec<String>) -> Result<String, String> {
    // hydromap bake <style.json> <out.json> [--basemap V] [--labels V]
    let mut paths: Vec<PathBuf> = Vec::new();
    let mut settings = MapSettings::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--basemap" => settings.basemap = parse_basemap(&flag_value(&args, &mut i, "--basemap")?)?,
            "--labels" => settings.labels = parse_labels(&flag_value(&args, &mut i, "--labels")?)?,
            s if s.starts_with('-') => return Err(format!("unknown arg: {s}\n\n{}", usage())),
            _ => paths.push(PathBuf::from(&args[i])),
        }
        i += 1;
    }
    let [input, output] = paths.as_slice() else {
        return Err(usage());
    };

    let raw = fs::read_to_string(input).map_err(|e| format!("read {input:?}: {e}"))?;
    let source = StyleDocument::from_json(&raw).map_err(|e| format!("{input:?}: {e}"))?;
    let mut baked = source.clone();
    let summary = settings.apply(&source, &mut baked);
    if summary.touched() == 0 {
        eprintln!("warning: no basemap-* or labels-* layer groups in {input:?}");
    }

    let payload = baked.to_json_pretty().map_err(|e| e.to_string())?;
    fs::write(output, payload).map_err(|e| format!("write {output:?}: {e}"))?;
    Ok(format!(
        "wrote {output:?}: {} layers shown, {} hidden\n",
        summary.shown, summary.hidden
    ))
}

pub fn usage() -> String {
    "Usage:\n  hydromap share [--bounds JSON] [--basemap light|dark|satellite] [--labels dark|light|\"\"] [--base URL]\n  hydromap inspect <url-or-query>\n  hydromap bake <style.json> <out.json> [--basemap V] [--labels V]\n\nNotes:\n- Bounds are [[west, south], [east, north]] in degrees.\n- `inspect` resolves values the way the dashboard does: missing or invalid values fall back to defaults.\n- `bake` writes a copy of a style with the chosen basemap and label groups visible.\n".to_string()
}
