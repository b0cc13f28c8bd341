use serde::Serialize;
use std::io::Read;
use std::str::FromStr;

use vitrine::render::raster::{self, RasterOptions};
use vitrine::render::CreativeRenderer;
use vitrine::{Engine, ResolvedFacility, ResolvedNetwork, SceneSelections};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Engine(vitrine::Error),
    Creative(vitrine::render::CreativeError),
    Raster(raster::RasterError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Engine(err) => write!(f, "{err}"),
            CliError::Creative(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<vitrine::Error> for CliError {
    fn from(value: vitrine::Error) -> Self {
        Self::Engine(value)
    }
}

impl From<vitrine::render::CreativeError> for CliError {
    fn from(value: vitrine::render::CreativeError) -> Self {
        Self::Creative(value)
    }
}

impl From<raster::RasterError> for CliError {
    fn from(value: raster::RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    Resolve,
    #[default]
    Compose,
    Render,
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
    Jpeg,
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum CaptureMode {
    Preview,
    #[default]
    Export,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    render_format: RenderFormat,
    capture_mode: CaptureMode,
    render_scale: Option<f32>,
    background: Option<String>,
    catalog: Option<String>,
    scene_id: Option<String>,
    out: Option<String>,
}

#[derive(Serialize)]
struct ResolveOut<'a> {
    network: &'a ResolvedNetwork,
    facilities: &'a [ResolvedFacility],
    labs: &'a [ResolvedFacility],
}

fn usage() -> &'static str {
    "vitrine-cli\n\
\n\
USAGE:\n\
  vitrine-cli resolve [--pretty] [--catalog <path>] [<selections.json>|-]\n\
  vitrine-cli [compose] [--pretty] [--catalog <path>] [<selections.json>|-]\n\
  vitrine-cli render [--format svg|png|jpg] [--mode preview|export] [--scale <n>] [--background <css-color>] [--catalog <path>] [--id <scene-id>] [--out <path>] [<selections.json>|-]\n\
\n\
NOTES:\n\
  - If <selections.json> is omitted or '-', selections are read from stdin.\n\
  - '{}' is a valid selections document: every field has a session default.\n\
  - compose prints the scene description as JSON.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG output defaults to writing next to the input file (or ./out.png for stdin).\n\
  - JPG output defaults to writing next to the input file (or ./out.jpg for stdin).\n\
  - --mode export captures at the aspect's true pixel dimensions; preview uses the fixed display scale.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "resolve" => args.command = Command::Resolve,
            "compose" => args.command = Command::Compose,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_format = fmt
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--mode" => {
                let Some(mode) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.capture_mode = match mode.trim().to_ascii_lowercase().as_str() {
                    "preview" => CaptureMode::Preview,
                    "export" => CaptureMode::Export,
                    _ => return Err(CliError::Usage(usage())),
                };
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(scale.is_finite() && scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                args.render_scale = Some(scale);
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--catalog" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.catalog = Some(path.clone());
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.scene_id = Some(id.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn build_engine(catalog: Option<&str>) -> Result<Engine, CliError> {
    match catalog {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(Engine::with_catalog(vitrine::Catalog::from_json_str(
                &text,
            )?))
        }
        None => Ok(Engine::new()),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn write_bytes(bytes: &[u8], out: &str) -> Result<(), CliError> {
    if out == "-" {
        use std::io::Write;
        std::io::stdout().lock().write_all(bytes)?;
    } else {
        std::fs::write(out, bytes)?;
    }
    Ok(())
}

fn default_raster_out_path(input: Option<&str>, ext: &str) -> std::path::PathBuf {
    match input {
        Some(path) if path != "-" => std::path::PathBuf::from(path).with_extension(ext),
        _ => std::path::PathBuf::from(format!("out.{ext}")),
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let selections: SceneSelections = serde_json::from_str(&text)?;
    let engine = build_engine(args.catalog.as_deref())?;

    match args.command {
        Command::Resolve => {
            let ctx = engine.scene_context(&selections)?;
            let out = ResolveOut {
                network: &ctx.network,
                facilities: &ctx.facilities,
                labs: &ctx.labs,
            };
            write_json(&out, args.pretty)?;
            Ok(())
        }
        Command::Compose => {
            let ctx = engine.scene_context(&selections)?;
            let scene = vitrine::render::compose_scene(&selections, &ctx);
            write_json(&scene, args.pretty)?;
            Ok(())
        }
        Command::Render => {
            let mut renderer = CreativeRenderer {
                engine,
                ..CreativeRenderer::new()
            };
            if let Some(id) = args.scene_id.as_deref() {
                renderer.svg.scene_id = Some(id.to_string());
            }
            let svg = renderer.render_svg_sync(&selections)?;

            let scale = args.render_scale.unwrap_or(match args.capture_mode {
                CaptureMode::Preview => raster::PREVIEW_SCALE,
                CaptureMode::Export => raster::export_scale(selections.aspect),
            });
            let raster_options = RasterOptions {
                scale,
                background: args.background.clone(),
                ..RasterOptions::default()
            };

            match args.render_format {
                RenderFormat::Svg => {
                    write_text(&svg, args.out.as_deref())?;
                }
                RenderFormat::Png => {
                    let bytes = raster::svg_to_png(&svg, &raster_options)?;
                    let out = args.out.clone().unwrap_or_else(|| {
                        default_raster_out_path(args.input.as_deref(), "png")
                            .to_string_lossy()
                            .to_string()
                    });
                    write_bytes(&bytes, &out)?;
                }
                RenderFormat::Jpeg => {
                    let bytes = raster::svg_to_jpeg(&svg, &raster_options)?;
                    let out = args.out.clone().unwrap_or_else(|| {
                        default_raster_out_path(args.input.as_deref(), "jpg")
                            .to_string_lossy()
                            .to_string()
                    });
                    write_bytes(&bytes, &out)?;
                }
            }
            Ok(())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
