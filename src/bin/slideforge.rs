use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "slideforge", version, about = "Render branded signage slides")]
struct Cli {
    /// Log at debug level unless RUST_LOG is set.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one slide to PNG, JPEG or PPTX.
    Render(RenderArgs),
    /// List the templates of a category as JSON.
    Templates(TemplatesArgs),
    /// List every category as JSON.
    Categories,
    /// Crop a photo to a face-centered square JPEG.
    Crop(CropArgs),
    /// List the supported export formats.
    Formats,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input slide JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Photo to place on the slide.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Export format key (png, jpg, jpeg, pptx).
    #[arg(long, default_value = "png")]
    format: String,

    /// Output path; defaults to a name derived from the headline.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Regular-weight font file tried before the built-in search paths.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Bold font file tried before the built-in search paths.
    #[arg(long)]
    font_bold: Option<PathBuf>,

    /// JPEG quality (1-100).
    #[arg(long, default_value_t = 95)]
    jpeg_quality: u8,

    /// Typeface name written into PPTX text runs.
    #[arg(long)]
    font_family: Option<String>,

    /// Print the compiled slide plan as JSON to stdout.
    #[arg(long)]
    dump_plan: bool,
}

#[derive(Parser, Debug)]
struct TemplatesArgs {
    /// Category key; unknown keys list the default category.
    #[arg(default_value = "research_spotlight")]
    category: String,
}

#[derive(Parser, Debug)]
struct CropArgs {
    /// Input photo.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Face detection JSON (`has_face`, `face_center_x`, `face_center_y`, `face_size`).
    #[arg(long)]
    face: Option<PathBuf>,

    /// Output square size in pixels.
    #[arg(long, default_value_t = slideforge::DEFAULT_OUTPUT_SIZE)]
    size: u32,

    /// Output JPEG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Templates(args) => print_json(&slideforge::list_templates(&args.category)),
        Command::Categories => print_json(&slideforge::list_categories()),
        Command::Crop(args) => cmd_crop(args),
        Command::Formats => {
            for f in slideforge::ExportFormat::ALL {
                println!("{}\t{}\t{}", f.key(), f.file_extension(), f.content_type());
            }
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "slideforge=debug"
    } else {
        "slideforge=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value).context("serialize JSON")?;
    println!("{s}");
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse {what} JSON '{}'", path.display()))
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut slide: slideforge::SlideData = read_json(&args.in_path, "slide")?;
    if let Some(image) = &args.image {
        let bytes = std::fs::read(image)
            .with_context(|| format!("read image '{}'", image.display()))?;
        slide = slide.with_image(bytes);
    }

    if args.dump_plan {
        print_json(&slideforge::compile_slide(&slide))?;
    }

    let mut fonts = slideforge::FontConfig::from_env();
    if let Some(p) = args.font {
        fonts = fonts.with_regular(p);
    }
    if let Some(p) = args.font_bold {
        fonts = fonts.with_bold(p);
    }
    let raster = slideforge::RasterOpts::default()
        .with_fonts(fonts.clone())
        .with_jpeg_quality(args.jpeg_quality);
    let mut document = slideforge::DocumentOpts::default().with_fonts(fonts);
    if let Some(family) = args.font_family {
        document = document.with_font_family(family);
    }

    let service = slideforge::ExportService::with_opts(raster, document);
    let file = service
        .export(&slide, &args.format)
        .with_context(|| format!("export slide as '{}'", args.format))?;

    let out = args.out.unwrap_or_else(|| PathBuf::from(&file.file_name));
    write_output(&out, &file.bytes)?;
    eprintln!("wrote {} ({})", out.display(), file.content_type);
    Ok(())
}

fn cmd_crop(args: CropArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read photo '{}'", args.in_path.display()))?;
    let face = match &args.face {
        Some(path) => read_json::<slideforge::FaceDetection>(path, "face detection")?,
        None => slideforge::FaceDetection::none(),
    };
    let cropped = slideforge::crop_to_face(&bytes, &face, args.size)
        .with_context(|| format!("crop '{}'", args.in_path.display()))?;
    write_output(&args.out, &cropped.jpeg)?;
    print_json(&cropped.info)
}
