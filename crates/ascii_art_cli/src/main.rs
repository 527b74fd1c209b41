use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ascii_art::{AsciiConverter, ColorMode, Conversion, ConversionSettings};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn, LevelFilter};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert images to colored ASCII art")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the ASCII text to stdout for a quick preview
    Preview(PreviewArgs),
    /// Convert an image and write the rendered PNG to disk
    Convert(ConvertArgs),
    /// Convert every image in a directory
    Batch(BatchArgs),
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input image path
    input: PathBuf,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input image path
    input: PathBuf,
    /// Output PNG path
    #[arg(short, long)]
    output: PathBuf,
    /// Also write the ASCII text to this path
    #[arg(long)]
    text: Option<PathBuf>,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Directory of input images
    input: PathBuf,
    /// Output directory for rendered images
    #[arg(short, long)]
    out_dir: PathBuf,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug, Clone)]
struct RenderSettings {
    /// TOML file with `width`, `contrast`, `brightness` and `color_mode`
    #[arg(long)]
    config: Option<PathBuf>,
    /// Target column width
    #[arg(long)]
    width: Option<u32>,
    /// Contrast factor around the image mean
    #[arg(long)]
    contrast: Option<f32>,
    /// Brightness factor
    #[arg(long)]
    brightness: Option<f32>,
    /// Glyph color policy (true_color, mono, grayscale, red, green, blue, cyan, magenta, yellow)
    #[arg(long)]
    color_mode: Option<ColorMode>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();

    match cli.command {
        Commands::Preview(args) => preview(args),
        Commands::Convert(args) => convert(args),
        Commands::Batch(args) => batch(args),
    }
}

fn preview(args: PreviewArgs) -> Result<()> {
    let settings = args.settings.resolve()?;
    let conversion = convert_file(&args.input, &settings)?;
    println!("{}", conversion.text);
    Ok(())
}

fn convert(args: ConvertArgs) -> Result<()> {
    let settings = args.settings.resolve()?;
    let conversion = convert_file(&args.input, &settings)?;

    fs::write(&args.output, &conversion.png)
        .with_context(|| format!("failed to write {:?}", args.output))?;
    if let Some(text_path) = &args.text {
        fs::write(text_path, format!("{}\n", conversion.text))
            .with_context(|| format!("failed to write {:?}", text_path))?;
    }

    info!(
        "converted {}x{} image with {}",
        conversion.source_width,
        conversion.source_height,
        settings.summary()
    );
    Ok(())
}

fn batch(args: BatchArgs) -> Result<()> {
    let settings = args.settings.resolve()?;
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create output directory {:?}", args.out_dir))?;

    let inputs = collect_inputs(&args.input)?;
    let progress = ProgressBar::new(inputs.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} images",
        )?
        .progress_chars("=> "),
    );

    let mut failed = 0usize;
    for input in &inputs {
        match convert_file(input, &settings) {
            Ok(conversion) => {
                let output = output_path(&args.out_dir, input);
                fs::write(&output, &conversion.png)
                    .with_context(|| format!("failed to write {:?}", output))?;
            },
            Err(err) => {
                warn!("skipping {}: {err:#}", input.display());
                failed += 1;
            },
        }
        progress.inc(1);
    }

    progress.finish_with_message(format!("Images written to {:?}", args.out_dir));

    if failed > 0 {
        anyhow::bail!("{failed} of {} images could not be converted", inputs.len());
    }
    Ok(())
}

fn convert_file(path: &Path, settings: &ConversionSettings) -> Result<Conversion> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {:?}", path))?;
    AsciiConverter
        .convert(&bytes, settings)
        .with_context(|| format!("failed to render {:?}", path))
}

fn collect_inputs(path: &Path) -> Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .collect();
    entries.sort();
    if entries.is_empty() {
        anyhow::bail!("no files found in {:?}", path);
    }
    Ok(entries)
}

fn output_path(out_dir: &Path, input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|stem| stem.to_str()).unwrap_or("image");
    out_dir.join(format!("{stem}.ascii.png"))
}

impl RenderSettings {
    /// Config file values first, then explicit flags.
    fn resolve(&self) -> Result<ConversionSettings> {
        let mut settings = match &self.config {
            Some(path) => load_config(path)?,
            None => ConversionSettings::default(),
        };

        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(contrast) = self.contrast {
            settings.contrast = contrast;
        }
        if let Some(brightness) = self.brightness {
            settings.brightness = brightness;
        }
        if let Some(color_mode) = self.color_mode {
            settings.color_mode = color_mode;
        }

        settings.validate()?;
        debug!("resolved settings: {}", settings.summary());
        Ok(settings)
    }
}

fn load_config(path: &Path) -> Result<ConversionSettings> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read config {:?}", path))?;
    parse_config(&contents).with_context(|| format!("failed to parse config {:?}", path))
}

fn parse_config(contents: &str) -> Result<ConversionSettings> {
    Ok(toml::from_str(contents)?)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageOutputFormat, Rgba, RgbaImage};

    use super::*;

    fn flags() -> RenderSettings {
        RenderSettings {
            config: None,
            width: None,
            contrast: None,
            brightness: None,
            color_mode: None,
        }
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let settings = parse_config("width = 120\ncolor_mode = \"cyan\"\n").unwrap();
        assert_eq!(settings.width, 120);
        assert_eq!(settings.color_mode, ColorMode::Cyan);
        assert_eq!(settings.contrast, 1.0);
    }

    #[test]
    fn config_rejects_unknown_mode() {
        assert!(parse_config("color_mode = \"sepia\"").is_err());
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("ascii.toml");
        fs::write(&config, "width = 80\nbrightness = 1.5\n").unwrap();

        let settings = RenderSettings { config: Some(config), width: Some(100), ..flags() }
            .resolve()
            .unwrap();

        assert_eq!(settings.width, 100);
        assert_eq!(settings.brightness, 1.5);
    }

    #[test]
    fn resolve_rejects_zero_width() {
        assert!(RenderSettings { width: Some(0), ..flags() }.resolve().is_err());
    }

    #[test]
    fn batch_skips_broken_files_and_reports() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();

        let image = RgbaImage::from_pixel(20, 20, Rgba([90, 120, 150, 255]));
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png).unwrap();
        fs::write(input.path().join("good.png"), bytes).unwrap();
        fs::write(input.path().join("notes.txt"), "not an image").unwrap();

        let args = BatchArgs {
            input: input.path().to_path_buf(),
            out_dir: output.path().to_path_buf(),
            settings: RenderSettings { width: Some(10), ..flags() },
        };

        assert!(batch(args).is_err());
        assert!(output.path().join("good.ascii.png").is_file());
        assert!(!output.path().join("notes.ascii.png").exists());
    }
}
