use crate::config::load_config;
use crate::hierarchy::build_hierarchy;
use crate::highlight::ancestor_path;
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::parser::parse_records;
use crate::render::{render_svg, render_svg_highlighted, write_output_svg};
use crate::theme::Theme;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "dendro",
    version,
    about = "Radial dendrogram renderer for flat path-delimited data"
)]
pub struct Args {
    /// Input records (JSON array or line format) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON5 file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Artboard width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Artboard height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Path delimiter inside record ids
    #[arg(short = 'd', long = "delimiter")]
    pub delimiter: Option<String>,

    /// Theme preset (classic, midnight)
    #[arg(short = 't', long = "theme")]
    pub theme: Option<String>,

    /// Render with this node's ancestor path at full opacity and the rest
    /// dimmed
    #[arg(long = "highlight")]
    pub highlight: Option<String>,

    /// Write the positioned tree as JSON to this path
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if let Some(delimiter) = args.delimiter {
        config.layout.delimiter = delimiter;
    }
    if let Some(name) = args.theme.as_deref() {
        config.theme = Theme::by_name(name)
            .ok_or_else(|| anyhow::anyhow!("unknown theme {name:?}"))?;
    }

    let input = read_input(args.input.as_deref())?;
    let records = parse_records(&input)?;
    let tree = build_hierarchy(&records, &config.layout.delimiter)?;
    let layout = compute_layout(tree.as_ref(), &config.layout, &config.render);

    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &layout)?;
    }

    let svg = match args.highlight.as_deref() {
        Some(hovered) => {
            let path = ancestor_path(hovered, &records, &config.layout.delimiter);
            render_svg_highlighted(&layout, &config.theme, &config.layout, Some(&path))
        }
        None => render_svg(&layout, &config.theme, &config.layout),
    };

    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_png(&svg, &output, &config.theme)?;
        }
    }

    Ok(())
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, theme: &Theme) -> Result<()> {
    crate::render::write_output_png(svg, output, theme)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _theme: &Theme) -> Result<()> {
    Err(anyhow::anyhow!(
        "this build has no PNG support; enable the `png` feature"
    ))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_output_requires_a_path() {
        assert!(ensure_output(&None, "png").is_err());
        assert_eq!(
            ensure_output(&Some(PathBuf::from("out.png")), "png").unwrap(),
            PathBuf::from("out.png")
        );
    }
}
