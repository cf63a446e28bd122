use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use text_image::{
    CanvasSpec, FontRef, HorizontalAlign, Rgb, StyleConfig, TextPainter, VerticalAlign,
};
use thiserror::Error;

/// Render text into an image, with control over size, alignment and colors.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Text to render. Use a newline (or a literal `\n`) to break lines
    #[arg(long)]
    text: String,

    /// Font file (.ttf/.otf). Leave out to use the default font
    #[arg(long, default_value = "")]
    font: String,

    /// Where to write the image. The format follows the extension
    #[arg(long, default_value = "output.png")]
    output: PathBuf,

    /// Image width in pixels. Fits the text when left out
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    width: Option<u32>,

    /// Image height in pixels. Fits the text when left out
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    height: Option<u32>,

    #[arg(long, value_enum, default_value_t = HorizontalArg::Center)]
    horizontal_align: HorizontalArg,

    #[arg(long, value_enum, default_value_t = VerticalArg::Center)]
    vertical_align: VerticalArg,

    /// Font size in pixels
    #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(u32).range(1..))]
    font_size: u32,

    /// Text color as "R,G,B"
    #[arg(long, default_value = "0,0,0")]
    text_color: String,

    /// Background color as "R,G,B"
    #[arg(long, default_value = "255,255,255")]
    bg_color: String,

    /// Space between the text and the image edges, in pixels
    #[arg(long, default_value_t = 20)]
    padding: u32,
}

#[derive(ValueEnum, Debug, Copy, Clone)]
enum HorizontalArg {
    Left,
    Center,
    Right,
}

impl From<HorizontalArg> for HorizontalAlign {
    fn from(arg: HorizontalArg) -> Self {
        match arg {
            HorizontalArg::Left => HorizontalAlign::Left,
            HorizontalArg::Center => HorizontalAlign::Center,
            HorizontalArg::Right => HorizontalAlign::Right,
        }
    }
}

#[derive(ValueEnum, Debug, Copy, Clone)]
enum VerticalArg {
    Top,
    Center,
    Bottom,
}

impl From<VerticalArg> for VerticalAlign {
    fn from(arg: VerticalArg) -> Self {
        match arg {
            VerticalArg::Top => VerticalAlign::Top,
            VerticalArg::Center => VerticalAlign::Center,
            VerticalArg::Bottom => VerticalAlign::Bottom,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid color {input:?}: expected three 0-255 values like \"255,0,0\"")]
struct ColorFormatError {
    input: String,
}

fn parse_color(input: &str) -> Result<Rgb, ColorFormatError> {
    let err = || ColorFormatError { input: input.to_string() };

    let components = input
        .split(',')
        .map(|part| part.trim().parse::<u8>().map_err(|_| err()))
        .collect::<Result<Vec<u8>, _>>()?;

    match components[..] {
        [r, g, b] => Ok(Rgb(r, g, b)),
        _ => Err(err()),
    }
}

/// Both colors fall back to the defaults if either one is malformed.
fn parse_colors(text: &str, background: &str) -> (Rgb, Rgb) {
    match (parse_color(text), parse_color(background)) {
        (Ok(text), Ok(background)) => (text, background),
        (Err(err), _) | (_, Err(err)) => {
            log::warn!("{err}; using black text on white");
            (Rgb::BLACK, Rgb::WHITE)
        },
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("text_image=info"))
        .init();

    let args = Args::parse();

    let (text_color, background) = parse_colors(&args.text_color, &args.bg_color);

    let style = StyleConfig::new()
        .with_font(FontRef::from_arg(&args.font))
        .with_font_size(args.font_size)
        .with_text_color(text_color)
        .with_background(background)
        .with_padding(args.padding)
        .with_alignment(args.horizontal_align.into(), args.vertical_align.into());

    let canvas = CanvasSpec { width: args.width, height: args.height };
    let text = args.text.replace("\\n", "\n");

    let mut painter = TextPainter::new();
    let rendered = text_image::render_with(&mut painter, &text, &style, canvas)
        .context("failed to render text")?;

    rendered
        .canvas
        .save(&args.output)
        .with_context(|| format!("failed to save {}", args.output.display()))?;

    println!(
        "saved image to {} ({}x{})",
        args.output.display(),
        rendered.width,
        rendered.height
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_triples() {
        assert_eq!(parse_color("255,0,0"), Ok(Rgb(255, 0, 0)));
        assert_eq!(parse_color(" 1, 2 ,3 "), Ok(Rgb(1, 2, 3)));
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!(parse_color("256,0,0").is_err());
        assert!(parse_color("1,2").is_err());
        assert!(parse_color("1,2,3,4").is_err());
        assert!(parse_color("red").is_err());
        assert!(parse_color("").is_err());
    }

    #[test]
    fn one_bad_color_resets_both() {
        assert_eq!(parse_colors("1,2,3", "4,5,6"), (Rgb(1, 2, 3), Rgb(4, 5, 6)));
        assert_eq!(parse_colors("1,2,3", "nope"), (Rgb::BLACK, Rgb::WHITE));
    }

    #[test]
    fn cli_defaults() {
        let args = Args::try_parse_from(["text-image", "--text", "hi"]).unwrap();
        assert_eq!(args.output, PathBuf::from("output.png"));
        assert_eq!(args.font_size, 40);
        assert_eq!(args.padding, 20);
        assert!(args.width.is_none() && args.height.is_none());
        assert!(matches!(args.horizontal_align, HorizontalArg::Center));
        assert!(matches!(args.vertical_align, VerticalArg::Center));
    }

    #[test]
    fn cli_rejects_zero_font_size() {
        assert!(Args::try_parse_from(["text-image", "--text", "hi", "--font-size", "0"]).is_err());
    }
}
