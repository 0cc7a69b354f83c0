use std::ffi::OsString;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser};
use log::debug;
use slime_render::{resolve_input, RenderConfig, SlimeRenderer};

/// Program name and description shown by `--help`.
#[derive(Clone, Copy, Debug)]
pub struct Surface {
    pub name: &'static str,
    pub about: &'static str,
}

impl Surface {
    pub const TERMSLIME: Surface =
        Surface { name: "termslime", about: "Display an image in your terminal with true colors." };

    pub const TSLIME: Surface = Surface {
        name: "tslime",
        about: "Termslime displays images in your terminal with true colors. Project home page: \
                https://github.com/garyzbm/termslime.",
    };
}

#[derive(Parser, Debug)]
pub struct Args {
    /// Path to an image file or a directory containing image files
    pub path: PathBuf,
    /// Maximum number of lines of blocks to display the image in the terminal
    #[arg(long = "heightLimit", visible_alias = "height-limit", default_value_t = 500)]
    pub height_limit: u32,
    /// Maximum number of blocks per line to display the image in the terminal
    #[arg(long = "widthLimit", visible_alias = "width-limit", default_value_t = 1000)]
    pub width_limit: u32,
    /// Number of empty lines before the image
    #[arg(long = "beginPadding", visible_alias = "begin-padding", default_value_t = 1)]
    pub begin_padding: usize,
    /// Number of empty lines after the image
    #[arg(long = "endPadding", visible_alias = "end-padding", default_value_t = 0)]
    pub end_padding: usize,
    /// Number of empty spaces at the beginning of each line of the image
    #[arg(long = "leftPadding", visible_alias = "left-padding", default_value_t = 1)]
    pub left_padding: usize,
}

/// Single-dash spellings accepted alongside the long flags.
const LEGACY_FLAGS: &[(&str, &str)] = &[
    ("-hl", "--heightLimit"),
    ("-wl", "--widthLimit"),
    ("-bp", "--beginPadding"),
    ("-ep", "--endPadding"),
    ("-lp", "--leftPadding"),
];

/// Rewrites `-hl 5` and `-hl=5` style flags to their long form.
///
/// clap short flags are a single character, so these would otherwise parse
/// as a cluster of `-h` and `-l`.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut positional_only = false;

    for arg in args.into_iter().map(Into::into) {
        if positional_only {
            normalized.push(arg);
            continue;
        }
        if arg == "--" {
            positional_only = true;
            normalized.push(arg);
            continue;
        }

        let rewritten = arg.to_str().and_then(|text| {
            LEGACY_FLAGS.iter().find_map(|(short, long)| {
                if text == *short {
                    Some(OsString::from(*long))
                } else {
                    text.strip_prefix(short)
                        .and_then(|rest| rest.strip_prefix('='))
                        .map(|value| OsString::from(format!("{long}={value}")))
                }
            })
        });
        normalized.push(rewritten.unwrap_or(arg));
    }

    normalized
}

impl Args {
    pub fn parse_for<I>(surface: Surface, args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator,
        I::Item: Into<OsString>,
    {
        let mut command =
            Args::command().name(surface.name).bin_name(surface.name).about(surface.about);
        let matches = command.try_get_matches_from_mut(normalize_args(args))?;
        Args::from_arg_matches(&matches).map_err(|err| err.format(&mut command))
    }

    pub fn to_config(&self) -> RenderConfig {
        RenderConfig {
            height_limit: self.height_limit,
            width_limit: self.width_limit,
            begin_padding: self.begin_padding,
            end_padding: self.end_padding,
            left_padding: self.left_padding,
        }
    }
}

/// Entry point shared by every binary.
pub fn run(surface: Surface) -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse_for(surface, std::env::args_os()).unwrap_or_else(|err| err.exit());
    render(&args)
}

fn render(args: &Args) -> Result<()> {
    let image_path = resolve_input(&args.path, &mut rand::thread_rng())
        .with_context(|| format!("failed to resolve {:?}", args.path))?;
    debug!("rendering {}", image_path.display());

    let config = args.to_config();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    SlimeRenderer
        .render_path(&image_path, &config, &mut out)
        .with_context(|| format!("failed to render {:?}", image_path))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::parse_for(Surface::TERMSLIME, args.iter().copied()).unwrap()
    }

    #[test]
    fn defaults() {
        let args = parse(&["termslime", "cat.png"]);
        assert_eq!(args.path, PathBuf::from("cat.png"));
        assert_eq!(args.to_config(), RenderConfig::default());
    }

    #[test]
    fn legacy_single_dash_flags() {
        let args = parse(&[
            "termslime", "-hl", "20", "-wl=30", "-bp", "0", "-ep", "2", "-lp", "4", "dir",
        ]);
        assert_eq!(
            args.to_config(),
            RenderConfig {
                height_limit: 20,
                width_limit: 30,
                begin_padding: 0,
                end_padding: 2,
                left_padding: 4,
            }
        );
    }

    #[test]
    fn long_flags_and_aliases() {
        let args = parse(&["tslime", "--heightLimit", "7", "--width-limit=9", "x.bmp"]);
        assert_eq!(args.height_limit, 7);
        assert_eq!(args.width_limit, 9);
    }

    #[test]
    fn negative_values_are_rejected() {
        let result = Args::parse_for(Surface::TERMSLIME, ["termslime", "-lp", "-1", "x.png"]);
        assert!(result.is_err());
    }

    #[test]
    fn path_is_required() {
        assert!(Args::parse_for(Surface::TERMSLIME, ["termslime"]).is_err());
    }

    #[test]
    fn legacy_flags_after_double_dash_are_paths() {
        let normalized = normalize_args(["termslime", "--", "-hl"]);
        assert_eq!(normalized, vec![OsString::from("termslime"), "--".into(), "-hl".into()]);
    }

    #[test]
    fn surfaces_differ_only_in_metadata() {
        let err = Args::parse_for(Surface::TSLIME, ["tslime", "--help"]).unwrap_err();
        assert!(err.to_string().contains("garyzbm/termslime"));

        let err = Args::parse_for(Surface::TERMSLIME, ["termslime", "--help"]).unwrap_err();
        assert!(err.to_string().contains("Display an image in your terminal"));
    }
}
