use std::path::PathBuf;

use clap::Parser;
use psp_common::Rect;

/// psp: headless front-end for the personalization panel and quick-set strip.
#[derive(Parser, Debug)]
#[command(name = "psp", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error) or a full filter
    /// directive such as `psp_channel=trace`.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Read user actions from this JSON-lines file instead of stdin.
    #[arg(long)]
    pub actions: Option<PathBuf>,

    /// Check that the preferences service is reachable before starting.
    #[arg(long)]
    pub diagnose: bool,

    /// Screen work area as WIDTHxHEIGHT.
    #[arg(long, default_value = "1920x1040", value_parser = parse_screen)]
    pub screen: Rect,
}

pub fn parse() -> Args {
    Args::parse()
}

fn parse_screen(s: &str) -> Result<Rect, String> {
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let width: u32 = w.trim().parse().map_err(|_| format!("bad width '{w}'"))?;
    let height: u32 = h.trim().parse().map_err(|_| format!("bad height '{h}'"))?;
    if width == 0 || height == 0 {
        return Err("screen size must be non-zero".into());
    }
    Ok(Rect::new(0.0, 0.0, f64::from(width), f64::from(height)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["psp"]).unwrap();
        assert!(args.config.is_none());
        assert!(!args.diagnose);
        assert_eq!(args.screen, Rect::new(0.0, 0.0, 1920.0, 1040.0));
    }

    #[test]
    fn all_flags() {
        let args = Args::try_parse_from([
            "psp",
            "--config",
            "/tmp/psp.toml",
            "--log-level",
            "debug",
            "--actions",
            "actions.jsonl",
            "--diagnose",
            "--screen",
            "1280x720",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/psp.toml")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.actions, Some(PathBuf::from("actions.jsonl")));
        assert!(args.diagnose);
        assert_eq!(args.screen.width, 1280.0);
    }

    #[test]
    fn bad_screen_rejected() {
        assert!(parse_screen("1920").is_err());
        assert!(parse_screen("0x100").is_err());
        assert!(parse_screen("axb").is_err());
    }
}
