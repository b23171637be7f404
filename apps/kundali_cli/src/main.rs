use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::fmt::Write as _;
use std::path::PathBuf;

use kundali::angles::{degrees_minutes_seconds, sign_name};
use kundali::export::{dasha_rows, position_rows};
use kundali::time::parse_utc_offset;
use kundali::{
    generate, AspectSettings, ChartReport, ChartRequest, ChartWarning, GeoLocation, MatchPolicy,
    NodeMode, SwissEphemerisAdapter, ZodiacMode,
};
use kundali_config::{load_config, parse_ayanamsa, parse_house_system, KundaliConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Zodiac {
    Tropical,
    Sidereal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Node {
    /// Osculating node.
    True,
    Mean,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Table,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Compute a birth chart with aspects, panchang and dasha")]
struct Args {
    /// Civil date, YYYY-MM-DD (falls back to [birth].date).
    #[arg(long)]
    date: Option<String>,

    /// Civil time, HH:MM or HH:MM:SS (falls back to [birth].time).
    #[arg(long)]
    time: Option<String>,

    /// UTC offset in hours (5.5) or ±HH:MM (+05:30).
    #[arg(long, allow_hyphen_values = true)]
    tz: Option<String>,

    /// Latitude in degrees, north positive.
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude in degrees, east positive.
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// whole_sign, placidus, koch, equal, regiomontanus, campanus, alcabitius, morinus, porphyry.
    #[arg(long)]
    house_system: Option<String>,

    #[arg(long, value_enum)]
    zodiac: Option<Zodiac>,

    /// lahiri, raman, krishnamurti, fagan_bradley, yukteshwar.
    #[arg(long)]
    ayanamsa: Option<String>,

    #[arg(long, value_enum)]
    node: Option<Node>,

    /// Add Uranus, Neptune and Pluto.
    #[arg(long)]
    outer_planets: bool,

    /// Correct positions for parallax at the birth place.
    #[arg(long)]
    topocentric: bool,

    /// Include Rahu and Ketu in aspect pairs.
    #[arg(long)]
    aspect_nodes: bool,

    /// Keep only the closest aspect when orbs overlap.
    #[arg(long)]
    closest_aspect: bool,

    /// TOML config (default: kundali.toml or configs/kundali.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Swiss Ephemeris data directory (overrides [ephemeris].path).
    #[arg(long)]
    ephe_path: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

fn required<T>(flag: Option<T>, config: Option<T>, name: &str) -> anyhow::Result<T> {
    flag.or(config)
        .ok_or_else(|| anyhow::anyhow!("Missing --{name} (or [birth].{name} in config)"))
}

/// Merge flags over config values. Flags win.
fn build_request(args: &Args, cfg: &KundaliConfig) -> anyhow::Result<ChartRequest> {
    let birth = &cfg.birth;
    let date = required(args.date.clone(), birth.date.clone(), "date")?;
    let time = required(args.time.clone(), birth.time.clone(), "time")?;
    let tz = required(args.tz.clone(), birth.tz.clone(), "tz")?;
    let lat = required(args.lat, birth.lat, "lat")?;
    let lon = required(args.lon, birth.lon, "lon")?;
    let offset = parse_utc_offset(&tz).with_context(|| format!("Invalid --tz {tz}"))?;

    let house_system = match args.house_system.as_deref() {
        Some(name) => parse_house_system(name)?,
        None => cfg.chart.house_system,
    };
    let zodiac = match args.zodiac {
        Some(Zodiac::Tropical) => ZodiacMode::Tropical,
        Some(Zodiac::Sidereal) => ZodiacMode::Sidereal,
        None => cfg.chart.zodiac,
    };
    let ayanamsa = match args.ayanamsa.as_deref() {
        Some(name) => parse_ayanamsa(name)?,
        None => cfg.chart.ayanamsa,
    };
    let node_mode = match args.node {
        Some(Node::True) => NodeMode::True,
        Some(Node::Mean) => NodeMode::Mean,
        None => cfg.chart.node_mode,
    };

    let mut request = ChartRequest::new(date, time, offset, GeoLocation::new(lat, lon))
        .with_house_system(house_system)
        .with_node_mode(node_mode)
        .with_outer_planets(args.outer_planets || cfg.chart.outer_planets)
        .with_topocentric(args.topocentric || cfg.chart.topocentric);
    request.zodiac = zodiac;
    request.ayanamsa = ayanamsa;
    Ok(request)
}

fn aspect_settings(args: &Args, cfg: &KundaliConfig) -> AspectSettings {
    let mut settings = cfg.aspects.clone();
    if args.aspect_nodes {
        settings.include_nodes = true;
    }
    if args.closest_aspect {
        settings.policy = MatchPolicy::Closest;
    }
    settings
}

fn dms_text(lon: f64) -> String {
    let dms = degrees_minutes_seconds(lon);
    format!("{}°{:02}'{:02}\"", dms.deg, dms.min, dms.sec)
}

fn render_table(report: &ChartReport) -> Result<String, std::fmt::Error> {
    let snap = &report.snapshot;
    let mut out = String::new();

    let ayanamsa = snap
        .ayanamsa
        .map(|a| format!("{a:.6}"))
        .unwrap_or_else(|| "none".to_string());
    writeln!(out, "UTC: {} | JD: {:.6} | Ayanamsa (deg): {}", snap.utc, snap.jd_ut, ayanamsa)?;
    writeln!(
        out,
        "Zodiac: {} | Houses: {} | Positions: {}",
        snap.zodiac.name(),
        snap.house_system.name(),
        if snap.topocentric { "topocentric" } else { "geocentric" }
    )?;
    for (label, value) in [("Ascendant", snap.ascendant), ("Midheaven", snap.midheaven)] {
        match value {
            Some(lon) => {
                writeln!(out, "{label}: {} {}", sign_name(lon), dms_text(lon))?;
            }
            None => {
                writeln!(out, "{label}: unknown")?;
            }
        }
    }

    writeln!(out, "\nPositions")?;
    writeln!(out, "{:<8} {:>11}  {:<12} {:>4} {:>3} {:>3}", "Body", "Longitude", "Sign", "Deg", "Min", "Sec")?;
    for row in position_rows(snap) {
        writeln!(
            out,
            "{:<8} {:>11.6}  {:<12} {:>4} {:>3} {:>3}{}",
            row.body,
            row.longitude,
            row.sign,
            row.deg,
            row.min,
            row.sec,
            if row.retrograde { "  R" } else { "" }
        )?;
    }

    writeln!(out, "\nPanchang")?;
    match &report.panchang {
        Some(p) => {
            writeln!(
                out,
                "Tithi: {} ({:?} {}) | Nakshatra: {} ({}) | Yoga: {} ({}) | Karana: {}",
                p.tithi,
                p.paksha(),
                p.tithi_in_paksha(),
                p.nakshatra,
                p.nakshatra_name(),
                p.yoga,
                p.yoga_name(),
                p.karana
            )?;
        }
        None => {
            writeln!(out, "Panchang could not be computed.")?;
        }
    }

    writeln!(out, "\nVimshottari Mahadasha")?;
    match &report.dasha {
        Some(periods) => {
            for row in dasha_rows(periods) {
                writeln!(out, "{}: {:.3} years (from {:.3})", row.ruler, row.years, row.offset)?;
            }
        }
        None => {
            writeln!(out, "Dasha could not be computed.")?;
        }
    }

    writeln!(out, "\nAspects")?;
    for a in &report.aspects {
        writeln!(
            out,
            "{} {} {}: {:.2}° (orb {:.2}){}",
            a.body_a,
            a.name,
            a.body_b,
            a.separation,
            a.deviation,
            match a.applying {
                Some(true) => ", applying",
                Some(false) => ", separating",
                None => "",
            }
        )?;
    }

    if !snap.warnings.is_empty() {
        writeln!(out, "\nWarnings")?;
        for w in &snap.warnings {
            let text = match w {
                ChartWarning::BodyUnavailable { body, reason } => format!("{body} unavailable: {reason}"),
                ChartWarning::NodesUnavailable { reason } => format!("Rahu/Ketu unavailable: {reason}"),
                ChartWarning::AnglesUnavailable { reason } => format!("Ascendant/houses unavailable: {reason}"),
                ChartWarning::SiderealDegraded { reason } => {
                    format!("Sidereal correction failed, longitudes are tropical: {reason}")
                }
            };
            writeln!(out, "- {text}")?;
        }
    }
    Ok(out)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let cfg = load_config(args.config.as_deref())?;
    let request = build_request(&args, &cfg)?;
    let settings = aspect_settings(&args, &cfg);

    let ephe_path = args.ephe_path.clone().or_else(|| cfg.ephemeris.path.clone());
    let provider = SwissEphemerisAdapter::new(ephe_path).context("Failed to open Swiss Ephemeris")?;
    log::info!("ephemeris data: {}", provider.ephemeris_path().display());

    let report = generate(&provider, &request, &settings).context("Chart generation failed")?;
    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Table => print!("{}", render_table(&report)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kundali::{Ayanamsa, Body, HouseSystem, StaticEphemeris};

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("kundali").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_and_build_request() -> anyhow::Result<()> {
        let args = parse(&[
            "--date", "1990-01-01", "--time", "06:00", "--tz", "+05:30", "--lat", "19.076",
            "--lon", "72.8777", "--house-system", "placidus", "--zodiac", "sidereal",
            "--ayanamsa", "raman", "--node", "mean", "--outer-planets", "--topocentric",
            "--format", "json",
        ]);
        assert_eq!(args.format, Format::Json);
        let req = build_request(&args, &KundaliConfig::default())?;
        assert_eq!(req.utc_offset_hours, 5.5);
        assert_eq!(req.house_system, HouseSystem::Placidus);
        assert_eq!(req.zodiac, ZodiacMode::Sidereal);
        assert_eq!(req.ayanamsa, Ayanamsa::Raman);
        assert_eq!(req.node_mode, NodeMode::Mean);
        assert!(req.outer_planets);
        assert!(req.topocentric);
        Ok(())
    }

    #[test]
    fn test_negative_coordinates_and_offset() -> anyhow::Result<()> {
        let args = parse(&[
            "--date", "2001-07-15", "--time", "14:30", "--tz", "-4", "--lat", "-33.87",
            "--lon", "-70.65",
        ]);
        let req = build_request(&args, &KundaliConfig::default())?;
        assert_eq!(req.utc_offset_hours, -4.0);
        assert_eq!(req.location.lat, -33.87);
        assert_eq!(args.format, Format::Table);
        Ok(())
    }

    #[test]
    fn test_flags_override_config() -> anyhow::Result<()> {
        let cfg = kundali_config::parse_config(
            "[birth]\ndate = \"1990-01-01\"\ntime = \"06:00\"\ntz = \"5.5\"\nlat = 18.52\nlon = 73.85\n\n[chart]\nhouse_system = \"equal\"\n",
        )?;
        let args = parse(&["--time", "07:15", "--closest-aspect", "--aspect-nodes"]);
        let req = build_request(&args, &cfg)?;
        assert_eq!(req.date, "1990-01-01");
        assert_eq!(req.time, "07:15");
        assert_eq!(req.house_system, HouseSystem::Equal);

        let settings = aspect_settings(&args, &cfg);
        assert_eq!(settings.policy, MatchPolicy::Closest);
        assert!(settings.include_nodes);
        Ok(())
    }

    #[test]
    fn test_missing_birth_data() {
        let args = parse(&["--date", "1990-01-01"]);
        assert!(build_request(&args, &KundaliConfig::default()).is_err());
        assert!(Args::try_parse_from(["kundali", "--zodiac", "draconic"]).is_err());
    }

    #[test]
    fn test_table_output() -> anyhow::Result<()> {
        let provider = StaticEphemeris::new()
            .with_body(Body::Sun, 256.375, 1.0)
            .with_body(Body::Moon, 0.0, 13.0)
            .with_angles(125.0, 35.0);
        let args = parse(&[
            "--date", "1990-01-01", "--time", "06:00", "--tz", "5.5", "--lat", "19.0", "--lon", "72.8",
        ]);
        let req = build_request(&args, &KundaliConfig::default())?;
        let report = generate(&provider, &req, &AspectSettings::default())?;
        let table = render_table(&report)?;
        assert!(table.contains("UTC: 1990-01-01T00:30:00Z"));
        assert!(table.contains("Ascendant: Leo 125°00'00\""));
        assert!(table.contains("Positions: geocentric"));
        assert!(table.contains("Ketu: 7.000 years (from 0.000)"));
        assert!(table.contains("Rahu/Ketu unavailable"));
        Ok(())
    }
}
