use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use kundali::{
    AspectDefinition, AspectSettings, Ayanamsa, HouseSystem, MatchPolicy, NodeMode, ZodiacMode,
};

/// Relative paths tried when no config file is given explicitly.
pub const CONFIG_CANDIDATES: [&str; 2] = ["kundali.toml", "configs/kundali.toml"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KundaliConfig {
    pub birth: BirthDefaults,
    pub chart: ChartDefaults,
    pub ephemeris: EphemerisSettings,
    pub aspects: AspectSettings,
}

/// Birth data that the command line may leave out.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BirthDefaults {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    /// Decimal hours or `±HH:MM`
    #[serde(default)]
    pub tz: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartDefaults {
    pub house_system: HouseSystem,
    pub zodiac: ZodiacMode,
    pub ayanamsa: Ayanamsa,
    pub node_mode: NodeMode,
    pub outer_planets: bool,
    pub topocentric: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EphemerisSettings {
    /// Swiss Ephemeris data directory; `None` defers to the adapter's lookup.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ChartToml {
    #[serde(default)]
    house_system: Option<String>,
    #[serde(default)]
    zodiac: Option<String>,
    #[serde(default)]
    ayanamsa: Option<String>,
    #[serde(default)]
    node: Option<String>,
    #[serde(default)]
    outer_planets: bool,
    #[serde(default)]
    topocentric: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct AspectsToml {
    #[serde(default)]
    include_nodes: bool,
    #[serde(default)]
    policy: Option<String>,
    #[serde(default)]
    definitions: Option<Vec<AspectDefinition>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    birth: BirthDefaults,
    #[serde(default)]
    chart: ChartToml,
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    aspects: AspectsToml,
}

/// Read an explicit config file, or the first candidate that exists.
///
/// `Ok(None)` means no candidate was found.
pub fn read_config_text(path: Option<&Path>) -> anyhow::Result<Option<String>> {
    if let Some(p) = path {
        let text = fs::read_to_string(p)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {e}", p.display()))?;
        return Ok(Some(text));
    }
    for p in &CONFIG_CANDIDATES {
        if let Ok(text) = fs::read_to_string(p) {
            log::debug!("using config {}", p);
            return Ok(Some(text));
        }
    }
    Ok(None)
}

/// Load configuration, falling back to defaults when no file is present.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<KundaliConfig> {
    match read_config_text(path)? {
        Some(text) => parse_config(&text),
        None => Ok(KundaliConfig::default()),
    }
}

pub fn parse_config(text: &str) -> anyhow::Result<KundaliConfig> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse kundali config: {e}"))?;
    let RootConfigToml {
        birth,
        chart,
        ephemeris,
        aspects,
    } = root;

    Ok(KundaliConfig {
        birth,
        chart: chart_defaults(chart)?,
        ephemeris: EphemerisSettings {
            path: ephemeris.path,
        },
        aspects: aspect_settings(aspects)?,
    })
}

fn chart_defaults(chart: ChartToml) -> anyhow::Result<ChartDefaults> {
    let house_system = match chart.house_system.as_deref() {
        Some(name) => parse_house_system(name)?,
        None => HouseSystem::default(),
    };
    let zodiac = match chart.zodiac.as_deref() {
        Some(name) => parse_zodiac(name)?,
        None => ZodiacMode::default(),
    };
    let ayanamsa = match chart.ayanamsa.as_deref() {
        Some(name) => parse_ayanamsa(name)?,
        None => Ayanamsa::default(),
    };
    let node_mode = match chart.node.as_deref() {
        Some(name) => parse_node_mode(name)?,
        None => NodeMode::default(),
    };
    Ok(ChartDefaults {
        house_system,
        zodiac,
        ayanamsa,
        node_mode,
        outer_planets: chart.outer_planets,
        topocentric: chart.topocentric,
    })
}

fn aspect_settings(aspects: AspectsToml) -> anyhow::Result<AspectSettings> {
    let mut settings = match aspects.definitions {
        Some(defs) => AspectSettings::new(defs),
        None => AspectSettings::default(),
    };
    settings.include_nodes = aspects.include_nodes;
    if let Some(policy) = aspects.policy.as_deref() {
        settings.policy = parse_policy(policy)?;
    }
    settings
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid [aspects] config: {e}"))?;
    Ok(settings)
}

pub fn parse_house_system(name: &str) -> anyhow::Result<HouseSystem> {
    HouseSystem::from_name(name).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown house system '{}' (expected one of {})",
            name,
            HouseSystem::valid_names().join(", ")
        )
    })
}

pub fn parse_zodiac(name: &str) -> anyhow::Result<ZodiacMode> {
    ZodiacMode::from_name(name)
        .ok_or_else(|| anyhow::anyhow!("Unknown zodiac '{}' (expected tropical or sidereal)", name))
}

pub fn parse_ayanamsa(name: &str) -> anyhow::Result<Ayanamsa> {
    Ayanamsa::from_name(name).ok_or_else(|| {
        let names: Vec<&str> = Ayanamsa::ALL.iter().map(|a| a.name()).collect();
        anyhow::anyhow!("Unknown ayanamsa '{}' (expected one of {})", name, names.join(", "))
    })
}

pub fn parse_node_mode(name: &str) -> anyhow::Result<NodeMode> {
    NodeMode::from_name(name)
        .ok_or_else(|| anyhow::anyhow!("Unknown node mode '{}' (expected true or mean)", name))
}

pub fn parse_policy(name: &str) -> anyhow::Result<MatchPolicy> {
    match name.to_lowercase().as_str() {
        "all" => Ok(MatchPolicy::All),
        "closest" => Ok(MatchPolicy::Closest),
        _ => anyhow::bail!("Unknown aspect policy '{}' (expected all or closest)", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() -> anyhow::Result<()> {
        let cfg = parse_config("")?;
        assert_eq!(cfg, KundaliConfig::default());
        assert_eq!(cfg.aspects.definitions.len(), 5);
        Ok(())
    }

    #[test]
    fn test_full_config() -> anyhow::Result<()> {
        let cfg = parse_config(
            r#"
[birth]
date = "1990-01-01"
time = "06:00"
tz = "+05:30"
lat = 19.076
lon = 72.8777

[chart]
house_system = "placidus"
zodiac = "sidereal"
ayanamsa = "krishnamurti"
node = "mean"
outer_planets = true
topocentric = true

[ephemeris]
path = "/opt/swisseph"

[aspects]
include_nodes = true
policy = "closest"

[[aspects.definitions]]
name = "conjunction"
angle = 0.0
orb = 10.0

[[aspects.definitions]]
name = "quincunx"
angle = 150.0
orb = 2.0
weight = 0.3
"#,
        )?;
        assert_eq!(cfg.birth.tz.as_deref(), Some("+05:30"));
        assert_eq!(cfg.birth.lat, Some(19.076));
        assert_eq!(cfg.chart.house_system, HouseSystem::Placidus);
        assert_eq!(cfg.chart.zodiac, ZodiacMode::Sidereal);
        assert_eq!(cfg.chart.ayanamsa, Ayanamsa::Krishnamurti);
        assert_eq!(cfg.chart.node_mode, NodeMode::Mean);
        assert!(cfg.chart.outer_planets);
        assert!(cfg.chart.topocentric);
        assert_eq!(cfg.ephemeris.path, Some(PathBuf::from("/opt/swisseph")));
        assert!(cfg.aspects.include_nodes);
        assert_eq!(cfg.aspects.policy, MatchPolicy::Closest);
        assert_eq!(cfg.aspects.definitions.len(), 2);
        assert_eq!(cfg.aspects.definitions[0].weight, 1.0);
        assert_eq!(cfg.aspects.definitions[1].name, "quincunx");
        Ok(())
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(parse_config("[chart]\nhouse_system = \"topocentric\"\n").is_err());
        assert!(parse_config("[chart]\nzodiac = \"draconic\"\n").is_err());
        assert!(parse_config("[aspects]\npolicy = \"first\"\n").is_err());
        let negative_orb = "[[aspects.definitions]]\nname = \"trine\"\nangle = 120.0\norb = -1.0\n";
        assert!(parse_config(negative_orb).is_err());
    }

    #[test]
    fn test_load_explicit_path() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let p = dir.path().join("kundali.toml");
        fs::write(&p, "[chart]\nhouse_system = \"whole sign\"\nzodiac = \"sidereal\"\n")?;
        let cfg = load_config(Some(&p))?;
        assert_eq!(cfg.chart.house_system, HouseSystem::WholeSign);
        assert_eq!(cfg.chart.zodiac, ZodiacMode::Sidereal);
        Ok(())
    }

    #[test]
    fn test_missing_explicit_path_is_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        assert!(load_config(Some(&dir.path().join("absent.toml"))).is_err());
        Ok(())
    }
}
