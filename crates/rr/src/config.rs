use crate::error::CliError;
use rr_core::seed::{SeedFile, load_seed, parse_seed_toml};
use rr_core::types::VolunteerId;
use rr_events::bus::EventBus;
use std::path::PathBuf;

pub const SEED_ENV: &str = "ROADREMOTE_SEED";
pub const BUS_CAPACITY_ENV: &str = "ROADREMOTE_BUS_CAPACITY";

const DEMO_SEED: &str = include_str!("../demo.toml");

/// Startup settings after merging flags with the environment. Flags win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub seed: Option<PathBuf>,
    pub volunteer: Option<VolunteerId>,
    pub bus_capacity: usize,
}

impl Settings {
    pub fn resolve(seed: Option<PathBuf>, volunteer: Option<String>) -> Result<Self, CliError> {
        Self::resolve_with(seed, volunteer, |name| std::env::var(name).ok())
    }

    fn resolve_with<F>(
        seed: Option<PathBuf>,
        volunteer: Option<String>,
        env: F,
    ) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed = seed.or_else(|| {
            env(SEED_ENV)
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
        });
        let bus_capacity = match env(BUS_CAPACITY_ENV) {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .map_err(|err| CliError::Config {
                    name: BUS_CAPACITY_ENV,
                    message: format!("{value:?}: {err}"),
                })?,
            None => EventBus::DEFAULT_CAPACITY,
        };
        Ok(Self {
            seed,
            volunteer: volunteer.map(VolunteerId::new).transpose()?,
            bus_capacity,
        })
    }

    /// The configured seed file, or the bundled demo data.
    pub fn load_seed(&self) -> Result<SeedFile, CliError> {
        let seed = match &self.seed {
            Some(path) => load_seed(path)?,
            None => parse_seed_toml(DEMO_SEED, "demo.toml")?,
        };
        Ok(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_flags_or_env() {
        let settings = Settings::resolve_with(None, None, env(&[])).unwrap();
        assert_eq!(settings.seed, None);
        assert_eq!(settings.volunteer, None);
        assert_eq!(settings.bus_capacity, EventBus::DEFAULT_CAPACITY);
    }

    #[test]
    fn flags_override_environment() {
        let vars = env(&[(SEED_ENV, "from-env.toml"), (BUS_CAPACITY_ENV, " 16 ")]);
        let settings = Settings::resolve_with(
            Some(PathBuf::from("flag.yaml")),
            Some("vol-2".to_string()),
            vars,
        )
        .unwrap();
        assert_eq!(settings.seed, Some(PathBuf::from("flag.yaml")));
        assert_eq!(settings.volunteer.unwrap().as_str(), "vol-2");
        assert_eq!(settings.bus_capacity, 16);

        let settings = Settings::resolve_with(None, None, env(&[(SEED_ENV, "from-env.toml")]))
            .unwrap();
        assert_eq!(settings.seed, Some(PathBuf::from("from-env.toml")));
    }

    #[test]
    fn rejects_bad_capacity_and_blank_volunteer() {
        let err = Settings::resolve_with(None, None, env(&[(BUS_CAPACITY_ENV, "lots")]))
            .unwrap_err();
        assert!(matches!(err, CliError::Config { name, .. } if name == BUS_CAPACITY_ENV));
        assert!(matches!(
            Settings::resolve_with(None, Some(String::new()), env(&[])),
            Err(CliError::Id(_))
        ));
    }

    #[test]
    fn demo_seed_parses() {
        let seed = Settings::resolve_with(None, None, env(&[]))
            .unwrap()
            .load_seed()
            .unwrap();
        assert!(!seed.requests.is_empty());
        assert!(!seed.volunteers.is_empty());
        assert_eq!(seed.active_volunteer.unwrap().as_str(), "vol-1");
    }

    #[test]
    fn loads_yaml_seed_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "requests:\n  - id: \"7\"\n    driver_name: Kim\n    vehicle: Van\n    issue: Flat\n    location: Elm St\n    distance: 0.5\n    timestamp: now\n    helper_type: any\n"
        )
        .unwrap();
        let settings = Settings {
            seed: Some(file.path().to_path_buf()),
            volunteer: None,
            bus_capacity: 8,
        };
        let seed = settings.load_seed().unwrap();
        assert_eq!(seed.requests.len(), 1);
        assert_eq!(seed.requests[0].driver_name, "Kim");
    }
}
