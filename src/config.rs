use crate::models::Target;
use crate::name::ResourceName;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub endpoint: EndpointConfig,
    pub session: SessionConfig,
    pub targets: Vec<TargetConfig>,
}

/// Where and as whom to connect. Opaque pass-through for the transport;
/// deliberately not validated here.
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    pub service_url: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Path of the JSON session document to poll.
    pub document: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// Resource name or query pattern, canonical string form.
    pub name: String,
    pub attributes: Vec<String>,
    /// Optional used/max style percentage printed after the raw values.
    pub used_percent: Option<UsedPercentConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsedPercentConfig {
    pub label: String,
    pub attribute: String,
    pub numerator: String,
    pub denominator: String,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.session.document.is_empty(),
            "session.document must be non-empty"
        );
        anyhow::ensure!(
            !self.targets.is_empty(),
            "at least one [[targets]] entry is required"
        );
        for target in &self.targets {
            ResourceName::parse(&target.name)
                .map_err(|e| anyhow::anyhow!("targets.name {:?}: {}", target.name, e))?;
            anyhow::ensure!(
                !target.attributes.is_empty(),
                "targets.attributes must be non-empty for {}",
                target.name
            );
            anyhow::ensure!(
                target.attributes.iter().all(|a| !a.is_empty()),
                "targets.attributes must not contain empty names for {}",
                target.name
            );
            if let Some(pct) = &target.used_percent {
                anyhow::ensure!(
                    !pct.label.is_empty()
                        && !pct.attribute.is_empty()
                        && !pct.numerator.is_empty()
                        && !pct.denominator.is_empty(),
                    "targets.used_percent fields must be non-empty for {}",
                    target.name
                );
            }
        }
        Ok(())
    }

    /// Poll targets with parsed name patterns. Only valid after `validate`,
    /// which `load`/`load_from_str` always run.
    pub fn poll_targets(&self) -> anyhow::Result<Vec<Target>> {
        self.targets
            .iter()
            .map(|t| {
                Ok(Target {
                    pattern: ResourceName::parse(&t.name)?,
                    attributes: t.attributes.clone(),
                })
            })
            .collect()
    }
}
