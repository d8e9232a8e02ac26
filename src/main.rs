use anyhow::{Context, Result};
use jmxsnap::config::AppConfig;
use jmxsnap::name::ResourceName;
use jmxsnap::reader::{SnapshotReader, derive_percent};
use jmxsnap::session::StaticSession;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let config = AppConfig::load()?;
    let document = std::fs::read_to_string(&config.session.document)
        .with_context(|| format!("session document {}", config.session.document))?;
    let session = StaticSession::from_json_str(&document)?;
    tracing::info!(
        endpoint = %config.endpoint.service_url,
        document = %config.session.document,
        targets = config.targets.len(),
        "session ready"
    );

    let reader = SnapshotReader::new(&session);
    let snapshot = reader.poll(&config.poll_targets()?)?;
    for entry in &snapshot.entries {
        println!(
            "{} {} = {}",
            entry.name,
            entry.attribute,
            serde_json::to_string(&entry.value)?
        );
    }

    // used/max style derivations after the raw dump, one line per resource
    for target in &config.targets {
        let Some(pct) = &target.used_percent else {
            continue;
        };
        let pattern = ResourceName::parse(&target.name)?;
        for name in reader.resolve(&pattern)? {
            let value = reader.read_attribute(&name, &pct.attribute)?;
            let numerator = value.field(&pct.numerator)?.as_f64()?;
            let denominator = value.field(&pct.denominator)?.as_f64()?;
            if denominator <= 0.0 {
                // max == -1 means an unbounded pool; nothing sensible to derive
                tracing::warn!(
                    resource = %name,
                    attribute = %pct.attribute,
                    denominator,
                    "unbounded or empty pool, skipping percentage"
                );
                continue;
            }
            let percent = derive_percent(numerator, denominator)?;
            println!("{} = {percent}%", pct.label);
        }
    }

    Ok(())
}
