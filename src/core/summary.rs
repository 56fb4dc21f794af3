use crate::core::{RefreshPolicy, ServiceDependency, ServiceDescriptor};
use std::fmt;

fn refresh_label(policy: RefreshPolicy) -> String {
    match policy {
        RefreshPolicy::Permanent => "permanent".to_string(),
        RefreshPolicy::Eventual => "eventual".to_string(),
        RefreshPolicy::Within(window) => format!("within {}s", window.as_secs()),
        RefreshPolicy::EventualStart => "eventual at start".to_string(),
        RefreshPolicy::Startup => "startup only".to_string(),
    }
}

fn write_dependencies(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    deps: &[ServiceDependency],
) -> fmt::Result {
    writeln!(f, "{} ({}):", title, deps.len())?;
    for dep in deps {
        writeln!(
            f,
            "  - {} [{}, refresh {}]",
            dep.endpoint,
            dep.kind,
            refresh_label(dep.refresh_policy())
        )?;
        for slo in &dep.slos {
            writeln!(
                f,
                "      {} per {}: {} {}",
                slo.kind,
                slo.interval,
                slo.target_value,
                slo.kind.unit()
            )?;
        }
    }
    Ok(())
}

/// Plain-text overview of a descriptor, printed by `--check`.
pub struct Summary<'a>(pub &'a ServiceDescriptor);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let descriptor = self.0;
        writeln!(f, "{} ({})", descriptor.name, descriptor.version)?;
        writeln!(f, "endpoint: {}", descriptor.endpoint)?;
        if let Some(info) = &descriptor.info_endpoint {
            writeln!(f, "info: {}", info)?;
        }
        write_dependencies(f, "dependencies", &descriptor.dependencies)?;
        write_dependencies(f, "consumers", &descriptor.consumers)
    }
}

pub fn summarize(descriptor: &ServiceDescriptor) -> String {
    Summary(descriptor).to_string()
}
