use serde::Serialize;
use std::fmt;
use std::time::Duration;
use url::Url;

/// A service together with the services it depends on and the services that consume it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    pub version: String,
    pub name: String,
    pub endpoint: Url,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_endpoint: Option<Url>,
    pub dependencies: Vec<ServiceDependency>,
    pub consumers: Vec<ServiceDependency>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDependency {
    pub kind: DependencyKind,
    /// Only ever set when `kind` is [`DependencyKind::EventualMax`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eventual_max: Option<u64>,
    pub endpoint: Url,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_endpoint: Option<Url>,
    pub slos: Vec<Slo>,
}

impl ServiceDependency {
    pub fn refresh_policy(&self) -> RefreshPolicy {
        self.kind.refresh_policy(self.eventual_max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slo {
    pub kind: SloKind,
    pub interval: SloInterval,
    pub target_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DependencyKind {
    Permanent,
    Eventual,
    EventualMax,
    EventualStart,
    Startup,
}

impl DependencyKind {
    pub const ALL: [DependencyKind; 5] = [
        DependencyKind::Permanent,
        DependencyKind::Eventual,
        DependencyKind::EventualMax,
        DependencyKind::EventualStart,
        DependencyKind::Startup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyKind::Permanent => "permanent",
            DependencyKind::Eventual => "eventual",
            DependencyKind::EventualMax => "eventualMax",
            DependencyKind::EventualStart => "eventualStart",
            DependencyKind::Startup => "startup",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    /// `eventual_max` is read only for [`DependencyKind::EventualMax`]; a window of
    /// zero seconds collapses to [`RefreshPolicy::Permanent`].
    pub fn refresh_policy(&self, eventual_max: Option<u64>) -> RefreshPolicy {
        match self {
            DependencyKind::Permanent => RefreshPolicy::Permanent,
            DependencyKind::Eventual => RefreshPolicy::Eventual,
            DependencyKind::EventualMax => match eventual_max {
                Some(0) | None => RefreshPolicy::Permanent,
                Some(seconds) => RefreshPolicy::Within(Duration::from_secs(seconds)),
            },
            DependencyKind::EventualStart => RefreshPolicy::EventualStart,
            DependencyKind::Startup => RefreshPolicy::Startup,
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How fresh a consumer must keep its view of a dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPolicy {
    Permanent,
    Eventual,
    Within(Duration),
    EventualStart,
    Startup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
pub enum SloKind {
    Availability,
    #[serde(rename = "MTTR")]
    Mttr,
    Latency,
}

impl SloKind {
    pub const ALL: [SloKind; 3] = [SloKind::Availability, SloKind::Mttr, SloKind::Latency];

    pub fn as_str(&self) -> &'static str {
        match self {
            SloKind::Availability => "Availability",
            SloKind::Mttr => "MTTR",
            SloKind::Latency => "Latency",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    /// Unit of `targetValue` for this kind.
    pub fn unit(&self) -> &'static str {
        match self {
            SloKind::Availability => "percent",
            SloKind::Mttr => "minutes",
            SloKind::Latency => "milliseconds",
        }
    }
}

impl fmt::Display for SloKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum SloInterval {
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl SloInterval {
    pub const ALL: [SloInterval; 5] = [
        SloInterval::Day,
        SloInterval::Week,
        SloInterval::Month,
        SloInterval::Quarter,
        SloInterval::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SloInterval::Day => "day",
            SloInterval::Week => "week",
            SloInterval::Month => "month",
            SloInterval::Quarter => "quarter",
            SloInterval::Year => "year",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|interval| interval.as_str() == value)
    }
}

impl fmt::Display for SloInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
