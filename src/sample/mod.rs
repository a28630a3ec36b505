use serde::{Deserialize, Serialize};

pub mod perfdata;
mod threshold;

pub use threshold::{Class, Limit, Threshold};

/// Host and service the graphs are rendered for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub hostname: String,
    #[serde(default)]
    pub service_desc: String,
    // display name configured on the monitoring side, if any
    #[serde(default)]
    pub disp_hostname: Option<String>,
}

impl Context {
    pub fn new<T: Into<String>, U: Into<String>>(hostname: T, service_desc: U) -> Self {
        Self {
            hostname: hostname.into(),
            service_desc: service_desc.into(),
            disp_hostname: None,
        }
    }

    pub fn display_hostname(&self) -> &str {
        self.disp_hostname.as_deref().unwrap_or(&self.hostname)
    }
}

/// Location of one data source inside the round-robin store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageRef {
    pub rrd_file: String,
    pub ds: u32,
}

impl StorageRef {
    pub fn new<T: Into<String>>(rrd_file: T, ds: u32) -> Self {
        Self {
            rrd_file: rrd_file.into(),
            ds,
        }
    }
}

/// One observed data source as handed over by the front-end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub unit: String,
    #[serde(flatten)]
    pub storage: StorageRef,
    #[serde(default, deserialize_with = "threshold::optional")]
    pub warn: Option<Threshold>,
    #[serde(default, deserialize_with = "threshold::optional")]
    pub warn_min: Option<Threshold>,
    #[serde(default, deserialize_with = "threshold::optional")]
    pub warn_max: Option<Threshold>,
    #[serde(default, deserialize_with = "threshold::optional")]
    pub crit: Option<Threshold>,
    #[serde(default, deserialize_with = "threshold::optional")]
    pub crit_min: Option<Threshold>,
    #[serde(default, deserialize_with = "threshold::optional")]
    pub crit_max: Option<Threshold>,
    #[serde(default, deserialize_with = "threshold::optional")]
    pub min: Option<Threshold>,
    #[serde(default, deserialize_with = "threshold::optional")]
    pub max: Option<Threshold>,
}

impl MetricSample {
    pub fn new<T: Into<String>, U: Into<String>>(name: T, unit: U, storage: StorageRef) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            storage,
            ..Default::default()
        }
    }

    pub fn with_label<T: Into<String>>(mut self, label: T) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_warn(mut self, warn: Threshold) -> Self {
        self.warn = Some(warn);
        self
    }

    pub fn with_warn_range(mut self, min: Threshold, max: Threshold) -> Self {
        self.warn_min = Some(min);
        self.warn_max = Some(max);
        self
    }

    pub fn with_crit(mut self, crit: Threshold) -> Self {
        self.crit = Some(crit);
        self
    }

    pub fn with_crit_range(mut self, min: Threshold, max: Threshold) -> Self {
        self.crit_min = Some(min);
        self.crit_max = Some(max);
        self
    }

    /// Label shown in titles, falling back to the data source name.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    pub fn limit(&self, class: Class) -> Limit<'_> {
        match class {
            Class::Warning => Limit::select(
                self.warn.as_ref(),
                self.warn_min.as_ref(),
                self.warn_max.as_ref(),
            ),
            Class::Critical => Limit::select(
                self.crit.as_ref(),
                self.crit_min.as_ref(),
                self.crit_max.as_ref(),
            ),
        }
    }
}

/// A full render request: the context plus all samples of one service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(flatten)]
    pub context: Context,
    #[serde(default)]
    pub samples: Vec<MetricSample>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_from_json() {
        let request: Request = serde_json::from_str(
            r#"{
                "hostname": "db01",
                "service_desc": "IPMI",
                "samples": [
                    {
                        "name": "volts_12V",
                        "unit": "volts",
                        "rrd_file": "/var/lib/pnp4nagios/db01/IPMI.rrd",
                        "ds": 1,
                        "warn": "11.5",
                        "crit": "",
                        "crit_min": "10",
                        "crit_max": 13
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(request.context.display_hostname(), "db01");
        assert_eq!(request.samples.len(), 1);

        let sample = &request.samples[0];
        assert_eq!(sample.label(), "volts_12V");
        assert_eq!(sample.storage.ds, 1);
        assert!(matches!(sample.limit(Class::Warning), Limit::Single(t) if t.as_str() == "11.5"));
        assert!(matches!(sample.limit(Class::Critical), Limit::Range { .. }));
    }

    #[test]
    fn display_hostname_prefers_configured_name() {
        let mut context = Context::new("db01.example.com", "Memory");
        assert_eq!(context.display_hostname(), "db01.example.com");

        context.disp_hostname = Some("db01".to_string());
        assert_eq!(context.display_hostname(), "db01");
    }
}
