//! API call abstraction
//!
//! This module describes the calls the bridge can make against the video
//! mixer's HTTP API and how they are turned into URLs.

use crate::{error::BridgeError, Result};

/// A single call against the mixer's function API
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApiCall {
    /// Select a row in a data source (source name, zero based row)
    DataSourceSelectRow { source: String, index: u64 },
    /// Start a script by name
    ScriptStart { name: String },
}

impl ApiCall {
    /// Create a script start call
    pub fn script(name: impl Into<String>) -> Self {
        ApiCall::ScriptStart { name: name.into() }
    }

    /// Create a data source row select call
    pub fn select_row(source: impl Into<String>, index: u64) -> Self {
        ApiCall::DataSourceSelectRow {
            source: source.into(),
            index,
        }
    }

    /// Name of the API function
    pub fn function(&self) -> &'static str {
        match self {
            ApiCall::DataSourceSelectRow { .. } => "DataSourceSelectRow",
            ApiCall::ScriptStart { .. } => "ScriptStart",
        }
    }

    /// Value parameter of the API function
    pub fn value(&self) -> String {
        match self {
            ApiCall::DataSourceSelectRow { source, index } => format!("{},{}", source, index),
            ApiCall::ScriptStart { name } => name.clone(),
        }
    }
}

/// Base URL every outbound call is built from. Immutable after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchTarget {
    base_url: String,
}

impl DispatchTarget {
    /// Create a target from a full base URL such as `http://10.0.0.5:8088/api/`
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(BridgeError::InvalidTarget(format!(
                "Base URL must start with http:// or https://: {}",
                base_url
            )));
        }
        if base_url.contains('?') {
            return Err(BridgeError::InvalidTarget(format!(
                "Base URL must not contain a query: {}",
                base_url
            )));
        }
        Ok(Self { base_url })
    }

    /// Build a target from host, port and API path
    pub fn from_parts(host: &str, port: u16, path: &str) -> Result<Self> {
        if host.is_empty() || host.contains('/') {
            return Err(BridgeError::InvalidTarget(format!("Invalid host: {:?}", host)));
        }
        Self::new(format!("http://{}:{}{}", host, port, path))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a call
    pub fn url(&self, call: &ApiCall) -> String {
        format!(
            "{}?Function={}&Value={}",
            self.base_url,
            call.function(),
            call.value()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> DispatchTarget {
        DispatchTarget::from_parts("10.0.0.5", 8088, "/api/").unwrap()
    }

    #[test]
    fn test_from_parts() {
        assert_eq!(target().base_url(), "http://10.0.0.5:8088/api/");
    }

    #[test]
    fn test_select_row_url() {
        let url = target().url(&ApiCall::select_row("Scenes", 3));
        assert_eq!(
            url,
            "http://10.0.0.5:8088/api/?Function=DataSourceSelectRow&Value=Scenes,3"
        );
    }

    #[test]
    fn test_select_row_url_large_index() {
        let url = target().url(&ApiCall::select_row("Scenes", 4_294_967_296));
        assert!(url.ends_with("&Value=Scenes,4294967296"));
    }

    #[test]
    fn test_script_url() {
        let url = target().url(&ApiCall::script("GFXSCENE"));
        assert_eq!(
            url,
            "http://10.0.0.5:8088/api/?Function=ScriptStart&Value=GFXSCENE"
        );
    }

    #[test]
    fn test_function_and_value() {
        let call = ApiCall::select_row("Scenes", 0);
        assert_eq!(call.function(), "DataSourceSelectRow");
        assert_eq!(call.value(), "Scenes,0");

        let call = ApiCall::script("TOP");
        assert_eq!(call.function(), "ScriptStart");
        assert_eq!(call.value(), "TOP");
    }

    #[test]
    fn test_invalid_targets() {
        assert!(DispatchTarget::new("10.0.0.5:8088/api/").is_err());
        assert!(DispatchTarget::new("http://10.0.0.5:8088/api/?x=1").is_err());
        assert!(DispatchTarget::from_parts("", 8088, "/api/").is_err());
        assert!(DispatchTarget::from_parts("host/evil", 8088, "/api/").is_err());
    }
}
