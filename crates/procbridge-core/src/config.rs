use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A request to execute an external process.
///
/// The environment mapping is layered additively onto the inherited
/// environment of the host. `stop_keyword` only affects streamed execution:
/// once a delivered line contains it, further lines are drained but not
/// delivered. An empty keyword disables suppression.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into, strip_option))]
pub struct ExecRequest {
    pub command: String,

    #[serde(default)]
    #[builder(default)]
    #[builder(setter(custom))]
    pub args: Vec<String>,

    #[serde(default)]
    #[builder(default)]
    #[builder(setter(custom))]
    pub env: HashMap<String, String>,

    /// Route captured output through the configured encoding converter.
    #[serde(default)]
    #[builder(default)]
    pub convert_output: bool,

    /// Substring that triggers output suppression. Empty means disabled.
    #[serde(default)]
    #[builder(default)]
    pub stop_keyword: String,

    #[serde(default)]
    #[builder(default)]
    pub working_directory: Option<PathBuf>,
}

impl ExecRequest {
    pub fn builder() -> ExecRequestBuilder {
        ExecRequestBuilder::default()
    }

    /// Validate the request and return an error if it cannot be executed
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.command.trim().is_empty() {
            return Err(anyhow::anyhow!("command must not be empty"));
        }

        Ok(())
    }
}

impl ExecRequestBuilder {
    pub fn args<S: ToString, I: IntoIterator<Item = S>>(&mut self, iter: I) -> &mut Self {
        let args: Vec<String> = iter.into_iter().map(|s| s.to_string()).collect();
        self.args = Some(args);
        self
    }

    pub fn env<T: ToString>(&mut self, key: T, value: T) -> &mut Self {
        let map = self.env.get_or_insert_with(HashMap::new);
        map.insert(key.to_string(), value.to_string());

        self
    }

    pub fn env_multi<T: ToString, I: IntoIterator<Item = (T, T)>>(&mut self, iter: I) -> &mut Self {
        let env = self.env.get_or_insert_with(HashMap::new);
        for (key, value) in iter {
            env.insert(key.to_string(), value.to_string());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let request = ExecRequest::builder()
            .command("echo")
            .build()
            .unwrap();

        assert!(request.validate().is_ok());
        assert!(request.args.is_empty());
        assert!(request.env.is_empty());
        assert!(!request.convert_output);
        assert!(request.stop_keyword.is_empty());
        assert!(request.working_directory.is_none());
    }

    #[test]
    fn test_builder_args_and_env() {
        let request = ExecRequest::builder()
            .command("mytool")
            .args(["run", "--fast"])
            .env("RUST_LOG", "info")
            .env_multi([("A", "1"), ("B", "2")])
            .build()
            .unwrap();

        assert_eq!(request.args, vec!["run".to_string(), "--fast".to_string()]);
        assert_eq!(request.env.len(), 3);
        assert_eq!(request.env.get("A"), Some(&"1".to_string()));
    }

    #[test]
    fn test_empty_command_is_invalid() {
        let request = ExecRequest::builder().command("   ").build().unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_builder_sets_stop_keyword() {
        let request = ExecRequest::builder()
            .command("kernel")
            .stop_keyword("started successfully")
            .build()
            .unwrap();

        assert_eq!(request.stop_keyword, "started successfully");
    }

    #[test]
    fn test_serialization_round_trip() {
        let request = ExecRequest::builder()
            .command("echo")
            .args(["hi"])
            .convert_output(true)
            .build()
            .unwrap();

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("convertOutput"));
        let deserialized: ExecRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, deserialized);
    }
}
