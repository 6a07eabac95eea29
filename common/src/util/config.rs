use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub router: RouterConfig,
    #[serde(default)]
    pub input: InputConfig,
}

/// How the traceback picks among equally short predecessors.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TracebackMode {
    /// Keep going in the previous direction when possible.
    #[default]
    MinTurn,
    /// Head toward the net's source.
    Direct,
}

/// Granularity at which routing progress is reported to an observer.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepMode {
    Wave,
    Destination,
    Net,
    #[default]
    RouteAll,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RouterConfig {
    #[serde(default)]
    pub traceback_mode: TracebackMode,
    #[serde(default)]
    pub step_mode: StepMode,
}

#[derive(Debug, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_infile")]
    pub infile: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            infile: default_infile(),
        }
    }
}

fn default_infile() -> String {
    "inputs/sample.infile".to_string()
}
