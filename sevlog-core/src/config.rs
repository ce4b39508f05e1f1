use std::sync::LazyLock;

use derive_from_env::FromEnv;

#[derive(FromEnv)]
#[from_env(prefix = "SEVLOG")]
#[allow(non_snake_case)]
pub struct SevlogConfig {
    /// Stamp lines in UTC instead of local time.
    #[from_env(default = "false")]
    pub UTC: bool,
    /// Allow colored failure reports when the diagnostic sink is a terminal.
    #[from_env(default = "true")]
    pub DIAGNOSTIC_COLOR: bool,
}

pub static SEVLOG_CONFIG: LazyLock<SevlogConfig> = LazyLock::new(|| {
    SevlogConfig::from_env().expect("invalid SEVLOG_* environment configuration")
});
