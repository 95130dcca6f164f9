//! Types that mirror the Lavalink REST JSON schema (`/v4/stats`, `/v4/info`).
//!
//! Every field is optional on the wire; missing or `null` values decode to
//! zero/empty so a partial payload still renders.

use serde::{Deserialize, Deserializer};

fn nullable<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Memory {
    #[serde(deserialize_with = "nullable")]
    pub free: u64,
    #[serde(deserialize_with = "nullable")]
    pub used: u64,
    #[serde(deserialize_with = "nullable")]
    pub allocated: u64,
    #[serde(deserialize_with = "nullable")]
    pub reservable: u64,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Cpu {
    #[serde(deserialize_with = "nullable")]
    pub cores: u32,
    // both loads are ratios in 0..=1
    #[serde(deserialize_with = "nullable")]
    pub system_load: f64,
    #[serde(deserialize_with = "nullable")]
    pub lavalink_load: f64,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FrameStats {
    #[serde(deserialize_with = "nullable")]
    pub sent: u64,
    #[serde(deserialize_with = "nullable")]
    pub nulled: u64,
    #[serde(deserialize_with = "nullable")]
    pub deficit: i64,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Threads {
    #[serde(deserialize_with = "nullable")]
    pub running: u64,
    #[serde(deserialize_with = "nullable")]
    pub daemon: u64,
    #[serde(deserialize_with = "nullable")]
    pub peak: u64,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Stats {
    #[serde(deserialize_with = "nullable")]
    pub players: u64,
    #[serde(deserialize_with = "nullable")]
    pub playing_players: u64,
    /// Milliseconds since the server started.
    #[serde(deserialize_with = "nullable")]
    pub uptime: u64,
    #[serde(deserialize_with = "nullable")]
    pub memory: Memory,
    #[serde(deserialize_with = "nullable")]
    pub cpu: Cpu,
    pub frame_stats: Option<FrameStats>,
    pub threads: Option<Threads>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Version {
    pub semver: Option<String>,
    /// Build time, epoch milliseconds.
    pub build: Option<i64>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Git {
    pub branch: Option<String>,
    pub commit: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Os {
    pub name: Option<String>,
    pub version: Option<String>,
    pub arch: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Plugin {
    pub name: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Info {
    #[serde(deserialize_with = "nullable")]
    pub version: Version,
    pub build_time: Option<i64>,
    #[serde(deserialize_with = "nullable")]
    pub git: Git,
    pub jvm: Option<String>,
    pub lavaplayer: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub os: Os,
    #[serde(deserialize_with = "nullable")]
    pub source_managers: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub plugins: Vec<Plugin>,
}

impl Info {
    /// `version.build` when present, else the top-level `buildTime`.
    pub fn build_timestamp(&self) -> Option<i64> {
        self.version.build.or(self.build_time)
    }
}
