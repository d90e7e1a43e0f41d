//! Built-in probe suites: the request lists used to map out the info API.

use clap::ValueEnum;
use serde_json::{json, Map, Value};
use std::time::Duration;

use super::ProbeCase;

/// All-zero address; accepted by the API as a syntactically valid user.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";
/// Address used by the user-scoped probes when none is given.
pub const DEFAULT_PROBE_USER: &str = "0x23f7c32e541620a562479f665511b02660505b82";

/// Where and how long to probe.
#[derive(Debug, Clone)]
pub struct SuiteContext {
    pub info_base: String,
    pub stats_base: String,
    /// Address substituted into user-scoped requests
    pub user: String,
    /// Timeout for `/info` probes
    pub request_timeout: Duration,
    /// Timeout for leaderboard endpoint discovery
    pub probe_timeout: Duration,
}

impl SuiteContext {
    fn info_url(&self) -> String {
        format!("{}/info", self.info_base.trim_end_matches('/'))
    }

    fn info(&self, payload: Value) -> ProbeCase {
        ProbeCase::post(self.info_url(), payload, self.request_timeout)
    }
}

/// Named lists of probe cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Suite {
    /// Leaderboard request kinds plus `meta` and a zero-address `clearinghouseState`
    InfoBasic,
    /// Leaderboard window/period variants, referral leaderboard, asset contexts
    InfoVariants,
    /// Market metadata and user-scoped queries for one address
    InfoUser,
    /// GET and POST candidates for the leaderboard itself
    LeaderboardEndpoints,
}

impl Suite {
    pub fn all() -> [Suite; 4] {
        [
            Suite::InfoBasic,
            Suite::InfoVariants,
            Suite::InfoUser,
            Suite::LeaderboardEndpoints,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Suite::InfoBasic => "info-basic",
            Suite::InfoVariants => "info-variants",
            Suite::InfoUser => "info-user",
            Suite::LeaderboardEndpoints => "leaderboard-endpoints",
        }
    }

    pub fn cases(&self, ctx: &SuiteContext) -> Vec<ProbeCase> {
        match self {
            Suite::InfoBasic => vec![
                ctx.info(json!({"type": "leaderboard"})),
                ctx.info(json!({"type": "mainnetLeaderboard"})),
                ctx.info(json!({"type": "leaderboard", "window": "30m"})),
                ctx.info(json!({"type": "leaderboard", "period": "all time"})),
                ctx.info(json!({"type": "meta"})),
                ctx.info(json!({"type": "clearinghouseState", "user": ZERO_ADDRESS})),
            ],
            Suite::InfoVariants => vec![
                ctx.info(json!({"type": "leaderboard"})),
                ctx.info(json!({"type": "mainnetLeaderboard"})),
                ctx.info(json!({"type": "leaderboard", "window": "1w"})),
                ctx.info(json!({"type": "leaderboard", "period": "allTime"})),
                ctx.info(json!({"type": "leaderboard", "period": "day"})),
                ctx.info(json!({"type": "referralLeaderboard"})),
                ctx.info(json!({"type": "metaAndAssetCtxs"})),
                ctx.info(json!({"type": "frontendMeta"})),
            ],
            Suite::InfoUser => vec![
                ctx.info(json!({"type": "meta"})),
                ctx.info(json!({"type": "allMids"})),
                ctx.info(json!({"type": "userState", "user": ZERO_ADDRESS})),
                ctx.info(json!({"type": "clearinghouseState", "user": ctx.user})),
                ctx.info(json!({"type": "spotMeta"})),
                ctx.info(json!({"type": "spotClearinghouseState", "user": ctx.user})),
                ctx.info(json!({"type": "referral", "user": ctx.user})),
            ],
            Suite::LeaderboardEndpoints => {
                let stats = ctx.stats_base.trim_end_matches('/');
                let info_base = ctx.info_base.trim_end_matches('/');
                let timeout = ctx.probe_timeout;

                let mut cases = vec![
                    ProbeCase::get(format!("{}/Mainnet/leaderboard", stats), timeout),
                    ProbeCase::get(
                        format!("{}/Mainnet/leaderboard?timeWindow=allTime", stats),
                        timeout,
                    ),
                    ProbeCase::get(format!("{}/leaderboard", info_base), timeout),
                ];
                for window in ["allTime", "day", "week", "month"] {
                    cases.push(ProbeCase::post(
                        ctx.info_url(),
                        json!({"type": "leaderboard", "window": window}),
                        timeout,
                    ));
                }
                cases
            }
        }
    }
}

/// Build a single `/info` probe from a request kind and `key=value` fields.
///
/// Values that parse as JSON (numbers, booleans, quoted strings, objects) are
/// sent as such; anything else is sent as a plain string.
pub fn custom_info_case(ctx: &SuiteContext, kind: &str, fields: &[String]) -> anyhow::Result<ProbeCase> {
    let mut payload = Map::new();
    payload.insert("type".to_string(), Value::String(kind.to_string()));

    for field in fields {
        let (key, raw) = field
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Expected key=value, got '{}'", field))?;
        if key.is_empty() {
            anyhow::bail!("Empty key in '{}'", field);
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        payload.insert(key.to_string(), value);
    }

    Ok(ctx.info(Value::Object(payload)))
}
