//! w3w-host-bridge — demo harness entry point.
//!
//! The bridge proper is a library wired into a UI runtime through typed
//! message ports.  This binary runs it standalone against the simulated host
//! services so the whole port contract can be exercised from a terminal:
//!
//! - UI → bridge requests are read from **stdin**, one JSON object per line.
//! - Bridge → UI messages (the init payload, notices, location events) are
//!   written to **stdout**, one JSON object per line.
//! - Logs go to **stderr** so stdout stays machine-readable.
//!
//! # Usage
//!
//! ```text
//! w3w-host-bridge [OPTIONS]
//!
//! Options:
//!   --api-key <KEY>            what3words API key passed through to the UI
//!   --share-title <TITLE>      Share sheet title [default: w3w-encounter]
//!   --share-body-prefix <TXT>  Text before the address in the share body
//!   --share-url-base <URL>     Base URL the address is appended to
//!   --channel-capacity <N>     UI port channel capacity [default: 32]
//!   --fix <LAT,LNG>            Simulated position fix (repeatable; the tour
//!                              loops). With no fixes the simulated watch
//!                              reports POSITION_UNAVAILABLE instead.
//!   --fix-interval-ms <MS>     Milliseconds between fixes [default: 1000]
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable              | Description                              |
//! |-----------------------|------------------------------------------|
//! | `W3W_API_KEY`         | what3words API key                       |
//! | `W3W_FIX_INTERVAL_MS` | Milliseconds between simulated fixes     |
//!
//! # Example session
//!
//! ```text
//! $ RUST_LOG=info w3w-host-bridge --fix 35.0,139.0
//! {"apiKey":"","supportGeolocation":true,"supportWebShareAPI":true,"supportClipboard":true}
//! {"location":{"lat":35.0,"lng":139.0},"errorCode":null}
//! {"type":"CopyToClipboard","text":"apple.banana.cherry"}        ← typed on stdin
//! {"type":"ClipboardWriteSucceeded"}
//! ```

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use w3w_host_bridge::domain::host::HostPosition;
use w3w_host_bridge::domain::messages::UiRequest;
use w3w_host_bridge::domain::BridgeConfig;
use w3w_host_bridge::infrastructure::sim::{
    SimulatedClipboard, SimulatedGeolocation, SimulatedShare,
};
use w3w_host_bridge::infrastructure::{ui_channel, Bridge, HostServices};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Host capability bridge demo harness.
///
/// Runs the bridge against simulated host services, speaking the UI port
/// contract as JSON lines on stdin/stdout.
#[derive(Debug, Parser)]
#[command(
    name = "w3w-host-bridge",
    about = "Capability bridge between a reactive UI and browser host services",
    version
)]
struct Cli {
    /// what3words API key, passed through unchanged to the UI init payload.
    #[arg(long, default_value = "", env = "W3W_API_KEY")]
    api_key: String,

    /// Title used for every native share sheet invocation.
    #[arg(long, default_value = "w3w-encounter")]
    share_title: String,

    /// Text placed before the three-word address in the share body.
    #[arg(long, default_value = "わたしはいまここにいます: ")]
    share_body_prefix: String,

    /// Base URL the three-word address is appended to for the share link.
    #[arg(long, default_value = "https://w3w.co/")]
    share_url_base: String,

    /// Capacity of each bounded UI port channel.
    #[arg(long, default_value_t = 32)]
    channel_capacity: usize,

    /// A simulated position fix as `LAT,LNG` (repeatable; the tour loops).
    ///
    /// With no fixes the simulated watch reports a POSITION_UNAVAILABLE
    /// error on every tick, exercising the failure path.
    #[arg(long = "fix", value_name = "LAT,LNG")]
    fixes: Vec<String>,

    /// Milliseconds between simulated position fixes.
    #[arg(long, default_value_t = 1000, env = "W3W_FIX_INTERVAL_MS")]
    fix_interval_ms: u64,
}

impl Cli {
    /// Converts the parsed CLI arguments into a [`BridgeConfig`] plus the
    /// simulated tour.
    ///
    /// # Errors
    ///
    /// Returns an error if a `--fix` value is not a `LAT,LNG` pair of
    /// decimal numbers, or if `--channel-capacity` is zero.
    fn into_parts(self) -> anyhow::Result<(BridgeConfig, Vec<HostPosition>, Duration)> {
        if self.channel_capacity == 0 {
            anyhow::bail!("--channel-capacity must be at least 1");
        }

        let fixes = self
            .fixes
            .iter()
            .map(|raw| parse_fix(raw))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let config = BridgeConfig {
            api_key: self.api_key,
            share_title: self.share_title,
            share_body_prefix: self.share_body_prefix,
            share_url_base: self.share_url_base,
            channel_capacity: self.channel_capacity,
        };

        Ok((config, fixes, Duration::from_millis(self.fix_interval_ms)))
    }
}

/// Parses a `LAT,LNG` pair into a [`HostPosition`].
fn parse_fix(raw: &str) -> anyhow::Result<HostPosition> {
    let (lat, lng) = raw
        .split_once(',')
        .with_context(|| format!("invalid fix '{raw}': expected LAT,LNG"))?;
    let latitude: f64 = lat
        .trim()
        .parse()
        .with_context(|| format!("invalid latitude in fix '{raw}'"))?;
    let longitude: f64 = lng
        .trim()
        .parse()
        .with_context(|| format!("invalid longitude in fix '{raw}'"))?;
    Ok(HostPosition {
        latitude,
        longitude,
    })
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// Runs on a current-thread Tokio runtime: the bridge is single-threaded and
/// event-driven by design — all work is cooperative, suspension happens only
/// at host-call await points, and resumption follows callback order.
///
/// # What happens at startup
///
/// 1. `tracing_subscriber` is initialised (level from `RUST_LOG`, default
///    `info`), writing to stderr so stdout carries only port messages.
/// 2. CLI arguments are parsed with `clap` into a [`Cli`] struct.
/// 3. The simulated host services are registered and the bridge is started.
/// 4. The init payload is printed, a stdin reader task feeds the request
///    port, and the main loop pumps notices and location events to stdout
///    until Ctrl+C or end of input.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // ── Logging setup ─────────────────────────────────────────────────────────
    //
    // `EnvFilter::try_from_default_env()` reads the `RUST_LOG` environment
    // variable.  If it is absent or invalid, we fall back to `info` level.
    // Stdout is reserved for port messages, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // ── Parse CLI arguments ───────────────────────────────────────────────────
    let cli = Cli::parse();
    let (config, fixes, fix_interval) = cli.into_parts()?;

    info!(
        fixes = fixes.len(),
        interval_ms = fix_interval.as_millis() as u64,
        "w3w-host-bridge starting against the simulated host"
    );

    // ── Host wiring ───────────────────────────────────────────────────────────
    //
    // The demo registers all three simulated services.  Capability probing
    // still runs the real path — the init payload printed below is derived
    // from exactly this registration.
    let host = HostServices::new()
        .with_clipboard(Arc::new(SimulatedClipboard))
        .with_share(Arc::new(SimulatedShare))
        .with_geolocation(Arc::new(SimulatedGeolocation::new(fixes, fix_interval)));

    let (ports, mut ui) = ui_channel(config.channel_capacity);
    let bridge = Bridge::start(config, host, ports);

    // ── Init payload: the UI's first input ────────────────────────────────────
    let init = ui.init.await.context("bridge dropped the init port")?;
    println!("{}", serde_json::to_string(&init)?);

    // ── Stdin reader: UI → bridge requests ────────────────────────────────────
    let request_tx = ui.requests.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<UiRequest>(line) {
                        Ok(request) => {
                            if request_tx.send(request).await.is_err() {
                                break;
                            }
                        }
                        // One bad line is not fatal; the next may be fine.
                        Err(e) => warn!("invalid request line: {e}"),
                    }
                }
                Ok(None) => {
                    debug!("stdin closed");
                    break;
                }
                Err(e) => {
                    warn!("stdin read error: {e}");
                    break;
                }
            }
        }
    });

    // ── Event pump: bridge → UI messages to stdout ────────────────────────────
    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    warn!("failed to listen for Ctrl+C: {e}");
                }
                info!("shutting down");
                break;
            }
            maybe_notice = ui.notices.recv() => match maybe_notice {
                Some(notice) => println!("{}", serde_json::to_string(&notice)?),
                None => break,
            },
            maybe_event = ui.locations.recv() => match maybe_event {
                Some(event) => println!("{}", serde_json::to_string(&event)?),
                None => break,
            },
        }
    }

    bridge.shutdown().await;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
