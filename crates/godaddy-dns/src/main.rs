// # godaddy-dns
//
// Thin integration layer: parse flags, set up logging, wire the core
// engine to the HTTP IP source, the GoDaddy provider and the last-IP file,
// then run once. All update logic lives in ddns-core.
//
// ## Usage
//
// ```bash
// godaddy-dns                              # add/merge configured records
// godaddy-dns --update-mode                # replace the configured type/name
// godaddy-dns -c ./godaddy-dns.json -i /var/lib/godaddy-dns/lastip
// ```
//
// Intended to be run from cron or a systemd timer. Invocations are
// expected to be serialized by the scheduler.
//
// ## Environment
//
// - `GODADDY_DNS_LOG_LEVEL`: trace, debug, info, warn, error (default info)
//
// ## Exit codes
//
// - 0: records updated, or IP unchanged
// - 1: any error (configuration, network, storage, provider)

use anyhow::Result;
use clap::Parser;
use ddns_core::state::FileStateStore;
use ddns_core::{DdnsConfig, DdnsEngine, RecordUpdater, UpdateMode};
use ddns_ip_http::HttpIpSource;
use ddns_provider_godaddy::GoDaddyProvider;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{Level, Subscriber, debug, error};
use tracing_subscriber::FmtSubscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Config file name looked up in the home directory
const DEFAULT_CONFIG_FILE: &str = ".godaddy-dns.json";

/// Environment variable selecting the log level
const LOG_LEVEL_ENV: &str = "GODADDY_DNS_LOG_LEVEL";

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DdnsExitCode {
    /// Records updated or nothing to do
    Success = 0,
    /// Any fatal error
    Failure = 1,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Keep GoDaddy DNS records pointed at this host's public IP
#[derive(Debug, Parser)]
#[command(name = "godaddy-dns")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file to use (default "~/.godaddy-dns.json")
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// File storing the last IP found (default "<temp dir>/.lastip")
    #[arg(short, long, value_name = "FILE")]
    ipfile: Option<PathBuf>,

    /// Replace the configured type/name record instead of adding records
    #[arg(short, long = "update-mode")]
    update_mode: bool,

    /// IP-echo service returning the public IP as plain text
    #[arg(long = "ip-service", value_name = "URL", default_value = ddns_ip_http::DEFAULT_IP_SERVICE)]
    ip_service: String,

    /// GoDaddy API base URL
    #[arg(long = "api-url", value_name = "URL", default_value = ddns_provider_godaddy::GODADDY_API_BASE)]
    api_url: String,

    /// Timeout for each HTTP request, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Reject IP-echo responses that are not a valid IP address
    #[arg(long = "strict-ip")]
    strict_ip: bool,
}

impl Cli {
    fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_config_path)
    }

    fn ipfile_path(&self) -> PathBuf {
        self.ipfile.clone().unwrap_or_else(FileStateStore::default_path)
    }

    fn mode(&self) -> UpdateMode {
        UpdateMode::from_flag(self.update_mode)
    }
}

fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(DEFAULT_CONFIG_FILE)
}

fn parse_log_level(value: &str) -> Result<Level> {
    match value.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "{} '{}' is not valid. \
            Valid levels: trace, debug, info, warn, error",
            LOG_LEVEL_ENV,
            value
        ),
    }
}

/// Build the console subscriber
///
/// WARN and ERROR events are written to `stderr`, everything else to `stdout`.
fn build_subscriber<E, O>(
    level: Level,
    stderr: E,
    stdout: O,
    ansi: bool,
) -> impl Subscriber + Send + Sync
where
    E: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    O: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let writer = stderr.with_max_level(Level::WARN).or_else(stdout);

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_ansi(ansi)
        .with_writer(writer)
        .finish()
}

/// Install the global subscriber
fn init_tracing(level: Level) -> Result<()> {
    let ansi = std::io::stdout().is_terminal() && std::io::stderr().is_terminal();
    let subscriber = build_subscriber(level, std::io::stderr, std::io::stdout, ansi);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))
}

/// Wire the engine from flags and the config file
async fn build_engine(cli: &Cli) -> ddns_core::Result<DdnsEngine> {
    let config_path = cli.config_path();
    debug!("Loading configuration from {}", config_path.display());
    let config = DdnsConfig::load(&config_path).await?;

    let mode = cli.mode();
    let updater = RecordUpdater::from_config(&config, mode)?;
    let timeout = Duration::from_secs(cli.timeout);

    let ip_source = HttpIpSource::new(cli.ip_service.as_str(), timeout)?.strict(cli.strict_ip);
    let provider = GoDaddyProvider::from_config(&config, timeout)?.with_base_url(cli.api_url.as_str());
    let state_store = FileStateStore::new(cli.ipfile_path());

    debug!(
        "Mode: {}, domain: {}, last IP file: {}",
        mode,
        config.domain,
        state_store.path().display()
    );

    Ok(DdnsEngine::new(
        Box::new(ip_source),
        Box::new(provider),
        Box::new(state_store),
        updater,
        config.domain,
    ))
}

async fn run(cli: Cli) -> DdnsExitCode {
    let engine = match build_engine(&cli).await {
        Ok(engine) => engine,
        Err(e) => {
            error!("{}", e);
            return DdnsExitCode::Failure;
        }
    };

    if engine.run_once().await.is_success() {
        DdnsExitCode::Success
    } else {
        DdnsExitCode::Failure
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match std::env::var(LOG_LEVEL_ENV) {
        Ok(value) => match parse_log_level(&value) {
            Ok(level) => level,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                return DdnsExitCode::Failure.into();
            }
        },
        Err(_) => Level::INFO,
    };

    if let Err(e) = init_tracing(log_level) {
        eprintln!("{}", e);
        return DdnsExitCode::Failure.into();
    }

    // One run is strictly sequential, a single-threaded runtime is enough
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DdnsExitCode::Failure.into();
        }
    };

    rt.block_on(run(cli)).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io;
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// In-memory console stream
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn lines(&self) -> Vec<String> {
            String::from_utf8_lossy(&self.0.lock().unwrap())
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    struct RunOutput {
        code: DdnsExitCode,
        stdout: Vec<String>,
        stderr: Vec<String>,
    }

    /// Run once at the default level, capturing both console streams
    async fn run_captured(cli: Cli) -> RunOutput {
        let stdout = Capture::default();
        let stderr = Capture::default();
        let subscriber = build_subscriber(Level::INFO, stderr.clone(), stdout.clone(), false);

        let code = {
            let _guard = tracing::subscriber::set_default(subscriber);
            run(cli).await
        };

        RunOutput {
            code,
            stdout: stdout.lines(),
            stderr: stderr.lines(),
        }
    }

    fn write_config(dir: &Path) -> PathBuf {
        let config = dir.join("godaddy-dns.json");
        std::fs::write(
            &config,
            r#"{
                "domain": "example.com",
                "apiKey": "key",
                "secret": "secret",
                "records": "www",
                "type": "A",
                "name": "home"
            }"#,
        )
        .unwrap();
        config
    }

    fn cli_for(server: &MockServer, config: &Path, ipfile: &Path, extra: &[&str]) -> Cli {
        let mut args = vec![
            "godaddy-dns".to_string(),
            "-c".to_string(),
            config.display().to_string(),
            "-i".to_string(),
            ipfile.display().to_string(),
            "--ip-service".to_string(),
            format!("{}/ip", server.uri()),
            "--api-url".to_string(),
            server.uri(),
        ];
        args.extend(extra.iter().map(|arg| arg.to_string()));
        Cli::try_parse_from(args).unwrap()
    }

    async fn mount_ip(server: &MockServer, ip: &str) {
        Mock::given(method("GET"))
            .and(path("/ip"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ip))
            .mount(server)
            .await;
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["godaddy-dns"]).unwrap();

        assert_eq!(cli.mode(), UpdateMode::Add);
        assert!(cli.config_path().ends_with(DEFAULT_CONFIG_FILE));
        assert_eq!(cli.ipfile_path(), std::env::temp_dir().join(".lastip"));
        assert_eq!(cli.ip_service, "https://api.ipify.org/");
        assert_eq!(cli.api_url, "https://api.godaddy.com");
        assert_eq!(cli.timeout, 30);
        assert!(!cli.strict_ip);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "godaddy-dns",
            "-c",
            "/etc/godaddy-dns.json",
            "-i",
            "/var/lib/godaddy-dns/lastip",
            "-u",
        ])
        .unwrap();

        assert_eq!(cli.config_path(), PathBuf::from("/etc/godaddy-dns.json"));
        assert_eq!(cli.ipfile_path(), PathBuf::from("/var/lib/godaddy-dns/lastip"));
        assert_eq!(cli.mode(), UpdateMode::Update);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(Cli::try_parse_from(["godaddy-dns", "--timeout", "0"]).is_err());
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("warn").unwrap(), Level::WARN);
        assert!(parse_log_level("verbose").is_err());
    }

    #[tokio::test]
    async fn test_missing_config_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("absent.json");
        let cli = Cli::try_parse_from(["godaddy-dns", "-c", config.to_str().unwrap()]).unwrap();

        assert!(matches!(
            build_engine(&cli).await,
            Err(ddns_core::Error::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_update_mode_requires_target() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("godaddy-dns.json");
        std::fs::write(
            &config,
            r#"{ "domain": "example.com", "apiKey": "key", "secret": "secret", "records": "www" }"#,
        )
        .unwrap();
        let config = config.to_str().unwrap();

        let add = Cli::try_parse_from(["godaddy-dns", "-c", config]).unwrap();
        let engine = build_engine(&add).await.unwrap();
        assert_eq!(engine.mode(), UpdateMode::Add);

        let update = Cli::try_parse_from(["godaddy-dns", "-c", config, "--update-mode"]).unwrap();
        assert!(matches!(
            build_engine(&update).await,
            Err(ddns_core::Error::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_run_adds_records_then_skips_unchanged_ip() {
        let server = MockServer::start().await;
        mount_ip(&server, "203.0.113.7\n").await;
        Mock::given(method("PATCH"))
            .and(path("/v1/domains/example.com/records"))
            .and(header("authorization", "sso-key key:secret"))
            .and(body_json(serde_json::json!([
                { "name": "www", "type": "A", "data": "203.0.113.7", "ttl": 600 }
            ])))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        let ipfile = dir.path().join("lastip");

        let first = run_captured(cli_for(&server, &config, &ipfile, &[])).await;
        assert_eq!(first.code, DdnsExitCode::Success);
        assert_eq!(first.stdout.len(), 1, "one line per run: {:?}", first.stdout);
        assert!(first.stdout[0].contains("Successfully added DNS records to ip 203.0.113.7"));
        assert!(first.stderr.is_empty());
        assert_eq!(std::fs::read_to_string(&ipfile).unwrap(), "203.0.113.7");

        let second = run_captured(cli_for(&server, &config, &ipfile, &[])).await;
        assert_eq!(second.code, DdnsExitCode::Success);
        assert_eq!(second.stdout.len(), 1, "one line per run: {:?}", second.stdout);
        assert!(second.stdout[0].contains("No IP address change (203.0.113.7). No request made"));
        assert!(second.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_run_update_mode_stores_new_ip() {
        let server = MockServer::start().await;
        mount_ip(&server, "203.0.113.7").await;
        Mock::given(method("PUT"))
            .and(path("/v1/domains/example.com/records/A/home"))
            .and(body_json(serde_json::json!([{ "data": "203.0.113.7" }])))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        let ipfile = dir.path().join("lastip");
        std::fs::write(&ipfile, "198.51.100.1").unwrap();

        let output = run_captured(cli_for(&server, &config, &ipfile, &["-u"])).await;

        assert_eq!(output.code, DdnsExitCode::Success);
        assert_eq!(output.stdout.len(), 1, "one line per run: {:?}", output.stdout);
        assert!(output.stdout[0].contains("Successfully updated DNS records to ip 203.0.113.7"));
        assert_eq!(std::fs::read_to_string(&ipfile).unwrap(), "203.0.113.7");
    }

    #[tokio::test]
    async fn test_run_rejected_update_fails_and_keeps_ipfile() {
        let server = MockServer::start().await;
        mount_ip(&server, "203.0.113.7").await;
        Mock::given(method("PATCH"))
            .and(path("/v1/domains/example.com/records"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "code": "INVALID_BODY",
                "message": "invalid"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        let ipfile = dir.path().join("lastip");
        std::fs::write(&ipfile, "198.51.100.1").unwrap();

        let output = run_captured(cli_for(&server, &config, &ipfile, &[])).await;

        assert_eq!(output.code, DdnsExitCode::Failure);
        assert!(output.stdout.is_empty(), "unexpected stdout: {:?}", output.stdout);
        assert_eq!(output.stderr.len(), 1, "one line per run: {:?}", output.stderr);
        assert!(output.stderr[0].contains("ERROR"));
        assert!(output.stderr[0].contains("(422): invalid"));
        assert_eq!(std::fs::read_to_string(&ipfile).unwrap(), "198.51.100.1");
    }

    #[tokio::test]
    async fn test_run_config_error_goes_to_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("absent.json");
        let cli = Cli::try_parse_from(["godaddy-dns", "-c", config.to_str().unwrap()]).unwrap();

        let output = run_captured(cli).await;

        assert_eq!(output.code, DdnsExitCode::Failure);
        assert!(output.stdout.is_empty());
        assert_eq!(output.stderr.len(), 1);
        assert!(output.stderr[0].contains("Configuration error"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(DdnsExitCode::Success as u8, 0);
        assert_eq!(DdnsExitCode::Failure as u8, 1);
    }
}
