//! End-to-end test of the probe/record loop through the public API:
//! parsed AP info, a scripted prober, and a real append-mode log file.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pingtool::ap::parse_airport_output;
use pingtool::{
    ConsoleSink, MultiSink, ProbeConfig, ProbeError, Prober, RunContext, SampleLoop, Sample,
};
use tokio_util::sync::CancellationToken;

const AIRPORT_OUTPUT: &str = "\
     agrCtlRSSI: -50
     agrExtRSSI: 0
    agrCtlNoise: -90
    agrExtNoise: 0
          state: running
     lastTxRate: 65
        maxRate: 144
lastAssocStatus: 0
          BSSID: aa:bb:cc:dd:ee:ff
           SSID: home
            MCS: 7
        channel: 6
";

/// Prober that answers a fixed delay and cancels the run after a set
/// number of probes.
struct ScriptedProber {
    count: Mutex<usize>,
    cancel_after: usize,
    token: CancellationToken,
}

#[async_trait::async_trait]
impl Prober for ScriptedProber {
    async fn probe(&self, _host: &str, _timeout: Duration) -> Result<Option<Duration>, ProbeError> {
        let mut count = self.count.lock().unwrap();
        *count += 1;
        if *count >= self.cancel_after {
            self.token.cancel();
        }
        Ok(Some(Duration::from_millis(25)))
    }
}

/// Console stand-in capturing its bytes instead of writing to stdout.
#[derive(Clone, Default)]
struct CapturedConsole(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedConsole {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn run_context() -> RunContext {
    RunContext {
        user: "alice".to_string(),
        info: parse_airport_output(AIRPORT_OUTPUT).unwrap(),
    }
}

#[tokio::test]
async fn test_loop_appends_to_log_file_and_console() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("pingtool.csv");

    let token = CancellationToken::new();
    let prober = ScriptedProber {
        count: Mutex::new(0),
        cancel_after: 4,
        token: token.clone(),
    };
    let config = ProbeConfig::resolve(vec!["10.11.0.1".to_string(), "google.com".to_string()])
        .with_interval(Duration::from_secs(30))
        .with_log_file(&log_path);
    config.validate().unwrap();

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .unwrap();
    let console = CapturedConsole::default();
    let sink = MultiSink::new(vec![Box::new(console.clone()), Box::new(file)]);

    let looper = SampleLoop::new(config, run_context(), prober, ConsoleSink::new());
    looper.run(sink, token).await.unwrap();

    let logged = std::fs::read_to_string(&log_path).unwrap();
    let echoed = String::from_utf8(console.0.lock().unwrap().clone()).unwrap();
    assert_eq!(logged, echoed);

    let lines: Vec<&str> = logged.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with('#'));
    let ap: serde_json::Value = serde_json::from_str(&lines[0][1..]).unwrap();
    assert_eq!(ap["SSID"], "home");
    assert_eq!(ap["agrCtlRSSI"], -50);
    assert_eq!(lines[1], "user,ssid,bssid,utc_time,host,delay");

    // Rows parse back as samples with the contract column order.
    let csv_part = logged.lines().skip(1).collect::<Vec<_>>().join("\n");
    let mut reader = csv::Reader::from_reader(csv_part.as_bytes());
    let samples: Vec<Sample> = reader.deserialize().map(Result::unwrap).collect();
    assert_eq!(samples.len(), 4);
    let hosts: Vec<&str> = samples.iter().map(|s| s.host.as_str()).collect();
    assert_eq!(hosts, ["10.11.0.1", "google.com", "10.11.0.1", "google.com"]);
    assert!(samples.iter().all(|s| s.user == "alice" && s.ssid == "home"));
    assert!(samples.iter().all(|s| s.delay == Some(25.0)));
}

#[tokio::test]
async fn test_prior_run_data_is_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("pingtool.csv");
    std::fs::write(&log_path, "#previous-run\nuser,ssid,bssid,utc_time,host,delay\n").unwrap();

    let token = CancellationToken::new();
    let prober = ScriptedProber {
        count: Mutex::new(0),
        cancel_after: 1,
        token: token.clone(),
    };
    let config = ProbeConfig::resolve(vec!["10.11.0.1".to_string()])
        .with_interval(Duration::from_secs(30))
        .with_log_file(&log_path);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .unwrap();
    let sink = MultiSink::new(vec![Box::new(file)]);

    let looper = SampleLoop::new(config, run_context(), prober, ConsoleSink::new());
    looper.run(sink, token).await.unwrap();

    let logged = std::fs::read_to_string(&log_path).unwrap();
    assert!(logged.starts_with("#previous-run\n"));
    // New run re-emitted its own comment and header after the old data.
    assert_eq!(logged.matches("user,ssid,bssid").count(), 2);
}
