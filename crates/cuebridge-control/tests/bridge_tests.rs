use async_trait::async_trait;
use cuebridge_control::{
    ApiClient, Bridge, BridgeConfig, BridgeError, DispatchTarget, InvalidReason, Outcome, Result,
};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Records every URL together with the (tokio) time it was requested
#[derive(Default)]
struct RecordingClient {
    calls: Mutex<Vec<(String, Instant)>>,
    fail_first: bool,
}

impl RecordingClient {
    fn urls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }
}

#[async_trait]
impl ApiClient for RecordingClient {
    async fn get(&self, url: &str) -> Result<()> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((url.to_string(), Instant::now()));
        if self.fail_first && calls.len() == 1 {
            return Err(BridgeError::Config("connection refused".to_string()));
        }
        Ok(())
    }
}

fn bridge_with(client: RecordingClient) -> Bridge<RecordingClient> {
    let target = DispatchTarget::from_parts("10.0.0.5", 8088, "/api/").unwrap();
    Bridge::new(client, target, 6)
}

#[tokio::test(start_paused = true)]
async fn test_show_scenario() {
    // registry = {SCENE, TOP}, cooldown = 6s, last event at t=0
    let mut bridge = bridge_with(RecordingClient::default());

    assert_eq!(bridge.handle_datagram(b"SCN,3", 1).await, Outcome::CooledDown);
    assert!(bridge.client().urls().is_empty());

    assert_eq!(
        bridge.handle_datagram(b"SCN,3", 7).await,
        Outcome::Dispatched {
            calls: 2,
            failures: 0
        }
    );
    assert_eq!(
        bridge.client().urls(),
        vec![
            "http://10.0.0.5:8088/api/?Function=DataSourceSelectRow&Value=Scenes,3",
            "http://10.0.0.5:8088/api/?Function=ScriptStart&Value=GFXSCENE",
        ]
    );
    assert_eq!(bridge.gate().last_event(), 7);

    assert_eq!(bridge.handle_datagram(b"TOP", 8).await, Outcome::CooledDown);
    assert_eq!(bridge.gate().last_event(), 7);

    assert_eq!(
        bridge.handle_datagram(b"TOP", 14).await,
        Outcome::Dispatched {
            calls: 1,
            failures: 0
        }
    );
    let urls = bridge.client().urls();
    assert_eq!(urls.len(), 3);
    assert_eq!(
        urls[2],
        "http://10.0.0.5:8088/api/?Function=ScriptStart&Value=TOP"
    );
    assert_eq!(bridge.gate().last_event(), 14);
}

#[tokio::test(start_paused = true)]
async fn test_settle_delay_between_select_and_script() {
    let mut bridge = bridge_with(RecordingClient::default());
    bridge.handle_datagram(b"SCN,3\r\n", 100).await;

    let calls = bridge.client().calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].0.contains("DataSourceSelectRow"));
    assert!(calls[1].0.contains("ScriptStart"));
    assert_eq!(calls[1].1 - calls[0].1, Duration::from_millis(250));
}

#[tokio::test(start_paused = true)]
async fn test_configured_settle_delay() {
    let config = BridgeConfig {
        settle_delay_ms: 1000,
        ..BridgeConfig::default().with_host("10.0.0.5")
    };
    let mut bridge = Bridge::from_config(RecordingClient::default(), &config).unwrap();
    assert_eq!(bridge.target().base_url(), "http://10.0.0.5:8088/api/");
    bridge.handle_datagram(b"SCN,0", 100).await;

    let calls = bridge.client().calls.lock().unwrap().clone();
    assert_eq!(
        calls[0].0,
        "http://10.0.0.5:8088/api/?Function=DataSourceSelectRow&Value=Scenes,0"
    );
    assert_eq!(calls[1].1 - calls[0].1, Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_failed_select_still_records_and_triggers() {
    let client = RecordingClient {
        fail_first: true,
        ..Default::default()
    };
    let mut bridge = bridge_with(client);

    assert_eq!(
        bridge.handle_datagram(b"SCN,5", 50).await,
        Outcome::Dispatched {
            calls: 2,
            failures: 1
        }
    );
    assert_eq!(bridge.gate().last_event(), 50);
    assert_eq!(bridge.client().urls().len(), 2);
}

#[tokio::test]
async fn test_invalid_input_never_advances_cooldown() {
    let mut bridge = bridge_with(RecordingClient::default());
    bridge.handle_datagram(b"TOP", 100).await;

    // Noise inside the window is dropped by the gate
    for now in 101..=106 {
        assert_eq!(bridge.handle_datagram(b"SCN,", now).await, Outcome::CooledDown);
    }

    // Noise after the window is parsed and ignored, timestamp stays put
    assert_eq!(
        bridge.handle_datagram(b"SCN,", 107).await,
        Outcome::Ignored(InvalidReason::MissingValue)
    );
    assert_eq!(
        bridge.handle_datagram(b"SCN,x", 108).await,
        Outcome::Ignored(InvalidReason::NonIntegerValue("x".to_string()))
    );
    assert_eq!(
        bridge.handle_datagram(b"HELLO", 109).await,
        Outcome::Ignored(InvalidReason::UnrecognizedCommand("HELLO".to_string()))
    );
    assert_eq!(bridge.gate().last_event(), 100);

    // A valid command right after is still accepted
    assert!(matches!(
        bridge.handle_datagram(b"SCENE", 110).await,
        Outcome::Dispatched { calls: 1, .. }
    ));
    assert_eq!(bridge.gate().last_event(), 110);
}

#[tokio::test]
async fn test_scripts_from_config() {
    let config = BridgeConfig::default()
        .with_host("mixer")
        .with_cooldown(0)
        .with_script("INTERVAL");
    let mut bridge = Bridge::from_config(RecordingClient::default(), &config)
        .unwrap()
        .with_settle_delay(Duration::ZERO);

    assert!(bridge.registry().contains("SCENE"));
    assert!(bridge.registry().contains("TOP"));
    assert!(bridge.registry().contains("INTERVAL"));

    bridge.handle_datagram(b"INTERVAL\r\n", 1).await;
    assert_eq!(
        bridge.client().urls(),
        vec!["http://mixer:8088/api/?Function=ScriptStart&Value=INTERVAL"]
    );
}

#[tokio::test]
async fn test_non_utf8_is_ignored() {
    let mut bridge = bridge_with(RecordingClient::default());
    let outcome = bridge.handle_datagram(&[0xff, 0xfe, b'T'], 100).await;
    assert!(matches!(outcome, Outcome::Ignored(_)));
    assert_eq!(bridge.gate().last_event(), 0);
}
