use std::fs;

use tempfile::tempdir;

use super::common::{Outbox, Report, container};
use crate::config::{ConfigFormat, DispatcherConfig, ListenerBinding};
use crate::dispatcher::Dispatcher;
use crate::error::DispatchError;
use crate::event::Value;
use crate::listener::ResolutionError;

#[test]
fn test_dispatcher_from_config() {
    let outbox = Outbox::default();
    let config = DispatcherConfig::default()
        .bind(ListenerBinding::new(["report.generated", "report.resent"], "ReportMailer", 5));

    let dispatcher = Dispatcher::from_config(&config, container(&outbox)).unwrap();

    assert!(dispatcher.has("report.generated"));
    assert!(dispatcher.has("report.resent"));
    dispatcher
        .fire("report.resent", Value::object(Report { title: "Q2".to_string() }), false)
        .unwrap();
    assert_eq!(*outbox.lock().unwrap(), ["mailed Q2"]);
}

#[test]
fn test_config_default_method_applies_to_bindings() {
    let outbox = Outbox::default();
    let config = DispatcherConfig {
        default_method: "sent".to_string(),
        listeners: vec![ListenerBinding::new(["mailer.stats"], "ReportMailer", 0)],
    };

    let dispatcher = Dispatcher::from_config(&config, container(&outbox)).unwrap();
    assert_eq!(dispatcher.resolver().default_method(), "sent");
    assert_eq!(dispatcher.until("mailer.stats", ()).unwrap(), Some(Value::Int(0)));
}

#[test]
fn test_config_with_bad_reference_fails() {
    let outbox = Outbox::default();
    let config = DispatcherConfig::default()
        .bind(ListenerBinding::new(["a"], "ReportMailer", 0))
        .bind(ListenerBinding::new(["b"], "@handle", 0));

    let err = Dispatcher::from_config(&config, container(&outbox)).unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Resolution(ResolutionError::MalformedReference { .. })
    ));
}

#[test]
fn test_config_binding_without_events_is_still_checked() {
    let outbox = Outbox::default();
    let config = DispatcherConfig::default().bind(ListenerBinding::new(Vec::<String>::new(), "@handle", 0));

    let err = Dispatcher::from_config(&config, container(&outbox)).unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Resolution(ResolutionError::MalformedReference { .. })
    ));

    let config = DispatcherConfig::default().bind(ListenerBinding::new(Vec::<String>::new(), "ReportMailer", 0));
    let dispatcher = Dispatcher::from_config(&config, container(&outbox)).unwrap();
    assert!(dispatcher.registry().is_empty());
}

#[test]
fn test_config_loaded_from_file_drives_dispatcher() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.json");
    let config = DispatcherConfig::default()
        .bind(ListenerBinding::new(["OrderPlaced"], "OrderLedger", 0));
    fs::write(&path, config.serialize(ConfigFormat::Json).unwrap()).unwrap();

    let outbox = Outbox::default();
    let loaded = DispatcherConfig::load(&path).unwrap();
    let dispatcher = Dispatcher::from_config(&loaded, container(&outbox)).unwrap();
    assert!(dispatcher.has("OrderPlaced"));
}
