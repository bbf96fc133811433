use super::common::{OrderPlaced, Outbox, Report, container};
use crate::dispatcher::Dispatcher;
use crate::dispatcher::shared::SharedDispatcher;
use crate::error::DispatchError;
use crate::event::{EventKey, Value};
use crate::listener::{ResolutionError, Subscription};

#[test]
fn test_type_ref_listener_receives_payload() {
    let outbox = Outbox::default();
    let mut dispatcher = Dispatcher::with_container(container(&outbox));
    dispatcher.listen("report.generated", "ReportMailer@handle", 0).unwrap();

    let response = dispatcher
        .fire("report.generated", Value::object(Report { title: "Q3".to_string() }), false)
        .unwrap();

    assert_eq!(response.into_responses(), vec![Value::Int(1)]);
    assert_eq!(*outbox.lock().unwrap(), ["mailed Q3"]);
}

#[test]
fn test_type_ref_instance_state_persists_across_fires() {
    let outbox = Outbox::default();
    let mut dispatcher = Dispatcher::with_container(container(&outbox));
    dispatcher.listen("report.generated", "ReportMailer", 0).unwrap();

    for title in ["Q1", "Q2", "Q3"] {
        dispatcher
            .fire("report.generated", Value::object(Report { title: title.to_string() }), false)
            .unwrap();
    }

    let last = dispatcher
        .fire("report.generated", Value::object(Report { title: "Q4".to_string() }), false)
        .unwrap();
    assert_eq!(last.into_responses(), vec![Value::Int(4)]);
    assert_eq!(outbox.lock().unwrap().len(), 4);
}

#[test]
fn test_type_ref_listener_errors_propagate() {
    let outbox = Outbox::default();
    let mut dispatcher = Dispatcher::with_container(container(&outbox));
    dispatcher.listen("report.generated", "ReportMailer", 0).unwrap();

    let err = dispatcher.fire("report.generated", "not a report", false).unwrap_err();
    assert!(matches!(err, DispatchError::ListenerFailed { .. }));
    assert!(err.to_string().contains("expects a Report"));
    assert!(outbox.lock().unwrap().is_empty());
}

#[test]
fn test_object_event_with_type_ref_listener() {
    let outbox = Outbox::default();
    let mut dispatcher = Dispatcher::with_container(container(&outbox));
    dispatcher.listen("OrderPlaced", "OrderLedger", 0).unwrap();

    dispatcher
        .fire(EventKey::object(OrderPlaced { total_cents: 1_250 }), (), false)
        .unwrap();
    let total = dispatcher
        .until(EventKey::object(OrderPlaced { total_cents: 750 }), ())
        .unwrap();

    assert_eq!(total, Some(Value::Int(2_000)));
}

#[test]
fn test_mixed_listeners_share_priority_order() {
    let outbox = Outbox::default();
    let mut dispatcher = Dispatcher::with_container(container(&outbox));
    dispatcher
        .listen("report.generated", Subscription::direct(|_args| Ok(Value::from("archived"))), -1)
        .unwrap();
    dispatcher.listen("report.generated", "ReportMailer", 1).unwrap();
    dispatcher
        .listen("report.generated", Subscription::direct(|_args| Ok(Value::Null)), 1)
        .unwrap();

    let labels: Vec<&str> = dispatcher
        .listeners_for("report.generated")
        .into_iter()
        .map(|listener| listener.label())
        .collect();
    assert_eq!(labels, ["ReportMailer@handle", "closure", "closure"]);

    let response = dispatcher
        .fire("report.generated", Value::object(Report { title: "Q1".to_string() }), false)
        .unwrap();
    assert_eq!(
        response.into_responses(),
        vec![Value::Int(1), Value::Null, Value::from("archived")]
    );
}

#[test]
fn test_unknown_method_fails_at_registration() {
    let outbox = Outbox::default();
    let mut dispatcher = Dispatcher::with_container(container(&outbox));

    let err = dispatcher.listen("report.generated", "OrderLedger@sent", 0).unwrap_err();
    assert_eq!(
        err,
        ResolutionError::UnknownMethod {
            type_name: "OrderLedger".to_string(),
            method: "sent".to_string(),
        }
    );
}

#[tokio::test]
async fn test_shared_dispatcher_with_type_refs() {
    let outbox = Outbox::default();
    let shared = SharedDispatcher::new(Dispatcher::with_container(container(&outbox)));

    shared.listen(["report.generated", "report.resent"], "ReportMailer", 0).await.unwrap();

    let mut handles = Vec::new();
    for title in ["A", "B", "C"] {
        let shared = shared.clone();
        handles.push(tokio::spawn(async move {
            shared
                .fire("report.generated", Value::object(Report { title: title.to_string() }), false)
                .await
                .map(|_| ())
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // Each event name got its own instance
    let resent = shared
        .until("report.resent", Value::object(Report { title: "D".to_string() }))
        .await
        .unwrap();
    assert_eq!(resent, Some(Value::Int(1)));
    assert_eq!(outbox.lock().unwrap().len(), 4);
}
