use std::any::Any;
use std::sync::{Arc, Mutex};

use crate::event::{Event, Value};
use crate::listener::{ClassListener, ListenerContainer, ListenerResult};

/// Object event fired in the scenarios.
#[derive(Debug)]
pub struct OrderPlaced {
    pub total_cents: i64,
}

impl Event for OrderPlaced {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Report handed to listeners as a payload argument.
#[derive(Debug)]
pub struct Report {
    pub title: String,
}

impl Event for Report {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Outbox shared by the mailer instances of one test.
pub type Outbox = Arc<Mutex<Vec<String>>>;

/// Type-ref listener: `handle` mails a report, `sent` answers how many this
/// instance mailed so far.
pub struct ReportMailer {
    outbox: Outbox,
    sent: i64,
}

impl ClassListener for ReportMailer {
    fn responds_to(&self, method: &str) -> bool {
        matches!(method, "handle" | "sent")
    }

    fn call(&mut self, method: &str, args: &[Value]) -> ListenerResult {
        match method {
            "sent" => Ok(Value::Int(self.sent)),
            _ => {
                let report = args
                    .first()
                    .and_then(|arg| arg.downcast_ref::<Report>())
                    .ok_or("ReportMailer expects a Report argument")?;
                self.sent += 1;
                self.outbox
                    .lock()
                    .map_err(|_| "outbox poisoned")?
                    .push(format!("mailed {}", report.title));
                Ok(Value::from(self.sent))
            }
        }
    }
}

/// Type-ref listener that totals orders it has seen.
#[derive(Default)]
pub struct OrderLedger {
    total_cents: i64,
}

impl ClassListener for OrderLedger {
    fn call(&mut self, _method: &str, args: &[Value]) -> ListenerResult {
        let order = args
            .first()
            .and_then(|arg| arg.downcast_ref::<OrderPlaced>())
            .ok_or("OrderLedger expects an OrderPlaced argument")?;
        self.total_cents += order.total_cents;
        Ok(Value::Int(self.total_cents))
    }
}

/// Container with `ReportMailer` (writing to `outbox`) and `OrderLedger` bound.
pub fn container(outbox: &Outbox) -> ListenerContainer {
    let outbox = Arc::clone(outbox);
    let mut container = ListenerContainer::new();
    container
        .bind_with("ReportMailer", move || {
            Ok(ReportMailer {
                outbox: Arc::clone(&outbox),
                sent: 0,
            })
        })
        .bind_type::<OrderLedger>();
    container
}
