use std::cell::RefCell;

use tlmsim::*;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Assert(LineId, u32),
    Clear(LineId),
    Status(LineId),
}

// records every operation; knows lines 0..=7 only
#[derive(Default)]
struct Recorder {
    calls: RefCell<Vec<Call>>,
    levels: [u32; 8],
}

impl InterruptHandler for Recorder {
    fn recognizes(&self, line: LineId) -> bool {
        line < 8
    }
    fn assert(&mut self, line: LineId, level: u32) -> Result<(), HandlerError> {
        self.calls.borrow_mut().push(Call::Assert(line, level));
        self.levels[line as usize] = level;
        Ok(())
    }
    fn clear(&mut self, line: LineId) -> Result<(), HandlerError> {
        self.calls.borrow_mut().push(Call::Clear(line));
        self.levels[line as usize] = 0;
        Ok(())
    }
    fn status(&self, line: LineId) -> Result<u32, HandlerError> {
        self.calls.borrow_mut().push(Call::Status(line));
        self.levels.get(line as usize).copied().ok_or(HandlerError::UnknownLine(line))
    }
}

#[test]
fn assert_reaches_handler_once() {
    let mut rec = Recorder::default();
    let mut port = InterruptTransportEndpoint::new("intr", &mut rec);
    for level in [1, 5, 255] {
        let rsp = port.transport(InterruptRequest::assert(2, level));
        assert_eq!(rsp, InterruptResponse::ok(level));
    }
    assert_eq!(port.stats(), PortStats { served: 3, failed: 0 });
    drop(port);
    assert_eq!(*rec.calls.borrow(), vec![Call::Assert(2, 1), Call::Assert(2, 5), Call::Assert(2, 255)]);
}

#[test]
fn unknown_target_never_touches_handler() {
    let mut rec = Recorder::default();
    let mut port = InterruptTransportEndpoint::new("intr", &mut rec);
    let reqs = [
        InterruptRequest::assert(8, 1),
        InterruptRequest::clear(99),
        InterruptRequest::query(u32::MAX),
    ];
    for req in reqs {
        let rsp = port.transport(req);
        assert_eq!(rsp.status, Status::Error);
        assert_eq!(rsp.payload, None);
    }
    assert_eq!(port.stats().failed, 3);
    drop(port);
    assert!(rec.calls.borrow().is_empty());
}

#[test]
fn malformed_action_is_an_error_response() {
    let mut rec = Recorder::default();
    let mut port = InterruptTransportEndpoint::new("intr", &mut rec);
    let rsp = port.transport(InterruptRequest::new(1, ActionCode(7), 3));
    assert_eq!(rsp, InterruptResponse::error());
    assert_eq!(
        InterruptRequest::new(1, ActionCode(7), 3).decode(),
        Err(TransportError::MalformedRequest(7))
    );
    drop(port);
    assert!(rec.calls.borrow().is_empty());
}

#[test]
fn clear_then_query_reports_cleared_line() {
    let mut port = InterruptTransportEndpoint::new("intr", InterruptLines::new(4));
    assert!(port.transport(InterruptRequest::assert(1, 9)).is_ok());
    assert_eq!(port.transport(InterruptRequest::query(1)).payload, Some(9));
    assert!(port.transport(InterruptRequest::clear(1)).is_ok());
    assert_eq!(port.transport(InterruptRequest::query(1)), InterruptResponse::ok(0));
    assert!(port.handler().pending().is_empty());
}

#[test]
fn known_and_unknown_target() {
    let mut port = InterruptTransportEndpoint::new("intr", InterruptLines::new(4));
    assert_eq!(port.transport(InterruptRequest::assert(3, 5)), InterruptResponse { status: Status::Ok, payload: Some(5) });
    assert_eq!(port.transport(InterruptRequest::assert(99, 5)).status, Status::Error);
    assert_eq!(port.handler().pending(), vec![3]);
}

#[test]
fn handler_refusal_becomes_error() {
    let mut lines = InterruptLines::new(2);
    lines.mask(0).unwrap();
    let mut port = InterruptTransportEndpoint::new("intr", lines);
    assert_eq!(port.transport(InterruptRequest::assert(0, 1)), InterruptResponse::error());
    assert_eq!(port.transport(InterruptRequest::assert(1, 0)), InterruptResponse::error());
    assert_eq!(port.transport(InterruptRequest::query(0)), InterruptResponse::ok(0));

    port.handler_mut().unmask(0).unwrap();
    assert!(port.transport(InterruptRequest::assert(0, 1)).is_ok());
    assert_eq!(port.stats(), PortStats { served: 2, failed: 2 });
    assert_eq!(port.into_handler().pending(), vec![0]);
}

#[test]
fn boxed_handler() {
    let handler: Box<dyn InterruptHandler> = Box::new(InterruptLines::new(1));
    let mut port = InterruptTransportEndpoint::new("boxed", handler);
    assert_eq!(port.name(), "boxed");
    assert!(port.transport(InterruptRequest::assert(0, 2)).is_ok());
    assert_eq!(port.transport(InterruptRequest::query(0)).payload, Some(2));
}

#[test]
fn action_kinds() {
    assert_eq!(Action::Assert.kind(), TlmKind::Write);
    assert_eq!(Action::Clear.kind(), TlmKind::Write);
    assert_eq!(Action::Query.kind(), TlmKind::Read);
    assert_eq!(InterruptRequest::clear(4).decode(), Ok(Action::Clear));
    assert_eq!(InterruptRequest::assert(3, 5).to_string(), "Assert(line=3, payload=5)");
    assert_eq!(InterruptResponse::error().to_string(), "ERROR");
}

#[test]
fn each_request_is_one_handler_operation() {
    let mut rec = Recorder::default();
    let mut port = InterruptTransportEndpoint::new("intr", &mut rec);
    assert_eq!(port.transport(InterruptRequest::query(4)), InterruptResponse::ok(0));
    assert!(port.transport(InterruptRequest::assert(4, 6)).is_ok());
    assert_eq!(port.transport(InterruptRequest::query(4)), InterruptResponse::ok(6));
    assert!(port.transport(InterruptRequest::clear(4)).is_ok());
    drop(port);
    assert_eq!(
        *rec.calls.borrow(),
        vec![Call::Status(4), Call::Assert(4, 6), Call::Status(4), Call::Clear(4)]
    );
}
