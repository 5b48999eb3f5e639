use std::fmt;

use bytes::Bytes;

use crate::command::Resp2Frame;
use crate::flags::OpFlagChecker;
use crate::registry::Classification;
use crate::render::render_command_lossy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimits {
    /// Most keys/fields/members a request or reply may carry. 0 disables.
    pub max_batch_size: usize,
    /// Largest single value in bytes. 0 disables.
    pub max_value_size: usize,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            max_batch_size: 1000,
            max_value_size: 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    RequestBatch,
    RequestValue,
    ResponseValue,
    ResponseNumber,
    ResponseArray,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ViolationKind::RequestBatch => "request batch size",
            ViolationKind::RequestValue => "request value size",
            ViolationKind::ResponseValue => "response value size",
            ViolationKind::ResponseNumber => "response size",
            ViolationKind::ResponseArray => "response array length",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub actual: usize,
    pub limit: usize,
}

/// An in-flight command, optionally paired with its backend reply.
#[derive(Debug)]
pub struct Request<'a> {
    pub multi: &'a [Bytes],
    pub response: Option<&'a Resp2Frame>,
    limits: SizeLimits,
    violations: Vec<Violation>,
}

impl<'a> Request<'a> {
    pub fn new(multi: &'a [Bytes], limits: SizeLimits) -> Self {
        Self {
            multi,
            response: None,
            limits,
            violations: Vec::new(),
        }
    }

    pub fn with_response(mut self, response: &'a Resp2Frame) -> Self {
        self.response = Some(response);
        self
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Log every finding with a bounded rendering of the command.
    pub fn report(&self, name: &str, render_capacity: usize) {
        if self.violations.is_empty() {
            return;
        }
        let rendered = render_command_lossy(self.multi, render_capacity);
        for v in &self.violations {
            tracing::warn!(
                cmd = %name,
                kind = %v.kind,
                actual = v.actual,
                limit = v.limit,
                command = %rendered,
                "oversized command"
            );
        }
    }

    fn record(&mut self, kind: ViolationKind, actual: usize, limit: usize) {
        if limit > 0 && actual > limit {
            self.violations.push(Violation {
                kind,
                actual,
                limit,
            });
        }
    }

    pub(crate) fn check_request_batch(&mut self, count: usize) {
        self.record(ViolationKind::RequestBatch, count, self.limits.max_batch_size);
    }

    pub(crate) fn check_request_value_at(&mut self, index: usize) {
        if let Some(v) = self.multi.get(index) {
            self.record(ViolationKind::RequestValue, v.len(), self.limits.max_value_size);
        }
    }

    fn check_request_values(&mut self, first: usize, step: usize) {
        let multi = self.multi;
        for v in multi.iter().skip(first).step_by(step) {
            self.record(ViolationKind::RequestValue, v.len(), self.limits.max_value_size);
        }
    }

    pub(crate) fn check_response_value(&mut self, len: usize) {
        self.record(ViolationKind::ResponseValue, len, self.limits.max_value_size);
    }

    /// `group` is 2 for replies that interleave two items per entry.
    pub(crate) fn check_response_array_len(&mut self, len: usize, group: usize) {
        self.record(
            ViolationKind::ResponseArray,
            len / group,
            self.limits.max_batch_size,
        );
    }

    pub(crate) fn check_response_elements(&mut self, items: &[Resp2Frame], first: usize, step: usize) {
        for item in items.iter().skip(first).step_by(step) {
            if let Resp2Frame::BulkString(b) = item {
                self.check_response_value(b.len());
            }
        }
    }
}

/// Run the request-side checks for `class`.
pub fn check_request(class: &Classification, req: &mut Request<'_>) {
    if let Some(check) = class.check
        && check.check_request(req)
    {
        return;
    }

    let m = class.monitor;
    let argc = req.multi.len();

    if m.need_check_batchsize_of_request() {
        let count = if m.contains(OpFlagChecker::REQ_KEYS) {
            argc.saturating_sub(1)
        } else {
            argc.saturating_sub(2)
        };
        req.check_request_batch(count);
    }

    if m.need_check_content_of_request() {
        if m.contains(OpFlagChecker::REQ_VALUES) {
            req.check_request_values(2, 1);
        }
        if m.contains(OpFlagChecker::REQ_KEY_VALUES) {
            req.check_request_batch(argc.saturating_sub(1) / 2);
            req.check_request_values(2, 2);
        }
        if m.contains(OpFlagChecker::REQ_KEY_FIELD_VALUES) {
            req.check_request_batch(argc.saturating_sub(2) / 2);
            req.check_request_values(3, 2);
        }
        if m.contains(OpFlagChecker::REQ_KEY_TTL_VALUE) {
            req.check_request_value_at(3);
        }
    }
}

/// Run the reply-side checks for `class`. Does nothing until a reply is attached.
pub fn check_response(class: &Classification, req: &mut Request<'_>) {
    if let Some(check) = class.check
        && check.check_response(req)
    {
        return;
    }
    let Some(resp) = req.response else {
        return;
    };

    let m = class.monitor;

    if m.need_check_single_value_of_resp()
        && let Resp2Frame::BulkString(b) = resp
    {
        req.check_response_value(b.len());
    }

    if m.need_check_number_of_resp()
        && let Resp2Frame::Integer(n) = resp
    {
        let n = usize::try_from(*n).unwrap_or(0);
        let limits = req.limits;
        if m.contains(OpFlagChecker::RESP_RETURN_ARRAYSIZE) {
            req.record(ViolationKind::ResponseNumber, n, limits.max_batch_size);
        }
        if m.contains(OpFlagChecker::RESP_RETURN_VALUESIZE) {
            req.record(ViolationKind::ResponseNumber, n, limits.max_value_size);
        }
    }

    if m.need_check_array_of_resp()
        && let Resp2Frame::Array(items) = resp
    {
        if m.contains(OpFlagChecker::RESP_RETURN_ARRAY) {
            req.check_response_array_len(items.len(), 1);
            req.check_response_elements(items, 0, 1);
        } else if m.contains(OpFlagChecker::RESP_RETURN_ARRAY_BY_PAIR) {
            req.check_response_array_len(items.len(), 2);
            req.check_response_elements(items, 1, 2);
        } else if m.contains(OpFlagChecker::RESP_CHECK_ARRAY_LENGTH) {
            req.check_response_array_len(items.len(), 1);
        } else {
            req.check_response_array_len(items.len(), 2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    fn multi(parts: &[&str]) -> Vec<Bytes> {
        parts
            .iter()
            .map(|p| Bytes::copy_from_slice(p.as_bytes()))
            .collect()
    }

    fn bulk(s: &str) -> Resp2Frame {
        Resp2Frame::BulkString(Bytes::copy_from_slice(s.as_bytes()))
    }

    const TIGHT: SizeLimits = SizeLimits {
        max_batch_size: 2,
        max_value_size: 4,
    };

    #[test]
    fn key_batch_over_limit() {
        let registry = Registry::new();
        let cmd = multi(&["DEL", "a", "b", "c"]);
        let class = registry.classify(&cmd).unwrap();
        let mut req = Request::new(&cmd, TIGHT);
        check_request(&class, &mut req);
        assert_eq!(
            req.violations(),
            &[Violation {
                kind: ViolationKind::RequestBatch,
                actual: 3,
                limit: 2,
            }]
        );
    }

    #[test]
    fn field_values_checked_at_value_positions() {
        let registry = Registry::new();
        // Fields may be long; only values count against the value limit.
        let cmd = multi(&["HSET", "h", "longfield", "v", "f2", "toolong"]);
        let class = registry.classify(&cmd).unwrap();
        let mut req = Request::new(&cmd, TIGHT);
        check_request(&class, &mut req);
        assert_eq!(req.violations().len(), 1);
        assert_eq!(req.violations()[0].kind, ViolationKind::RequestValue);
        assert_eq!(req.violations()[0].actual, 7);
    }

    #[test]
    fn key_values_count_pairs() {
        let registry = Registry::new();
        let cmd = multi(&["MSET", "k1", "v", "k2", "v", "k3", "v"]);
        let class = registry.classify(&cmd).unwrap();
        let mut req = Request::new(&cmd, TIGHT);
        check_request(&class, &mut req);
        assert_eq!(req.violations()[0].kind, ViolationKind::RequestBatch);
        assert_eq!(req.violations()[0].actual, 3);
    }

    #[test]
    fn ttl_value_position() {
        let registry = Registry::new();
        let cmd = multi(&["SETEX", "k", "100000", "abcdef"]);
        let class = registry.classify(&cmd).unwrap();
        let mut req = Request::new(&cmd, TIGHT);
        check_request(&class, &mut req);
        assert_eq!(req.violations().len(), 1);
        assert_eq!(req.violations()[0].actual, 6);
    }

    #[test]
    fn single_value_reply() {
        let registry = Registry::new();
        let cmd = multi(&["GET", "k"]);
        let class = registry.classify(&cmd).unwrap();
        let reply = bulk("abcdefgh");
        let mut req = Request::new(&cmd, TIGHT).with_response(&reply);
        check_response(&class, &mut req);
        assert_eq!(req.violations()[0].kind, ViolationKind::ResponseValue);
    }

    #[test]
    fn number_reply() {
        let registry = Registry::new();
        let cmd = multi(&["LLEN", "k"]);
        let class = registry.classify(&cmd).unwrap();
        let reply = Resp2Frame::Integer(3);
        let mut req = Request::new(&cmd, TIGHT).with_response(&reply);
        check_response(&class, &mut req);
        assert_eq!(req.violations()[0].kind, ViolationKind::ResponseNumber);

        let reply = Resp2Frame::Integer(-1);
        let mut req = Request::new(&cmd, TIGHT).with_response(&reply);
        check_response(&class, &mut req);
        assert!(req.is_clean());
    }

    #[test]
    fn pair_array_reply_checks_values_only() {
        let registry = Registry::new();
        let cmd = multi(&["HGETALL", "h"]);
        let class = registry.classify(&cmd).unwrap();
        let reply = Resp2Frame::Array(vec![bulk("longfield"), bulk("v"), bulk("f"), bulk("v")]);
        let mut req = Request::new(&cmd, TIGHT).with_response(&reply);
        check_response(&class, &mut req);
        assert!(req.is_clean());

        let reply = Resp2Frame::Array(vec![bulk("f"), bulk("toolong")]);
        let mut req = Request::new(&cmd, TIGHT).with_response(&reply);
        check_response(&class, &mut req);
        assert_eq!(req.violations()[0].kind, ViolationKind::ResponseValue);
    }

    #[test]
    fn zero_limit_disables() {
        let registry = Registry::new();
        let cmd = multi(&["DEL", "a", "b", "c", "d"]);
        let class = registry.classify(&cmd).unwrap();
        let limits = SizeLimits {
            max_batch_size: 0,
            max_value_size: 0,
        };
        let mut req = Request::new(&cmd, limits);
        check_request(&class, &mut req);
        assert!(req.is_clean());
    }

    #[test]
    fn unknown_command_is_unchecked() {
        let registry = Registry::new();
        let cmd = multi(&["NEWCOMMAND", "a", "b", "c", "d"]);
        let class = registry.classify(&cmd).unwrap();
        let reply = bulk("a very long reply");
        let mut req = Request::new(&cmd, TIGHT).with_response(&reply);
        check_request(&class, &mut req);
        check_response(&class, &mut req);
        assert!(req.is_clean());
    }
}
