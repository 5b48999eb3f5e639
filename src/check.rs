use crate::command::Resp2Frame;
use crate::monitor::Request;

/// Command-specific validator attached to a few table entries.
///
/// Both hooks return `true` when they fully handled the check, in which case
/// the generic flag-driven checks are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomCheck {
    HGet,
    LRange,
    MGet,
    SDiff,
    Set,
    SPop,
    SRandMember,
    ZRange,
}

impl CustomCheck {
    pub fn check_request(self, req: &mut Request<'_>) -> bool {
        match self {
            CustomCheck::HGet | CustomCheck::MGet | CustomCheck::SDiff => false,
            CustomCheck::LRange | CustomCheck::ZRange => {
                check_range_span(req);
                false
            }
            // SET key value [EX seconds|PX ms] [NX|XX] [GET]
            CustomCheck::Set => {
                req.check_request_value_at(2);
                true
            }
            // SPOP/SRANDMEMBER key [count]; a negative count may repeat members.
            CustomCheck::SPop | CustomCheck::SRandMember => {
                if let Some(count) = req.multi.get(2).and_then(|a| parse_int(a)) {
                    let count = usize::try_from(count.unsigned_abs()).unwrap_or(usize::MAX);
                    req.check_request_batch(count);
                }
                true
            }
        }
    }

    pub fn check_response(self, req: &mut Request<'_>) -> bool {
        let Some(resp) = req.response else {
            return false;
        };
        match self {
            CustomCheck::LRange => false,
            // Bulk reply, nil when the field is missing.
            CustomCheck::HGet | CustomCheck::Set => {
                if let Resp2Frame::BulkString(b) = resp {
                    req.check_response_value(b.len());
                }
                true
            }
            CustomCheck::MGet => {
                if let Resp2Frame::Array(items) = resp {
                    req.check_response_array_len(items.len(), 1);
                    req.check_response_elements(items, 0, 1);
                }
                true
            }
            CustomCheck::SDiff => {
                if let Resp2Frame::Array(items) = resp {
                    req.check_response_array_len(items.len(), 1);
                }
                true
            }
            // A single member without count, an array with it.
            CustomCheck::SPop | CustomCheck::SRandMember => {
                match resp {
                    Resp2Frame::BulkString(b) => req.check_response_value(b.len()),
                    Resp2Frame::Array(items) => {
                        req.check_response_array_len(items.len(), 1);
                        req.check_response_elements(items, 0, 1);
                    }
                    _ => {}
                }
                true
            }
            CustomCheck::ZRange => {
                if let Resp2Frame::Array(items) = resp {
                    let with_scores = req
                        .multi
                        .iter()
                        .skip(4)
                        .any(|a| a.eq_ignore_ascii_case(b"WITHSCORES"));
                    if with_scores {
                        req.check_response_array_len(items.len(), 2);
                        req.check_response_elements(items, 0, 2);
                    } else {
                        req.check_response_array_len(items.len(), 1);
                        req.check_response_elements(items, 0, 1);
                    }
                }
                true
            }
        }
    }
}

/// `CMD key start stop`: a span known up front is checked as a batch.
/// Negative (tail-relative) bounds are left to the reply check.
fn check_range_span(req: &mut Request<'_>) {
    let start = req.multi.get(2).and_then(|a| parse_int(a));
    let stop = req.multi.get(3).and_then(|a| parse_int(a));
    if let (Some(start), Some(stop)) = (start, stop)
        && start >= 0
        && stop >= start
    {
        let span = ((stop - start) as u64).saturating_add(1);
        req.check_request_batch(usize::try_from(span).unwrap_or(usize::MAX));
    }
}

fn parse_int(arg: &[u8]) -> Option<i64> {
    std::str::from_utf8(arg).ok()?.parse().ok()
}
