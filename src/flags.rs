use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Operational classification of a command.
    ///
    /// `QUICK` and `SLOW` are latency-triage tags assigned at runtime by an
    /// operator; every other bit is fixed by the built-in table.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct OpFlag: u32 {
        const WRITE       = 1 << 0;
        const MASTER_ONLY = 1 << 1;
        const MAY_WRITE   = 1 << 2;
        const NOT_ALLOW   = 1 << 3;
        const QUICK       = 1 << 4;
        const SLOW        = 1 << 5;
    }
}

impl OpFlag {
    pub fn is_not_allowed(self) -> bool {
        self.contains(Self::NOT_ALLOW)
    }

    /// Neither a write nor a possible write.
    pub fn is_read_only(self) -> bool {
        !self.intersects(Self::WRITE | Self::MAY_WRITE)
    }

    /// Anything that might mutate, or is explicitly pinned, must hit the master.
    pub fn is_master_only(self) -> bool {
        self.intersects(Self::WRITE | Self::MAY_WRITE | Self::MASTER_ONLY)
    }

    pub fn is_quick(self) -> bool {
        self.contains(Self::QUICK)
    }

    pub fn is_slow(self) -> bool {
        self.contains(Self::SLOW)
    }
}

bitflags! {
    /// Request/response shape of a command, used by the abuse-size monitor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct OpFlagChecker: u32 {
        // CMD key1 .. keyN
        const REQ_KEYS                 = 1 << 0;
        // CMD key field1 .. fieldN
        const REQ_KEY_FIELDS           = 1 << 1;
        // CMD key value1 .. valueN
        const REQ_VALUES               = 1 << 2;
        // CMD (key1 value1) .. (keyN valueN)
        const REQ_KEY_VALUES           = 1 << 3;
        // CMD key (field1 value1) .. (fieldN valueN)
        const REQ_KEY_FIELD_VALUES     = 1 << 4;
        // CMD key ttl value
        const REQ_KEY_TTL_VALUE        = 1 << 5;

        // integer reply holding a member count
        const RESP_RETURN_ARRAYSIZE    = 1 << 6;
        // integer reply holding a string length
        const RESP_RETURN_VALUESIZE    = 1 << 7;
        const RESP_RETURN_SINGLE_VALUE = 1 << 8;
        const RESP_RETURN_ARRAY        = 1 << 9;
        const RESP_RETURN_ARRAY_BY_PAIR = 1 << 10;
        // array reply, only the length is checked
        const RESP_CHECK_ARRAY_LENGTH  = 1 << 11;
        const RESP_CHECK_ARRAY_LENGTH_BY_PAIR = 1 << 12;
    }
}

impl OpFlagChecker {
    pub fn need_check_batchsize_of_request(self) -> bool {
        self.intersects(Self::REQ_KEYS | Self::REQ_KEY_FIELDS)
    }

    pub fn need_check_content_of_request(self) -> bool {
        self.intersects(
            Self::REQ_VALUES
                | Self::REQ_KEY_VALUES
                | Self::REQ_KEY_FIELD_VALUES
                | Self::REQ_KEY_TTL_VALUE,
        )
    }

    pub fn need_check_single_value_of_resp(self) -> bool {
        self.contains(Self::RESP_RETURN_SINGLE_VALUE)
    }

    pub fn need_check_number_of_resp(self) -> bool {
        self.intersects(Self::RESP_RETURN_ARRAYSIZE | Self::RESP_RETURN_VALUESIZE)
    }

    pub fn need_check_array_of_resp(self) -> bool {
        self.intersects(
            Self::RESP_RETURN_ARRAY
                | Self::RESP_RETURN_ARRAY_BY_PAIR
                | Self::RESP_CHECK_ARRAY_LENGTH
                | Self::RESP_CHECK_ARRAY_LENGTH_BY_PAIR,
        )
    }
}

/// Latency-triage class an operator can assign to a set of commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Triage {
    Quick,
    Slow,
}

impl Triage {
    pub fn flag(self) -> OpFlag {
        match self {
            Triage::Quick => OpFlag::QUICK,
            Triage::Slow => OpFlag::SLOW,
        }
    }

    pub fn opposite(self) -> Triage {
        match self {
            Triage::Quick => Triage::Slow,
            Triage::Slow => Triage::Quick,
        }
    }
}

impl fmt::Display for Triage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Triage::Quick => f.write_str("FlagQuick"),
            Triage::Slow => f.write_str("FlagSlow"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coarse_predicates() {
        assert!(OpFlag::empty().is_read_only());
        assert!(!OpFlag::empty().is_master_only());

        assert!(!OpFlag::WRITE.is_read_only());
        assert!(OpFlag::WRITE.is_master_only());

        assert!(!OpFlag::MAY_WRITE.is_read_only());
        assert!(OpFlag::MAY_WRITE.is_master_only());

        // Explicitly pinned reads stay read-only but go to the master.
        assert!(OpFlag::MASTER_ONLY.is_read_only());
        assert!(OpFlag::MASTER_ONLY.is_master_only());

        assert!((OpFlag::WRITE | OpFlag::NOT_ALLOW).is_not_allowed());
        assert!(!OpFlag::WRITE.is_not_allowed());

        assert!(OpFlag::QUICK.is_quick());
        assert!(!OpFlag::SLOW.is_quick());
        assert!(OpFlag::SLOW.is_slow());
    }

    #[test]
    fn fine_predicates() {
        let keys = OpFlagChecker::REQ_KEYS;
        assert!(keys.need_check_batchsize_of_request());
        assert!(!keys.need_check_content_of_request());

        let hset = OpFlagChecker::REQ_KEY_FIELD_VALUES;
        assert!(hset.need_check_content_of_request());
        assert!(!hset.need_check_batchsize_of_request());

        let lpush = OpFlagChecker::REQ_KEY_FIELDS | OpFlagChecker::RESP_RETURN_ARRAYSIZE;
        assert!(lpush.need_check_batchsize_of_request());
        assert!(lpush.need_check_number_of_resp());
        assert!(!lpush.need_check_array_of_resp());

        assert!(OpFlagChecker::RESP_RETURN_SINGLE_VALUE.need_check_single_value_of_resp());
        assert!(OpFlagChecker::RESP_CHECK_ARRAY_LENGTH_BY_PAIR.need_check_array_of_resp());
        assert!(!OpFlagChecker::empty().need_check_array_of_resp());
    }

    #[test]
    fn bit_values_are_stable() {
        assert_eq!(OpFlag::WRITE.bits(), 1);
        assert_eq!(OpFlag::SLOW.bits(), 32);
        assert_eq!(OpFlagChecker::RESP_RETURN_VALUESIZE.bits(), 128);
        assert_eq!(OpFlagChecker::RESP_CHECK_ARRAY_LENGTH_BY_PAIR.bits(), 4096);
    }

    #[test]
    fn triage_sides() {
        assert_eq!(Triage::Quick.opposite(), Triage::Slow);
        assert_eq!(Triage::Slow.flag(), OpFlag::SLOW);
        assert_eq!(Triage::Quick.to_string(), "FlagQuick");
    }
}
