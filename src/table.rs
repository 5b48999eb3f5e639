use crate::check::CustomCheck;
use crate::flags::{OpFlag, OpFlagChecker};

/// Classification record of a built-in command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpInfo {
    /// Canonical, upper-case name.
    pub name: &'static str,
    pub flag: OpFlag,
    pub monitor: OpFlagChecker,
    pub check: Option<CustomCheck>,
}

fn op(
    name: &'static str,
    flag: OpFlag,
    monitor: OpFlagChecker,
    check: Option<CustomCheck>,
) -> OpInfo {
    OpInfo {
        name,
        flag,
        monitor,
        check,
    }
}

/// Build the full list of commands known to the proxy.
#[rustfmt::skip]
pub fn builtin_ops() -> Vec<OpInfo> {
    type C = OpFlagChecker;
    const E: OpFlag = OpFlag::empty();
    const W: OpFlag = OpFlag::WRITE;
    const M: OpFlag = OpFlag::MASTER_ONLY;
    const N: OpFlag = OpFlag::NOT_ALLOW;

    vec![
        op("APPEND", W, C::REQ_KEY_VALUES | C::RESP_RETURN_VALUESIZE, None),
        op("ASKING", N, C::empty(), None),
        op("AUTH", E, C::empty(), None),
        op("BGREWRITEAOF", N, C::empty(), None),
        op("BGSAVE", N, C::empty(), None),
        op("BITCOUNT", E, C::empty(), None),
        op("BITFIELD", W, C::empty(), None),
        op("BITOP", W | N, C::empty(), None),
        op("BITPOS", E, C::empty(), None),
        op("BLPOP", W | N, C::empty(), None),
        op("BRPOP", W | N, C::empty(), None),
        op("BRPOPLPUSH", W | N, C::empty(), None),
        op("CLIENT", N, C::empty(), None),
        op("CLUSTER", N, C::empty(), None),
        op("COMMAND", E, C::empty(), None),
        op("CONFIG", N, C::empty(), None),
        op("DBSIZE", N, C::empty(), None),
        op("DEBUG", N, C::empty(), None),
        op("DECR", W, C::empty(), None),
        op("DECRBY", W, C::empty(), None),
        op("DEL", W, C::REQ_KEYS, None),
        op("DISCARD", N, C::empty(), None),
        op("DUMP", E, C::empty(), None),
        op("ECHO", E, C::empty(), None),
        op("EVAL", N, C::empty(), None),
        op("EVALSHA", N, C::empty(), None),
        op("EXEC", N, C::empty(), None),
        op("EXISTS", E, C::empty(), None),
        op("EXPIRE", W, C::empty(), None),
        op("EXPIREAT", W, C::empty(), None),
        op("FLUSHALL", W | N, C::empty(), None),
        op("FLUSHDB", W | N, C::empty(), None),
        op("GEOADD", W, C::empty(), None),
        op("GEODIST", E, C::empty(), None),
        op("GEOHASH", E, C::empty(), None),
        op("GEOPOS", E, C::empty(), None),
        op("GEORADIUS", W, C::empty(), None),
        op("GEORADIUSBYMEMBER", W, C::empty(), None),
        op("GET", E, C::RESP_RETURN_SINGLE_VALUE, None),
        op("GETBIT", E, C::empty(), None),
        op("GETRANGE", E, C::empty(), None),
        op("GETSET", W, C::REQ_KEY_VALUES | C::RESP_RETURN_SINGLE_VALUE, None),
        op("HDEL", W, C::REQ_KEY_FIELDS, None),
        op("HEXISTS", E, C::empty(), None),
        op("HGET", E, C::empty(), Some(CustomCheck::HGet)),
        op("HGETALL", E, C::RESP_RETURN_ARRAY_BY_PAIR, None),
        op("HINCRBY", W, C::empty(), None),
        op("HINCRBYFLOAT", W, C::empty(), None),
        op("HKEYS", E, C::RESP_CHECK_ARRAY_LENGTH, None),
        op("HLEN", E, C::RESP_RETURN_ARRAYSIZE, None),
        op("HMGET", E, C::REQ_KEY_FIELDS | C::RESP_RETURN_ARRAY, None),
        op("HMSET", W, C::REQ_KEY_FIELD_VALUES, None),
        op("HOST:", N, C::empty(), None),
        op("HSCAN", M, C::empty(), None),
        op("HSET", W, C::REQ_KEY_FIELD_VALUES, None),
        op("HSETNX", W, C::REQ_KEY_FIELD_VALUES, None),
        op("HSTRLEN", E, C::empty(), None),
        op("HVALS", E, C::empty(), None),
        op("INCR", W, C::empty(), None),
        op("INCRBY", W, C::empty(), None),
        op("INCRBYFLOAT", W, C::empty(), None),
        op("INFO", E, C::empty(), None),
        op("KEYS", N, C::empty(), None),
        op("LASTSAVE", N, C::empty(), None),
        op("LATENCY", N, C::empty(), None),
        op("LINDEX", E, C::empty(), None),
        op("LINSERT", W, C::empty(), None),
        op("LLEN", E, C::RESP_RETURN_ARRAYSIZE, None),
        op("LPOP", W, C::empty(), None),
        op("LPUSH", W, C::REQ_KEY_FIELDS | C::RESP_RETURN_ARRAYSIZE, None),
        op("LPUSHX", W, C::REQ_KEY_FIELDS | C::RESP_RETURN_ARRAYSIZE, None),
        op("LRANGE", E, C::RESP_CHECK_ARRAY_LENGTH, Some(CustomCheck::LRange)),
        op("LREM", W, C::RESP_RETURN_ARRAYSIZE, None),
        op("LSET", W, C::empty(), None),
        op("LTRIM", W, C::empty(), None),
        op("MGET", E, C::REQ_KEYS, Some(CustomCheck::MGet)),
        op("MIGRATE", W | N, C::empty(), None),
        op("MONITOR", N, C::empty(), None),
        op("MOVE", W | N, C::empty(), None),
        op("MSET", W, C::REQ_KEY_VALUES, None),
        op("MSETNX", W | N, C::REQ_KEY_VALUES, None),
        op("MULTI", N, C::empty(), None),
        op("OBJECT", N, C::empty(), None),
        op("PERSIST", W, C::empty(), None),
        op("PEXPIRE", W, C::empty(), None),
        op("PEXPIREAT", W, C::empty(), None),
        op("PFADD", W, C::empty(), None),
        op("PFCOUNT", E, C::empty(), None),
        op("PFDEBUG", W, C::empty(), None),
        op("PFMERGE", N, C::empty(), None),
        op("PFSELFTEST", E, C::empty(), None),
        op("PING", E, C::empty(), None),
        op("POST", N, C::empty(), None),
        op("PSETEX", W, C::REQ_KEY_TTL_VALUE, None),
        op("PSUBSCRIBE", N, C::empty(), None),
        op("PSYNC", N, C::empty(), None),
        op("PTTL", E, C::empty(), None),
        op("PUBLISH", N, C::empty(), None),
        op("PUBSUB", E, C::empty(), None),
        op("PUNSUBSCRIBE", N, C::empty(), None),
        op("QUIT", E, C::empty(), None),
        op("RANDOMKEY", N, C::empty(), None),
        op("READONLY", N, C::empty(), None),
        op("READWRITE", N, C::empty(), None),
        op("RENAME", W | N, C::empty(), None),
        op("RENAMENX", W | N, C::empty(), None),
        op("REPLCONF", N, C::empty(), None),
        op("RESTORE", W | N, C::empty(), None),
        op("RESTORE-ASKING", W | N, C::empty(), None),
        op("ROLE", E, C::empty(), None),
        op("RPOP", W, C::empty(), None),
        op("RPOPLPUSH", N, C::empty(), None),
        op("RPUSH", W, C::REQ_KEY_FIELDS | C::RESP_RETURN_ARRAYSIZE, None),
        op("RPUSHX", W, C::REQ_KEY_FIELDS | C::RESP_RETURN_ARRAYSIZE, None),
        op("SADD", W, C::REQ_KEY_FIELDS, None),
        op("SAVE", N, C::empty(), None),
        op("SCAN", M | N, C::empty(), None),
        op("SCARD", E, C::RESP_RETURN_ARRAYSIZE, None),
        op("SCRIPT", N, C::empty(), None),
        op("SDIFF", N, C::REQ_KEYS, Some(CustomCheck::SDiff)),
        op("SDIFFSTORE", W, C::empty(), None),
        op("SELECT", E, C::empty(), None),
        op("SET", W, C::empty(), Some(CustomCheck::Set)),
        op("SETBIT", W, C::empty(), None),
        op("SETEX", W, C::REQ_KEY_TTL_VALUE, None),
        op("SETNX", W, C::REQ_KEY_VALUES, None),
        op("SETRANGE", W, C::REQ_KEY_FIELD_VALUES | C::RESP_RETURN_VALUESIZE, None),
        op("SHUTDOWN", N, C::empty(), None),
        op("SINTER", N, C::REQ_KEYS, None),
        op("SINTERSTORE", N, C::REQ_KEYS, None),
        op("SISMEMBER", E, C::empty(), None),
        op("SLAVEOF", N, C::empty(), None),
        op("SLOTSCHECK", N, C::empty(), None),
        op("SLOTSDEL", W | N, C::empty(), None),
        op("SLOTSHASHKEY", E, C::empty(), None),
        op("SLOTSINFO", M, C::empty(), None),
        op("SLOTSMAPPING", E, C::empty(), None),
        op("SLOTSMGRTONE", W | N, C::empty(), None),
        op("SLOTSMGRTSLOT", W | N, C::empty(), None),
        op("SLOTSMGRTTAGONE", W | N, C::empty(), None),
        op("SLOTSMGRTTAGSLOT", W | N, C::empty(), None),
        op("SLOTSRESTORE", W, C::empty(), None),
        op("SLOTSMGRTONE-ASYNC", W | N, C::empty(), None),
        op("SLOTSMGRTSLOT-ASYNC", W | N, C::empty(), None),
        op("SLOTSMGRTTAGONE-ASYNC", W | N, C::empty(), None),
        op("SLOTSMGRTTAGSLOT-ASYNC", W | N, C::empty(), None),
        op("SLOTSMGRT-ASYNC-FENCE", N, C::empty(), None),
        op("SLOTSMGRT-ASYNC-CANCEL", N, C::empty(), None),
        op("SLOTSMGRT-ASYNC-STATUS", N, C::empty(), None),
        op("SLOTSMGRT-EXEC-WRAPPER", W | N, C::empty(), None),
        op("SLOTSRESTORE-ASYNC", W | N, C::empty(), None),
        op("SLOTSRESTORE-ASYNC-AUTH", W | N, C::empty(), None),
        op("SLOTSRESTORE-ASYNC-ACK", W | N, C::empty(), None),
        op("SLOTSSCAN", M, C::empty(), None),
        op("SLOWLOG", N, C::empty(), None),
        op("SMEMBERS", E, C::RESP_CHECK_ARRAY_LENGTH, None),
        op("SMOVE", N, C::empty(), None),
        op("SORT", W, C::empty(), None),
        op("SPOP", W, C::RESP_CHECK_ARRAY_LENGTH, Some(CustomCheck::SPop)),
        op("SRANDMEMBER", E, C::RESP_CHECK_ARRAY_LENGTH, Some(CustomCheck::SRandMember)),
        op("SREM", W, C::REQ_KEY_FIELDS, None),
        op("SSCAN", M, C::empty(), None),
        op("STRLEN", E, C::RESP_RETURN_VALUESIZE, None),
        op("SUBSCRIBE", N, C::empty(), None),
        op("SUBSTR", E, C::empty(), None),
        op("SUNION", N, C::REQ_KEYS, None),
        op("SUNIONSTORE", N, C::REQ_KEYS, None),
        op("SYNC", N, C::empty(), None),
        op("PCONFIG", E, C::empty(), None),
        op("TIME", N, C::empty(), None),
        op("TOUCH", W, C::empty(), None),
        op("TTL", E, C::empty(), None),
        op("TYPE", E, C::empty(), None),
        op("UNSUBSCRIBE", N, C::empty(), None),
        op("UNWATCH", N, C::empty(), None),
        op("WAIT", N, C::empty(), None),
        op("WATCH", N, C::empty(), None),
        op("XSLOWLOG", E, C::empty(), None),
        op("XMONITOR", E, C::empty(), None),
        op("XCONFIG", E, C::empty(), None),
        op("ZADD", W, C::empty(), None),
        op("ZCARD", E, C::RESP_RETURN_ARRAYSIZE, None),
        op("ZCOUNT", E, C::empty(), None),
        op("ZINCRBY", W, C::empty(), None),
        op("ZINTERSTORE", N, C::empty(), None),
        op("ZLEXCOUNT", E, C::empty(), None),
        op("ZRANGE", E, C::empty(), Some(CustomCheck::ZRange)),
        op("ZRANGEBYLEX", E, C::empty(), None),
        op("ZRANGEBYSCORE", E, C::empty(), None),
        op("ZRANK", E, C::empty(), None),
        op("ZREM", W, C::REQ_KEY_FIELDS, None),
        op("ZREMRANGEBYLEX", W, C::empty(), None),
        op("ZREMRANGEBYRANK", W, C::empty(), None),
        op("ZREMRANGEBYSCORE", W, C::empty(), None),
        op("ZREVRANGE", E, C::empty(), None),
        op("ZREVRANGEBYLEX", E, C::empty(), None),
        op("ZREVRANGEBYSCORE", E, C::empty(), None),
        op("ZREVRANK", E, C::empty(), None),
        op("ZSCAN", M, C::empty(), None),
        op("ZSCORE", E, C::empty(), None),
        op("ZUNIONSTORE", N, C::empty(), None),
    ]
}
