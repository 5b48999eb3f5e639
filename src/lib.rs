//! Command classification and routing metadata for a sharding Redis proxy.
//!
//! ```
//! use bytes::Bytes;
//! use redis_opclass::{Registry, Triage, routing};
//!
//! let registry = Registry::new();
//! let cmd = vec![Bytes::from_static(b"hset"), Bytes::from_static(b"{u1}.h")];
//! let class = registry.classify(&cmd).unwrap();
//! assert_eq!(class.name, "HSET");
//! assert!(class.flag.is_master_only());
//! assert_eq!(routing::routing_hash(&cmd, &class.name), Some(routing::hash(b"u1")));
//!
//! registry.reclassify("get,set", Triage::Quick).unwrap();
//! ```

pub mod casefold;
pub mod check;
pub mod command;
pub mod config;
pub mod error;
pub mod flags;
pub mod monitor;
pub mod registry;
pub mod render;
pub mod routing;
pub mod stats;
pub mod table;

pub use check::CustomCheck;
pub use config::Config;
pub use error::{ClassifyError, ReclassifyError};
pub use flags::{OpFlag, OpFlagChecker, Triage};
pub use monitor::{Request, SizeLimits, Violation, ViolationKind};
pub use registry::{Classification, Registry};
pub use stats::Stats;
pub use table::OpInfo;
