use std::borrow::Cow;
use std::collections::HashMap;

use bytes::Bytes;
use parking_lot::RwLock;

use crate::casefold::{MAX_OPCODE_LEN, fold_opcode};
use crate::check::CustomCheck;
use crate::command::Resp2Frame;
use crate::error::{ClassifyError, ReclassifyError};
use crate::flags::{OpFlag, OpFlagChecker, Triage};
use crate::table::{OpInfo, builtin_ops};

/// Result of classifying one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Canonical upper-case name. Borrowed from the table for known commands.
    pub name: Cow<'static, str>,
    pub flag: OpFlag,
    pub monitor: OpFlagChecker,
    pub check: Option<CustomCheck>,
}

impl Classification {
    /// Commands outside the table may write, but are still forwarded.
    fn unknown(name: String) -> Self {
        Self {
            name: Cow::Owned(name),
            flag: OpFlag::MAY_WRITE,
            monitor: OpFlagChecker::empty(),
            check: None,
        }
    }

    fn known(info: &OpInfo, triage: Option<Triage>) -> Self {
        let mut flag = info.flag;
        if let Some(t) = triage {
            flag |= t.flag();
        }
        Self {
            name: Cow::Borrowed(info.name),
            flag,
            monitor: info.monitor,
            check: info.check,
        }
    }
}

#[derive(Debug)]
pub struct Registry {
    ops: HashMap<&'static str, OpInfo>,
    // Quick/Slow tag per command; absent means untagged. A single lock keeps
    // one reclassification all-or-nothing for readers.
    triage: RwLock<HashMap<&'static str, Triage>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Registry seeded with every built-in command.
    pub fn new() -> Self {
        Self::with_ops(builtin_ops())
    }

    pub fn with_ops(ops: impl IntoIterator<Item = OpInfo>) -> Self {
        let ops = ops
            .into_iter()
            .map(|info| (info.name, info))
            .collect::<HashMap<_, _>>();
        Self {
            ops,
            triage: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate over the immutable built-in records.
    pub fn ops(&self) -> impl Iterator<Item = &OpInfo> {
        self.ops.values()
    }

    /// Classify a parsed command whose first element is the opcode.
    pub fn classify(&self, multi: &[Bytes]) -> Result<Classification, ClassifyError> {
        let Some(op) = multi.first() else {
            return Err(ClassifyError::EmptyCommand);
        };
        if op.is_empty() || op.len() > MAX_OPCODE_LEN {
            return Err(ClassifyError::BadOpcodeLength(op.len()));
        }

        let mut upper = [0u8; MAX_OPCODE_LEN];
        if let Some(name) = fold_opcode(op, &mut upper) {
            return Ok(self
                .lookup(name)
                .unwrap_or_else(|| Classification::unknown(name.to_string())));
        }

        let name = String::from_utf8_lossy(op).to_uppercase();
        Ok(self
            .lookup(&name)
            .unwrap_or_else(|| Classification::unknown(name)))
    }

    fn lookup(&self, name: &str) -> Option<Classification> {
        let info = self.ops.get(name)?;
        let triage = self.triage.read().get(info.name).copied();
        Some(Classification::known(info, triage))
    }

    /// Replace the set of commands tagged `target` with `cmdlist`.
    ///
    /// `cmdlist` is comma separated and case-insensitive; an empty string clears
    /// the tag everywhere. Every name is validated before anything changes, so
    /// a failed call leaves the registry untouched.
    pub fn reclassify(&self, cmdlist: &str, target: Triage) -> Result<(), ReclassifyError> {
        let mut triage = self.triage.write();

        let mut tagged = Vec::new();
        if !cmdlist.is_empty() {
            for raw in cmdlist.split(',') {
                let name = raw.trim().to_ascii_uppercase();
                let Some(info) = self.ops.get(name.as_str()) else {
                    tracing::warn!(cmd = %name, "can not find command");
                    return Err(ReclassifyError::UnknownCommand(name));
                };
                let existing = target.opposite();
                if triage.get(info.name) == Some(&existing) {
                    tracing::warn!(cmd = %name, flag = %existing, "conflicting triage flag");
                    return Err(ReclassifyError::ConflictingFlag {
                        name,
                        flag: existing,
                    });
                }
                tagged.push(info);
            }
        }

        let tagged_before = triage.len();
        triage.retain(|_, t| *t != target);
        tracing::info!(
            flag = %target,
            cleared = tagged_before - triage.len(),
            "reset triage flag"
        );

        for info in tagged {
            let before = Classification::known(info, triage.get(info.name).copied()).flag;
            triage.insert(info.name, target);
            tracing::info!(
                cmd = %info.name,
                before = before.bits(),
                after = (before | target.flag()).bits(),
                "set triage flag"
            );
        }
        Ok(())
    }

    /// One line per Quick/Slow tagged command, sorted by name.
    pub fn triaged_lines(&self) -> Vec<String> {
        let triage = self.triage.read();
        let mut lines = triage
            .iter()
            .filter_map(|(name, t)| self.ops.get(name).map(|info| (info, *t)))
            .map(|(info, t)| {
                let flag = Classification::known(info, Some(t)).flag;
                let mut line = format!("{} : Flag[{}]", info.name, flag.bits());
                if flag.is_quick() {
                    line.push_str(", FlagQuick");
                }
                if flag.is_slow() {
                    line.push_str(", FlagSlow");
                }
                line
            })
            .collect::<Vec<_>>();
        lines.sort();
        lines
    }

    /// [`Self::triaged_lines`] as an array reply.
    pub fn list_triaged(&self) -> Resp2Frame {
        Resp2Frame::Array(
            self.triaged_lines()
                .into_iter()
                .map(|line| Resp2Frame::BulkString(Bytes::from(line)))
                .collect(),
        )
    }
}
