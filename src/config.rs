use anyhow::{Context, Result, bail};

use crate::flags::Triage;
use crate::monitor::SizeLimits;
use crate::registry::Registry;
use crate::render::MAX_SUFFIX_LEN;

/// Smallest buffer that always holds the whole truncation summary.
pub const MIN_RENDER_CAPACITY: usize = MAX_SUFFIX_LEN;

#[derive(Clone, Debug)]
pub struct Config {
    /// Comma separated commands tagged Quick at startup.
    pub quick_cmd_list: String,
    /// Comma separated commands tagged Slow at startup.
    pub slow_cmd_list: String,
    pub limits: SizeLimits,
    /// Buffer size used when an oversized command is logged.
    pub render_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quick_cmd_list: String::new(),
            slow_cmd_list: String::new(),
            limits: SizeLimits::default(),
            render_capacity: 256,
        }
    }
}

impl Config {
    pub fn ensure_valid(&self) -> Result<()> {
        if self.render_capacity < MIN_RENDER_CAPACITY {
            bail!(
                "render capacity {} is below the minimum of {MIN_RENDER_CAPACITY} bytes",
                self.render_capacity
            );
        }
        let quick = split_cmd_list(&self.quick_cmd_list);
        for name in split_cmd_list(&self.slow_cmd_list) {
            if quick.contains(&name) {
                bail!("cmd[{name}] is listed as both quick and slow");
            }
        }
        Ok(())
    }

    /// Install the configured Quick/Slow tags on `registry`.
    pub fn apply(&self, registry: &Registry) -> Result<()> {
        registry
            .reclassify(&self.quick_cmd_list, Triage::Quick)
            .with_context(|| format!("Invalid quick_cmd_list: '{}'", self.quick_cmd_list))?;
        registry
            .reclassify(&self.slow_cmd_list, Triage::Slow)
            .with_context(|| format!("Invalid slow_cmd_list: '{}'", self.slow_cmd_list))?;
        Ok(())
    }
}

fn split_cmd_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_ascii_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_command_lossy;
    use bytes::Bytes;

    #[test]
    fn defaults_are_valid() {
        let cfg = Config::default();
        assert!(cfg.ensure_valid().is_ok());
        let registry = Registry::new();
        cfg.apply(&registry).unwrap();
        assert!(registry.triaged_lines().is_empty());
    }

    #[test]
    fn overlapping_lists() {
        let cfg = Config {
            quick_cmd_list: "get,set".into(),
            slow_cmd_list: "HGETALL, Get".into(),
            ..Config::default()
        };
        let err = cfg.ensure_valid().unwrap_err();
        assert!(err.to_string().contains("GET"));
    }

    #[test]
    fn tiny_render_buffer() {
        let cfg = Config {
            render_capacity: 8,
            ..Config::default()
        };
        assert!(cfg.ensure_valid().is_err());
    }

    #[test]
    fn minimum_capacity_keeps_the_summary() {
        let cfg = Config {
            render_capacity: MIN_RENDER_CAPACITY,
            ..Config::default()
        };
        assert!(cfg.ensure_valid().is_ok());

        let arg = Bytes::from(vec![b'x'; 1000]);
        let mut cmd = vec![Bytes::from_static(b"MSET")];
        cmd.extend(std::iter::repeat_n(arg, 99_999));
        let out = render_command_lossy(&cmd, cfg.render_capacity);
        assert!(out.ends_with("... 100000 elements 99999004 bytes."), "{out}");
    }

    #[test]
    fn apply_tags_both_sides() {
        let cfg = Config {
            quick_cmd_list: "get,set".into(),
            slow_cmd_list: "hgetall".into(),
            ..Config::default()
        };
        let registry = Registry::new();
        cfg.apply(&registry).unwrap();
        assert_eq!(
            registry.triaged_lines(),
            vec![
                "GET : Flag[16], FlagQuick",
                "HGETALL : Flag[32], FlagSlow",
                "SET : Flag[17], FlagQuick",
            ]
        );
    }

    #[test]
    fn apply_reports_unknown() {
        let cfg = Config {
            slow_cmd_list: "nope".into(),
            ..Config::default()
        };
        let registry = Registry::new();
        let err = cfg.apply(&registry).unwrap_err();
        assert!(format!("{err:#}").contains("can not find [NOPE] command."));
    }
}
