use dashmap::DashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpStats {
    pub calls: u64,
    /// Refused because the command is not allowed through the proxy.
    pub rejected: u64,
    /// Size violations found by the monitor.
    pub violations: u64,
}

/// Process-wide per-command counters, keyed by canonical name.
#[derive(Debug, Default)]
pub struct Stats {
    by_op: DashMap<String, OpStats>,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_call(&self, opstr: &str) {
        let mut entry = self.by_op.entry(opstr.to_string()).or_default();
        entry.calls = entry.calls.saturating_add(1);
    }

    pub fn record_rejected(&self, opstr: &str) {
        let mut entry = self.by_op.entry(opstr.to_string()).or_default();
        entry.rejected = entry.rejected.saturating_add(1);
    }

    pub fn record_violations(&self, opstr: &str, n: usize) {
        if n == 0 {
            return;
        }
        let mut entry = self.by_op.entry(opstr.to_string()).or_default();
        entry.violations = entry.violations.saturating_add(n as u64);
    }

    pub fn get(&self, opstr: &str) -> Option<OpStats> {
        self.by_op.get(opstr).map(|e| *e.value())
    }

    /// Render summary lines similar to:
    ///
    /// ```text
    /// GET              8056 calls
    /// KEYS             3 calls (rejected 3)
    /// ```
    pub fn render_summary_lines(&self) -> Vec<String> {
        let mut rows: Vec<(String, OpStats)> = self
            .by_op
            .iter()
            .map(|e| (e.key().clone(), *e.value()))
            .collect();

        rows.sort_by(|a, b| b.1.calls.cmp(&a.1.calls).then_with(|| a.0.cmp(&b.0)));

        let mut out = Vec::with_capacity(rows.len());
        for (opstr, stats) in rows {
            let mut line = format!("{:<16} {} calls", opstr, stats.calls);
            if stats.rejected > 0 {
                line.push_str(&format!(" (rejected {})", stats.rejected));
            }
            if stats.violations > 0 {
                line.push_str(&format!(" (oversized {})", stats.violations));
            }
            out.push(line);
        }

        out
    }
}
