use std::io::Read;

use anyhow::Context;
use bytes::{Bytes, BytesMut};
use clap::Parser;
use redis_opclass::command::next_multi;
use redis_opclass::monitor::{self, SizeLimits};
use redis_opclass::{Config, Registry, Request, Stats, routing};

#[derive(Parser, Debug)]
#[command(
    name = "redis-opclass",
    version,
    about = "Classify Redis commands the way the sharding proxy does"
)]
struct Args {
    /// Command to classify, e.g. `hset {user1}.h f v`. Reads RESP2 requests from stdin when omitted.
    command: Vec<String>,

    /// Comma separated commands tagged quick, e.g. GET,SET
    #[arg(long, default_value = "")]
    quick_cmd_list: String,

    /// Comma separated commands tagged slow.
    #[arg(long, default_value = "")]
    slow_cmd_list: String,

    /// Most keys/members a request or reply may carry (0 disables).
    #[arg(long, default_value_t = SizeLimits::default().max_batch_size)]
    max_batch_size: usize,

    /// Largest single value in bytes (0 disables).
    #[arg(long, default_value_t = SizeLimits::default().max_value_size)]
    max_value_size: usize,

    /// Bytes of an oversized command kept in log lines.
    #[arg(long, default_value_t = 256)]
    render_capacity: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let cfg = Config {
        quick_cmd_list: args.quick_cmd_list,
        slow_cmd_list: args.slow_cmd_list,
        limits: SizeLimits {
            max_batch_size: args.max_batch_size,
            max_value_size: args.max_value_size,
        },
        render_capacity: args.render_capacity,
    };
    cfg.ensure_valid()?;

    let registry = Registry::new();
    cfg.apply(&registry)?;
    tracing::info!(commands = registry.len(), "registry loaded");

    let stats = Stats::new();

    if args.command.is_empty() {
        let mut input = Vec::new();
        std::io::stdin()
            .read_to_end(&mut input)
            .context("Failed to read requests from stdin")?;
        let mut buf = BytesMut::from(&input[..]);
        while let Some(multi) = next_multi(&mut buf)? {
            inspect(&registry, &cfg, &stats, &multi);
        }
        if !buf.is_empty() {
            tracing::warn!(remaining = buf.len(), "trailing incomplete request");
        }
    } else {
        let multi: Vec<Bytes> = args.command.into_iter().map(Bytes::from).collect();
        inspect(&registry, &cfg, &stats, &multi);
    }

    println!("-- triaged commands");
    for line in registry.triaged_lines() {
        println!("{line}");
    }
    println!("-- stats");
    for line in stats.render_summary_lines() {
        println!("{line}");
    }

    Ok(())
}

fn inspect(registry: &Registry, cfg: &Config, stats: &Stats, multi: &[Bytes]) {
    let class = match registry.classify(multi) {
        Ok(c) => c,
        Err(e) => {
            println!("-ERR {e}");
            return;
        }
    };
    stats.record_call(&class.name);

    let hash = match routing::routing_hash(multi, &class.name) {
        Some(h) => format!("{h:#010x}"),
        None => "-".to_string(),
    };
    println!(
        "{:<16} flag={:<3} readonly={} masteronly={} notallow={} quick={} slow={} hash={}",
        class.name,
        class.flag.bits(),
        class.flag.is_read_only(),
        class.flag.is_master_only(),
        class.flag.is_not_allowed(),
        class.flag.is_quick(),
        class.flag.is_slow(),
        hash,
    );

    if class.flag.is_not_allowed() {
        stats.record_rejected(&class.name);
        return;
    }

    let mut req = Request::new(multi, cfg.limits);
    monitor::check_request(&class, &mut req);
    req.report(&class.name, cfg.render_capacity);
    stats.record_violations(&class.name, req.violations().len());
    for v in req.violations() {
        println!("  {} {} > {}", v.kind, v.actual, v.limit);
    }
}
