//! Human readable status report text

use std::io::{self, Write};

const RULE_WIDTH: usize = 60;

/// Retry policy of the ticket-creating function, shown when JIRA is down
pub const RETRY_INITIAL_SECS: u64 = 10;
pub const RETRY_MAX_BACKOFF_SECS: u64 = 600;
pub const MESSAGE_RETENTION_DAYS: u64 = 7;

pub(crate) fn rule<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

pub(crate) fn header<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    rule(out)?;
    writeln!(out, "JIRA Service Status Check")?;
    rule(out)?;
    writeln!(out)
}

pub(crate) fn online_and_valid<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    rule(out)?;
    writeln!(out, "✅ JIRA is ONLINE and credentials are VALID")?;
    rule(out)?;
    writeln!(out)?;
    writeln!(out, "🎯 Next Steps:")?;
    writeln!(out, "   1. Queued alert messages will be processed automatically")?;
    writeln!(out, "   2. Or publish new alerts to trigger ticket creation")?;
    writeln!(out, "   3. Check the ticket processor logs for execution details")?;
    writeln!(out)
}

pub(crate) fn online_but_invalid<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    rule(out)?;
    writeln!(out, "⚠️  JIRA is online but credentials failed")?;
    rule(out)
}

pub(crate) fn unavailable<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    rule(out)?;
    writeln!(out, "❌ JIRA SERVICE IS CURRENTLY UNAVAILABLE")?;
    rule(out)?;
    writeln!(out)?;
    writeln!(out, "ℹ️  What this means:")?;
    writeln!(out, "   • JIRA tickets cannot be created right now")?;
    writeln!(out, "   • Failed messages are retried automatically")?;
    writeln!(out, "   • Messages will be retried with exponential backoff")?;
    writeln!(out, "   • Once JIRA is back, tickets will be created automatically")?;
    writeln!(out)?;
    writeln!(out, "🔄 Retry Policy:")?;
    writeln!(out, "   • Initial retry: {} seconds", RETRY_INITIAL_SECS)?;
    writeln!(
        out,
        "   • Maximum backoff: {} seconds ({} minutes)",
        RETRY_MAX_BACKOFF_SECS,
        RETRY_MAX_BACKOFF_SECS / 60
    )?;
    writeln!(out, "   • Message retention: {} days", MESSAGE_RETENTION_DAYS)?;
    writeln!(out)?;
    writeln!(out, "👀 Monitor JIRA status:")?;
    writeln!(out, "   Run this check again: addnums jira-status")?;
    writeln!(out)
}

/// First `max` characters of `text`
pub(crate) fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
