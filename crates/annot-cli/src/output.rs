use std::time::Duration;

use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a serializable response for stdout. `Text` renders nothing.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<Option<String>> {
    match format {
        OutputFormat::Text => Ok(None),
        OutputFormat::Json => Ok(Some(serde_json::to_string_pretty(value)?)),
        OutputFormat::Raw => Ok(Some(serde_json::to_string(value)?)),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    if let Some(rendered) = render(value, format)? {
        println!("{rendered}");
    }
    Ok(())
}

/// Elapsed time for the run banner, e.g. `1h 02m 03s` or `4.250s`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 60 {
        return format!("{}.{:03}s", secs, elapsed.subsec_millis());
    }
    let (hours, rem) = (secs / 3600, secs % 3600);
    let (mins, secs) = (rem / 60, rem % 60);
    if hours > 0 {
        format!("{hours}h {mins:02}m {secs:02}s")
    } else {
        format!("{mins}m {secs:02}s")
    }
}
