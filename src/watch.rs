use std::{path::Path, sync::mpsc::channel, time::Duration};

use anyhow::Context;
use notify_debouncer_mini::{new_debouncer_opt, notify::*, DebounceEventResult, DebouncedEventKind};

const DEBOUNCE_TIMEOUT: Duration = Duration::from_millis(250);

/// Calls `on_change` every time `file` is written, until the process is
/// stopped. Failures inside `on_change` are logged and watching continues.
pub fn watch_file<F>(file: &Path, mut on_change: F) -> anyhow::Result<()>
where
    F: FnMut() -> anyhow::Result<()>,
{
    let file_name = file
        .file_name()
        .with_context(|| format!("{} is not a file path", file.display()))?
        .to_owned();

    // Editors often replace the file instead of writing it, so watch the folder
    let folder = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let absolute_folder = folder
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", folder.display()))?;

    let (send_events, recv_events) = channel::<DebounceEventResult>();
    let mut debouncer = new_debouncer_opt::<_, RecommendedWatcher>(
        notify_debouncer_mini::Config::default().with_timeout(DEBOUNCE_TIMEOUT),
        send_events,
    )
    .context("Failed to create file watcher")?;

    debouncer
        .watcher()
        .watch(&absolute_folder, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", absolute_folder.display()))?;

    log::info!("Watching {} for changes", file.display());

    for result in recv_events {
        match result {
            Ok(events) => {
                let changed = events.iter().any(|event| {
                    event.path.file_name() == Some(file_name.as_os_str())
                        && event.kind == DebouncedEventKind::Any
                });

                if changed {
                    log::info!("{} changed, exporting", file.display());
                    if let Err(e) = on_change() {
                        log::error!("Export failed: {:#}", e);
                    }
                }
            }
            Err(e) => log::error!("Error watching {}: {:?}", file.display(), e),
        }
    }

    Ok(())
}
