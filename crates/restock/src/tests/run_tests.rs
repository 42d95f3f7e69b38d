use super::helpers::*;
use crate::*;
use anyhow::Result;
use config::Config;
use std::path::Path;
use tempfile::tempdir;

#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl Progress for Recorder {
    fn loaded(&mut self, report: &LoadReport) {
        self.events.push(format!("loaded {}", report.loaded));
    }
    fn inventory_size(&mut self, size: usize) {
        self.events.push(format!("size {}", size));
    }
    fn merged(&mut self, stats: &MergeStats) {
        self.events
            .push(format!("merged {} {}", stats.updated, stats.added));
    }
    fn written(&mut self, _path: &Path, records: usize) {
        self.events.push(format!("written {}", records));
    }
}

fn paths(dir: &Path) -> RunPaths {
    RunPaths {
        inventory: dir.join("inventory.txt"),
        shipment: dir.join("shipment.txt"),
        output: dir.join("output.txt"),
    }
}

#[test]
fn full_run_go_deep() -> Result<()> {
    let dir = tempdir()?;
    let p = paths(dir.path());
    std::fs::write(
        &p.inventory,
        file_text(&[("1111111111111", "Go Deep", "A. Uthor", 200, "9.99", 5)]),
    )?;
    std::fs::write(
        &p.shipment,
        file_text(&[
            ("1111111111111", "Go Deep", "A. Uthor", 200, "9.99", 3),
            ("2222222222222", "New Title", "B. Writer", 100, "5.00", 10),
        ]),
    )?;

    let mut rec = Recorder::default();
    let summary = run(&p, &Config::default(), &mut rec)?;

    assert_eq!(
        summary,
        RunSummary {
            loaded: 1,
            skipped: 0,
            size_before: 1,
            size_after: 2,
            merge: Some(MergeStats {
                updated: 1,
                added: 1,
                skipped: 0
            }),
            written: Some(2),
        }
    );
    assert_eq!(
        rec.events,
        vec!["loaded 1", "size 1", "merged 1 1", "size 2", "written 2"]
    );

    let text = std::fs::read_to_string(&p.output)?;
    assert_eq!(
        text,
        "1111111111111  Go Deep\nA. Uthor\n200  9.99  8\n\
         2222222222222  New Title\nB. Writer\n100  5.00  10\n"
    );
    Ok(())
}

#[test]
fn no_valid_inventory_skips_merge_and_write() -> Result<()> {
    let dir = tempdir()?;
    let p = paths(dir.path());
    std::fs::write(
        &p.inventory,
        file_text(&[("123", "Short", "A", 1, "1.00", 1)]),
    )?;
    // shipment deliberately absent: it must not be read

    let summary = run(&p, &Config::default(), &mut ())?;
    assert_eq!(summary.loaded, 0);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.merge, None);
    assert_eq!(summary.written, None);
    assert!(!p.output.exists());
    Ok(())
}

#[test]
fn shipment_failure_leaves_output_untouched() -> Result<()> {
    let dir = tempdir()?;
    let p = paths(dir.path());
    std::fs::write(
        &p.inventory,
        file_text(&[("1111111111111", "T", "A", 1, "1.00", 1)]),
    )?;
    std::fs::write(&p.shipment, "1111111111111 T\nA\nnot numbers here\n")?;

    let err = run(&p, &Config::default(), &mut ()).unwrap_err();
    assert_eq!(err.exit_code(), exit_code::SHIPMENT_MALFORMED);
    assert!(!p.output.exists());
    Ok(())
}

#[test]
fn output_can_feed_the_next_run() -> Result<()> {
    let dir = tempdir()?;
    let p = paths(dir.path());
    std::fs::write(
        &p.inventory,
        file_text(&[("5555555555555", "Mid", "M", 5, "5.55", 5)]),
    )?;
    std::fs::write(
        &p.shipment,
        file_text(&[("1111111111111", "Low", "L", 1, "1.11", 1)]),
    )?;
    run(&p, &Config::default(), &mut ())?;

    // yesterday's output is today's inventory
    let next = RunPaths {
        inventory: p.output.clone(),
        shipment: p.shipment.clone(),
        output: dir.path().join("day2.txt"),
    };
    let summary = run(&next, &Config::default(), &mut ())?;
    assert_eq!(summary.loaded, 2);
    assert_eq!(summary.merge.unwrap().updated, 1);
    assert_eq!(summary.size_after, 2);

    let report = load_inventory(&next.output)?;
    assert_eq!(report.catalog.find("1111111111111").unwrap().stock(), 2);
    Ok(())
}
