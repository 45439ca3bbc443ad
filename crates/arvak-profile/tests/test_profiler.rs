//! Tests for profiling sessions.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::thread;

use arvak_profile::export::{ExportConfig, append_ledger, read_ledger_file, to_json};
use arvak_profile::{ProfileReport, Profiler, ProfilerConfig, RecordStatus};

#[derive(Debug, PartialEq)]
struct ConfigDefect(&'static str);

// ---------------------------------------------------------------------------
// Failure paths
// ---------------------------------------------------------------------------

#[test]
fn failing_computation_leaves_one_failed_record() {
    let profiler = Profiler::new(ProfilerConfig::new("failures"));

    let result: Result<u32, ConfigDefect> =
        profiler.try_instrumented("construct", || Err(ConfigDefect("El must be positive")));

    assert_eq!(result, Err(ConfigDefect("El must be positive")));
    let records = profiler.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].scope, "construct");
    assert_eq!(records[0].status, RecordStatus::Failed);
}

#[test]
fn early_return_through_question_mark_finalizes_scope() {
    fn run(profiler: &Profiler) -> Result<u32, ConfigDefect> {
        let mut guard = profiler.scope("pipeline");
        let step: Result<u32, ConfigDefect> = Err(ConfigDefect("step"));
        let value = step.inspect_err(|_| guard.fail())?;
        Ok(value)
    }

    let profiler = Profiler::default();
    assert!(run(&profiler).is_err());
    let records = profiler.records();
    assert_eq!(records.len(), 1);
    assert!(records[0].failed());
}

#[test]
fn panic_inside_scope_is_recorded_and_propagated() {
    let profiler = Profiler::default();
    let handle = profiler.clone();

    let outcome = catch_unwind(AssertUnwindSafe(move || {
        handle.instrumented("explodes", || -> u32 { panic!("boom") })
    }));

    assert!(outcome.is_err());
    let records = profiler.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, RecordStatus::Failed);
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn concurrent_appends_lose_no_records() {
    let profiler = Profiler::new(ProfilerConfig::new("threads").with_events(false));
    let threads = 8;
    let per_thread = 250;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let p = profiler.clone();
            thread::spawn(move || {
                for i in 0..per_thread {
                    let scope = p.scope(format!("worker{t}"));
                    scope.instrumented("step", || i * 2);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(profiler.len(), threads * per_thread * 2);
    let report = profiler.report();
    for t in 0..threads {
        assert_eq!(
            report.scope(&format!("worker{t}")).unwrap().call_count,
            per_thread as u64
        );
        assert_eq!(
            report.scope(&format!("worker{t}/step")).unwrap().call_count,
            per_thread as u64
        );
    }
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

#[test]
fn report_survives_json_roundtrip() {
    let profiler = Profiler::new(ProfilerConfig::new("export"));
    {
        let outer = profiler.scope("hamiltonian");
        outer.instrumented("linear", || ());
    }

    let report = profiler.report();
    let json = to_json(&report, &ExportConfig::default()).unwrap();
    let back: ProfileReport = serde_json::from_str(&json).unwrap();

    assert_eq!(back.session, "export");
    assert_eq!(back.total_records, 2);
    assert_eq!(back.scopes, report.scopes);
}

#[test]
fn instrumentation_does_not_change_results() {
    let profiler = Profiler::default();
    let plain: Vec<f64> = (0..16).map(|k| (k as f64).sqrt()).collect();
    let wrapped = profiler.instrumented("sqrt", || {
        (0..16).map(|k| (k as f64).sqrt()).collect::<Vec<f64>>()
    });
    assert_eq!(plain, wrapped);
}

#[test]
fn ledger_files_accumulate_across_sessions() {
    let path = std::env::temp_dir().join(format!(
        "arvak-profile-ledger-{}-{}.jsonl",
        std::process::id(),
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));

    for run in 0..2 {
        let profiler = Profiler::new(ProfilerConfig::new(format!("run{run}")));
        profiler.instrumented("sweep", || ());
        let _: Result<(), ConfigDefect> =
            profiler.try_instrumented("sweep", || Err(ConfigDefect("bad point")));
        append_ledger(&profiler.records(), &path).unwrap();
    }

    let records = read_ledger_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(records.len(), 4);
    let report = ProfileReport::from_records("merged", &records);
    let sweep = report.scope("sweep").unwrap();
    assert_eq!(sweep.call_count, 4);
    assert_eq!(sweep.failed_count, 2);
}
