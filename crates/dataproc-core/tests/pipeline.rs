use std::fs;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

use dataproc_core::config::ProjectPaths;
use dataproc_core::logging;
use dataproc_core::pipeline::{run, RunOutcome};
use dataproc_core::source::read_csv;
use dataproc_core::transform::{VALUE1, VALUE1_PLUS_10, VALUE1_TYPE, VALUE2_DIV_VALUE1};

fn project() -> Result<(TempDir, ProjectPaths)> {
    let dir = TempDir::new()?;
    let paths = ProjectPaths::from_root(dir.path());
    Ok((dir, paths))
}

fn write_input(paths: &ProjectPaths, contents: &str) -> Result<()> {
    fs::create_dir_all(paths.data_dir())?;
    fs::write(&paths.input, contents)?;
    Ok(())
}

/// Runs the pipeline with the two-sink subscriber scoped to this call.
fn run_logged(paths: &ProjectPaths, seed: u64) -> Result<dataproc_core::error::Result<RunOutcome>> {
    let subscriber = logging::subscriber(&paths.log)?;
    let mut rng = StdRng::seed_from_u64(seed);
    Ok(tracing::subscriber::with_default(subscriber, || {
        run(paths, &mut rng)
    }))
}

#[test]
fn missing_input_is_synthesized_and_processed() -> Result<()> {
    for seed in 0..8 {
        let (_dir, paths) = project()?;

        let outcome = run_logged(&paths, seed)??;

        assert!(paths.input.exists(), "seed {seed}: sample not written");
        let sample = read_csv(&paths.input)?;
        for name in ["id", "category", "value1", "value2"] {
            assert!(sample.column(name).is_ok(), "seed {seed}: missing {name}");
        }

        let expected_rows = sample
            .column(VALUE1)?
            .f64()?
            .into_no_null_iter()
            .filter(|v| *v > 20.0)
            .count();

        if expected_rows == 0 {
            assert!(matches!(outcome, RunOutcome::SkippedAllFiltered { input_rows: 5 }));
            assert!(!paths.output.exists());
        } else {
            assert_eq!(
                outcome,
                RunOutcome::Written {
                    path: paths.output.clone(),
                    rows: expected_rows,
                }
            );
            let output = read_csv(&paths.output)?;
            assert_eq!(output.height(), expected_rows);
            assert_eq!(output.width(), sample.width() + 3);
        }

        let log = fs::read_to_string(&paths.log)?;
        assert!(log.contains(" - WARN - "), "seed {seed}: expected a warning");
    }
    Ok(())
}

#[test]
fn two_row_input_keeps_only_the_high_row() -> Result<()> {
    let (_dir, paths) = project()?;
    write_input(&paths, "id,value1,value2,category\n1,5,10,A\n2,25,50,B\n")?;

    let outcome = run_logged(&paths, 0)??;
    assert!(outcome.wrote_output());

    let output = read_csv(&paths.output)?;
    assert_eq!(output.height(), 1);
    assert_eq!(output.column("id")?.i64()?.get(0), Some(2));
    assert_eq!(output.column(VALUE1_PLUS_10)?.f64()?.get(0), Some(35.0));
    assert_eq!(output.column(VALUE2_DIV_VALUE1)?.f64()?.get(0), Some(2.0));
    assert_eq!(output.column(VALUE1_TYPE)?.str()?.get(0), Some("High"));
    Ok(())
}

#[test]
fn zero_byte_input_logs_error_and_writes_nothing() -> Result<()> {
    let (_dir, paths) = project()?;
    write_input(&paths, "")?;

    let outcome = run_logged(&paths, 0)??;

    assert_eq!(outcome, RunOutcome::SkippedEmptyInput);
    assert!(!paths.output.exists());
    let log = fs::read_to_string(&paths.log)?;
    assert!(log.contains(" - ERROR - "), "log was:\n{log}");
    assert!(log.contains("is empty"));
    Ok(())
}

#[test]
fn fully_filtered_input_writes_nothing() -> Result<()> {
    let (_dir, paths) = project()?;
    write_input(&paths, "id,value1,value2,category\n1,5,10,A\n2,20,50,B\n")?;

    let outcome = run_logged(&paths, 0)??;

    assert_eq!(outcome, RunOutcome::SkippedAllFiltered { input_rows: 2 });
    assert!(!paths.output.exists());
    Ok(())
}

#[test]
fn header_only_input_is_treated_as_empty() -> Result<()> {
    let (_dir, paths) = project()?;
    write_input(&paths, "id,value1,value2,category\n")?;

    let outcome = run_logged(&paths, 0)??;

    assert_eq!(outcome, RunOutcome::SkippedEmptyInput);
    assert!(!paths.output.exists());
    Ok(())
}

#[test]
fn input_without_value1_is_a_run_failure() -> Result<()> {
    let (_dir, paths) = project()?;
    write_input(&paths, "id,value2,category\n1,10,A\n")?;

    let result = run_logged(&paths, 0)?;

    assert!(result.is_err());
    assert!(!paths.output.exists());
    Ok(())
}

#[test]
fn non_numeric_value1_is_a_run_failure() -> Result<()> {
    let (_dir, paths) = project()?;
    write_input(&paths, "id,value1,value2,category\n1,abc,10,A\n2,25,50,B\n")?;

    let result = run_logged(&paths, 0)?;

    assert!(result.is_err(), "bad value1 cell must not be dropped silently");
    assert!(!paths.output.exists());
    Ok(())
}

#[test]
fn output_path_can_be_redirected() -> Result<()> {
    let (dir, paths) = project()?;
    let paths = paths.with_output(dir.path().join("elsewhere").join("out.csv"));
    write_input(&paths, "id,value1,value2,category\n7,30,60,C\n")?;

    let outcome = run_logged(&paths, 0)??;

    assert_eq!(
        outcome,
        RunOutcome::Written {
            path: paths.output.clone(),
            rows: 1,
        }
    );
    assert!(paths.output.exists());
    assert!(!dir.path().join("data").join("processed_output.csv").exists());
    Ok(())
}
