//! Task dispatch: batch routing, cache-driven verdicts and
//! decision-equivalence between the two task kinds

mod common;

use common::{RecordingDownstream, TestProject};
use scanpress_core::geometry::{MarginsF, RectF};
use scanpress_core::page::PageTransform;
use scanpress_core::pipeline::Validity;
use scanpress_layout::{DefaultLayoutParams, LayoutOutput, LayoutStage, TaskOutcome, STAGE_NAME};
use std::sync::Arc;

fn stage() -> LayoutStage {
    LayoutStage::new(DefaultLayoutParams::new())
}

#[test]
fn missing_record_short_circuits_the_cache_chain() {
    let project = TestProject::new(1);
    let stage = stage();
    let downstream = Arc::new(RecordingDownstream::new());

    let task = stage.create_cache_driven_task(downstream.clone());
    let verdict = task.check(project.page(0));

    assert_eq!(verdict, Validity::stale(STAGE_NAME));
    assert_eq!(downstream.checked_count(), 0, "downstream must not be consulted");
}

#[test]
fn unchanged_store_state_reports_valid() {
    let project = TestProject::new(1);
    let page = project.page(0);
    let stage = stage();
    let downstream = Arc::new(RecordingDownstream::new());

    // A batch run produces output downstream and fills its cache.
    let xform = PageTransform::identity(page.dpi);
    let task = stage.create_task(page.id.clone(), downstream.clone(), true, false);
    let outcome = task.execute(page, &xform, Some(RectF::new(100.0, 100.0, 2000.0, 3000.0)));
    assert_eq!(outcome, TaskOutcome::Completed);

    // Nothing changed since, so the cache-driven chain agrees everything
    // is valid without redoing any work.
    let check = stage.create_cache_driven_task(downstream.clone());
    assert_eq!(check.check(page), Validity::Valid);
}

#[test]
fn margin_edit_invalidates_downstream_output() {
    let project = TestProject::new(1);
    let page = project.page(0);
    let stage = stage();
    let downstream = Arc::new(RecordingDownstream::new());

    let xform = PageTransform::identity(page.dpi);
    stage
        .create_task(page.id.clone(), downstream.clone(), true, false)
        .execute(page, &xform, Some(RectF::new(100.0, 100.0, 2000.0, 3000.0)));

    let check = stage.create_cache_driven_task(downstream.clone());
    assert_eq!(check.check(page), Validity::Valid);

    // Any nonzero margin delta must flip the verdict for this page's
    // downstream dependents.
    let margins = stage.settings().hard_margins_mm(&page.id).unwrap();
    stage.settings().set_hard_margins_mm(
        &page.id,
        MarginsF::new(margins.left + 1.0, margins.top, margins.right, margins.bottom),
    );

    assert_eq!(check.check(page), Validity::stale("output"));
}

#[test]
fn content_box_invalidation_flips_the_verdict() {
    let project = TestProject::new(1);
    let page = project.page(0);
    let stage = stage();
    let downstream = Arc::new(RecordingDownstream::new());

    let xform = PageTransform::identity(page.dpi);
    stage
        .create_task(page.id.clone(), downstream.clone(), true, false)
        .execute(page, &xform, Some(RectF::new(100.0, 100.0, 2000.0, 3000.0)));

    let check = stage.create_cache_driven_task(downstream.clone());
    assert_eq!(check.check(page), Validity::Valid);

    stage.invalidate_content_box(&page.id);
    assert!(!check.check(page).is_valid());
}

#[test]
fn batch_flag_routes_to_the_downstream_interactive_task() {
    let project = TestProject::new(1);
    let page = project.page(0);
    let stage = stage();
    let downstream = Arc::new(RecordingDownstream::new());
    let xform = PageTransform::identity(page.dpi);

    let outcome = stage
        .create_task(page.id.clone(), downstream.clone(), true, false)
        .execute(page, &xform, None);

    assert_eq!(outcome, TaskOutcome::Completed);
    assert_eq!(downstream.processed_count(), 1);
    assert_eq!(downstream.checked_count(), 0);
}

#[test]
fn editing_sessions_only_verify_downstream() {
    let project = TestProject::new(1);
    let page = project.page(0);
    let stage = stage();
    let downstream = Arc::new(RecordingDownstream::new());
    let xform = PageTransform::identity(page.dpi);

    let outcome = stage
        .create_task(page.id.clone(), downstream.clone(), false, false)
        .execute(page, &xform, None);

    // Downstream has produced nothing yet, so its cache check is stale.
    assert_eq!(outcome, TaskOutcome::Verified(Validity::stale("output")));
    assert_eq!(downstream.processed_count(), 0);
    assert_eq!(downstream.checked_count(), 1);
}

#[test]
fn interactive_task_populates_defaults_and_ingests_the_content_box() {
    let project = TestProject::new(1);
    let page = project.page(0);
    let stage = stage();
    let downstream = Arc::new(RecordingDownstream::new());
    let xform = PageTransform::identity(page.dpi);

    assert!(stage.settings().page_params(&page.id).is_none());

    stage
        .create_task(page.id.clone(), downstream.clone(), true, false)
        .execute(page, &xform, Some(RectF::new(0.0, 0.0, 300.0, 600.0)));

    let params = stage.settings().page_params(&page.id).unwrap();
    assert_eq!(params.hard_margins_mm(), MarginsF::uniform(10.0));
    let size = params.content_size_mm().unwrap();
    assert!((size.width - 25.4).abs() < 1e-9);
    assert!((size.height - 50.8).abs() < 1e-9);
}

#[test]
fn editing_run_stores_the_derived_page_rect() {
    let project = TestProject::new(1);
    let page = project.page(0);
    let stage = stage();
    let downstream = Arc::new(RecordingDownstream::new());
    let xform = PageTransform::identity(page.dpi);

    stage
        .create_task(page.id.clone(), downstream.clone(), false, false)
        .execute(page, &xform, Some(RectF::new(118.0, 118.0, 2244.0, 3272.0)));

    let params = stage.settings().page_params(&page.id).unwrap();
    let expected = LayoutOutput::from_params(&params, page).page_rect;
    assert_eq!(params.page_rect(), expected);
    assert!(!params.page_rect().is_empty());
}

#[test]
fn both_task_kinds_derive_the_same_output() {
    let project = TestProject::new(1);
    let page = project.page(0);
    let stage = stage();
    let downstream = Arc::new(RecordingDownstream::new());
    let xform = PageTransform::identity(page.dpi);

    stage
        .create_task(page.id.clone(), downstream.clone(), true, true)
        .execute(page, &xform, Some(RectF::new(50.0, 60.0, 1800.0, 2900.0)));
    stage.create_cache_driven_task(downstream.clone()).check(page);

    let processed = downstream.processed.lock().unwrap();
    let checked = downstream.checked.lock().unwrap();
    assert_eq!(processed.len(), 1);
    assert_eq!(checked.len(), 1);
    assert_eq!(processed[0].1, checked[0].1, "the two task kinds must hand identical layout downstream");
    assert!(processed[0].2, "debug flag must reach the downstream work unit");
}

#[test]
fn debug_flag_does_not_change_control_flow() {
    let project = TestProject::new(1);
    let page = project.page(0);
    let xform = PageTransform::identity(page.dpi);

    let run = |debug: bool| {
        let stage = stage();
        let downstream = Arc::new(RecordingDownstream::new());
        let outcome = stage
            .create_task(page.id.clone(), downstream.clone(), true, debug)
            .execute(page, &xform, None);
        (outcome, stage.settings().page_params(&page.id))
    };

    let (plain_outcome, plain_params) = run(false);
    let (debug_outcome, debug_params) = run(true);
    assert_eq!(plain_outcome, debug_outcome);
    assert_eq!(plain_params, debug_params);
}
