//! Property tests for budgets, ordering, pagination, and determinism.

use proptest::prelude::*;
use triage_diagnostics::{Diagnostic, Severity, SnapshotSource};
use triage_pipeline::{PageOptions, PageRequest, Pipeline, Response};

/// Effectively unbounded token limit.
const HUGE: u64 = u64::MAX / 4;

fn arb_diagnostic() -> impl Strategy<Value = Diagnostic> {
    (
        prop_oneof![
            Just(Severity::Error),
            Just(Severity::Warning),
            Just(Severity::Unknown)
        ],
        prop::sample::select(vec!["src/main.rs", "src/lib.rs", "src/a/b.rs", "tests/it.rs"]),
        1u32..5000,
        1u32..200,
        "[a-z ]{0,80}",
    )
        .prop_map(|(severity, file, line, column, message)| Diagnostic {
            severity,
            file: file.to_string(),
            line,
            column,
            message,
        })
}

fn arb_diagnostics() -> impl Strategy<Value = Vec<Diagnostic>> {
    prop::collection::vec(arb_diagnostic(), 0..60)
}

fn page(pipeline: &Pipeline, request: &PageRequest, snapshot: &SnapshotSource) -> Response {
    pipeline
        .run_page(request, snapshot.cursor(), &PageOptions::default())
        .unwrap()
}

/// Follows cursors until the last page and concatenates the pages.
fn follow(pipeline: &Pipeline, first: PageRequest, snapshot: &SnapshotSource) -> Vec<Diagnostic> {
    let mut request = first;
    let mut out = Vec::new();
    for _ in 0..=snapshot.len() + 1 {
        let response = page(pipeline, &request, snapshot);
        out.extend(response.diagnostics);
        match response.next_cursor {
            Some(cursor) => request.cursor = Some(cursor),
            None => return out,
        }
    }
    panic!("pagination did not terminate");
}

fn errors_precede_warnings(diags: &[Diagnostic]) -> bool {
    diags
        .iter()
        .skip_while(|d| d.severity.is_error())
        .all(|d| !d.severity.is_error())
}

proptest! {
    #[test]
    fn page_respects_budgets(
        diags in arb_diagnostics(),
        max in prop::option::of(0u64..20),
        limit in prop::option::of(0u64..600),
    ) {
        let snapshot = SnapshotSource::new(diags);
        let pipeline = Pipeline::default();
        let request = PageRequest {
            max_diagnostics: max,
            token_limit: limit,
            ..PageRequest::default()
        };
        let response = page(&pipeline, &request, &snapshot);

        if let Some(max) = max {
            prop_assert!(response.diagnostics.len() as u64 <= max);
        }
        if let Some(limit) = limit {
            prop_assert!(response.token_count <= limit);
        }
        let model = pipeline.cost_model();
        let priced: u64 = response.diagnostics.iter().map(|d| model.cost(d).unwrap()).sum();
        prop_assert_eq!(response.token_count, priced);
        prop_assert_eq!(response.summary.returned_diagnostics, response.diagnostics.len() as u64);
        prop_assert!(errors_precede_warnings(&response.diagnostics));
        if response.next_cursor.is_some() {
            prop_assert!(response.truncated);
        }
        prop_assert_eq!(response.truncated, response.truncation_reason.is_some());
    }

    #[test]
    fn count_pagination_is_complete(
        diags in arb_diagnostics(),
        per_page in 1u64..8,
        severity in prop::sample::select(vec!["all", "error", "warning"]),
    ) {
        let snapshot = SnapshotSource::new(diags);
        let pipeline = Pipeline::default();
        let unbounded = PageRequest {
            severity_filter: Some(severity.to_string()),
            token_limit: Some(HUGE),
            ..PageRequest::default()
        };
        let everything = page(&pipeline, &unbounded, &snapshot).diagnostics;
        let paged = follow(
            &pipeline,
            PageRequest {
                max_diagnostics: Some(per_page),
                ..unbounded.clone()
            },
            &snapshot,
        );
        prop_assert_eq!(paged, everything);
    }

    #[test]
    fn token_pagination_is_complete(diags in arb_diagnostics(), slack in 0u64..200) {
        let snapshot = SnapshotSource::new(diags.clone());
        let pipeline = Pipeline::default();
        let model = pipeline.cost_model();
        let largest = diags.iter().map(|d| model.cost(d).unwrap()).max().unwrap_or(1);
        let unbounded = PageRequest {
            token_limit: Some(HUGE),
            ..PageRequest::default()
        };
        let everything = page(&pipeline, &unbounded, &snapshot).diagnostics;
        let paged = follow(
            &pipeline,
            PageRequest {
                token_limit: Some(largest + slack),
                ..PageRequest::default()
            },
            &snapshot,
        );
        prop_assert_eq!(paged, everything);
    }

    #[test]
    fn arrival_order_kept_within_lane(diags in arb_diagnostics()) {
        let snapshot = SnapshotSource::new(diags.clone());
        let request = PageRequest {
            token_limit: Some(HUGE),
            ..PageRequest::default()
        };
        let response = page(&Pipeline::default(), &request, &snapshot);
        let expected: Vec<_> = diags
            .iter()
            .filter(|d| d.severity.is_error())
            .chain(diags.iter().filter(|d| !d.severity.is_error()))
            .cloned()
            .collect();
        prop_assert_eq!(response.diagnostics, expected);
    }

    #[test]
    fn repeated_requests_are_byte_identical(diags in arb_diagnostics(), max in 1u64..10) {
        let snapshot = SnapshotSource::new(diags);
        let pipeline = Pipeline::default();
        let request = PageRequest {
            max_diagnostics: Some(max),
            ..PageRequest::default()
        };
        let a = serde_json::to_vec(&page(&pipeline, &request, &snapshot)).unwrap();
        let b = serde_json::to_vec(&page(&pipeline, &request, &snapshot)).unwrap();
        prop_assert_eq!(a, b);
    }
}
