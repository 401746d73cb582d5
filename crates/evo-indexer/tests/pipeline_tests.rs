use evo_core::{DiagnosticKind, IndexerConfig, ProposalId, Severity, Status};
use evo_indexer::{
    render_run, Indexer, OutputFormat, RunError, EXIT_ERRORS, EXIT_OK, EXIT_WARNINGS,
};
use evo_test_utils::{temp_corpus, write_corpus, ProposalFixture};
use pretty_assertions::assert_eq;
use std::fs;

fn indexer() -> Indexer {
    Indexer::new(IndexerConfig::default())
}

fn kinds(run: &evo_indexer::IndexRun) -> Vec<DiagnosticKind> {
    run.diagnostics.iter().map(|d| d.kind).collect()
}

#[test]
fn empty_collection_is_clean() {
    let corpus = temp_corpus(&[]);
    let run = indexer().run(corpus.path()).unwrap();

    assert!(run.index.is_empty());
    assert!(run.diagnostics.is_empty());
    assert_eq!(run.exit_code(true), EXIT_OK);
}

#[test]
fn duplicate_id_fails_run() {
    let corpus = temp_corpus(&[
        ProposalFixture::new("0098-a.md", "SE-0098", "First take"),
        ProposalFixture::new("0098-b.md", "SE-0098", "Second take"),
    ]);
    let run = indexer().run(corpus.path()).unwrap();

    assert_eq!(kinds(&run), vec![DiagnosticKind::DuplicateId]);
    assert_eq!(
        run.diagnostics[0].files().collect::<Vec<_>>(),
        vec!["0098-a.md", "0098-b.md"]
    );
    assert_eq!(run.exit_code(false), EXIT_ERRORS);
    assert_eq!(run.index.lookup("SE-0098").unwrap().title, "First take");
}

#[test]
fn rejected_status_is_listed() {
    let corpus = temp_corpus(&[
        ProposalFixture::new("0098-lowercase.md", "SE-0098", "Lowercase didSet")
            .with_status("Rejected"),
        ProposalFixture::new("0099-other.md", "SE-0099", "Other"),
    ]);
    let run = indexer().run(corpus.path()).unwrap();

    let rejected = run.index.list_by_status(Status::Rejected);
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].id, Some(ProposalId::new("SE-0098")));
    assert_eq!(run.exit_code(true), EXIT_OK);
}

#[test]
fn placeholder_does_not_collide() {
    let corpus = temp_corpus(&[
        ProposalFixture::new("0036-enum-dot.md", "SE-0036", "Leading dot"),
        ProposalFixture::new("NNNN-draft.md", "SE-NNNN", "Draft"),
    ]);
    let run = indexer().run(corpus.path()).unwrap();

    assert!(run.diagnostics.is_empty(), "{:?}", run.diagnostics);
    let ids: Vec<_> = run.index.ids().map(ProposalId::as_str).collect();
    assert_eq!(ids, vec!["SE-0036"]);
    assert_eq!(run.index.len(), 2);
}

#[test]
fn status_annotation_is_normalized_with_info() {
    let corpus = temp_corpus(&[ProposalFixture::new("0100-x.md", "SE-0100", "X")
        .with_status("Active Review (May 15...24)")]);
    let run = indexer().run(corpus.path()).unwrap();

    assert_eq!(run.records()[0].status, Status::ActiveReview);
    assert_eq!(kinds(&run), vec![DiagnosticKind::StatusNormalization]);
    assert_eq!(run.diagnostics[0].severity, Severity::Info);
    assert_eq!(run.exit_code(true), EXIT_OK);
}

#[test]
fn missing_authors_fails_run() {
    let corpus = temp_corpus(&[
        ProposalFixture::new("0001-a.md", "SE-0001", "A").without_authors(),
        ProposalFixture::new("0002-b.md", "SE-0002", "B"),
    ]);
    let run = indexer().run(corpus.path()).unwrap();

    let errors: Vec<_> = run
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::MissingAuthor)
        .map(|d| d.source_file.as_deref())
        .collect();
    assert_eq!(errors, vec![Some("0001-a.md")]);
    assert_eq!(run.exit_code(false), EXIT_ERRORS);
}

#[test]
fn strict_mode_fails_on_warnings() {
    let corpus = temp_corpus(&[ProposalFixture::new("0001-a.md", "SE-0001", "A")
        .with_implementation("apple/swift#1234")]);
    let run = indexer().run(corpus.path()).unwrap();

    assert_eq!(kinds(&run), vec![DiagnosticKind::MalformedLink]);
    assert_eq!(run.exit_code(false), EXIT_OK);
    assert_eq!(run.exit_code(true), EXIT_WARNINGS);
}

#[test]
fn runs_are_idempotent() {
    let corpus = temp_corpus(&[
        ProposalFixture::new("0001-a.md", "SE-0001", "A").with_status("Implemented (Swift 5.9)"),
        ProposalFixture::new("0002-b.md", "SE-0001", "B").without_authors(),
        ProposalFixture::new("0003-c.md", "SE-0003", "C").with_status("Pending"),
    ]);

    let first = indexer().run(corpus.path()).unwrap();
    let second = indexer().run(corpus.path()).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        render_run(&first, OutputFormat::Json).unwrap(),
        render_run(&second, OutputFormat::Json).unwrap()
    );
    assert_eq!(
        render_run(&first, OutputFormat::Text).unwrap(),
        render_run(&second, OutputFormat::Text).unwrap()
    );
}

#[test]
fn parallel_matches_sequential() {
    let fixtures: Vec<_> = (0..40)
        .map(|n| {
            ProposalFixture::new(&format!("{n:04}-p.md"), &format!("SE-{n:04}"), "Title")
                .with_status(if n % 3 == 0 { "Accepted" } else { "Active Review (soon)" })
        })
        .collect();
    let corpus = temp_corpus(&fixtures);

    let sequential = indexer().run(corpus.path()).unwrap();
    let parallel = Indexer::new(IndexerConfig::default().with_parallel(true))
        .run(corpus.path())
        .unwrap();

    assert_eq!(sequential, parallel);
    assert_eq!(parallel.index.len(), 40);
}

#[test]
fn missing_root_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = indexer().run(dir.path().join("missing")).unwrap_err();
    assert!(matches!(err, RunError::Load(_)));
}

#[test]
fn unreadable_document_is_a_warning() {
    let corpus = temp_corpus(&[ProposalFixture::new("0001-a.md", "SE-0001", "A")]);
    fs::write(corpus.path().join("0002-bad.md"), [0xff, 0xfe, 0x00, 0x9f]).unwrap();

    let run = indexer().run(corpus.path()).unwrap();

    assert_eq!(kinds(&run), vec![DiagnosticKind::Io]);
    assert_eq!(run.diagnostics[0].source_file.as_deref(), Some("0002-bad.md"));
    assert_eq!(run.diagnostics[0].severity, Severity::Warning);
    assert_eq!(run.index.len(), 1);
    assert!(run.index.lookup("SE-0001").is_ok());
}

#[test]
fn nested_and_excluded_documents() {
    let corpus = temp_corpus(&[ProposalFixture::new("0001-a.md", "SE-0001", "A")]);
    write_corpus(
        corpus.path(),
        &[
            ProposalFixture::new("nested/0002-b.md", "SE-0002", "B"),
            ProposalFixture::new("README.md", "SE-9999", "Readme"),
        ],
    )
    .unwrap();

    let config = IndexerConfig::default().with_exclude(["README.md"]);
    let run = Indexer::new(config).run(corpus.path()).unwrap();

    let files: Vec<_> = run.records().iter().map(|r| r.source_file.as_str()).collect();
    assert_eq!(files, vec!["0001-a.md", "nested/0002-b.md"]);
}
