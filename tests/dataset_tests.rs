use spectral::prelude::*;
use std::fs;
use storycard::dataset::{ExportOptions, ImportOptions};
use storycard::nlp::Capabilities;
use storycard::storage::{Storage, StoryFilter};
use storycard::title::{TitleConfig, TitleExtractor};
use storycard::{TitleTarget, Vocabulary, assign_themes, assign_titles, export_dataset, import_dataset};
use tempfile::TempDir;

const DATASET: &str = "\
Country,Story
US,\"My boss ignored every complaint I made, so I left the company.\"
 India ,I hit the glass ceiling at work after ten years.
,\"Teachers praised the boys, never the girls, in every class.\"
US,\"My boss ignored every complaint I made, so I left the company.\"
Nepal,   
Chile,Short.
";

struct Fixture {
    _dir: TempDir,
    csv: String,
    db: String,
    out: String,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().expect("temp dir");
    let path = |name: &str| dir.path().join(name).to_string_lossy().into_owned();
    let fixture = Fixture {
        csv: path("stories.csv"),
        db: path("stories.db"),
        out: path("export.csv"),
        _dir: dir,
    };
    fs::write(&fixture.csv, DATASET).expect("write dataset");
    fixture
}

#[test]
fn import_cleans_and_deduplicates() {
    let fixture = fixture();

    let report = import_dataset(&fixture.csv, &fixture.db, ImportOptions::default()).expect("import");

    assert_that(&report.read).is_equal_to(6);
    assert_that(&report.empty).is_equal_to(1);
    assert_that(&report.duplicates).is_equal_to(1);
    assert_that(&report.inserted).is_equal_to(4);

    let stories = Storage::new(&fixture.db)
        .expect("open")
        .fetch_stories(StoryFilter::All, 0, 10)
        .expect("fetch");
    let countries: Vec<Option<&str>> = stories.iter().map(|s| s.country.as_deref()).collect();
    assert_that(&countries).is_equal_to(vec![
        Some("United States"),
        Some("India"),
        None,
        Some("Chile"),
    ]);
}

#[test]
fn reimport_inserts_nothing() {
    let fixture = fixture();
    import_dataset(&fixture.csv, &fixture.db, ImportOptions::default()).expect("import");

    let report = import_dataset(&fixture.csv, &fixture.db, ImportOptions::default()).expect("import");

    assert_that(&report.inserted).is_equal_to(0);
    assert_that(&report.duplicates).is_equal_to(5);
}

#[test]
fn full_run_exports_cards() {
    let fixture = fixture();
    import_dataset(&fixture.csv, &fixture.db, ImportOptions::default()).expect("import");
    assign_themes(&fixture.db, &Vocabulary::default()).expect("themes");
    let extractor = TitleExtractor::new(
        &Vocabulary::default(),
        TitleConfig::default(),
        Capabilities::builtin(),
    )
    .expect("default vocabulary compiles");
    let titles = assign_titles(&fixture.db, &extractor, TitleTarget::Untitled).expect("titles");
    assert_that(&titles.processed).is_equal_to(4);

    let written = export_dataset(&fixture.db, &fixture.out, ExportOptions::default()).expect("export");
    assert_that(&written).is_equal_to(4);

    let exported = fs::read_to_string(&fixture.out).expect("read export");
    let mut lines = exported.lines();
    assert_that(&lines.next()).is_equal_to(Some("Country,Story,Themes,Title,Headline"));
    assert_that(&exported.contains("Glass ceiling")).is_true();
    assert_that(&exported.contains("Workplace")).is_true();
}

#[test]
fn analysis_export_filters_rows() {
    let fixture = fixture();
    import_dataset(&fixture.csv, &fixture.db, ImportOptions::default()).expect("import");

    let written = export_dataset(
        &fixture.db,
        &fixture.out,
        ExportOptions {
            analysis: true,
            ellipsis: false,
        },
    )
    .expect("export");

    // Rows without a country or with a short story are left out.
    assert_that(&written).is_equal_to(2);
}

#[test]
fn ellipsis_export_normalizes_titles() {
    let fixture = fixture();
    import_dataset(&fixture.csv, &fixture.db, ImportOptions::default()).expect("import");
    let extractor = TitleExtractor::with_defaults().expect("default vocabulary compiles");
    assign_titles(&fixture.db, &extractor, TitleTarget::All).expect("titles");

    export_dataset(
        &fixture.db,
        &fixture.out,
        ExportOptions {
            analysis: false,
            ellipsis: true,
        },
    )
    .expect("export");

    let mut reader = csv::Reader::from_path(&fixture.out).expect("open export");
    for record in reader.records() {
        let record = record.expect("valid row");
        assert_that(&record.get(3).is_some_and(|title| title.ends_with("..."))).is_true();
    }
}
