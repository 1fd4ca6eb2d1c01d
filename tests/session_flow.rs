use rusty_tagger::data::loader::parse_csv_str;
use rusty_tagger::labels::normalize_cell;
use rusty_tagger::{FilterMode, Intent, Phase, Session, SessionError};

fn loaded(csv: &str) -> Session {
    let mut session = Session::new();
    session.replace_dataset(parse_csv_str(csv, b',').unwrap());
    session
}

#[test]
fn test_without_labels_walk_then_complete() {
    let mut session = loaded("text,labels\nzero,\none,p\ntwo,\n");
    session.apply(Intent::SelectTextColumn("text".into())).unwrap();
    session.apply(Intent::SelectLabelColumn(Some("labels".into()))).unwrap();
    session.apply(Intent::AnalyzeLabels).unwrap();
    session.apply(Intent::SetFilterMode(FilterMode::WithoutLabels)).unwrap();
    session.apply(Intent::StartClassification).unwrap();

    let nav = session.navigator().unwrap();
    assert_eq!(nav.indices(), &[0, 2]);

    session.apply(Intent::Navigate(1)).unwrap();
    assert_eq!(session.current_text(), Some("two"));
    session.apply(Intent::Navigate(2)).unwrap();
    assert!(session.is_complete());
    assert_eq!(session.phase(), Phase::Classifying);
}

#[test]
fn test_toggle_then_export_scenario() {
    let mut session = loaded("id,text\n1,please fix\n2,all good\n");
    session.apply(Intent::SelectTextColumn("text".into())).unwrap();
    session.apply(Intent::StartClassification).unwrap();
    session.apply(Intent::ToggleLabel("urgent".into())).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("classified_data.csv");
    assert_eq!(session.export(&path).unwrap(), 2);

    let text = std::fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(r#""id","text","classifications""#));
    assert_eq!(lines.next(), Some(r#""1","please fix","[""urgent""]""#));
    assert_eq!(lines.next(), Some(r#""2","all good","[]""#));
}

#[test]
fn test_export_covers_every_row_for_each_filter() {
    for mode in FilterMode::ALL {
        let mut session = loaded("text,labels\na,x\nb,\nc,y\nd,\n");
        session.apply(Intent::SelectTextColumn("text".into())).unwrap();
        session.apply(Intent::SelectLabelColumn(Some("labels".into()))).unwrap();
        session.apply(Intent::AnalyzeLabels).unwrap();
        session.apply(Intent::SetFilterMode(mode)).unwrap();
        session.apply(Intent::StartClassification).unwrap();
        session.apply(Intent::ToggleLabel("seen".into())).unwrap();

        let table = session.export_table().unwrap();
        assert_eq!(table.records.len(), 4, "mode {mode}");
        assert_eq!(table.headers.last().map(String::as_str), Some("classifications"));
    }
}

#[test]
fn test_exported_labels_survive_reimport() {
    let mut session = loaded("text,labels\nfirst,\"['b', 'a']\"\nsecond,\"c, d\"\n");
    session.apply(Intent::SelectTextColumn("text".into())).unwrap();
    session.apply(Intent::SelectLabelColumn(Some("labels".into()))).unwrap();
    session.apply(Intent::AnalyzeLabels).unwrap();
    session.apply(Intent::StartClassification).unwrap();
    session.apply(Intent::ToggleLabel("b".into())).unwrap();
    session.apply(Intent::ToggleLabel("e".into())).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    session.export(&path).unwrap();

    let mut again = Session::new();
    again.open(&path).unwrap();
    let dataset = again.dataset().unwrap();
    assert_eq!(dataset.cell(0, "labels"), Some("['b', 'a']"));
    assert_eq!(normalize_cell(dataset.cell(0, "classifications").unwrap()), vec!["a", "e"]);
    assert_eq!(normalize_cell(dataset.cell(1, "classifications").unwrap()), vec!["c", "d"]);
}

#[test]
fn test_failed_open_keeps_previous_session() {
    let mut session = loaded("text\nkept\n");
    session.apply(Intent::SelectTextColumn("text".into())).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("broken.csv");
    std::fs::write(&bad, "a,a\n1,2\n").unwrap();

    let err = session.open(&bad).unwrap_err();
    assert!(matches!(err, SessionError::Input { .. }));
    assert_eq!(session.text_column(), Some("text"));
    assert_eq!(session.dataset().unwrap().cell(0, "text"), Some("kept"));
}

#[test]
fn test_export_without_dataset_is_precondition() {
    let dir = tempfile::tempdir().unwrap();
    let err = Session::new().export(&dir.path().join("x.csv")).unwrap_err();
    assert!(matches!(err, SessionError::Precondition(_)));
}
