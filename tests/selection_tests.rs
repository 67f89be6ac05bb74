mod common;

use ideorder::config::SelectionArgs;
use ideorder::error::OrderError;
use ideorder::selection::{self, resolve_with_names};
use std::io::Write;

const GENOME: &str = "\
chr - hs1 1 0 100 x
chr - hs2 2 0 100 x
chr - hs3 3 0 100 x
chr - hs4 4 0 100 x
chr - mm1 m1 0 100 x
chr - mm2 m2 0 100 x
";

// hs4 carries no links.
const LINKS: &str = "\
hs1 10 10 mm1 10 10
hs2 10 10 mm2 10 10
hs3 10 10 hs1 50 50
";

fn setup() -> (ideorder::core_types::Karyotype, Vec<ideorder::core_types::Link>) {
    let k = common::karyotype(GENOME);
    let l = common::links(LINKS, &k);
    (k, l)
}

#[test]
fn test_default_selects_linked_in_karyotype_order() {
    let (k, links) = setup();
    let sel = resolve_with_names(&k, &links, &SelectionArgs::default(), &[]).unwrap();
    assert_eq!(sel.order, common::indices(&k, &["hs1", "hs2", "hs3", "mm1", "mm2"]));
    assert!(sel.preorder.is_empty());
    assert_eq!(sel.static_count(), 0);
}

#[test]
fn test_shuffle_directives_are_unioned() {
    let (k, links) = setup();
    let args = SelectionArgs {
        shuffle_regex: vec!["^MM".into()],
        shuffle_list: vec!["hs3".into(), "hs4".into(), "nope".into()],
        ..Default::default()
    };
    let sel = resolve_with_names(&k, &links, &args, &["hs1".to_string()]).unwrap();
    // hs4 is named but unlinked, "nope" is unknown: both drop out.
    assert_eq!(sel.order, common::indices(&k, &["hs1", "hs3", "mm1", "mm2"]));
}

#[test]
fn test_empty_selection_is_fatal() {
    let (k, links) = setup();
    let args = SelectionArgs {
        shuffle_list: vec!["hs4".into()],
        ..Default::default()
    };
    let err = resolve_with_names(&k, &links, &args, &[]).unwrap_err();
    assert!(matches!(err, OrderError::Config(_)));
}

#[test]
fn test_init_order_regex_then_list() {
    let (k, links) = setup();
    let args = SelectionArgs {
        init_order_regex: vec!["^mm".into(), "hs3".into()],
        init_order: vec!["hs2".into()],
        ..Default::default()
    };
    let sel = resolve_with_names(&k, &links, &args, &[]).unwrap();
    assert_eq!(sel.order, common::indices(&k, &["hs2", "mm1", "mm2", "hs3", "hs1"]));
    assert_eq!(sel.preorder, common::indices(&k, &["hs2", "mm1", "mm2", "hs3"]));
}

#[test]
fn test_init_order_skips_unselected_names() {
    let (k, links) = setup();
    let args = SelectionArgs {
        init_order: vec!["hs4".into(), "mm2".into(), "ghost".into()],
        ..Default::default()
    };
    let sel = resolve_with_names(&k, &links, &args, &[]).unwrap();
    assert_eq!(sel.order[0], k.index_of("mm2").unwrap());
    assert_eq!(sel.order.len(), 5);
    assert_eq!(sel.preorder, common::indices(&k, &["mm2"]));
}

#[test]
fn test_static_directives_build_mask() {
    let (k, links) = setup();
    let args = SelectionArgs {
        static_regex: vec!["^HS[12]$".into()],
        static_list: vec!["mm2".into()],
        ..Default::default()
    };
    let sel = resolve_with_names(&k, &links, &args, &[]).unwrap();
    assert_eq!(sel.static_count(), 3);
    assert!(sel.is_static(k.index_of("hs1").unwrap()));
    assert!(!sel.is_static(k.index_of("hs3").unwrap()));
    assert!(sel.is_static(k.index_of("mm2").unwrap()));
}

#[test]
fn test_shuffle_file_is_read() {
    let (k, links) = setup();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# ideograms to shuffle").unwrap();
    writeln!(file, "hs2, mm2").unwrap();
    writeln!(file, "hs1").unwrap();

    let args = SelectionArgs {
        shuffle_file: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    let sel = selection::resolve(&k, &links, &args).unwrap();
    assert_eq!(sel.order, common::indices(&k, &["hs1", "hs2", "mm2"]));
}

#[test]
fn test_missing_shuffle_file_is_fatal() {
    let (k, links) = setup();
    let args = SelectionArgs {
        shuffle_file: Some("/definitely/not/here.txt".into()),
        ..Default::default()
    };
    assert!(matches!(
        selection::resolve(&k, &links, &args),
        Err(OrderError::Read { .. })
    ));
}
