use std::fs;
use std::path::{Path, PathBuf};

use weldpool_viewer::data::{
    load_dataset, load_dataset_with, DatasetLayout, Diagnostics, ErrorClass, LoadError,
};

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("weldpool_it_{}_{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_default_files(dir: &Path) {
    fs::write(dir.join("temp.o"), "1.0 2.0\n3.0 4.0\n").unwrap();
    fs::write(dir.join("phase.o"), "0 1\n\n1 0\n").unwrap();
    fs::write(dir.join("enth.o"), "1e5 2e5\n3e5 4e5\n").unwrap();
    fs::write(
        dir.join("values.o"),
        "step time width depth energy\n1 0.5 0.1 0.2 10.0\n2 1.0 0.15 0.25 20.0\n",
    )
    .unwrap();
}

#[test]
fn loads_the_four_files() {
    let dir = scratch("ok");
    write_default_files(&dir);

    let ds = load_dataset(&dir).unwrap();
    assert_eq!(ds.temperature.to_rows(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    assert_eq!(ds.phase.shape(), (2, 2));
    assert_eq!(ds.enthalpy.get(1, 1), Some(4e5));
    assert_eq!(
        ds.values.matrix.to_rows(),
        vec![
            vec![1.0, 0.5, 0.1, 0.2, 10.0],
            vec![2.0, 1.0, 0.15, 0.25, 20.0]
        ]
    );

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn each_missing_file_is_an_io_error() {
    for missing in ["temp.o", "phase.o", "enth.o", "values.o"] {
        let dir = scratch(&format!("missing_{missing}"));
        write_default_files(&dir);
        fs::remove_file(dir.join(missing)).unwrap();

        let err = load_dataset(&dir).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Io, "{missing}: {err}");
        match err {
            LoadError::Io { path, .. } => assert!(path.ends_with(missing)),
            other => panic!("unexpected error {other}"),
        }
        fs::remove_dir_all(&dir).ok();
    }
}

#[test]
fn missing_directory_is_an_io_error() {
    let err = load_dataset(Path::new("/no/such/weldpool/outputs")).unwrap_err();
    assert!(err.is_io());
}

#[test]
fn bad_token_aborts_the_load() {
    let dir = scratch("bad_token");
    write_default_files(&dir);
    fs::write(dir.join("enth.o"), "1.0 abc\n").unwrap();

    let err = load_dataset(&dir).unwrap_err();
    assert!(err.is_parse());
    assert!(err.to_string().contains("abc"));
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn empty_values_file_is_rejected() {
    let dir = scratch("empty_values");
    write_default_files(&dir);
    fs::write(dir.join("values.o"), "").unwrap();

    let err = load_dataset(&dir).unwrap_err();
    assert!(matches!(err, LoadError::MissingHeader { .. }));
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn custom_layout_and_diagnostics() {
    #[derive(Default)]
    struct Count(Vec<PathBuf>);
    impl Diagnostics for Count {
        fn file_parsed(&mut self, path: &Path, _rows: usize, _cols: usize) {
            self.0.push(path.to_path_buf());
        }
    }

    let dir = scratch("layout");
    write_default_files(&dir);
    fs::rename(dir.join("temp.o"), dir.join("T.out")).unwrap();
    let layout_path = dir.join("layout.json");
    fs::write(&layout_path, r#"{ "temperature": "T.out" }"#).unwrap();

    let layout = DatasetLayout::from_json_file(&layout_path).unwrap();
    let mut diag = Count::default();
    let ds = load_dataset_with(&dir, &layout, &mut diag).unwrap();
    assert_eq!(ds.temperature.shape(), (2, 2));
    let names: Vec<String> = diag
        .0
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["T.out", "phase.o", "enth.o", "values.o"]);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn invalid_layout_is_rejected_before_reading() {
    let dir = scratch("dup_layout");
    write_default_files(&dir);
    let layout = DatasetLayout {
        enthalpy: "temp.o".into(),
        ..Default::default()
    };
    let err = load_dataset_with(&dir, &layout, &mut weldpool_viewer::data::NoDiagnostics).unwrap_err();
    assert!(matches!(err, LoadError::InvalidLayout(_)));
    fs::remove_dir_all(&dir).ok();
}
